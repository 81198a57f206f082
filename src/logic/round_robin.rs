//! Round robin via the circle method.

use crate::models::{IdGenerator, Match, Player, PlayerId, Round};

/// Build all rounds of a round robin. Every unordered pair of players meets exactly once.
///
/// An odd field gets a bye placeholder; pairings against it are dropped, so
/// each round has one player resting. With `n` slots there are `n - 1` rounds.
/// After each round slot 0 stays fixed and the last slot moves to position 1.
pub fn build_round_robin<G: IdGenerator>(players: &[Player], ids: &mut G) -> Vec<Round> {
    if players.len() < 2 {
        return Vec::new();
    }

    // None is the bye.
    let mut slots: Vec<Option<PlayerId>> = players.iter().map(|p| Some(p.id)).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let n = slots.len();

    let mut rounds = Vec::with_capacity(n - 1);
    for number in 1..n as u32 {
        let matches: Vec<Match> = (0..n / 2)
            .filter_map(|i| match (slots[i], slots[n - 1 - i]) {
                (Some(a), Some(b)) => Some(Match::new(ids.next_id(), Some(a), Some(b))),
                _ => None,
            })
            .collect();
        rounds.push(Round::numbered(ids, number, matches));

        if let Some(last) = slots.pop() {
            slots.insert(1, last);
        }
    }

    log::debug!("Round robin: {} players, {} rounds", players.len(), rounds.len());
    rounds
}
