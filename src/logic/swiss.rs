//! Swiss system: random first round, then rank-adjacent pairings that avoid rematches.

use crate::logic::standings::compute_standings;
use crate::models::{IdGenerator, Match, Player, PlayerId, Round, Tournament};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Score given to the player receiving a Swiss bye.
const BYE_SCORE: u32 = 1;

/// Opponents each player has already faced.
pub type PairingHistory = HashMap<PlayerId, HashSet<PlayerId>>;

/// Round 1: shuffle, pair neighbours, odd player out gets a bye.
pub fn build_swiss_first_round<R, G>(players: &[Player], rng: &mut R, ids: &mut G) -> Round
where
    R: Rng + ?Sized,
    G: IdGenerator,
{
    let mut order: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    order.shuffle(rng);

    let mut matches: Vec<Match> = order
        .chunks_exact(2)
        .map(|pair| Match::new(ids.next_id(), Some(pair[0]), Some(pair[1])))
        .collect();
    if order.len() % 2 == 1 {
        if let Some(&last) = order.last() {
            matches.push(Match::bye(ids.next_id(), last, BYE_SCORE));
        }
    }

    log::debug!("Swiss round 1: {} players, {} matches", players.len(), matches.len());
    Round::numbered(ids, 1, matches)
}

/// Who has played whom, from every match with both slots filled.
pub fn pairing_history(rounds: &[Round]) -> PairingHistory {
    let mut history = PairingHistory::new();
    for m in rounds.iter().flat_map(|r| &r.matches) {
        if let (Some(a), Some(b)) = (m.player1_id, m.player2_id) {
            history.entry(a).or_default().insert(b);
            history.entry(b).or_default().insert(a);
        }
    }
    history
}

/// Generate the next Swiss round from the tournament's results so far.
///
/// Players are taken in standings order. Each takes the first remaining
/// opponent they have not met; if everyone left is a rematch, the next player
/// in line is taken anyway. A leftover player gets a bye.
///
/// Does not check that the previous round is complete; that is the caller's job.
pub fn generate_next_round<G: IdGenerator>(tournament: &Tournament, round_number: u32, ids: &mut G) -> Round {
    let history = pairing_history(&tournament.rounds);
    let mut pool: Vec<PlayerId> = compute_standings(tournament)
        .into_iter()
        .map(|s| s.player_id)
        .collect();

    let mut matches = Vec::with_capacity(pool.len() / 2 + 1);
    let mut rematches = 0;
    while pool.len() >= 2 {
        let p1 = pool.remove(0);
        let played = history.get(&p1);
        let idx = pool
            .iter()
            .position(|p2| !played.is_some_and(|seen| seen.contains(p2)))
            .unwrap_or_else(|| {
                rematches += 1;
                0
            });
        let p2 = pool.remove(idx);
        matches.push(Match::new(ids.next_id(), Some(p1), Some(p2)));
    }
    if let Some(p) = pool.pop() {
        matches.push(Match::bye(ids.next_id(), p, BYE_SCORE));
    }

    if rematches > 0 {
        log::debug!("Swiss round {}: {} unavoidable rematch(es)", round_number, rematches);
    }
    Round::numbered(ids, round_number, matches)
}
