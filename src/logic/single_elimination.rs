//! Single-elimination bracket: seeding into power-of-two slots, empty later rounds, progression links.

use crate::models::{IdGenerator, Match, Player, PlayerId, Round};
use rand::seq::SliceRandom;
use rand::Rng;

/// Build every round of a single-elimination bracket.
///
/// 1. Size the bracket to the next power of two; `log2(size)` rounds.
/// 2. Shuffle players into the first slots; the rest are byes.
/// 3. Round 1 pairs slot `i` with slot `size - 1 - i`. A lone player gets a walkover.
/// 4. Later rounds halve the match count and start empty.
///
/// Progression links are not set here; see [`link_progression`].
pub fn build_single_elimination<R, G>(players: &[Player], rng: &mut R, ids: &mut G) -> Vec<Round>
where
    R: Rng + ?Sized,
    G: IdGenerator,
{
    let size = players.len().max(1).next_power_of_two();
    let total_rounds = size.trailing_zeros();

    let mut seeded: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    seeded.shuffle(rng);
    let mut slots: Vec<Option<PlayerId>> = seeded.into_iter().map(Some).collect();
    slots.resize(size, None);

    let mut rounds = Vec::with_capacity(total_rounds as usize);
    let mut match_count = size / 2;
    for number in 1..=total_rounds {
        let matches = if number == 1 {
            (0..match_count)
                .map(|i| first_round_match(ids, slots[i], slots[size - 1 - i]))
                .collect()
        } else {
            (0..match_count).map(|_| Match::empty(ids.next_id())).collect()
        };
        rounds.push(Round::new(ids, number, round_name(number, total_rounds), matches));
        match_count /= 2;
    }

    log::debug!(
        "Single elimination: {} players, bracket size {}, {} rounds",
        players.len(),
        size,
        total_rounds
    );
    rounds
}

fn first_round_match<G: IdGenerator>(ids: &mut G, a: Option<PlayerId>, b: Option<PlayerId>) -> Match {
    let id = ids.next_id();
    match (a, b) {
        (Some(p), None) | (None, Some(p)) => Match::bye(id, p, 0),
        // Both empty only when the field is too small to fill half the bracket.
        (a, b) => Match::new(id, a, b),
    }
}

/// "Final", "Semi-Finals", "Quarter-Finals" counted from the end, "Round N" before that.
pub fn round_name(number: u32, total_rounds: u32) -> String {
    match total_rounds - number {
        0 => "Final".to_string(),
        1 => "Semi-Finals".to_string(),
        2 => "Quarter-Finals".to_string(),
        _ => format!("Round {}", number),
    }
}

/// Point each match at the match its winner plays next: match `i` of round `r`
/// feeds match `i / 2` of round `r + 1`. The last round stays unlinked.
pub fn link_progression(rounds: &mut [Round]) {
    for r in 1..rounds.len() {
        let (earlier, later) = rounds.split_at_mut(r);
        let current = &mut earlier[r - 1];
        let next = &later[0];
        for (i, m) in current.matches.iter_mut().enumerate() {
            m.next_match_id = next.matches.get(i / 2).map(|n| n.id);
        }
    }
}
