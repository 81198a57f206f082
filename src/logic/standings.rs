//! Standings from completed match results.

use crate::models::{MatchStatus, PlayerId, Standing, Tournament};
use std::collections::HashMap;

/// Rank every registered player by points, then wins, then fewest matches played.
///
/// Only completed matches with a result count. Match slots naming a player who
/// is not registered are skipped. Ties that survive all three keys keep
/// registration order.
pub fn compute_standings(tournament: &Tournament) -> Vec<Standing> {
    let points = tournament.points;
    let mut standings: Vec<Standing> = tournament
        .players
        .iter()
        .map(|p| Standing::new(p.id))
        .collect();
    let index: HashMap<PlayerId, usize> = standings
        .iter()
        .enumerate()
        .map(|(i, s)| (s.player_id, i))
        .collect();

    let completed = tournament
        .rounds
        .iter()
        .flat_map(|r| &r.matches)
        .filter(|m| m.status == MatchStatus::Completed);

    for m in completed {
        let Some(result) = &m.result else {
            continue;
        };
        let sides = [(m.player1_id, m.player2_id), (m.player2_id, m.player1_id)];
        for (me, other) in sides {
            let Some(me) = me else {
                continue;
            };
            let Some(&i) = index.get(&me) else {
                log::warn!("Match {} references unknown player {}", m.id, me);
                continue;
            };
            let s = &mut standings[i];
            s.played += 1;
            if result.winner_id == Some(me) {
                s.won += 1;
                s.points += points.points_for_win;
            } else if other.is_some() && result.winner_id == other {
                s.lost += 1;
                s.points += points.points_for_loss;
            } else {
                s.drawn += 1;
                s.points += points.points_for_draw;
            }
        }
    }

    standings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.won.cmp(&a.won))
            .then(a.played.cmp(&b.played))
    });
    standings
}
