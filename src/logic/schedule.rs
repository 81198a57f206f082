//! Read-only views for the scheduling side, plus its single write path.

use crate::models::{Match, MatchId, MatchStatus, Tournament, TournamentError};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counts over every match in the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct SchedulingSummary {
    pub total: usize,
    pub completed: usize,
    /// Open matches with a time assigned.
    pub scheduled: usize,
    /// Open matches without a time.
    pub unscheduled: usize,
}

/// Matches that can be played now: both players known, no result yet. Round order, then match order.
pub fn upcoming_matches(tournament: &Tournament) -> Vec<&Match> {
    all_matches(tournament)
        .filter(|m| m.is_ready() && !m.is_completed())
        .collect()
}

/// Every match across every round, in order.
pub fn all_matches(tournament: &Tournament) -> impl Iterator<Item = &Match> {
    tournament.rounds.iter().flat_map(|r| r.matches.iter())
}

pub fn scheduling_summary(tournament: &Tournament) -> SchedulingSummary {
    let mut summary = SchedulingSummary::default();
    for m in all_matches(tournament) {
        summary.total += 1;
        if m.is_completed() {
            summary.completed += 1;
        } else if m.scheduled_at.is_some() {
            summary.scheduled += 1;
        } else {
            summary.unscheduled += 1;
        }
    }
    summary
}

/// Assign a time and place to a match. A pending match becomes scheduled.
pub fn assign_schedule(
    tournament: &mut Tournament,
    match_id: MatchId,
    at: DateTime<Utc>,
    resource_id: Option<String>,
    location: Option<String>,
) -> Result<(), TournamentError> {
    let m = tournament
        .find_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if m.is_completed() {
        return Err(TournamentError::InvalidState);
    }
    m.scheduled_at = Some(at);
    m.resource_id = resource_id;
    m.location = location;
    if m.status == MatchStatus::Pending {
        m.status = MatchStatus::Scheduled;
    }
    Ok(())
}
