//! Match, MatchResult, MatchStatus and Round.

use crate::models::ids::IdGenerator;
use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Unique identifier for a round.
pub type RoundId = Uuid;

/// Lifecycle of a match. Transitions are applied by callers; the engine only
/// creates matches as `Pending`, or `Completed` for byes.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Scheduled,
    InProgress,
    Completed,
    Active,
}

/// Generic outcome of a match. Sport-specific score detail lives elsewhere.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub player1_score: u32,
    pub player2_score: u32,
    /// None means a draw.
    pub winner_id: Option<PlayerId>,
    #[serde(default)]
    pub is_walkover: bool,
}

impl MatchResult {
    pub fn new(player1_score: u32, player2_score: u32, winner_id: Option<PlayerId>) -> Self {
        Self {
            player1_score,
            player2_score,
            winner_id,
            is_walkover: false,
        }
    }

    /// A bye: the lone player advances without playing.
    pub fn walkover(winner_id: PlayerId, player1_score: u32) -> Self {
        Self {
            player1_score,
            player2_score: 0,
            winner_id: Some(winner_id),
            is_walkover: true,
        }
    }
}

/// One contest between at most two players.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// None while the slot waits for bracket progression, or for a bye.
    pub player1_id: Option<PlayerId>,
    pub player2_id: Option<PlayerId>,
    pub result: Option<MatchResult>,
    pub status: MatchStatus,
    /// Match the winner advances into (single elimination only).
    pub next_match_id: Option<MatchId>,
    /// Written by the scheduling collaborator, never read by the engine.
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl Match {
    pub fn new(id: MatchId, player1_id: Option<PlayerId>, player2_id: Option<PlayerId>) -> Self {
        Self {
            id,
            player1_id,
            player2_id,
            result: None,
            status: MatchStatus::Pending,
            next_match_id: None,
            scheduled_at: None,
            resource_id: None,
            location: None,
        }
    }

    /// A match with no players yet (later elimination rounds).
    pub fn empty(id: MatchId) -> Self {
        Self::new(id, None, None)
    }

    /// A bye for `player`, created already completed as a walkover.
    pub fn bye(id: MatchId, player: PlayerId, score: u32) -> Self {
        Self {
            result: Some(MatchResult::walkover(player, score)),
            status: MatchStatus::Completed,
            ..Self::new(id, Some(player), None)
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    pub fn is_bye(&self) -> bool {
        self.result.as_ref().is_some_and(|r| r.is_walkover)
    }

    /// Both player slots filled.
    pub fn is_ready(&self) -> bool {
        self.player1_id.is_some() && self.player2_id.is_some()
    }

    pub fn involves(&self, player: PlayerId) -> bool {
        self.player1_id == Some(player) || self.player2_id == Some(player)
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.result.as_ref().and_then(|r| r.winner_id)
    }
}

/// An ordered group of matches sharing a stage.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    /// 1-based.
    pub number: u32,
    pub name: String,
    pub matches: Vec<Match>,
}

impl Round {
    pub fn new(ids: &mut impl IdGenerator, number: u32, name: impl Into<String>, matches: Vec<Match>) -> Self {
        Self {
            id: ids.next_id(),
            number,
            name: name.into(),
            matches,
        }
    }

    /// "Round N" naming used by round robin and Swiss.
    pub fn numbered(ids: &mut impl IdGenerator, number: u32, matches: Vec<Match>) -> Self {
        Self::new(ids, number, format!("Round {number}"), matches)
    }

    pub fn is_completed(&self) -> bool {
        self.matches.iter().all(Match::is_completed)
    }
}
