//! Tournament, TournamentFormat and TournamentState.

use crate::models::game::{Match, MatchId, MatchStatus, Round};
use crate::models::player::{Player, PlayerId};
use crate::models::standing::PointsPolicy;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Format name is not one of the known formats.
    UnsupportedFormat(String),
    /// Format is known but has no bracket builder yet.
    FormatNotImplemented(TournamentFormat),
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// Not enough players to start.
    NotEnoughPlayers { required: usize },
    PlayerNotFound(PlayerId),
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    EmptyPlayerName,
    MatchNotFound(MatchId),
    /// Match does not have both players yet.
    MatchNotReady(MatchId),
    /// Declared winner is not playing in the match.
    InvalidWinner(PlayerId),
    /// Elimination matches need a winner.
    DrawNotAllowed,
    /// Not all matches of the current round have a result.
    IncompleteResults,
    /// Every configured Swiss round has already been generated.
    NoRoundsRemaining,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::UnsupportedFormat(name) => write!(f, "Unsupported tournament format: {}", name),
            TournamentError::FormatNotImplemented(format) => {
                write!(f, "Bracket generation is not implemented for {}", format)
            }
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::NotEnoughPlayers { required } => {
                write!(f, "Need at least {} players to start", required)
            }
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            TournamentError::EmptyPlayerName => write!(f, "Player name must not be empty"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::MatchNotReady(_) => write!(f, "Match does not have two players yet"),
            TournamentError::InvalidWinner(_) => write!(f, "Winner is not a player in this match"),
            TournamentError::DrawNotAllowed => write!(f, "Elimination matches cannot end in a draw"),
            TournamentError::IncompleteResults => write!(f, "Not all matches have a result"),
            TournamentError::NoRoundsRemaining => write!(f, "All rounds have already been generated"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Competition format.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    #[default]
    SingleElimination,
    DoubleElimination,
    RoundRobin,
    Swiss,
}

impl TournamentFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            TournamentFormat::SingleElimination => "single_elimination",
            TournamentFormat::DoubleElimination => "double_elimination",
            TournamentFormat::RoundRobin => "round_robin",
            TournamentFormat::Swiss => "swiss",
        }
    }
}

impl std::fmt::Display for TournamentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TournamentFormat {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_elimination" => Ok(TournamentFormat::SingleElimination),
            "double_elimination" => Ok(TournamentFormat::DoubleElimination),
            "round_robin" => Ok(TournamentFormat::RoundRobin),
            "swiss" => Ok(TournamentFormat::Swiss),
            other => Err(TournamentError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Adding players and settings; no rounds yet.
    #[default]
    Setup,
    /// Rounds generated, results being entered.
    InProgress,
    Completed,
}

/// Full tournament: players, rounds and settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub format: TournamentFormat,
    pub players: Vec<Player>,
    pub rounds: Vec<Round>,
    #[serde(default)]
    pub points: PointsPolicy,
    pub state: TournamentState,
    /// Number of Swiss rounds set by the creator; None uses the default for the field size.
    #[serde(default)]
    pub swiss_rounds: Option<u32>,
    /// Seed for the draw; random when None.
    #[serde(default)]
    pub draw_seed: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new tournament in Setup state with no players.
    pub fn new(name: impl Into<String>, format: TournamentFormat) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            format,
            players: Vec::new(),
            rounds: Vec::new(),
            points: PointsPolicy::default(),
            state: TournamentState::Setup,
            swiss_rounds: None,
            draw_seed: None,
            created_at: Utc::now(),
        }
    }

    /// Create a tournament with initial players. Still in Setup until started.
    pub fn with_players(name: impl Into<String>, format: TournamentFormat, players: Vec<Player>) -> Self {
        Self {
            players,
            ..Self::new(name, format)
        }
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Random source for the draw: seeded when `draw_seed` is set.
    pub fn draw_rng(&self) -> StdRng {
        match self.draw_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// (round index, match index) of a match.
    pub fn match_position(&self, match_id: MatchId) -> Option<(usize, usize)> {
        self.rounds.iter().enumerate().find_map(|(r, round)| {
            round
                .matches
                .iter()
                .position(|m| m.id == match_id)
                .map(|i| (r, i))
        })
    }

    pub fn find_match(&self, match_id: MatchId) -> Option<&Match> {
        let (r, i) = self.match_position(match_id)?;
        Some(&self.rounds[r].matches[i])
    }

    pub fn find_match_mut(&mut self, match_id: MatchId) -> Option<&mut Match> {
        let (r, i) = self.match_position(match_id)?;
        Some(&mut self.rounds[r].matches[i])
    }

    /// Add a player (only valid in Setup). Names must be unique (case-insensitive).
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<PlayerId, TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::EmptyPlayerName);
        }
        let is_duplicate = self
            .players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicatePlayerName);
        }
        let player = Player::new(name_trimmed);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Add several players at once. Either every name is accepted or none is.
    pub fn add_players<I, S>(&mut self, names: I) -> Result<Vec<PlayerId>, TournamentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.players.len();
        let mut added = Vec::new();
        for name in names {
            match self.add_player(name) {
                Ok(id) => added.push(id),
                Err(e) => {
                    self.players.truncate(before);
                    return Err(e);
                }
            }
        }
        Ok(added)
    }

    /// Remove a player by id (only valid in Setup).
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        self.players.remove(idx);
        Ok(())
    }

    /// Change the points policy (only valid in Setup).
    pub fn set_points(&mut self, points: PointsPolicy) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        self.points = points;
        Ok(())
    }

    pub fn set_format(&mut self, format: TournamentFormat) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        self.format = format;
        Ok(())
    }

    pub fn set_swiss_rounds(&mut self, rounds: u32) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        self.swiss_rounds = Some(rounds.max(1));
        Ok(())
    }

    /// Change a match's status on behalf of an external caller. Only a match
    /// with a result may be marked completed.
    pub fn set_match_status(&mut self, match_id: MatchId, status: MatchStatus) -> Result<(), TournamentError> {
        let m = self
            .find_match_mut(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        if status == MatchStatus::Completed && m.result.is_none() {
            return Err(TournamentError::IncompleteResults);
        }
        m.status = status;
        Ok(())
    }

    /// Restart tournament: back to Setup with the same players and settings. Clears rounds.
    pub fn restart_tournament(&mut self) -> Result<(), TournamentError> {
        if self.state == TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        self.rounds.clear();
        self.state = TournamentState::Setup;
        Ok(())
    }
}
