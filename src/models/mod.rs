//! Data structures for the bracket engine: players, matches, rounds, standings, tournament.

mod game;
mod ids;
mod player;
mod standing;
mod tournament;

pub use game::{Match, MatchId, MatchResult, MatchStatus, Round, RoundId};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use player::{Player, PlayerId};
pub use standing::{PointsPolicy, Standing};
pub use tournament::{Tournament, TournamentError, TournamentFormat, TournamentId, TournamentState};
