//! Tournament bracket engine: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    advance_swiss_round, all_matches, assign_schedule, build_round_robin, build_single_elimination,
    build_swiss_first_round, champion, compute_standings, default_swiss_rounds, generate_bracket,
    generate_next_round, generate_rounds, import_players_csv, is_finished, link_progression,
    pairing_history, record_match_result, round_name, scheduling_summary, standings_csv,
    start_tournament, swiss_round_limit, upcoming_matches, PairingHistory, SchedulingSummary,
    MIN_PLAYERS,
};
pub use models::{
    IdGenerator, Match, MatchId, MatchResult, MatchStatus, Player, PlayerId, PointsPolicy,
    RandomIds, Round, RoundId, SequentialIds, Standing, Tournament, TournamentError,
    TournamentFormat, TournamentId, TournamentState,
};
