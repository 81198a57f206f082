//! Bracket engine and tournament business logic.

mod bracket;
mod csv_io;
mod lifecycle;
mod round_robin;
mod schedule;
mod single_elimination;
mod standings;
mod swiss;

pub use bracket::{generate_bracket, generate_rounds};
pub use csv_io::{import_players_csv, standings_csv};
pub use lifecycle::{
    advance_swiss_round, champion, default_swiss_rounds, is_finished, record_match_result,
    start_tournament, swiss_round_limit, MIN_PLAYERS,
};
pub use round_robin::build_round_robin;
pub use schedule::{all_matches, assign_schedule, scheduling_summary, upcoming_matches, SchedulingSummary};
pub use single_elimination::{build_single_elimination, link_progression, round_name};
pub use standings::compute_standings;
pub use swiss::{build_swiss_first_round, generate_next_round, pairing_history, PairingHistory};
