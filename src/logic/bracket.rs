//! Format dispatch: players + format -> initial rounds.

use crate::logic::round_robin::build_round_robin;
use crate::logic::single_elimination::{build_single_elimination, link_progression};
use crate::logic::swiss::build_swiss_first_round;
use crate::models::{IdGenerator, Player, Round, TournamentError, TournamentFormat};
use rand::Rng;

/// Generate the initial rounds for `format`.
///
/// Single elimination and round robin produce every round up front (single
/// elimination already linked). Swiss produces round 1 only. Double
/// elimination has no builder and returns an empty list; callers must check.
pub fn generate_rounds<R, G>(players: &[Player], format: TournamentFormat, rng: &mut R, ids: &mut G) -> Vec<Round>
where
    R: Rng + ?Sized,
    G: IdGenerator,
{
    match format {
        TournamentFormat::SingleElimination => {
            let mut rounds = build_single_elimination(players, rng, ids);
            link_progression(&mut rounds);
            rounds
        }
        TournamentFormat::RoundRobin => build_round_robin(players, ids),
        TournamentFormat::Swiss => vec![build_swiss_first_round(players, rng, ids)],
        TournamentFormat::DoubleElimination => {
            log::warn!("Double elimination brackets are not implemented; no rounds generated");
            Vec::new()
        }
    }
}

/// Same as [`generate_rounds`] but takes the format by name, e.g. `"round_robin"`.
/// Unknown names fail with [`TournamentError::UnsupportedFormat`].
pub fn generate_bracket<R, G>(
    players: &[Player],
    format: &str,
    rng: &mut R,
    ids: &mut G,
) -> Result<Vec<Round>, TournamentError>
where
    R: Rng + ?Sized,
    G: IdGenerator,
{
    let format: TournamentFormat = format.parse()?;
    Ok(generate_rounds(players, format, rng, ids))
}
