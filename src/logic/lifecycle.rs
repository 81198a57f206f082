//! Tournament lifecycle: start, record results, advance winners, next Swiss round, completion.

use crate::logic::bracket::generate_rounds;
use crate::logic::standings::compute_standings;
use crate::logic::swiss::generate_next_round;
use crate::models::{
    IdGenerator, MatchId, MatchResult, MatchStatus, PlayerId, Tournament, TournamentError,
    TournamentFormat, TournamentState,
};
use rand::Rng;

/// Minimum field for any format.
pub const MIN_PLAYERS: usize = 2;

/// Start the tournament: generate the rounds for its format and move to InProgress.
///
/// In single elimination, bye winners are moved into their next match right away.
pub fn start_tournament<R, G>(tournament: &mut Tournament, rng: &mut R, ids: &mut G) -> Result<(), TournamentError>
where
    R: Rng + ?Sized,
    G: IdGenerator,
{
    if tournament.state != TournamentState::Setup {
        return Err(TournamentError::InvalidState);
    }
    if tournament.players.len() < MIN_PLAYERS {
        return Err(TournamentError::NotEnoughPlayers { required: MIN_PLAYERS });
    }

    let rounds = generate_rounds(&tournament.players, tournament.format, rng, ids);
    if rounds.is_empty() {
        return Err(TournamentError::FormatNotImplemented(tournament.format));
    }
    tournament.rounds = rounds;

    if tournament.format == TournamentFormat::SingleElimination {
        advance_byes(tournament);
    }

    tournament.state = TournamentState::InProgress;
    log::info!(
        "Tournament {} started: {} with {} players, {} round(s)",
        tournament.id,
        tournament.format,
        tournament.players.len(),
        tournament.rounds.len()
    );
    Ok(())
}

/// Enough rounds to separate a single winner: `ceil(log2(n))`, at least 1.
pub fn default_swiss_rounds(players: usize) -> u32 {
    players.max(2).next_power_of_two().trailing_zeros()
}

/// Swiss rounds to play: the configured count, else the default for the current field.
pub fn swiss_round_limit(tournament: &Tournament) -> u32 {
    tournament
        .swiss_rounds
        .unwrap_or_else(|| default_swiss_rounds(tournament.players.len()))
}

fn advance_byes(tournament: &mut Tournament) {
    let Some(first) = tournament.rounds.first() else {
        return;
    };
    let byes: Vec<(MatchId, PlayerId)> = first
        .matches
        .iter()
        .filter(|m| m.is_bye())
        .filter_map(|m| m.winner().map(|w| (m.id, w)))
        .collect();
    for (match_id, winner) in byes {
        advance_winner(tournament, match_id, Some(winner));
    }
}

/// Write `winner` into the slot of the next match fed by `match_id`:
/// even positions fill player 1, odd positions player 2.
fn advance_winner(tournament: &mut Tournament, match_id: MatchId, winner: Option<PlayerId>) {
    let Some((r, i)) = tournament.match_position(match_id) else {
        return;
    };
    let Some(next_id) = tournament.rounds[r].matches[i].next_match_id else {
        return;
    };
    if let Some(next) = tournament.find_match_mut(next_id) {
        if i % 2 == 0 {
            next.player1_id = winner;
        } else {
            next.player2_id = winner;
        }
    }
}

/// Record the result of a match.
///
/// The winner must be one of the two players, or None for a draw (not allowed in
/// single elimination). In single elimination the winner moves into the next match;
/// a result cannot be changed once that next match has its own result.
pub fn record_match_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    result: MatchResult,
) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::InProgress {
        return Err(TournamentError::InvalidState);
    }
    let format = tournament.format;
    let m = tournament
        .find_match(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if !m.is_ready() {
        return Err(TournamentError::MatchNotReady(match_id));
    }
    if let Some(winner) = result.winner_id {
        if !m.involves(winner) {
            return Err(TournamentError::InvalidWinner(winner));
        }
    } else if format == TournamentFormat::SingleElimination {
        return Err(TournamentError::DrawNotAllowed);
    }
    if let Some(next_id) = m.next_match_id {
        let next_decided = tournament
            .find_match(next_id)
            .is_some_and(|next| next.result.is_some());
        if next_decided {
            return Err(TournamentError::InvalidState);
        }
    }

    let winner = result.winner_id;
    if let Some(m) = tournament.find_match_mut(match_id) {
        m.result = Some(result);
        m.status = MatchStatus::Completed;
    }
    if format == TournamentFormat::SingleElimination {
        advance_winner(tournament, match_id, winner);
    }

    if is_finished(tournament) {
        tournament.state = TournamentState::Completed;
        log::info!("Tournament {} completed", tournament.id);
    }
    Ok(())
}

/// Generate and append the next Swiss round. Every existing match must be completed.
pub fn advance_swiss_round<G: IdGenerator>(tournament: &mut Tournament, ids: &mut G) -> Result<(), TournamentError> {
    if tournament.format != TournamentFormat::Swiss || tournament.state != TournamentState::InProgress {
        return Err(TournamentError::InvalidState);
    }
    if !tournament.rounds.iter().all(|r| r.is_completed()) {
        return Err(TournamentError::IncompleteResults);
    }
    let played = tournament.rounds.len() as u32;
    if played >= swiss_round_limit(tournament) {
        return Err(TournamentError::NoRoundsRemaining);
    }

    let round = generate_next_round(tournament, played + 1, ids);
    log::info!(
        "Tournament {}: generated {} with {} matches",
        tournament.id,
        round.name,
        round.matches.len()
    );
    tournament.rounds.push(round);
    // A round made only of a bye is already finished.
    if is_finished(tournament) {
        tournament.state = TournamentState::Completed;
    }
    Ok(())
}

/// Whether the tournament has nothing left to play.
pub fn is_finished(tournament: &Tournament) -> bool {
    if tournament.rounds.is_empty() {
        return false;
    }
    match tournament.format {
        TournamentFormat::SingleElimination => tournament
            .rounds
            .last()
            .and_then(|r| r.matches.last())
            .is_some_and(|m| m.result.is_some()),
        TournamentFormat::RoundRobin => tournament.rounds.iter().all(|r| r.is_completed()),
        TournamentFormat::Swiss => {
            let all_rounds = tournament.rounds.len() as u32 >= swiss_round_limit(tournament);
            all_rounds && tournament.rounds.iter().all(|r| r.is_completed())
        }
        TournamentFormat::DoubleElimination => false,
    }
}

/// The winner once the tournament is completed: the final's winner in single
/// elimination, otherwise the top of the standings.
pub fn champion(tournament: &Tournament) -> Option<PlayerId> {
    if tournament.state != TournamentState::Completed {
        return None;
    }
    match tournament.format {
        TournamentFormat::SingleElimination => tournament
            .rounds
            .last()
            .and_then(|r| r.matches.last())
            .and_then(|m| m.winner()),
        _ => compute_standings(tournament).first().map(|s| s.player_id),
    }
}
