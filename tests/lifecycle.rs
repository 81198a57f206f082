//! Integration tests for the tournament lifecycle: start, results, progression, Swiss rounds.

use bracket_engine_web::{
    advance_swiss_round, champion, record_match_result, start_tournament, swiss_round_limit,
    upcoming_matches, MatchResult, MatchStatus, Player, PlayerId, SequentialIds, Tournament,
    TournamentError, TournamentFormat, TournamentState,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn tournament_with_players(n: usize, format: TournamentFormat) -> Tournament {
    let players: Vec<Player> = (0..n).map(|i| Player::new(format!("P{i}"))).collect();
    Tournament::with_players("cup", format, players)
}

fn started(n: usize, format: TournamentFormat, ids: &mut SequentialIds) -> Tournament {
    let mut t = tournament_with_players(n, format);
    start_tournament(&mut t, &mut StdRng::seed_from_u64(n as u64), ids).unwrap();
    t
}

/// Player 1 wins every match that can be played right now.
fn play_open_matches(t: &mut Tournament) {
    let open: Vec<_> = upcoming_matches(t)
        .into_iter()
        .map(|m| (m.id, m.player1_id))
        .collect();
    for (id, winner) in open {
        record_match_result(t, id, MatchResult::new(1, 0, winner)).unwrap();
    }
}

#[test]
fn start_requires_two_players() {
    let mut t = tournament_with_players(1, TournamentFormat::SingleElimination);
    let err = start_tournament(&mut t, &mut StdRng::seed_from_u64(0), &mut SequentialIds::new());
    assert_eq!(err, Err(TournamentError::NotEnoughPlayers { required: 2 }));
    assert_eq!(t.state, TournamentState::Setup);
}

#[test]
fn start_twice_is_rejected() {
    let mut ids = SequentialIds::new();
    let mut t = started(4, TournamentFormat::RoundRobin, &mut ids);
    let err = start_tournament(&mut t, &mut StdRng::seed_from_u64(0), &mut ids);
    assert_eq!(err, Err(TournamentError::InvalidState));
}

#[test]
fn double_elimination_cannot_start() {
    let mut t = tournament_with_players(4, TournamentFormat::DoubleElimination);
    let err = start_tournament(&mut t, &mut StdRng::seed_from_u64(0), &mut SequentialIds::new());
    assert_eq!(
        err,
        Err(TournamentError::FormatNotImplemented(TournamentFormat::DoubleElimination))
    );
    assert!(t.rounds.is_empty());
    assert_eq!(t.state, TournamentState::Setup);
}

#[test]
fn bye_winners_move_into_second_round() {
    let t = started(5, TournamentFormat::SingleElimination, &mut SequentialIds::new());
    let first = &t.rounds[0];
    let second = &t.rounds[1];
    for (i, m) in first.matches.iter().enumerate().filter(|(_, m)| m.is_bye()) {
        let next = &second.matches[i / 2];
        let slot = if i % 2 == 0 { next.player1_id } else { next.player2_id };
        assert_eq!(slot, m.winner());
    }
    // 5 players: three byes and one real match; the first semi-final is ready.
    assert_eq!(first.matches.iter().filter(|m| m.is_bye()).count(), 3);
    assert!(second.matches[0].is_ready());
    assert!(!second.matches[1].is_ready());
}

#[test]
fn single_elimination_plays_through_to_a_champion() {
    let mut t = started(7, TournamentFormat::SingleElimination, &mut SequentialIds::new());
    while t.state == TournamentState::InProgress {
        play_open_matches(&mut t);
    }
    assert_eq!(t.state, TournamentState::Completed);
    let final_match = &t.rounds.last().unwrap().matches[0];
    assert_eq!(final_match.status, MatchStatus::Completed);
    assert_eq!(champion(&t), final_match.winner());
    assert!(champion(&t).is_some());
}

#[test]
fn result_validation() {
    let mut t = started(4, TournamentFormat::SingleElimination, &mut SequentialIds::new());
    let first = t.rounds[0].matches[0].clone();
    let final_id = t.rounds[1].matches[0].id;

    assert_eq!(
        record_match_result(&mut t, uuid::Uuid::nil(), MatchResult::new(1, 0, None)),
        Err(TournamentError::MatchNotFound(uuid::Uuid::nil()))
    );
    assert_eq!(
        record_match_result(&mut t, final_id, MatchResult::new(1, 0, None)),
        Err(TournamentError::MatchNotReady(final_id))
    );
    let outsider = t.rounds[0].matches[1].player1_id.unwrap();
    assert_eq!(
        record_match_result(&mut t, first.id, MatchResult::new(1, 0, Some(outsider))),
        Err(TournamentError::InvalidWinner(outsider))
    );
    assert_eq!(
        record_match_result(&mut t, first.id, MatchResult::new(1, 1, None)),
        Err(TournamentError::DrawNotAllowed)
    );
}

#[test]
fn corrected_result_replaces_advanced_winner() {
    let mut t = started(4, TournamentFormat::SingleElimination, &mut SequentialIds::new());
    let m = t.rounds[0].matches[0].clone();
    record_match_result(&mut t, m.id, MatchResult::new(2, 0, m.player1_id)).unwrap();
    assert_eq!(t.rounds[1].matches[0].player1_id, m.player1_id);
    record_match_result(&mut t, m.id, MatchResult::new(0, 2, m.player2_id)).unwrap();
    assert_eq!(t.rounds[1].matches[0].player1_id, m.player2_id);
}

#[test]
fn result_is_locked_once_next_match_is_decided() {
    let mut t = started(8, TournamentFormat::SingleElimination, &mut SequentialIds::new());
    let a = t.rounds[0].matches[0].clone();
    let b = t.rounds[0].matches[1].clone();
    record_match_result(&mut t, a.id, MatchResult::new(1, 0, a.player1_id)).unwrap();
    record_match_result(&mut t, b.id, MatchResult::new(1, 0, b.player1_id)).unwrap();
    let semi = t.rounds[1].matches[0].clone();
    record_match_result(&mut t, semi.id, MatchResult::new(1, 0, semi.player1_id)).unwrap();
    assert_eq!(
        record_match_result(&mut t, a.id, MatchResult::new(0, 1, a.player2_id)),
        Err(TournamentError::InvalidState)
    );
}

#[test]
fn completed_tournament_rejects_edits() {
    let mut t = started(4, TournamentFormat::SingleElimination, &mut SequentialIds::new());
    play_open_matches(&mut t);
    play_open_matches(&mut t);
    assert_eq!(t.state, TournamentState::Completed);
    let m = t.rounds[0].matches[0].clone();
    assert_eq!(
        record_match_result(&mut t, m.id, MatchResult::new(0, 1, m.player2_id)),
        Err(TournamentError::InvalidState)
    );
}

#[test]
fn round_robin_allows_draws_and_completes() {
    let mut t = started(4, TournamentFormat::RoundRobin, &mut SequentialIds::new());
    let ids: Vec<_> = t.rounds.iter().flat_map(|r| &r.matches).map(|m| m.id).collect();
    for id in ids {
        assert_eq!(t.state, TournamentState::InProgress);
        record_match_result(&mut t, id, MatchResult::new(1, 1, None)).unwrap();
    }
    assert_eq!(t.state, TournamentState::Completed);
    assert_eq!(champion(&t), Some(t.players[0].id));
}

#[test]
fn swiss_rounds_are_generated_on_demand() {
    let mut ids = SequentialIds::new();
    let mut t = started(4, TournamentFormat::Swiss, &mut ids);
    assert_eq!(t.swiss_rounds, None);
    assert_eq!(swiss_round_limit(&t), 2);
    assert_eq!(t.rounds.len(), 1);

    assert_eq!(
        advance_swiss_round(&mut t, &mut ids),
        Err(TournamentError::IncompleteResults)
    );
    play_open_matches(&mut t);
    advance_swiss_round(&mut t, &mut ids).unwrap();
    assert_eq!(t.rounds.len(), 2);
    assert_eq!(t.rounds[1].name, "Round 2");

    play_open_matches(&mut t);
    assert_eq!(t.state, TournamentState::Completed);
    assert_eq!(
        advance_swiss_round(&mut t, &mut ids),
        Err(TournamentError::InvalidState)
    );

    t.state = TournamentState::InProgress;
    assert_eq!(
        advance_swiss_round(&mut t, &mut ids),
        Err(TournamentError::NoRoundsRemaining)
    );
}

#[test]
fn swiss_default_follows_the_field_after_restart() {
    let mut ids = SequentialIds::new();
    let mut t = started(4, TournamentFormat::Swiss, &mut ids);
    t.restart_tournament().unwrap();
    for i in 4..16 {
        t.add_player(format!("P{i}")).unwrap();
    }
    start_tournament(&mut t, &mut StdRng::seed_from_u64(1), &mut ids).unwrap();
    assert_eq!(t.swiss_rounds, None);
    assert_eq!(swiss_round_limit(&t), 4);
}

#[test]
fn configured_swiss_rounds_survive_restart() {
    let mut ids = SequentialIds::new();
    let mut t = tournament_with_players(4, TournamentFormat::Swiss);
    t.set_swiss_rounds(3).unwrap();
    start_tournament(&mut t, &mut StdRng::seed_from_u64(0), &mut ids).unwrap();
    t.restart_tournament().unwrap();
    for i in 4..16 {
        t.add_player(format!("P{i}")).unwrap();
    }
    start_tournament(&mut t, &mut StdRng::seed_from_u64(1), &mut ids).unwrap();
    assert_eq!(swiss_round_limit(&t), 3);
}

#[test]
fn advance_swiss_round_rejects_other_formats() {
    let mut ids = SequentialIds::new();
    let mut t = started(4, TournamentFormat::RoundRobin, &mut ids);
    assert_eq!(
        advance_swiss_round(&mut t, &mut ids),
        Err(TournamentError::InvalidState)
    );
}

#[test]
fn swiss_resumes_after_serialization() {
    let mut ids = SequentialIds::new();
    let mut t = started(6, TournamentFormat::Swiss, &mut ids);
    play_open_matches(&mut t);

    let json = serde_json::to_string(&t).unwrap();
    let mut restored: Tournament = serde_json::from_str(&json).unwrap();
    advance_swiss_round(&mut restored, &mut ids).unwrap();

    let key = |a: PlayerId, b: PlayerId| if a < b { (a, b) } else { (b, a) };
    let first: HashSet<_> = restored.rounds[0]
        .matches
        .iter()
        .filter_map(|m| Some(key(m.player1_id?, m.player2_id?)))
        .collect();
    for m in &restored.rounds[1].matches {
        assert!(!first.contains(&key(m.player1_id.unwrap(), m.player2_id.unwrap())));
    }
}

#[test]
fn restart_returns_to_setup_with_same_players() {
    let mut t = started(4, TournamentFormat::RoundRobin, &mut SequentialIds::new());
    let players = t.players.clone();
    t.restart_tournament().unwrap();
    assert_eq!(t.state, TournamentState::Setup);
    assert!(t.rounds.is_empty());
    assert_eq!(t.players, players);
    assert_eq!(t.restart_tournament(), Err(TournamentError::InvalidState));
}

#[test]
fn setup_only_player_changes() {
    let mut t = Tournament::new("cup", TournamentFormat::Swiss);
    let id = t.add_player("  Ada ").unwrap();
    assert_eq!(t.get_player(id).unwrap().name, "Ada");
    assert_eq!(t.add_player("ada"), Err(TournamentError::DuplicatePlayerName));
    assert_eq!(t.add_player("   "), Err(TournamentError::EmptyPlayerName));
    t.add_player("Grace").unwrap();
    t.set_format(TournamentFormat::RoundRobin).unwrap();
    t.set_swiss_rounds(0).unwrap();
    assert_eq!(t.swiss_rounds, Some(1));
    start_tournament(&mut t, &mut StdRng::seed_from_u64(0), &mut SequentialIds::new()).unwrap();
    assert_eq!(t.add_player("Linus"), Err(TournamentError::InvalidState));
    assert_eq!(t.remove_player(id), Err(TournamentError::InvalidState));
    assert_eq!(t.set_format(TournamentFormat::Swiss), Err(TournamentError::InvalidState));
    assert_eq!(t.rounds.len(), 1);
}

#[test]
fn batch_add_is_all_or_nothing() {
    let mut t = Tournament::new("cup", TournamentFormat::RoundRobin);
    t.add_player("Ada").unwrap();
    assert_eq!(
        t.add_players(["Grace", "Linus", "ada"]),
        Err(TournamentError::DuplicatePlayerName)
    );
    assert_eq!(t.players.len(), 1);
    assert_eq!(
        t.add_players(["Grace", "Linus", "grace"]),
        Err(TournamentError::DuplicatePlayerName)
    );
    assert_eq!(t.players.len(), 1);

    let added = t.add_players(["Grace", "Linus"]).unwrap();
    assert_eq!(added.len(), 2);
    let names: Vec<_> = t.players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Ada", "Grace", "Linus"]);
}

#[test]
fn format_names_parse() {
    assert_eq!("swiss".parse::<TournamentFormat>(), Ok(TournamentFormat::Swiss));
    assert_eq!("round_robin".parse::<TournamentFormat>(), Ok(TournamentFormat::RoundRobin));
    assert_eq!(
        "unknown_format".parse::<TournamentFormat>(),
        Err(TournamentError::UnsupportedFormat("unknown_format".to_string()))
    );
}
