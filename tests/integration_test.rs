use nuchos_enigma::config::RoomConfig;
use nuchos_enigma::protocol::{ClientMessage, ServerMessage};
use nuchos_enigma::state::{Effect, Room, TimerKind};
use nuchos_enigma::types::{GamePhase, PlayerId, Winner};
use nuchos_enigma::ws::handlers::handle_message;

fn new_room(players: usize) -> Room {
    let mut room = Room::new(RoomConfig {
        seed: Some(2024),
        ..RoomConfig::default()
    });
    for i in 1..=players {
        room.join(format!("p{}", i), format!("Player {}", i))
            .expect("join should succeed");
    }
    room
}

fn send(room: &mut Room, player_id: &str, msg: ClientMessage) -> Option<ServerMessage> {
    handle_message(msg, player_id, room)
}

fn impostor(room: &Room) -> PlayerId {
    room.impostor().expect("impostor assigned").id.clone()
}

fn team(room: &Room) -> Vec<PlayerId> {
    room.live_players()
        .filter(|p| !p.is_impostor)
        .map(|p| p.id.clone())
        .collect()
}

fn live(room: &Room) -> Vec<PlayerId> {
    room.live_players().map(|p| p.id.clone()).collect()
}

/// Everyone answers the questionnaire, then the settle timer fires
fn play_questionnaire(room: &mut Room) {
    let ids: Vec<_> = room
        .round()
        .questionnaire
        .iter()
        .map(|q| q.id.clone())
        .collect();
    let imp = impostor(room);
    send(
        room,
        &imp,
        ClientMessage::SubmitImpostorAnswers {
            question_ids: ids.clone(),
            answers: vec!["Blue".into(), "Tacos".into(), "Paris".into()],
        },
    );
    for id in team(room) {
        send(
            room,
            &id,
            ClientMessage::AnswerQuestionnaire {
                question_id: ids[0].clone(),
                answer: "Green".into(),
            },
        );
    }
    assert!(room.is_timer_pending(TimerKind::QuestionnaireSettle));
    room.fire_timer(TimerKind::QuestionnaireSettle);
    assert_eq!(room.phase(), GamePhase::Trivia);
}

/// `answerers` answer every trivia question correctly; questions then time
/// out until trivia closes
fn play_trivia(room: &mut Room, answerers: &[PlayerId]) {
    let answers: Vec<_> = room
        .round()
        .trivia
        .iter()
        .map(|q| q.correct_answer.clone())
        .collect();
    for id in answerers {
        for (index, answer) in answers.iter().enumerate() {
            send(
                room,
                id,
                ClientMessage::AnswerTrivia {
                    question_index: index,
                    answer: answer.clone(),
                },
            );
        }
    }
    while room.is_timer_pending(TimerKind::TriviaAdvance) {
        room.fire_timer(TimerKind::TriviaAdvance);
    }
    room.fire_timer(TimerKind::TriviaSettle);
    assert_eq!(room.phase(), GamePhase::Discussion);
    room.fire_timer(TimerKind::DiscussionEnd);
    assert_eq!(room.phase(), GamePhase::Voting);
}

/// Every live player votes for `target` (the target votes for someone else)
fn vote_out(room: &mut Room, target: &str) {
    let voters = live(room);
    let fallback = voters
        .iter()
        .find(|id| id.as_str() != target)
        .cloned()
        .expect("another live player");
    for voter in voters {
        let choice = if voter == target { fallback.as_str() } else { target };
        send(
            room,
            &voter,
            ClientMessage::Vote {
                target_id: choice.to_string(),
            },
        );
    }
}

/// Two rounds that each eliminate a non-impostor, leaving three players. In
/// the second round only the two future finalists score in trivia.
fn reach_final_round(room: &mut Room) {
    send(room, "p1", ClientMessage::StartGame);

    play_questionnaire(room);
    play_trivia(room, &[]);
    let out = team(room)[0].clone();
    vote_out(room, &out);
    room.fire_timer(TimerKind::EliminationSettle);
    assert_eq!(room.phase(), GamePhase::Questionnaire);
    assert_eq!(room.round().number, 2);

    play_questionnaire(room);
    let round_team = team(room);
    play_trivia(room, &round_team[1..]);
    vote_out(room, &round_team[0]);
    room.fire_timer(TimerKind::EliminationSettle);
    assert_eq!(room.phase(), GamePhase::FinalRound);
    assert_eq!(room.live_count(), 3);
}

fn game_over_broadcast(effects: &[Effect]) -> Option<&ServerMessage> {
    effects.iter().find_map(|e| match e {
        Effect::Broadcast(msg @ ServerMessage::GameOver { .. }) => Some(msg),
        _ => None,
    })
}

#[test]
fn test_scenario_a_start_assigns_roles_and_questions() {
    let mut room = new_room(5);
    assert!(send(&mut room, "p1", ClientMessage::StartGame).is_none());

    assert_eq!(room.phase(), GamePhase::Questionnaire);
    assert_eq!(room.round().number, 1);
    assert_eq!(room.round().questionnaire.len(), 3);
    assert_eq!(room.players().iter().filter(|p| p.is_impostor).count(), 1);
    assert_eq!(room.round().impostor_id, Some(impostor(&room)));
}

#[test]
fn test_start_rejected_outside_player_bounds() {
    let mut room = new_room(4);
    let reply = send(&mut room, "p2", ClientMessage::StartGame);
    assert!(matches!(
        reply,
        Some(ServerMessage::Error { code, .. }) if code == "INVALID_PLAYER_COUNT"
    ));
    assert_eq!(room.phase(), GamePhase::Lobby);
}

#[test]
fn test_scenario_b_trivia_scores_exclude_impostor() {
    let mut room = new_room(5);
    send(&mut room, "p1", ClientMessage::StartGame);
    play_questionnaire(&mut room);

    let answers: Vec<_> = room
        .round()
        .trivia
        .iter()
        .map(|q| q.correct_answer.clone())
        .collect();
    for id in live(&room) {
        for (index, answer) in answers.iter().enumerate() {
            send(
                &mut room,
                &id,
                ClientMessage::AnswerTrivia {
                    question_index: index,
                    answer: answer.clone(),
                },
            );
        }
    }

    // Everyone finished early: no more question timers, only the settle
    assert!(!room.is_timer_pending(TimerKind::TriviaAdvance));
    assert!(room.is_timer_pending(TimerKind::TriviaSettle));

    let imp = impostor(&room);
    for player in room.players() {
        assert_eq!(player.correct_trivia_count, 5);
        let expected = if player.id == imp { 0 } else { 50 };
        assert_eq!(player.score, expected, "score of {}", player.id);
    }
}

#[test]
fn test_scenario_c_catching_impostor_ends_game() {
    let mut room = new_room(5);
    send(&mut room, "p1", ClientMessage::StartGame);
    play_questionnaire(&mut room);
    play_trivia(&mut room, &[]);

    let imp = impostor(&room);
    let others = team(&room);
    for voter in &others[..3] {
        send(
            &mut room,
            voter,
            ClientMessage::Vote {
                target_id: imp.clone(),
            },
        );
    }
    send(
        &mut room,
        &imp,
        ClientMessage::Vote {
            target_id: others[0].clone(),
        },
    );
    // others[3] abstains; the voting countdown closes the tally
    assert_eq!(room.phase(), GamePhase::Voting);
    room.fire_timer(TimerKind::VotingEnd);

    assert_eq!(room.phase(), GamePhase::GameOver);
    assert_eq!(room.winner(), Some(Winner::Team));
    assert!(room.players().iter().any(|p| p.id == imp && p.is_eliminated));

    let effects = room.take_effects();
    match game_over_broadcast(&effects) {
        Some(ServerMessage::GameOver { winner, scores }) => {
            assert_eq!(*winner, Winner::Team);
            assert_eq!(scores.len(), 5);
        }
        other => panic!("Expected GameOver, got {:?}", other),
    }

    // Terminal: a lingering timer changes nothing
    room.fire_timer(TimerKind::EliminationSettle);
    assert_eq!(room.phase(), GamePhase::GameOver);
}

#[test]
fn test_scenario_c_innocent_elimination_continues() {
    let mut room = new_room(5);
    send(&mut room, "p1", ClientMessage::StartGame);
    play_questionnaire(&mut room);
    play_trivia(&mut room, &[]);

    let target = team(&room)[2].clone();
    vote_out(&mut room, &target);

    assert_eq!(room.phase(), GamePhase::Elimination);
    assert_eq!(room.round().eliminated_player_id.as_ref(), Some(&target));
    room.fire_timer(TimerKind::EliminationSettle);
    assert_eq!(room.phase(), GamePhase::Questionnaire);
    assert!(room
        .players()
        .iter()
        .all(|p| p.id != target || (p.is_eliminated && !p.is_impostor)));
}

#[test]
fn test_scenario_d_impostor_handshake_takes_pool() {
    let mut room = new_room(5);
    reach_final_round(&mut room);

    let imp = impostor(&room);
    let finalists = team(&room);
    let pool: u32 = room
        .live_players()
        .filter(|p| !p.is_impostor)
        .map(|p| p.score)
        .sum();
    assert_eq!(pool, 100);

    room.take_effects();
    send(
        &mut room,
        &imp,
        ClientMessage::OfferHandshake {
            target_id: finalists[0].clone(),
        },
    );

    assert_eq!(room.phase(), GamePhase::GameOver);
    assert_eq!(room.winner(), Some(Winner::Impostor));
    let score = room.player(&imp).map(|p| p.score);
    assert_eq!(score, Some(pool));

    let effects = room.take_effects();
    match game_over_broadcast(&effects) {
        Some(ServerMessage::GameOver { winner, scores }) => {
            assert_eq!(*winner, Winner::Impostor);
            let entry = scores.iter().find(|s| s.id == imp).unwrap();
            assert!(entry.is_impostor);
            assert_eq!(entry.score, 100);
        }
        other => panic!("Expected GameOver, got {:?}", other),
    }
}

#[test]
fn test_scenario_e_mutual_team_handshake() {
    let mut room = new_room(5);
    reach_final_round(&mut room);

    let imp = impostor(&room);
    let finalists = team(&room);
    send(
        &mut room,
        &finalists[0],
        ClientMessage::OfferHandshake {
            target_id: finalists[1].clone(),
        },
    );
    assert_eq!(room.phase(), GamePhase::FinalRound);
    send(
        &mut room,
        &finalists[1],
        ClientMessage::OfferHandshake {
            target_id: finalists[0].clone(),
        },
    );

    assert_eq!(room.phase(), GamePhase::GameOver);
    assert_eq!(room.winner(), Some(Winner::Team));
    for id in &finalists {
        assert_eq!(room.player(id).map(|p| p.score), Some(50));
    }
    assert_eq!(room.player(&imp).map(|p| p.score), Some(0));
    // Late offers are ignored
    send(
        &mut room,
        &imp,
        ClientMessage::OfferHandshake {
            target_id: finalists[0].clone(),
        },
    );
    assert_eq!(room.winner(), Some(Winner::Team));
}

#[test]
fn test_exactly_one_live_impostor_every_round() {
    let mut room = new_room(7);
    send(&mut room, "p1", ClientMessage::StartGame);
    for round in 1..=3 {
        assert_eq!(room.round().number, round);
        let impostors = room.live_players().filter(|p| p.is_impostor).count();
        assert_eq!(impostors, 1);
        assert_eq!(room.players().iter().filter(|p| p.is_impostor).count(), 1);

        play_questionnaire(&mut room);
        play_trivia(&mut room, &[]);
        let out = team(&room)[0].clone();
        vote_out(&mut room, &out);
        room.fire_timer(TimerKind::EliminationSettle);
    }
}

#[test]
fn test_double_vote_counts_once() {
    let mut room = new_room(5);
    send(&mut room, "p1", ClientMessage::StartGame);
    play_questionnaire(&mut room);
    play_trivia(&mut room, &[]);

    let others = team(&room);
    for _ in 0..2 {
        send(
            &mut room,
            &others[0],
            ClientMessage::Vote {
                target_id: others[1].clone(),
            },
        );
    }
    assert_eq!(room.round().vote_tally.get(&others[1]), Some(&1));
}

#[test]
fn test_idle_player_stays_in_every_phase() {
    let mut room = new_room(6);
    send(&mut room, "p1", ClientMessage::StartGame);

    let idle = team(&room)[4].clone();
    let mut seen = 0;
    let mut check = |room: &Room| {
        assert_eq!(room.players().iter().filter(|p| p.id == idle).count(), 1);
        seen += 1;
    };

    check(&room);
    play_questionnaire(&mut room);
    check(&room);
    play_trivia(&mut room, &[]);
    check(&room);
    let out = team(&room)[0].clone();
    vote_out(&mut room, &out);
    check(&room);
    room.fire_timer(TimerKind::EliminationSettle);
    check(&room);
    assert_eq!(seen, 5);
}

#[test]
fn test_disconnects_force_team_win() {
    let mut room = new_room(5);
    send(&mut room, "p1", ClientMessage::StartGame);
    play_questionnaire(&mut room);

    let others = team(&room);
    room.leave(&others[0]);
    room.leave(&others[1]);
    assert_eq!(room.phase(), GamePhase::Trivia);
    room.leave(&others[2]);

    assert_eq!(room.phase(), GamePhase::GameOver);
    assert_eq!(room.winner(), Some(Winner::Team));
    assert_eq!(room.scoreboard().len(), 5);
    assert!(!room.is_timer_pending(TimerKind::TriviaAdvance));
}

#[test]
fn test_views_replicate_without_spoilers() {
    let mut room = new_room(5);
    send(&mut room, "p1", ClientMessage::StartGame);
    play_questionnaire(&mut room);

    let viewer = team(&room)[0].clone();
    let view = room.view(&viewer);
    assert_eq!(view.phase, GamePhase::Trivia);
    assert!(view.deadline.is_some());
    assert!(view
        .questionnaire
        .iter()
        .all(|q| q.impostor_answer.is_some()));

    let json = serde_json::to_value(ServerMessage::State { view }).unwrap();
    assert_eq!(json["t"], "state");
    let text = json.to_string();
    assert!(!text.contains("correct_answer"));
}
