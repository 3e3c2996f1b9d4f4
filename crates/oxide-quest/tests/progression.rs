//! Session state machine: pending points, advancing, completion and reset.

mod common;
use common::*;

use oxide_quest::{AnswerTableResolver, GameError, GameSession, LevelId, Phase};

fn pass_current(session: &mut GameSession<'_>) -> u32 {
    let query = session.task().expect("no current task").expected_query.clone();
    let attempt = session
        .submit(&AnswerTableResolver::bundled(), &query)
        .expect("submit rejected");
    assert!(attempt.verdict.is_correct);
    attempt.points.expect("no points for a correct answer")
}

#[test]
fn new_session_starts_at_first_task() {
    let session = GameSession::new(level(LevelId::Beginner));
    assert_eq!(session.phase(), Phase::InTask);
    assert_eq!(session.task_index(), 0);
    assert_eq!(session.score(), 0);
    assert_eq!(session.pending(), 0);
    assert!(!session.is_completed());
    assert_eq!(session.final_score(), None);
}

#[test]
fn correct_answer_parks_points_until_advance() {
    let mut session = GameSession::new(level(LevelId::Intermediate));
    let first = task(LevelId::Intermediate, 1);

    let points = pass_current(&mut session);
    assert_eq!(points, first.difficulty * 10);
    assert_eq!(session.phase(), Phase::TaskPassed);
    assert_eq!(session.pending(), points);
    assert_eq!(session.score(), 0);

    assert_eq!(session.advance(), Ok(Phase::InTask));
    assert_eq!(session.score(), points);
    assert_eq!(session.pending(), 0);
    assert_eq!(session.task_index(), 1);
}

#[test]
fn incorrect_answer_changes_nothing() {
    let mut session = GameSession::new(level(LevelId::Beginner));
    let before = session.clone();
    let attempt = session
        .submit(&AnswerTableResolver::bundled(), "select * from pirates")
        .unwrap();
    assert!(!attempt.verdict.is_correct);
    assert_eq!(attempt.points, None);
    assert_eq!(session, before);
}

#[test]
fn completing_a_level_banks_every_task() {
    for id in LevelId::ALL {
        let level = level(id);
        let mut session = GameSession::new(level);
        let mut last_score = 0;

        for i in 0..level.tasks.len() {
            assert_eq!(session.task_index(), i);
            pass_current(&mut session);
            let phase = session.advance().unwrap();
            assert!(session.score() >= last_score);
            last_score = session.score();
            if i + 1 < level.tasks.len() {
                assert_eq!(phase, Phase::InTask);
            } else {
                assert_eq!(phase, Phase::LevelComplete);
            }
        }

        let expected: u32 = level.tasks.iter().map(|t| t.difficulty * 10).sum();
        assert!(session.is_completed());
        assert_eq!(session.score(), expected);
        assert_eq!(session.final_score(), Some(expected));
        assert_eq!(session.pending(), 0);
        assert!(session.task().is_none());
    }
}

#[test]
fn advance_without_a_pass_is_rejected() {
    let mut session = GameSession::new(level(LevelId::Beginner));
    let before = session.clone();
    assert_eq!(session.advance(), Err(GameError::NothingToAdvance));
    assert_eq!(session, before);
}

#[test]
fn submit_after_a_pass_is_rejected() {
    let mut session = GameSession::new(level(LevelId::Beginner));
    pass_current(&mut session);
    let before = session.clone();
    let result = session.submit(&AnswerTableResolver::bundled(), "select * from ships");
    assert_eq!(result, Err(GameError::AwaitingAdvance));
    assert_eq!(session, before);
}

#[test]
fn actions_after_completion_are_rejected() {
    let mut session = GameSession::new(level(LevelId::Beginner));
    while !session.is_completed() {
        pass_current(&mut session);
        session.advance().unwrap();
    }
    let score = session.score();
    assert_eq!(session.advance(), Err(GameError::LevelComplete));
    assert_eq!(
        session.submit(&AnswerTableResolver::bundled(), "select * from pirates"),
        Err(GameError::LevelComplete)
    );
    assert_eq!(session.score(), score);
}

#[test]
fn reset_from_every_phase() {
    let level = level(LevelId::Expert);

    let mut in_task = GameSession::new(level);
    pass_current(&mut in_task);
    in_task.advance().unwrap();
    assert_eq!(in_task.phase(), Phase::InTask);

    let mut passed = GameSession::new(level);
    pass_current(&mut passed);
    assert_eq!(passed.phase(), Phase::TaskPassed);

    let mut complete = GameSession::new(level);
    while !complete.is_completed() {
        pass_current(&mut complete);
        complete.advance().unwrap();
    }

    for mut session in [in_task, passed, complete] {
        session.reset();
        assert_eq!(session.phase(), Phase::InTask);
        assert_eq!(session.task_index(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.pending(), 0);
        assert_eq!(session.level_id(), LevelId::Expert);
    }
}

#[test]
fn hints_are_revealed_one_at_a_time() {
    let mut session = GameSession::new(level(LevelId::Expert));
    let hints = &task(LevelId::Expert, 1).hints;

    assert!(session.revealed_hints().is_empty());
    for hint in hints {
        assert_eq!(session.reveal_hint(), Some(hint.as_str()));
    }
    assert_eq!(session.reveal_hint(), None);
    assert_eq!(session.revealed_hints(), hints.as_slice());

    pass_current(&mut session);
    session.advance().unwrap();
    assert!(session.revealed_hints().is_empty());
    assert_eq!(
        session.reveal_hint(),
        Some("Use WHERE year < 0")
    );
}

#[test]
fn session_serializes_level_by_id() {
    let session = GameSession::new(level(LevelId::Beginner));
    let json = serde_json::to_value(&session).unwrap();
    assert_eq!(json["level"], "beginner");
    assert_eq!(json["phase"], "in_task");
    assert_eq!(json["score"], 0);
}
