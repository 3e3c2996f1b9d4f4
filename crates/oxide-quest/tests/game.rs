//! The shell-facing facade.

use oxide_quest::{
    row, Catalog, Dataset, ExecutionResult, Game, GameError, LevelId, Phase, QueryExecutor, Rule,
};

#[test]
fn lists_levels_in_order() {
    let game = Game::bundled();
    let levels = game.list_levels();
    let ids: Vec<_> = levels.iter().map(|l| l.id).collect();
    assert_eq!(ids, LevelId::ALL);
    assert!(levels[0].description.contains("pirate-themed"));
}

#[test]
fn actions_need_a_level() {
    let mut game = Game::bundled();
    assert_eq!(game.phase(), None);
    assert!(matches!(
        game.submit_query("select * from pirates"),
        Err(GameError::NoLevelSelected)
    ));
    assert!(matches!(game.advance(), Err(GameError::NoLevelSelected)));
    assert!(matches!(game.reset(), Err(GameError::NoLevelSelected)));
    assert!(matches!(game.reveal_hint(), Err(GameError::NoLevelSelected)));
}

#[test]
fn full_round_through_the_facade() {
    let mut game = Game::bundled();
    game.select_level(LevelId::Beginner).unwrap();
    assert_eq!(game.phase(), Some(Phase::InTask));

    let attempt = game.submit_query("select * from pirates").unwrap();
    assert_eq!(attempt.verdict.rule, Rule::MissingWhere);
    assert_eq!(attempt.result.map(|rows| rows.len()), Ok(4));

    let attempt = game
        .submit_query("SELECT * FROM pirates WHERE gold > 100")
        .unwrap();
    assert_eq!(attempt.points, Some(10));
    assert_eq!(game.phase(), Some(Phase::TaskPassed));

    let session = game.advance().unwrap();
    assert_eq!(session.score(), 10);
    assert_eq!(session.task_index(), 1);

    let session = game.reset().unwrap();
    assert_eq!(session.score(), 0);
    assert_eq!(session.task_index(), 0);
    assert_eq!(session.level_id(), LevelId::Beginner);
}

#[test]
fn change_level_returns_to_selection() {
    let mut game = Game::bundled();
    game.select_level(LevelId::Expert).unwrap();
    game.submit_query("select * from artifacts where value > 2500000")
        .unwrap();
    game.change_level();
    assert_eq!(game.phase(), None);
    assert!(game.session().is_none());

    game.change_level();
    assert_eq!(game.phase(), None);

    let session = game.select_level(LevelId::Intermediate).unwrap();
    assert_eq!(session.score(), 0);
    assert_eq!(session.pending(), 0);
}

#[test]
fn mistyped_level_keeps_progress() {
    let mut game = Game::bundled();
    game.select_level(LevelId::Beginner).unwrap();
    game.submit_query("select * from pirates where gold > 100")
        .unwrap();
    game.advance().unwrap();

    assert!(matches!(
        game.switch_level("expret"),
        Err(GameError::UnknownLevel(name)) if name == "expret"
    ));
    let session = game.session().unwrap();
    assert_eq!(session.level_id(), LevelId::Beginner);
    assert_eq!(session.score(), 10);
    assert_eq!(session.task_index(), 1);

    let session = game.switch_level("Expert").unwrap();
    assert_eq!(session.level_id(), LevelId::Expert);
    assert_eq!(session.score(), 0);
}

#[test]
fn selecting_again_starts_over() {
    let mut game = Game::bundled();
    game.select_level(LevelId::Beginner).unwrap();
    game.submit_query("select * from pirates where gold > 100")
        .unwrap();
    let session = game.select_level(LevelId::Beginner).unwrap();
    assert_eq!(session.phase(), Phase::InTask);
    assert_eq!(session.pending(), 0);
}

/// Answers every query with the rows of the beginner's first task.
struct Oracle;

impl QueryExecutor for Oracle {
    fn execute(&self, _query: &str, _dataset: &Dataset) -> ExecutionResult {
        Ok(vec![
            row! { "id" => 1, "name" => "Jack Sparrow", "gold" => 200, "ship" => "Black Pearl", "rank" => "Captain", "age" => 35 },
            row! { "id" => 3, "name" => "Elizabeth Swann", "gold" => 300, "ship" => "Black Pearl", "rank" => "Captain", "age" => 24 },
            row! { "id" => 4, "name" => "Hector Barbossa", "gold" => 150, "ship" => "Black Pearl", "rank" => "First Mate", "age" => 45 },
        ])
    }
}

#[test]
fn executor_can_be_replaced() {
    let mut game = Game::new(Catalog::bundled(), Oracle);
    game.select_level(LevelId::Beginner).unwrap();
    let attempt = game.submit_query("select whatever from anywhere").unwrap();
    assert!(attempt.verdict.is_correct);
    assert_eq!(attempt.verdict.rule, Rule::ResultMatch);
}
