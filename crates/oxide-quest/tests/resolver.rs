//! Query resolution: answer-table hits, the fallback scan, and errors.

mod common;
use common::*;

use oxide_quest::answers::AnswerTable;
use oxide_quest::{
    resolve, row, AnswerTableResolver, Dataset, ExecutionError, LevelId, QueryExecutor, Table,
};

#[test]
fn gold_over_100_returns_three_pirates_in_order() {
    let dataset = &level(LevelId::Beginner).dataset;
    let rows = resolve("select * from pirates where gold > 100", dataset).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(ints(&rows, "gold"), vec![200, 300, 150]);
    assert_eq!(
        texts(&rows, "name"),
        vec!["Jack Sparrow", "Elizabeth Swann", "Hector Barbossa"]
    );
}

#[test]
fn case_whitespace_and_terminator_are_ignored() {
    let dataset = &level(LevelId::Beginner).dataset;
    let a = resolve("SELECT * FROM pirates", dataset).unwrap();
    let b = resolve("select   *   from pirates", dataset).unwrap();
    let c = resolve("select * from pirates;", dataset).unwrap();
    let d = resolve("\n  Select *\tFrom Pirates ; ", dataset).unwrap();
    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_eq!(c, d);
    assert_eq!(a.len(), 4);
}

#[test]
fn unknown_table_is_named() {
    for id in LevelId::ALL {
        let result = resolve("select * from nonexistent_table", &level(id).dataset);
        assert_eq!(
            result,
            Err(ExecutionError::UnknownTable("nonexistent_table".into()))
        );
    }
}

#[test]
fn missing_from_clause() {
    let dataset = &level(LevelId::Beginner).dataset;
    assert_eq!(
        resolve("select name, gold", dataset),
        Err(ExecutionError::MissingFromClause)
    );
    assert_eq!(
        resolve("select * from", dataset),
        Err(ExecutionError::MissingFromClause)
    );
    assert_eq!(resolve("", dataset), Err(ExecutionError::MissingFromClause));
}

#[test]
fn fallback_returns_whole_table_unfiltered() {
    let dataset = &level(LevelId::Beginner).dataset;
    let rows = resolve("select name from ships where capacity > 35", dataset).unwrap();
    assert_eq!(
        texts(&rows, "name"),
        vec!["Black Pearl", "Interceptor", "Flying Dutchman"]
    );
    assert_eq!(rows[0].columns().count(), 4);
}

#[test]
fn fallback_tolerates_unscannable_tails() {
    let dataset = &level(LevelId::Beginner).dataset;
    for query in [
        "select * from pirates where name = 'jack",
        "select * from pirates where name = \u{2018}Jack Sparrow\u{2019}",
        "select * from pirates where id in [1, 2]",
        "select * from pirates where gold > 100 & age < 40",
    ] {
        let rows = resolve(query, dataset).unwrap();
        assert_eq!(ints(&rows, "id"), vec![1, 2, 3, 4], "{query}");
    }
}

#[test]
fn unscannable_query_without_from_is_an_execution_failure() {
    let dataset = &level(LevelId::Beginner).dataset;
    assert_eq!(
        resolve("select # , name", dataset).unwrap_err().to_string(),
        "Error executing query: unexpected character: #"
    );
    // The open quote swallows the rest, so no FROM is ever scanned.
    assert_eq!(
        resolve("select 'jack from pirates", dataset),
        Err(ExecutionError::ExecutionFailure(
            "unterminated string literal".into()
        ))
    );
    // FROM was seen but no table name follows it.
    assert_eq!(
        resolve("select * from [pirates]", dataset),
        Err(ExecutionError::MissingFromClause)
    );
}

#[test]
fn answers_do_not_leak_across_levels() {
    let researchers = &level(LevelId::Intermediate).dataset;
    assert_eq!(
        resolve("select * from pirates where gold > 100", researchers),
        Err(ExecutionError::UnknownTable("pirates".into()))
    );
}

#[test]
fn results_are_independent_copies() {
    let dataset = &level(LevelId::Expert).dataset;
    let query = "select * from artifacts where value > 2500000";

    let mut first = resolve(query, dataset).unwrap();
    let second = resolve(query, dataset).unwrap();
    assert_eq!(first, second);

    first[0].push("value", 1);
    first.clear();

    let third = resolve(query, dataset).unwrap();
    assert_eq!(second, third);
    assert_eq!(ints(&third, "value"), vec![3_500_000, 2_800_000]);

    let mut scanned = resolve("select * from expeditions", dataset).unwrap();
    scanned.pop();
    assert_eq!(dataset.table("expeditions").map(|t| t.rows().len()), Some(3));
}

#[test]
fn custom_answer_table() {
    let answers = AnswerTable::new().with(
        "select max(gold) from crew",
        "crew",
        vec![row! { "max(gold)" => 90 }],
    );
    let resolver = AnswerTableResolver::new(&answers);
    let dataset = Dataset::new().with_table(Table::new(
        "crew",
        vec![
            row! { "name" => "Gibbs", "gold" => 90 },
            row! { "name" => "Cotton", "gold" => 10 },
        ],
    ));

    let hit = resolver.execute("SELECT MAX(gold) FROM crew;", &dataset).unwrap();
    assert_eq!(hit, vec![row! { "max(gold)" => 90 }]);

    let scan = resolver.execute("select * from crew", &dataset).unwrap();
    assert_eq!(scan.len(), 2);
}
