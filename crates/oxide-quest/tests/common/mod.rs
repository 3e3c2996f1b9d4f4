#![allow(dead_code)]

use oxide_quest::{Catalog, Level, LevelId, Row, Task, Value};

pub fn level(id: LevelId) -> &'static Level {
    Catalog::bundled()
        .level(id)
        .unwrap_or_else(|| panic!("level {id} missing from catalog"))
}

pub fn task(id: LevelId, number: usize) -> &'static Task {
    level(id)
        .task(number - 1)
        .unwrap_or_else(|| panic!("level {id} has no task {number}"))
}

pub fn column<'a>(rows: &'a [Row], name: &str) -> Vec<&'a Value> {
    rows.iter()
        .map(|row| {
            row.get(name)
                .unwrap_or_else(|| panic!("row without column {name}: {row:?}"))
        })
        .collect()
}

pub fn texts<'a>(rows: &'a [Row], name: &str) -> Vec<&'a str> {
    column(rows, name)
        .into_iter()
        .map(|v| v.as_text().unwrap_or_else(|| panic!("{name} is not text: {v:?}")))
        .collect()
}

pub fn ints(rows: &[Row], name: &str) -> Vec<i64> {
    column(rows, name)
        .into_iter()
        .map(|v| v.as_int().unwrap_or_else(|| panic!("{name} is not an integer: {v:?}")))
        .collect()
}
