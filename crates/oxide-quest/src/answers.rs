//! Canonical answer table.
//!
//! Stands in for a query engine: every expected query of the curriculum,
//! plus a few common spellings of them, maps to the rows it produces. Keys
//! are already normalized (see [`crate::resolver::normalize`]).

use std::sync::OnceLock;

use crate::catalog::data::{artifacts, distinct_departments, pick, pirates, project, researchers, scalar};
use crate::dataset::Dataset;
use crate::value::Row;

/// One canonical query and its rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Normalized query text.
    pub query: String,
    /// Table the query reads from.
    pub table: String,
    /// Rows the query produces.
    pub rows: Vec<Row>,
}

/// Lookup table from normalized query text to result rows.
#[derive(Debug, Default)]
pub struct AnswerTable {
    entries: Vec<Answer>,
}

impl AnswerTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds an entry, builder style.
    #[must_use]
    pub fn with(mut self, query: &str, table: &str, rows: Vec<Row>) -> Self {
        self.entries.push(Answer {
            query: String::from(query),
            table: String::from(table),
            rows,
        });
        self
    }

    /// The answer table for the bundled curriculum.
    pub fn bundled() -> &'static Self {
        static TABLE: OnceLock<AnswerTable> = OnceLock::new();
        TABLE.get_or_init(bundled_answers)
    }

    /// All entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[Answer] {
        &self.entries
    }

    /// Finds the entry for an already-normalized query.
    ///
    /// An entry only matches when its table exists in `dataset`, so answers for
    /// one level never resolve against another level's data.
    #[must_use]
    pub fn lookup(&self, normalized: &str, dataset: &Dataset) -> Option<&Answer> {
        self.entries
            .iter()
            .find(|a| a.query == normalized && dataset.contains(&a.table))
    }
}

fn bundled_answers() -> AnswerTable {
    let pirates = pirates();
    let rich_pirates = pick(&pirates, &[1, 3, 4]);
    let black_pearl = pick(&pirates, &[1, 3, 4]);
    let researchers = researchers();
    let prolific = pick(&researchers, &[1, 2, 4]);
    let artifacts = artifacts();
    let ancient_by_value = pick(&artifacts, &[5, 2, 4, 1]);

    AnswerTable::new()
        // Beginner
        .with("select * from pirates", "pirates", pirates)
        .with("select * from pirates where gold > 100", "pirates", rich_pirates.clone())
        .with("select * from pirates where gold>100", "pirates", rich_pirates)
        .with(
            "select name from pirates where ship = 'black pearl'",
            "pirates",
            project(&black_pearl, "name"),
        )
        .with(
            "select name from pirates where ship='black pearl'",
            "pirates",
            project(&black_pearl, "name"),
        )
        .with(
            "select count(*) from pirates where rank = 'captain'",
            "pirates",
            scalar("count(*)", 2),
        )
        .with(
            "select count(*) from pirates where rank='captain'",
            "pirates",
            scalar("count(*)", 2),
        )
        // Intermediate
        .with("select * from researchers", "researchers", researchers)
        .with(
            "select * from researchers where publications > 40",
            "researchers",
            prolific.clone(),
        )
        .with(
            "select * from researchers where publications>40",
            "researchers",
            prolific,
        )
        .with(
            "select distinct department from researchers",
            "researchers",
            distinct_departments(),
        )
        .with(
            "select avg(citations) from researchers where department = 'computer science'",
            "researchers",
            scalar("avg(citations)", 1350),
        )
        // Expert
        .with("select * from artifacts", "artifacts", artifacts.clone())
        .with(
            "select * from artifacts where value > 2500000",
            "artifacts",
            pick(&artifacts, &[1, 4]),
        )
        .with(
            "select * from artifacts where year < 0 order by value",
            "artifacts",
            ancient_by_value.clone(),
        )
        .with(
            "select * from artifacts where year < 0 order by value asc",
            "artifacts",
            ancient_by_value,
        )
        .with(
            "select sum(value) from artifacts where condition = 'excellent'",
            "artifacts",
            scalar("sum(value)", 3_500_000),
        )
}
