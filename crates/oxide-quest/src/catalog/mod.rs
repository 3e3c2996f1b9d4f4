//! Level catalog.
//!
//! The catalog is compiled in and read-only. Levels are looked up by
//! [`LevelId`] or enumerated in difficulty order.

pub(crate) mod data;

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::GameError;
use crate::value::Row;

/// Points awarded per unit of task difficulty.
pub const POINTS_PER_DIFFICULTY: u32 = 10;

/// Identifies a difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelId {
    Beginner,
    Intermediate,
    Expert,
}

impl LevelId {
    /// All level identifiers in difficulty order.
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    /// Lowercase identifier, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for LevelId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownLevel(s.to_string()))
    }
}

/// One graded question within a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// 1-based position within the level.
    pub id: u32,
    /// Natural-language question.
    pub question: String,
    /// Canonical lowercase SQL.
    pub expected_query: String,
    /// Rows the expected query produces; order matters.
    pub expected_result: Vec<Row>,
    /// Hints, from general to specific.
    pub hints: Vec<String>,
    /// Scoring multiplier, at least 1.
    pub difficulty: u32,
}

impl Task {
    /// Points awarded for passing this task.
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.difficulty * POINTS_PER_DIFFICULTY
    }
}

/// A difficulty tier: one dataset and an ordered task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Level {
    pub id: LevelId,
    pub name: String,
    pub theme: String,
    pub description: String,
    pub dataset: Dataset,
    pub tasks: Vec<Task>,
}

impl Level {
    /// The part of the name before the colon, e.g. "Beginner".
    #[must_use]
    pub fn title(&self) -> &str {
        self.name.split(':').next().unwrap_or(&self.name).trim()
    }

    /// Task at a 0-based index.
    #[must_use]
    pub fn task(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Score earned by passing every task.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.tasks.iter().map(Task::points).sum()
    }

    /// Summary for level pickers.
    #[must_use]
    pub fn summary(&self) -> LevelSummary {
        LevelSummary {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            theme: self.theme.clone(),
            tasks: self.tasks.len(),
            max_score: self.max_score(),
        }
    }
}

/// What a level picker shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelSummary {
    pub id: LevelId,
    pub name: String,
    pub description: String,
    pub theme: String,
    pub tasks: usize,
    pub max_score: u32,
}

/// The read-only set of bundled levels.
#[derive(Debug)]
pub struct Catalog {
    levels: Vec<Level>,
}

impl Catalog {
    /// The compiled-in catalog, built on first use.
    pub fn bundled() -> &'static Self {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| Self {
            levels: data::levels(),
        })
    }

    /// All levels in difficulty order.
    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Looks up a level. Every [`LevelId`] is present in the bundled catalog.
    #[must_use]
    pub fn level(&self, id: LevelId) -> Option<&Level> {
        self.levels.iter().find(|level| level.id == id)
    }

    /// Summaries of all levels in difficulty order.
    #[must_use]
    pub fn summaries(&self) -> Vec<LevelSummary> {
        self.levels.iter().map(Level::summary).collect()
    }
}
