//! Error types for query resolution and game actions.

use serde::Serialize;
use thiserror::Error;

/// Errors produced while resolving a query against a dataset.
///
/// These are returned as data and shown to the learner; none of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail")]
pub enum ExecutionError {
    /// No table name follows a FROM keyword.
    #[error("Missing FROM clause in query")]
    MissingFromClause,

    /// The query reads from a table the dataset does not have.
    #[error("Table '{0}' not found in database")]
    UnknownTable(String),

    /// The query could not be processed at all.
    #[error("Error executing query: {0}")]
    ExecutionFailure(String),
}

/// Actions rejected by the game or a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// No level with this identifier.
    #[error("unknown level: {0}")]
    UnknownLevel(String),

    /// The action needs a selected level.
    #[error("no level selected")]
    NoLevelSelected,

    /// The current task is passed; advance before submitting again.
    #[error("task already passed, advance to the next task first")]
    AwaitingAdvance,

    /// Advance was requested without a passed task.
    #[error("nothing to advance: the current task has not been passed")]
    NothingToAdvance,

    /// Every task of the level is done.
    #[error("level already completed")]
    LevelComplete,
}

/// Result type alias for game actions.
pub type Result<T> = std::result::Result<T, GameError>;
