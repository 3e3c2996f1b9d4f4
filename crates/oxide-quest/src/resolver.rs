//! Query resolution.
//!
//! [`QueryExecutor`] is the seam between the game and whatever produces
//! rows for a query. The bundled [`AnswerTableResolver`] does not evaluate
//! SQL: it looks the normalized query up in the [`AnswerTable`] and, on a
//! miss, returns every row of the table named after `FROM`, without
//! applying any filter or projection.

use tracing::debug;

use crate::answers::AnswerTable;
use crate::dataset::Dataset;
use crate::error::ExecutionError;
use crate::lexer::{first_error, table_after_from, Keyword, Lexer, Token};
use crate::value::Row;

/// Rows produced by a query, or the reason there are none.
pub type ExecutionResult = std::result::Result<Vec<Row>, ExecutionError>;

/// Something that runs a query against a dataset.
pub trait QueryExecutor {
    /// Runs `query` against `dataset`. Never panics on malformed input.
    fn execute(&self, query: &str, dataset: &Dataset) -> ExecutionResult;
}

/// Lowercases, trims, collapses whitespace runs to one space and strips one
/// trailing `;`.
#[must_use]
pub fn normalize(query: &str) -> String {
    let collapsed = query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    match collapsed.strip_suffix(';') {
        Some(stripped) => stripped.trim_end().to_string(),
        None => collapsed,
    }
}

/// Resolver backed by a canonical answer table with a whole-table fallback.
#[derive(Debug, Clone, Copy)]
pub struct AnswerTableResolver<'a> {
    answers: &'a AnswerTable,
}

impl<'a> AnswerTableResolver<'a> {
    /// Creates a resolver over a custom answer table.
    #[must_use]
    pub const fn new(answers: &'a AnswerTable) -> Self {
        Self { answers }
    }

    /// Returns every row of the table named after `FROM`.
    ///
    /// Characters the lexer rejects elsewhere in the query do not matter. The
    /// scan only fails on them when no `FROM` keyword precedes the first one.
    fn scan(normalized: &str, dataset: &Dataset) -> ExecutionResult {
        let tokens = Lexer::new(normalized).tokenize();
        let Some(name) = table_after_from(&tokens) else {
            return Err(match first_error(&tokens) {
                Some((at, message)) if !tokens[..at].contains(&Token::Keyword(Keyword::From)) => {
                    ExecutionError::ExecutionFailure(message.to_string())
                }
                _ => ExecutionError::MissingFromClause,
            });
        };
        let table = dataset
            .table(name)
            .ok_or_else(|| ExecutionError::UnknownTable(name.to_string()))?;
        Ok(table.rows().to_vec())
    }
}

impl AnswerTableResolver<'static> {
    /// Resolver over the bundled curriculum's answers.
    #[must_use]
    pub fn bundled() -> Self {
        Self::new(AnswerTable::bundled())
    }
}

impl Default for AnswerTableResolver<'static> {
    fn default() -> Self {
        Self::bundled()
    }
}

impl QueryExecutor for AnswerTableResolver<'_> {
    fn execute(&self, query: &str, dataset: &Dataset) -> ExecutionResult {
        let normalized = normalize(query);

        if let Some(answer) = self.answers.lookup(&normalized, dataset) {
            debug!(query = %normalized, rows = answer.rows.len(), "Answer table hit");
            return Ok(answer.rows.clone());
        }

        let result = Self::scan(&normalized, dataset);
        match &result {
            Ok(rows) => debug!(query = %normalized, rows = rows.len(), "Fallback table scan"),
            Err(e) => debug!(query = %normalized, error = %e, "Query not resolved"),
        }
        result
    }
}

/// Resolves `query` against `dataset` with the bundled resolver.
#[must_use]
pub fn resolve(query: &str, dataset: &Dataset) -> ExecutionResult {
    AnswerTableResolver::bundled().execute(query, dataset)
}
