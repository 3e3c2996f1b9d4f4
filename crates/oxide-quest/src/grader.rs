//! Query grading.
//!
//! [`grade`] runs a fixed cascade and the first rule that applies decides the
//! verdict:
//!
//! 1. the normalized query equals the expected query;
//! 2. the resolver's rows equal the expected rows;
//! 3. the ordered [`HEURISTICS`], each naming one thing the query lacks;
//! 4. a generic "doesn't match".
//!
//! Rule 2 accepts any query whose rows match, even if it skips the clause the
//! task is meant to teach.

use serde::Serialize;
use tracing::debug;

use crate::catalog::Task;
use crate::lexer::{has_keyword, Keyword};
use crate::resolver::{normalize, ExecutionResult};

/// The grading rule that produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// The normalized query equals the task's expected query.
    ExactMatch,
    /// The query produced exactly the expected rows.
    ResultMatch,
    /// No `SELECT` keyword.
    MissingSelect,
    /// No `FROM` keyword.
    MissingFrom,
    /// The question asks to find something but the query has no `WHERE`.
    MissingWhere,
    /// The question asks for distinct values but the query has no `DISTINCT`.
    MissingDistinct,
    /// Nothing more specific applied.
    NoMatch,
}

/// Outcome of grading one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Whether the submission passes the task.
    pub is_correct: bool,
    /// Message shown to the learner.
    pub feedback: String,
    /// What to try next; `None` when the submission passed.
    pub suggestion: Option<String>,
    /// Rule that decided the verdict.
    pub rule: Rule,
}

impl Verdict {
    fn correct(rule: Rule, feedback: &str) -> Self {
        Self {
            is_correct: true,
            feedback: feedback.to_string(),
            suggestion: None,
            rule,
        }
    }

    fn incorrect(rule: Rule, feedback: &str, suggestion: &str) -> Self {
        Self {
            is_correct: false,
            feedback: feedback.to_string(),
            suggestion: Some(suggestion.to_string()),
            rule,
        }
    }
}

/// A check for something the query is missing.
pub struct Heuristic {
    /// Rule reported when the check fires.
    pub rule: Rule,
    /// Returns true when the check fires for `(task, normalized query)`.
    pub fires: fn(&Task, &str) -> bool,
    /// Feedback for the resulting verdict.
    pub feedback: &'static str,
    /// Suggestion for the resulting verdict.
    pub suggestion: &'static str,
}

fn question_mentions(task: &Task, word: &str) -> bool {
    task.question
        .split(|c: char| !c.is_alphanumeric())
        .any(|w| w.eq_ignore_ascii_case(word))
}

/// Heuristics in the order they are tried.
pub const HEURISTICS: &[Heuristic] = &[
    Heuristic {
        rule: Rule::MissingSelect,
        fires: |_, query| !has_keyword(query, Keyword::Select),
        feedback: "Missing SELECT keyword",
        suggestion: "Every SQL query must start with SELECT",
    },
    Heuristic {
        rule: Rule::MissingFrom,
        fires: |_, query| !has_keyword(query, Keyword::From),
        feedback: "Missing FROM clause",
        suggestion: "You need to specify which table to query using FROM",
    },
    Heuristic {
        rule: Rule::MissingWhere,
        fires: |task, query| question_mentions(task, "find") && !has_keyword(query, Keyword::Where),
        feedback: "Missing WHERE clause",
        suggestion: "You need to filter your results using a WHERE clause",
    },
    Heuristic {
        rule: Rule::MissingDistinct,
        fires: |task, query| {
            question_mentions(task, "distinct") && !has_keyword(query, Keyword::Distinct)
        },
        feedback: "Missing DISTINCT keyword",
        suggestion: "Use SELECT DISTINCT to eliminate duplicate values",
    },
];

/// Grades `raw_query` for `task`, given what the resolver produced for it.
#[must_use]
pub fn grade(task: &Task, raw_query: &str, result: &ExecutionResult) -> Verdict {
    let query = normalize(raw_query);

    let verdict = if query == task.expected_query.to_lowercase() {
        Verdict::correct(Rule::ExactMatch, "Your query matches the expected solution.")
    } else if result.as_ref().is_ok_and(|rows| *rows == task.expected_result) {
        Verdict::correct(Rule::ResultMatch, "Your query produces the expected results.")
    } else {
        HEURISTICS
            .iter()
            .find(|h| (h.fires)(task, &query))
            .map_or_else(
                || {
                    Verdict::incorrect(
                        Rule::NoMatch,
                        "Your query doesn't match the expected solution",
                        "Try again, or check the hints for guidance",
                    )
                },
                |h| Verdict::incorrect(h.rule, h.feedback, h.suggestion),
            )
    };

    debug!(task = task.id, rule = ?verdict.rule, correct = verdict.is_correct, "Graded query");
    verdict
}
