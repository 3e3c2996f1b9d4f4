//! # oxide-quest
//!
//! The engine of an SQL adventure game: small bundled datasets, a stand-in
//! query resolver, a grader, and level progression with scoring.
//!
//! Everything here is synchronous and in-memory. A presentation shell (the
//! `oxide-quest` binary, or anything else) drives it through [`Game`].
//!
//! ## Flow of one submission
//!
//! ```text
//! raw SQL ─▶ resolver ─▶ grader ─▶ session ─▶ shell
//! ```
//!
//! - [`resolver`] turns text into rows or an [`ExecutionError`], using the
//!   canonical [`answers`] table and falling back to a whole-table scan.
//! - [`grader`] decides pass or fail with feedback and an optional suggestion.
//! - [`session`] tracks the current task, the pending points of a passed task
//!   and the banked score.
//!
//! ## Example
//!
//! ```rust
//! use oxide_quest::{Game, LevelId, Phase};
//!
//! let mut game = Game::bundled();
//! game.select_level(LevelId::Beginner).unwrap();
//!
//! let attempt = game
//!     .submit_query("SELECT * FROM pirates WHERE gold > 100;")
//!     .unwrap();
//! assert!(attempt.verdict.is_correct);
//! assert_eq!(attempt.points, Some(10));
//!
//! let session = game.advance().unwrap();
//! assert_eq!(session.score(), 10);
//! assert_eq!(session.phase(), Phase::InTask);
//! ```

pub mod answers;
pub mod catalog;
pub mod dataset;
pub mod error;
pub mod game;
pub mod grader;
pub mod lexer;
pub mod render;
pub mod resolver;
pub mod session;
pub mod value;

pub use catalog::{Catalog, Level, LevelId, LevelSummary, Task};
pub use dataset::{Dataset, Table};
pub use error::{ExecutionError, GameError};
pub use game::Game;
pub use grader::{grade, Rule, Verdict};
pub use resolver::{normalize, resolve, AnswerTableResolver, ExecutionResult, QueryExecutor};
pub use session::{Attempt, GameSession, Phase};
pub use value::{Row, Value};
