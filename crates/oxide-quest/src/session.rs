//! Progress through one level.
//!
//! A [`GameSession`] moves through three phases:
//!
//! ```text
//!            correct grade            advance (more tasks)
//!  InTask ─────────────────▶ TaskPassed ───────────────────▶ InTask
//!    ▲  │ incorrect grade         │
//!    └──┘                         │ advance (last task)
//!                                 ▼
//!                           LevelComplete
//! ```
//!
//! A correct grade only parks the task's points in `pending`; they move into
//! `score` on advance. Reset returns to the first task with both zeroed.
//! Actions that do not fit the current phase are rejected and change nothing.

use serde::{Serialize, Serializer};
use tracing::{info, warn};

use crate::catalog::{Level, LevelId, Task};
use crate::error::{GameError, Result};
use crate::grader::{grade, Verdict};
use crate::resolver::{ExecutionResult, QueryExecutor};

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for a correct answer to the current task.
    InTask,
    /// Current task answered; waiting for advance.
    TaskPassed,
    /// Every task answered and advanced past.
    LevelComplete,
}

/// What one submitted query produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub result: ExecutionResult,
    pub verdict: Verdict,
    /// Points parked as pending, when the verdict is correct.
    pub points: Option<u32>,
}

fn serialize_level<S: Serializer>(
    level: &&Level,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    level.id.serialize(serializer)
}

/// Progress record for one attempt at one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSession<'a> {
    #[serde(serialize_with = "serialize_level")]
    level: &'a Level,
    task_index: usize,
    score: u32,
    pending: u32,
    phase: Phase,
    hints_shown: usize,
}

impl<'a> GameSession<'a> {
    /// Starts `level` at its first task.
    #[must_use]
    pub fn new(level: &'a Level) -> Self {
        info!(level = %level.id, tasks = level.tasks.len(), "Level selected");
        let mut session = Self {
            level,
            task_index: 0,
            score: 0,
            pending: 0,
            phase: Phase::InTask,
            hints_shown: 0,
        };
        session.restart();
        session
    }

    fn restart(&mut self) {
        self.task_index = 0;
        self.score = 0;
        self.pending = 0;
        self.hints_shown = 0;
        self.phase = if self.level.tasks.is_empty() {
            Phase::LevelComplete
        } else {
            Phase::InTask
        };
    }

    #[must_use]
    pub const fn level(&self) -> &'a Level {
        self.level
    }

    #[must_use]
    pub const fn level_id(&self) -> LevelId {
        self.level.id
    }

    /// The task being worked on, or `None` once the level is complete.
    #[must_use]
    pub fn task(&self) -> Option<&'a Task> {
        match self.phase {
            Phase::LevelComplete => None,
            Phase::InTask | Phase::TaskPassed => self.level.task(self.task_index),
        }
    }

    /// 0-based index of the current task.
    #[must_use]
    pub const fn task_index(&self) -> usize {
        self.task_index
    }

    /// Points banked by advancing past passed tasks.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Points for the current task, awaiting advance.
    #[must_use]
    pub const fn pending(&self) -> u32 {
        self.pending
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.phase, Phase::LevelComplete)
    }

    /// Final score, once the level is complete.
    #[must_use]
    pub const fn final_score(&self) -> Option<u32> {
        if self.is_completed() {
            Some(self.score)
        } else {
            None
        }
    }

    /// Hints of the current task revealed so far.
    #[must_use]
    pub fn revealed_hints(&self) -> &'a [String] {
        match self.task() {
            Some(task) => &task.hints[..self.hints_shown.min(task.hints.len())],
            None => &[],
        }
    }

    /// Reveals the next hint of the current task. Returns `None` when all are shown.
    pub fn reveal_hint(&mut self) -> Option<&'a str> {
        let hint = self.task()?.hints.get(self.hints_shown)?;
        self.hints_shown += 1;
        Some(hint.as_str())
    }

    /// Resolves and grades `raw_query` for the current task.
    ///
    /// # Errors
    ///
    /// [`GameError::AwaitingAdvance`] if the task is already passed,
    /// [`GameError::LevelComplete`] if there is no task left.
    pub fn submit<E: QueryExecutor + ?Sized>(
        &mut self,
        executor: &E,
        raw_query: &str,
    ) -> Result<Attempt> {
        let task = match (self.phase, self.task()) {
            (Phase::InTask, Some(task)) => task,
            (Phase::TaskPassed, _) => return Err(self.reject(GameError::AwaitingAdvance)),
            _ => return Err(self.reject(GameError::LevelComplete)),
        };

        let result = executor.execute(raw_query, &self.level.dataset);
        let verdict = grade(task, raw_query, &result);

        let points = if verdict.is_correct {
            self.pending = task.points();
            self.phase = Phase::TaskPassed;
            info!(level = %self.level.id, task = task.id, points = self.pending, "Task passed");
            Some(self.pending)
        } else {
            None
        };

        Ok(Attempt {
            result,
            verdict,
            points,
        })
    }

    /// Banks pending points and moves to the next task, or completes the level.
    ///
    /// # Errors
    ///
    /// [`GameError::NothingToAdvance`] if the current task is not passed,
    /// [`GameError::LevelComplete`] if the level is already complete.
    pub fn advance(&mut self) -> Result<Phase> {
        match self.phase {
            Phase::InTask => return Err(self.reject(GameError::NothingToAdvance)),
            Phase::LevelComplete => return Err(self.reject(GameError::LevelComplete)),
            Phase::TaskPassed => {}
        }

        self.score += self.pending;
        self.pending = 0;
        self.hints_shown = 0;

        if self.task_index + 1 < self.level.tasks.len() {
            self.task_index += 1;
            self.phase = Phase::InTask;
            info!(
                level = %self.level.id,
                task = self.task_index + 1,
                score = self.score,
                "Advanced to next task"
            );
        } else {
            self.phase = Phase::LevelComplete;
            info!(level = %self.level.id, score = self.score, "Level completed");
        }
        Ok(self.phase)
    }

    /// Back to the first task of the same level, with both scores zeroed.
    pub fn reset(&mut self) {
        self.restart();
        info!(level = %self.level.id, "Level reset");
    }

    fn reject(&self, error: GameError) -> GameError {
        warn!(level = %self.level.id, phase = ?self.phase, %error, "Action rejected");
        error
    }
}
