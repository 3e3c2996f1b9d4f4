//! Entry point for a presentation shell.
//!
//! [`Game`] holds the catalog, the query executor and at most one
//! [`GameSession`]. With no session the game is in the "no level" state;
//! selecting a level creates a session and changing level drops it.

use tracing::{info, warn};

use crate::catalog::{Catalog, LevelId, LevelSummary};
use crate::error::{GameError, Result};
use crate::resolver::{AnswerTableResolver, QueryExecutor};
use crate::session::{Attempt, GameSession, Phase};

/// A learner's game: level selection plus the active session, if any.
#[derive(Debug)]
pub struct Game<'a, E = AnswerTableResolver<'static>> {
    catalog: &'a Catalog,
    executor: E,
    session: Option<GameSession<'a>>,
}

impl Game<'static> {
    /// A game over the bundled catalog and resolver.
    #[must_use]
    pub fn bundled() -> Self {
        Self::new(Catalog::bundled(), AnswerTableResolver::bundled())
    }
}

impl<'a, E: QueryExecutor> Game<'a, E> {
    /// Creates a game with no level selected.
    #[must_use]
    pub const fn new(catalog: &'a Catalog, executor: E) -> Self {
        Self {
            catalog,
            executor,
            session: None,
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Summaries of every level, in difficulty order.
    #[must_use]
    pub fn list_levels(&self) -> Vec<LevelSummary> {
        self.catalog.summaries()
    }

    /// The active session, or `None` when no level is selected.
    #[must_use]
    pub const fn session(&self) -> Option<&GameSession<'a>> {
        self.session.as_ref()
    }

    /// Phase of the active session; `None` means no level is selected.
    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        self.session.as_ref().map(GameSession::phase)
    }

    /// Starts a fresh session on `id`, replacing any current one.
    ///
    /// # Errors
    ///
    /// [`GameError::UnknownLevel`] if the catalog has no such level.
    pub fn select_level(&mut self, id: LevelId) -> Result<&mut GameSession<'a>> {
        let level = self
            .catalog
            .level(id)
            .ok_or_else(|| GameError::UnknownLevel(id.to_string()))?;
        Ok(self.session.insert(GameSession::new(level)))
    }

    /// Moves to the level named `name`, keeping the current session if the
    /// name is not a level.
    ///
    /// # Errors
    ///
    /// [`GameError::UnknownLevel`] if `name` does not parse as a [`LevelId`].
    pub fn switch_level(&mut self, name: &str) -> Result<&mut GameSession<'a>> {
        let id = name.parse::<LevelId>().inspect_err(|_| {
            warn!(requested = name, "Level change rejected: unknown level");
        })?;
        self.change_level();
        self.select_level(id)
    }

    fn active(&mut self) -> Result<&mut GameSession<'a>> {
        self.session.as_mut().ok_or_else(|| {
            warn!("Action rejected: no level selected");
            GameError::NoLevelSelected
        })
    }

    /// Resolves and grades a query for the current task.
    ///
    /// # Errors
    ///
    /// [`GameError::NoLevelSelected`], or whatever [`GameSession::submit`] rejects.
    pub fn submit_query(&mut self, raw_query: &str) -> Result<Attempt> {
        let Some(session) = self.session.as_mut() else {
            warn!("Action rejected: no level selected");
            return Err(GameError::NoLevelSelected);
        };
        session.submit(&self.executor, raw_query)
    }

    /// Reveals the next hint of the current task.
    ///
    /// # Errors
    ///
    /// [`GameError::NoLevelSelected`] if no level is selected.
    pub fn reveal_hint(&mut self) -> Result<Option<&'a str>> {
        Ok(self.active()?.reveal_hint())
    }

    /// Advances past a passed task.
    ///
    /// # Errors
    ///
    /// [`GameError::NoLevelSelected`], or whatever [`GameSession::advance`] rejects.
    pub fn advance(&mut self) -> Result<&GameSession<'a>> {
        let session = self.active()?;
        session.advance()?;
        Ok(session)
    }

    /// Restarts the current level.
    ///
    /// # Errors
    ///
    /// [`GameError::NoLevelSelected`] if no level is selected.
    pub fn reset(&mut self) -> Result<&GameSession<'a>> {
        let session = self.active()?;
        session.reset();
        Ok(session)
    }

    /// Drops the current session, back to level selection. Always allowed.
    pub fn change_level(&mut self) {
        if let Some(session) = self.session.take() {
            info!(level = %session.level_id(), "Left level");
        }
    }
}
