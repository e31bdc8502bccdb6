//! Session tracker.
//!
//! Entry point used by the CLI: it reads the clock once per call, loads the
//! session from the store, applies the state machine and persists the result.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;

use super::machine::{self, Transition};
use super::session::{
    Session, SessionId, DEFAULT_PLANNED_MINUTES, DEFAULT_SESSION_NAME, MAX_NAME_LEN,
};
use super::storage::SessionStore;
use crate::core::Clock;
use crate::error::PomoError;
use crate::features::stats::{ListStats, SessionStats};

/// Page size used by [`SessionTracker::list_sessions`] when none is given.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Defaults applied to creation input.
#[derive(Debug, Clone)]
pub struct SessionDefaults {
    /// Name for sessions created without one
    pub name: String,
    /// Planned minutes for sessions created without a valid duration
    pub planned_duration: u32,
    /// Page size for listings
    pub list_limit: usize,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            name: DEFAULT_SESSION_NAME.to_string(),
            planned_duration: DEFAULT_PLANNED_MINUTES,
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

/// A limited listing of an owner's sessions with stats for that page.
#[derive(Debug, Clone, Serialize)]
pub struct SessionPage {
    /// Sessions, most recently created first
    pub sessions: Vec<Session>,
    /// Stats over `sessions` only
    pub stats: ListStats,
    /// Instant the stats were measured at; rows must be rendered at it too
    #[serde(skip)]
    pub as_of: DateTime<Utc>,
}

/// Drives sessions through their lifecycle.
pub struct SessionTracker<S, C> {
    store: S,
    clock: C,
    defaults: SessionDefaults,
}

impl<S: SessionStore, C: Clock> SessionTracker<S, C> {
    /// Create a tracker with default creation settings.
    pub fn new(store: S, clock: C) -> Self {
        Self::with_defaults(store, clock, SessionDefaults::default())
    }

    /// Create a tracker with custom creation settings.
    pub const fn with_defaults(store: S, clock: C, defaults: SessionDefaults) -> Self {
        Self {
            store,
            clock,
            defaults,
        }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Current instant according to the tracker's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Create a planned session.
    ///
    /// A missing or blank name and a missing, non-positive or oversized
    /// duration fall back to the configured defaults.
    ///
    /// # Errors
    ///
    /// Returns `PomoError::Validation` if the name is longer than 255
    /// characters, or a store error if the session cannot be persisted.
    pub fn create_session(
        &self,
        owner: Option<&str>,
        name: Option<&str>,
        planned_duration: Option<i64>,
    ) -> Result<Session, PomoError> {
        let name = self.resolve_name(name)?;
        let planned_duration = self.resolve_duration(planned_duration);
        let now = self.clock.now();

        let mut session = Session::new(owner.map(str::to_string), name, planned_duration, now);
        session.id = self.store.create(&session)?;

        info!(
            "created session {} ({} min) for {}",
            session.id,
            session.planned_duration,
            owner.unwrap_or("anonymous")
        );
        Ok(session)
    }

    /// Begin work on a planned session.
    ///
    /// # Errors
    ///
    /// Returns `PomoError::NotFound` or `PomoError::InvalidTransition`.
    pub fn start_session(&self, id: SessionId) -> Result<Session, PomoError> {
        self.apply_transition(id, Transition::Start).map(|(session, _)| session)
    }

    /// Pause a working session.
    ///
    /// # Errors
    ///
    /// Returns `PomoError::NotFound` or `PomoError::InvalidTransition`.
    pub fn pause_session(&self, id: SessionId) -> Result<Session, PomoError> {
        self.apply_transition(id, Transition::Pause).map(|(session, _)| session)
    }

    /// Resume a paused session.
    ///
    /// # Errors
    ///
    /// Returns `PomoError::NotFound` or `PomoError::InvalidTransition`.
    pub fn resume_session(&self, id: SessionId) -> Result<Session, PomoError> {
        self.apply_transition(id, Transition::Resume).map(|(session, _)| session)
    }

    /// Complete a working or paused session.
    ///
    /// # Errors
    ///
    /// Returns `PomoError::NotFound` or `PomoError::InvalidTransition`.
    pub fn complete_session(&self, id: SessionId) -> Result<Session, PomoError> {
        self.apply_transition(id, Transition::Complete).map(|(session, _)| session)
    }

    /// Abandon a session that has not reached a terminal status.
    ///
    /// # Errors
    ///
    /// Returns `PomoError::NotFound` or `PomoError::InvalidTransition`.
    pub fn abandon_session(&self, id: SessionId) -> Result<Session, PomoError> {
        self.apply_transition(id, Transition::Abandon).map(|(session, _)| session)
    }

    /// Fetch a session.
    ///
    /// # Errors
    ///
    /// Returns `PomoError::NotFound` if the id is unknown.
    pub fn get_session(&self, id: SessionId) -> Result<Session, PomoError> {
        self.store.get_by_id(id)
    }

    /// List an owner's most recent sessions with stats for that page.
    ///
    /// Anonymous callers get an empty page.
    ///
    /// # Errors
    ///
    /// Returns a store error if the sessions cannot be read.
    pub fn list_sessions(
        &self,
        owner: Option<&str>,
        limit: Option<usize>,
    ) -> Result<SessionPage, PomoError> {
        let now = self.clock.now();
        let limit = limit.unwrap_or(self.defaults.list_limit);

        let sessions = match owner {
            Some(owner) => self.store.list_by_owner(owner, Some(limit))?,
            None => Vec::new(),
        };
        let stats = ListStats::calculate(&sessions, now);

        Ok(SessionPage {
            sessions,
            stats,
            as_of: now,
        })
    }

    /// Stats over an owner's full history.
    ///
    /// Anonymous callers get zeroed stats.
    ///
    /// # Errors
    ///
    /// Returns a store error if the sessions cannot be read.
    pub fn compute_stats(&self, owner: Option<&str>) -> Result<SessionStats, PomoError> {
        let now = self.clock.now();

        let sessions = match owner {
            Some(owner) => self.store.list_by_owner(owner, None)?,
            None => Vec::new(),
        };

        Ok(SessionStats::calculate(&sessions, now))
    }

    /// Apply `transition` and return the session with the instant it was
    /// stamped at.
    ///
    /// # Errors
    ///
    /// Returns `PomoError::NotFound` or `PomoError::InvalidTransition`.
    pub fn apply_transition(
        &self,
        id: SessionId,
        transition: Transition,
    ) -> Result<(Session, DateTime<Utc>), PomoError> {
        let now = self.clock.now();
        let mut session = self.store.get_by_id(id)?;
        let from = session.status;

        if let Err(e) = machine::apply(&mut session, transition, now) {
            debug!("rejected {transition} on session {id}: status is {from}");
            return Err(e);
        }
        self.store.save(&session)?;

        debug!("session {id}: {from} -> {}", session.status);
        if session.status.is_terminal() {
            info!(
                "session {id} {} with {:.1} effective minutes",
                session.status,
                session.effective_work_minutes(now)
            );
        }
        Ok((session, now))
    }

    fn resolve_name(&self, name: Option<&str>) -> Result<String, PomoError> {
        match name.map(str::trim) {
            Some(name) if name.chars().count() > MAX_NAME_LEN => Err(PomoError::Validation(
                format!("session name must be at most {MAX_NAME_LEN} characters"),
            )),
            Some(name) if !name.is_empty() => Ok(name.to_string()),
            Some(_) => {
                warn!("blank session name, using '{}'", self.defaults.name);
                Ok(self.defaults.name.clone())
            }
            None => Ok(self.defaults.name.clone()),
        }
    }

    fn resolve_duration(&self, planned: Option<i64>) -> u32 {
        match planned {
            Some(minutes) if minutes > 0 => u32::try_from(minutes).unwrap_or_else(|_| {
                warn!(
                    "planned duration {minutes} out of range, using {}",
                    self.defaults.planned_duration
                );
                self.defaults.planned_duration
            }),
            Some(minutes) => {
                warn!(
                    "planned duration {minutes} is not positive, using {}",
                    self.defaults.planned_duration
                );
                self.defaults.planned_duration
            }
            None => self.defaults.planned_duration,
        }
    }
}
