//! Session persistence.
//!
//! [`SessionStore`] is the contract the tracker relies on. Two stores are
//! provided: [`SqliteSessionStore`] on top of the local database and
//! [`MemorySessionStore`] for tests and embedding.

use std::cell::{Cell, RefCell};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, OptionalExtension, Row};

use super::session::{Session, SessionId, Status};
use crate::error::PomoError;
use crate::storage::Database;

/// Persistence operations required by the session tracker.
///
/// Implementations must make each call atomic for the record it touches.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore {
    /// Persist a new session and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    fn create(&self, session: &Session) -> Result<SessionId, PomoError>;

    /// Fetch a session by id.
    ///
    /// # Errors
    ///
    /// Returns `PomoError::NotFound` if no session has this id.
    fn get_by_id(&self, id: SessionId) -> Result<Session, PomoError>;

    /// List an owner's sessions, most recently created first.
    ///
    /// `limit` of `None` returns the full history.
    ///
    /// # Errors
    ///
    /// Returns an error if the sessions cannot be read.
    fn list_by_owner(&self, owner: &str, limit: Option<usize>)
        -> Result<Vec<Session>, PomoError>;

    /// Overwrite an existing session.
    ///
    /// # Errors
    ///
    /// Returns `PomoError::NotFound` if the session does not exist.
    fn save(&self, session: &Session) -> Result<(), PomoError>;
}

const SELECT_COLUMNS: &str = r"SELECT id, owner, name, planned_duration, status,
         work_start_at, work_end_at, leave_start_at, leave_end_at,
         created_at, updated_at
  FROM pomodoro_sessions";

/// SQLite-backed session store.
pub struct SqliteSessionStore {
    db: Database,
}

impl SqliteSessionStore {
    /// Open the store on the default database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new() -> Result<Self, PomoError> {
        let db = Database::open()?;
        Ok(Self { db })
    }

    /// Create a store with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Delete every session (for testing).
    #[cfg(test)]
    pub fn delete_all(&self) -> Result<(), PomoError> {
        self.db
            .connection()
            .execute("DELETE FROM pomodoro_sessions", [])
            .map_err(|e| PomoError::Database(format!("Failed to delete sessions: {e}")))?;
        Ok(())
    }
}

impl SessionStore for SqliteSessionStore {
    fn create(&self, session: &Session) -> Result<SessionId, PomoError> {
        let conn = self.db.connection();

        conn.execute(
            r"INSERT INTO pomodoro_sessions
              (owner, name, planned_duration, status, work_start_at, work_end_at,
               leave_start_at, leave_end_at, created_at, updated_at)
              VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                session.owner,
                session.name,
                session.planned_duration,
                session.status.as_str(),
                session.work_start_at.map(timestamp),
                session.work_end_at.map(timestamp),
                session.leave_start_at.map(timestamp),
                session.leave_end_at.map(timestamp),
                timestamp(session.created_at),
                timestamp(session.updated_at),
            ],
        )
        .map_err(|e| PomoError::Database(format!("Failed to insert session: {e}")))?;

        Ok(conn.last_insert_rowid())
    }

    fn get_by_id(&self, id: SessionId) -> Result<Session, PomoError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .map_err(|e| PomoError::Database(format!("Failed to prepare query: {e}")))?;

        stmt.query_row([id], row_to_session)
            .optional()
            .map_err(|e| PomoError::Database(format!("Failed to query session: {e}")))?
            .ok_or_else(|| PomoError::session_not_found(id))
    }

    fn list_by_owner(
        &self,
        owner: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Session>, PomoError> {
        let conn = self.db.connection();

        // SQLite treats a negative LIMIT as unbounded
        let limit = limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));

        let mut stmt = conn
            .prepare(&format!(
                "{SELECT_COLUMNS} WHERE owner = ?1 ORDER BY created_at DESC, id DESC LIMIT ?2"
            ))
            .map_err(|e| PomoError::Database(format!("Failed to prepare query: {e}")))?;

        let sessions = stmt
            .query_map(params![owner, limit], row_to_session)
            .map_err(|e| PomoError::Database(format!("Failed to query sessions: {e}")))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| PomoError::Database(format!("Failed to read session: {e}")))?;

        Ok(sessions)
    }

    fn save(&self, session: &Session) -> Result<(), PomoError> {
        let conn = self.db.connection();

        let rows = conn
            .execute(
                r"UPDATE pomodoro_sessions SET
                  owner = ?1,
                  name = ?2,
                  planned_duration = ?3,
                  status = ?4,
                  work_start_at = ?5,
                  work_end_at = ?6,
                  leave_start_at = ?7,
                  leave_end_at = ?8,
                  updated_at = ?9
                  WHERE id = ?10",
                params![
                    session.owner,
                    session.name,
                    session.planned_duration,
                    session.status.as_str(),
                    session.work_start_at.map(timestamp),
                    session.work_end_at.map(timestamp),
                    session.leave_start_at.map(timestamp),
                    session.leave_end_at.map(timestamp),
                    timestamp(session.updated_at),
                    session.id,
                ],
            )
            .map_err(|e| PomoError::Database(format!("Failed to update session: {e}")))?;

        if rows == 0 {
            return Err(PomoError::session_not_found(session.id));
        }
        Ok(())
    }
}

/// Fixed-width RFC 3339 so text ordering matches time ordering.
fn timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(idx: usize, s: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn optional_timestamp(
    row: &Row<'_>,
    idx: usize,
) -> Result<Option<DateTime<Utc>>, rusqlite::Error> {
    let value: Option<String> = row.get(idx)?;
    value.map(|s| parse_timestamp(idx, &s)).transpose()
}

/// Convert a database row to a Session.
fn row_to_session(row: &Row<'_>) -> Result<Session, rusqlite::Error> {
    let status_str: String = row.get(4)?;
    let status = status_str.parse::<Status>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let created_at: String = row.get(9)?;
    let updated_at: String = row.get(10)?;

    Ok(Session {
        id: row.get(0)?,
        owner: row.get(1)?,
        name: row.get(2)?,
        planned_duration: row.get(3)?,
        status,
        work_start_at: optional_timestamp(row, 5)?,
        work_end_at: optional_timestamp(row, 6)?,
        leave_start_at: optional_timestamp(row, 7)?,
        leave_end_at: optional_timestamp(row, 8)?,
        created_at: parse_timestamp(9, &created_at)?,
        updated_at: parse_timestamp(10, &updated_at)?,
    })
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RefCell<Vec<Session>>,
    next_id: Cell<SessionId>,
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.borrow().len()
    }

    /// Whether the store holds no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.borrow().is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn create(&self, session: &Session) -> Result<SessionId, PomoError> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);

        let mut stored = session.clone();
        stored.id = id;
        self.sessions.borrow_mut().push(stored);
        Ok(id)
    }

    fn get_by_id(&self, id: SessionId) -> Result<Session, PomoError> {
        self.sessions
            .borrow()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| PomoError::session_not_found(id))
    }

    fn list_by_owner(
        &self,
        owner: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Session>, PomoError> {
        let mut sessions: Vec<Session> = self
            .sessions
            .borrow()
            .iter()
            .filter(|s| s.owner.as_deref() == Some(owner))
            .cloned()
            .collect();

        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        if let Some(limit) = limit {
            sessions.truncate(limit);
        }
        Ok(sessions)
    }

    fn save(&self, session: &Session) -> Result<(), PomoError> {
        let mut sessions = self.sessions.borrow_mut();
        let slot = sessions
            .iter_mut()
            .find(|s| s.id == session.id)
            .ok_or_else(|| PomoError::session_not_found(session.id))?;
        *slot = session.clone();
        Ok(())
    }
}
