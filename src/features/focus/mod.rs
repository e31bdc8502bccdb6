//! Pomodoro sessions and their lifecycle.
//!
//! - Session entity with pause-aware effective time
//! - State machine for start/pause/resume/complete/abandon
//! - Persistence behind the `SessionStore` trait
//! - `SessionTracker`, which ties the three together

pub mod machine;
pub mod session;
pub mod storage;
pub mod tracker;

pub use machine::Transition;
pub use session::{
    Session, SessionId, Status, DEFAULT_PLANNED_MINUTES, DEFAULT_SESSION_NAME, MAX_NAME_LEN,
};
pub use storage::{MemorySessionStore, SessionStore, SqliteSessionStore};
pub use tracker::{SessionDefaults, SessionPage, SessionTracker, DEFAULT_LIST_LIMIT};
