//! Feature implementations for pomo.
//!
//! - Focus sessions: entity, state machine, stores and tracker
//! - Statistics over session history

pub mod focus;
pub mod stats;
