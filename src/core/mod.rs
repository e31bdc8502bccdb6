//! Core abstractions for pomo.
//!
//! Time sources, duration formatting and the shared rounding policy.

pub mod clock;
mod duration;
mod rounding;

pub use clock::{Clock, ManualClock, SystemClock};
pub use duration::{format_duration, format_seconds, parse_duration};
pub use rounding::round1;
