//! Daily calorie tracking.

pub mod log;
pub mod session;
pub mod tracker;
