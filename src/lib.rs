pub mod calories;
pub mod console;
pub mod dataset;
pub mod error;
pub mod gradebook;
pub mod output;
pub mod stats;
