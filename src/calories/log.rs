//! Plain-text session log for the calorie tracker.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::calories::tracker::{MealSummary, render_report};
use crate::dataset::Dataset;
use crate::error::Result;

/// Default log file name, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "calorie_log.txt";

pub fn render_log(meals: &Dataset<f64>, summary: &MealSummary, timestamp: NaiveDateTime) -> String {
    let mut out = String::new();
    out.push_str("Daily Calorie Tracker Log\n");
    out.push_str(&format!("Session: {}\n", timestamp.format("%Y-%m-%d %H:%M:%S")));
    out.push_str(&"=".repeat(30));
    out.push('\n');
    out.push_str(&render_report(meals, summary));
    out
}

/// Writes the session log to `path`, replacing any earlier log.
pub fn save_log(
    path: &Path,
    meals: &Dataset<f64>,
    summary: &MealSummary,
    timestamp: NaiveDateTime,
) -> Result<()> {
    let contents = render_log(meals, summary, timestamp);
    debug!(path = %path.display(), bytes = contents.len(), "Writing calorie log");

    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;

    Ok(())
}
