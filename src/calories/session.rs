//! One pass of the calorie tracker: collect meals, report, optionally save.

use std::path::Path;

use chrono::Local;
use tracing::{debug, error, info, instrument, warn};

use crate::calories::log::save_log;
use crate::calories::tracker::{MealSummary, parse_calories, render_report};
use crate::console::Prompter;
use crate::dataset::Dataset;
use crate::error::Result;

const WELCOME: &str = r#"
#===============================#
#             WELCOME           #
#-------------------------------#
#   Daily Calorie Tracker(CLI)  #
#===============================#

This tool adds up the calories of today's meals
and checks the average against your daily limit.
"#;

/// Asks until the answer is a finite real number.
fn ask_calories<P: Prompter>(prompter: &mut P, prompt: &str) -> Result<f64> {
    loop {
        let answer = prompter.ask(prompt)?;
        match parse_calories(&answer) {
            Ok(value) => return Ok(value),
            Err(reason) => {
                debug!(%reason, "Rejected calorie value");
                prompter.say("Please enter a number.")?;
            }
        }
    }
}

/// Asks for the meal count, then exactly that many meal names and calories.
pub fn collect_meals<P: Prompter>(prompter: &mut P) -> Result<Dataset<f64>> {
    let count: usize = prompter.ask_parsed(
        "Enter the number of Meals you want to enter: ",
        "Please enter a whole number of meals.",
    )?;

    let mut meals = Dataset::new();
    for _ in 0..count {
        let name = prompter.ask("Enter the Meal: ")?;
        let calories = ask_calories(prompter, "Enter the Calorie of the Meal: ")?;
        if let Some(previous) = meals.insert(name.clone(), calories) {
            warn!(meal = %name, previous, calories, "Meal entered twice, keeping latest value");
        }
    }

    Ok(meals)
}

/// Runs the tracker once. `limit` skips the limit prompt when given.
#[instrument(skip(prompter, log_path), fields(log_path = %log_path.display()))]
pub fn run<P: Prompter>(
    prompter: &mut P,
    limit: Option<f64>,
    log_path: &Path,
) -> Result<MealSummary> {
    prompter.say(WELCOME)?;

    let meals = collect_meals(prompter)?;
    let limit = match limit {
        Some(limit) => limit,
        None => ask_calories(prompter, "Enter your daily calorie limit: ")?,
    };

    let summary = MealSummary::from_meals(&meals, limit);
    info!(
        meals = meals.len(),
        total = summary.total,
        average = summary.average,
        limit,
        "Calories summarised"
    );

    prompter.say("")?;
    prompter.say(render_report(&meals, &summary).trim_end())?;

    let answer = prompter.ask("\nDo you want to save this session log? (yes/no): ")?;
    if matches!(answer.to_lowercase().as_str(), "yes" | "y") {
        match save_log(log_path, &meals, &summary, Local::now().naive_local()) {
            Ok(()) => {
                info!("Calorie log saved");
                prompter.say(&format!("Session log saved to {}", log_path.display()))?;
            }
            Err(e) => {
                error!(error = %e, "Failed to save calorie log");
                prompter.say(&format!("Failed to save session log: {e}"))?;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calories::tracker::LimitStatus;
    use crate::console::LinePrompter;

    fn scripted(input: &str) -> LinePrompter<&[u8], Vec<u8>> {
        LinePrompter::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn test_collect_meals_reprompts_bad_numbers() {
        let mut p = scripted("two\n2\nToast\nlots\n250\nSoup\ninf\n300.5\n");
        let meals = collect_meals(&mut p).unwrap();

        assert_eq!(meals.len(), 2);
        assert_eq!(meals.get("Toast"), Some(250.0));
        assert_eq!(meals.get("Soup"), Some(300.5));
    }

    #[test]
    fn test_zero_meals() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = scripted("0\n1500\nno\n");
        let summary = run(&mut p, None, &dir.path().join("log.txt")).unwrap();

        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.status, LimitStatus::WithinLimit);
        assert!(!dir.path().join("log.txt").exists());
    }

    #[test]
    fn test_run_saves_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calorie_log.txt");
        let mut p = scripted("1\nFeast\n2500\nYES\n");
        let summary = run(&mut p, Some(2000.0), &path).unwrap();

        assert_eq!(summary.status, LimitStatus::OverLimit);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Feast"));
        assert!(content.contains("WARNING"));
    }

    #[test]
    fn test_failed_save_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing/calorie_log.txt");
        let mut p = scripted("1\nTea\n5\n100\ny\n");
        run(&mut p, None, &path).unwrap();

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("Failed to save session log"));
        assert!(out.contains("Total Calories:"));
    }
}
