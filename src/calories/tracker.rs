use std::fmt;

use serde::Serialize;

use crate::dataset::Dataset;
use crate::stats::{calculate_average, total};

/// Whether the average meal stayed under the daily limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LimitStatus {
    WithinLimit,
    OverLimit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealSummary {
    pub total: f64,
    pub average: f64,
    pub limit: f64,
    pub status: LimitStatus,
}

impl MealSummary {
    /// Totals the meals and compares their average with `limit`.
    ///
    /// No meals gives a total and average of 0.0.
    pub fn from_meals(meals: &Dataset<f64>, limit: f64) -> Self {
        let average = calculate_average(meals);
        let status = if average > limit {
            LimitStatus::OverLimit
        } else {
            LimitStatus::WithinLimit
        };

        Self {
            total: total(meals),
            average,
            limit,
            status,
        }
    }

    pub fn status_line(&self) -> String {
        match self.status {
            LimitStatus::OverLimit => format!(
                "WARNING: Your average calorie intake ({:.2}) exceeds your daily limit ({:.2})!",
                self.average, self.limit
            ),
            LimitStatus::WithinLimit => {
                "Great! Your average calorie intake is within your daily limit.".to_string()
            }
        }
    }
}

/// Parses a calorie amount, rejecting `NaN` and infinities.
pub fn parse_calories(text: &str) -> Result<f64, String> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| format!("'{text}' is not a number"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{text}' is not a finite number"))
    }
}

/// Meal table: name left-aligned in 20 columns, calories right-aligned in 10.
pub struct MealTable<'a>(pub &'a Dataset<f64>);

impl fmt::Display for MealTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<20}{:>10}", "Meal", "Calories")?;
        writeln!(f, "{}", "-".repeat(30))?;
        for entry in self.0.iter() {
            writeln!(f, "{:<20}{:>10.1}", entry.name, entry.value)?;
        }
        Ok(())
    }
}

/// Table followed by the total, average, limit and status lines.
pub struct MealReport<'a> {
    pub meals: &'a Dataset<f64>,
    pub summary: &'a MealSummary,
}

impl fmt::Display for MealReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        write!(f, "{}", MealTable(self.meals))?;
        writeln!(f, "{}", "-".repeat(30))?;
        writeln!(f, "Total Calories:      {:.2}", s.total)?;
        writeln!(f, "Average per Meal:    {:.2}", s.average)?;
        writeln!(f, "Daily Limit:         {:.2}", s.limit)?;
        writeln!(f, "Status: {}", s.status_line())
    }
}

pub fn render_meal_table(meals: &Dataset<f64>) -> String {
    MealTable(meals).to_string()
}

pub fn render_report(meals: &Dataset<f64>, summary: &MealSummary) -> String {
    MealReport { meals, summary }.to_string()
}
