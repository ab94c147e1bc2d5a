//! Gradebook analysis and text rendering.

use std::fmt;

use serde::Serialize;

use crate::dataset::Dataset;
use crate::gradebook::filter::{PASS_MARK, PassFail, partition_pass_fail};
use crate::gradebook::grade::{GradeAssignment, GradeDistribution, generate_grades};
use crate::stats::{calculate_average, calculate_median, find_max_score, find_min_score, pct};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub average: f64,
    pub median: f64,
    pub max: u8,
    pub min: u8,
}

/// Everything computed for one set of marks.
#[derive(Debug, Clone, Serialize)]
pub struct GradebookReport {
    pub marks: Dataset<u8>,
    pub grades: GradeAssignment,
    pub summary: Summary,
    pub distribution: GradeDistribution,
    pub pass_mark: u8,
    pub pass_fail: PassFail,
}

impl GradebookReport {
    pub fn analyze(marks: Dataset<u8>) -> Self {
        let (grades, distribution) = generate_grades(&marks);
        let summary = Summary {
            count: marks.len(),
            average: calculate_average(&marks),
            median: calculate_median(&marks),
            max: find_max_score(&marks),
            min: find_min_score(&marks),
        };
        let pass_fail = partition_pass_fail(&marks, PASS_MARK);

        Self {
            marks,
            grades,
            summary,
            distribution,
            pass_mark: PASS_MARK,
            pass_fail,
        }
    }

    /// Statistics, distribution and pass/fail sections.
    pub fn render_summary(&self) -> String {
        SummarySection(self).to_string()
    }

    /// Final table of every student sorted by name. Empty when there are no marks.
    pub fn render_table(&self) -> String {
        ResultsTable(self).to_string()
    }
}

pub struct SummarySection<'a>(pub &'a GradebookReport);

impl fmt::Display for SummarySection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let s = &report.summary;
        if s.count == 0 {
            return writeln!(f, "\nNo student data to analyze.");
        }

        let eq = "=".repeat(40);
        let dash = "-".repeat(35);
        let star = "*".repeat(35);

        writeln!(f, "\n{eq}")?;
        writeln!(f, "      *** Statistical Summary ***")?;
        writeln!(f, "{eq}")?;
        writeln!(f, "Total Students: {}", s.count)?;
        writeln!(f, "Average Score:  {:.2}", s.average)?;
        writeln!(f, "Median Score:   {:.1}", s.median)?;
        writeln!(f, "Maximum Score:  {}", s.max)?;
        writeln!(f, "Minimum Score:  {}", s.min)?;
        writeln!(f, "{eq}")?;

        writeln!(f, "\n{dash}")?;
        writeln!(f, "      *** Grade Distribution ***")?;
        writeln!(f, "{dash}")?;
        let total = report.distribution.total();
        for (grade, count) in report.distribution.iter() {
            writeln!(
                f,
                "Grade {grade}: {count} students ({:.1}%)",
                pct(count, total)
            )?;
        }
        writeln!(f, "{dash}")?;

        let pf = &report.pass_fail;
        writeln!(f, "\n{star}")?;
        writeln!(f, "      *** Pass/Fail Summary ***")?;
        writeln!(f, "{star}")?;
        writeln!(f, "Total Passed (>= {}): {}", report.pass_mark, pf.passed.len())?;
        writeln!(f, "Total Failed (< {}):  {}", report.pass_mark, pf.failed.len())?;
        writeln!(f, "\nFailed Students:")?;
        if pf.failed.is_empty() {
            writeln!(f, "None")?;
        } else {
            writeln!(f, "{}", pf.failed.join(", "))?;
        }
        writeln!(f, "{star}")
    }
}

pub struct ResultsTable<'a>(pub &'a GradebookReport);

impl fmt::Display for ResultsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        if report.marks.is_empty() {
            return Ok(());
        }

        let header = format!("{:<15}{:<10}{:<5}", "Name", "Marks", "Grade");
        let separator = "-".repeat(header.len());
        let eq = "=".repeat(30);

        writeln!(f, "\n{eq}")?;
        writeln!(f, "       *** Final Gradebook ***")?;
        writeln!(f, "{eq}")?;
        writeln!(f, "{header}")?;
        writeln!(f, "{separator}")?;
        for entry in report.marks.sorted_by_name() {
            let grade = report
                .grades
                .get(&entry.name)
                .map_or_else(|| "N/A".to_string(), |g| g.to_string());
            writeln!(f, "{:<15}{:<10}{:<5}", entry.name, entry.value, grade)?;
        }
        writeln!(f, "{separator}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradebook::grade::Grade;

    fn sample() -> GradebookReport {
        let marks: Dataset<u8> = [("Alice", 95), ("Bob", 82), ("Carol", 58)]
            .into_iter()
            .collect();
        GradebookReport::analyze(marks)
    }

    #[test]
    fn test_analyze_sample() {
        let report = sample();
        assert_eq!(report.summary.count, 3);
        assert!((report.summary.average - 78.333).abs() < 0.001);
        assert_eq!(report.summary.median, 82.0);
        assert_eq!(report.summary.max, 95);
        assert_eq!(report.summary.min, 58);
        assert_eq!(report.distribution.count(Grade::F), 1);
        assert_eq!(report.pass_fail.passed, vec!["Alice", "Bob", "Carol"]);
        assert!(report.pass_fail.failed.is_empty());
    }

    #[test]
    fn test_render_summary_lines() {
        let text = sample().render_summary();
        assert!(text.contains("Total Students: 3"));
        assert!(text.contains("Average Score:  78.33"));
        assert!(text.contains("Median Score:   82.0"));
        assert!(text.contains("Grade A: 1 students (33.3%)"));
        assert!(text.contains("Grade C: 0 students (0.0%)"));
        assert!(text.contains("Total Passed (>= 40): 3"));
        assert!(text.contains("Failed Students:\nNone\n"));
    }

    #[test]
    fn test_render_failed_names_joined() {
        let marks: Dataset<u8> = [("Zed", 10), ("Amy", 20), ("Kim", 90)]
            .into_iter()
            .collect();
        let text = GradebookReport::analyze(marks).render_summary();
        assert!(text.contains("Failed Students:\nZed, Amy\n"));
    }

    #[test]
    fn test_render_table_sorted_by_name() {
        let marks: Dataset<u8> = [("Carol", 58), ("Alice", 95)].into_iter().collect();
        let table = GradebookReport::analyze(marks).render_table();
        let rows: Vec<_> = table.lines().filter(|l| l.starts_with(['A', 'C'])).collect();
        assert_eq!(rows[0], format!("{:<15}{:<10}{:<5}", "Alice", 95, "A"));
        assert_eq!(rows[1], format!("{:<15}{:<10}{:<5}", "Carol", 58, "F"));
    }

    #[test]
    fn test_empty_report() {
        let report = GradebookReport::analyze(Dataset::new());
        assert!(report.render_summary().contains("No student data to analyze."));
        assert!(report.render_table().is_empty());
    }
}
