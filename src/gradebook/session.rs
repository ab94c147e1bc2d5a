//! Interactive gradebook session: gather marks, report, repeat.

use std::path::Path;

use tracing::{error, info, instrument, warn};

use crate::console::Prompter;
use crate::dataset::Dataset;
use crate::error::{Result, TallyError};
use crate::gradebook::import::{MarkError, load_csv, parse_mark};
use crate::gradebook::report::GradebookReport;

/// What the user picked after a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    Continue,
    Exit,
}

/// Prompts for names and marks until the name `done` is entered.
pub fn manual_input<P: Prompter>(prompter: &mut P) -> Result<Dataset<u8>> {
    prompter.say("\n--- Manual Data Entry ---")?;
    let mut marks = Dataset::new();

    loop {
        let name = prompter.ask("Enter student name (or 'done' to finish): ")?;
        if name.eq_ignore_ascii_case("done") {
            break;
        }

        let answer = prompter.ask(&format!("Enter mark for {name} (0-100): "))?;
        match parse_mark(&answer) {
            Ok(mark) => {
                marks.insert(name, mark);
            }
            Err(MarkError::OutOfRange) => {
                warn!(name = %name, answer = %answer, "Mark out of range");
                prompter.say("Mark must be between 0 and 100. Please try again.")?;
            }
            Err(MarkError::NotWhole) => {
                warn!(name = %name, answer = %answer, "Mark is not a whole number");
                prompter.say("Invalid input for mark. Please enter a whole number.")?;
            }
        }
    }

    Ok(marks)
}

/// Loads marks from `path`, printing skipped rows. A missing or unreadable
/// file yields an empty dataset.
pub fn import_marks<P: Prompter>(prompter: &mut P, path: &Path) -> Result<Dataset<u8>> {
    match load_csv(path) {
        Ok(import) => {
            for skipped in &import.skipped {
                prompter.say(&skipped.to_string())?;
            }
            if let Some(e) = &import.read_error {
                prompter.say(&format!(
                    "\nAn error occurred while reading the CSV file: {e}"
                ))?;
            }
            Ok(import.marks)
        }
        Err(TallyError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            error!(path = %path.display(), "CSV file not found");
            prompter.say(&format!("\nError: File not found at {}", path.display()))?;
            Ok(Dataset::new())
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "CSV file could not be read");
            prompter.say(&format!(
                "\nAn error occurred while reading the CSV file: {e}"
            ))?;
            Ok(Dataset::new())
        }
    }
}

/// Asks for manual entry or CSV import and returns the resulting marks.
pub fn get_data_from_user<P: Prompter>(prompter: &mut P) -> Result<Dataset<u8>> {
    prompter.say("\nSelect input method:")?;
    prompter.say("1: Manual entry of student names and marks")?;
    prompter.say("2: Load from a .csv file")?;

    loop {
        match prompter.ask("Enter choice (1 or 2): ")?.as_str() {
            "1" => return manual_input(prompter),
            "2" => {
                let path = prompter.ask("Enter the path to the CSV file (e.g., marks.csv): ")?;
                return import_marks(prompter, Path::new(&path));
            }
            other => {
                warn!(choice = other, "Invalid input method");
                prompter.say("Invalid choice. Please enter 1 or 2.")?;
            }
        }
    }
}

pub fn ask_next_step<P: Prompter>(prompter: &mut P) -> Result<NextStep> {
    prompter.say("\nWhat would you like to do next?")?;
    prompter.say("1: Analyze another set of grades")?;
    prompter.say("2: Exit the program")?;

    match prompter.ask("Enter choice (1 or 2): ")?.as_str() {
        "2" => Ok(NextStep::Exit),
        "1" => Ok(NextStep::Continue),
        other => {
            warn!(choice = other, "Unrecognised menu choice, continuing");
            prompter.say("Invalid choice. Continuing analysis...")?;
            Ok(NextStep::Continue)
        }
    }
}

/// Runs analysis rounds until the user exits. Returns the reports produced.
///
/// `on_report` is called with each finished report, which lets the caller
/// emit extra output such as JSON.
#[instrument(skip_all)]
pub fn run<P, F>(prompter: &mut P, mut on_report: F) -> Result<Vec<GradebookReport>>
where
    P: Prompter,
    F: FnMut(&GradebookReport) -> Result<()>,
{
    let banner = "=".repeat(50);
    prompter.say(&banner)?;
    prompter.say("  Welcome to the GradeBook Analyzer CLI! ")?;
    prompter.say(&banner)?;

    let mut reports = Vec::new();
    let mut round = 0usize;

    loop {
        round += 1;
        let marks = get_data_from_user(prompter)?;
        info!(round, students = marks.len(), "Marks collected");

        if !marks.is_empty() {
            let report = GradebookReport::analyze(marks);
            prompter.say(report.render_summary().trim_end())?;
            prompter.say(report.render_table().trim_end())?;
            on_report(&report)?;
            reports.push(report);
        }

        if ask_next_step(prompter)? == NextStep::Exit {
            prompter.say("\nThank you for using the GradeBook Analyzer. Goodbye!")?;
            break;
        }
    }

    info!(rounds = round, "Gradebook session finished");
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::LinePrompter;

    fn scripted(input: &str) -> LinePrompter<&[u8], Vec<u8>> {
        LinePrompter::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn test_manual_input_rejects_bad_marks() {
        let mut p = scripted("Alice\n95\nBob\nabc\nBob\n101\nBob\n82\nDONE\n");
        let marks = manual_input(&mut p).unwrap();

        assert_eq!(marks.len(), 2);
        assert_eq!(marks.get("Bob"), Some(82));

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("Invalid input for mark. Please enter a whole number."));
        assert!(out.contains("Mark must be between 0 and 100. Please try again."));
    }

    #[test]
    fn test_manual_input_huge_mark_is_out_of_range() {
        let mut p = scripted("Big\n99999999999999999999\ndone\n");
        let marks = manual_input(&mut p).unwrap();
        assert!(marks.is_empty());

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("Mark must be between 0 and 100. Please try again."));
        assert!(!out.contains("Invalid input for mark"));
    }

    #[test]
    fn test_manual_input_duplicate_overwrites() {
        let mut p = scripted("Alice\n50\nAlice\n70\ndone\n");
        let marks = manual_input(&mut p).unwrap();
        assert_eq!(marks.len(), 1);
        assert_eq!(marks.get("Alice"), Some(70));
    }

    #[test]
    fn test_missing_csv_yields_empty_dataset() {
        let mut p = scripted("");
        let marks = import_marks(&mut p, Path::new("/nonexistent/tally/marks.csv")).unwrap();
        assert!(marks.is_empty());

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("Error: File not found at /nonexistent/tally/marks.csv"));
    }

    #[test]
    fn test_csv_read_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marks.csv");
        std::fs::write(&path, b"Alice,90\nBob,80\n\xff\xfe,70\nCarol,60\n").unwrap();

        let mut p = scripted("");
        let marks = import_marks(&mut p, &path).unwrap();
        assert_eq!(marks.len(), 2);
        assert_eq!(marks.get("Carol"), None);

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("An error occurred while reading the CSV file: "));
    }

    #[test]
    fn test_input_method_reprompts() {
        let mut p = scripted("3\n1\ndone\n");
        let marks = get_data_from_user(&mut p).unwrap();
        assert!(marks.is_empty());

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("Invalid choice. Please enter 1 or 2."));
    }

    #[test]
    fn test_next_step_unknown_continues() {
        let mut p = scripted("maybe\n");
        assert_eq!(ask_next_step(&mut p).unwrap(), NextStep::Continue);

        let mut p = scripted("2\n");
        assert_eq!(ask_next_step(&mut p).unwrap(), NextStep::Exit);
    }

    #[test]
    fn test_run_two_rounds() {
        let mut p = scripted("1\nAlice\n95\ndone\nx\n1\ndone\n2\n");
        let mut seen = 0;
        let reports = run(&mut p, |_| {
            seen += 1;
            Ok(())
        })
        .unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(seen, 1);
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("Invalid choice. Continuing analysis..."));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_run_stops_when_input_closes() {
        let mut p = scripted("1\n");
        assert!(matches!(
            run(&mut p, |_| Ok(())),
            Err(TallyError::InputClosed)
        ));
    }
}
