//! Line-oriented prompting.
//!
//! Sessions talk to the user through the [`Prompter`] trait. [`TermPrompter`]
//! drives a real terminal with `dialoguer`; [`LinePrompter`] reads answers
//! line by line from any reader, which covers piped stdin and tests.

use std::io::{BufRead, Write};
use std::str::FromStr;

use dialoguer::Input;

use crate::error::{Result, TallyError};

pub trait Prompter {
    /// Shows `prompt` and returns the trimmed answer.
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// Prints a line of output.
    fn say(&mut self, line: &str) -> Result<()>;

    /// Asks until the answer parses as `T`, printing `retry` after each failure.
    fn ask_parsed<T: FromStr>(&mut self, prompt: &str, retry: &str) -> Result<T>
    where
        Self: Sized,
    {
        loop {
            let answer = self.ask(prompt)?;
            match answer.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => {
                    tracing::debug!(answer = %answer, "Rejected answer");
                    self.say(retry)?;
                }
            }
        }
    }
}

/// Interactive terminal prompter backed by `dialoguer`.
#[derive(Default)]
pub struct TermPrompter;

impl Prompter for TermPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        let answer: String = Input::new()
            .with_prompt(prompt.trim_end_matches([':', ' ']))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| TallyError::Prompt(e.to_string()))?;
        Ok(answer.trim().to_string())
    }

    fn say(&mut self, line: &str) -> Result<()> {
        println!("{line}");
        Ok(())
    }
}

/// Prompter that reads one answer per line from `input` and echoes prompts to `output`.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(TallyError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }
}
