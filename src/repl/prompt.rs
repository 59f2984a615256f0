//! Line and yes/no prompts for the session loop.

use anyhow::{Context, Result};
use inquire::ui::{Attributes, Color, RenderConfig, Styled};
use inquire::{Confirm, Text};
use std::io::{self, BufRead};

use crate::output;
use crate::ui::is_prompt_cancelled;

/// Source of user answers.
pub trait Prompter {
    /// Reads one line. `None` means the user closed the input.
    fn read_line(&mut self, message: &str) -> Result<Option<String>>;

    /// Asks a yes/no question; closed input counts as "no".
    fn confirm(&mut self, message: &str) -> Result<bool>;
}

/// Interactive prompts for a terminal.
pub struct InquirePrompter {
    render_config: RenderConfig<'static>,
}

impl Default for InquirePrompter {
    fn default() -> Self {
        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);
        Self { render_config }
    }
}

impl Prompter for InquirePrompter {
    fn read_line(&mut self, message: &str) -> Result<Option<String>> {
        match Text::new(message)
            .with_render_config(self.render_config)
            .prompt()
        {
            Ok(line) => Ok(Some(line)),
            Err(e) if is_prompt_cancelled(&e) => {
                println!(); // Clear line before goodbye message
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        match Confirm::new(message)
            .with_render_config(self.render_config)
            .with_default(false)
            .prompt()
        {
            Ok(answer) => Ok(answer),
            Err(e) if is_prompt_cancelled(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Plain line-oriented prompts for piped input.
pub struct LinePrompter<R> {
    reader: R,
}

impl LinePrompter<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> LinePrompter<R> {
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> Prompter for LinePrompter<R> {
    fn read_line(&mut self, message: &str) -> Result<Option<String>> {
        print!("{message} ");
        output::flush_stdout();

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        let answer = self.read_line(&format!("{message} (yes/no):"))?;
        Ok(answer.is_some_and(|a| is_yes(&a)))
    }
}

/// Accepts `yes` and `y` in any case.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}
