//! Interactive stdin-backed implementation of the core [`Prompt`] trait.

use std::io::{self, BufRead, Write};

use marketlens_core::{Prompt, PromptError};

/// Reads prompt answers from standard input, one line per question.
pub struct ConsolePrompt;

impl ConsolePrompt {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ConsolePrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for ConsolePrompt {
    fn read_value(&self, label: &str) -> Result<f64, PromptError> {
        let line = self.read_line(label)?;
        line.trim()
            .parse::<f64>()
            .map_err(|_| PromptError::InvalidNumber {
                label: label.to_owned(),
                value: line,
            })
    }

    fn read_line(&self, label: &str) -> Result<String, PromptError> {
        print!("Enter {label}: ");
        io::stdout().flush()?;

        let mut buf = String::new();
        let read = io::stdin().lock().read_line(&mut buf)?;
        if read == 0 {
            return Err(PromptError::Closed {
                label: label.to_owned(),
            });
        }
        Ok(buf.trim().to_owned())
    }
}
