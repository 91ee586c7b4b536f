//! Code prettification through external formatters.
//!
//! Exposed as a capability trait so the implementation can be swapped
//! (in-process library vs. subprocess) without touching the core.

use std::process::Command;

use crate::collab::run_with_stdin;
use crate::error::{Error, Result};
use crate::models::Language;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatOutcome {
    /// The formatter produced a different text.
    Formatted(String),
    /// The formatter ran but the code was already in shape.
    Unchanged,
    /// No prettifier is configured for this language. A status message, not
    /// an error.
    Unsupported,
}

pub trait Formatter {
    fn format(&self, language: Language, code: &str) -> Result<FormatOutcome>;
}

/// One external formatter per language family: `black` for Python,
/// `prettier` for the web languages. Everything else is unsupported.
#[derive(Debug, Default)]
pub struct ExternalFormatter;

impl Formatter for ExternalFormatter {
    fn format(&self, language: Language, code: &str) -> Result<FormatOutcome> {
        let mut command = match language {
            Language::Python => {
                let mut cmd = Command::new("black");
                cmd.args(["-q", "-"]);
                cmd
            }
            Language::Javascript => prettier("babel"),
            Language::Html => prettier("html"),
            Language::Css => prettier("css"),
            Language::Sql | Language::Bash | Language::Text => {
                return Ok(FormatOutcome::Unsupported);
            }
        };
        command.env("NO_COLOR", "1");

        let output = run_with_stdin(command, code)?;
        let formatted = String::from_utf8(output.stdout)
            .map_err(|_| Error::collaborator(language.as_str(), "formatter produced non-UTF-8 output"))?;

        if formatted.is_empty() || formatted == code {
            Ok(FormatOutcome::Unchanged)
        } else {
            Ok(FormatOutcome::Formatted(formatted))
        }
    }
}

fn prettier(parser: &str) -> Command {
    let mut cmd = Command::new("prettier");
    cmd.args(["--parser", parser]);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_bash_and_text_are_unsupported() {
        let formatter = ExternalFormatter;
        for language in [Language::Sql, Language::Bash, Language::Text] {
            let outcome = formatter.format(language, "select 1").unwrap();
            assert_eq!(outcome, FormatOutcome::Unsupported);
        }
    }
}
