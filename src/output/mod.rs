//! Report rendering for an application summary
//!
//! Every strategy is a pure function from the summary to text. Problems that
//! only affect presentation are reported inline in red and never abort.

pub mod pretty;
pub mod raw;
pub mod table;

use crate::collector::ApplicationSummary;
use colored::Colorize;
use std::str::FromStr;
use thiserror::Error;

/// Presentation failures that are shown to the user and then skipped
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("Output type not recognised: {0}")]
    UnknownOutput(String),

    #[error("missing field `{0}`")]
    MissingField(&'static str),
}

/// Supported `--output` values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Raw,
    Json,
    Pretty,
}

impl FromStr for OutputMode {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputMode::Table),
            "raw" => Ok(OutputMode::Raw),
            "json" => Ok(OutputMode::Json),
            "pretty" => Ok(OutputMode::Pretty),
            _ => Err(RenderError::UnknownOutput(s.to_string())),
        }
    }
}

/// Render the summary in one mode
pub fn render(summary: &ApplicationSummary, mode: OutputMode, verbose: bool) -> String {
    match mode {
        OutputMode::Table => table::render(summary, verbose),
        OutputMode::Raw => raw::render(summary),
        OutputMode::Json => raw::render_json(summary),
        OutputMode::Pretty => pretty::render(summary, verbose),
    }
}

/// Parse `output` and render, or produce the one-line error for an unknown mode
pub fn report_text(summary: &ApplicationSummary, output: &str, verbose: bool) -> String {
    match output.parse::<OutputMode>() {
        Ok(mode) => render(summary, mode, verbose),
        Err(e) => error_line(&e.to_string()),
    }
}

/// Print the report to stdout
pub fn report(summary: &ApplicationSummary, output: &str, verbose: bool) {
    print!("{}", report_text(summary, output, verbose));
}

pub(crate) fn error_line(message: &str) -> String {
    format!("{}\n", message.red())
}
