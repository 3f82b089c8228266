//! Exam Checker
//!
//! A terminal dashboard for an exam-grading workflow: create an exam from a
//! question paper and a stack of answer sheets, then review simulated
//! per-question, per-student scores.

use thiserror::Error;

pub mod app;
pub mod backend;
pub mod config;
pub mod generator;
pub mod models;
pub mod notify;
pub mod tasks;

/// Required exam-creation inputs that can be missing at submit time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    ExamNumber,
    ExamTitle,
    QuestionPaper,
    AnswerSheets,
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MissingField::ExamNumber => "exam number",
            MissingField::ExamTitle => "exam title",
            MissingField::QuestionPaper => "question paper",
            MissingField::AnswerSheets => "answer sheets",
        };
        f.write_str(label)
    }
}

// Common error types
#[derive(Debug, Error)]
pub enum ExamError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration validation or parsing error
    #[error("Configuration error: {0}")]
    Config(String),
    /// Submission is missing required inputs
    #[error("Missing information: {}", join_fields(.0))]
    MissingFields(Vec<MissingField>),
    /// Simulated upload failed
    #[error("Upload failed: {0}")]
    Upload(String),
    /// Simulated processing failed
    #[error("Processing failed: {0}")]
    Processing(String),
    /// Simulated recalculation failed
    #[error("Recalculation failed: {0}")]
    Recalculation(String),
    /// Background task could not report back
    #[error("Task error: {0}")]
    Task(String),
    /// TUI rendering or interaction error
    #[error("TUI error: {0}")]
    Tui(String),
}

fn join_fields(fields: &[MissingField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<toml::de::Error> for ExamError {
    fn from(err: toml::de::Error) -> Self {
        ExamError::Config(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for ExamError {
    fn from(err: toml::ser::Error) -> Self {
        ExamError::Config(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for exam-checker operations
pub type Result<T> = std::result::Result<T, ExamError>;

// Common types and constants
pub const APP_NAME: &str = "exam-checker";
pub const CONFIG_FILE: &str = "exam-checker.toml";
pub const LOG_FILE: &str = "exam-checker.log";
/// Points awarded for a perfect answer to one question
pub const MAX_SCORE: u32 = 10;
/// File extensions the file picker offers
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message() {
        let err = ExamError::MissingFields(vec![MissingField::ExamTitle, MissingField::AnswerSheets]);
        assert_eq!(err.to_string(), "Missing information: exam title, answer sheets");
    }

    #[test]
    fn test_io_error_conversion() {
        let err: ExamError = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert!(matches!(err, ExamError::Io(_)));
        assert!(err.to_string().contains("boom"));
    }
}
