//! Data models module
//!
//! Contains the exam records, file selections, startup fixtures and the
//! statistics derived from them.

pub mod exam;
pub mod fixtures;
pub mod stats;
pub mod upload;

// Re-export commonly used types
pub use exam::{Answer, Exam, ExamStatus, Question, ScoreBand};
pub use fixtures::seed_exams;
pub use stats::{average_score, DashboardSummary, ExamStats, ResultsMatrix, StudentRow};
pub use upload::{ExamDraft, SelectedFile};
