//! Exam creation form state
//!
//! Collects the exam metadata and file selections, validates a submission
//! and tracks the upload/processing phases of the action button.

use crate::models::{ExamDraft, SelectedFile};
use crate::notify::Notification;
use crate::{ExamError, MissingField, Result};

/// Progress of the upload-and-process action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreationPhase {
    #[default]
    Idle,
    Uploading,
    Processing,
}

impl CreationPhase {
    /// Label of the action button in this phase
    pub fn action_label(&self) -> &'static str {
        match self {
            CreationPhase::Idle => "Upload & Process Exam",
            CreationPhase::Uploading => "Uploading to storage...",
            CreationPhase::Processing => "Processing exam...",
        }
    }
}

/// Inputs of the creation screen
#[derive(Debug, Clone, Default)]
pub struct CreationForm {
    pub exam_number: String,
    pub exam_title: String,
    question_paper: Option<SelectedFile>,
    answer_sheets: Vec<SelectedFile>,
    phase: CreationPhase,
}

impl CreationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn question_paper(&self) -> Option<&SelectedFile> {
        self.question_paper.as_ref()
    }

    pub fn answer_sheets(&self) -> &[SelectedFile] {
        &self.answer_sheets
    }

    pub fn phase(&self) -> CreationPhase {
        self.phase
    }

    /// Whether an upload or processing step is outstanding
    pub fn is_busy(&self) -> bool {
        self.phase != CreationPhase::Idle
    }

    /// Whether the upload summary and action button are shown
    pub fn has_files(&self) -> bool {
        self.question_paper.is_some() && !self.answer_sheets.is_empty()
    }

    /// Record a question-paper pick; the first file wins.
    ///
    /// An empty pick leaves the current selection and reports nothing.
    pub fn select_question_paper(&mut self, files: Vec<SelectedFile>) -> Option<Notification> {
        let file = files.into_iter().next()?;
        let notification = Notification::question_paper_selected(&file.name);
        self.question_paper = Some(file);
        Some(notification)
    }

    /// Replace the answer-sheet selection, even with an empty pick
    pub fn select_answer_sheets(&mut self, files: Vec<SelectedFile>) -> Notification {
        let notification = Notification::answer_sheets_selected(files.len());
        self.answer_sheets = files;
        notification
    }

    /// Inputs still missing for a submission, in form order
    pub fn missing_fields(&self) -> Vec<MissingField> {
        let mut missing = Vec::new();
        if self.exam_number.is_empty() {
            missing.push(MissingField::ExamNumber);
        }
        if self.exam_title.is_empty() {
            missing.push(MissingField::ExamTitle);
        }
        if self.question_paper.is_none() {
            missing.push(MissingField::QuestionPaper);
        }
        if self.answer_sheets.is_empty() {
            missing.push(MissingField::AnswerSheets);
        }
        missing
    }

    /// Build the submission from the current inputs
    pub fn validate(&self) -> Result<ExamDraft> {
        let missing = self.missing_fields();
        match &self.question_paper {
            Some(paper) if missing.is_empty() => Ok(ExamDraft {
                exam_number: self.exam_number.clone(),
                title: self.exam_title.clone(),
                question_paper: paper.clone(),
                answer_sheets: self.answer_sheets.clone(),
            }),
            _ => Err(ExamError::MissingFields(missing)),
        }
    }

    /// Start a submission.
    ///
    /// Returns `Ok(None)` while a previous submission is still in flight,
    /// `Err(MissingFields)` without touching any state when inputs are
    /// missing, and otherwise moves to the uploading phase.
    pub fn submit(&mut self) -> Result<Option<ExamDraft>> {
        if self.is_busy() {
            return Ok(None);
        }
        let draft = self.validate()?;
        self.phase = CreationPhase::Uploading;
        Ok(Some(draft))
    }

    /// Upload done, processing started
    pub fn upload_finished(&mut self) {
        if self.phase == CreationPhase::Uploading {
            self.phase = CreationPhase::Processing;
        }
    }

    /// Submission finished, successfully or not
    pub fn finish(&mut self) {
        self.phase = CreationPhase::Idle;
    }
}
