//! Background task management
//!
//! Spawns the slow backend operations as tokio tasks and streams their
//! outcome back to the UI loop over an unbounded channel. The UI never
//! awaits a task directly; it drains [`TaskEvent`]s once per tick.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::backend::GradingBackend;
use crate::models::{Exam, ExamDraft};

/// Outcome reported by a background task
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEvent {
    /// Upload phase finished, processing has started
    UploadFinished,
    /// Submission processed into a finished exam
    ExamReady(Exam),
    /// Upload or processing failed; no exam was created
    CreationFailed(String),
    /// Full recalculation finished
    AllRecalculated { exam_id: String },
    /// Single-question recalculation finished
    QuestionRecalculated { exam_id: String, question_id: u32 },
    /// A recalculation failed; `question_id` is unset for a full recalculation
    RecalculationFailed {
        exam_id: String,
        question_id: Option<u32>,
        message: String,
    },
}

/// Spawner for backend operations
#[derive(Clone)]
pub struct TaskRunner {
    backend: Arc<dyn GradingBackend>,
    events_tx: mpsc::UnboundedSender<TaskEvent>,
}

impl TaskRunner {
    /// Create a runner and the receiving end of its event stream
    pub fn new(backend: Arc<dyn GradingBackend>) -> (Self, mpsc::UnboundedReceiver<TaskEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        (Self { backend, events_tx }, events_rx)
    }

    /// Upload then process a submission
    pub fn spawn_creation(&self, draft: ExamDraft) -> JoinHandle<()> {
        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        tokio::spawn(async move { run_creation(backend.as_ref(), &draft, &tx).await })
    }

    pub fn spawn_recalculate_all(&self, exam_id: String) -> JoinHandle<()> {
        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = match backend.recalculate_all(&exam_id).await {
                Ok(()) => TaskEvent::AllRecalculated { exam_id },
                Err(e) => TaskEvent::RecalculationFailed {
                    exam_id,
                    question_id: None,
                    message: e.to_string(),
                },
            };
            send(&tx, event);
        })
    }

    pub fn spawn_recalculate_question(&self, exam_id: String, question_id: u32) -> JoinHandle<()> {
        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = match backend.recalculate_question(&exam_id, question_id).await {
                Ok(()) => TaskEvent::QuestionRecalculated {
                    exam_id,
                    question_id,
                },
                Err(e) => TaskEvent::RecalculationFailed {
                    exam_id,
                    question_id: Some(question_id),
                    message: e.to_string(),
                },
            };
            send(&tx, event);
        })
    }
}

/// Drive one submission through upload and processing, reporting each step.
///
/// Either phase failing reports a single `CreationFailed` and stops; no exam
/// is produced in that case.
pub async fn run_creation(
    backend: &dyn GradingBackend,
    draft: &ExamDraft,
    tx: &mpsc::UnboundedSender<TaskEvent>,
) {
    if let Err(e) = backend.upload(draft).await {
        tracing::error!("upload failed for {}: {}", draft.exam_number, e);
        send(tx, TaskEvent::CreationFailed(e.to_string()));
        return;
    }
    send(tx, TaskEvent::UploadFinished);

    match backend.process(draft).await {
        Ok(exam) => {
            tracing::info!("processed {}", exam.summary());
            send(tx, TaskEvent::ExamReady(exam));
        }
        Err(e) => {
            tracing::error!("processing failed for {}: {}", draft.exam_number, e);
            send(tx, TaskEvent::CreationFailed(e.to_string()));
        }
    }
}

fn send(tx: &mpsc::UnboundedSender<TaskEvent>, event: TaskEvent) {
    if tx.send(event).is_err() {
        // Receiver dropped, the UI has shut down
        tracing::debug!("task event dropped, receiver closed");
    }
}
