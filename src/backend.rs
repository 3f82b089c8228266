//! Grading backend abstraction
//!
//! The view layer talks to an [`GradingBackend`] for every slow operation:
//! uploading a submission, processing it into a graded exam, and the two
//! recalculation actions. [`SimulatedBackend`] stands in for the real service
//! with fixed delays and synthesized results.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use tokio::time::sleep;

use crate::config::SimulationConfig;
use crate::generator::ExamSynthesizer;
use crate::models::{Exam, ExamDraft};
use crate::{ExamError, Result};

/// Asynchronous operations behind the exam workflow
#[async_trait]
pub trait GradingBackend: Send + Sync {
    /// Transfer the question paper and answer sheets
    async fn upload(&self, draft: &ExamDraft) -> Result<()>;

    /// Grade an uploaded submission into a finished exam
    async fn process(&self, draft: &ExamDraft) -> Result<Exam>;

    /// Recalculate every question of an exam
    async fn recalculate_all(&self, exam_id: &str) -> Result<()>;

    /// Recalculate a single question
    async fn recalculate_question(&self, exam_id: &str, question_id: u32) -> Result<()>;
}

/// Timer-driven backend producing mock grading results
#[derive(Debug)]
pub struct SimulatedBackend<R> {
    timings: SimulationConfig,
    synthesizer: Mutex<ExamSynthesizer<R>>,
}

impl<R: Rng + Send> SimulatedBackend<R> {
    pub fn new(timings: SimulationConfig, synthesizer: ExamSynthesizer<R>) -> Self {
        Self {
            timings,
            synthesizer: Mutex::new(synthesizer),
        }
    }

    pub fn timings(&self) -> &SimulationConfig {
        &self.timings
    }
}

#[async_trait]
impl<R: Rng + Send> GradingBackend for SimulatedBackend<R> {
    async fn upload(&self, draft: &ExamDraft) -> Result<()> {
        tracing::debug!(
            paper = %draft.question_paper.name,
            sheets = draft.answer_sheets.len(),
            "simulating upload"
        );
        sleep(self.timings.upload_delay()).await;
        Ok(())
    }

    async fn process(&self, draft: &ExamDraft) -> Result<Exam> {
        sleep(self.timings.processing_delay()).await;
        let mut synthesizer = self
            .synthesizer
            .lock()
            .map_err(|_| ExamError::Processing("mock data generator poisoned".to_string()))?;
        Ok(synthesizer.synthesize(draft, Utc::now()))
    }

    async fn recalculate_all(&self, exam_id: &str) -> Result<()> {
        tracing::debug!(exam_id, "simulating full recalculation");
        sleep(self.timings.recalculate_all_delay()).await;
        Ok(())
    }

    async fn recalculate_question(&self, exam_id: &str, question_id: u32) -> Result<()> {
        tracing::debug!(exam_id, question_id, "simulating question recalculation");
        sleep(self.timings.recalculate_question_delay()).await;
        Ok(())
    }
}
