//! Mock exam synthesis
//!
//! Builds the finished exam record for a submission: question texts, answer
//! keys and one scored answer per uploaded answer sheet. Every random draw
//! goes through the injected [`Rng`], so a seeded or stepped source gives
//! reproducible exams.

use chrono::{DateTime, Utc};
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::models::{Answer, Exam, ExamDraft, ExamStatus, Question};
use crate::MAX_SCORE;

/// Smallest question count reported for a new exam
pub const MIN_QUESTION_COUNT: u32 = 10;
/// Width of the reported question-count range, `[10, 40)`
pub const QUESTION_COUNT_SPREAD: u32 = 30;
/// Width of the synthesized question-list range, `[10, 30)`
pub const GENERATED_QUESTION_SPREAD: u32 = 20;

const EXPLANATION: &str =
    "This answer demonstrates understanding of the concept with minor areas for improvement.";

/// Exam synthesizer over an injectable random source
#[derive(Debug)]
pub struct ExamSynthesizer<R> {
    rng: R,
}

impl ExamSynthesizer<SmallRng> {
    /// Synthesizer seeded from the OS, or from `seed` when given
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::new(rng)
    }
}

impl<R: Rng> ExamSynthesizer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Build the finished exam for a submission processed at `now`
    pub fn synthesize(&mut self, draft: &ExamDraft, now: DateTime<Utc>) -> Exam {
        let question_count = MIN_QUESTION_COUNT + self.rng.gen_range(0..QUESTION_COUNT_SPREAD);
        let questions = self.questions(draft.answer_sheets.len());

        Exam {
            id: exam_id(now),
            exam_number: draft.exam_number.clone(),
            title: draft.title.clone(),
            date: now.format("%Y-%m-%d").to_string(),
            status: ExamStatus::Completed,
            question_count,
            answers_uploaded: draft.answer_sheets.len() as u32,
            question_paper: Some(draft.question_paper.name.clone()),
            answer_sheets: draft.answer_sheet_names(),
            questions: Some(questions),
        }
    }

    /// Synthesize the question list, one answer per sheet.
    ///
    /// The list length is drawn independently of the exam's reported
    /// question count.
    pub fn questions(&mut self, sheet_count: usize) -> Vec<Question> {
        let count = MIN_QUESTION_COUNT + self.rng.gen_range(0..GENERATED_QUESTION_SPREAD);
        (1..=count)
            .map(|id| Question {
                id,
                text: format!(
                    "Question {}: This is a sample question that would be extracted from the uploaded question paper.",
                    id
                ),
                answers: (1..=sheet_count)
                    .map(|student| Answer {
                        student_id: format!("Student {}", student),
                        answer: format!("Sample answer {} from student {}", id, student),
                        score: self.rng.gen_range(1..=MAX_SCORE),
                        explanation: EXPLANATION.to_string(),
                    })
                    .collect(),
                answer_key: format!(
                    "Expected answer for question {} that serves as the grading reference.",
                    id
                ),
            })
            .collect()
    }
}

/// `EX` followed by the last six digits of the millisecond timestamp
pub fn exam_id(now: DateTime<Utc>) -> String {
    format!("EX{:06}", now.timestamp_millis().rem_euclid(1_000_000))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SelectedFile;
    use chrono::TimeZone;
    use rand::rngs::mock::StepRng;

    fn draft(sheets: usize) -> ExamDraft {
        ExamDraft {
            exam_number: "MATH-2024-001".to_string(),
            title: "Algebra Quiz".to_string(),
            question_paper: SelectedFile::from_path("paper.pdf"),
            answer_sheets: (1..=sheets)
                .map(|i| SelectedFile::from_path(format!("sheet{}.png", i)))
                .collect(),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_exam_id_uses_last_six_digits() {
        let now = Utc.timestamp_millis_opt(1_710_000_123_456).unwrap();
        assert_eq!(exam_id(now), "EX123456");
        let now = Utc.timestamp_millis_opt(1_700_000_000_042).unwrap();
        assert_eq!(exam_id(now), "EX000042");
    }

    #[test]
    fn test_zero_source_yields_minimums() {
        let mut synth = ExamSynthesizer::new(StepRng::new(0, 0));
        let exam = synth.synthesize(&draft(2), fixed_now());

        assert_eq!(exam.question_count, 10);
        assert_eq!(exam.questions().len(), 10);
        assert!(exam.questions().iter().flat_map(|q| &q.answers).all(|a| a.score == 1));
        assert_eq!(exam.date, "2024-03-09");
        assert_eq!(exam.status, ExamStatus::Completed);
    }

    #[test]
    fn test_synthesized_shape() {
        let mut synth = ExamSynthesizer::from_seed(Some(7));
        let exam = synth.synthesize(&draft(3), fixed_now());

        assert_eq!(exam.answers_uploaded, 3);
        assert!((10..40).contains(&exam.question_count));
        assert!((10..30).contains(&(exam.questions().len() as u32)));
        assert_eq!(exam.question_paper.as_deref(), Some("paper.pdf"));
        assert_eq!(exam.answer_sheets, vec!["sheet1.png", "sheet2.png", "sheet3.png"]);

        for (index, question) in exam.questions().iter().enumerate() {
            assert_eq!(question.id as usize, index + 1);
            assert_eq!(question.answers.len(), 3);
            assert!(question.text.starts_with(&format!("Question {}:", question.id)));
            for (student, answer) in question.answers.iter().enumerate() {
                assert!((1..=10).contains(&answer.score));
                assert_eq!(answer.student_id, format!("Student {}", student + 1));
                assert_eq!(
                    answer.answer,
                    format!("Sample answer {} from student {}", question.id, student + 1)
                );
            }
        }
    }

    #[test]
    fn test_same_seed_same_exam() {
        let a = ExamSynthesizer::from_seed(Some(2024)).synthesize(&draft(4), fixed_now());
        let b = ExamSynthesizer::from_seed(Some(2024)).synthesize(&draft(4), fixed_now());
        assert_eq!(a, b);
    }

    #[test]
    fn test_scores_cover_range_over_many_draws() {
        let mut synth = ExamSynthesizer::from_seed(Some(1));
        let questions = synth.questions(50);
        let scores: Vec<u32> = questions.iter().flat_map(|q| &q.answers).map(|a| a.score).collect();
        assert!(scores.iter().all(|s| (1..=10).contains(s)));
        assert!(scores.contains(&1));
        assert!(scores.contains(&10));
    }
}
