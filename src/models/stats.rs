//! Aggregate statistics for the dashboard and the exam viewer
//!
//! All values are derived on demand from the in-memory exams; nothing here
//! caches or mutates scores.

use super::exam::{Exam, ExamStatus, Question};
use crate::MAX_SCORE;

/// Summary cards on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardSummary {
    pub total_exams: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub total_answers: u32,
}

impl DashboardSummary {
    /// Summarize a list of exams
    pub fn from_exams(exams: &[Exam]) -> Self {
        Self {
            total_exams: exams.len(),
            completed: exams
                .iter()
                .filter(|e| e.status == ExamStatus::Completed)
                .count(),
            in_progress: exams
                .iter()
                .filter(|e| e.status == ExamStatus::InProgress)
                .count(),
            total_answers: exams.iter().map(|e| e.answers_uploaded).sum(),
        }
    }
}

/// Stats row shown at the top of the exam viewer
#[derive(Debug, Clone, PartialEq)]
pub struct ExamStats {
    pub question_total: usize,
    pub student_count: u32,
    /// Mean of per-question means, rounded to one decimal
    pub average_score: f64,
    pub total_points: u32,
}

impl ExamStats {
    /// Compute viewer stats for an exam
    pub fn for_exam(exam: &Exam) -> Self {
        let questions = exam.questions();
        Self {
            question_total: questions.len(),
            student_count: exam.answers_uploaded,
            average_score: average_score(questions),
            total_points: questions.len() as u32 * MAX_SCORE,
        }
    }

    /// Average score formatted to one decimal place
    pub fn average_display(&self) -> String {
        format!("{:.1}", self.average_score)
    }
}

/// Mean over all per-question mean scores, rounded to one decimal.
///
/// Returns 0.0 when there are no questions.
pub fn average_score(questions: &[Question]) -> f64 {
    if questions.is_empty() {
        return 0.0;
    }
    let sum: f64 = questions.iter().map(Question::mean_score).sum();
    let mean = sum / questions.len() as f64;
    (mean * 10.0).round() / 10.0
}

/// One row of the results matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
    pub label: String,
    pub scores: Vec<u32>,
    pub total: u32,
}

/// Student-by-question score table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsMatrix {
    pub question_ids: Vec<u32>,
    pub rows: Vec<StudentRow>,
}

impl ResultsMatrix {
    /// Build the matrix: one row per uploaded answer sheet, one column per
    /// question. Missing answers count as 0.
    pub fn for_exam(exam: &Exam) -> Self {
        let questions = exam.questions();
        let rows = (0..exam.answers_uploaded as usize)
            .map(|student| {
                let scores: Vec<u32> = questions.iter().map(|q| q.score_for(student)).collect();
                StudentRow {
                    label: format!("Student {}", student + 1),
                    total: scores.iter().sum(),
                    scores,
                }
            })
            .collect();

        Self {
            question_ids: questions.iter().map(|q| q.id).collect(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.question_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::exam::Answer;
    use crate::models::fixtures::seed_exams;

    fn question(id: u32, scores: &[u32]) -> Question {
        Question {
            id,
            text: format!("Question {}", id),
            answer_key: String::new(),
            answers: scores
                .iter()
                .enumerate()
                .map(|(i, &score)| Answer {
                    student_id: format!("Student {}", i + 1),
                    answer: String::new(),
                    score,
                    explanation: String::new(),
                })
                .collect(),
        }
    }

    fn exam_with(questions: Vec<Question>, answers_uploaded: u32) -> Exam {
        Exam {
            questions: Some(questions),
            answers_uploaded,
            ..seed_exams().remove(0)
        }
    }

    #[test]
    fn test_average_score_empty() {
        assert_eq!(average_score(&[]), 0.0);
        let stats = ExamStats::for_exam(&seed_exams()[0]);
        assert_eq!(stats.average_display(), "0.0");
        assert_eq!(stats.total_points, 0);
    }

    #[test]
    fn test_average_of_question_means() {
        // means: 7.0 and 4.5 -> 5.75 -> 5.8
        let questions = vec![question(1, &[6, 8]), question(2, &[4, 5])];
        assert_eq!(average_score(&questions), 5.8);
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        // means: 10/3 and 1 -> 2.1666 -> 2.2
        let questions = vec![question(1, &[3, 3, 4]), question(2, &[1, 1, 1])];
        let stats = ExamStats::for_exam(&exam_with(questions, 3));
        assert_eq!(stats.average_display(), "2.2");
        assert_eq!(stats.question_total, 2);
        assert_eq!(stats.student_count, 3);
        assert_eq!(stats.total_points, 20);
    }

    #[test]
    fn test_matrix_falls_back_to_zero() {
        let questions = vec![question(1, &[9, 4, 2]), question(2, &[5])];
        let matrix = ResultsMatrix::for_exam(&exam_with(questions, 3));

        assert_eq!(matrix.question_ids, vec![1, 2]);
        assert_eq!(matrix.rows.len(), 3);
        assert_eq!(matrix.rows[0].scores, vec![9, 5]);
        assert_eq!(matrix.rows[0].total, 14);
        assert_eq!(matrix.rows[1].scores, vec![4, 0]);
        assert_eq!(matrix.rows[1].total, 4);
        assert_eq!(matrix.rows[2].label, "Student 3");
        assert_eq!(matrix.rows[2].total, 2);
    }

    #[test]
    fn test_matrix_without_questions() {
        let matrix = ResultsMatrix::for_exam(&seed_exams()[0]);
        assert!(matrix.is_empty());
        assert_eq!(matrix.rows.len(), 3);
        assert!(matrix.rows.iter().all(|r| r.total == 0));
    }

    #[test]
    fn test_dashboard_summary() {
        let summary = DashboardSummary::from_exams(&seed_exams());
        assert_eq!(
            summary,
            DashboardSummary {
                total_exams: 2,
                completed: 1,
                in_progress: 1,
                total_answers: 4,
            }
        );
        assert_eq!(DashboardSummary::from_exams(&[]), DashboardSummary::default());
    }
}
