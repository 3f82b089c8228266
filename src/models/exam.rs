//! Exam data models
//!
//! Contains the exam record, its synthesized questions and the per-student
//! answers shown by the viewer.

use serde::{Deserialize, Serialize};

/// Exam lifecycle status as shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExamStatus {
    /// Grading finished, results ready for review
    Completed,
    /// Answer sheets still being graded
    InProgress,
    /// Any other status value
    #[default]
    #[serde(other)]
    Draft,
}

impl ExamStatus {
    /// Status label as displayed and serialized
    pub fn label(&self) -> &'static str {
        match self {
            ExamStatus::Completed => "completed",
            ExamStatus::InProgress => "in-progress",
            ExamStatus::Draft => "draft",
        }
    }

    /// Display band used to colour the status badge
    pub fn band(&self) -> ScoreBand {
        match self {
            ExamStatus::Completed => ScoreBand::Excellent,
            ExamStatus::InProgress => ScoreBand::Average,
            ExamStatus::Draft => ScoreBand::Poor,
        }
    }
}

impl std::fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Qualitative band a score falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Average,
    Poor,
}

impl ScoreBand {
    /// Classify a score out of ten
    pub fn for_score(score: u32) -> Self {
        if score >= 8 {
            ScoreBand::Excellent
        } else if score >= 6 {
            ScoreBand::Good
        } else if score >= 4 {
            ScoreBand::Average
        } else {
            ScoreBand::Poor
        }
    }
}

/// One student's graded response to a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub student_id: String,
    pub answer: String,
    pub score: u32,
    pub explanation: String,
}

/// A graded item within an exam
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// 1-based, unique within the exam
    pub id: u32,
    pub text: String,
    pub answer_key: String,
    pub answers: Vec<Answer>,
}

impl Question {
    /// Score of the student at `student_index`, 0 when the answer is missing
    pub fn score_for(&self, student_index: usize) -> u32 {
        self.answers
            .get(student_index)
            .map(|answer| answer.score)
            .unwrap_or(0)
    }

    /// Mean score over this question's answers, 0.0 with no answers
    pub fn mean_score(&self) -> f64 {
        if self.answers.is_empty() {
            return 0.0;
        }
        let total: u32 = self.answers.iter().map(|a| a.score).sum();
        total as f64 / self.answers.len() as f64
    }
}

/// A gradable assessment record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: String,
    pub exam_number: String,
    pub title: String,
    /// ISO date, `YYYY-MM-DD`
    pub date: String,
    pub status: ExamStatus,
    pub question_count: u32,
    pub answers_uploaded: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_paper: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answer_sheets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,
}

impl Exam {
    /// Synthesized questions, empty when the exam has none
    pub fn questions(&self) -> &[Question] {
        self.questions.as_deref().unwrap_or(&[])
    }

    /// Look up a question by its id
    pub fn question(&self, id: u32) -> Option<&Question> {
        self.questions().iter().find(|q| q.id == id)
    }

    /// One-line description used in logs
    pub fn summary(&self) -> String {
        format!(
            "{} [{}] {} - {} questions, {} answer sheets",
            self.id, self.exam_number, self.title, self.question_count, self.answers_uploaded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(score: u32) -> Answer {
        Answer {
            student_id: "Student 1".to_string(),
            answer: "42".to_string(),
            score,
            explanation: "ok".to_string(),
        }
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::for_score(10), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_score(8), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_score(7), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(6), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(5), ScoreBand::Average);
        assert_eq!(ScoreBand::for_score(4), ScoreBand::Average);
        assert_eq!(ScoreBand::for_score(3), ScoreBand::Poor);
        assert_eq!(ScoreBand::for_score(0), ScoreBand::Poor);
    }

    #[test]
    fn test_status_bands() {
        assert_eq!(ExamStatus::Completed.band(), ScoreBand::Excellent);
        assert_eq!(ExamStatus::InProgress.band(), ScoreBand::Average);
        assert_eq!(ExamStatus::Draft.band(), ScoreBand::Poor);
    }

    #[test]
    fn test_score_for_out_of_range_is_zero() {
        let question = Question {
            id: 1,
            text: String::new(),
            answer_key: String::new(),
            answers: vec![answer(7)],
        };
        assert_eq!(question.score_for(0), 7);
        assert_eq!(question.score_for(1), 0);
        assert_eq!(question.score_for(99), 0);
    }

    #[test]
    fn test_mean_score_without_answers() {
        let question = Question {
            id: 1,
            text: String::new(),
            answer_key: String::new(),
            answers: Vec::new(),
        };
        assert_eq!(question.mean_score(), 0.0);
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&ExamStatus::InProgress).unwrap(), "\"in-progress\"");
        let parsed: ExamStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(parsed, ExamStatus::Draft);
    }

    #[test]
    fn test_exam_field_names() {
        let exam = Exam {
            id: "EX9".to_string(),
            exam_number: "N-1".to_string(),
            title: "T".to_string(),
            date: "2024-02-01".to_string(),
            status: ExamStatus::Completed,
            question_count: 12,
            answers_uploaded: 1,
            question_paper: Some("paper.pdf".to_string()),
            answer_sheets: vec!["a.pdf".to_string()],
            questions: Some(vec![Question {
                id: 1,
                text: "q".to_string(),
                answer_key: "k".to_string(),
                answers: vec![answer(9)],
            }]),
        };
        let json = serde_json::to_value(&exam).unwrap();
        assert_eq!(json["examNumber"], "N-1");
        assert_eq!(json["answersUploaded"], 1);
        assert_eq!(json["questions"][0]["answerKey"], "k");
        assert_eq!(json["questions"][0]["answers"][0]["studentId"], "Student 1");

        let back: Exam = serde_json::from_value(json).unwrap();
        assert_eq!(back, exam);
    }
}
