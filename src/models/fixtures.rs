//! Example exams present on the dashboard at startup

use super::exam::{Exam, ExamStatus};

/// The two exams the dashboard starts with. Neither carries questions.
pub fn seed_exams() -> Vec<Exam> {
    vec![
        Exam {
            id: "EX001".to_string(),
            exam_number: "MATH-2024-001".to_string(),
            title: "Mathematics Final Exam".to_string(),
            date: "2024-01-15".to_string(),
            status: ExamStatus::Completed,
            question_count: 25,
            answers_uploaded: 3,
            question_paper: None,
            answer_sheets: Vec::new(),
            questions: None,
        },
        Exam {
            id: "EX002".to_string(),
            exam_number: "PHYS-2024-002".to_string(),
            title: "Physics Midterm".to_string(),
            date: "2024-01-20".to_string(),
            status: ExamStatus::InProgress,
            question_count: 20,
            answers_uploaded: 1,
            question_paper: None,
            answer_sheets: Vec::new(),
            questions: None,
        },
    ]
}
