//! Integration tests for dashboard navigation and the exam store

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use exam_checker::app::{Router, Session, View};
use exam_checker::backend::SimulatedBackend;
use exam_checker::config::{AppConfig, SimulationConfig};
use exam_checker::generator::ExamSynthesizer;
use exam_checker::models::{DashboardSummary, ExamStatus};

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn session() -> Session {
    let config = AppConfig::default().with_simulation(SimulationConfig::instant());
    let backend = Arc::new(SimulatedBackend::new(
        SimulationConfig::instant(),
        ExamSynthesizer::from_seed(Some(42)),
    ));
    Session::new(&config, backend)
}

#[test]
fn test_seeded_dashboard() {
    let router = Router::new();
    let exams = router.exams();
    assert_eq!(exams.len(), 2);
    assert_eq!(exams[0].title, "Mathematics Final Exam");
    assert_eq!(exams[0].status, ExamStatus::Completed);
    assert_eq!(exams[1].exam_number, "PHYS-2024-002");
    assert_eq!(exams[1].status, ExamStatus::InProgress);
    assert!(exams.iter().all(|e| e.questions.is_none()));

    let summary = DashboardSummary::from_exams(exams);
    assert_eq!(summary.total_exams, 2);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.in_progress, 1);
    assert_eq!(summary.total_answers, 4);
}

#[test]
fn test_view_mathematics_exam_and_back() {
    let mut router = Router::new();
    let exam = router
        .exams()
        .iter()
        .find(|e| e.title == "Mathematics Final Exam")
        .cloned()
        .unwrap();

    router.view_exam(exam);
    let selected = router.selected_exam().unwrap();
    assert_eq!(selected.answers_uploaded, 3);
    assert_eq!(selected.question_count, 25);

    router.back_to_dashboard();
    assert_eq!(*router.view(), View::Dashboard);
    assert!(router.selected_exam().is_none());
    assert_eq!(router.exams().len(), 2);
}

#[tokio::test]
async fn test_keyboard_walkthrough() {
    let mut session = session();

    // second exam
    session.handle_key(press(KeyCode::Down));
    session.handle_key(press(KeyCode::Enter));
    let exam = session.router().selected_exam().unwrap();
    assert_eq!(exam.title, "Physics Midterm");
    assert_eq!(session.viewer_screen().selected_question(), 1);

    session.handle_key(press(KeyCode::Esc));
    assert_eq!(*session.router().view(), View::Dashboard);

    session.handle_key(press(KeyCode::Char('n')));
    assert_eq!(*session.router().view(), View::Create);
    // 'q' is text on the creation form
    session.handle_key(press(KeyCode::Char('q')));
    assert!(!session.should_quit());
    assert_eq!(session.create_screen().form().exam_number, "q");

    session.handle_key(press(KeyCode::Esc));
    assert_eq!(session.router().exams().len(), 2);
    session.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(session.should_quit());
}
