//! Application session
//!
//! Everything the UI loop owns apart from the terminal: the router, the
//! screen components, the notification queue and the task event stream.
//! Key presses and task events are applied here, which keeps the whole
//! workflow drivable from tests without a terminal.

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::app::screens::{
    CreateAction, CreateScreen, DashboardAction, DashboardScreen, ViewerAction, ViewerScreen,
};
use crate::app::state::{Router, View};
use crate::app::toast;
use crate::backend::GradingBackend;
use crate::config::AppConfig;
use crate::models::{seed_exams, Exam};
use crate::notify::{Notification, NotificationCenter};
use crate::tasks::{TaskEvent, TaskRunner};

/// UI state plus the channel to background tasks
pub struct Session {
    router: Router,
    dashboard: DashboardScreen,
    create: CreateScreen,
    viewer: ViewerScreen,
    notifications: NotificationCenter,
    runner: TaskRunner,
    events: mpsc::UnboundedReceiver<TaskEvent>,
}

impl Session {
    /// Session on the dashboard with the seeded exams
    pub fn new(config: &AppConfig, backend: Arc<dyn GradingBackend>) -> Self {
        Self::with_exams(config, backend, seed_exams())
    }

    pub fn with_exams(config: &AppConfig, backend: Arc<dyn GradingBackend>, exams: Vec<Exam>) -> Self {
        let (runner, events) = TaskRunner::new(backend);
        Self {
            router: Router::with_exams(exams),
            dashboard: DashboardScreen::new(),
            create: CreateScreen::new(),
            viewer: ViewerScreen::new(),
            notifications: NotificationCenter::new(
                config.ui.notification_ttl(),
                config.ui.max_notifications,
            ),
            runner,
            events,
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn create_screen(&self) -> &CreateScreen {
        &self.create
    }

    pub fn create_screen_mut(&mut self) -> &mut CreateScreen {
        &mut self.create
    }

    pub fn viewer_screen(&self) -> &ViewerScreen {
        &self.viewer
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn should_quit(&self) -> bool {
        self.router.should_quit()
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Route a key press to the active screen
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.router.view() {
            View::Dashboard => self.handle_dashboard_key(key),
            View::Create => self.handle_create_key(key),
            View::Viewer(_) => self.handle_viewer_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        let exam_count = self.router.exams().len();
        match self.dashboard.handle_key_event(key, exam_count) {
            DashboardAction::CreateNew => self.open_create(),
            DashboardAction::ViewExam(index) => {
                if let Some(exam) = self.router.exams().get(index).cloned() {
                    self.viewer.open(&exam.id);
                    self.router.view_exam(exam);
                }
            }
            DashboardAction::Quit => self.router.quit(),
            DashboardAction::None => {}
        }
    }

    /// Show the creation form, fresh unless a submission is still running
    pub fn open_create(&mut self) {
        if !self.create.is_busy() {
            self.create = CreateScreen::new();
        }
        self.router.create_new();
    }

    fn handle_create_key(&mut self, key: KeyEvent) {
        match self.create.handle_key_event(key) {
            CreateAction::Back => self.router.back_to_dashboard(),
            CreateAction::Quit => self.router.quit(),
            CreateAction::Notify(notification) => self.notify(notification),
            CreateAction::Submit => self.submit_creation(),
            CreateAction::None => {}
        }
    }

    /// Validate the form and hand a complete submission to the backend
    pub fn submit_creation(&mut self) {
        match self.create.submit() {
            Ok(Some(draft)) => {
                tracing::info!(
                    exam_number = %draft.exam_number,
                    sheets = draft.answer_sheets.len(),
                    "submission started"
                );
                self.runner.spawn_creation(draft);
            }
            Ok(None) => tracing::debug!("submission already in flight, ignoring"),
            Err(e) => {
                tracing::warn!("submission rejected: {}", e);
                self.notify(Notification::from_error(&e));
            }
        }
    }

    fn handle_viewer_key(&mut self, key: KeyEvent) {
        let Some(exam) = self.router.selected_exam() else {
            return;
        };
        let exam_id = exam.id.clone();
        match self.viewer.handle_key_event(key, exam) {
            ViewerAction::Back => self.router.back_to_dashboard(),
            ViewerAction::Quit => self.router.quit(),
            ViewerAction::RecalculateAll => {
                tracing::info!(exam_id = %exam_id, "recalculating all questions");
                self.runner.spawn_recalculate_all(exam_id);
            }
            ViewerAction::RecalculateQuestion(question_id) => {
                tracing::info!(exam_id = %exam_id, question_id, "recalculating question");
                self.runner.spawn_recalculate_question(exam_id, question_id);
            }
            ViewerAction::None => {}
        }
    }

    /// Apply one task outcome to the UI state
    pub fn apply_event(&mut self, event: TaskEvent) {
        match event {
            TaskEvent::UploadFinished => self.create.form_mut().upload_finished(),
            TaskEvent::ExamReady(exam) => {
                self.create = CreateScreen::new();
                self.notify(Notification::exam_processed());
                self.router.exam_created(exam);
            }
            TaskEvent::CreationFailed(message) => {
                tracing::warn!("exam creation failed: {}", message);
                self.create.form_mut().finish();
                self.notify(Notification::processing_failed());
            }
            TaskEvent::AllRecalculated { exam_id } => {
                self.viewer.finish_recalculate_all(&exam_id);
                self.notify(Notification::scores_recalculated());
            }
            TaskEvent::QuestionRecalculated {
                exam_id,
                question_id,
            } => {
                self.viewer.finish_recalculate_question(&exam_id);
                self.notify(Notification::question_recalculated(question_id));
            }
            TaskEvent::RecalculationFailed {
                exam_id,
                question_id,
                message,
            } => {
                tracing::warn!(exam_id = %exam_id, ?question_id, "recalculation failed: {}", message);
                match question_id {
                    Some(_) => self.viewer.finish_recalculate_question(&exam_id),
                    None => self.viewer.finish_recalculate_all(&exam_id),
                }
                self.notify(Notification::recalculation_failed());
            }
        }
    }

    /// Apply every event already delivered, returning how many there were
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.apply_event(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next task event and apply it.
    ///
    /// Returns `None` once every sender is gone, which cannot happen while
    /// the session holds its own runner.
    pub async fn process_next_event(&mut self) -> Option<TaskEvent> {
        let event = self.events.recv().await?;
        self.apply_event(event.clone());
        Some(event)
    }

    pub fn expire_notifications(&mut self, now: Instant) {
        self.notifications.expire(now);
    }

    /// Draw the active screen and the notification overlay
    pub fn render(&mut self, f: &mut Frame) {
        match self.router.view() {
            View::Dashboard => self.dashboard.render(f, self.router.exams()),
            View::Create => self.create.render(f),
            View::Viewer(exam) => self.viewer.render(f, exam),
        }
        toast::render(f, &self.notifications);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SimulatedBackend;
    use crate::config::SimulationConfig;
    use crate::generator::ExamSynthesizer;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn session() -> Session {
        let config = AppConfig::default().with_simulation(SimulationConfig::instant());
        let backend = Arc::new(SimulatedBackend::new(
            SimulationConfig::instant(),
            ExamSynthesizer::from_seed(Some(5)),
        ));
        Session::new(&config, backend)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_dashboard_keys_drive_router() {
        let mut session = session();
        session.handle_key(press(KeyCode::Enter));
        assert_eq!(session.router().view().name(), "viewer");

        session.handle_key(press(KeyCode::Esc));
        session.handle_key(press(KeyCode::Char('n')));
        assert_eq!(*session.router().view(), View::Create);

        session.handle_key(press(KeyCode::Esc));
        session.handle_key(press(KeyCode::Char('q')));
        assert!(session.should_quit());
    }

    #[tokio::test]
    async fn test_failed_creation_clears_phase() {
        let mut session = session();
        session.open_create();
        session.create_screen_mut().form_mut().exam_number = "X".to_string();
        session.apply_event(TaskEvent::CreationFailed("boom".to_string()));

        assert!(!session.create_screen().is_busy());
        assert_eq!(
            session.notifications().latest(),
            Some(&Notification::processing_failed())
        );
        assert_eq!(session.router().exams().len(), 2);
    }

    #[tokio::test]
    async fn test_renders_every_view() {
        let mut session = session();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        terminal.draw(|f| session.render(f)).unwrap();
        session.handle_key(press(KeyCode::Enter));
        terminal.draw(|f| session.render(f)).unwrap();
        session.handle_key(press(KeyCode::Tab));
        terminal.draw(|f| session.render(f)).unwrap();
        session.handle_key(press(KeyCode::Esc));
        session.handle_key(press(KeyCode::Char('n')));
        session.notify(Notification::missing_information());
        terminal.draw(|f| session.render(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Create New Exam"));
        assert!(text.contains("Missing Information"));
    }

    #[tokio::test]
    async fn test_viewer_header_shows_counts() {
        let mut session = session();
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();
        session.handle_key(press(KeyCode::Enter));
        terminal.draw(|f| session.render(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Mathematics Final Exam"));
        assert!(text.contains("Exam ID: MATH-2024-001"));
        assert!(text.contains("25 Questions"));
        assert!(text.contains("3 Answer Sheets"));
    }
}
