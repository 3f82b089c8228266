//! Application state management
//!
//! Holds the view router, the in-memory exam list, and the keyboard mapping
//! used by every screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::{seed_exams, Exam};

/// Application screens; the viewer carries the exam it shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// Exam list with summary cards
    #[default]
    Dashboard,
    /// Exam creation form
    Create,
    /// Details and results for one exam
    Viewer(Exam),
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Create => "create",
            View::Viewer(_) => "viewer",
        }
    }
}

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move selection up (arrow up, k)
    Up,
    /// Move selection down (arrow down, j)
    Down,
    /// Move selection left (arrow left, h)
    Left,
    /// Move selection right (arrow right, l)
    Right,
    /// Confirm selection (Enter, Space)
    Select,
    /// Go back/cancel (Esc, Backspace)
    Back,
    /// Next item (Tab)
    Next,
    /// Previous item (Shift+Tab)
    Previous,
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// View router and in-memory exam store
#[derive(Debug)]
pub struct Router {
    view: View,
    exams: Vec<Exam>,
    should_quit: bool,
}

impl Router {
    /// Router on the dashboard with the seeded example exams
    pub fn new() -> Self {
        Self::with_exams(seed_exams())
    }

    pub fn with_exams(exams: Vec<Exam>) -> Self {
        Self {
            view: View::Dashboard,
            exams,
            should_quit: false,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn exams(&self) -> &[Exam] {
        &self.exams
    }

    /// The exam shown by the viewer, if any
    pub fn selected_exam(&self) -> Option<&Exam> {
        match &self.view {
            View::Viewer(exam) => Some(exam),
            _ => None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Open the creation form
    pub fn create_new(&mut self) {
        self.transition_to(View::Create);
    }

    /// Show an exam in the viewer
    pub fn view_exam(&mut self, exam: Exam) {
        self.transition_to(View::Viewer(exam));
    }

    /// Return to the dashboard, clearing any selected exam
    pub fn back_to_dashboard(&mut self) {
        self.transition_to(View::Dashboard);
    }

    /// Append a newly created exam and return to the dashboard
    pub fn exam_created(&mut self, mut exam: Exam) {
        if self.exams.iter().any(|e| e.id == exam.id) {
            let unique = self.unique_id(&exam.id);
            tracing::warn!("exam id {} already taken, using {}", exam.id, unique);
            exam.id = unique;
        }
        tracing::info!("exam created: {}", exam.summary());
        self.exams.push(exam);
        self.transition_to(View::Dashboard);
    }

    fn unique_id(&self, base: &str) -> String {
        (2..)
            .map(|n| format!("{}-{}", base, n))
            .find(|candidate| self.exams.iter().all(|e| &e.id != candidate))
            .unwrap_or_else(|| base.to_string())
    }

    fn transition_to(&mut self, view: View) {
        tracing::debug!(from = self.view.name(), to = view.name(), "view transition");
        self.view = view;
    }

    /// Convert keyboard event to navigation action
    pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
        match key.code {
            // Quit keys
            KeyCode::Char('q') | KeyCode::Char('Q') => NavigationAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NavigationAction::Quit
            }

            // Navigation keys
            KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
            KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
            KeyCode::Left | KeyCode::Char('h') => NavigationAction::Left,
            KeyCode::Right | KeyCode::Char('l') => NavigationAction::Right,

            // Selection and confirmation
            KeyCode::Enter | KeyCode::Char(' ') => NavigationAction::Select,

            // Back/cancel
            KeyCode::Esc | KeyCode::Backspace => NavigationAction::Back,

            // Tab navigation
            KeyCode::BackTab => NavigationAction::Previous,
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    NavigationAction::Previous
                } else {
                    NavigationAction::Next
                }
            }

            _ => NavigationAction::None,
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
