//! Dashboard screen implementation
//!
//! Summary cards for all exams and a selectable exam list. Enter opens the
//! highlighted exam, `n` starts a new one.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::{band_color, columns, help_bar, stat_card, title_bar};
use crate::app::state::{NavigationAction, Router};
use crate::models::{DashboardSummary, Exam};
use crossterm::event::{KeyCode, KeyEvent};

/// What the dashboard asks the controller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    None,
    CreateNew,
    /// Open the exam at this list index
    ViewExam(usize),
    Quit,
}

/// Dashboard screen component
#[derive(Debug)]
pub struct DashboardScreen {
    selected_index: usize,
    list_state: ListState,
}

impl DashboardScreen {
    /// Create a new dashboard with the first exam highlighted
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected_index: 0,
            list_state,
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Move selection up, wrapping to the last exam
    pub fn select_previous(&mut self, exam_count: usize) {
        if exam_count == 0 {
            return;
        }
        if self.selected_index > 0 && self.selected_index < exam_count {
            self.selected_index -= 1;
        } else {
            self.selected_index = exam_count - 1;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Move selection down, wrapping to the first exam
    pub fn select_next(&mut self, exam_count: usize) {
        if exam_count == 0 {
            return;
        }
        if self.selected_index + 1 < exam_count {
            self.selected_index += 1;
        } else {
            self.selected_index = 0;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Translate a key press into a dashboard action
    pub fn handle_key_event(&mut self, key: KeyEvent, exam_count: usize) -> DashboardAction {
        if matches!(key.code, KeyCode::Char('n') | KeyCode::Char('N')) {
            return DashboardAction::CreateNew;
        }
        match Router::key_to_navigation(key) {
            NavigationAction::Up => self.select_previous(exam_count),
            NavigationAction::Down => self.select_next(exam_count),
            NavigationAction::Select if self.selected_index < exam_count => {
                return DashboardAction::ViewExam(self.selected_index);
            }
            NavigationAction::Select => return DashboardAction::CreateNew,
            NavigationAction::Quit | NavigationAction::Back => return DashboardAction::Quit,
            _ => {}
        }
        DashboardAction::None
    }

    /// Render the dashboard
    pub fn render(&mut self, f: &mut Frame, exams: &[Exam]) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Title and subtitle
                Constraint::Length(4), // Summary cards
                Constraint::Min(8),    // Exam list
                Constraint::Length(3), // Help text
            ])
            .split(size);

        f.render_widget(
            title_bar(
                "Exam Checker Dashboard".to_string(),
                "Manage and review your examination papers",
            ),
            chunks[0],
        );
        self.render_summary(f, chunks[1], &DashboardSummary::from_exams(exams));

        if exams.is_empty() {
            self.render_empty(f, chunks[2]);
        } else {
            self.render_exam_list(f, chunks[2], exams);
        }

        f.render_widget(
            help_bar(&[
                ("↑↓", "Navigate"),
                ("Enter", "View Details"),
                ("N", "Create New Exam"),
                ("Q", "Quit"),
            ]),
            chunks[3],
        );
    }

    fn render_summary(&self, f: &mut Frame, area: Rect, summary: &DashboardSummary) {
        let cards = columns(area, 4);
        f.render_widget(
            stat_card("Total Exams", summary.total_exams.to_string(), Color::Cyan),
            cards[0],
        );
        f.render_widget(
            stat_card("Completed", summary.completed.to_string(), Color::Green),
            cards[1],
        );
        f.render_widget(
            stat_card("In Progress", summary.in_progress.to_string(), Color::Yellow),
            cards[2],
        );
        f.render_widget(
            stat_card("Total Answers", summary.total_answers.to_string(), Color::Magenta),
            cards[3],
        );
    }

    fn render_empty(&self, f: &mut Frame, area: Rect) {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No exams found",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("Get started by creating your first exam entry"),
            Line::from(""),
            Line::from(Span::styled(
                "Press N to create your first exam",
                Style::default().fg(Color::Yellow),
            )),
        ];
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().title("Recent Exams").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_exam_list(&mut self, f: &mut Frame, area: Rect, exams: &[Exam]) {
        let items: Vec<ListItem> = exams
            .iter()
            .map(|exam| {
                let status_style = Style::default().fg(band_color(exam.status.band()));
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            exam.title.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw("  "),
                        Span::styled(format!("[{}]", exam.status), status_style),
                    ]),
                    Line::from(Span::styled(
                        format!(
                            "  {}  |  Questions: {}  |  Answers Uploaded: {}  |  Date: {}",
                            exam.exam_number, exam.question_count, exam.answers_uploaded, exam.date
                        ),
                        Style::default().fg(Color::Gray),
                    )),
                ])
            })
            .collect();

        if self.selected_index >= exams.len() {
            self.selected_index = exams.len() - 1;
            self.list_state.select(Some(self.selected_index));
        }

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Recent Exams"))
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_dashboard_creation() {
        let screen = DashboardScreen::new();
        assert_eq!(screen.selected_index(), 0);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut screen = DashboardScreen::new();
        screen.select_next(2);
        assert_eq!(screen.selected_index(), 1);
        screen.select_next(2);
        assert_eq!(screen.selected_index(), 0);
        screen.select_previous(2);
        assert_eq!(screen.selected_index(), 1);
    }

    #[test]
    fn test_navigation_on_empty_list() {
        let mut screen = DashboardScreen::new();
        screen.select_next(0);
        screen.select_previous(0);
        assert_eq!(screen.selected_index(), 0);
    }

    #[test]
    fn test_key_actions() {
        let mut screen = DashboardScreen::new();
        assert_eq!(screen.handle_key_event(press(KeyCode::Char('n')), 2), DashboardAction::CreateNew);
        assert_eq!(screen.handle_key_event(press(KeyCode::Down), 2), DashboardAction::None);
        assert_eq!(screen.handle_key_event(press(KeyCode::Enter), 2), DashboardAction::ViewExam(1));
        assert_eq!(screen.handle_key_event(press(KeyCode::Char('q')), 2), DashboardAction::Quit);
    }

    #[test]
    fn test_select_with_no_exams_opens_creation() {
        let mut screen = DashboardScreen::new();
        assert_eq!(screen.handle_key_event(press(KeyCode::Enter), 0), DashboardAction::CreateNew);
    }
}
