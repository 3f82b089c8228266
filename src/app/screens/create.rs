//! Exam creation screen
//!
//! A focusable form: two text inputs, two path-entry "pickers" and the
//! upload action. Printable keys go to the focused input, so only Esc and
//! Ctrl-C act globally here.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{help_bar, title_bar};
use crate::app::creation::{CreationForm, CreationPhase};
use crate::models::upload::parse_selection;
use crate::models::ExamDraft;
use crate::notify::Notification;
use crate::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Focusable parts of the form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    ExamNumber,
    ExamTitle,
    QuestionPaper,
    AnswerSheets,
    Submit,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::ExamNumber => "Exam Number",
            FormField::ExamTitle => "Exam Title",
            FormField::QuestionPaper => "Question Paper (pdf, jpg, jpeg, png)",
            FormField::AnswerSheets => "Answer Sheets (comma-separated paths)",
            FormField::Submit => "Submit",
        }
    }

    fn next(self, submit_visible: bool) -> Self {
        match self {
            FormField::ExamNumber => FormField::ExamTitle,
            FormField::ExamTitle => FormField::QuestionPaper,
            FormField::QuestionPaper => FormField::AnswerSheets,
            FormField::AnswerSheets if submit_visible => FormField::Submit,
            FormField::AnswerSheets | FormField::Submit => FormField::ExamNumber,
        }
    }

    fn previous(self, submit_visible: bool) -> Self {
        match self {
            FormField::ExamNumber if submit_visible => FormField::Submit,
            FormField::ExamNumber => FormField::AnswerSheets,
            FormField::ExamTitle => FormField::ExamNumber,
            FormField::QuestionPaper => FormField::ExamTitle,
            FormField::AnswerSheets => FormField::QuestionPaper,
            FormField::Submit => FormField::AnswerSheets,
        }
    }
}

/// What the creation screen asks the controller to do
#[derive(Debug, Clone, PartialEq)]
pub enum CreateAction {
    None,
    Back,
    Submit,
    Notify(Notification),
    Quit,
}

/// Creation screen component
#[derive(Debug)]
pub struct CreateScreen {
    form: CreationForm,
    focus: FormField,
    paper_input: String,
    sheets_input: String,
}

impl CreateScreen {
    pub fn new() -> Self {
        Self {
            form: CreationForm::new(),
            focus: FormField::ExamNumber,
            paper_input: String::new(),
            sheets_input: String::new(),
        }
    }

    pub fn form(&self) -> &CreationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CreationForm {
        &mut self.form
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn is_busy(&self) -> bool {
        self.form.is_busy()
    }

    /// Start a submission from the current form contents
    pub fn submit(&mut self) -> Result<Option<ExamDraft>> {
        self.form.submit()
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next(self.form.has_files());
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous(self.form.has_files());
    }

    /// Translate a key press into a creation action
    pub fn handle_key_event(&mut self, key: KeyEvent) -> CreateAction {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return CreateAction::Quit;
        }

        match key.code {
            KeyCode::Esc => CreateAction::Back,
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                CreateAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_previous();
                CreateAction::None
            }
            KeyCode::Enter => self.confirm(),
            KeyCode::Backspace => {
                if let Some(input) = self.focused_input() {
                    input.pop();
                }
                CreateAction::None
            }
            KeyCode::Char(c) => {
                if let Some(input) = self.focused_input() {
                    input.push(c);
                }
                CreateAction::None
            }
            _ => CreateAction::None,
        }
    }

    fn confirm(&mut self) -> CreateAction {
        match self.focus {
            FormField::ExamNumber | FormField::ExamTitle => {
                self.focus_next();
                CreateAction::None
            }
            FormField::QuestionPaper => {
                let picked = parse_selection(&self.paper_input);
                match self.form.select_question_paper(picked) {
                    Some(notification) => CreateAction::Notify(notification),
                    None => CreateAction::None,
                }
            }
            FormField::AnswerSheets => {
                let picked = parse_selection(&self.sheets_input);
                CreateAction::Notify(self.form.select_answer_sheets(picked))
            }
            FormField::Submit => CreateAction::Submit,
        }
    }

    fn focused_input(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::ExamNumber => Some(&mut self.form.exam_number),
            FormField::ExamTitle => Some(&mut self.form.exam_title),
            FormField::QuestionPaper => Some(&mut self.paper_input),
            FormField::AnswerSheets => Some(&mut self.sheets_input),
            FormField::Submit => None,
        }
    }

    /// Render the creation form
    pub fn render(&self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Title
                Constraint::Length(3), // Exam number
                Constraint::Length(3), // Exam title
                Constraint::Length(3), // Question paper
                Constraint::Length(3), // Answer sheets
                Constraint::Length(5), // Upload summary
                Constraint::Length(3), // Action button
                Constraint::Min(0),
                Constraint::Length(3), // Help text
            ])
            .split(size);

        f.render_widget(
            title_bar(
                "Create New Exam".to_string(),
                "Upload question paper and answer sheets for automated grading",
            ),
            chunks[0],
        );

        let inputs = [
            (FormField::ExamNumber, &self.form.exam_number, "e.g., MATH-2024-001"),
            (FormField::ExamTitle, &self.form.exam_title, "e.g., Mathematics Final Exam"),
            (FormField::QuestionPaper, &self.paper_input, "path to the question paper, Enter to select"),
            (FormField::AnswerSheets, &self.sheets_input, "paths to answer sheets, Enter to select"),
        ];
        for (i, (field, value, placeholder)) in inputs.into_iter().enumerate() {
            self.render_input(f, chunks[i + 1], field, value, placeholder);
        }

        if self.form.has_files() {
            self.render_summary(f, chunks[5]);
            self.render_action(f, chunks[6]);
        }

        f.render_widget(
            help_bar(&[
                ("Tab/↑↓", "Move"),
                ("Enter", "Select / Submit"),
                ("Esc", "Back to Dashboard"),
                ("Ctrl+C", "Quit"),
            ]),
            chunks[8],
        );
    }

    fn render_input(&self, f: &mut Frame, area: Rect, field: FormField, value: &str, placeholder: &str) {
        let focused = self.focus == field;
        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        let content = if value.is_empty() {
            Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(value.to_string())
        };

        let mut title = field.label().to_string();
        match field {
            FormField::QuestionPaper => {
                if let Some(paper) = self.form.question_paper() {
                    title = format!("{} [{}]", title, paper.name);
                }
            }
            FormField::AnswerSheets if !self.form.answer_sheets().is_empty() => {
                title = format!("{} [{} selected]", title, self.form.answer_sheets().len());
            }
            _ => {}
        }

        let input = Paragraph::new(Line::from(content)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title),
        );
        f.render_widget(input, area);

        if focused {
            let x = area.x + 1 + value.chars().count() as u16;
            f.set_cursor(x.min(area.right().saturating_sub(2)), area.y + 1);
        }
    }

    fn render_summary(&self, f: &mut Frame, area: Rect) {
        let paper = self
            .form
            .question_paper()
            .map(|p| p.name.clone())
            .unwrap_or_default();
        let text = vec![
            Line::from(vec![
                Span::styled("Question Paper: ", Style::default().fg(Color::Gray)),
                Span::raw(paper),
            ]),
            Line::from(vec![
                Span::styled("Answer Sheets: ", Style::default().fg(Color::Gray)),
                Span::raw(format!("{} file(s)", self.form.answer_sheets().len())),
            ]),
        ];
        let summary = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Upload Summary"),
        );
        f.render_widget(summary, area);
    }

    fn render_action(&self, f: &mut Frame, area: Rect) {
        let phase = self.form.phase();
        let style = match (phase, self.focus == FormField::Submit) {
            (CreationPhase::Idle, true) => Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            (CreationPhase::Idle, false) => Style::default().fg(Color::Cyan),
            _ => Style::default().fg(Color::DarkGray),
        };
        let button = Paragraph::new(Span::styled(phase.action_label(), style))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(button, area);
    }
}

impl Default for CreateScreen {
    fn default() -> Self {
        Self::new()
    }
}
