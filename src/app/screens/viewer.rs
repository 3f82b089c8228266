//! Exam viewer screen
//!
//! Shows aggregate stats for one exam, a question list with a detail panel,
//! and the per-student results matrix. Recalculation requests are gated here:
//! one full recalculation at a time, and a single tracked in-flight question.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::{band_color, columns, help_bar, stat_card, title_bar};
use crate::app::state::{NavigationAction, Router};
use crate::models::{Exam, ExamStats, Question, ResultsMatrix, ScoreBand};
use crate::MAX_SCORE;
use crossterm::event::{KeyCode, KeyEvent};

/// Lower half of the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerPanel {
    #[default]
    Details,
    Results,
}

impl ViewerPanel {
    fn toggled(self) -> Self {
        match self {
            ViewerPanel::Details => ViewerPanel::Results,
            ViewerPanel::Results => ViewerPanel::Details,
        }
    }
}

/// What the viewer asks the controller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    None,
    Back,
    RecalculateAll,
    RecalculateQuestion(u32),
    Quit,
}

/// Width of the student label column in the results matrix
const LABEL_WIDTH: u16 = 11;
/// Width of one question column, enough for `Q99` and `10`
const QUESTION_WIDTH: u16 = 3;
const TOTAL_WIDTH: u16 = 6;
const COLUMN_SPACING: u16 = 1;

/// Viewer screen component
#[derive(Debug)]
pub struct ViewerScreen {
    /// Exam currently shown
    exam_id: String,
    selected_question: u32,
    /// Exam with a full recalculation in flight
    recalculating_all: Option<String>,
    /// Exam and question of the tracked single-question recalculation
    recalculating_question: Option<(String, u32)>,
    panel: ViewerPanel,
    /// First question column shown in the results matrix
    column_offset: usize,
    list_state: ListState,
}

impl ViewerScreen {
    pub fn new() -> Self {
        Self {
            exam_id: String::new(),
            selected_question: 1,
            recalculating_all: None,
            recalculating_question: None,
            panel: ViewerPanel::Details,
            column_offset: 0,
            list_state: ListState::default(),
        }
    }

    /// Prepare for a newly opened exam.
    ///
    /// Selection, panel and scroll go back to their defaults. Recalculation
    /// flags belong to the exam that started them, so a freshly opened exam
    /// shows none unless it has its own request in flight.
    pub fn open(&mut self, exam_id: &str) {
        self.exam_id = exam_id.to_string();
        self.selected_question = 1;
        self.panel = ViewerPanel::Details;
        self.column_offset = 0;
    }

    pub fn exam_id(&self) -> &str {
        &self.exam_id
    }

    pub fn selected_question(&self) -> u32 {
        self.selected_question
    }

    pub fn select_question(&mut self, id: u32) {
        self.selected_question = id;
    }

    pub fn panel(&self) -> ViewerPanel {
        self.panel
    }

    pub fn toggle_panel(&mut self) {
        self.panel = self.panel.toggled();
    }

    pub fn column_offset(&self) -> usize {
        self.column_offset
    }

    /// Whether the shown exam has a full recalculation in flight
    pub fn is_recalculating_all(&self) -> bool {
        self.recalculating_all.as_deref() == Some(self.exam_id.as_str())
    }

    /// The shown exam's in-flight question, if any
    pub fn recalculating_question(&self) -> Option<u32> {
        match &self.recalculating_question {
            Some((exam_id, question_id)) if *exam_id == self.exam_id => Some(*question_id),
            _ => None,
        }
    }

    /// Mark a full recalculation of the shown exam as started; false when
    /// one is already running for it
    pub fn begin_recalculate_all(&mut self) -> bool {
        if self.is_recalculating_all() {
            return false;
        }
        self.recalculating_all = Some(self.exam_id.clone());
        true
    }

    /// Clear the full-recalculation flag if it belongs to `exam_id`
    pub fn finish_recalculate_all(&mut self, exam_id: &str) {
        if self.recalculating_all.as_deref() == Some(exam_id) {
            self.recalculating_all = None;
        }
    }

    /// Track `id` of the shown exam as the in-flight question; false when it
    /// already is
    pub fn begin_recalculate_question(&mut self, id: u32) -> bool {
        if self.recalculating_question() == Some(id) {
            return false;
        }
        self.recalculating_question = Some((self.exam_id.clone(), id));
        true
    }

    /// Clear the tracked question if it belongs to `exam_id`, whichever
    /// question of that exam completed
    pub fn finish_recalculate_question(&mut self, exam_id: &str) {
        if matches!(&self.recalculating_question, Some((id, _)) if id == exam_id) {
            self.recalculating_question = None;
        }
    }

    fn track(&mut self, exam: &Exam) {
        if self.exam_id != exam.id {
            self.exam_id = exam.id.clone();
        }
    }

    fn scroll_right(&mut self, exam: &Exam) {
        if self.column_offset + 1 < exam.questions().len() {
            self.column_offset += 1;
        }
    }

    fn scroll_left(&mut self) {
        self.column_offset = self.column_offset.saturating_sub(1);
    }

    /// Move to the next question in list order
    pub fn select_next(&mut self, exam: &Exam) {
        let questions = exam.questions();
        if questions.is_empty() {
            return;
        }
        let next = match position(questions, self.selected_question) {
            Some(i) if i + 1 < questions.len() => i + 1,
            _ => 0,
        };
        self.selected_question = questions[next].id;
    }

    /// Move to the previous question in list order
    pub fn select_previous(&mut self, exam: &Exam) {
        let questions = exam.questions();
        if questions.is_empty() {
            return;
        }
        let previous = match position(questions, self.selected_question) {
            Some(i) if i > 0 => i - 1,
            _ => questions.len() - 1,
        };
        self.selected_question = questions[previous].id;
    }

    /// Translate a key press into a viewer action
    pub fn handle_key_event(&mut self, key: KeyEvent, exam: &Exam) -> ViewerAction {
        self.track(exam);
        match key.code {
            KeyCode::Char('R') | KeyCode::Char('a') => {
                return if self.begin_recalculate_all() {
                    ViewerAction::RecalculateAll
                } else {
                    ViewerAction::None
                };
            }
            KeyCode::Char('r') => {
                let id = self.selected_question;
                if exam.question(id).is_some() && self.begin_recalculate_question(id) {
                    return ViewerAction::RecalculateQuestion(id);
                }
                return ViewerAction::None;
            }
            _ => {}
        }

        match Router::key_to_navigation(key) {
            NavigationAction::Up => self.select_previous(exam),
            NavigationAction::Down => self.select_next(exam),
            NavigationAction::Next | NavigationAction::Previous => self.toggle_panel(),
            NavigationAction::Right if self.panel == ViewerPanel::Results => {
                self.scroll_right(exam)
            }
            NavigationAction::Left if self.panel == ViewerPanel::Results => self.scroll_left(),
            NavigationAction::Back => return ViewerAction::Back,
            NavigationAction::Quit => return ViewerAction::Quit,
            _ => {}
        }
        ViewerAction::None
    }

    /// Render the viewer for `exam`
    pub fn render(&mut self, f: &mut Frame, exam: &Exam) {
        self.track(exam);
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Title
                Constraint::Length(4), // Stats
                Constraint::Min(10),   // Panel
                Constraint::Length(3), // Help text
            ])
            .split(size);

        let subtitle = header_line(exam);
        f.render_widget(title_bar(exam.title.clone(), &subtitle), chunks[0]);
        self.render_stats(f, chunks[1], &ExamStats::for_exam(exam));

        match self.panel {
            ViewerPanel::Details => self.render_details(f, chunks[2], exam),
            ViewerPanel::Results => self.render_results(f, chunks[2], exam),
        }

        let recalc_label = if self.is_recalculating_all() {
            "Recalculating..."
        } else {
            "Recalculate All"
        };
        f.render_widget(
            help_bar(&[
                ("↑↓", "Question"),
                ("Tab", "Details/Results"),
                ("←→", "Scroll Results"),
                ("r", "Recalculate Question"),
                ("R", recalc_label),
                ("Esc", "Back"),
            ]),
            chunks[3],
        );
    }

    fn render_stats(&self, f: &mut Frame, area: Rect, stats: &ExamStats) {
        let cards = columns(area, 4);
        let average_band = ScoreBand::for_score(stats.average_score.round() as u32);
        f.render_widget(
            stat_card("Total Questions", stats.question_total.to_string(), Color::Cyan),
            cards[0],
        );
        f.render_widget(
            stat_card("Students", stats.student_count.to_string(), Color::Magenta),
            cards[1],
        );
        f.render_widget(
            stat_card("Average Score", stats.average_display(), band_color(average_band)),
            cards[2],
        );
        f.render_widget(
            stat_card("Total Points", stats.total_points.to_string(), Color::Yellow),
            cards[3],
        );
    }

    fn render_details(&mut self, f: &mut Frame, area: Rect, exam: &Exam) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(area);

        self.render_question_list(f, halves[0], exam);

        let detail = match exam.question(self.selected_question) {
            Some(question) => self.question_detail(question),
            None => Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Select a question",
                    Style::default().fg(Color::Gray),
                )),
            ])
            .alignment(Alignment::Center),
        };
        f.render_widget(
            detail
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Question Details")),
            halves[1],
        );
    }

    fn render_question_list(&mut self, f: &mut Frame, area: Rect, exam: &Exam) {
        let questions = exam.questions();
        if questions.is_empty() {
            let empty = Paragraph::new("No graded questions for this exam yet")
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().borders(Borders::ALL).title("Questions"));
            f.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = questions
            .iter()
            .map(|q| {
                let mean = q.mean_score();
                let mut spans = vec![
                    Span::raw(format!("Q{:<3}", q.id)),
                    Span::styled(
                        format!(" avg {:.1}", mean),
                        Style::default().fg(band_color(ScoreBand::for_score(mean.round() as u32))),
                    ),
                ];
                if self.recalculating_question() == Some(q.id) {
                    spans.push(Span::styled(" ...", Style::default().fg(Color::Yellow)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        self.list_state
            .select(position(questions, self.selected_question));

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Questions"))
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
            .highlight_symbol("> ");
        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn question_detail(&self, question: &Question) -> Paragraph<'static> {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let action = if self.recalculating_question() == Some(question.id) {
            Span::styled("  [Recalculating...]", Style::default().fg(Color::Yellow))
        } else {
            Span::styled("  [r] Recalculate", Style::default().fg(Color::DarkGray))
        };

        let mut lines = vec![
            Line::from(vec![Span::styled(format!("Question {}", question.id), bold), action]),
            Line::from(question.text.clone()),
            Line::from(""),
            Line::from(Span::styled("Answer Key", bold)),
            Line::from(question.answer_key.clone()),
            Line::from(""),
            Line::from(Span::styled("Student Answers", bold)),
        ];

        for answer in &question.answers {
            let band = ScoreBand::for_score(answer.score);
            lines.push(Line::from(vec![
                Span::styled(answer.student_id.clone(), bold),
                Span::raw("  "),
                Span::styled(
                    format!("{}/{}", answer.score, MAX_SCORE),
                    Style::default().fg(band_color(band)),
                ),
            ]));
            lines.push(Line::from(answer.answer.clone()));
            lines.push(Line::from(Span::styled(
                answer.explanation.clone(),
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::from(""));
        }

        Paragraph::new(lines)
    }

    fn render_results(&mut self, f: &mut Frame, area: Rect, exam: &Exam) {
        let matrix = ResultsMatrix::for_exam(exam);

        if matrix.is_empty() {
            let empty = Paragraph::new("Results appear once the exam has graded questions")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().borders(Borders::ALL).title("Results Matrix"));
            f.render_widget(empty, area);
            return;
        }

        let question_total = matrix.question_ids.len();
        let (start, end) = visible_columns(
            question_total,
            self.column_offset,
            area.width.saturating_sub(2),
        );
        self.column_offset = start;

        let title = if start == 0 && end == question_total {
            "Results Matrix".to_string()
        } else {
            format!(
                "Results Matrix (Q{}-Q{} of {}, ←→ scroll)",
                matrix.question_ids[start],
                matrix.question_ids[end - 1],
                question_total
            )
        };
        let block = Block::default().borders(Borders::ALL).title(title);

        let header_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let mut header = vec![Cell::from("Student")];
        header.extend(
            matrix.question_ids[start..end]
                .iter()
                .map(|id| Cell::from(format!("Q{}", id))),
        );
        header.push(Cell::from("Total"));

        let rows: Vec<Row> = matrix
            .rows
            .iter()
            .map(|row| {
                let mut cells = vec![Cell::from(row.label.clone())];
                cells.extend(row.scores[start..end].iter().map(|score| {
                    Cell::from(score.to_string())
                        .style(Style::default().fg(band_color(ScoreBand::for_score(*score))))
                }));
                cells.push(
                    Cell::from(row.total.to_string()).style(Style::default().add_modifier(Modifier::BOLD)),
                );
                Row::new(cells)
            })
            .collect();

        let mut widths = vec![Constraint::Length(LABEL_WIDTH)];
        widths.extend((start..end).map(|_| Constraint::Length(QUESTION_WIDTH)));
        widths.push(Constraint::Length(TOTAL_WIDTH));

        let table = Table::new(rows, widths)
            .header(Row::new(header).style(header_style))
            .column_spacing(COLUMN_SPACING)
            .block(block);
        f.render_widget(table, area);
    }
}

impl Default for ViewerScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Header summary: exam number, counts, date and status
fn header_line(exam: &Exam) -> String {
    format!(
        "Exam ID: {} • {} Questions • {} Answer Sheets • {} • {}",
        exam.exam_number, exam.question_count, exam.answers_uploaded, exam.date, exam.status
    )
}

/// Range of question columns that fit in `inner_width` next to the student
/// and total columns, starting at `offset` clamped so the last page is full.
/// At least one column is always shown.
fn visible_columns(question_total: usize, offset: usize, inner_width: u16) -> (usize, usize) {
    let fixed = LABEL_WIDTH + TOTAL_WIDTH + 2 * COLUMN_SPACING;
    let per_column = QUESTION_WIDTH + COLUMN_SPACING;
    let fit = (inner_width.saturating_sub(fixed) / per_column).max(1) as usize;
    let fit = fit.min(question_total);
    let start = offset.min(question_total - fit);
    (start, start + fit)
}

fn position(questions: &[Question], id: u32) -> Option<usize> {
    questions.iter().position(|q| q.id == id)
}
