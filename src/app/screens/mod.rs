//! TUI screen components
//!
//! Contains individual screen implementations for the dashboard, the exam
//! creation form and the exam viewer, plus styling shared between them.

pub mod create;
pub mod dashboard;
pub mod viewer;

pub use create::{CreateAction, CreateScreen, FormField};
pub use dashboard::{DashboardAction, DashboardScreen};
pub use viewer::{ViewerAction, ViewerPanel, ViewerScreen};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::models::ScoreBand;

/// Colour used for a score or status band
pub fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Excellent => Color::Green,
        ScoreBand::Good => Color::Cyan,
        ScoreBand::Average => Color::Yellow,
        ScoreBand::Poor => Color::Red,
    }
}

/// Bottom help bar listing key bindings
pub fn help_bar<'a>(bindings: &[(&'a str, &'a str)]) -> Paragraph<'a> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let spans: Vec<Span> = bindings
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(*key, key_style),
                Span::raw(format!(" {}  ", action)),
            ]
        })
        .collect();

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
}

/// A bordered stat card: label on top, value below
pub fn stat_card<'a>(label: &'a str, value: String, color: Color) -> Paragraph<'a> {
    Paragraph::new(vec![
        Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    )
}

/// Split an area into `count` equal columns
pub fn columns(area: Rect, count: u16) -> Vec<Rect> {
    let constraints: Vec<Constraint> = (0..count)
        .map(|_| Constraint::Ratio(1, count as u32))
        .collect();
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

/// Title block shared by all screens
pub fn title_bar<'a>(title: String, subtitle: &'a str) -> Paragraph<'a> {
    Paragraph::new(vec![
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    )
}
