//! Notification overlay
//!
//! Draws live notifications as stacked boxes in the top-right corner, newest
//! on top, over whatever screen is showing.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::notify::{Notification, NotificationCenter};

const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 4;

/// Area of the `index`-th toast from the top, if it still fits
pub fn toast_area(screen: Rect, index: u16) -> Option<Rect> {
    let width = TOAST_WIDTH.min(screen.width);
    let y = screen.y + 1 + index * TOAST_HEIGHT;
    if width == 0 || y + TOAST_HEIGHT > screen.bottom() {
        return None;
    }
    Some(Rect::new(screen.right() - width, y, width, TOAST_HEIGHT))
}

pub fn render(f: &mut Frame, notifications: &NotificationCenter) {
    let screen = f.size();
    let mut newest_first: Vec<&Notification> = notifications.visible().collect();
    newest_first.reverse();
    for (index, notification) in newest_first.into_iter().enumerate() {
        let Some(area) = toast_area(screen, index as u16) else {
            break;
        };
        f.render_widget(Clear, area);
        f.render_widget(toast(notification), area);
    }
}

fn toast(notification: &Notification) -> Paragraph<'static> {
    let color = if notification.is_destructive() {
        Color::Red
    } else {
        Color::Green
    };
    Paragraph::new(vec![
        Line::from(Span::styled(
            notification.title.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(notification.description.clone()),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_stack_from_top_right() {
        let screen = Rect::new(0, 0, 100, 30);
        let first = toast_area(screen, 0).unwrap();
        let second = toast_area(screen, 1).unwrap();
        assert_eq!(first.right(), 100);
        assert_eq!(second.y, first.y + TOAST_HEIGHT);
    }

    #[test]
    fn test_toasts_clip_on_small_screens() {
        let screen = Rect::new(0, 0, 30, 6);
        let area = toast_area(screen, 0).unwrap();
        assert_eq!(area.width, 30);
        assert!(toast_area(screen, 1).is_none());
    }
}
