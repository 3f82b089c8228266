//! Ephemeral user notifications
//!
//! Toast-style messages raised by user actions and background tasks. Each
//! carries a title, a description and a severity, and expires after the
//! configured time to live.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::ExamError;

/// How a notification is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    /// Validation and failure messages
    Destructive,
}

/// A single toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn normal(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Normal,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }

    pub fn question_paper_selected(name: &str) -> Self {
        Self::normal(
            "Question paper uploaded",
            format!("{} has been selected.", name),
        )
    }

    pub fn answer_sheets_selected(count: usize) -> Self {
        Self::normal(
            "Answer sheets uploaded",
            format!("{} answer sheet(s) selected.", count),
        )
    }

    pub fn missing_information() -> Self {
        Self::destructive(
            "Missing Information",
            "Please fill all fields and upload required files.",
        )
    }

    pub fn exam_processed() -> Self {
        Self::normal(
            "Exam processed successfully!",
            "The exam has been created and is ready for review.",
        )
    }

    pub fn processing_failed() -> Self {
        Self::destructive("Error", "Failed to process the exam. Please try again.")
    }

    pub fn scores_recalculated() -> Self {
        Self::normal(
            "Scores recalculated",
            "All question scores have been recalculated successfully.",
        )
    }

    pub fn question_recalculated(question_id: u32) -> Self {
        Self::normal(
            "Question recalculated",
            format!("Question {} scores have been updated.", question_id),
        )
    }

    pub fn recalculation_failed() -> Self {
        Self::destructive("Error", "Failed to recalculate scores. Please try again.")
    }

    /// Map an error onto the message the user sees
    pub fn from_error(error: &ExamError) -> Self {
        match error {
            ExamError::MissingFields(_) => Self::missing_information(),
            ExamError::Upload(_) | ExamError::Processing(_) => Self::processing_failed(),
            ExamError::Recalculation(_) => Self::recalculation_failed(),
            other => Self::destructive("Error", other.to_string()),
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }
}

#[derive(Debug, Clone)]
struct Posted {
    notification: Notification,
    posted_at: Instant,
}

/// Queue of live notifications, newest last
#[derive(Debug)]
pub struct NotificationCenter {
    posted: VecDeque<Posted>,
    ttl: Duration,
    max_visible: usize,
}

impl NotificationCenter {
    pub fn new(ttl: Duration, max_visible: usize) -> Self {
        Self {
            posted: VecDeque::new(),
            ttl,
            max_visible: max_visible.max(1),
        }
    }

    /// Post a notification, dropping the oldest beyond the visible limit
    pub fn push(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }

    fn push_at(&mut self, notification: Notification, now: Instant) {
        tracing::debug!(title = %notification.title, "notification posted");
        self.posted.push_back(Posted {
            notification,
            posted_at: now,
        });
        while self.posted.len() > self.max_visible {
            self.posted.pop_front();
        }
    }

    /// Drop notifications older than the time to live
    pub fn expire(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.posted
            .retain(|p| now.saturating_duration_since(p.posted_at) < ttl);
    }

    /// Live notifications, oldest first
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.posted.iter().map(|p| &p.notification)
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.posted.back().map(|p| &p.notification)
    }

    pub fn len(&self) -> usize {
        self.posted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posted.is_empty()
    }
}
