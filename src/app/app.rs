//! Main application controller
//!
//! Owns the terminal and the session and runs the render/input loop.

use std::sync::Arc;
use std::time::Instant;

use crate::{
    app::{session::Session, tui::Tui},
    backend::GradingBackend,
    config::AppConfig,
    Result,
};

/// TUI application controller
pub struct App {
    /// Terminal UI handler
    tui: Tui,
    /// Router, screens and task events
    session: Session,
}

impl App {
    /// Create a new application instance
    pub fn new(config: &AppConfig, backend: Arc<dyn GradingBackend>) -> Result<Self> {
        Ok(Self {
            tui: Tui::new(config.ui.tick_rate())?,
            session: Session::new(config, backend),
        })
    }

    /// Initialize the terminal
    pub fn init(&mut self) -> Result<()> {
        self.tui.init()
    }

    /// Run the main application loop until the user quits
    pub async fn run(&mut self) -> Result<()> {
        tracing::info!("ui loop started");
        while !self.session.should_quit() {
            self.session.drain_events();
            self.session.expire_notifications(Instant::now());
            self.draw()?;
            if let Some(key) = self.tui.next_key()? {
                self.session.handle_key(key);
            }
            // Give spawned tasks a chance to run on a busy runtime
            tokio::task::yield_now().await;
        }
        tracing::info!("ui loop finished");
        Ok(())
    }

    /// Restore the terminal
    pub fn shutdown(&mut self) -> Result<()> {
        self.tui.restore()
    }

    fn draw(&mut self) -> Result<()> {
        let session = &mut self.session;
        self.tui.draw(|f| session.render(f))
    }
}
