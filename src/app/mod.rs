//! TUI application module
//!
//! Contains the terminal user interface components, screen management,
//! and application state handling.

pub mod app;
pub mod creation;
pub mod screens;
pub mod session;
pub mod state;
pub mod toast;
pub mod tui;

pub use app::App;
pub use creation::{CreationForm, CreationPhase};
pub use screens::{CreateScreen, DashboardScreen, ViewerPanel, ViewerScreen};
pub use session::Session;
pub use state::{NavigationAction, Router, View};
pub use tui::Tui;
