//! launchdeck-tui: terminal widgets for the launchdeck dashboard
//!
//! Built on ratatui and crossterm. Widgets are stateless renderers over
//! borrowed data, except [`widgets::InputBox`] which owns its edit buffer.

pub mod input;
pub mod terminal;
pub mod theme;
pub mod widgets;

pub use input::Action;
pub use terminal::TerminalGuard;
pub use theme::Theme;
