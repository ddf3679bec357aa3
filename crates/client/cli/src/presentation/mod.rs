//! Terminal presentation for the combat client.
pub mod event_loop;
pub mod terminal;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use event_loop::EventLoop;
pub use theme::RatatuiTheme;
