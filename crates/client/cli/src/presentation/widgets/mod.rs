//! Widgets composing the combat screen.
pub mod footer;
pub mod header;
pub mod log;
pub mod range;
pub mod status;
pub mod summary;
