//! Read-only presentation models for a combat session.
//!
//! Everything here is derived from a [`combat_core::CombatSnapshot`]; nothing
//! feeds back into the engine. Frontends pick colours and emphasis by
//! implementing [`PresentationMapper`].
pub mod log;
pub mod presentation;
pub mod status;
pub mod summary;
pub mod view_model;

pub use log::{LogLine, LogPanel};
pub use presentation::PresentationMapper;
pub use status::{CombatantStatus, StrengthLevel, WeaponLabel, WoundLine};
pub use summary::SummaryCard;
pub use view_model::{CombatPanel, CombatViewModel, HeaderView};
