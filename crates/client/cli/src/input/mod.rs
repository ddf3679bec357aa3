//! Input processing for the combat client.
//!
//! This module owns the keyboard-to-command mapping so the rest of the
//! application can remain agnostic about concrete key bindings or the
//! specifics of `crossterm` events.

use combat_core::{CombatSnapshot, CombatType, PlayerAction};
use combat_runtime::PlayerIntent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub mod provider;
pub use provider::CliActionProvider;

/// Slider step for plain and shifted arrow keys.
const RANGE_STEP: i32 = 1;
const RANGE_STEP_FAST: i32 = 10;

/// High-level outcome of processing a keyboard event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Forward an intent to the runtime.
    Submit(PlayerIntent),
    /// Move the range slider.
    NudgeRange(i32),
    /// No meaningful command was produced.
    None,
}

/// What the key map needs to know about the session.
#[derive(Clone, Copy, Debug)]
pub struct InputContext {
    pub combat_type: Option<CombatType>,
    pub ended: bool,
    /// Current slider value, submitted with a move.
    pub target_range: u32,
}

impl InputContext {
    pub fn new(snapshot: &CombatSnapshot, target_range: u32) -> Self {
        Self {
            combat_type: snapshot.combat_type,
            ended: snapshot.is_combat_ended(),
            target_range,
        }
    }
}

/// Translates `KeyEvent`s into combat intents, depending on the phase of the
/// encounter.
#[derive(Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key(&self, key: KeyEvent, context: &InputContext) -> KeyAction {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            return KeyAction::Quit;
        }

        if context.ended {
            return match key.code {
                KeyCode::Enter => KeyAction::Submit(PlayerIntent::ReturnToNarrative),
                _ => KeyAction::None,
            };
        }

        match context.combat_type {
            None => self.handle_type_selection(key),
            Some(CombatType::Brawling) => self.handle_brawling(key),
            Some(CombatType::Weapon) => self.handle_weapon(key, context.target_range),
        }
    }

    fn handle_type_selection(&self, key: KeyEvent) -> KeyAction {
        match key.code {
            KeyCode::Char('b') => {
                KeyAction::Submit(PlayerIntent::SelectCombatType(CombatType::Brawling))
            }
            KeyCode::Char('w') => KeyAction::Submit(PlayerIntent::SelectCombatType(CombatType::Weapon)),
            _ => KeyAction::None,
        }
    }

    fn handle_brawling(&self, key: KeyEvent) -> KeyAction {
        match key.code {
            KeyCode::Char('p') | KeyCode::Enter => act(PlayerAction::Punch),
            KeyCode::Char('g') => act(PlayerAction::Grapple),
            _ => KeyAction::None,
        }
    }

    fn handle_weapon(&self, key: KeyEvent, target_range: u32) -> KeyAction {
        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            RANGE_STEP_FAST
        } else {
            RANGE_STEP
        };

        match key.code {
            KeyCode::Char('f') | KeyCode::Enter => act(PlayerAction::Fire),
            KeyCode::Char('a') => act(PlayerAction::Aim),
            KeyCode::Char('r') => act(PlayerAction::Reload),
            KeyCode::Char('m') => act(PlayerAction::Move(target_range)),
            KeyCode::Left | KeyCode::Char('-') => KeyAction::NudgeRange(-step),
            KeyCode::Right | KeyCode::Char('+') => KeyAction::NudgeRange(step),
            KeyCode::Down => KeyAction::NudgeRange(-RANGE_STEP_FAST),
            KeyCode::Up => KeyAction::NudgeRange(RANGE_STEP_FAST),
            _ => KeyAction::None,
        }
    }
}

fn act(action: PlayerAction) -> KeyAction {
    KeyAction::Submit(PlayerIntent::Act(action))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn context(combat_type: Option<CombatType>, ended: bool) -> InputContext {
        InputContext {
            combat_type,
            ended,
            target_range: 35,
        }
    }

    #[test]
    fn type_selection_keys() {
        let handler = InputHandler::new();
        let ctx = context(None, false);
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('w')), &ctx),
            KeyAction::Submit(PlayerIntent::SelectCombatType(CombatType::Weapon))
        );
        assert_eq!(handler.handle_key(key(KeyCode::Char('f')), &ctx), KeyAction::None);
    }

    #[test]
    fn weapon_keys_carry_the_slider_range() {
        let handler = InputHandler::new();
        let ctx = context(Some(CombatType::Weapon), false);
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('m')), &ctx),
            KeyAction::Submit(PlayerIntent::Act(PlayerAction::Move(35)))
        );
        assert_eq!(
            handler.handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT), &ctx),
            KeyAction::NudgeRange(-10)
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('g')), &ctx),
            KeyAction::None
        );
    }

    #[test]
    fn brawling_keys() {
        let handler = InputHandler::new();
        let ctx = context(Some(CombatType::Brawling), false);
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('g')), &ctx),
            KeyAction::Submit(PlayerIntent::Act(PlayerAction::Grapple))
        );
    }

    #[test]
    fn finished_combat_only_returns_or_quits() {
        let handler = InputHandler::new();
        let ctx = context(Some(CombatType::Brawling), true);
        assert_eq!(
            handler.handle_key(key(KeyCode::Enter), &ctx),
            KeyAction::Submit(PlayerIntent::ReturnToNarrative)
        );
        assert_eq!(handler.handle_key(key(KeyCode::Char('p')), &ctx), KeyAction::None);
        assert_eq!(handler.handle_key(key(KeyCode::Char('q')), &ctx), KeyAction::Quit);
    }
}
