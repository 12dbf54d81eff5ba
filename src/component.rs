//! Component trait - Interface for the screens and dialogs
//!
//! Each component owns its local state, turns key events into Actions
//! and renders itself into a frame.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Trait for UI components
///
/// 1. `handle_key_event` - map a key to an Action (local edits such as
///    typing into an input may happen here)
/// 2. `update` - apply an Action, optionally returning a follow-up
/// 3. `draw` - render into `area`
pub trait Component {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
