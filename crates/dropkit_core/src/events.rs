//! Key codes for keyboard handlers
//!
//! Hosts translate their platform key events into [`KeyCode`] values before
//! forwarding them to a controller. The numeric values follow the virtual key
//! codes the desktop event router already reports (backspace = 8, arrows =
//! 37..=40, and so on), so most hosts can wrap the raw code directly.

use std::fmt;

/// A platform-independent key code
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const BACKSPACE: KeyCode = KeyCode(8);
    pub const TAB: KeyCode = KeyCode(9);
    pub const ENTER: KeyCode = KeyCode(13);
    pub const ESCAPE: KeyCode = KeyCode(27);
    pub const SPACE: KeyCode = KeyCode(32);
    pub const END: KeyCode = KeyCode(35);
    pub const HOME: KeyCode = KeyCode(36);
    pub const LEFT: KeyCode = KeyCode(37);
    pub const UP: KeyCode = KeyCode(38);
    pub const RIGHT: KeyCode = KeyCode(39);
    pub const DOWN: KeyCode = KeyCode(40);
    pub const DELETE: KeyCode = KeyCode(127);

    /// Wrap a raw key code reported by the platform
    pub const fn from_raw(code: u32) -> Self {
        KeyCode(code)
    }

    /// The raw numeric code
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Whether this is the up or down arrow
    pub fn is_vertical_arrow(self) -> bool {
        self == KeyCode::UP || self == KeyCode::DOWN
    }

    fn name(self) -> Option<&'static str> {
        Some(match self {
            KeyCode::BACKSPACE => "Backspace",
            KeyCode::TAB => "Tab",
            KeyCode::ENTER => "Enter",
            KeyCode::ESCAPE => "Escape",
            KeyCode::SPACE => "Space",
            KeyCode::END => "End",
            KeyCode::HOME => "Home",
            KeyCode::LEFT => "ArrowLeft",
            KeyCode::UP => "ArrowUp",
            KeyCode::RIGHT => "ArrowRight",
            KeyCode::DOWN => "ArrowDown",
            KeyCode::DELETE => "Delete",
            _ => return None,
        })
    }
}

impl From<u32> for KeyCode {
    fn from(code: u32) -> Self {
        KeyCode(code)
    }
}

impl fmt::Debug for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "KeyCode::{}", name),
            None => write!(f, "KeyCode({})", self.0),
        }
    }
}
