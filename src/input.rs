//! Polled input, one snapshot per tick.

use crate::entities::Vector2;

/// Keyboard stand-ins for the on-screen buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuKey {
    /// Start / Play Again.
    Primary,
    /// Tutorial / Home.
    Secondary,
}

/// Everything the frontend reports for a single tick.
///
/// `move_left` and `move_right` are held states; `fire`, `click` and `menu`
/// are discrete triggers that fired since the previous poll.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    /// Pointer press, in playfield pixels.
    pub click: Option<Vector2>,
    /// Latest known pointer position, for button hover.
    pub pointer: Option<Vector2>,
    pub menu: Option<MenuKey>,
    pub quit: bool,
}

impl InputSnapshot {
    pub fn click_at(x: f32, y: f32) -> Self {
        Self {
            click: Some(Vector2::new(x, y)),
            ..Self::default()
        }
    }
}
