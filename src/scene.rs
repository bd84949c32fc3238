//! Draw directives: what a frame contains, independent of how it is drawn.

use crate::entities::{BoundingBox, Vector2};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Player,
    Enemy,
    PlayerProjectile,
    EnemyProjectile,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextSize {
    Title,
    Body,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextColor {
    Primary,
    Accent,
}

/// Where a text label's position sits relative to the rendered string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Center,
    TopLeft,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawDirective {
    /// Clear to the backdrop.
    Background,
    /// Darken everything drawn so far; `alpha` out of 255.
    Overlay { alpha: u8 },
    Entity { sprite: Sprite, bounds: BoundingBox },
    Text {
        text: String,
        position: Vector2,
        anchor: Anchor,
        size: TextSize,
        color: TextColor,
    },
    /// `fill` is in `0.0..=1.0`; `border` is the frame thickness outside `bounds`.
    HealthBar {
        bounds: BoundingBox,
        border: f32,
        fill: f32,
    },
    Button {
        label: &'static str,
        bounds: BoundingBox,
        highlighted: bool,
    },
}
