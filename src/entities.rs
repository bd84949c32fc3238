//! All game entity types. Plain data plus a little geometry; the rules that
//! move and mutate them live in `compute` and `collision`.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// A scalar pair in playfield pixels. Used for positions and velocities.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub w: f32,
    pub h: f32,
}

impl Size {
    pub const fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }
}

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

// ── Entity base ───────────────────────────────────────────────────────────────

/// Attributes shared by everything that moves on the playfield.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entity {
    /// Top-left corner.
    pub position: Vector2,
    pub size: Size,
    /// Cleared by the collision pass; dead entities are pruned from their
    /// owning collection before the tick ends.
    pub alive: bool,
}

impl Entity {
    pub fn new(position: Vector2, size: Size) -> Self {
        Self {
            position,
            size,
            alive: true,
        }
    }

    /// Build an entity whose box is centred on `center`.
    pub fn centered_at(center: Vector2, size: Size) -> Self {
        Self::new(
            Vector2::new(center.x - size.w / 2.0, center.y - size.h / 2.0),
            size,
        )
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.position.x, self.position.y, self.size.w, self.size.h)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Faction {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub entity: Entity,
    /// Per-tick displacement. Only the vertical component is ever non-zero:
    /// negative travels up, positive travels down.
    pub velocity: Vector2,
    pub faction: Faction,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub entity: Entity,
    /// Always within `0..=max_health`.
    pub health: u32,
    pub max_health: u32,
    /// Horizontal pixels per tick.
    pub speed: f32,
    pub fire_delay_ms: u64,
    /// `None` until the first successful shot.
    pub last_shot_ms: Option<u64>,
    pub projectiles: Vec<Projectile>,
}

#[derive(Clone, Debug)]
pub struct EnemyUnit {
    pub entity: Entity,
    /// Spawn x; the unit oscillates within `move_range` of it.
    pub origin_x: f32,
    /// `1.0` for right, `-1.0` for left.
    pub direction: f32,
    pub speed: f32,
    pub move_range: f32,
    pub shoot_delay_ms: u64,
    /// Signed so the randomised spawn offset may reach before time zero.
    pub last_shot_ms: i64,
}

// ── Formation ─────────────────────────────────────────────────────────────────

/// The enemy grid for one session, kept in row-major spawn order.
#[derive(Clone, Debug, Default)]
pub struct Formation {
    pub units: Vec<EnemyUnit>,
}

// ── Session & screens ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Start,
    Tutorial,
    Playing,
    Finished,
}

/// How a finished session is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    GameOver,
}

/// One play-through. Created by "Start" or "Play Again", dropped on "Home".
#[derive(Clone, Debug)]
pub struct GameSession {
    pub score: u32,
    pub player: Player,
    pub formation: Formation,
    pub enemy_projectiles: Vec<Projectile>,
    pub screen_width: f32,
    pub screen_height: f32,
    /// Ticks simulated so far.
    pub tick: u64,
}

impl GameSession {
    /// Victory is decided by looking at the formation when asked, not by
    /// remembering which end condition fired.
    pub fn outcome(&self) -> Outcome {
        if self.formation.units.is_empty() {
            Outcome::Victory
        } else {
            Outcome::GameOver
        }
    }
}
