//! All game entity types: plain data plus a few geometric helpers.

use std::time::Duration;

use crate::config::Tuning;
use crate::pool::Pool;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box anchored at its top-left corner.
/// Arena y grows downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Overlap test.  Boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Weapons ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Weapon {
    Single,
    Burst,
    Heavy,
}

/// One bullet of a volley, relative to the player's horizontal centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shot {
    pub offset: f32,
    pub speed: f32,
    pub width: f32,
    pub height: f32,
}

const STANDARD_SPEED: f32 = 10.0;
const STANDARD_W: f32 = 5.0;
const STANDARD_H: f32 = 15.0;

const SINGLE_VOLLEY: [Shot; 1] = [Shot {
    offset: 0.0,
    speed: STANDARD_SPEED,
    width: STANDARD_W,
    height: STANDARD_H,
}];

const BURST_VOLLEY: [Shot; 3] = [
    Shot { offset: -15.0, speed: STANDARD_SPEED, width: STANDARD_W, height: STANDARD_H },
    Shot { offset: 0.0, speed: STANDARD_SPEED, width: STANDARD_W, height: STANDARD_H },
    Shot { offset: 15.0, speed: STANDARD_SPEED, width: STANDARD_W, height: STANDARD_H },
];

const HEAVY_VOLLEY: [Shot; 1] = [Shot {
    offset: 0.0,
    speed: 6.0,
    width: 14.0,
    height: 20.0,
}];

impl Weapon {
    pub const ALL: [Weapon; 3] = [Weapon::Single, Weapon::Burst, Weapon::Heavy];

    pub fn name(self) -> &'static str {
        match self {
            Weapon::Single => "Single",
            Weapon::Burst => "Burst",
            Weapon::Heavy => "Heavy",
        }
    }

    /// Bullets spawned by one trigger pull, in slot-allocation order.
    pub fn volley(self) -> &'static [Shot] {
        match self {
            Weapon::Single => &SINGLE_VOLLEY,
            Weapon::Burst => &BURST_VOLLEY,
            Weapon::Heavy => &HEAVY_VOLLEY,
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub speed: f32,
    pub lives: u32,
    pub weapon: Weapon,
}

// ── Pooled entities ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    /// Upward distance travelled per tick.
    pub speed: f32,
    /// Weapon that fired this bullet (drives the sprite only).
    pub weapon: Weapon,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    pub speed: f32,
    /// Animation phase in [0, 1).  Never touches the hitbox.
    pub phase: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LifeDrop {
    pub rect: Rect,
    pub speed: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeaponDrop {
    pub rect: Rect,
    pub speed: f32,
    pub weapon: Weapon,
}

// ── Input & output ────────────────────────────────────────────────────────────

/// Which keys are held during this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Something the host may want to react to (sound, flashes, logging).
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// A volley was fired.  `spawned` can be lower than the volley size when
    /// the bullet pool is exhausted.
    Shoot { weapon: Weapon, spawned: usize },
    /// A bullet destroyed an enemy at the given arena position.
    Hit { x: f32, y: f32 },
    LifeLost { lives: u32 },
    LifePickup { lives: u32 },
    WeaponPickup(Weapon),
    SessionEnded { score: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Ended,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire session state.  Owned by the frame loop and mutated in place
/// by `compute::tick`; every pool is sized once in `compute::init_state`.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub tuning: Tuning,
    pub player: Player,
    pub bullets: Pool<Bullet>,
    pub enemies: Pool<Enemy>,
    pub life_drop: Pool<LifeDrop>,
    pub weapon_drop: Pool<WeaponDrop>,
    pub score: u32,
    pub status: GameStatus,
    pub frame: u64,
    /// Clock reading of the last volley; session start until the first shot.
    pub last_shot_at: Duration,
    /// Background scroll offset in arena units (cosmetic).
    pub scroll: f32,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Events produced by the most recent tick.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }
}
