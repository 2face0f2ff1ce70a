use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Movement directions. The discriminants follow the arcade tie-break order, so
/// iterating [`Direction::PRIORITY`] visits Up, Left, Down, Right.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Left = 1,
    Down = 2,
    Right = 3,
}

impl Direction {
    /// Order in which equally good directions are preferred.
    pub const PRIORITY: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit vector in tile space (rows grow downwards).
    pub fn vector(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Down => (0, 1),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Enum for map cell kinds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum CellKind {
    /// Wall
    Wall = 1,
    /// Walkable space without food
    Empty = 2,
    /// Walkable space holding a normal pellet
    Pellet = 3,
    /// Walkable space holding an energizer (power pellet)
    Energizer = 4,
    /// Slow tunnel leading to a wrap-around portal
    Tunnel = 5,
    /// House door, passable only for ghosts entering or leaving the house
    Door = 6,
    /// House interior
    House = 7,
}

impl CellKind {
    pub fn holds_food(self) -> bool {
        matches!(self, CellKind::Pellet | CellKind::Energizer)
    }
}

// geometry
pub const TILE_SIZE: i32 = 8;
pub const HALF_TILE: f32 = TILE_SIZE as f32 / 2.0;

// simulation cadence
pub const TICKS_PER_SECOND: u32 = 60;

// speeds, in pixels per tick
/// Speed corresponding to 100% in the level table.
pub const BASE_SPEED: f32 = 1.25;
pub const GHOST_RETURNING_SPEED: f32 = 2.0;
pub const GHOST_HOUSE_SPEED: f32 = 0.5;

/// Vertical distance (pixels) a caged ghost bobs above and below its home spot.
pub const HOUSE_BOUNCE_RANGE: f32 = 2.0;

/// Points for the first ghost eaten in a power phase; doubles with each further victim.
pub const GHOST_SCORE: u32 = 200;

/// Remaining power ticks at which ghosts start flashing.
pub const POWER_FADE_TICKS: u32 = 2 * TICKS_PER_SECOND;

/// A retreater closer to Pac than this (in tiles) heads for its corner instead.
pub const RETREAT_DISTANCE: i32 = 8;
