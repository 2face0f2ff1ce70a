use static_assertions::{assert_eq_size, const_assert};

use crate::variables::{CellKind, Direction, HALF_TILE, TILE_SIZE};

// data computed by the build script (build.rs):

macro_rules! include_generated {
    ($filename:literal) => {
        include!(concat!(env!("OUT_DIR"), "/", $filename))
    };
}

pub const ARCADE_MAZE_HEIGHT: usize = include_generated!("ARCADE_MAZE_HEIGHT.txt");
/// The arcade maze (28x31) in the symbol format understood by [`crate::world::WorldMap::parse`].
pub const ARCADE_MAZE: [&str; ARCADE_MAZE_HEIGHT] = include_generated!("ARCADE_MAZE.rs");
pub const ARCADE_PELLET_COUNT: u32 = include_generated!("ARCADE_PELLET_COUNT.txt");
pub const ARCADE_ENERGIZER_COUNT: u32 = include_generated!("ARCADE_ENERGIZER_COUNT.txt");

/// Symbol table for the ASCII map format.
pub(crate) static CELL_SYMBOLS: phf::Map<char, CellKind> = include_generated!("CELL_SYMBOLS.rs");

/// Tiles above the house and above Pac's start where hunting ghosts may not turn up.
pub const ARCADE_NO_UP_TILES: [Tile; 4] = [
    Tile::new(12, 11),
    Tile::new(15, 11),
    Tile::new(12, 23),
    Tile::new(15, 23),
];

assert_eq_size!(CellKind, u8);
const_assert!(TILE_SIZE % 2 == 0);

/// Integer tile coordinates. Columns grow to the right, rows grow downwards.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Tile {
    pub col: i32,
    pub row: i32,
}

impl Tile {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Returns the tile `n` steps away in the given direction.
    pub fn offset(self, dir: Direction, n: i32) -> Self {
        let (dx, dy) = dir.vector();
        Self::new(self.col + dx * n, self.row + dy * n)
    }

    pub fn neighbor(self, dir: Direction) -> Self {
        self.offset(dir, 1)
    }

    pub fn squared_euclidean_distance(self, other: Tile) -> i32 {
        let dx = self.col - other.col;
        let dy = self.row - other.row;
        dx * dx + dy * dy
    }

    pub fn euclidean_distance(self, other: Tile) -> f32 {
        (self.squared_euclidean_distance(other) as f32).sqrt()
    }

    pub fn manhattan_distance(self, other: Tile) -> i32 {
        (self.col - other.col).abs() + (self.row - other.row).abs()
    }

    /// Pixel position of this tile's center.
    pub fn center(self) -> PixelPos {
        PixelPos::new(
            (self.col * TILE_SIZE) as f32 + HALF_TILE,
            (self.row * TILE_SIZE) as f32 + HALF_TILE,
        )
    }
}

impl From<(i32, i32)> for Tile {
    fn from((col, row): (i32, i32)) -> Self {
        Self::new(col, row)
    }
}

/// Sub-tile position in pixels. The point is the actor's center.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelPos {
    pub x: f32,
    pub y: f32,
}

impl PixelPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The tile containing this position.
    pub fn tile(self) -> Tile {
        let ts = TILE_SIZE as f32;
        Tile::new((self.x / ts).floor() as i32, (self.y / ts).floor() as i32)
    }

    /// Signed offset from the center of the containing tile, in `[-4, 4)` per axis.
    pub fn offset_from_center(self) -> (f32, f32) {
        let center = self.tile().center();
        (self.x - center.x, self.y - center.y)
    }

    /// True when the position lies exactly on its tile's center.
    pub fn is_at_tile_center(self) -> bool {
        self.offset_from_center() == (0.0, 0.0)
    }

    /// Pixels left to travel along `dir` before reaching the next tile center.
    /// Zero when already on a center.
    pub fn distance_to_next_center(self, dir: Direction) -> f32 {
        let (off_x, off_y) = self.offset_from_center();
        let (dx, dy) = dir.vector();
        // offset measured along the direction of travel
        let along = if dir.is_horizontal() {
            off_x * dx as f32
        } else {
            off_y * dy as f32
        };
        if along < 0.0 {
            -along
        } else if along == 0.0 {
            0.0
        } else {
            TILE_SIZE as f32 - along
        }
    }

    pub fn moved(self, dir: Direction, distance: f32) -> Self {
        let (dx, dy) = dir.vector();
        Self::new(self.x + dx as f32 * distance, self.y + dy as f32 * distance)
    }

    /// Position halfway between this tile-aligned position and the next tile to the right.
    pub fn half_tile_right(self) -> Self {
        Self::new(self.x + HALF_TILE, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_center_roundtrips_to_tile() {
        let tile = Tile::new(13, 11);
        assert_eq!(tile.center(), PixelPos::new(108.0, 92.0));
        assert_eq!(tile.center().tile(), tile);
        assert!(tile.center().is_at_tile_center());
        assert!(!tile.center().half_tile_right().is_at_tile_center());
    }

    #[test]
    fn distances() {
        let a = Tile::new(2, 3);
        let b = Tile::new(5, 7);
        assert_eq!(a.manhattan_distance(b), 7);
        assert_eq!(a.squared_euclidean_distance(b), 25);
        assert_eq!(a.euclidean_distance(b), 5.0);
    }

    #[test]
    fn distance_to_next_center_depends_on_heading() {
        // between tiles 13 and 14 of row 11
        let pos = Tile::new(13, 11).center().half_tile_right();
        assert_eq!(pos.tile(), Tile::new(14, 11));
        assert_eq!(pos.distance_to_next_center(Direction::Left), 4.0);
        assert_eq!(pos.distance_to_next_center(Direction::Right), 4.0);

        let pos = PixelPos::new(109.0, 92.0);
        assert_eq!(pos.distance_to_next_center(Direction::Right), 7.0);
        assert_eq!(pos.distance_to_next_center(Direction::Left), 1.0);
        let center = Tile::new(1, 1).center();
        assert_eq!(center.distance_to_next_center(Direction::Up), 0.0);
    }

    #[test]
    fn offset_projects_along_direction() {
        let pac = Tile::new(10, 10);
        assert_eq!(pac.offset(Direction::Up, 4), Tile::new(10, 6));
        assert_eq!(pac.offset(Direction::Right, 2), Tile::new(12, 10));
        assert_eq!(pac.neighbor(Direction::Down), Tile::new(10, 11));
    }

    #[test]
    fn arcade_maze_is_well_formed() {
        assert_eq!(ARCADE_MAZE.len(), 31);
        assert!(ARCADE_MAZE.iter().all(|row| row.chars().count() == 28));
        assert_eq!(ARCADE_PELLET_COUNT, 240);
        assert_eq!(ARCADE_ENERGIZER_COUNT, 4);
        assert_eq!(CELL_SYMBOLS.get(&'#'), Some(&CellKind::Wall));
        assert_eq!(CELL_SYMBOLS.get(&'?'), None);
    }
}
