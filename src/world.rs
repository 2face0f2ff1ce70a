use std::collections::VecDeque;

use itertools::iproduct;
use tracing::debug;

use crate::{
    error::MapError,
    ghost_agent::Personality,
    grid::{PixelPos, Tile, ARCADE_MAZE, ARCADE_NO_UP_TILES, CELL_SYMBOLS},
    variables::{CellKind, Direction, HALF_TILE, TILE_SIZE},
};

/// Kind of food eaten from a tile.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Food {
    Pellet,
    Energizer,
}

/// The ghost house: its bounding tiles (walls included) and the fixed spots ghosts
/// use when entering, leaving and waiting inside.
#[derive(Clone, Debug, PartialEq)]
pub struct House {
    pub min_tile: Tile,
    pub max_tile: Tile,
    pub door_tiles: Vec<Tile>,
    /// Spot just above the door where ghosts leave and enter the house.
    pub entry_position: PixelPos,
    /// Middle of the house interior; the ambusher's home.
    pub center_position: PixelPos,
    /// Heading of a ghost stepping out onto the entry position. Left unless the corridor
    /// only opens to the right.
    pub exit_direction: Direction,
}

impl House {
    pub fn contains(&self, tile: Tile) -> bool {
        (self.min_tile.col..=self.max_tile.col).contains(&tile.col)
            && (self.min_tile.row..=self.max_tile.row).contains(&tile.row)
    }

    /// Start position of the given ghost at the beginning of a level or life.
    pub fn home_position(&self, personality: Personality) -> PixelPos {
        let side = (2 * TILE_SIZE) as f32;
        let center = self.center_position;
        match personality {
            Personality::Blinky => self.entry_position,
            Personality::Pinky => center,
            Personality::Inky => PixelPos::new(center.x - side, center.y),
            Personality::Clyde => PixelPos::new(center.x + side, center.y),
        }
    }

    /// Spot where the given ghost comes back to life after being eaten.
    pub fn revival_position(&self, personality: Personality) -> PixelPos {
        match personality {
            Personality::Blinky => self.center_position,
            other => self.home_position(other),
        }
    }
}

/// The maze of one level. Cell kinds never change; only the food flags do.
#[derive(Clone, Debug)]
pub struct WorldMap {
    width: i32,
    height: i32,
    cells: Vec<CellKind>,
    food: Vec<bool>,
    total_food: u32,
    portals: Vec<(Tile, Tile)>,
    house: House,
    pac_start: PixelPos,
    no_up_tiles: Vec<Tile>,
    /// Shortest ghost path length from each tile to the house entry tile.
    entry_distances: Vec<Option<u32>>,
}

impl WorldMap {
    /// Parses a map from ASCII rows (see `src/maze_data.txt` for the symbols).
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        let first = rows.first().ok_or(MapError::Empty)?;
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        let mut pac_tiles = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(MapError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                let kind = *CELL_SYMBOLS
                    .get(&symbol)
                    .ok_or(MapError::UnknownSymbol { symbol, col, row })?;
                if symbol == 'P' {
                    pac_tiles.push(Tile::new(col as i32, row as i32));
                }
                cells.push(kind);
            }
        }

        let width = width as i32;
        let height = rows.len() as i32;
        let tiles_of = |kind: CellKind| {
            iproduct!(0..height, 0..width)
                .filter(|&(row, col)| cells[(row * width + col) as usize] == kind)
                .map(|(row, col)| Tile::new(col, row))
                .collect::<Vec<_>>()
        };
        let house = Self::locate_house(&tiles_of(CellKind::Door), &tiles_of(CellKind::House))?;

        let food: Vec<bool> = cells.iter().map(|kind| kind.holds_food()).collect();
        let total_food = food.iter().filter(|f| **f).count() as u32;

        let portals = (0..height)
            .filter(|&row| {
                cells[(row * width) as usize] == CellKind::Tunnel
                    && cells[(row * width + width - 1) as usize] == CellKind::Tunnel
            })
            .map(|row| (Tile::new(0, row), Tile::new(width - 1, row)))
            .collect();

        let pac_start = if pac_tiles.is_empty() {
            house.entry_position
        } else {
            let n = pac_tiles.len() as f32;
            let (sum_x, sum_y) = pac_tiles
                .iter()
                .map(|t| t.center())
                .fold((0.0, 0.0), |(x, y), c| (x + c.x, y + c.y));
            PixelPos::new(sum_x / n, sum_y / n)
        };

        let mut world = Self {
            width,
            height,
            cells,
            food,
            total_food,
            portals,
            house,
            pac_start,
            no_up_tiles: Vec::new(),
            entry_distances: Vec::new(),
        };
        world.check_house_entry()?;
        world.entry_distances = world.compute_entry_distances();
        debug!(width, height, total_food, "parsed world map");
        Ok(world)
    }

    /// The arcade maze, including its no-up tiles.
    pub fn arcade() -> Result<Self, MapError> {
        let world = Self::parse(&ARCADE_MAZE)?;
        Ok(world.with_no_up_tiles(&ARCADE_NO_UP_TILES))
    }

    /// Marks tiles where hunting ghosts may not choose to move up.
    pub fn with_no_up_tiles(mut self, tiles: &[Tile]) -> Self {
        self.no_up_tiles = tiles.to_vec();
        self
    }

    /// Ghosts leave onto the entry position and eyes come back to it, so its tile has to
    /// be part of the maze. Also points the exit heading at an open side of the entry.
    fn check_house_entry(&mut self) -> Result<(), MapError> {
        let entry = self.house.entry_position;
        let tile = entry.tile();
        if !self.is_accessible_for_ghost(tile) {
            return Err(MapError::BlockedEntry {
                col: tile.col,
                row: tile.row,
            });
        }
        let left_side = entry.moved(Direction::Left, HALF_TILE).tile();
        if !self.is_accessible_for_ghost(left_side) {
            self.house.exit_direction = Direction::Right;
        }
        Ok(())
    }

    fn locate_house(doors: &[Tile], interior: &[Tile]) -> Result<House, MapError> {
        let door_row = doors.first().ok_or(MapError::MissingDoor)?.row;
        let door_tiles: Vec<Tile> = doors
            .iter()
            .copied()
            .filter(|t| t.row == door_row)
            .collect();
        if interior.is_empty() {
            return Err(MapError::MissingHouse);
        }
        let min_col = interior.iter().map(|t| t.col).min().unwrap_or_default();
        let max_col = interior.iter().map(|t| t.col).max().unwrap_or_default();
        let min_row = interior.iter().map(|t| t.row).min().unwrap_or_default();
        let max_row = interior.iter().map(|t| t.row).max().unwrap_or_default();
        let door_min = door_tiles.iter().map(|t| t.col).min().unwrap_or_default();
        let door_max = door_tiles.iter().map(|t| t.col).max().unwrap_or_default();

        let ts = TILE_SIZE as f32;
        let door_center_x = (door_min + door_max + 1) as f32 * ts / 2.0;
        Ok(House {
            min_tile: Tile::new(min_col - 1, min_row - 1),
            max_tile: Tile::new(max_col + 1, max_row + 1),
            door_tiles,
            entry_position: PixelPos::new(door_center_x, (door_row - 1) as f32 * ts + HALF_TILE),
            center_position: PixelPos::new(
                door_center_x,
                (min_row + max_row + 1) as f32 * ts / 2.0,
            ),
            exit_direction: Direction::Left,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, tile: Tile) -> bool {
        (0..self.width).contains(&tile.col) && (0..self.height).contains(&tile.row)
    }

    fn index(&self, tile: Tile) -> Option<usize> {
        self.in_bounds(tile)
            .then(|| (tile.row * self.width + tile.col) as usize)
    }

    /// The cell kind at the given tile, or None outside the map.
    pub fn cell(&self, tile: Tile) -> Option<CellKind> {
        self.index(tile).map(|i| self.cells[i])
    }

    fn is_portal_row(&self, row: i32) -> bool {
        self.portals.iter().any(|(left, _)| left.row == row)
    }

    /// Maps a tile beyond the left/right edge of a portal row onto the other side.
    /// Returns None for other tiles outside the map.
    pub fn normalize(&self, tile: Tile) -> Option<Tile> {
        if self.in_bounds(tile) {
            Some(tile)
        } else if self.is_portal_row(tile.row) {
            Some(Tile::new(tile.col.rem_euclid(self.width), tile.row))
        } else {
            None
        }
    }

    /// Wraps a pixel position that crossed the left or right edge of the map.
    pub fn wrap_position(&self, pos: PixelPos) -> PixelPos {
        let w = (self.width * TILE_SIZE) as f32;
        if pos.x < 0.0 {
            PixelPos::new(pos.x + w, pos.y)
        } else if pos.x >= w {
            PixelPos::new(pos.x - w, pos.y)
        } else {
            pos
        }
    }

    pub fn portals(&self) -> &[(Tile, Tile)] {
        &self.portals
    }

    pub fn is_tunnel(&self, tile: Tile) -> bool {
        self.normalize(tile).and_then(|t| self.cell(t)) == Some(CellKind::Tunnel)
    }

    pub fn is_wall(&self, tile: Tile) -> bool {
        self.cell(tile) == Some(CellKind::Wall)
    }

    /// True if a ghost roaming the maze may step onto this tile. The door and the house
    /// interior are off limits; ghosts use scripted paths there.
    pub fn is_accessible_for_ghost(&self, tile: Tile) -> bool {
        match self.normalize(tile).and_then(|t| self.cell(t)) {
            None | Some(CellKind::Wall | CellKind::Door | CellKind::House) => false,
            Some(_) => true,
        }
    }

    pub fn is_one_way_down(&self, tile: Tile) -> bool {
        self.no_up_tiles.contains(&tile)
    }

    pub fn house(&self) -> &House {
        &self.house
    }

    pub fn pac_start(&self) -> PixelPos {
        self.pac_start
    }

    /// The fixed corner tile each ghost heads for while scattering.
    pub fn scatter_tile(&self, personality: Personality) -> Tile {
        match personality {
            Personality::Blinky => Tile::new(self.width - 3, 0),
            Personality::Pinky => Tile::new(2, 0),
            Personality::Inky => Tile::new(self.width - 1, self.height - 1),
            Personality::Clyde => Tile::new(0, self.height - 1),
        }
    }

    pub fn has_food(&self, tile: Tile) -> bool {
        self.index(tile).is_some_and(|i| self.food[i])
    }

    /// Removes the food on the given tile, returning what was there.
    pub fn eat_food(&mut self, tile: Tile) -> Option<Food> {
        let i = self.index(tile)?;
        if !self.food[i] {
            return None;
        }
        self.food[i] = false;
        match self.cells[i] {
            CellKind::Energizer => Some(Food::Energizer),
            _ => Some(Food::Pellet),
        }
    }

    pub fn total_food(&self) -> u32 {
        self.total_food
    }

    pub fn uneaten_food(&self) -> u32 {
        self.food.iter().filter(|f| **f).count() as u32
    }

    pub fn eaten_food(&self) -> u32 {
        self.total_food - self.uneaten_food()
    }

    /// Puts every pellet and energizer back.
    pub fn reset_food(&mut self) {
        for (food, kind) in self.food.iter_mut().zip(&self.cells) {
            *food = kind.holds_food();
        }
    }

    /// Shortest path length for a ghost from this tile to the house entry tile.
    pub fn distance_to_house_entry(&self, tile: Tile) -> Option<u32> {
        self.normalize(tile)
            .and_then(|t| self.index(t))
            .and_then(|i| self.entry_distances[i])
    }

    /// Breadth-first search from the house entry tile over ghost-accessible tiles.
    fn compute_entry_distances(&self) -> Vec<Option<u32>> {
        let mut dists = vec![None; self.cells.len()];
        let start = self.house.entry_position.tile();
        let Some(start_index) = self.index(start) else {
            return dists;
        };
        dists[start_index] = Some(0);

        let mut queue = VecDeque::from([(start, 0)]);
        while let Some((cur_pos, cur_dist)) = queue.pop_front() {
            let neighbor_dist = cur_dist + 1;
            for dir in Direction::PRIORITY {
                let Some(neighbor) = self.normalize(cur_pos.neighbor(dir)) else {
                    continue;
                };
                if !self.is_accessible_for_ghost(neighbor) {
                    continue;
                }
                if let Some(i) = self.index(neighbor) {
                    if dists[i].is_none() {
                        dists[i] = Some(neighbor_dist);
                        queue.push_back((neighbor, neighbor_dist));
                    }
                }
            }
        }
        dists
    }
}
