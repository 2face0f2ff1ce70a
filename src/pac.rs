use crate::{
    grid::{PixelPos, Tile},
    variables::Direction,
};

/// Pac as seen by the ghosts. The caller moves Pac between ticks; the simulation only
/// tracks its timers.
#[derive(Clone, Debug)]
pub struct Pac {
    position: PixelPos,
    direction: Direction,
    start_position: PixelPos,
    /// Ticks of power (frightened ghosts) left.
    power_ticks: u32,
    /// Ticks since Pac last ate something.
    starving_ticks: u32,
    alive: bool,
}

impl Pac {
    pub fn new(start_position: PixelPos) -> Self {
        Self {
            position: start_position,
            direction: Direction::Left,
            start_position,
            power_ticks: 0,
            starving_ticks: 0,
            alive: true,
        }
    }

    /// Back to the start spot for a new life.
    pub fn respawn(&mut self) {
        self.position = self.start_position;
        self.direction = Direction::Left;
        self.power_ticks = 0;
        self.starving_ticks = 0;
        self.alive = true;
    }

    pub fn position(&self) -> PixelPos {
        self.position
    }

    pub fn tile(&self) -> Tile {
        self.position.tile()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn power_ticks(&self) -> u32 {
        self.power_ticks
    }

    pub fn has_power(&self) -> bool {
        self.power_ticks > 0
    }

    pub fn starving_ticks(&self) -> u32 {
        self.starving_ticks
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn place(&mut self, tile: Tile, direction: Direction) {
        self.position = tile.center();
        self.direction = direction;
    }

    /// Moves to a tile, deriving the heading from the step taken. A step of zero keeps
    /// the previous heading.
    pub fn step_to(&mut self, tile: Tile) {
        let current = self.tile();
        if tile.col > current.col {
            self.direction = Direction::Right;
        } else if tile.col < current.col {
            self.direction = Direction::Left;
        } else if tile.row > current.row {
            self.direction = Direction::Down;
        } else if tile.row < current.row {
            self.direction = Direction::Up;
        }
        self.position = tile.center();
    }

    pub(crate) fn set_power_ticks(&mut self, ticks: u32) {
        self.power_ticks = ticks;
    }

    /// Counts down one tick of power. Returns the ticks left.
    pub(crate) fn drain_power(&mut self) -> u32 {
        self.power_ticks = self.power_ticks.saturating_sub(1);
        self.power_ticks
    }

    pub(crate) fn starve(&mut self) {
        self.starving_ticks += 1;
    }

    pub(crate) fn reset_starving(&mut self) {
        self.starving_ticks = 0;
    }

    pub(crate) fn kill(&mut self) {
        self.alive = false;
        self.power_ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_to_derives_heading() {
        let mut pac = Pac::new(Tile::new(5, 5).center());
        pac.step_to(Tile::new(5, 4));
        assert_eq!(pac.direction(), Direction::Up);
        pac.step_to(Tile::new(6, 4));
        assert_eq!(pac.direction(), Direction::Right);
        pac.step_to(Tile::new(6, 4));
        assert_eq!(pac.direction(), Direction::Right);
        pac.step_to(Tile::new(6, 5));
        assert_eq!(pac.direction(), Direction::Down);
        assert_eq!(pac.tile(), Tile::new(6, 5));
    }

    #[test]
    fn respawn_clears_timers() {
        let mut pac = Pac::new(Tile::new(1, 1).center());
        pac.place(Tile::new(3, 3), Direction::Up);
        pac.set_power_ticks(10);
        pac.starve();
        pac.kill();
        assert!(!pac.is_alive());
        assert!(!pac.has_power());
        pac.respawn();
        assert!(pac.is_alive());
        assert_eq!(pac.tile(), Tile::new(1, 1));
        assert_eq!(pac.starving_ticks(), 0);
    }
}
