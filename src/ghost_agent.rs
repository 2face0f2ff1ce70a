use num_enum::{IntoPrimitive, TryFromPrimitive};
use tracing::debug;

use crate::{
    cruise_elroy::CruiseElroy,
    grid::{PixelPos, Tile},
    variables::{Direction, GHOST_SCORE},
    world::House,
};

/// The four ghost identities. The discriminant is also the fixed update and release
/// priority order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Personality {
    /// Red; chases Pac directly.
    Blinky = 0,
    /// Pink; ambushes ahead of Pac.
    Pinky = 1,
    /// Cyan; flanks Pac using Blinky's position.
    Inky = 2,
    /// Orange (Sue in Ms. Pac-Man); retreats when close.
    Clyde = 3,
}

impl Personality {
    pub const ALL: [Personality; 4] = [
        Personality::Blinky,
        Personality::Pinky,
        Personality::Inky,
        Personality::Clyde,
    ];

    pub fn index(self) -> usize {
        usize::from(u8::from(self))
    }

    /// Initial direction at level/life start.
    fn home_direction(self, house: &House) -> Direction {
        match self {
            Personality::Blinky => house.exit_direction,
            Personality::Pinky => Direction::Down,
            Personality::Inky | Personality::Clyde => Direction::Up,
        }
    }
}

/// Ghost FSM states.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum GhostState {
    /// Caged, waiting for the gatekeeper.
    Locked = 0,
    /// Following the scripted path out of the house.
    LeavingHouse = 1,
    /// Scatter/chase targeting.
    Hunting = 2,
    /// Vulnerable; random turns.
    Frightened = 3,
    /// Eyes travelling back to the house entry.
    Eaten = 4,
    /// Following the scripted path down into the house.
    EnteringHouse = 5,
}

#[derive(Clone, Debug)]
pub struct GhostAgent {
    personality: Personality,
    position: PixelPos,
    move_dir: Direction,
    wish_dir: Direction,
    state: GhostState,
    speed: f32,
    /// Set on phase change or power start; consumed at the next tile-center decision.
    reverse_pending: bool,
    /// Position in the current power phase's victim chain; None when not eaten.
    killed_index: Option<u8>,
    /// Only ever non-zero for Blinky.
    cruise_elroy: CruiseElroy,
    /// Tile where the last direction decision was made, so it is made once per tile.
    last_decision_tile: Option<Tile>,
    home_position: PixelPos,
    home_direction: Direction,
    revival_position: PixelPos,
}

impl GhostAgent {
    pub fn new(personality: Personality, house: &House) -> Self {
        let home_position = house.home_position(personality);
        let home_direction = personality.home_direction(house);
        Self {
            personality,
            position: home_position,
            move_dir: home_direction,
            wish_dir: home_direction,
            state: GhostState::Locked,
            speed: 0.0,
            reverse_pending: false,
            killed_index: None,
            cruise_elroy: CruiseElroy::OFF,
            last_decision_tile: None,
            home_position,
            home_direction,
            revival_position: house.revival_position(personality),
        }
    }

    /// Puts the ghost back into the house (or, for Blinky, in front of it), locked.
    /// The cruise-Elroy stage is left alone; callers decide whether to suspend or clear it.
    pub fn respawn(&mut self) {
        self.position = self.home_position;
        self.move_dir = self.home_direction;
        self.wish_dir = self.move_dir;
        self.state = GhostState::Locked;
        self.speed = 0.0;
        self.reverse_pending = false;
        self.killed_index = None;
        self.last_decision_tile = None;
    }

    pub fn personality(&self) -> Personality {
        self.personality
    }

    pub fn position(&self) -> PixelPos {
        self.position
    }

    pub fn tile(&self) -> Tile {
        self.position.tile()
    }

    pub fn move_dir(&self) -> Direction {
        self.move_dir
    }

    pub fn wish_dir(&self) -> Direction {
        self.wish_dir
    }

    pub fn state(&self) -> GhostState {
        self.state
    }

    pub fn in_state(&self, states: &[GhostState]) -> bool {
        states.contains(&self.state)
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn killed_index(&self) -> Option<u8> {
        self.killed_index
    }

    pub fn cruise_elroy(&self) -> CruiseElroy {
        self.cruise_elroy
    }

    pub fn reverse_pending(&self) -> bool {
        self.reverse_pending
    }

    pub fn home_position(&self) -> PixelPos {
        self.home_position
    }

    pub fn revival_position(&self) -> PixelPos {
        self.revival_position
    }

    /// Teleports the ghost onto a tile center, heading the given way. Intended for
    /// replays and scripted setups; it does not change the FSM state.
    pub fn place_at_tile(&mut self, tile: Tile, dir: Direction) {
        self.position = tile.center();
        self.move_dir = dir;
        self.wish_dir = dir;
        self.last_decision_tile = None;
    }

    /// Switches the FSM state. Returns the previous state if it actually changed.
    pub(crate) fn set_state(&mut self, state: GhostState) -> Option<GhostState> {
        if self.state == state {
            return None;
        }
        debug!(ghost = ?self.personality, from = ?self.state, to = ?state, "ghost state changed");
        Some(std::mem::replace(&mut self.state, state))
    }

    pub(crate) fn set_position(&mut self, position: PixelPos) {
        self.position = position;
    }

    pub(crate) fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub(crate) fn set_move_and_wish_dir(&mut self, dir: Direction) {
        self.move_dir = dir;
        self.wish_dir = dir;
    }

    pub(crate) fn cruise_elroy_mut(&mut self) -> &mut CruiseElroy {
        &mut self.cruise_elroy
    }

    pub(crate) fn set_killed_index(&mut self, index: Option<u8>) {
        self.killed_index = index;
    }

    pub(crate) fn request_reverse(&mut self) {
        self.reverse_pending = true;
    }

    /// Consumes the pending reversal, if any.
    pub(crate) fn take_reverse(&mut self) -> bool {
        std::mem::take(&mut self.reverse_pending)
    }

    pub(crate) fn clear_reverse(&mut self) {
        self.reverse_pending = false;
    }

    pub(crate) fn last_decision_tile(&self) -> Option<Tile> {
        self.last_decision_tile
    }

    pub(crate) fn set_last_decision_tile(&mut self, tile: Option<Tile>) {
        self.last_decision_tile = tile;
    }

    /// Points scored for eating this ghost, given its place in the victim chain.
    pub fn points_for_kill(killed_index: u8) -> u32 {
        GHOST_SCORE << killed_index.min(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{tests::SIDE_DOOR_MAP, WorldMap};

    #[test]
    fn ghosts_start_locked_at_home() {
        let world = WorldMap::arcade().unwrap();
        for personality in Personality::ALL {
            let ghost = GhostAgent::new(personality, world.house());
            assert_eq!(ghost.state(), GhostState::Locked);
            assert_eq!(ghost.position(), world.house().home_position(personality));
            assert_eq!(ghost.killed_index(), None);
            assert_eq!(ghost.cruise_elroy(), CruiseElroy::OFF);
        }
        let blinky = GhostAgent::new(Personality::Blinky, world.house());
        assert_eq!(blinky.move_dir(), Direction::Left);
        assert!(!world.house().contains(blinky.tile()));
    }

    #[test]
    fn respawn_restores_defaults_but_keeps_elroy() {
        let world = WorldMap::arcade().unwrap();
        let mut ghost = GhostAgent::new(Personality::Blinky, world.house());
        ghost.place_at_tile(Tile::new(1, 1), Direction::Down);
        ghost.set_state(GhostState::Frightened);
        ghost.set_killed_index(Some(2));
        ghost.request_reverse();
        *ghost.cruise_elroy_mut() = CruiseElroy::from_raw(2);

        ghost.respawn();
        assert_eq!(ghost.position(), ghost.home_position());
        assert_eq!(ghost.state(), GhostState::Locked);
        assert_eq!(ghost.killed_index(), None);
        assert!(!ghost.reverse_pending());
        assert_eq!(ghost.cruise_elroy().raw(), 2);
        assert_eq!(ghost.move_dir(), Direction::Left);
    }

    #[test]
    fn blinky_faces_the_open_side_of_the_entry() {
        let world = WorldMap::parse(&SIDE_DOOR_MAP).unwrap();
        let mut blinky = GhostAgent::new(Personality::Blinky, world.house());
        assert_eq!(blinky.move_dir(), Direction::Right);
        blinky.place_at_tile(Tile::new(1, 1), Direction::Up);
        blinky.respawn();
        assert_eq!(blinky.move_dir(), Direction::Right);
        assert_eq!(blinky.position(), world.house().entry_position);
    }

    #[test]
    fn reversal_is_consumed_once() {
        let world = WorldMap::arcade().unwrap();
        let mut ghost = GhostAgent::new(Personality::Inky, world.house());
        ghost.request_reverse();
        assert!(ghost.take_reverse());
        assert!(!ghost.take_reverse());
    }

    #[test]
    fn kill_points_double_along_the_chain() {
        let points: Vec<u32> = (0..4).map(GhostAgent::points_for_kill).collect();
        assert_eq!(points, vec![200, 400, 800, 1600]);
    }

    #[test]
    fn personality_ids_round_trip() {
        assert_eq!(Personality::try_from(2u8).ok(), Some(Personality::Inky));
        assert!(Personality::try_from(7u8).is_err());
    }
}
