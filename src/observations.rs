//! Grid-shaped observation tensor of a level, for learning agents and debugging views.
//!
//! Layout is `[channel, col, row]`:
//!
//! | channel | contents                                   |
//! |---------|--------------------------------------------|
//! | 0       | walls                                      |
//! | 1       | food (1.0 pellet, 2.0 energizer)           |
//! | 2       | Pac                                        |
//! | 3..=6   | one ghost each, in personality order       |
//! | 7       | frightened ghosts                          |
//! | 8       | eaten ghosts (eyes)                        |
//! | 9       | whole plane 1.0 during chase phases        |

use itertools::iproduct;
use ndarray::{s, Array3};

use crate::{
    game_state::Level,
    ghost_agent::GhostState,
    grid::Tile,
    variables::CellKind,
};

pub const OBS_CHANNELS: usize = 10;

const WALL_CHANNEL: usize = 0;
const FOOD_CHANNEL: usize = 1;
const PAC_CHANNEL: usize = 2;
const GHOST_CHANNEL: usize = 3;
const FRIGHTENED_CHANNEL: usize = 7;
const EATEN_CHANNEL: usize = 8;
const CHASE_CHANNEL: usize = 9;

pub fn observation(level: &Level) -> Array3<f32> {
    let world = level.world();
    let (width, height) = (world.width() as usize, world.height() as usize);
    let mut obs = Array3::zeros((OBS_CHANNELS, width, height));

    for (col, row) in iproduct!(0..width, 0..height) {
        let tile = Tile::new(col as i32, row as i32);
        if world.is_wall(tile) {
            obs[(WALL_CHANNEL, col, row)] = 1.0;
        }
        if world.has_food(tile) {
            obs[(FOOD_CHANNEL, col, row)] = match world.cell(tile) {
                Some(CellKind::Energizer) => 2.0,
                _ => 1.0,
            };
        }
    }

    let mut mark = |channel: usize, tile: Tile| {
        if let Some(t) = world.normalize(tile) {
            obs[(channel, t.col as usize, t.row as usize)] = 1.0;
        }
    };
    mark(PAC_CHANNEL, level.pac().tile());
    for ghost in level.ghosts() {
        mark(GHOST_CHANNEL + ghost.personality().index(), ghost.tile());
        match ghost.state() {
            GhostState::Frightened => mark(FRIGHTENED_CHANNEL, ghost.tile()),
            GhostState::Eaten => mark(EATEN_CHANNEL, ghost.tile()),
            _ => {}
        }
    }

    if level.hunting_timer().is_chase_phase() {
        obs.slice_mut(s![CHASE_CHANNEL, .., ..]).fill(1.0);
    }
    obs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SimConfig, game_state::GameState, ghost_agent::Personality};

    #[test]
    fn arcade_observation_layout() {
        let mut sim = GameState::new(SimConfig::default());
        sim.configure_arcade_level(1).unwrap();
        let obs = sim.obs().unwrap();
        assert_eq!(obs.shape(), &[OBS_CHANNELS, 28, 31]);

        assert_eq!(obs[(WALL_CHANNEL, 0, 0)], 1.0);
        assert_eq!(obs[(FOOD_CHANNEL, 1, 1)], 1.0);
        assert_eq!(obs[(FOOD_CHANNEL, 1, 3)], 2.0);
        let food = obs.slice(s![FOOD_CHANNEL, .., ..]);
        assert_eq!(food.iter().filter(|v| **v > 0.0).count(), 244);

        let level = sim.level().unwrap();
        let pac = level.pac().tile();
        assert_eq!(obs[(PAC_CHANNEL, pac.col as usize, pac.row as usize)], 1.0);
        let blinky = level.ghost(Personality::Blinky).tile();
        let (col, row) = (blinky.col as usize, blinky.row as usize);
        assert_eq!(obs[(GHOST_CHANNEL, col, row)], 1.0);
        assert_eq!(obs.slice(s![FRIGHTENED_CHANNEL, .., ..]).sum(), 0.0);
        // level starts scattering
        assert_eq!(obs.slice(s![CHASE_CHANNEL, .., ..]).sum(), 0.0);
    }
}
