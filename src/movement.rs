//! Per-tick ghost movement through the maze.
//!
//! Ghosts move from tile center to tile center. A direction is chosen only when a ghost
//! sits exactly on a center it has not decided at yet; between centers it keeps going.

use arrayvec::ArrayVec;
use rand::{seq::SliceRandom, Rng};
use tracing::trace;

use crate::{
    ghost_agent::{GhostAgent, GhostState},
    grid::{PixelPos, Tile},
    targeting::Target,
    variables::{Direction, TILE_SIZE},
    world::WorldMap,
};

/// How a ghost scores its options at a tile center.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Steering {
    /// Closest neighbor to the tile by straight-line distance.
    Toward(Tile),
    /// Any legal neighbor, picked at random.
    Roam,
    /// Shortest maze path to the house entry.
    HouseEntry,
}

impl From<Target> for Steering {
    fn from(target: Target) -> Self {
        match target {
            Target::Tile(tile) => Steering::Toward(tile),
            Target::Roam => Steering::Roam,
        }
    }
}

/// What happened during one movement step.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MoveOutcome {
    /// An eaten ghost stopped on the house entry position.
    pub reached_house_entry: bool,
}

/// Directions a ghost may take from `tile`, in tie-break order, never including the
/// reverse of its current direction.
pub fn legal_directions(
    ghost: &GhostAgent,
    world: &WorldMap,
    tile: Tile,
) -> ArrayVec<Direction, 4> {
    let back = ghost.move_dir().opposite();
    let no_up = ghost.state() == GhostState::Hunting && world.is_one_way_down(tile);
    Direction::PRIORITY
        .into_iter()
        .filter(|&dir| dir != back)
        .filter(|&dir| !(no_up && dir == Direction::Up))
        .filter(|&dir| world.is_accessible_for_ghost(tile.neighbor(dir)))
        .collect()
}

/// Picks the direction to leave `tile` by. A pending reversal is consumed here. Returns
/// None when the ghost is boxed in and must stand still.
pub fn choose_direction<R: Rng + ?Sized>(
    ghost: &mut GhostAgent,
    world: &WorldMap,
    tile: Tile,
    steering: Steering,
    rng: &mut R,
) -> Option<Direction> {
    let back = ghost.move_dir().opposite();
    if ghost.take_reverse() && world.is_accessible_for_ghost(tile.neighbor(back)) {
        return Some(back);
    }

    let candidates = legal_directions(ghost, world, tile);
    if candidates.is_empty() {
        // dead end: turning around is the only way out
        return world
            .is_accessible_for_ghost(tile.neighbor(back))
            .then_some(back);
    }

    // min_by_key keeps the first of equal minima, which is the tie-break order
    match steering {
        Steering::Toward(target) => candidates
            .iter()
            .copied()
            .min_by_key(|&dir| tile.neighbor(dir).squared_euclidean_distance(target)),
        Steering::Roam => candidates.choose(rng).copied(),
        Steering::HouseEntry => candidates.iter().copied().min_by_key(|&dir| {
            let neighbor = tile.neighbor(dir);
            world.distance_to_house_entry(neighbor).unwrap_or(u32::MAX)
        }),
    }
}

/// Distance along `dir` from `pos` to `stop`, if `stop` lies ahead on the same line.
fn distance_to_stop_point(pos: PixelPos, dir: Direction, stop: PixelPos) -> Option<f32> {
    let (dx, dy) = dir.vector();
    let along = if dir.is_horizontal() {
        (pos.y == stop.y).then(|| (stop.x - pos.x) * dx as f32)
    } else {
        (pos.x == stop.x).then(|| (stop.y - pos.y) * dy as f32)
    }?;
    (along >= 0.0).then_some(along)
}

/// Moves a ghost through the maze by its current speed.
///
/// The step is split at tile centers so no decision point is skipped. Eaten ghosts stop
/// exactly on the house entry position.
pub fn advance<R: Rng + ?Sized>(
    ghost: &mut GhostAgent,
    world: &WorldMap,
    steering: Steering,
    rng: &mut R,
) -> MoveOutcome {
    let entry = world.house().entry_position;
    let mut budget = ghost.speed();

    while budget > 0.0 {
        let pos = ghost.position();
        let tile = pos.tile();

        if ghost.state() == GhostState::Eaten
            && (pos == entry || (pos.is_at_tile_center() && tile == entry.tile()))
        {
            // eyes reaching the entry tile off the entry line are put onto it
            ghost.set_position(entry);
            return MoveOutcome {
                reached_house_entry: true,
            };
        }

        if pos.is_at_tile_center() && ghost.last_decision_tile() != Some(tile) {
            match choose_direction(ghost, world, tile, steering, rng) {
                Some(dir) => {
                    let personality = ghost.personality();
                    trace!(?personality, ?tile, ?dir, ?steering, "direction chosen");
                    ghost.set_move_and_wish_dir(dir);
                    ghost.set_last_decision_tile(Some(tile));
                }
                // boxed in: decide again next tick rather than walk on
                None => return MoveOutcome::default(),
            }
        }

        let dir = ghost.move_dir();
        let mut to_center = pos.distance_to_next_center(dir);
        if to_center == 0.0 {
            to_center = TILE_SIZE as f32;
        }

        if ghost.state() == GhostState::Eaten {
            if let Some(to_entry) = distance_to_stop_point(pos, dir, entry) {
                if to_entry <= budget.min(to_center) {
                    ghost.set_position(entry);
                    return MoveOutcome {
                        reached_house_entry: true,
                    };
                }
            }
        }

        let step = budget.min(to_center);
        let next = if step == to_center {
            // land exactly on the center
            pos.moved(dir, to_center).tile().center()
        } else {
            pos.moved(dir, step)
        };
        ghost.set_position(world.wrap_position(next));
        budget -= step;
    }
    MoveOutcome::default()
}
