//! Target-tile strategies, one per ghost personality.
//!
//! Every function here is pure: the answer depends only on the arguments.

use crate::{
    config::SimConfig,
    ghost_agent::Personality,
    grid::Tile,
    hunting_timer::HuntingPhase,
    variables::{Direction, RETREAT_DISTANCE},
    world::WorldMap,
};

/// Where a ghost wants to go at its next tile-center decision.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Target {
    /// Move to the neighbor closest (straight-line) to this tile.
    Tile(Tile),
    /// Pick a random legal neighbor.
    Roam,
}

/// Everything a strategy may look at besides the ghost itself.
#[derive(Clone, Copy, Debug)]
pub struct TargetContext<'a> {
    pub world: &'a WorldMap,
    pub pac_tile: Tile,
    pub pac_dir: Direction,
    /// Blinky's current tile; the flanker reflects around it.
    pub blinky_tile: Tile,
    pub phase_index: u8,
    pub config: &'a SimConfig,
}

/// The tile `n` steps ahead of Pac. With the overflow bug, looking up also looks left.
pub fn tiles_ahead_of_pac(pac_tile: Tile, pac_dir: Direction, n: i32, overflow_bug: bool) -> Tile {
    let ahead = pac_tile.offset(pac_dir, n);
    if overflow_bug && pac_dir == Direction::Up {
        ahead.offset(Direction::Left, n)
    } else {
        ahead
    }
}

/// Chase-mode target of each personality, before any bounds check.
pub fn chase_tile(personality: Personality, ghost_tile: Tile, ctx: &TargetContext) -> Tile {
    let overflow_bug = ctx.config.simulate_overflow_bug;
    match personality {
        Personality::Blinky => ctx.pac_tile,
        Personality::Pinky => tiles_ahead_of_pac(ctx.pac_tile, ctx.pac_dir, 4, overflow_bug),
        Personality::Inky => {
            let pivot = tiles_ahead_of_pac(ctx.pac_tile, ctx.pac_dir, 2, overflow_bug);
            Tile::new(
                2 * pivot.col - ctx.blinky_tile.col,
                2 * pivot.row - ctx.blinky_tile.row,
            )
        }
        Personality::Clyde => {
            let distance_sq = ghost_tile.squared_euclidean_distance(ctx.pac_tile);
            if distance_sq > RETREAT_DISTANCE * RETREAT_DISTANCE {
                ctx.pac_tile
            } else {
                ctx.world.scatter_tile(personality)
            }
        }
    }
}

/// Target of a ghost in the Hunting state for the current phase.
///
/// A chase target outside the map falls back to the ghost's scatter corner for this
/// decision only.
pub fn hunting_target(personality: Personality, ghost_tile: Tile, ctx: &TargetContext) -> Target {
    let scatter_tile = ctx.world.scatter_tile(personality);
    match HuntingPhase::of_index(ctx.phase_index) {
        HuntingPhase::Scatter => {
            let roams = ctx.phase_index == 0
                && ctx.config.roam_in_first_scatter
                && matches!(personality, Personality::Blinky | Personality::Pinky);
            if roams {
                Target::Roam
            } else {
                Target::Tile(scatter_tile)
            }
        }
        HuntingPhase::Chase => {
            let tile = chase_tile(personality, ghost_tile, ctx);
            if ctx.world.in_bounds(tile) {
                Target::Tile(tile)
            } else {
                Target::Tile(scatter_tile)
            }
        }
    }
}
