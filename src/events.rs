use crate::{
    gatekeeper::ReleaseReason,
    ghost_agent::{GhostState, Personality},
    grid::Tile,
    hunting_timer::PhaseChange,
    world::Food,
};

/// Things that happened during a tick, in the order they happened. Drained by the
/// caller with [`crate::game_state::GameState::drain_events`].
#[derive(Clone, Debug, PartialEq)]
pub enum SimEvent {
    FoodEaten {
        tile: Tile,
        food: Food,
        remaining: u32,
    },
    GhostReleased {
        ghost: Personality,
        reason: ReleaseReason,
    },
    GhostStateChanged {
        ghost: Personality,
        from: GhostState,
        to: GhostState,
    },
    /// New raw (signed) stage of the direct chaser.
    CruiseElroyChanged { stage: i8 },
    PhaseChanged(PhaseChange),
    PowerStarted { ticks: u32 },
    /// Frightened ghosts are about to recover.
    PowerEnding,
    PowerEnded,
    GhostEaten {
        ghost: Personality,
        killed_index: u8,
        points: u32,
    },
    PacKilled { by: Personality },
    LevelComplete,
}
