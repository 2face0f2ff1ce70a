//! Static per-level parameter tables.
//!
//! Every lookup is keyed by the 1-based level number and clamps: level 0 reads the
//! first row, levels past the end of a table read its last row.

use crate::{
    ghost_agent::Personality,
    variables::{BASE_SPEED, TICKS_PER_SECOND},
};

/// Number of hunting phases per level (scatter/chase alternating).
pub const PHASE_COUNT: usize = 8;

/// Hunting phase durations in ticks. `None` never expires.
pub type PhaseDurations = [Option<u32>; PHASE_COUNT];

/// One row of the level table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LevelParams {
    pub ghost_speed_percent: u8,
    pub ghost_tunnel_speed_percent: u8,
    pub elroy1_dots_left: u16,
    pub elroy1_speed_percent: u8,
    pub elroy2_dots_left: u16,
    pub elroy2_speed_percent: u8,
    pub ghost_frightened_speed_percent: u8,
    pub pac_power_seconds: u8,
    pub num_flashes: u8,
}

const fn row(values: [u16; 9]) -> LevelParams {
    LevelParams {
        ghost_speed_percent: values[0] as u8,
        ghost_tunnel_speed_percent: values[1] as u8,
        elroy1_dots_left: values[2],
        elroy1_speed_percent: values[3] as u8,
        elroy2_dots_left: values[4],
        elroy2_speed_percent: values[5] as u8,
        ghost_frightened_speed_percent: values[6] as u8,
        pac_power_seconds: values[7] as u8,
        num_flashes: values[8] as u8,
    }
}

#[rustfmt::skip]
const LEVEL_TABLE: [LevelParams; 21] = [
    //   ghost tunnel elroy1     elroy2     fright power flashes
    /* 1*/ row([ 75, 40,  20,  80, 10,  85, 50, 6, 5]),
    /* 2*/ row([ 85, 45,  30,  90, 15,  95, 55, 5, 5]),
    /* 3*/ row([ 85, 45,  40,  90, 20,  95, 55, 4, 5]),
    /* 4*/ row([ 85, 45,  40,  90, 20,  95, 55, 3, 5]),
    /* 5*/ row([ 95, 50,  40, 100, 20, 105, 60, 2, 5]),
    /* 6*/ row([ 95, 50,  50, 100, 25, 105, 60, 5, 5]),
    /* 7*/ row([ 95, 50,  50, 100, 25, 105, 60, 2, 5]),
    /* 8*/ row([ 95, 50,  50, 100, 25, 105, 60, 2, 5]),
    /* 9*/ row([ 95, 50,  60, 100, 30, 105, 60, 1, 3]),
    /*10*/ row([ 95, 50,  60, 100, 30, 105, 60, 5, 5]),
    /*11*/ row([ 95, 50,  60, 100, 30, 105, 60, 2, 5]),
    /*12*/ row([ 95, 50,  80, 100, 40, 105, 60, 1, 3]),
    /*13*/ row([ 95, 50,  80, 100, 40, 105, 60, 1, 3]),
    /*14*/ row([ 95, 50,  80, 100, 40, 105, 60, 3, 5]),
    /*15*/ row([ 95, 50, 100, 100, 50, 105, 60, 1, 3]),
    /*16*/ row([ 95, 50, 100, 100, 50, 105, 60, 1, 3]),
    /*17*/ row([ 95, 50, 100, 100, 50, 105,  0, 0, 0]),
    /*18*/ row([ 95, 50, 100, 100, 50, 105, 60, 1, 3]),
    /*19*/ row([ 95, 50, 120, 100, 60, 105,  0, 0, 0]),
    /*20*/ row([ 95, 50, 120, 100, 60, 105,  0, 0, 0]),
    /*21*/ row([ 95, 50, 120, 100, 60, 105,  0, 0, 0]),
];

#[rustfmt::skip]
const HUNTING_TICKS_LEVEL_1: PhaseDurations =
    [Some(420), Some(1200), Some(420), Some(1200), Some(300), Some(1200), Some(300), None];
#[rustfmt::skip]
const HUNTING_TICKS_LEVEL_2_TO_4: PhaseDurations =
    [Some(420), Some(1200), Some(420), Some(1200), Some(300), Some(61980), Some(1), None];
#[rustfmt::skip]
const HUNTING_TICKS_LEVEL_5_PLUS: PhaseDurations =
    [Some(300), Some(1200), Some(300), Some(1200), Some(300), Some(62262), Some(1), None];

/// Sentinel for "this ghost has no global dot limit".
const NO_LIMIT: u32 = u32::MAX;
const GLOBAL_DOT_LIMITS: [u32; 4] = [NO_LIMIT, 7, 17, 32];

/// The global counter value at which a caged retreater switches the global counter off.
pub const GLOBAL_COUNTER_RETREATER_CUTOFF: u32 = 32;

fn table_index(level_number: u32, len: usize) -> usize {
    (level_number.max(1) as usize - 1).min(len - 1)
}

/// Returns the parameter row for the given level.
pub fn level_params(level_number: u32) -> &'static LevelParams {
    &LEVEL_TABLE[table_index(level_number, LEVEL_TABLE.len())]
}

/// Returns the hunting phase durations for the given level.
pub fn hunting_durations(level_number: u32) -> PhaseDurations {
    match level_number {
        0 | 1 => HUNTING_TICKS_LEVEL_1,
        2..=4 => HUNTING_TICKS_LEVEL_2_TO_4,
        _ => HUNTING_TICKS_LEVEL_5_PLUS,
    }
}

/// Returns the personal dot limit of each ghost for the given level.
pub fn personal_dot_limits(level_number: u32) -> [u32; 4] {
    match level_number {
        0 | 1 => [0, 0, 30, 60],
        2 => [0, 0, 0, 50],
        _ => [0, 0, 0, 0],
    }
}

/// Returns the global dot counter value that releases the given ghost, if any.
pub fn global_dot_limit(personality: Personality) -> Option<u32> {
    match GLOBAL_DOT_LIMITS[usize::from(u8::from(personality))] {
        NO_LIMIT => None,
        limit => Some(limit),
    }
}

/// Number of ticks without eating after which the preferred ghost is released.
pub fn starving_limit(level_number: u32) -> u32 {
    if level_number < 5 {
        4 * TICKS_PER_SECOND
    } else {
        3 * TICKS_PER_SECOND
    }
}

/// Converts a table percentage into pixels per tick.
pub fn percent_speed(percent: u8) -> f32 {
    f32::from(percent) * BASE_SPEED / 100.0
}

impl LevelParams {
    pub fn ghost_speed(&self) -> f32 {
        percent_speed(self.ghost_speed_percent)
    }

    pub fn ghost_tunnel_speed(&self) -> f32 {
        percent_speed(self.ghost_tunnel_speed_percent)
    }

    pub fn ghost_frightened_speed(&self) -> f32 {
        percent_speed(self.ghost_frightened_speed_percent)
    }

    /// Speed for an active cruise-Elroy stage (1 or 2).
    pub fn elroy_speed(&self, stage: u8) -> f32 {
        match stage {
            1 => percent_speed(self.elroy1_speed_percent),
            _ => percent_speed(self.elroy2_speed_percent),
        }
    }

    pub fn pac_power_ticks(&self) -> u32 {
        u32::from(self.pac_power_seconds) * TICKS_PER_SECOND
    }
}
