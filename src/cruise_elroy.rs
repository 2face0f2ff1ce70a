//! Cruise-Elroy: the direct-chaser's speed-up near the end of a level.
//!
//! The stage is one signed byte that deliberately carries two facts at once. The
//! encoding is part of the observable contract and must not be split up:
//!
//! | value    | meaning                                    |
//! |----------|--------------------------------------------|
//! | `0`      | off                                        |
//! | `1, 2`   | active stage                               |
//! | `-1, -2` | stage remembered but suspended (life lost) |

use crate::level_data::LevelParams;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CruiseElroy(i8);

impl CruiseElroy {
    pub const OFF: Self = Self(0);

    /// Builds a stage from its raw signed encoding, clamping to `-2..=2`.
    pub fn from_raw(value: i8) -> Self {
        Self(value.clamp(-2, 2))
    }

    pub fn raw(self) -> i8 {
        self.0
    }

    pub fn is_active(self) -> bool {
        self.0 > 0
    }

    pub fn is_suspended(self) -> bool {
        self.0 < 0
    }

    /// The active stage (1 or 2), or None when off or suspended.
    pub fn active_stage(self) -> Option<u8> {
        self.is_active().then_some(self.0 as u8)
    }

    /// Raises the stage to at least `stage`, keeping the sign. Never lowers it.
    fn raise_to(&mut self, stage: i8) {
        if self.0 < 0 {
            self.0 = self.0.min(-stage);
        } else {
            self.0 = self.0.max(stage);
        }
    }

    /// Applies the level's pellet thresholds. Returns true if the stage changed.
    pub fn update(&mut self, remaining_food: u32, params: &LevelParams) -> bool {
        let before = *self;
        if remaining_food <= u32::from(params.elroy2_dots_left) {
            self.raise_to(2);
        } else if remaining_food <= u32::from(params.elroy1_dots_left) {
            self.raise_to(1);
        }
        *self != before
    }

    /// Parks an active stage (sign flip to negative). No-op otherwise.
    pub fn suspend(&mut self) {
        if self.0 > 0 {
            self.0 = -self.0;
        }
    }

    /// Re-activates a suspended stage (sign flip back). No-op otherwise.
    pub fn resume(&mut self) {
        if self.0 < 0 {
            self.0 = -self.0;
        }
    }
}
