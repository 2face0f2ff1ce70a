//! Decides when caged ghosts may leave the house.
//!
//! Three rules, checked in order for the first caged ghost: its personal dot counter
//! (while the global counter is off), the shared global dot counter (after a life was
//! lost) and a starvation timer that fires when Pac stops eating.

use tracing::debug;

use crate::{
    ghost_agent::{GhostAgent, GhostState, Personality},
    level_data::{
        global_dot_limit, personal_dot_limits, starving_limit, GLOBAL_COUNTER_RETREATER_CUTOFF,
    },
};

/// Why a ghost was let out.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReleaseReason {
    /// The direct chaser never waits.
    Immediate,
    PersonalDotLimit,
    GlobalDotLimit,
    /// Pac went too long without eating.
    Starving,
}

#[derive(Clone, Debug)]
pub struct GateKeeper {
    level_number: u32,
    personal_limits: [u32; 4],
    personal_counters: [u32; 4],
    global_counter: u32,
    global_enabled: bool,
}

/// First caged ghost in priority order.
fn first_locked(ghosts: &[GhostAgent; 4]) -> Option<&GhostAgent> {
    ghosts.iter().find(|g| g.state() == GhostState::Locked)
}

impl GateKeeper {
    pub fn new(level_number: u32) -> Self {
        Self {
            level_number,
            personal_limits: personal_dot_limits(level_number),
            personal_counters: [0; 4],
            global_counter: 0,
            global_enabled: false,
        }
    }

    /// Clears every counter and switches to the global counter, as after Pac dies.
    pub fn reset_after_life_lost(&mut self) {
        self.personal_counters = [0; 4];
        self.global_counter = 0;
        self.global_enabled = true;
    }

    pub fn level_number(&self) -> u32 {
        self.level_number
    }

    pub fn personal_counter(&self, personality: Personality) -> u32 {
        self.personal_counters[personality.index()]
    }

    pub fn global_counter(&self) -> u32 {
        self.global_counter
    }

    pub fn is_global_counter_enabled(&self) -> bool {
        self.global_enabled
    }

    /// The ghost whose personal counter food currently feeds: the first caged ghost other
    /// than the direct chaser.
    pub fn preferred_ghost(ghosts: &[GhostAgent; 4]) -> Option<Personality> {
        ghosts
            .iter()
            .filter(|g| g.personality() != Personality::Blinky)
            .find(|g| g.state() == GhostState::Locked)
            .map(GhostAgent::personality)
    }

    /// Counts one eaten pellet or energizer.
    pub fn register_food_eaten(&mut self, ghosts: &[GhostAgent; 4]) {
        if self.global_enabled {
            let clyde_caged = ghosts[Personality::Clyde.index()].state() == GhostState::Locked;
            if clyde_caged && self.global_counter == GLOBAL_COUNTER_RETREATER_CUTOFF {
                debug!("global dot counter switched off");
                self.global_enabled = false;
                self.global_counter = 0;
            } else {
                self.global_counter += 1;
            }
        } else if let Some(preferred) = Self::preferred_ghost(ghosts) {
            self.personal_counters[preferred.index()] += 1;
        }
    }

    /// Returns the ghost to release this tick, if any. Only the first caged ghost is
    /// considered. A starvation release leaves it to the caller to reset the timer.
    pub fn check_release(
        &self,
        ghosts: &[GhostAgent; 4],
        starving_ticks: u32,
    ) -> Option<(Personality, ReleaseReason)> {
        let personality = first_locked(ghosts)?.personality();
        let index = personality.index();
        let reason = if personality == Personality::Blinky {
            ReleaseReason::Immediate
        } else if !self.global_enabled
            && self.personal_counters[index] >= self.personal_limits[index]
        {
            ReleaseReason::PersonalDotLimit
        } else if self.global_enabled
            && global_dot_limit(personality)
                .is_some_and(|limit| self.global_counter >= limit)
        {
            ReleaseReason::GlobalDotLimit
        } else if starving_ticks >= starving_limit(self.level_number) {
            ReleaseReason::Starving
        } else {
            return None;
        };
        Some((personality, reason))
    }

    #[cfg(test)]
    pub(crate) fn set_global_counter(&mut self, value: u32) {
        self.global_enabled = true;
        self.global_counter = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::WorldMap;
    use Personality::{Blinky, Clyde, Inky, Pinky};
    use ReleaseReason::{GlobalDotLimit, Immediate, PersonalDotLimit, Starving};

    fn ghosts(world: &WorldMap) -> [GhostAgent; 4] {
        array_init::array_init(|i| GhostAgent::new(Personality::ALL[i], world.house()))
    }

    fn release(ghosts: &mut [GhostAgent; 4], personality: Personality) {
        ghosts[personality.index()].set_state(GhostState::Hunting);
    }

    #[test]
    fn direct_chaser_leaves_at_once() {
        let world = WorldMap::arcade().unwrap();
        let ghosts = ghosts(&world);
        let keeper = GateKeeper::new(1);
        assert_eq!(keeper.check_release(&ghosts, 0), Some((Blinky, Immediate)));
    }

    #[test]
    fn personal_counters_feed_one_ghost_at_a_time() {
        let world = WorldMap::arcade().unwrap();
        let mut ghosts = ghosts(&world);
        let mut keeper = GateKeeper::new(1);
        release(&mut ghosts, Blinky);
        // Pinky's limit is zero on level 1
        let next = keeper.check_release(&ghosts, 0);
        assert_eq!(next, Some((Pinky, PersonalDotLimit)));
        release(&mut ghosts, Pinky);

        for _ in 0..29 {
            keeper.register_food_eaten(&ghosts);
        }
        assert_eq!(keeper.personal_counter(Inky), 29);
        assert_eq!(keeper.personal_counter(Clyde), 0);
        assert_eq!(keeper.check_release(&ghosts, 0), None);
        keeper.register_food_eaten(&ghosts);
        let next = keeper.check_release(&ghosts, 0);
        assert_eq!(next, Some((Inky, PersonalDotLimit)));
        release(&mut ghosts, Inky);

        keeper.register_food_eaten(&ghosts);
        assert_eq!(keeper.personal_counter(Clyde), 1);
        assert_eq!(GateKeeper::preferred_ghost(&ghosts), Some(Clyde));
    }

    #[test]
    fn global_counter_after_life_lost() {
        let world = WorldMap::arcade().unwrap();
        let mut ghosts = ghosts(&world);
        let mut keeper = GateKeeper::new(1);
        keeper.reset_after_life_lost();
        release(&mut ghosts, Blinky);

        for _ in 0..6 {
            keeper.register_food_eaten(&ghosts);
        }
        assert_eq!(keeper.check_release(&ghosts, 0), None);
        keeper.register_food_eaten(&ghosts);
        let next = keeper.check_release(&ghosts, 0);
        assert_eq!(next, Some((Pinky, GlobalDotLimit)));
        release(&mut ghosts, Pinky);

        for _ in 7..17 {
            keeper.register_food_eaten(&ghosts);
        }
        let next = keeper.check_release(&ghosts, 0);
        assert_eq!(next, Some((Inky, GlobalDotLimit)));
        release(&mut ghosts, Inky);

        for _ in 17..32 {
            keeper.register_food_eaten(&ghosts);
        }
        assert_eq!(keeper.global_counter(), 32);
        let next = keeper.check_release(&ghosts, 0);
        assert_eq!(next, Some((Clyde, GlobalDotLimit)));

        // Clyde still caged with the counter at exactly 32: back to personal counters
        keeper.register_food_eaten(&ghosts);
        assert!(!keeper.is_global_counter_enabled());
        assert_eq!(keeper.global_counter(), 0);
    }

    #[test]
    fn starving_releases_the_first_caged_ghost() {
        let world = WorldMap::arcade().unwrap();
        let mut ghosts = ghosts(&world);
        let keeper = GateKeeper::new(1);
        release(&mut ghosts, Blinky);
        release(&mut ghosts, Pinky);
        assert_eq!(keeper.check_release(&ghosts, 239), None);
        assert_eq!(keeper.check_release(&ghosts, 240), Some((Inky, Starving)));

        let later_level = GateKeeper::new(5).check_release(&ghosts, 180);
        assert_eq!(later_level, Some((Inky, PersonalDotLimit)));
    }

    #[test]
    fn saturated_global_counter_releases_in_priority_order() {
        let world = WorldMap::arcade().unwrap();
        let mut ghosts = ghosts(&world);
        let mut keeper = GateKeeper::new(3);
        keeper.set_global_counter(1000);
        let mut order = Vec::new();
        while let Some((personality, _)) = keeper.check_release(&ghosts, 0) {
            order.push(personality);
            release(&mut ghosts, personality);
        }
        assert_eq!(order, Personality::ALL.to_vec());
    }
}
