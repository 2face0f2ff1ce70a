/// Behavior switches for a simulation. Both quirks of the original hardware are on by
/// default.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SimConfig {
    /// When Pac faces up, "tiles ahead of Pac" also shift the same number of tiles left.
    pub simulate_overflow_bug: bool,
    /// Blinky and Pinky roam randomly instead of scattering during the first scatter phase.
    pub roam_in_first_scatter: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            simulate_overflow_bug: true,
            roam_in_first_scatter: true,
        }
    }
}
