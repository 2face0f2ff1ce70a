use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use tracing::debug;

use crate::level_data::{hunting_durations, PhaseDurations, PHASE_COUNT};

/// The two alternating hunting macro-phases.
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum HuntingPhase {
    Scatter = 0,
    Chase = 1,
}

impl HuntingPhase {
    pub fn of_index(phase_index: u8) -> Self {
        if phase_index % 2 == 0 {
            HuntingPhase::Scatter
        } else {
            HuntingPhase::Chase
        }
    }
}

/// Emitted whenever the timer moves on to the next phase.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PhaseChange {
    pub phase_index: u8,
    pub phase: HuntingPhase,
}

type PhaseChangeCallback = Box<dyn FnMut(PhaseChange) + Send>;

/// Drives the 8-phase scatter/chase alternation of a level.
pub struct HuntingTimer {
    durations: PhaseDurations,
    phase_index: u8,
    elapsed: u32,
    paused: bool,
    on_phase_change: Option<PhaseChangeCallback>,
}

impl HuntingTimer {
    pub fn new(durations: PhaseDurations) -> Self {
        Self {
            durations,
            phase_index: 0,
            elapsed: 0,
            paused: false,
            on_phase_change: None,
        }
    }

    pub fn for_level(level_number: u32) -> Self {
        Self::new(hunting_durations(level_number))
    }

    /// Registers the single phase-change listener, replacing any previous one.
    pub fn set_on_phase_change(&mut self, callback: impl FnMut(PhaseChange) + Send + 'static) {
        self.on_phase_change = Some(Box::new(callback));
    }

    /// Duration of the given phase. The last phase never expires, whatever the table says.
    fn duration(&self, phase_index: u8) -> Option<u32> {
        if usize::from(phase_index) >= PHASE_COUNT - 1 {
            None
        } else {
            self.durations[usize::from(phase_index)]
        }
    }

    /// Advances one tick. Returns the phase change, if one happened; the registered
    /// callback has already run by then.
    pub fn tick(&mut self) -> Option<PhaseChange> {
        if self.paused {
            return None;
        }
        self.elapsed = self.elapsed.saturating_add(1);
        let limit = self.duration(self.phase_index)?;
        if self.elapsed < limit {
            return None;
        }

        self.phase_index += 1;
        self.elapsed = 0;
        let change = PhaseChange {
            phase_index: self.phase_index,
            phase: self.phase(),
        };
        debug!(phase_index = change.phase_index, phase = ?change.phase, "hunting phase changed");
        if let Some(callback) = self.on_phase_change.as_mut() {
            callback(change);
        }
        Some(change)
    }

    /// Back to phase 0 with nothing elapsed. Does not notify.
    pub fn reset(&mut self) {
        self.phase_index = 0;
        self.elapsed = 0;
        self.paused = false;
    }

    /// Freezes the timer (while Pac is powered).
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn phase_index(&self) -> u8 {
        self.phase_index
    }

    pub fn phase(&self) -> HuntingPhase {
        HuntingPhase::of_index(self.phase_index)
    }

    pub fn is_scatter_phase(&self) -> bool {
        self.phase() == HuntingPhase::Scatter
    }

    pub fn is_chase_phase(&self) -> bool {
        self.phase() == HuntingPhase::Chase
    }

    /// Ticks spent in the current phase.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Ticks left in the current phase, or None if it never ends.
    pub fn remaining(&self) -> Option<u32> {
        self.duration(self.phase_index)
            .map(|d| d.saturating_sub(self.elapsed))
    }

    #[cfg(test)]
    pub(crate) fn force_phase(&mut self, phase_index: u8) {
        self.phase_index = phase_index.min(PHASE_COUNT as u8 - 1);
        self.elapsed = 0;
    }
}

impl fmt::Debug for HuntingTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuntingTimer")
            .field("durations", &self.durations)
            .field("phase_index", &self.phase_index)
            .field("elapsed", &self.elapsed)
            .field("paused", &self.paused)
            .field("has_callback", &self.on_phase_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn level_one_walks_through_all_phases() {
        let mut timer = HuntingTimer::for_level(1);
        assert!(timer.is_scatter_phase());
        for _ in 0..419 {
            assert_eq!(timer.tick(), None);
        }
        assert_eq!(
            timer.tick(),
            Some(PhaseChange {
                phase_index: 1,
                phase: HuntingPhase::Chase
            })
        );
        assert!(timer.is_chase_phase());

        let total: u32 = [1200, 420, 1200, 300, 1200, 300].iter().sum();
        let changes: Vec<_> = (0..total).filter_map(|_| timer.tick()).collect();
        assert_eq!(
            changes.iter().map(|c| c.phase_index).collect::<Vec<_>>(),
            vec![2, 3, 4, 5, 6, 7]
        );
        assert_eq!(timer.phase_index(), 7);
        assert_eq!(timer.remaining(), None);

        for _ in 0..100_000 {
            assert_eq!(timer.tick(), None);
        }
        assert_eq!(timer.phase_index(), 7);
    }

    #[test]
    fn zero_duration_completes_on_next_tick() {
        let mut durations = [None; PHASE_COUNT];
        durations[0] = Some(0);
        durations[1] = Some(0);
        durations[2] = Some(5);
        let mut timer = HuntingTimer::new(durations);
        assert_eq!(timer.tick().map(|c| c.phase_index), Some(1));
        assert_eq!(timer.tick().map(|c| c.phase_index), Some(2));
        assert_eq!(timer.remaining(), Some(5));
    }

    #[test]
    fn callback_fires_before_tick_returns() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut timer = HuntingTimer::new([Some(1), Some(2), None, None, None, None, None, None]);
        let sink = Arc::clone(&seen);
        timer.set_on_phase_change(move |change| sink.lock().unwrap().push(change.phase_index));

        timer.tick();
        assert_eq!(*seen.lock().unwrap(), vec![1]);
        timer.tick();
        timer.tick();
        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn reset_does_not_notify() {
        let seen = Arc::new(Mutex::new(0));
        let mut timer = HuntingTimer::new([Some(1); PHASE_COUNT]);
        let sink = Arc::clone(&seen);
        timer.set_on_phase_change(move |_| *sink.lock().unwrap() += 1);
        timer.tick();
        timer.tick();
        timer.reset();
        assert_eq!(timer.phase_index(), 0);
        assert_eq!(timer.elapsed(), 0);
        assert_eq!(*seen.lock().unwrap(), 2);
    }

    #[test]
    fn paused_timer_does_not_advance() {
        let mut timer = HuntingTimer::new([Some(2); PHASE_COUNT]);
        timer.tick();
        timer.pause();
        for _ in 0..10 {
            assert_eq!(timer.tick(), None);
        }
        assert_eq!(timer.elapsed(), 1);
        timer.resume();
        assert!(timer.tick().is_some());
    }
}
