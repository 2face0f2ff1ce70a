pub mod config;
pub mod cruise_elroy;
pub mod error;
pub mod events;
pub mod game_state;
pub mod gatekeeper;
pub mod ghost_agent;
pub mod ghost_paths;
pub mod grid;
pub mod hunting_timer;
pub mod level_data;
pub mod movement;
pub mod observations;
pub mod pac;
pub mod targeting;
pub mod variables;
pub mod world;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module wrapping the ghost simulation.
#[cfg(feature = "python")]
#[pymodule]
fn ghost_hunt(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<game_state::py_wrappers::GhostSim>()?;
    Ok(())
}
