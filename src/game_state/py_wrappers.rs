use numpy::{IntoPyArray, PyArray3};
use pyo3::{exceptions::PyValueError, prelude::*};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::GameState;
use crate::{
    config::SimConfig,
    error::SimError,
    ghost_agent::Personality,
    grid::Tile,
    variables::Direction,
};

/// Python handle on a simulation running on the arcade maze, with its own seeded RNG.
#[pyclass(name = "GhostSim")]
pub struct GhostSim {
    state: GameState,
    rng: ChaCha8Rng,
}

fn direction_from_index(index: u8) -> PyResult<Direction> {
    Direction::try_from(index).map_err(|_| PyValueError::new_err("invalid direction"))
}

#[pymethods]
impl GhostSim {
    #[new]
    #[pyo3(signature = (
        level_number = 1,
        seed = 0,
        simulate_overflow_bug = true,
        roam_in_first_scatter = true
    ))]
    pub fn new(
        level_number: u32,
        seed: u64,
        simulate_overflow_bug: bool,
        roam_in_first_scatter: bool,
    ) -> PyResult<Self> {
        let mut state = GameState::new(SimConfig {
            simulate_overflow_bug,
            roam_in_first_scatter,
        });
        state.configure_arcade_level(level_number)?;
        Ok(Self {
            state,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Starts another level on a fresh arcade maze.
    pub fn configure_level(&mut self, level_number: u32) -> PyResult<()> {
        Ok(self.state.configure_arcade_level(level_number)?)
    }

    pub fn tick(&mut self) -> PyResult<()> {
        Ok(self.state.tick(&mut self.rng)?)
    }

    /// Directions are 0 = up, 1 = left, 2 = down, 3 = right.
    pub fn place_pac(&mut self, col: i32, row: i32, direction: u8) -> PyResult<()> {
        let direction = direction_from_index(direction)?;
        Ok(self.state.place_pac(Tile::new(col, row), direction)?)
    }

    pub fn move_pac(&mut self, col: i32, row: i32) -> PyResult<()> {
        Ok(self.state.move_pac(Tile::new(col, row))?)
    }

    pub fn lose_life(&mut self) -> PyResult<()> {
        Ok(self.state.lose_life()?)
    }

    pub fn eat_ghost(&mut self, ghost_id: u8) -> bool {
        self.state.eat_ghost(ghost_id)
    }

    /// Returns `(x, y, direction, state, killed_index, speed)` for the ghost with the given id
    /// (0 = Blinky, 1 = Pinky, 2 = Inky, 3 = Clyde).
    pub fn ghost(&self, ghost_id: u8) -> PyResult<(f32, f32, u8, u8, Option<u8>, f32)> {
        let personality =
            Personality::try_from(ghost_id).map_err(|_| PyValueError::new_err("invalid ghost id"))?;
        let level = self.state.level().ok_or(SimError::NotConfigured)?;
        let ghost = level.ghost(personality);
        let pos = ghost.position();
        Ok((
            pos.x,
            pos.y,
            ghost.move_dir().into(),
            ghost.state().into(),
            ghost.killed_index(),
            ghost.speed(),
        ))
    }

    #[getter]
    pub fn phase_index(&self) -> PyResult<u8> {
        let level = self.state.level().ok_or(SimError::NotConfigured)?;
        Ok(level.hunting_timer().phase_index())
    }

    /// Events since the last call, formatted for logging.
    pub fn drain_events(&mut self) -> Vec<String> {
        self.state
            .drain_events()
            .iter()
            .map(|event| format!("{event:?}"))
            .collect()
    }

    pub fn obs(&self, py: Python<'_>) -> PyResult<Py<PyArray3<f32>>> {
        Ok(self.state.obs()?.into_pyarray(py).into())
    }
}
