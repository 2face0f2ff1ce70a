//! Error types for map parsing and the simulation entry points.

use thiserror::Error;

/// Reasons an ASCII map is rejected by [`crate::world::WorldMap::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,
    #[error("row {row} is {found} cells wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown map symbol {symbol:?} at column {col}, row {row}")]
    UnknownSymbol {
        symbol: char,
        col: usize,
        row: usize,
    },
    #[error("map has no house door")]
    MissingDoor,
    #[error("map has no house interior")]
    MissingHouse,
    #[error("house entry tile at column {col}, row {row} is closed to ghosts")]
    BlockedEntry { col: i32, row: i32 },
}

/// Hard failures of the simulation API. These indicate integration bugs, not game data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("no level configured; call configure_level() before tick()")]
    NotConfigured,
    #[error(transparent)]
    Map(#[from] MapError),
}

pub type SimResult<T> = Result<T, SimError>;

#[cfg(feature = "python")]
impl From<SimError> for pyo3::PyErr {
    fn from(err: SimError) -> Self {
        match err {
            SimError::NotConfigured => pyo3::exceptions::PyRuntimeError::new_err(err.to_string()),
            SimError::Map(_) => pyo3::exceptions::PyValueError::new_err(err.to_string()),
        }
    }
}
