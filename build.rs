//! Build script that precomputes various things from the arcade maze.

use std::env;
use std::fs;
use std::io;
use std::path::Path;

/// Map symbols and the `CellKind` variant each one parses to.
const CELL_SYMBOLS: [(char, &str); 8] = [
    ('#', "CellKind::Wall"),
    (' ', "CellKind::Empty"),
    ('.', "CellKind::Pellet"),
    ('o', "CellKind::Energizer"),
    ('T', "CellKind::Tunnel"),
    ('-', "CellKind::Door"),
    ('h', "CellKind::House"),
    // Pac's start marker is an ordinary empty cell.
    ('P', "CellKind::Empty"),
];

const MAZE_PATH: &str = "src/maze_data.txt";

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

/// Reads the maze rows, rejecting ragged rows and unknown symbols.
fn read_maze() -> io::Result<Vec<String>> {
    let text = fs::read_to_string(MAZE_PATH)?;
    let rows: Vec<String> = text
        .lines()
        .map(|line| line.trim_end_matches('\r').to_owned())
        .filter(|line| !line.is_empty())
        .collect();
    let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
    if width == 0 {
        return Err(invalid(format!("{MAZE_PATH} is empty")));
    }
    let known = |ch: &char| CELL_SYMBOLS.iter().any(|(s, _)| s == ch);
    for (row_index, row) in rows.iter().enumerate() {
        if row.chars().count() != width {
            return Err(invalid(format!(
                "{MAZE_PATH}: row {row_index} is not {width} wide"
            )));
        }
        if let Some(ch) = row.chars().find(|ch| !known(ch)) {
            return Err(invalid(format!(
                "{MAZE_PATH}: unknown symbol {ch:?} in row {row_index}"
            )));
        }
    }
    Ok(rows)
}

fn output_count<P: AsRef<Path>>(rows: &[String], symbol: char, out_path: P) -> io::Result<()> {
    let count = rows
        .iter()
        .flat_map(|r| r.chars())
        .filter(|ch| *ch == symbol)
        .count();
    fs::write(out_path, count.to_string())
}

fn main() -> io::Result<()> {
    let out_dir = env::var_os("OUT_DIR")
        .ok_or_else(|| invalid("OUT_DIR not set".into()))?;
    let out_dir = Path::new(&out_dir);

    println!("cargo:rerun-if-changed={MAZE_PATH}");
    let rows = read_maze()?;

    // maze rows and dimensions
    fs::write(out_dir.join("ARCADE_MAZE.rs"), format!("{rows:?}"))?;
    fs::write(
        out_dir.join("ARCADE_MAZE_HEIGHT.txt"),
        rows.len().to_string(),
    )?;

    // food counts
    output_count(&rows, '.', out_dir.join("ARCADE_PELLET_COUNT.txt"))?;
    output_count(&rows, 'o', out_dir.join("ARCADE_ENERGIZER_COUNT.txt"))?;

    // map from symbol to cell kind
    let mut symbols = phf_codegen::Map::new();
    for (symbol, kind) in CELL_SYMBOLS {
        symbols.entry(symbol, kind);
    }
    fs::write(
        out_dir.join("CELL_SYMBOLS.rs"),
        symbols.build().to_string(),
    )?;

    Ok(())
}
