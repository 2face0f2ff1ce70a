//! Scripted paths inside the ghost house.
//!
//! While caged, leaving or entering, ghosts ignore the maze rules and follow straight
//! axis-aligned legs between fixed house positions.

use crate::{
    ghost_agent::GhostAgent,
    grid::PixelPos,
    variables::{Direction, HOUSE_BOUNCE_RANGE},
    world::House,
};

/// Moves `from` toward `to` by at most `step`, never overshooting.
fn approach(from: f32, to: f32, step: f32) -> f32 {
    if from < to {
        (from + step).min(to)
    } else {
        (from - step).max(to)
    }
}

fn vertical_toward(from: f32, to: f32) -> Direction {
    if to < from {
        Direction::Up
    } else {
        Direction::Down
    }
}

fn horizontal_toward(from: f32, to: f32) -> Direction {
    if to < from {
        Direction::Left
    } else {
        Direction::Right
    }
}

/// One leg of movement toward `target` along the axis implied by `dir`.
fn step_along(ghost: &mut GhostAgent, dir: Direction, target: PixelPos) {
    let pos = ghost.position();
    let speed = ghost.speed();
    ghost.set_move_and_wish_dir(dir);
    let next = if dir.is_horizontal() {
        PixelPos::new(approach(pos.x, target.x, speed), pos.y)
    } else {
        PixelPos::new(pos.x, approach(pos.y, target.y, speed))
    };
    ghost.set_position(next);
}

/// Bobs a caged ghost up and down around its home spot. Ghosts caged outside the house
/// (the direct chaser at level start) stand still.
pub fn bounce(ghost: &mut GhostAgent, house: &House) {
    if !house.contains(ghost.tile()) {
        return;
    }
    let home_y = ghost.home_position().y;
    let pos = ghost.position();
    let (top, bottom) = (home_y - HOUSE_BOUNCE_RANGE, home_y + HOUSE_BOUNCE_RANGE);
    let dir = match ghost.move_dir() {
        Direction::Up if pos.y <= top => Direction::Down,
        Direction::Down if pos.y >= bottom => Direction::Up,
        Direction::Up | Direction::Down => ghost.move_dir(),
        _ => Direction::Up,
    };
    let target = match dir {
        Direction::Up => PixelPos::new(pos.x, top),
        _ => PixelPos::new(pos.x, bottom),
    };
    step_along(ghost, dir, target);
}

/// Advances a ghost along the way out: to the center row, over to the door column, up
/// through the door. Returns true once the ghost stands on the entry position.
pub fn leave_house(ghost: &mut GhostAgent, house: &House) -> bool {
    let pos = ghost.position();
    let exit = house.entry_position;
    let center = house.center_position;

    if pos.x != exit.x {
        if pos.y != center.y {
            step_along(ghost, vertical_toward(pos.y, center.y), center);
        } else {
            step_along(ghost, horizontal_toward(pos.x, exit.x), exit);
        }
    } else if pos.y != exit.y {
        step_along(ghost, Direction::Up, exit);
    }

    if ghost.position() == exit {
        ghost.set_move_and_wish_dir(house.exit_direction);
        true
    } else {
        false
    }
}

/// Advances an eaten ghost from the entry down into the house and over to its revival
/// spot. Returns true once it has arrived.
pub fn enter_house(ghost: &mut GhostAgent, house: &House) -> bool {
    let pos = ghost.position();
    let revival = ghost.revival_position();
    let center_y = house.center_position.y;

    if pos.y < center_y {
        step_along(ghost, Direction::Down, PixelPos::new(pos.x, center_y));
    } else if pos.x != revival.x {
        step_along(ghost, horizontal_toward(pos.x, revival.x), revival);
    }

    ghost.position() == revival
}
