use std::sync::{Arc, Mutex};

use ghost_hunt::{
    config::SimConfig,
    events::SimEvent,
    gatekeeper::ReleaseReason,
    game_state::GameState,
    ghost_agent::{GhostState, Personality},
    grid::Tile,
    variables::Direction,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use GhostState::{Eaten, Frightened, Hunting};
use Personality::{Blinky, Clyde, Inky, Pinky};
use ReleaseReason::{Immediate, PersonalDotLimit, Starving};

/// Walled-off pocket of the arcade maze that no ghost can reach and that holds no food.
const HIDEOUT: Tile = Tile::new(1, 10);

fn arcade(level_number: u32, config: SimConfig) -> GameState {
    let mut sim = GameState::new(config);
    sim.configure_arcade_level(level_number).unwrap();
    sim
}

fn arcade_without_roaming(level_number: u32) -> GameState {
    let config = SimConfig {
        roam_in_first_scatter: false,
        ..SimConfig::default()
    };
    arcade(level_number, config)
}

fn run(sim: &mut GameState, rng: &mut ChaCha8Rng, ticks: usize) -> Vec<SimEvent> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        sim.tick(rng).unwrap();
        events.extend(sim.drain_events());
    }
    events
}

fn releases(events: &[SimEvent]) -> Vec<(Personality, ReleaseReason)> {
    events
        .iter()
        .filter_map(|e| match e {
            SimEvent::GhostReleased { ghost, reason } => Some((*ghost, *reason)),
            _ => None,
        })
        .collect()
}

#[test]
fn starving_pac_releases_the_house_one_by_one() {
    let mut sim = arcade(1, SimConfig::default());
    sim.place_pac(HIDEOUT, Direction::Left).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let events = run(&mut sim, &mut rng, 239);
    assert_eq!(
        releases(&events),
        vec![(Blinky, Immediate), (Pinky, PersonalDotLimit)]
    );

    let events = run(&mut sim, &mut rng, 1);
    assert_eq!(releases(&events), vec![(Inky, Starving)]);
    assert_eq!(sim.level().unwrap().pac().starving_ticks(), 0);

    let events = run(&mut sim, &mut rng, 240);
    assert_eq!(releases(&events), vec![(Clyde, Starving)]);
}

#[test]
fn first_phase_change_after_seven_seconds() {
    let mut sim = arcade_without_roaming(1);
    sim.place_pac(HIDEOUT, Direction::Left).unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    sim.set_on_phase_change(move |change| sink.lock().unwrap().push(change.phase_index))
        .unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    run(&mut sim, &mut rng, 419);
    assert!(seen.lock().unwrap().is_empty());
    let events = run(&mut sim, &mut rng, 1);
    assert_eq!(*seen.lock().unwrap(), vec![1]);
    let phase_changed = events
        .iter()
        .any(|e| matches!(e, SimEvent::PhaseChanged(c) if c.phase_index == 1));
    assert!(phase_changed);
    assert!(sim.level().unwrap().hunting_timer().is_chase_phase());
}

#[test]
fn hunting_ghosts_only_reverse_on_phase_changes() {
    let mut sim = arcade_without_roaming(1);
    sim.place_pac(HIDEOUT, Direction::Left).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let snapshot = |sim: &GameState| -> Vec<(GhostState, Direction, bool)> {
        let ghosts = sim.level().unwrap().ghosts();
        ghosts
            .iter()
            .map(|g| (g.state(), g.move_dir(), g.reverse_pending()))
            .collect()
    };
    let mut before = snapshot(&sim);
    let mut reversals = 0;
    for tick in 1..=1000 {
        sim.tick(&mut rng).unwrap();
        let phase_changed = sim
            .drain_events()
            .iter()
            .any(|e| matches!(e, SimEvent::PhaseChanged(_)));
        let after = snapshot(&sim);
        for (&(state_before, dir_before, pending), &(state_after, dir_after, _)) in
            before.iter().zip(&after)
        {
            let hunting = state_before == Hunting && state_after == Hunting;
            if hunting && dir_after == dir_before.opposite() {
                assert!(
                    pending || phase_changed,
                    "unexpected reversal at tick {tick}"
                );
                reversals += 1;
            }
        }
        before = after;
    }
    // the switch to chase at tick 420 turns Blinky around
    assert!(reversals >= 1);
}

#[test]
fn ghosts_stay_on_legal_tiles() {
    let mut sim = arcade(1, SimConfig::default());
    sim.place_pac(HIDEOUT, Direction::Left).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    for _ in 0..3000 {
        sim.tick(&mut rng).unwrap();
        let level = sim.level().unwrap();
        for ghost in level.ghosts() {
            let tile = ghost.tile();
            match ghost.state() {
                Hunting | Frightened | Eaten => {
                    assert!(
                        level.world().is_accessible_for_ghost(tile),
                        "{:?} on {tile:?}",
                        ghost.personality()
                    );
                }
                _ => {
                    let house = level.world().house();
                    assert!(house.contains(tile) || tile == house.entry_position.tile());
                }
            }
        }
    }
}

#[test]
fn same_seed_same_game() {
    let play = |seed: u64| {
        let mut sim = arcade(2, SimConfig::default());
        sim.place_pac(HIDEOUT, Direction::Left).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        run(&mut sim, &mut rng, 900);
        let ghosts = sim.level().unwrap().ghosts();
        ghosts
            .iter()
            .map(|g| (g.position().x, g.position().y))
            .collect::<Vec<_>>()
    };
    assert_eq!(play(9), play(9));
}

#[test]
fn power_pauses_the_hunting_timer() {
    let mut sim = arcade(1, SimConfig::default());
    sim.place_pac(Tile::new(1, 3), Direction::Up).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let events = run(&mut sim, &mut rng, 1);
    assert!(events.contains(&SimEvent::PowerStarted { ticks: 360 }));
    sim.place_pac(HIDEOUT, Direction::Left).unwrap();

    let events = run(&mut sim, &mut rng, 358);
    assert!(events.contains(&SimEvent::PowerEnding));
    assert!(!events.contains(&SimEvent::PowerEnded));
    assert_eq!(sim.level().unwrap().hunting_timer().elapsed(), 0);

    let events = run(&mut sim, &mut rng, 1);
    assert!(events.contains(&SimEvent::PowerEnded));
    let timer = sim.level().unwrap().hunting_timer();
    assert!(!timer.is_paused());
    assert_eq!(timer.elapsed(), 1);
}

#[test]
fn powerless_energizer_only_reverses() {
    let mut sim = arcade(17, SimConfig::default());
    sim.place_pac(Tile::new(1, 3), Direction::Up).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let events = run(&mut sim, &mut rng, 1);
    let powered = events
        .iter()
        .any(|e| matches!(e, SimEvent::PowerStarted { .. }));
    assert!(!powered);
    assert!(!sim.level().unwrap().pac().has_power());
    assert!(!sim.level().unwrap().hunting_timer().is_paused());
}
