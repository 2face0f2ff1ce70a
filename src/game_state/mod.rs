#[cfg(feature = "python")]
pub mod py_wrappers;

use ndarray::Array3;
use rand::Rng;
use tracing::{debug, info};

use crate::{
    config::SimConfig,
    error::{SimError, SimResult},
    events::SimEvent,
    gatekeeper::{GateKeeper, ReleaseReason},
    ghost_agent::{GhostAgent, GhostState, Personality},
    ghost_paths::{bounce, enter_house, leave_house},
    grid::Tile,
    hunting_timer::{HuntingTimer, PhaseChange},
    level_data::{level_params, LevelParams},
    movement::{advance, Steering},
    observations::observation,
    pac::Pac,
    targeting::{hunting_target, TargetContext},
    variables::{Direction, GHOST_HOUSE_SPEED, GHOST_RETURNING_SPEED, POWER_FADE_TICKS},
    world::{Food, WorldMap},
};

/// Moves a ghost to a new FSM state, recording the change.
fn transition(ghost: &mut GhostAgent, state: GhostState, events: &mut Vec<SimEvent>) {
    if let Some(from) = ghost.set_state(state) {
        events.push(SimEvent::GhostStateChanged {
            ghost: ghost.personality(),
            from,
            to: state,
        });
    }
}

/// Re-activates a suspended cruise-Elroy stage once the direct chaser is out again.
fn resume_cruise_elroy(ghost: &mut GhostAgent, events: &mut Vec<SimEvent>) {
    let elroy = ghost.cruise_elroy_mut();
    if elroy.is_suspended() {
        elroy.resume();
        let stage = elroy.raw();
        debug!(stage, "cruise elroy resumed");
        events.push(SimEvent::CruiseElroyChanged { stage });
    }
}

/// Speed of a ghost for this tick. Tunnel speed replaces any other maze speed.
fn ghost_speed(ghost: &GhostAgent, world: &WorldMap, params: &LevelParams) -> f32 {
    let in_tunnel = world.is_tunnel(ghost.tile());
    match ghost.state() {
        GhostState::Locked | GhostState::LeavingHouse | GhostState::EnteringHouse => {
            GHOST_HOUSE_SPEED
        }
        GhostState::Eaten => GHOST_RETURNING_SPEED,
        GhostState::Hunting if in_tunnel => params.ghost_tunnel_speed(),
        GhostState::Hunting => match ghost.cruise_elroy().active_stage() {
            Some(stage) => params.elroy_speed(stage),
            None => params.ghost_speed(),
        },
        GhostState::Frightened if in_tunnel => params.ghost_tunnel_speed(),
        GhostState::Frightened => params.ghost_frightened_speed(),
    }
}

/// Everything that lives for one level (and is partly reset per life).
#[derive(Debug)]
pub struct Level {
    number: u32,
    params: &'static LevelParams,
    world: WorldMap,
    pac: Pac,
    ghosts: [GhostAgent; 4],
    hunting_timer: HuntingTimer,
    gate_keeper: GateKeeper,
    /// Ghosts eaten during the current power phase.
    victims: u8,
    complete: bool,
}

impl Level {
    fn new(number: u32, world: WorldMap) -> Self {
        let ghosts =
            array_init::array_init(|i| GhostAgent::new(Personality::ALL[i], world.house()));
        Self {
            number,
            params: level_params(number),
            pac: Pac::new(world.pac_start()),
            ghosts,
            hunting_timer: HuntingTimer::for_level(number),
            gate_keeper: GateKeeper::new(number),
            victims: 0,
            complete: false,
            world,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn params(&self) -> &'static LevelParams {
        self.params
    }

    pub fn world(&self) -> &WorldMap {
        &self.world
    }

    pub fn pac(&self) -> &Pac {
        &self.pac
    }

    pub fn ghost(&self, personality: Personality) -> &GhostAgent {
        &self.ghosts[personality.index()]
    }

    pub fn ghosts(&self) -> &[GhostAgent; 4] {
        &self.ghosts
    }

    pub fn hunting_timer(&self) -> &HuntingTimer {
        &self.hunting_timer
    }

    pub fn gate_keeper(&self) -> &GateKeeper {
        &self.gate_keeper
    }

    pub fn victims(&self) -> u8 {
        self.victims
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    fn eat_food(&mut self, events: &mut Vec<SimEvent>) {
        let tile = self.pac.tile();
        let Some(food) = self.world.eat_food(tile) else {
            self.pac.starve();
            return;
        };
        self.pac.reset_starving();
        self.gate_keeper.register_food_eaten(&self.ghosts);
        let remaining = self.world.uneaten_food();
        events.push(SimEvent::FoodEaten {
            tile,
            food,
            remaining,
        });

        let blinky = &mut self.ghosts[Personality::Blinky.index()];
        if blinky.cruise_elroy_mut().update(remaining, self.params) {
            let stage = blinky.cruise_elroy().raw();
            debug!(stage, remaining, "cruise elroy stage raised");
            events.push(SimEvent::CruiseElroyChanged { stage });
        }

        if food == Food::Energizer {
            self.start_power(events);
        }
        if remaining == 0 {
            info!(level = self.number, "level complete");
            self.complete = true;
            events.push(SimEvent::LevelComplete);
        }
    }

    fn start_power(&mut self, events: &mut Vec<SimEvent>) {
        self.victims = 0;
        for ghost in &mut self.ghosts {
            if ghost.in_state(&[GhostState::Hunting, GhostState::Frightened]) {
                ghost.request_reverse();
            }
        }

        let ticks = self.params.pac_power_ticks();
        if ticks == 0 {
            return;
        }
        debug!(ticks, "power started");
        self.pac.set_power_ticks(ticks);
        self.hunting_timer.pause();
        events.push(SimEvent::PowerStarted { ticks });
        for ghost in &mut self.ghosts {
            if ghost.state() == GhostState::Hunting {
                transition(ghost, GhostState::Frightened, events);
            }
        }
        if ticks <= POWER_FADE_TICKS {
            events.push(SimEvent::PowerEnding);
        }
    }

    fn update_power(&mut self, events: &mut Vec<SimEvent>) {
        if !self.pac.has_power() {
            return;
        }
        match self.pac.drain_power() {
            0 => self.end_power(events),
            POWER_FADE_TICKS => events.push(SimEvent::PowerEnding),
            _ => {}
        }
    }

    fn end_power(&mut self, events: &mut Vec<SimEvent>) {
        debug!(victims = self.victims, "power ended");
        self.hunting_timer.resume();
        events.push(SimEvent::PowerEnded);
        for ghost in &mut self.ghosts {
            if ghost.state() == GhostState::Frightened {
                transition(ghost, GhostState::Hunting, events);
            }
        }
    }

    fn on_phase_change(&mut self, change: PhaseChange, events: &mut Vec<SimEvent>) {
        events.push(SimEvent::PhaseChanged(change));
        for ghost in &mut self.ghosts {
            if ghost.in_state(&[GhostState::Hunting, GhostState::Frightened]) {
                ghost.request_reverse();
            }
        }
    }

    fn release_ghost(&mut self, events: &mut Vec<SimEvent>) {
        let starving_ticks = self.pac.starving_ticks();
        let release = self.gate_keeper.check_release(&self.ghosts, starving_ticks);
        let Some((personality, reason)) = release else {
            return;
        };
        if reason == ReleaseReason::Starving {
            self.pac.reset_starving();
        }
        debug!(ghost = ?personality, ?reason, "ghost released");
        events.push(SimEvent::GhostReleased {
            ghost: personality,
            reason,
        });

        let ghost = &mut self.ghosts[personality.index()];
        if self.world.house().contains(ghost.tile()) {
            transition(ghost, GhostState::LeavingHouse, events);
        } else {
            ghost.set_move_and_wish_dir(self.world.house().exit_direction);
            ghost.set_last_decision_tile(None);
            transition(ghost, GhostState::Hunting, events);
            resume_cruise_elroy(ghost, events);
        }
    }

    /// Turns a frightened ghost into eyes. Anything else is ignored.
    fn eat_ghost(&mut self, personality: Personality, events: &mut Vec<SimEvent>) -> bool {
        let ghost = &mut self.ghosts[personality.index()];
        if ghost.state() != GhostState::Frightened {
            return false;
        }
        let killed_index = self.victims;
        self.victims = self.victims.saturating_add(1);
        let points = GhostAgent::points_for_kill(killed_index);
        ghost.set_killed_index(Some(killed_index));
        ghost.clear_reverse();
        ghost.set_last_decision_tile(None);
        transition(ghost, GhostState::Eaten, events);
        debug!(ghost = ?personality, killed_index, points, "ghost eaten");
        events.push(SimEvent::GhostEaten {
            ghost: personality,
            killed_index,
            points,
        });
        true
    }

    /// Resolves collisions with Pac in fixed ghost order. Stops at the first kill.
    fn resolve_collisions(&mut self, events: &mut Vec<SimEvent>) {
        let pac_tile = self.pac.tile();
        for personality in Personality::ALL {
            let ghost = &self.ghosts[personality.index()];
            if ghost.tile() != pac_tile {
                continue;
            }
            match ghost.state() {
                GhostState::Hunting => {
                    info!(ghost = ?personality, tile = ?pac_tile, "pac killed");
                    self.pac.kill();
                    events.push(SimEvent::PacKilled { by: personality });
                    return;
                }
                GhostState::Frightened => {
                    self.eat_ghost(personality, events);
                }
                _ => {}
            }
        }
    }

    fn move_ghosts<R: Rng + ?Sized>(
        &mut self,
        config: &SimConfig,
        rng: &mut R,
        events: &mut Vec<SimEvent>,
    ) {
        let phase_index = self.hunting_timer.phase_index();
        let has_power = self.pac.has_power();
        let house = self.world.house();

        for i in 0..self.ghosts.len() {
            let blinky_tile = self.ghosts[Personality::Blinky.index()].tile();
            let ghost = &mut self.ghosts[i];
            ghost.set_speed(ghost_speed(ghost, &self.world, self.params));

            match ghost.state() {
                GhostState::Locked => bounce(ghost, house),
                GhostState::LeavingHouse => {
                    if leave_house(ghost, house) {
                        ghost.set_last_decision_tile(None);
                        if has_power && ghost.killed_index().is_none() {
                            transition(ghost, GhostState::Frightened, events);
                        } else {
                            ghost.set_killed_index(None);
                            transition(ghost, GhostState::Hunting, events);
                        }
                        if ghost.personality() == Personality::Blinky {
                            resume_cruise_elroy(ghost, events);
                        }
                    }
                }
                GhostState::Hunting | GhostState::Frightened | GhostState::Eaten => {
                    let steering = match ghost.state() {
                        GhostState::Hunting => {
                            let ctx = TargetContext {
                                world: &self.world,
                                pac_tile: self.pac.tile(),
                                pac_dir: self.pac.direction(),
                                blinky_tile,
                                phase_index,
                                config,
                            };
                            Steering::from(hunting_target(ghost.personality(), ghost.tile(), &ctx))
                        }
                        GhostState::Frightened => Steering::Roam,
                        _ => Steering::HouseEntry,
                    };
                    if advance(ghost, &self.world, steering, rng).reached_house_entry {
                        transition(ghost, GhostState::EnteringHouse, events);
                    }
                }
                GhostState::EnteringHouse => {
                    if enter_house(ghost, house) {
                        ghost.set_move_and_wish_dir(Direction::Up);
                        transition(ghost, GhostState::Locked, events);
                    }
                }
            }
        }
    }

    fn lose_life(&mut self) {
        info!(level = self.number, "life lost");
        self.pac.respawn();
        for ghost in &mut self.ghosts {
            ghost.respawn();
            ghost.cruise_elroy_mut().suspend();
        }
        self.hunting_timer.reset();
        self.gate_keeper.reset_after_life_lost();
        self.victims = 0;
    }

    /// One simulation step, in the fixed order: food, power, hunting timer, release,
    /// collisions, movement.
    fn tick<R: Rng + ?Sized>(
        &mut self,
        config: &SimConfig,
        rng: &mut R,
        events: &mut Vec<SimEvent>,
    ) {
        if !self.pac.is_alive() || self.complete {
            return;
        }
        self.eat_food(events);
        if self.complete {
            return;
        }
        self.update_power(events);
        if let Some(change) = self.hunting_timer.tick() {
            self.on_phase_change(change, events);
        }
        self.release_ghost(events);
        self.resolve_collisions(events);
        if !self.pac.is_alive() {
            return;
        }
        self.move_ghosts(config, rng, events);
    }
}

/// The ghost engine: one configured level plus the events produced since the last drain.
#[derive(Debug, Default)]
pub struct GameState {
    config: SimConfig,
    level: Option<Level>,
    events: Vec<SimEvent>,
}

impl GameState {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            level: None,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Starts the given level on the given map. Any previous level is discarded, along
    /// with a registered phase-change listener.
    pub fn configure_level(&mut self, level_number: u32, world: WorldMap) {
        info!(
            level = level_number,
            food = world.total_food(),
            "level configured"
        );
        self.level = Some(Level::new(level_number, world));
        self.events.clear();
    }

    /// Parses the map rows and starts the level on it.
    pub fn configure_level_from_rows<S: AsRef<str>>(
        &mut self,
        level_number: u32,
        rows: &[S],
    ) -> SimResult<()> {
        let world = WorldMap::parse(rows)?;
        self.configure_level(level_number, world);
        Ok(())
    }

    /// Starts the given level on the arcade maze.
    pub fn configure_arcade_level(&mut self, level_number: u32) -> SimResult<()> {
        let world = WorldMap::arcade()?;
        self.configure_level(level_number, world);
        Ok(())
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    fn level_mut(&mut self) -> SimResult<&mut Level> {
        self.level.as_mut().ok_or(SimError::NotConfigured)
    }

    /// Advances the simulation by one tick (1/60 s).
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SimResult<()> {
        let level = self.level.as_mut().ok_or(SimError::NotConfigured)?;
        level.tick(&self.config, rng, &mut self.events);
        Ok(())
    }

    /// Takes every event recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Registers a listener for hunting phase changes on the current level.
    pub fn set_on_phase_change(
        &mut self,
        callback: impl FnMut(PhaseChange) + Send + 'static,
    ) -> SimResult<()> {
        self.level_mut()?.hunting_timer.set_on_phase_change(callback);
        Ok(())
    }

    /// Restarts the current level after Pac died: everyone back home, hunting phases
    /// from the start, global dot counter on, cruise Elroy suspended.
    pub fn lose_life(&mut self) -> SimResult<()> {
        self.level_mut()?.lose_life();
        Ok(())
    }

    /// Asks for the ghost with the given id to be eaten. Unknown ids and ghosts that are
    /// not frightened are ignored; returns whether anything happened.
    pub fn eat_ghost(&mut self, ghost_id: u8) -> bool {
        let Ok(personality) = Personality::try_from(ghost_id) else {
            return false;
        };
        match self.level.as_mut() {
            Some(level) => level.eat_ghost(personality, &mut self.events),
            None => false,
        }
    }

    /// Puts Pac on a tile center with the given heading.
    pub fn place_pac(&mut self, tile: Tile, direction: Direction) -> SimResult<()> {
        self.level_mut()?.pac.place(tile, direction);
        Ok(())
    }

    /// Moves Pac to a tile, deriving its heading from the step.
    pub fn move_pac(&mut self, tile: Tile) -> SimResult<()> {
        self.level_mut()?.pac.step_to(tile);
        Ok(())
    }

    /// Observation tensor of the current level; see [`crate::observations`].
    pub fn obs(&self) -> SimResult<Array3<f32>> {
        self.level
            .as_ref()
            .map(observation)
            .ok_or(SimError::NotConfigured)
    }
}
