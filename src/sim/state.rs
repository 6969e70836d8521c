//! Game state and core simulation types
//!
//! [`GameState`] is the single owner of everything the simulation mutates:
//! ship, camera, cave, pillars, particles, the random source and the
//! menu/playing/game-over state machine.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::cave::{Cave, CaveSegment};
use super::collision::Collision;
use super::obstacles::{Obstacle, ObstacleField};
use super::particles::{Particle, ParticleSystem};
use super::random::RandomSource;
use crate::consts::DISTANCE_PER_POINT;
use crate::tuning::Tuning;

/// Stream used to draw per-run seed perturbations
const RESEED_STREAM: u64 = 0x0CA7_E5EED;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Title screen, waiting for the first press
    #[default]
    Menu,
    /// Active run
    Playing,
    /// Run ended, waiting for a press to restart
    GameOver,
}

/// Notifications queued for the host, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    /// A run started with the given cave seed
    RunStarted { seed: u32 },
    Crashed { cause: Collision, score: u64 },
    /// The best score was beaten and should be persisted
    NewBestScore(u64),
}

/// The player's craft
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    /// World-space position; x is always camera x plus a fixed offset
    pub pos: Vec2,
    /// Vertical velocity (y-down)
    pub vy: f32,
    /// Recent positions, oldest first
    pub trail: VecDeque<Vec2>,
}

impl Ship {
    pub fn new(pos: Vec2, trail_length: usize) -> Self {
        Self {
            pos,
            vy: 0.0,
            trail: VecDeque::with_capacity(trail_length + 1),
        }
    }

    /// Record the current position, evicting the oldest beyond `max_len`
    pub fn record_trail(&mut self, max_len: usize) {
        self.trail.push_back(self.pos);
        while self.trail.len() > max_len {
            self.trail.pop_front();
        }
    }
}

/// Horizontal scroll offset into the world
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
}

/// Scrolling world: distance, difficulty and generated geometry
#[derive(Debug, Clone)]
pub struct World {
    /// Total scrolled distance this run
    pub distance: f32,
    /// Current scroll speed (px/s)
    pub speed: f32,
    /// Gap height used for newly generated segments
    pub gap_height: f32,
    pub cave: Cave,
    pub obstacles: ObstacleField,
}

impl World {
    fn new(tuning: &Tuning) -> Self {
        Self {
            distance: 0.0,
            speed: tuning.base_speed,
            gap_height: tuning.initial_gap,
            cave: Cave::new(),
            obstacles: ObstacleField::new(),
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Best score seen so far (loaded from storage by the host)
    pub best_score: u64,
    /// Seconds spent in `Playing` this run
    pub play_time: f32,
    pub ship: Ship,
    pub camera: Camera,
    pub world: World,
    pub particles: ParticleSystem,
    pub rng: RandomSource,
    /// Number of runs started
    pub runs: u32,
    /// Draws per-run seed perturbations
    reseed: Pcg32,
    /// Thrust level seen on the previous tick (for edge detection)
    pub(crate) thrust_held: bool,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a state in the menu, with a cave generated from the base seed
    ///
    /// Restarts perturb the base seed from a stream derived from the base
    /// seed itself, so a whole session replays identically.
    pub fn new(tuning: Tuning, best_score: u64) -> Self {
        Self::with_session_entropy(tuning, best_score, tuning.seed as u64)
    }

    /// Like [`GameState::new`], but restarts perturb the seed from `entropy`
    /// (e.g. the wall clock) so sessions differ
    ///
    /// A `tuning` that fails [`Tuning::validate`] is replaced by the defaults.
    pub fn with_session_entropy(tuning: Tuning, best_score: u64, entropy: u64) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Rejected tuning, using defaults: {}", e);
                Tuning::default()
            }
        };

        let mut state = Self {
            tuning,
            phase: GamePhase::Menu,
            best_score,
            play_time: 0.0,
            ship: Ship::new(Vec2::ZERO, tuning.trail_length),
            camera: Camera::default(),
            world: World::new(&tuning),
            particles: ParticleSystem::new(),
            rng: RandomSource::new(tuning.seed),
            runs: 0,
            reseed: Pcg32::new(entropy, RESEED_STREAM),
            thrust_held: false,
            events: Vec::new(),
        };
        state.reset_world(tuning.seed);
        state
    }

    /// Score derived from scrolled distance
    pub fn score(&self) -> u64 {
        (self.world.distance / DISTANCE_PER_POINT).floor() as u64
    }

    /// Ship x for the current camera
    pub fn ship_x(&self) -> f32 {
        self.camera.x + self.tuning.ship_offset()
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = &CaveSegment> + '_ {
        self.world.cave.segments()
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> + '_ {
        self.world.obstacles.iter()
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.particles.iter()
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events queued since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        log::info!("Phase {:?} -> {:?}", from, to);
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    /// Enter `Playing` with a freshly seeded cave
    pub fn start_run(&mut self) {
        self.set_phase(GamePhase::Playing);
        let perturbation = if self.tuning.reseed_range > 0 {
            self.reseed.random_range(0..self.tuning.reseed_range)
        } else {
            0
        };
        let seed = self.tuning.seed.wrapping_add(perturbation);
        self.reset_world(seed);
        self.runs += 1;

        log::info!("Run {} started (seed {})", self.runs, seed);
        self.events.push(GameEvent::RunStarted { seed });
    }

    /// Reset ship, camera, world and particles and regenerate the cave
    fn reset_world(&mut self, seed: u32) {
        let tuning = self.tuning;

        self.play_time = 0.0;
        self.camera = Camera::default();

        self.world.obstacles.clear();
        self.world.cave.clear();
        self.world.distance = 0.0;
        self.world.speed = tuning.base_speed;
        self.world.gap_height = tuning.initial_gap;
        self.particles.clear();

        self.rng = RandomSource::new(seed);
        self.world
            .cave
            .generate_initial(&mut self.rng, &tuning, self.camera.x, self.world.gap_height);

        // Start centered in the gap at the ship's x
        let x = self.ship_x();
        let y = self
            .world
            .cave
            .sample_at(x)
            .map_or(tuning.viewport_height / 2.0, |s| s.center_y);
        self.ship = Ship::new(Vec2::new(x, y), tuning.trail_length);
    }

    /// End the run: record the best score and spray debris
    pub fn crash(&mut self, cause: Collision) {
        let score = self.score();
        log::debug!("Crashed ({:?}) at x={:.0}, y={:.0}", cause, self.ship.pos.x, self.ship.pos.y);

        self.set_phase(GamePhase::GameOver);
        self.events.push(GameEvent::Crashed { cause, score });

        if score > self.best_score {
            log::info!("New best score: {} (was {})", score, self.best_score);
            self.best_score = score;
            self.events.push(GameEvent::NewBestScore(score));
        }

        let tuning = self.tuning;
        self.particles.burst(&mut self.rng, &tuning, self.ship.pos);
    }
}
