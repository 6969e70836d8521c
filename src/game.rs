//! Host-facing game driver
//!
//! Owns the simulation, the level-triggered thrust flag and the best-score
//! store. Hosts call [`Game::set_thrust`] from input handlers and
//! [`Game::update`] once per frame, then read [`Game::snapshot`] or
//! [`Game::state`] to draw.

use glam::Vec2;
use serde::Serialize;

use crate::consts::MAX_FRAME_DT;
use crate::persistence::ScoreStore;
use crate::sim::{
    CaveSegment, GameEvent, GamePhase, GameState, Obstacle, TickInput, tick,
};
use crate::tuning::Tuning;

/// A particle as the renderer needs it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    /// Remaining life in `[0, 1]`
    pub life: f32,
}

/// Everything a presentation adapter reads between ticks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub best_score: u64,
    pub camera_x: f32,
    pub ship: Vec2,
    pub ship_vy: f32,
    /// Oldest first
    pub trail: Vec<Vec2>,
    pub segments: Vec<CaveSegment>,
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<ParticleView>,
}

/// Simulation plus its input and persistence collaborators
pub struct Game<S: ScoreStore> {
    state: GameState,
    store: S,
    thrust: bool,
    idle_mode: bool,
}

impl<S: ScoreStore> Game<S> {
    /// Build a game in the menu, loading the best score from `store`
    ///
    /// Restart seeds are reproducible from `tuning.seed` alone.
    pub fn new(tuning: Tuning, store: S) -> Self {
        Self::with_session_entropy(tuning, store, tuning.seed as u64)
    }

    /// Build a game whose restart seeds also depend on `entropy`
    pub fn with_session_entropy(tuning: Tuning, mut store: S, entropy: u64) -> Self {
        let best = store.load_best_score().unwrap_or_else(|e| {
            log::warn!("Could not load best score, starting from 0: {}", e);
            0
        });
        log::info!("Open Cave ready (seed {}, best {})", tuning.seed, best);

        Self {
            state: GameState::with_session_entropy(tuning, best, entropy),
            store,
            thrust: false,
            idle_mode: false,
        }
    }

    /// Level-triggered thrust input
    pub fn set_thrust(&mut self, active: bool) {
        self.thrust = active;
    }

    /// Let the autopilot fly while playing
    pub fn set_idle_mode(&mut self, idle: bool) {
        self.idle_mode = idle;
    }

    /// Advance one frame and handle the resulting events
    ///
    /// `dt` is clamped to `[0, MAX_FRAME_DT]` so a stalled tab cannot
    /// teleport the ship.
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        let input = TickInput {
            thrust: self.thrust,
            idle_mode: self.idle_mode,
        };
        tick(&mut self.state, &input, dt);

        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::NewBestScore(score) = *event {
                if let Err(e) = self.store.save_best_score(score) {
                    log::warn!("Failed to save best score {}: {}", score, e);
                }
            }
        }
        events
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score()
    }

    pub fn best_score(&self) -> u64 {
        self.state.best_score
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        Snapshot {
            phase: state.phase,
            score: state.score(),
            best_score: state.best_score,
            camera_x: state.camera.x,
            ship: state.ship.pos,
            ship_vy: state.ship.vy,
            trail: state.ship.trail.iter().copied().collect(),
            segments: state.segments().copied().collect(),
            obstacles: state.obstacles().copied().collect(),
            particles: state
                .particles()
                .map(|p| ParticleView {
                    x: p.pos.x,
                    y: p.pos.y,
                    life: p.life_fraction(),
                })
                .collect(),
        }
    }
}
