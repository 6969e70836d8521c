//! Game balance and difficulty curve
//!
//! Every gameplay constant lives in [`Tuning`]. A JSON document may override
//! any subset of fields; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::DEFAULT_SEED;

/// Errors raised while loading or checking a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tuning document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Gameplay constants and difficulty parameters
///
/// Screen space is y-down: negative vertical velocity moves the ship up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ship ===
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Velocity change per second while thrust is held (px/s²)
    pub thrust_impulse: f32,
    /// Vertical speed cap in either direction (px/s)
    pub max_velocity: f32,
    /// Collision radius of the ship
    pub ship_radius: f32,
    /// Ship x as a fraction of the viewport width, measured from the camera
    pub ship_x_offset: f32,
    /// Number of trail points kept for drawing
    pub trail_length: usize,

    // === Difficulty ===
    /// Scroll speed at the start of a run (px/s)
    pub base_speed: f32,
    /// Scroll speed gained per second of play
    pub speed_increase: f32,
    /// Gap height at the start of a run
    pub initial_gap: f32,
    /// Gap height floor
    pub min_gap: f32,
    /// Gap height lost per second of play
    pub gap_shrink_rate: f32,

    // === Pillars ===
    /// Spawn probability per tick, per unit of scroll speed
    pub pillar_frequency: f32,
    /// Spacing required between pillars at the start of a run
    pub base_pillar_spacing: f32,
    /// Spacing floor
    pub min_pillar_spacing: f32,
    /// Spacing lost per second of play
    pub spacing_reduction_rate: f32,
    pub pillar_min_height: f32,
    pub pillar_max_height: f32,
    pub pillar_min_width: f32,
    pub pillar_max_width: f32,
    /// How far past the wall a pillar reaches, as a fraction of its height
    pub pillar_intrusion: f32,

    // === Cave ===
    /// Horizontal distance between cave samples
    pub segment_width: f32,
    /// Generated distance ahead of the viewport's right edge
    pub cave_lookahead: f32,
    /// Distance behind the camera after which segments and pillars are dropped
    pub prune_margin: f32,
    /// Upper bound on segments appended in one tick
    pub max_segments_per_tick: usize,
    /// Segments generated beyond the viewport on reset
    pub initial_extra_segments: usize,
    /// Random jitter of the initial cave
    pub initial_noise: f32,
    /// Amplitude of the initial cave's wave around the screen middle
    pub initial_wave_amplitude: f32,
    pub initial_wave_frequency: f32,
    /// Random jitter applied per appended segment
    pub noise_amplitude: f32,
    /// Amplitude of the position-based drift applied per appended segment
    pub drift_amplitude: f32,
    pub drift_frequency: f32,

    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Crash particles ===
    pub particle_count: usize,
    /// Spread of initial particle velocity on each axis
    pub particle_speed: f32,
    pub particle_gravity: f32,
    pub particle_min_life: f32,
    pub particle_max_life: f32,

    // === Seeding ===
    /// Base seed; restarts add a perturbation in `0..reseed_range`
    pub seed: u32,
    pub reseed_range: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 880.0,
            thrust_impulse: -1320.0,
            max_velocity: 660.0,
            ship_radius: 8.0,
            ship_x_offset: 0.35,
            trail_length: 10,

            base_speed: 180.0,
            speed_increase: 0.3,
            initial_gap: 300.0,
            min_gap: 120.0,
            gap_shrink_rate: 2.0,

            pillar_frequency: 0.003,
            base_pillar_spacing: 200.0,
            min_pillar_spacing: 140.0,
            spacing_reduction_rate: 1.5,
            pillar_min_height: 40.0,
            pillar_max_height: 100.0,
            pillar_min_width: 20.0,
            pillar_max_width: 40.0,
            pillar_intrusion: 0.15,

            segment_width: 20.0,
            cave_lookahead: 200.0,
            prune_margin: 100.0,
            max_segments_per_tick: 50,
            initial_extra_segments: 10,
            initial_noise: 50.0,
            initial_wave_amplitude: 100.0,
            initial_wave_frequency: 0.01,
            noise_amplitude: 30.0,
            drift_amplitude: 20.0,
            drift_frequency: 0.005,

            viewport_width: 1280.0,
            viewport_height: 720.0,

            particle_count: 20,
            particle_speed: 200.0,
            particle_gravity: 300.0,
            particle_min_life: 1.0,
            particle_max_life: 3.0,

            seed: DEFAULT_SEED,
            reseed_range: 1000,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |msg: &str| -> Result<(), TuningError> {
            Err(TuningError::Invalid(msg.to_string()))
        };

        if self.segment_width <= 0.0 {
            return invalid("segment_width must be positive");
        }
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return invalid("viewport must have a positive size");
        }
        if self.min_gap <= 0.0 || self.min_gap > self.initial_gap {
            return invalid("min_gap must be positive and no larger than initial_gap");
        }
        if self.initial_gap > self.viewport_height {
            return invalid("initial_gap must fit inside the viewport");
        }
        if self.max_velocity <= 0.0 {
            return invalid("max_velocity must be positive");
        }
        if self.min_pillar_spacing > self.base_pillar_spacing {
            return invalid("min_pillar_spacing must not exceed base_pillar_spacing");
        }
        if self.pillar_min_height > self.pillar_max_height
            || self.pillar_min_width > self.pillar_max_width
        {
            return invalid("pillar size ranges are inverted");
        }
        if self.particle_min_life > self.particle_max_life || self.particle_min_life <= 0.0 {
            return invalid("particle life range is empty or inverted");
        }
        if self.max_segments_per_tick == 0 {
            return invalid("max_segments_per_tick must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.ship_x_offset) {
            return invalid("ship_x_offset must be a fraction of the viewport");
        }
        Ok(())
    }

    /// Scroll speed after `play_time` seconds
    pub fn speed_at(&self, play_time: f32) -> f32 {
        self.base_speed + play_time * self.speed_increase
    }

    /// Gap height after `play_time` seconds, never below `min_gap`
    pub fn gap_at(&self, play_time: f32) -> f32 {
        self.min_gap
            .max(self.initial_gap - play_time * self.gap_shrink_rate)
    }

    /// Spacing required between consecutive pillars after `play_time` seconds
    pub fn pillar_spacing_at(&self, play_time: f32) -> f32 {
        self.min_pillar_spacing
            .max(self.base_pillar_spacing - play_time * self.spacing_reduction_rate)
    }

    /// Ship x offset from the camera
    pub fn ship_offset(&self) -> f32 {
        self.viewport_width * self.ship_x_offset
    }
}
