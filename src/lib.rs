//! Open Cave - an endless side-scrolling cave flyer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (cave generation, physics, collisions, game state)
//! - `game`: Host-facing driver (thrust flag, frame clamping, best-score persistence)
//! - `persistence`: Best-score storage backends
//! - `platform`: Input helpers and the browser facade
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use game::{Game, Snapshot};
pub use persistence::{MemoryStore, ScoreStore, StoreError};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Longest frame the driver will simulate in one tick (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Base seed for the cave generator
    pub const DEFAULT_SEED: u32 = 12345;

    /// Storage key for the persisted best score
    pub const BEST_SCORE_KEY: &str = "opencave-best-score";

    /// Score units per unit of scrolled distance
    pub const DISTANCE_PER_POINT: f32 = 10.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
