//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only from the `dt` passed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod cave;
pub mod collision;
pub mod obstacles;
pub mod particles;
pub mod pool;
pub mod random;
pub mod state;
pub mod tick;

pub use cave::{Cave, CaveSample, CaveSegment};
pub use collision::{Collision, check_ship};
pub use obstacles::{Obstacle, ObstacleField};
pub use particles::{Particle, ParticleSystem};
pub use pool::{Pool, SlotId};
pub use random::RandomSource;
pub use state::{Camera, GameEvent, GamePhase, GameState, Ship, World};
pub use tick::{TickInput, autopilot_thrust, tick};
