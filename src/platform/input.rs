//! Thrust input plumbing
//!
//! Input handlers write a single level-triggered flag; the simulation polls
//! it once per tick and derives press edges itself.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared thrust flag, safe to write from another thread
#[derive(Debug, Clone, Default)]
pub struct ThrustSignal(Arc<AtomicBool>);

impl ThrustSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, active: bool) {
        self.0.store(active, Ordering::Release);
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Keys that fire the thrusters (DOM `KeyboardEvent.code` names)
pub fn is_thrust_key(code: &str) -> bool {
    matches!(code, "Space" | "ArrowUp" | "KeyW")
}
