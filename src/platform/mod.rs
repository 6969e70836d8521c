//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Input (thrust flag shared with event handlers, key mapping)
//! - The browser facade exported through wasm-bindgen

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{ThrustSignal, is_thrust_key};
