//! Mini Kong - simulation core for a barrel-dodging platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, entities, round state)
//! - `tuning`: Data-driven game balance
//! - `driver`: Fixed timestep accumulator for front ends
//! - `web`: Browser bindings (wasm32 only)
//!
//! Rendering, audio and input polling are left to the host. The host feeds a
//! [`sim::TickInput`] per step and draws from [`sim::RenderSnapshot`].

pub mod driver;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use driver::FixedStepper;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame time clamp for hitches (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// World dimensions (pixels)
    pub const WORLD_W: f32 = 800.0;
    pub const WORLD_H: f32 = 600.0;
    /// World tile size used to size coins and power-ups
    pub const WORLD_TILE: f32 = 32.0;
    /// Entities further than this past a world edge are retired
    pub const OUT_OF_WORLD_MARGIN: f32 = 100.0;

    /// Pool capacities
    pub const MAX_BARRELS: usize = 64;
    pub const MAX_BADDIES: usize = 8;
    pub const MAX_COINS: usize = 64;
    pub const MAX_POWER_UPS: usize = 4;

    /// Player box and spawn point (feet on the ground platform)
    pub const PLAYER_W: f32 = 28.0;
    pub const PLAYER_H: f32 = 36.0;
    pub const PLAYER_SPAWN_X: f32 = 60.0;
    pub const PLAYER_SPAWN_Y: f32 = WORLD_H - 40.0 - PLAYER_H;

    pub const BARREL_SIZE: f32 = 26.0;
    pub const BADDIE_SIZE: f32 = 28.0;
}

/// Sign of a value as -1, 0 or 1
#[inline]
pub fn signum0(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Integer hash for deterministic placement (Knuth multiplicative)
#[inline]
pub fn placement_hash(a: u32, b: u32) -> u32 {
    a.wrapping_mul(2654435761)
        .wrapping_add(b.wrapping_mul(7919))
        .rotate_left(13)
        .wrapping_mul(2246822519)
}
