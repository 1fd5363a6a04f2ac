//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, derived per level from the run seed
//! - Stable iteration order (by pool slot)
//! - No rendering, audio or platform dependencies

pub mod baddie;
pub mod barrel;
pub mod collision;
pub mod level;
pub mod player;
pub mod pool;
pub mod powerup;
pub mod rect;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Body, Contacts, WallResponse, move_and_collide};
pub use level::{Geometry, Layout};
pub use pool::{Pool, Slot};
pub use rect::Rect;
pub use snapshot::RenderSnapshot;
pub use state::{
    Baddie, BaddieKind, Barrel, Coin, DeathCause, GameEvent, GameState, HeroVariant, Phase,
    Player, PowerUp, PowerUpKind,
};
pub use tick::{TickInput, tick};
