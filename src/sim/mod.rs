//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No platform dependencies; drawing goes through [`crate::render::DrawList`]

pub mod body;
pub mod entity;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use body::Body;
pub use entity::{Drawable, EntityRef, Movable};
pub use session::PlayingSession;
pub use spawner::{AsteroidField, Edge};
pub use state::{Asteroid, Player, Shot};
pub use tick::{SessionResult, TickInput, TickOutcome, tick};
