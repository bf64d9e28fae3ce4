//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard translation)
//! - Storage (LocalStorage on web, files on native)

pub mod input;
pub mod storage;

pub use input::{InputEvent, Key, KeyBindings, KeyState};
pub use storage::{KeyValueStorage, MemoryStorage};
