//! Capabilities shared by every entity kind
//!
//! Entities are plain structs composed around a [`Body`]. Behaviour common to
//! all of them is expressed through two small traits rather than a type
//! hierarchy, and [`EntityRef`] tags a borrowed entity for uniform iteration.

use super::body::Body;
use super::state::{Asteroid, Player, Shot};
use crate::render::DrawList;

/// Something with a circular body that advances over time
pub trait Movable {
    fn body(&self) -> &Body;

    /// Advance internal state by `dt` seconds
    fn update(&mut self, dt: f32);

    fn collides_with(&self, other: &dyn Movable) -> bool {
        self.body().collides(other.body())
    }
}

/// Something that can describe itself to the draw list
pub trait Drawable {
    fn draw(&self, list: &mut DrawList);
}

/// A borrowed entity of any kind
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Player(&'a Player),
    Asteroid(&'a Asteroid),
    Shot(&'a Shot),
}

impl EntityRef<'_> {
    /// Creation-order id
    pub fn id(&self) -> u32 {
        match self {
            EntityRef::Player(p) => p.id,
            EntityRef::Asteroid(a) => a.id,
            EntityRef::Shot(s) => s.id,
        }
    }

    pub fn as_drawable(&self) -> &dyn Drawable {
        match self {
            EntityRef::Player(p) => *p,
            EntityRef::Asteroid(a) => *a,
            EntityRef::Shot(s) => *s,
        }
    }
}
