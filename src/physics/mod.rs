//! Physics collaborator contract
//!
//! The engine drives a 2D rigid-body world through this narrow seam:
//! spawn circles, remove them, advance time, and observe which contacts each
//! step began. Any backend that can do those four things can host a game.

use glam::Vec2;
use serde::{Deserialize, Serialize};

mod arena;
#[cfg(test)]
pub(crate) mod test_utils;

pub use arena::ArenaWorld;

/// Playfield dimensions in pixels; y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Handle to a body; unique for a world's lifetime, never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Observable state of one body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    /// Backend-opaque tag; dropped items carry their tier index as a decimal
    /// string, walls carry anything else
    pub label: String,
    /// Center position
    pub pos: Vec2,
    pub radius: f32,
    /// Walls and ground; never merge, never end the run
    pub is_static: bool,
    /// Steps the world had taken when this body appeared
    pub created_at: u64,
}

/// Everything a backend needs to create a dynamic circle
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDef {
    pub pos: Vec2,
    pub radius: f32,
    pub label: String,
    pub restitution: f32,
    pub friction: f32,
    /// Render-side squash hint; backends may ignore it
    pub distortion: Option<Vec2>,
}

/// A contact that began during the last step
#[derive(Debug, Clone, PartialEq)]
pub struct ContactPair {
    pub a: Body,
    pub b: Body,
}

/// The backend seam
pub trait PhysicsWorld {
    /// Build a world with containment walls for the given playfield
    fn create(bounds: Bounds) -> Self;
    /// Add a dynamic circle
    fn spawn(&mut self, def: BodyDef) -> BodyId;
    /// Remove a body; false if the id is unknown (already consumed)
    fn remove(&mut self, id: BodyId) -> bool;
    /// Advance time, reporting only contacts that began during this step
    fn step(&mut self, dt: f32) -> Vec<ContactPair>;
    /// All live bodies, statics included, in stable id order
    fn bodies(&self) -> &[Body];
}
