//! Bin Drop - a recyclables merge-drop arcade game engine
//!
//! Core modules:
//! - `catalog`: The fixed ladder of recyclable tiers
//! - `game`: Session rules (dropping, merging, overflow, lifecycle)
//! - `physics`: Backend contract plus the built-in arena backend
//! - `highscore`: Persistent best-score record
//! - `storage`: Key-value persistence (LocalStorage on wasm)

pub mod catalog;
pub mod config;
pub mod game;
pub mod highscore;
pub mod physics;
pub mod storage;

pub use catalog::{TIER_COUNT, TIERS, Tier};
pub use config::GameConfig;
pub use game::{GameEvent, GamePhase, MergeGame, Session, StartError};
pub use highscore::{HighScoreLedger, RecordOutcome};
pub use physics::{ArenaWorld, Body, BodyDef, BodyId, Bounds, ContactPair, PhysicsWorld};
pub use storage::{KeyValueStore, MemoryStore};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the browser frame rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Fill line: items resting above this y end the run (y grows downward)
    pub const TOP_LINE_Y: f32 = 50.0;
    /// Horizontal clamp margin for drop positions
    pub const DROP_MARGIN: f32 = 30.0;
    /// Seconds before the drop gate re-arms
    pub const DROP_COOLDOWN: f32 = 0.6;
    /// Fresh drops are rolled from tiers [0, SPAWNABLE_TIERS)
    pub const SPAWNABLE_TIERS: usize = 3;

    /// Containment wall thickness
    pub const WALL_THICKNESS: f32 = 50.0;
    /// The ground's top face sits this far above the playfield bottom
    pub const FLOOR_INSET: f32 = 10.0;
    /// Bounciness of dropped items
    pub const RESTITUTION: f32 = 0.3;
    /// Surface friction of dropped items
    pub const FRICTION: f32 = 0.1;
}
