//! Game rules on top of the physics layer
//!
//! - `session`: one run's state, drop gating, and tier preview
//! - `merge`: turns equal-tier contacts into the next tier up
//! - `boundary`: overfill detection at the drop line
//! - `lifecycle`: owns the world and walks Idle -> Running -> Idle

pub mod boundary;
pub mod lifecycle;
pub mod merge;
pub mod session;

pub use lifecycle::{GamePhase, MergeGame, StartError};
pub use session::{GameEvent, Session};
