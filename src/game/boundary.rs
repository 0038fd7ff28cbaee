//! Overfill detection
//!
//! The drop line doubles as the fill limit: once a resident piece sits above
//! it at the start of a step, the bin is full and the run ends. The piece
//! still falling from the most recent drop is exempt until the cooldown
//! re-arms.

use crate::game::session::Session;
use crate::physics::Body;

/// True when a resident body sits above the drop line
///
/// Statics never count, and neither does the most recent drop while its
/// cooldown runs.
pub fn breached(session: &Session, bodies: &[Body]) -> bool {
    bodies.iter().any(|body| {
        !body.is_static
            && session.just_dropped != Some(body.id)
            && body.pos.y < session.config.boundary_y
    })
}
