//! The recyclable tier ladder
//!
//! Eight fixed tiers, smallest to largest. Two touching items of the same
//! tier fuse into one item of the next tier; the largest never fuses.

use glam::Vec2;

/// Number of tiers in the ladder
pub const TIER_COUNT: usize = 8;

/// One rung of the ladder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    /// Display name, also the icon file stem
    pub label: &'static str,
    /// Collision radius in pixels
    pub radius: f32,
    /// Points awarded when two of these merge
    pub score: u32,
    /// Sprite scale relative to the source image
    pub display_scale: f32,
    /// Non-round items squash their sprite by (x, y); None for round ones
    pub distortion: Option<Vec2>,
    /// Icon asset path for HUD previews
    pub icon: &'static str,
}

impl Tier {
    const fn new(
        label: &'static str,
        radius: f32,
        score: u32,
        display_scale: f32,
        distortion: Option<Vec2>,
        icon: &'static str,
    ) -> Self {
        Self {
            label,
            radius,
            score,
            display_scale,
            distortion,
            icon,
        }
    }
}

/// The ladder, ordered by size
pub const TIERS: [Tier; TIER_COUNT] = [
    Tier::new("trash", 15.0, 10, 0.25, None, "img/icon_trash.png"),
    Tier::new(
        "paper",
        20.0,
        20,
        0.30,
        Some(Vec2::new(1.1, 0.9)),
        "img/icon_paper.png",
    ),
    Tier::new(
        "can",
        25.0,
        30,
        0.35,
        Some(Vec2::new(0.8, 1.2)),
        "img/icon_can.png",
    ),
    Tier::new(
        "glass",
        30.0,
        40,
        0.40,
        Some(Vec2::new(0.8, 1.2)),
        "img/icon_glass.png",
    ),
    Tier::new(
        "pet",
        35.0,
        50,
        0.45,
        Some(Vec2::new(0.7, 1.3)),
        "img/icon_pet.png",
    ),
    Tier::new(
        "vinyl",
        40.0,
        60,
        0.50,
        Some(Vec2::new(1.1, 0.9)),
        "img/icon_vinyl.png",
    ),
    Tier::new("styrofoam", 45.0, 70, 0.55, None, "img/icon_styrofoam.png"),
    Tier::new("food", 50.0, 100, 0.60, None, "img/icon_food.png"),
];

/// Look up a tier by index
#[inline]
pub fn tier(index: usize) -> Option<&'static Tier> {
    TIERS.get(index)
}

/// The last tier never merges further
#[inline]
pub fn is_terminal(index: usize) -> bool {
    index + 1 >= TIER_COUNT
}
