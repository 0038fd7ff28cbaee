//! Per-run state
//!
//! A `Session` owns everything that resets between runs: the score, the drop
//! RNG, the pending tier preview, and the drop cooldown. It talks to physics
//! only through the `PhysicsWorld` trait and reports everything it does as
//! `GameEvent`s for the host to render.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::catalog::{TIER_COUNT, TIERS};
use crate::config::GameConfig;
use crate::physics::{BodyDef, BodyId, Bounds, PhysicsWorld};

/// Something a host may want to show the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Tier the next drop will spawn
    NextTier { tier: usize },
    /// A piece entered the bin at the drop line
    Dropped { id: BodyId, tier: usize },
    /// Two pieces fused into one of the next tier up
    Merged { tier: usize, into: BodyId, pos: Vec2 },
    /// Running total changed
    Score { score: u32 },
    /// The run ended
    GameOver { score: u32, best: u32, new_record: bool },
}

/// State of a single run
#[derive(Debug)]
pub struct Session {
    /// Seed this run's RNG was built from
    pub seed: u64,
    pub score: u32,
    /// Tier index the next drop will spawn
    pub next_tier: usize,
    /// False while the drop cooldown is counting down
    pub drop_armed: bool,
    cooldown: f32,
    /// Most recent drop, exempt from the overfill check until re-arm
    pub just_dropped: Option<BodyId>,
    pub bounds: Bounds,
    pub config: GameConfig,
    rng: Pcg32,
    /// Fixed steps taken this run
    pub ticks: u64,
}

impl Session {
    pub fn new(seed: u64, config: GameConfig, bounds: Bounds, events: &mut Vec<GameEvent>) -> Self {
        let mut session = Self {
            seed,
            score: 0,
            next_tier: 0,
            drop_armed: true,
            cooldown: 0.0,
            just_dropped: None,
            bounds,
            config,
            rng: Pcg32::seed_from_u64(seed),
            ticks: 0,
        };
        events.push(GameEvent::Score { score: 0 });
        session.roll_next(events);
        session
    }

    /// Pick the next drop from the low end of the ladder
    fn roll_next(&mut self, events: &mut Vec<GameEvent>) {
        let bound = self.config.spawnable_tiers.clamp(1, TIER_COUNT);
        self.next_tier = self.rng.random_range(0..bound);
        events.push(GameEvent::NextTier {
            tier: self.next_tier,
        });
    }

    /// Drop the pending tier at `x`, clamped to the playable span
    ///
    /// Ignored while the cooldown is running or when `x` is not finite.
    pub fn try_drop<W: PhysicsWorld>(
        &mut self,
        world: &mut W,
        x: f32,
        events: &mut Vec<GameEvent>,
    ) -> Option<BodyId> {
        if !self.drop_armed || !x.is_finite() {
            return None;
        }
        let index = self.next_tier;
        let tier = &TIERS[index];
        let x = x.clamp(
            self.config.drop_margin,
            self.bounds.width - self.config.drop_margin,
        );
        let id = world.spawn(BodyDef {
            pos: Vec2::new(x, self.config.boundary_y),
            radius: tier.radius,
            label: index.to_string(),
            restitution: self.config.restitution,
            friction: self.config.friction,
            distortion: tier.distortion,
        });
        self.drop_armed = false;
        self.cooldown = self.config.drop_cooldown;
        self.just_dropped = Some(id);
        log::debug!("Dropped {} ({}) at x={:.1}", tier.label, id, x);
        events.push(GameEvent::Dropped { id, tier: index });
        self.roll_next(events);
        Some(id)
    }

    /// Advance the run timers by one fixed step
    pub fn tick(&mut self, dt: f32) {
        self.ticks += 1;
        if !self.drop_armed {
            self.cooldown -= dt;
            if self.cooldown <= 0.0 {
                self.cooldown = 0.0;
                self.drop_armed = true;
                self.just_dropped = None;
            }
        }
    }

    /// Add points and announce the new total
    pub fn add_score(&mut self, delta: u32, events: &mut Vec<GameEvent>) {
        self.score += delta;
        events.push(GameEvent::Score { score: self.score });
    }
}


#[cfg(test)]
mod prop_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::physics::test_utils::StubWorld;

    proptest! {
        #[test]
        fn dropped_x_stays_inside_margins(x in -1e6f32..1e6f32, seed in any::<u64>()) {
            let mut events = Vec::new();
            let config = GameConfig::default();
            let bounds = Bounds::new(400.0, 600.0);
            let mut session = Session::new(seed, config, bounds, &mut events);
            let mut world = StubWorld::create(bounds);
            let id = session.try_drop(&mut world, x, &mut events).unwrap();
            let placed = world.body(id).unwrap().pos.x;
            prop_assert!(placed >= config.drop_margin);
            prop_assert!(placed <= bounds.width - config.drop_margin);
        }

        #[test]
        fn preview_stays_in_the_spawnable_band(seed in any::<u64>()) {
            let mut events = Vec::new();
            let config = GameConfig::default();
            let mut session = Session::new(seed, config, Bounds::new(400.0, 600.0), &mut events);
            for _ in 0..1000 {
                events.clear();
                session.roll_next(&mut events);
                prop_assert!(session.next_tier < config.spawnable_tiers);
            }
        }
    }
}
