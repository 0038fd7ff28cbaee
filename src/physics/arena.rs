//! Built-in arena backend
//!
//! A deliberately small rigid-body world: gravity pulls circles down into a
//! walled box, overlaps resolve with restitution and friction, and every new
//! touch is reported exactly once. Enough to drop, stack, and overflow
//! deterministically; not a general solver.
//!
//! Bodies are all circles (the squash hint in `BodyDef` is render-side only)
//! and all dynamic bodies weigh the same.

use std::collections::BTreeSet;

use glam::Vec2;

use super::{Body, BodyDef, BodyId, Bounds, ContactPair, PhysicsWorld};
use crate::consts::{FLOOR_INSET, FRICTION, RESTITUTION, WALL_THICKNESS};

/// Downward gravity, pixels per second squared
const GRAVITY: f32 = 900.0;
/// Position solver substeps per step call
const SUBSTEPS: u32 = 4;
/// Impact speed below which restitution is dropped (kills micro-bounces)
const REST_SPEED: f32 = 20.0;

const FLOOR_ID: BodyId = BodyId(0);
const LEFT_WALL_ID: BodyId = BodyId(1);
const RIGHT_WALL_ID: BodyId = BodyId(2);

/// Per-body surface properties, parallel to `bodies`
#[derive(Debug, Clone, Copy)]
struct Material {
    restitution: f32,
    friction: f32,
}

/// Walled box full of falling circles
#[derive(Debug)]
pub struct ArenaWorld {
    bounds: Bounds,
    /// Stable id order: the three walls first, then spawns
    bodies: Vec<Body>,
    /// Parallel to `bodies`; zero for statics
    vels: Vec<Vec2>,
    /// Parallel to `bodies`
    materials: Vec<Material>,
    /// Pairs currently in contact, low id first
    touching: BTreeSet<(u32, u32)>,
    next_id: u32,
    /// Completed steps, stamped onto new bodies
    steps: u64,
}

#[inline]
fn pair_key(a: BodyId, b: BodyId) -> (u32, u32) {
    if a.0 <= b.0 { (a.0, b.0) } else { (b.0, a.0) }
}

impl ArenaWorld {
    fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Apply gravity and move dynamic bodies
    fn integrate(&mut self, dt: f32) {
        for (body, vel) in self.bodies.iter_mut().zip(self.vels.iter_mut()) {
            if body.is_static {
                continue;
            }
            vel.y += GRAVITY * dt;
            body.pos += *vel * dt;
        }
    }

    /// Separate overlaps and record which pairs touched
    fn resolve(&mut self, seen: &mut BTreeSet<(u32, u32)>) {
        // Circle-circle, id order for determinism
        for i in 0..self.bodies.len() {
            if self.bodies[i].is_static {
                continue;
            }
            for j in (i + 1)..self.bodies.len() {
                if self.bodies[j].is_static {
                    continue;
                }
                let delta = self.bodies[j].pos - self.bodies[i].pos;
                let min_dist = self.bodies[i].radius + self.bodies[j].radius;
                let dist_sq = delta.length_squared();
                if dist_sq >= min_dist * min_dist {
                    continue;
                }
                seen.insert(pair_key(self.bodies[i].id, self.bodies[j].id));

                let dist = dist_sq.sqrt();
                // Coincident centers get a fixed separation axis
                let normal = if dist > 1e-4 { delta / dist } else { Vec2::Y };
                let push = normal * ((min_dist - dist) * 0.5);
                self.bodies[i].pos -= push;
                self.bodies[j].pos += push;

                let rel = self.vels[j] - self.vels[i];
                let approaching = rel.dot(normal);
                if approaching < 0.0 {
                    let e = if -approaching > REST_SPEED {
                        self.materials[i].restitution.min(self.materials[j].restitution)
                    } else {
                        0.0
                    };
                    let impulse = -(1.0 + e) * approaching * 0.5;
                    self.vels[i] -= normal * impulse;
                    self.vels[j] += normal * impulse;

                    // Friction damps the tangential slide
                    let tangent = Vec2::new(-normal.y, normal.x);
                    let mu = self.materials[i].friction.max(self.materials[j].friction);
                    let damp = tangent * (rel.dot(tangent) * mu * 0.5);
                    self.vels[i] += damp;
                    self.vels[j] -= damp;
                }
            }
        }

        // Walls are planes at the box faces
        let floor_y = self.bounds.height - FLOOR_INSET;
        let width = self.bounds.width;
        for idx in 0..self.bodies.len() {
            if self.bodies[idx].is_static {
                continue;
            }
            let mat = self.materials[idx];
            let body = &mut self.bodies[idx];
            let vel = &mut self.vels[idx];

            if body.pos.y + body.radius > floor_y {
                body.pos.y = floor_y - body.radius;
                if vel.y > 0.0 {
                    vel.y = if vel.y > REST_SPEED { -vel.y * mat.restitution } else { 0.0 };
                    vel.x *= 1.0 - mat.friction;
                }
                seen.insert(pair_key(body.id, FLOOR_ID));
            }
            if body.pos.x - body.radius < 0.0 {
                body.pos.x = body.radius;
                if vel.x < 0.0 {
                    vel.x = if -vel.x > REST_SPEED { -vel.x * mat.restitution } else { 0.0 };
                }
                seen.insert(pair_key(body.id, LEFT_WALL_ID));
            }
            if body.pos.x + body.radius > width {
                body.pos.x = width - body.radius;
                if vel.x > 0.0 {
                    vel.x = if vel.x > REST_SPEED { -vel.x * mat.restitution } else { 0.0 };
                }
                seen.insert(pair_key(body.id, RIGHT_WALL_ID));
            }
        }
    }
}

impl PhysicsWorld for ArenaWorld {
    fn create(bounds: Bounds) -> Self {
        let half = WALL_THICKNESS * 0.5;
        let bodies = vec![
            Body {
                id: FLOOR_ID,
                label: "floor".to_string(),
                pos: Vec2::new(bounds.width * 0.5, bounds.height - FLOOR_INSET + half),
                radius: half,
                is_static: true,
                created_at: 0,
            },
            Body {
                id: LEFT_WALL_ID,
                label: "wall-left".to_string(),
                pos: Vec2::new(-half, bounds.height * 0.5),
                radius: half,
                is_static: true,
                created_at: 0,
            },
            Body {
                id: RIGHT_WALL_ID,
                label: "wall-right".to_string(),
                pos: Vec2::new(bounds.width + half, bounds.height * 0.5),
                radius: half,
                is_static: true,
                created_at: 0,
            },
        ];
        let count = bodies.len();
        Self {
            bounds,
            bodies,
            vels: vec![Vec2::ZERO; count],
            materials: vec![
                Material {
                    restitution: RESTITUTION,
                    friction: FRICTION,
                };
                count
            ],
            touching: BTreeSet::new(),
            next_id: count as u32,
            steps: 0,
        }
    }

    fn spawn(&mut self, def: BodyDef) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body {
            id,
            label: def.label,
            pos: def.pos,
            radius: def.radius,
            is_static: false,
            created_at: self.steps,
        });
        self.vels.push(Vec2::ZERO);
        self.materials.push(Material {
            restitution: def.restitution,
            friction: def.friction,
        });
        id
    }

    fn remove(&mut self, id: BodyId) -> bool {
        let idx = match self.bodies.iter().position(|b| b.id == id) {
            Some(idx) => idx,
            None => return false,
        };
        self.bodies.remove(idx);
        self.vels.remove(idx);
        self.materials.remove(idx);
        self.touching.retain(|&(a, b)| a != id.0 && b != id.0);
        true
    }

    fn step(&mut self, dt: f32) -> Vec<ContactPair> {
        if dt <= 0.0 {
            return Vec::new();
        }
        self.steps += 1;

        // Contacts observed at any point during this step
        let mut seen = BTreeSet::new();
        let sub_dt = dt / SUBSTEPS as f32;
        for _ in 0..SUBSTEPS {
            self.integrate(sub_dt);
            self.resolve(&mut seen);
        }

        // Report only the pairs that were not already touching
        let mut began = Vec::new();
        for &(a, b) in &seen {
            if self.touching.contains(&(a, b)) {
                continue;
            }
            if let (Some(a), Some(b)) = (self.body(BodyId(a)), self.body(BodyId(b))) {
                began.push(ContactPair {
                    a: a.clone(),
                    b: b.clone(),
                });
            }
        }
        self.touching = seen;
        began
    }

    fn bodies(&self) -> &[Body] {
        &self.bodies
    }
}
