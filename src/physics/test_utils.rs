//! Scripted physics double for unit tests
//!
//! `StubWorld` keeps bodies exactly where they were placed and only reports
//! the contacts a test queues, so game logic can be exercised without
//! simulating anything.

use glam::Vec2;

use super::{Body, BodyDef, BodyId, Bounds, ContactPair, PhysicsWorld};

#[derive(Debug)]
pub(crate) struct StubWorld {
    bodies: Vec<Body>,
    pending: Vec<(BodyId, BodyId)>,
    next_id: u32,
    now: u64,
}

impl StubWorld {
    /// Put a dynamic body at `pos` without going through a drop
    pub(crate) fn place(&mut self, label: &str, pos: Vec2) -> BodyId {
        self.spawn(BodyDef {
            pos,
            radius: 15.0,
            label: label.to_string(),
            restitution: 0.0,
            friction: 0.0,
            distortion: None,
        })
    }

    pub(crate) fn place_static(&mut self, label: &str, pos: Vec2) -> BodyId {
        let id = self.spawn(BodyDef {
            pos,
            radius: 15.0,
            label: label.to_string(),
            restitution: 0.0,
            friction: 0.0,
            distortion: None,
        });
        if let Some(body) = self.bodies.iter_mut().find(|b| b.id == id) {
            body.is_static = true;
        }
        id
    }

    /// Report this pair as a new touch on the next `step`
    pub(crate) fn queue_contact(&mut self, a: BodyId, b: BodyId) {
        self.pending.push((a, b));
    }

    /// Teleport a body, standing in for motion the stub never simulates
    pub(crate) fn set_pos(&mut self, id: BodyId, pos: Vec2) {
        if let Some(body) = self.bodies.iter_mut().find(|b| b.id == id) {
            body.pos = pos;
        }
    }

    pub(crate) fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Build a contact pair from two live bodies
    pub(crate) fn contact(&self, a: BodyId, b: BodyId) -> ContactPair {
        ContactPair {
            a: self.body(a).cloned().unwrap(),
            b: self.body(b).cloned().unwrap(),
        }
    }
}

impl PhysicsWorld for StubWorld {
    fn create(_bounds: Bounds) -> Self {
        Self {
            bodies: Vec::new(),
            pending: Vec::new(),
            next_id: 0,
            now: 0,
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
            created_at: self.now,
        });
        id
    }

    fn remove(&mut self, id: BodyId) -> bool {
        let before = self.bodies.len();
        self.bodies.retain(|b| b.id != id);
        self.bodies.len() != before
    }

    fn step(&mut self, _dt: f32) -> Vec<ContactPair> {
        self.now += 1;
        std::mem::take(&mut self.pending)
            .into_iter()
            .filter_map(|(a, b)| {
                Some(ContactPair {
                    a: self.body(a)?.clone(),
                    b: self.body(b)?.clone(),
                })
            })
            .collect()
    }

    fn bodies(&self) -> &[Body] {
        &self.bodies
    }
}
