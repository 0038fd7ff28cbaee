//! Merge resolution
//!
//! When two dynamic bodies of the same non-terminal tier touch, both are
//! removed and a body of the next tier up appears at their midpoint. Each
//! merge awards the consumed tier's score value once. Top-tier bodies
//! never merge.

use crate::catalog::{TIER_COUNT, TIERS, is_terminal};
use crate::game::session::{GameEvent, Session};
use crate::physics::{Body, BodyDef, BodyId, ContactPair, PhysicsWorld};

/// Tier index of a mergeable body, if it is one
fn tier_of(body: &Body) -> Option<usize> {
    if body.is_static {
        return None;
    }
    body.label.parse::<usize>().ok().filter(|&t| t < TIER_COUNT)
}

/// Apply the merge rule to every contact that started this step
///
/// A body consumed by one merge cannot take part in another from the same
/// batch; later contacts that mention it are skipped.
pub fn resolve_contacts<W: PhysicsWorld>(
    session: &mut Session,
    world: &mut W,
    contacts: &[ContactPair],
    events: &mut Vec<GameEvent>,
) {
    let mut consumed: Vec<BodyId> = Vec::new();
    for pair in contacts {
        if consumed.contains(&pair.a.id) || consumed.contains(&pair.b.id) {
            continue;
        }
        let (ta, tb) = match (tier_of(&pair.a), tier_of(&pair.b)) {
            (Some(ta), Some(tb)) => (ta, tb),
            _ => continue,
        };
        if ta != tb || is_terminal(ta) {
            continue;
        }

        world.remove(pair.a.id);
        world.remove(pair.b.id);
        consumed.push(pair.a.id);
        consumed.push(pair.b.id);

        let next = ta + 1;
        let tier = &TIERS[next];
        let pos = (pair.a.pos + pair.b.pos) * 0.5;
        let id = world.spawn(BodyDef {
            pos,
            radius: tier.radius,
            label: next.to_string(),
            restitution: session.config.restitution,
            friction: session.config.friction,
            distortion: tier.distortion,
        });
        events.push(GameEvent::Merged {
            tier: next,
            into: id,
            pos,
        });
        session.add_score(TIERS[ta].score, events);
        log::debug!("Merged two {} into {} ({})", TIERS[ta].label, tier.label, id);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::config::GameConfig;
    use crate::physics::Bounds;
    use crate::physics::test_utils::StubWorld;

    fn setup() -> (Session, StubWorld, Vec<GameEvent>) {
        let mut events = Vec::new();
        let session = Session::new(
            1,
            GameConfig::default(),
            Bounds::new(400.0, 600.0),
            &mut events,
        );
        events.clear();
        let world = StubWorld::create(Bounds::new(400.0, 600.0));
        (session, world, events)
    }

    fn merge_count(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::Merged { .. }))
            .count()
    }

    #[test]
    fn test_equal_tiers_merge_into_next() {
        let (mut session, mut world, mut events) = setup();
        let a = world.place("2", Vec2::new(100.0, 300.0));
        let b = world.place("2", Vec2::new(130.0, 300.0));
        let contact = world.contact(a, b);

        resolve_contacts(&mut session, &mut world, &[contact], &mut events);

        assert!(world.body(a).is_none());
        assert!(world.body(b).is_none());
        let merged = world.bodies().last().unwrap();
        assert_eq!(merged.label, "3");
        assert_eq!(merged.pos, Vec2::new(115.0, 300.0));
        assert_eq!(merged.radius, TIERS[3].radius);
        assert_eq!(session.score, TIERS[2].score);
        assert!(events.contains(&GameEvent::Merged {
            tier: 3,
            into: merged.id,
            pos: merged.pos
        }));
        assert!(events.contains(&GameEvent::Score {
            score: TIERS[2].score
        }));
    }

    #[test]
    fn test_mismatched_tiers_do_not_merge() {
        let (mut session, mut world, mut events) = setup();
        let a = world.place("1", Vec2::new(100.0, 300.0));
        let b = world.place("2", Vec2::new(130.0, 300.0));
        let contact = world.contact(a, b);

        resolve_contacts(&mut session, &mut world, &[contact], &mut events);

        assert!(world.body(a).is_some());
        assert!(world.body(b).is_some());
        assert_eq!(session.score, 0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_terminal_tier_never_merges() {
        let (mut session, mut world, mut events) = setup();
        let a = world.place("7", Vec2::new(100.0, 300.0));
        let b = world.place("7", Vec2::new(130.0, 300.0));
        let contact = world.contact(a, b);

        resolve_contacts(&mut session, &mut world, &[contact], &mut events);

        assert!(world.body(a).is_some());
        assert!(world.body(b).is_some());
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_static_partner_is_ignored() {
        let (mut session, mut world, mut events) = setup();
        let a = world.place("2", Vec2::new(100.0, 300.0));
        let b = world.place_static("2", Vec2::new(130.0, 300.0));
        let contact = world.contact(a, b);

        resolve_contacts(&mut session, &mut world, &[contact], &mut events);

        assert!(world.body(a).is_some());
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_labels_outside_the_ladder_are_ignored() {
        let (mut session, mut world, mut events) = setup();
        for (left, right) in [("floor", "floor"), ("99", "99"), ("2", "waste")] {
            let a = world.place(left, Vec2::new(100.0, 300.0));
            let b = world.place(right, Vec2::new(130.0, 300.0));
            let contact = world.contact(a, b);
            resolve_contacts(&mut session, &mut world, &[contact], &mut events);
            assert!(world.body(a).is_some());
            assert!(world.body(b).is_some());
        }
        assert_eq!(session.score, 0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_consumed_body_merges_once() {
        let (mut session, mut world, mut events) = setup();
        let a = world.place("0", Vec2::new(100.0, 300.0));
        let b = world.place("0", Vec2::new(128.0, 300.0));
        let c = world.place("0", Vec2::new(156.0, 300.0));
        let contacts = [world.contact(a, b), world.contact(b, c)];

        resolve_contacts(&mut session, &mut world, &contacts, &mut events);

        assert_eq!(merge_count(&events), 1);
        assert!(world.body(c).is_some());
        assert_eq!(session.score, TIERS[0].score);
    }

    #[test]
    fn test_disjoint_pairs_merge_in_one_batch() {
        let (mut session, mut world, mut events) = setup();
        let a = world.place("0", Vec2::new(100.0, 300.0));
        let b = world.place("0", Vec2::new(128.0, 300.0));
        let c = world.place("1", Vec2::new(220.0, 300.0));
        let d = world.place("1", Vec2::new(255.0, 300.0));
        let contacts = [world.contact(a, b), world.contact(c, d)];

        resolve_contacts(&mut session, &mut world, &contacts, &mut events);

        assert_eq!(merge_count(&events), 2);
        assert_eq!(session.score, TIERS[0].score + TIERS[1].score);
        let labels: Vec<&str> = world.bodies().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["1", "2"]);
    }
}
