//! Unit tests for foe-steering.

use foe_core::{EntityId, PhysicsWorld, Vec2};

use crate::{Limits, SteeringInput};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn input<'a>(world: &'a dyn PhysicsWorld, target: Vec2, attack_ready: bool) -> SteeringInput<'a> {
    SteeringInput {
        entity: EntityId::INVALID,
        position: Vec2::ZERO,
        facing: 0.0,
        target,
        attack_ready,
        neighbors: &[],
        limits: Limits::default(),
        world,
    }
}

fn argmax(values: &[f32]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f32::MIN), |(bi, bv), (i, &v)| if v > bv { (i, v) } else { (bi, bv) })
        .0
}

// ── ContextMap ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod map {
    use foe_core::Vec2;

    use crate::{ContextMap, SteeringError};

    #[test]
    fn zero_resolution_rejected() {
        assert!(matches!(ContextMap::new(0), Err(SteeringError::ZeroResolution)));
    }

    #[test]
    fn arrays_match_resolution() {
        for res in [8, 30] {
            let map = ContextMap::new(res).unwrap();
            assert_eq!(map.danger().len(), res);
            assert_eq!(map.interest().len(), res);
        }
    }

    #[test]
    fn raise_danger_wraps_around() {
        let mut map = ContextMap::new(8).unwrap();
        map.raise_danger(0, 2, 1.0);
        assert_eq!(map.danger(), vec![1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn raise_danger_keeps_maximum() {
        let mut map = ContextMap::new(8).unwrap();
        map.raise_danger(3, 0, 0.8);
        map.raise_danger(3, 1, 0.2);
        assert_eq!(map.danger()[3], 0.8);
        assert_eq!(map.danger()[2], 0.2);
    }

    #[test]
    fn mask_keeps_only_least_dangerous_slots() {
        let mut map = ContextMap::new(4).unwrap();
        map.danger_mut().copy_from_slice(&[0.5, 0.1, 0.1, 0.9]);
        map.interest_mut().fill(1.0);
        map.mask_by_min_danger();
        assert_eq!(map.interest(), [0.0, 1.0, 1.0, 0.0]);
        assert_eq!(map.danger().len(), 4);
    }

    #[test]
    fn interest_along_clamps_negative() {
        let mut map = ContextMap::new(8).unwrap();
        map.interest_along(Vec2::X, 2.0);
        assert!((map.interest()[0] - 2.0).abs() < 1e-6);
        assert_eq!(map.interest()[4], 0.0);
        assert!(map.interest().iter().all(|&v| v >= 0.0));
    }
}

// ── Behaviors ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod behavior {
    use foe_core::{Arena, BodyKind, Handedness, Vec2};

    use super::*;
    use crate::{BehaviorTag, ContextBehavior, ContextMap};

    #[test]
    fn disabled_behavior_zeroes_map() {
        let arena = Arena::new();
        let mut map = ContextMap::new(8).unwrap();
        map.danger_mut().fill(3.0);
        map.interest_mut().fill(3.0);
        let mut seek = ContextBehavior::seek().disabled();
        seek.calculate_maps(&mut map, &input(&arena, Vec2::X, true));
        assert!(map.danger().iter().chain(map.interest()).all(|&v| v == 0.0));
    }

    #[test]
    fn approach_gated_on_attack_ready() {
        let arena = Arena::new();
        let mut map = ContextMap::new(8).unwrap();
        let mut approach = ContextBehavior::approach();

        approach.calculate_maps(&mut map, &input(&arena, Vec2::new(0.0, 5.0), false));
        assert!(map.interest().iter().all(|&v| v == 0.0));

        approach.calculate_maps(&mut map, &input(&arena, Vec2::new(0.0, 5.0), true));
        assert_eq!(argmax(map.interest()), 2);
    }

    #[test]
    fn strafe_follows_handedness() {
        let arena = Arena::new();
        let mut map = ContextMap::new(8).unwrap();
        let target = Vec2::new(5.0, 0.0);

        let mut strafe = ContextBehavior::strafe(Handedness::CounterClockwise);
        strafe.calculate_maps(&mut map, &input(&arena, target, false));
        assert_eq!(argmax(map.interest()), 2);

        strafe.flip_handedness();
        assert_eq!(strafe.handedness(), Some(Handedness::Clockwise));
        strafe.calculate_maps(&mut map, &input(&arena, target, false));
        assert_eq!(argmax(map.interest()), 6);
    }

    #[test]
    fn avoid_marks_blocked_slot_and_neighborhood() {
        let mut arena = Arena::new();
        arena.add_wall(Vec2::new(1.0, -0.2), Vec2::new(1.4, 0.2));
        let mut map = ContextMap::new(8).unwrap();
        let mut avoid = ContextBehavior::avoid(1.5, 2);
        avoid.calculate_maps(&mut map, &input(&arena, Vec2::new(-5.0, 0.0), false));
        assert_eq!(map.danger(), vec![1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn avoid_ignores_target_body() {
        let mut arena = Arena::new();
        arena.add_body(Vec2::new(1.0, 0.0), 0.3, BodyKind::Target);
        let mut map = ContextMap::new(8).unwrap();
        let mut avoid = ContextBehavior::avoid(1.5, 2);
        avoid.calculate_maps(&mut map, &input(&arena, Vec2::new(1.0, 0.0), true));
        assert!(map.danger().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn avoid_sees_walls_behind_target() {
        let mut arena = Arena::new();
        arena.add_body(Vec2::new(0.6, 0.0), 0.2, BodyKind::Target);
        arena.add_wall(Vec2::new(1.1, -0.2), Vec2::new(1.4, 0.2));
        let mut map = ContextMap::new(8).unwrap();
        let mut avoid = ContextBehavior::avoid(1.5, 0);
        avoid.calculate_maps(&mut map, &input(&arena, Vec2::new(0.6, 0.0), true));
        assert_eq!(map.danger()[0], 1.0);
        assert_eq!(map.danger().iter().filter(|&&v| v > 0.0).count(), 1);
    }

    #[test]
    fn separation_pushes_danger_toward_neighbors() {
        let arena = Arena::new();
        let neighbors = [Vec2::new(0.0, 0.5), Vec2::new(10.0, 0.0)];
        let mut inp = input(&arena, Vec2::X, false);
        inp.neighbors = &neighbors;
        let mut map = ContextMap::new(8).unwrap();
        let mut sep = ContextBehavior::separation(1.5, 0);
        sep.calculate_maps(&mut map, &inp);
        assert!(map.danger()[2] > 0.6);
        assert_eq!(map.danger().iter().filter(|&&v| v > 0.0).count(), 1);
    }

    #[test]
    fn evade_weights_by_inverse_distance() {
        let arena = Arena::new();
        let mut map = ContextMap::new(8).unwrap();
        let mut evade = ContextBehavior::evade(4.0);

        evade.calculate_maps(&mut map, &input(&arena, Vec2::new(8.0, 0.0), false));
        assert_eq!(argmax(map.interest()), 4);
        assert!((map.interest()[4] - 0.5).abs() < 1e-5);

        evade.calculate_maps(&mut map, &input(&arena, Vec2::new(2.0, 0.0), false));
        assert!((map.interest()[4] - 1.0).abs() < 1e-5);

        evade.calculate_maps(&mut map, &input(&arena, Vec2::new(2.0, 0.0), true));
        assert!(map.interest().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn set_enabled_reaches_nested_children() {
        let mut root = ContextBehavior::combiner(vec![
            ContextBehavior::approach(),
            ContextBehavior::combiner(vec![ContextBehavior::strafe(Handedness::Clockwise)]),
        ]);
        assert!(root.is_enabled(BehaviorTag::Strafe));
        assert_eq!(root.set_enabled(BehaviorTag::Strafe, false), 1);
        assert!(!root.is_enabled(BehaviorTag::Strafe));
        assert!(root.is_enabled(BehaviorTag::Approach));
        assert_eq!(root.handedness(), Some(Handedness::Clockwise));
    }
}

// ── Combiner ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod combiner {
    use foe_core::{Arena, Handedness, Vec2};

    use super::*;
    use crate::{ContextBehavior, ContextMap};

    fn children() -> Vec<ContextBehavior> {
        vec![
            ContextBehavior::approach(),
            ContextBehavior::strafe(Handedness::Clockwise),
            ContextBehavior::evade(4.0),
            ContextBehavior::avoid(1.5, 2),
            ContextBehavior::separation(1.5, 1),
        ]
    }

    fn run(order: &[usize], arena: &Arena, attack_ready: bool) -> ContextMap {
        let all = children();
        let mut root =
            ContextBehavior::combiner(order.iter().map(|&i| all[i].clone()).collect());
        let neighbors = [Vec2::new(-0.5, 0.5)];
        let mut inp = input(arena, Vec2::new(3.0, 1.0), attack_ready);
        inp.neighbors = &neighbors;
        let mut map = ContextMap::new(30).unwrap();
        root.calculate_maps(&mut map, &inp);
        map
    }

    #[test]
    fn registration_order_does_not_matter() {
        let mut arena = Arena::new();
        arena.add_wall(Vec2::new(0.0, -2.0), Vec2::new(0.4, -1.0));
        let orders: [[usize; 5]; 4] =
            [[0, 1, 2, 3, 4], [4, 3, 2, 1, 0], [2, 0, 4, 1, 3], [3, 4, 0, 2, 1]];
        for ready in [true, false] {
            let reference = run(&orders[0], &arena, ready);
            for order in &orders[1..] {
                assert_eq!(run(order, &arena, ready), reference, "order {order:?}");
            }
        }
    }

    #[test]
    fn output_is_per_slot_max() {
        let arena = Arena::new();
        let inp = input(&arena, Vec2::new(5.0, 0.0), true);

        let mut a = ContextMap::new(8).unwrap();
        ContextBehavior::approach().calculate_maps(&mut a, &inp);
        let mut b = ContextMap::new(8).unwrap();
        ContextBehavior::strafe(Handedness::CounterClockwise).calculate_maps(&mut b, &inp);

        let mut merged = ContextMap::new(8).unwrap();
        ContextBehavior::combiner(vec![
            ContextBehavior::approach(),
            ContextBehavior::strafe(Handedness::CounterClockwise),
        ])
        .calculate_maps(&mut merged, &inp);

        for i in 0..8 {
            assert_eq!(merged.interest()[i], a.interest()[i].max(b.interest()[i]));
        }
    }

    #[test]
    fn stale_map_contents_are_discarded() {
        let arena = Arena::new();
        let mut map = ContextMap::new(8).unwrap();
        map.interest_mut().fill(9.0);
        ContextBehavior::combiner(vec![ContextBehavior::seek()])
            .calculate_maps(&mut map, &input(&arena, Vec2::Y, false));
        assert!(map.interest().iter().all(|&v| v <= 1.0 + 1e-6));
    }
}

// ── Decision ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod steering {
    use foe_core::{Arena, Vec2};

    use super::*;
    use crate::{decide, ContextBehavior, ContextMap, ContextSteering};

    #[test]
    fn picks_slot_two_scaled_by_interest() {
        let mut map = ContextMap::new(8).unwrap();
        map.interest_mut().copy_from_slice(&[0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let out = decide(&mut map);
        assert!((out - Vec2::new(0.0, 5.0)).length() < 1e-5, "got {out}");
    }

    #[test]
    fn all_zero_interest_holds_position() {
        let mut map = ContextMap::new(8).unwrap();
        assert_eq!(decide(&mut map), Vec2::ZERO);
    }

    #[test]
    fn unique_minimum_masks_everything_else() {
        let mut map = ContextMap::new(8).unwrap();
        map.danger_mut().copy_from_slice(&[1.0, 1.0, 1.0, 0.2, 1.0, 1.0, 1.0, 1.0]);
        map.interest_mut().copy_from_slice(&[9.0, 9.0, 9.0, 0.0, 9.0, 9.0, 9.0, 9.0]);
        assert_eq!(decide(&mut map), Vec2::ZERO);
        assert!(map.interest().iter().all(|&v| v == 0.0));

        map.danger_mut().copy_from_slice(&[1.0, 1.0, 1.0, 0.2, 1.0, 1.0, 1.0, 1.0]);
        map.interest_mut().copy_from_slice(&[9.0, 9.0, 9.0, 0.5, 9.0, 9.0, 9.0, 9.0]);
        let out = decide(&mut map);
        assert!((out - map.direction(3) * 0.5).length() < 1e-6);
    }

    #[test]
    fn tied_minimum_keeps_both_slots() {
        let mut map = ContextMap::new(8).unwrap();
        map.danger_mut().copy_from_slice(&[1.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0]);
        map.interest_mut().copy_from_slice(&[4.0, 1.0, 4.0, 4.0, 4.0, 2.0, 4.0, 4.0]);
        decide(&mut map);
        assert_eq!(map.interest(), vec![0.0, 1.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn first_slot_wins_ties() {
        let mut map = ContextMap::new(8).unwrap();
        map.interest_mut().copy_from_slice(&[0.0, 3.0, 0.0, 3.0, 0.0, 0.0, 0.0, 0.0]);
        let out = decide(&mut map);
        assert!((out - map.direction(1) * 3.0).length() < 1e-6);
    }

    #[test]
    fn uniform_danger_is_pure_interest_choice() {
        let mut map = ContextMap::new(8).unwrap();
        map.danger_mut().fill(0.7);
        map.interest_mut().copy_from_slice(&[0.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0]);
        let out = decide(&mut map);
        assert!((out - Vec2::new(-2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn steer_scales_and_caps_by_limits() {
        let arena = Arena::new();
        let mut cs = ContextSteering::new(8, ContextBehavior::seek()).unwrap();
        let out = cs.steer(&input(&arena, Vec2::new(0.0, 3.0), false));
        assert!((out.linear - Vec2::new(0.0, 12.0)).length() < 1e-4);
        assert_eq!(out.angular, 0.0);
        assert_eq!(cs.last_output(), out);
    }

    #[test]
    fn steer_prefers_behavior_limiter() {
        let arena = Arena::new();
        let root = ContextBehavior::seek().with_limits(Limits { max_speed: 1.0, max_acceleration: 2.0 });
        let mut cs = ContextSteering::new(8, root).unwrap();
        let out = cs.steer(&input(&arena, Vec2::new(4.0, 0.0), false));
        assert!((out.linear.length() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn child_limiters_apply_tightest_first() {
        let arena = Arena::new();
        let slow = Limits { max_speed: 1.0, max_acceleration: 2.0 };
        let slower = Limits { max_speed: 0.5, max_acceleration: 4.0 };
        let root = ContextBehavior::combiner(vec![
            ContextBehavior::seek().with_limits(slow),
            ContextBehavior::avoid(1.5, 1).with_limits(slower),
            ContextBehavior::evade(2.0).with_limits(Limits { max_speed: 0.1, max_acceleration: 0.1 }).disabled(),
        ]);
        assert_eq!(root.effective_limits(), Some(Limits { max_speed: 0.5, max_acceleration: 2.0 }));

        let mut cs = ContextSteering::new(8, root).unwrap();
        let out = cs.steer(&input(&arena, Vec2::new(4.0, 0.0), false));
        assert!((out.linear.length() - 2.0).abs() < 1e-5);

        // A limiter on the root overrides its children.
        cs.root_mut().limits = Some(Limits { max_speed: 3.0, max_acceleration: 6.0 });
        let out = cs.steer(&input(&arena, Vec2::new(4.0, 0.0), false));
        assert!((out.linear.length() - 6.0).abs() < 1e-5);
    }

    #[test]
    fn steer_routes_around_wall() {
        let mut arena = Arena::new();
        arena.add_wall(Vec2::new(0.8, -0.3), Vec2::new(1.2, 0.3));
        let root = ContextBehavior::combiner(vec![
            ContextBehavior::seek(),
            ContextBehavior::avoid(1.5, 1),
        ]);
        let mut cs = ContextSteering::new(8, root).unwrap();
        let out = cs.steer(&input(&arena, Vec2::new(5.0, 1.0), false));
        // Slots 7, 0 and 1 carry danger; slot 2 is the best safe heading.
        assert!(out.linear.x.abs() < 1e-4);
        assert!(out.linear.y > 1.0);
    }
}

// ── PathFollow ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod follow {
    use foe_core::Vec2;

    use crate::{Limits, PathFollow};

    #[test]
    fn empty_path_is_arrived() {
        let mut pf = PathFollow::new(0.5);
        assert!(pf.arrived());
        assert!(pf.steer(Vec2::ZERO, Limits::default()).is_zero());
    }

    #[test]
    fn advances_through_waypoints() {
        let mut pf = PathFollow::new(0.5);
        pf.set_path(&[Vec2::ZERO, Vec2::new(2.0, 0.0), Vec2::new(2.0, 2.0)]);
        let out = pf.steer(Vec2::new(0.1, 0.0), Limits::default());
        assert_eq!(pf.current(), Some(Vec2::new(2.0, 0.0)));
        assert!(out.linear.x > 0.0);

        pf.steer(Vec2::new(1.9, 0.1), Limits::default());
        assert_eq!(pf.current(), Some(Vec2::new(2.0, 2.0)));

        let out = pf.steer(Vec2::new(2.0, 1.8), Limits::default());
        assert!(pf.arrived());
        assert!(out.is_zero());
        assert_eq!(pf.destination(), Some(Vec2::new(2.0, 2.0)));
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use crate::SteeringConfig;

    #[test]
    fn defaults_valid() {
        let cfg = SteeringConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.resolution, 8);
        assert_eq!(cfg.battle_resolution, 30);
        assert_eq!(cfg.avoid_spread, 2);
    }

    #[test]
    fn rejects_zero_resolution() {
        let cfg = SteeringConfig { battle_resolution: 0, ..SteeringConfig::default() };
        assert!(cfg.validate().is_err());
    }
}
