//! Unit tests for foe-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, EntityId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert!(!EntityId::default().is_valid());
        assert!(EntityId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod heading {
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    use glam::Vec2;

    use crate::heading::*;
    use crate::Handedness;

    #[test]
    fn slot_heading_roundtrip_for_used_resolutions() {
        for resolution in [8usize, 16, 30] {
            for slot in 0..resolution {
                let h = slot_to_heading(slot, resolution);
                assert_eq!(heading_to_slot(h, resolution), slot, "res {resolution} slot {slot}");
            }
        }
    }

    #[test]
    fn heading_to_slot_wraps_negative_and_large_angles() {
        assert_eq!(heading_to_slot(-FRAC_PI_2, 8), 6);
        assert_eq!(heading_to_slot(TAU + FRAC_PI_2, 8), 2);
        // Just below a full turn rounds to slot 0, not `resolution`.
        assert_eq!(heading_to_slot(TAU - 1e-4, 8), 0);
    }

    #[test]
    fn slot_direction_matches_trig() {
        let d = slot_direction(2, 8);
        assert!((d - Vec2::Y).length() < 1e-6, "got {d}");
        let d = slot_direction(4, 8);
        assert!((d + Vec2::X).length() < 1e-6, "got {d}");
    }

    #[test]
    fn wrap_angle_range() {
        assert!((wrap_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-5);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-5);
        assert!((wrap_angle(0.25) - 0.25).abs() < 1e-6);
        assert!((angle_diff(PI - 0.1, -PI + 0.1) - 0.2).abs() < 1e-5);
    }

    #[test]
    fn handedness_perpendiculars() {
        let ccw = Handedness::CounterClockwise.perpendicular(Vec2::X);
        let cw = Handedness::Clockwise.perpendicular(Vec2::X);
        assert_eq!(ccw, Vec2::Y);
        assert_eq!(cw, -Vec2::Y);
        assert_eq!(Handedness::Clockwise.flipped(), Handedness::CounterClockwise);
    }
}

#[cfg(test)]
mod time {
    use crate::{Cooldown, SimClock, SimConfig, Tick, Timer};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn cadence() {
        assert!(Tick(0).is_cadence(10));
        assert!(Tick(20).is_cadence(10));
        assert!(!Tick(21).is_cadence(10));
        assert!(!Tick(0).is_cadence(0));
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(0.1);
        for _ in 0..10 {
            clock.advance();
        }
        assert!((clock.elapsed_secs() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn config_validation() {
        assert!(SimConfig::default().validate().is_ok());
        let bad = SimConfig { dt_secs: 0.0, ..SimConfig::default() };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn cooldown_fires_immediately_then_every_interval() {
        let mut cd = Cooldown::new(0.1);
        assert!(cd.tick(0.05));
        assert!(!cd.tick(0.05));
        assert!(cd.tick(0.05));
        cd.trigger();
        assert!(cd.tick(0.0));
    }

    #[test]
    fn timer_runs_out() {
        let mut t = Timer::new(0.5);
        assert!(!t.advance(0.2));
        assert!(t.advance(0.4));
        assert!(t.finished());
        t.reset(1.0);
        assert!(!t.finished());
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        let a: Vec<bool> = (0..100).map(|_| r1.chance(0.5)).collect();
        let b: Vec<bool> = (0..100).map(|_| r2.chance(0.5)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        let mut a: Vec<u32> = (0..32).collect();
        let mut b = a.clone();
        r0.shuffle(&mut a);
        r1.shuffle(&mut b);
        assert_ne!(a, b);
    }

    #[test]
    fn chance_extremes() {
        let mut rng = SimRng::new(0);
        for _ in 0..100 {
            assert!(rng.chance(1.0));
            assert!(!rng.chance(0.0));
        }
    }

    #[test]
    fn shuffle_is_seeded() {
        let mut a: Vec<u32> = (0..16).collect();
        let mut b = a.clone();
        SimRng::new(9).shuffle(&mut a);
        SimRng::new(9).shuffle(&mut b);
        assert_eq!(a, b);
    }
}

#[cfg(test)]
mod body {
    use std::f32::consts::FRAC_PI_2;

    use glam::Vec2;

    use crate::{Body, EntityId, TargetState};

    #[test]
    fn turn_towards_is_rate_limited() {
        let mut b = Body::new(EntityId(0), Vec2::ZERO, 0.0);
        b.max_turn_rate = 1.0;
        let err = b.turn_towards(FRAC_PI_2, 0.5);
        assert!((b.orientation - 0.5).abs() < 1e-6);
        assert!((err - (FRAC_PI_2 - 0.5)).abs() < 1e-5);
        for _ in 0..10 {
            b.turn_towards(FRAC_PI_2, 0.5);
        }
        assert!((b.orientation - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn integrate_respects_speed_limit() {
        let mut b = Body::new(EntityId(0), Vec2::ZERO, 0.0);
        b.linear_damping = 0.0;
        for _ in 0..1000 {
            b.apply_force(Vec2::X * 100.0);
            b.integrate(0.1);
        }
        assert!(b.speed() <= b.max_speed + 1e-4);
        assert!(b.position.x > 0.0);
    }

    #[test]
    fn halt_zeroes_motion() {
        let mut b = Body::new(EntityId(0), Vec2::ZERO, 0.0);
        b.set_linear_velocity(Vec2::new(1.0, 1.0));
        b.apply_force(Vec2::X);
        b.halt();
        b.integrate(0.1);
        assert_eq!(b.position, Vec2::ZERO);
    }

    #[test]
    fn behind_target() {
        let t = TargetState::new(EntityId(0), Vec2::ZERO); // facing +X
        assert!(t.is_behind(Vec2::new(-2.0, 0.1), -0.5));
        assert!(!t.is_behind(Vec2::new(2.0, 0.0), -0.5));
        assert!(!t.is_behind(Vec2::new(0.0, 2.0), -0.5));
    }
}

#[cfg(test)]
mod arena {
    use glam::Vec2;

    use crate::{Arena, BodyKind, EntityId, PhysicsWorld, RayFilter};

    #[test]
    fn wall_blocks_ray_with_normal() {
        let mut arena = Arena::new();
        let wall = arena.add_wall(Vec2::new(2.0, -1.0), Vec2::new(3.0, 1.0));
        let hit = arena
            .raycast(Vec2::ZERO, Vec2::new(5.0, 0.0), &RayFilter::sight(Default::default()))
            .expect("wall should be hit");
        assert_eq!(hit.entity, wall);
        assert!((hit.fraction - 0.4).abs() < 1e-5);
        assert_eq!(hit.normal, Vec2::new(-1.0, 0.0));
        assert!((hit.point.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn window_blocks_movement_not_sight() {
        let mut arena = Arena::new();
        let me = arena.add_body(Vec2::ZERO, 0.3, BodyKind::Agent);
        arena.add_window(Vec2::new(2.0, -1.0), Vec2::new(3.0, 1.0));
        let to = Vec2::new(5.0, 0.0);
        assert!(arena.is_clear(Vec2::ZERO, to, &RayFilter::sight(me)));
        assert!(!arena.is_clear(Vec2::ZERO, to, &RayFilter::movement(me)));
    }

    #[test]
    fn agents_ignored_for_sight_but_target_reached() {
        let mut arena = Arena::new();
        let me = arena.add_body(Vec2::ZERO, 0.3, BodyKind::Agent);
        arena.add_body(Vec2::new(2.0, 0.0), 0.3, BodyKind::Agent);
        let target = arena.add_body(Vec2::new(4.0, 0.0), 0.3, BodyKind::Target);
        assert!(arena.reaches(Vec2::ZERO, Vec2::new(4.0, 0.0), target, &RayFilter::sight(me)));
    }

    #[test]
    fn own_body_is_skipped() {
        let mut arena = Arena::new();
        let me = arena.add_body(Vec2::ZERO, 0.5, BodyKind::Agent);
        let filter = crate::RayFilter {
            ignore_agents: false,
            see_through:   true,
            ignore_target: false,
            ignore_entity: Some(me),
        };
        assert!(arena.is_clear(Vec2::new(-2.0, 0.0), Vec2::new(-1.0, 0.0), &filter));
        assert!(arena.is_clear(Vec2::new(-2.0, 0.0), Vec2::new(2.0, 0.0), &filter));
    }

    #[test]
    fn past_target_hits_what_lies_behind() {
        let mut arena = Arena::new();
        arena.add_body(Vec2::new(1.0, 0.0), 0.3, BodyKind::Target);
        let wall = arena.add_wall(Vec2::new(2.0, -0.5), Vec2::new(2.5, 0.5));
        let movement = RayFilter::movement(EntityId::INVALID);

        let hit = arena.raycast(Vec2::ZERO, Vec2::new(3.0, 0.0), &movement).unwrap();
        assert_eq!(hit.kind, BodyKind::Target);

        let hit = arena.raycast(Vec2::ZERO, Vec2::new(3.0, 0.0), &movement.past_target()).unwrap();
        assert_eq!(hit.entity, wall);
        assert!((hit.point.x - 2.0).abs() < 1e-4);
    }

    #[test]
    fn region_query_and_sync() {
        let mut arena = Arena::new();
        arena.add_wall(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        assert!(arena.query_region(Vec2::new(0.5, 0.5), Vec2::new(1.5, 1.5)));
        assert!(!arena.query_region(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0)));

        let body = arena.add_body(Vec2::ZERO, 0.2, BodyKind::Target);
        arena.sync_body(body, Vec2::new(3.0, 4.0));
        assert_eq!(arena.body_position(body), Some(Vec2::new(3.0, 4.0)));
    }
}
