//! Integration tests for foe-sim.

use foe_brain::BrainConfig;
use foe_core::{AgentId, Arena, Body, EntityId, SimConfig, TargetState, Tick, Vec2};
use foe_nav::{AStarPlanner, GridConfig, NavGrid, NavGridBuilder};

use crate::{AgentSpawn, Sim, SimBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig { total_ticks, ..SimConfig::default() }
}

/// 20 × 20 unit cells from the origin; centroids on half-integer points.
fn grid_for(arena: &Arena) -> NavGrid {
    NavGridBuilder::new(GridConfig::new(Vec2::ZERO, 20, 20, 1.0))
        .rasterize(arena)
        .build()
        .unwrap()
}

fn spawn(entity: u32, x: f32, y: f32, facing: f32, patrol: Vec<Vec2>) -> AgentSpawn {
    AgentSpawn::new(Body::new(EntityId(entity), Vec2::new(x, y), facing), patrol)
}

fn far_target() -> TargetState {
    TargetState::new(EntityId::INVALID, Vec2::new(100.0, 100.0))
}

fn builder(config: SimConfig) -> SimBuilder<Arena, AStarPlanner> {
    let arena = Arena::new();
    let grid = grid_for(&arena);
    SimBuilder::new(config, arena, grid, AStarPlanner).target(far_target())
}

fn build(b: SimBuilder<Arena, AStarPlanner>) -> Sim<Arena, AStarPlanner> {
    b.build().unwrap()
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use foe_squad::SquadConfig;

    use super::*;
    use crate::SimError;

    #[test]
    fn builds_agents_in_order() {
        let sim = build(
            builder(test_config(10))
                .agent(spawn(10, 1.5, 1.5, 0.0, vec![]))
                .agent(spawn(11, 3.5, 1.5, 0.0, vec![])),
        );
        assert_eq!(sim.agents.len(), 2);
        assert_eq!(sim.rngs.len(), 2);
        assert_eq!(sim.agents[1].id(), AgentId(1));
        assert_eq!(sim.agents[1].body().entity, EntityId(11));
    }

    #[test]
    fn bad_tick_length_errors() {
        let cfg = SimConfig { dt_secs: 0.0, ..SimConfig::default() };
        assert!(matches!(builder(cfg).build(), Err(SimError::Core(_))));
    }

    #[test]
    fn bad_brain_config_errors() {
        let bad = BrainConfig { look_around_chance: -1.0, ..BrainConfig::default() };
        let result = builder(test_config(10))
            .agent(spawn(10, 1.5, 1.5, 0.0, vec![]).with_config(bad))
            .build();
        assert!(matches!(result, Err(SimError::Brain(_))));
    }

    #[test]
    fn bad_squad_config_errors() {
        let bad = SquadConfig { broadcast_interval_ticks: 0, ..SquadConfig::default() };
        assert!(matches!(builder(test_config(10)).squad(bad).build(), Err(SimError::Squad(_))));
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loop_tests {
    use foe_brain::{AgentController, AgentState};
    use foe_core::BodyKind;

    use super::*;
    use crate::{NoopObserver, SimError, SimObserver};

    #[derive(Default)]
    struct Counter {
        starts: u64,
        ends:   u64,
        last:   Option<Tick>,
    }

    impl SimObserver for Counter {
        fn on_tick_start(&mut self, _tick: Tick) {
            self.starts += 1;
        }
        fn on_tick_end(&mut self, _tick: Tick, agents: &[AgentController]) {
            assert_eq!(agents.len(), 1);
            self.ends += 1;
        }
        fn on_sim_end(&mut self, final_tick: Tick) {
            self.last = Some(final_tick);
        }
    }

    #[test]
    fn run_stops_at_end_tick() {
        let mut sim = build(builder(test_config(10)).agent(spawn(10, 1.5, 1.5, 0.0, vec![])));
        let mut obs = Counter::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(10));
        assert_eq!((obs.starts, obs.ends, obs.last), (10, 10, Some(Tick(10))));
        assert_eq!(sim.agents[0].state(), AgentState::Patrol);
    }

    #[test]
    fn bodies_integrate_and_sync() {
        let route = vec![Vec2::new(1.5, 1.5), Vec2::new(8.5, 1.5)];
        let mut arena = Arena::new();
        let entity = arena.add_body(Vec2::new(1.5, 1.5), 0.3, BodyKind::Agent);
        let grid = grid_for(&arena);
        let mut sim = SimBuilder::new(test_config(60), arena, grid, AStarPlanner)
            .target(far_target())
            .agent(AgentSpawn::new(Body::new(entity, Vec2::new(1.5, 1.5), 0.0), route))
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();

        let pos = sim.agents[0].position();
        assert!(pos.x > 2.5);
        assert_eq!(sim.world.body_position(entity), Some(pos));
    }

    #[test]
    fn external_physics_leaves_bodies_alone() {
        let cfg = SimConfig { integrate_bodies: false, ..test_config(60) };
        let route = vec![Vec2::new(1.5, 1.5), Vec2::new(8.5, 1.5)];
        let mut sim = build(builder(cfg).agent(spawn(10, 1.5, 1.5, 0.0, route)));
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.agents[0].position(), Vec2::new(1.5, 1.5));
        // The brain still produced a steering request.
        assert!(sim.agents[0].view().steering.linear.x > 0.0);
    }

    #[test]
    fn unknown_agent_lookup_errors() {
        let sim = build(builder(test_config(1)));
        assert!(matches!(sim.agent(AgentId(3)), Err(SimError::Core(_))));
    }

    #[test]
    fn set_target_moves_target_body() {
        let mut arena = Arena::new();
        let player = arena.add_body(Vec2::new(15.0, 15.0), 0.3, BodyKind::Target);
        let grid = grid_for(&arena);
        let mut sim = SimBuilder::new(test_config(1), arena, grid, AStarPlanner)
            .target(TargetState::new(player, Vec2::new(15.0, 15.0)))
            .build()
            .unwrap();
        sim.set_target(TargetState::new(player, Vec2::new(12.0, 3.0)));
        assert_eq!(sim.world.body_position(player), Some(Vec2::new(12.0, 3.0)));
        assert_eq!(sim.target.position, Vec2::new(12.0, 3.0));
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use foe_brain::{AgentState, Directive};
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::SimLog;

    fn saw(log: &SimLog, agent: u32, from: AgentState, to: AgentState) -> bool {
        log.transitions
            .iter()
            .any(|(_, t)| t.agent == AgentId(agent) && t.from == from && t.to == to)
    }

    #[test]
    fn patrol_look_around_patrol() {
        let brain = BrainConfig { look_around_chance: 1.0, ..BrainConfig::default() };
        let route = vec![Vec2::new(2.5, 2.5), Vec2::new(6.5, 2.5)];
        let mut sim = build(builder(test_config(600)).brain(brain).agent(spawn(10, 2.5, 2.5, 0.0, route)));
        let mut log = SimLog::new();
        sim.run(&mut log).unwrap();

        assert!(saw(&log, 0, AgentState::Init, AgentState::Patrol));
        assert!(saw(&log, 0, AgentState::Patrol, AgentState::LookAround));
        assert!(saw(&log, 0, AgentState::LookAround, AgentState::Patrol));
        assert!(!log.transitions.iter().any(|(_, t)| t.to == AgentState::Noticed));
        assert!(log.directives.is_empty());
    }

    #[test]
    fn found_forces_idle_ally_into_alert() {
        let target = Vec2::new(8.5, 5.5);
        let mut sim = build(
            builder(test_config(2_000))
                .target(TargetState::new(EntityId::INVALID, target))
                // Sees the target straight ahead.
                .agent(spawn(10, 5.5, 5.5, 0.0, vec![]))
                // Facing away, out of hearing range.
                .agent(spawn(11, 5.5, 12.5, FRAC_PI_2, vec![])),
        );
        let mut log = SimLog::new();

        assert!(sim.run_until(600, &mut log, |s| s.agents[1].state() == AgentState::Alert));
        assert!(saw(&log, 0, AgentState::Indicator, AgentState::Alert));
        assert!(saw(&log, 1, AgentState::Patrol, AgentState::Alert));
        assert!(log.directives.iter().any(|(_, d)| {
            *d == Directive::ForceAlert { agent: AgentId(1), target_position: target }
        }));
        // The reporter is never sent its own alert.
        assert!(!log.directives.iter().any(|(_, d)| {
            matches!(d, Directive::ForceAlert { agent: AgentId(0), .. })
        }));

        // Sooner or later the squad fights: someone joins the roster.
        assert!(sim.run_until(600, &mut log, |s| !s.coordinator.roster().is_empty()));
    }
}
