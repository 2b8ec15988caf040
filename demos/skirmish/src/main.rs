//! skirmish — four guards patrol a walled 24 × 24 arena while an intruder
//! walks a circle through it.
//!
//! ```text
//! cargo run -p skirmish                     # built-in defaults
//! cargo run -p skirmish -- skirmish.json    # override any config section
//! RUST_LOG=debug cargo run -p skirmish      # include squad chatter
//! ```
//!
//! The config file is JSON; every section and field is optional:
//!
//! ```json
//! { "sim": { "total_ticks": 7200, "seed": 7 },
//!   "squad": { "frontal_attack_chance": 0.5 },
//!   "intruder": { "radius": 6.0, "speed": 0.4 } }
//! ```

use std::collections::BTreeMap;
use std::f32::consts::FRAC_PI_2;
use std::fs;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use foe_brain::{AgentController, BrainConfig, Directive, Transition};
use foe_core::{Arena, Body, BodyKind, EntityId, SimConfig, TargetState, Tick, Vec2};
use foe_nav::{AStarPlanner, GridConfig, NavGridBuilder};
use foe_sim::{AgentSpawn, Sim, SimBuilder, SimObserver};
use foe_squad::SquadConfig;

const SIZE: u32 = 24;

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct SkirmishConfig {
    sim:      SimConfig,
    brain:    BrainConfig,
    squad:    SquadConfig,
    intruder: IntruderPath,
}

/// The intruder walks a circle around `center`.
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
struct IntruderPath {
    center:  [f32; 2],
    radius:  f32,
    /// Angular speed in radians per second.
    speed:   f32,
    /// Exposure in `[0, 1]`.
    stealth: f32,
}

impl Default for IntruderPath {
    fn default() -> Self {
        Self { center: [12.0, 12.0], radius: 8.0, speed: 0.25, stealth: 1.0 }
    }
}

impl IntruderPath {
    fn state_at(&self, entity: EntityId, secs: f32) -> TargetState {
        let angle = secs * self.speed;
        let offset = Vec2::new(angle.cos(), angle.sin()) * self.radius;
        let tangent = Vec2::new(-angle.sin(), angle.cos());
        TargetState {
            entity,
            position:    Vec2::from(self.center) + offset,
            velocity:    tangent * self.radius * self.speed,
            orientation: angle + FRAC_PI_2,
            stealth:     self.stealth,
        }
    }
}

fn load_config() -> Result<SkirmishConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SkirmishConfig::default());
    };
    let text = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Logs state changes and squad orders; tallies them for the final report.
#[derive(Default)]
struct Narrator {
    transitions: usize,
    alerts:      usize,
    attacks:     usize,
    strafes:     usize,
}

impl SimObserver for Narrator {
    fn on_transition(&mut self, tick: Tick, t: &Transition) {
        self.transitions += 1;
        tracing::info!(%tick, agent = %t.agent, from = %t.from, to = %t.to, "state");
    }

    fn on_directive(&mut self, tick: Tick, directive: &Directive) {
        match directive {
            Directive::ForceAlert { agent, target_position } => {
                self.alerts += 1;
                tracing::info!(%tick, %agent, at = ?target_position, "squad alert");
            }
            Directive::Attack(agent) => {
                self.attacks += 1;
                tracing::debug!(%tick, %agent, "attack order");
            }
            Directive::Strafe(agent) => {
                self.strafes += 1;
                tracing::debug!(%tick, %agent, "strafe order");
            }
            Directive::FlipStrafe(agent) => tracing::debug!(%tick, %agent, "flip strafe"),
        }
    }

    fn on_tick_end(&mut self, tick: Tick, agents: &[AgentController]) {
        if !tick.is_cadence(600) {
            return;
        }
        for a in agents {
            let v = a.view();
            tracing::debug!(
                %tick,
                agent = %v.id,
                state = v.state_name,
                gauge = v.gauge,
                x = v.position.x,
                y = v.position.y,
                "status"
            );
        }
    }
}

#[derive(Serialize)]
struct Report {
    ticks:         u64,
    transitions:   usize,
    squad_alerts:  usize,
    attack_orders: usize,
    strafe_orders: usize,
    final_states:  BTreeMap<u32, &'static str>,
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Outer walls, a central pillar and two partition walls with a window.
fn build_arena() -> Arena {
    let s = SIZE as f32;
    let mut arena = Arena::new();
    arena.add_wall(Vec2::new(0.0, 0.0), Vec2::new(s, 0.5));
    arena.add_wall(Vec2::new(0.0, s - 0.5), Vec2::new(s, s));
    arena.add_wall(Vec2::new(0.0, 0.0), Vec2::new(0.5, s));
    arena.add_wall(Vec2::new(s - 0.5, 0.0), Vec2::new(s, s));

    arena.add_wall(Vec2::new(10.0, 10.0), Vec2::new(14.0, 14.0));
    arena.add_wall(Vec2::new(5.0, 17.0), Vec2::new(5.5, 22.0));
    arena.add_wall(Vec2::new(18.5, 2.0), Vec2::new(19.0, 7.0));
    arena.add_window(Vec2::new(18.5, 7.0), Vec2::new(19.0, 9.0));
    arena
}

fn guards(arena: &mut Arena) -> Vec<AgentSpawn> {
    let corners = [
        (Vec2::new(3.5, 3.5), vec![Vec2::new(3.5, 3.5), Vec2::new(8.5, 3.5), Vec2::new(8.5, 7.5)]),
        (Vec2::new(20.5, 3.5), vec![Vec2::new(20.5, 3.5), Vec2::new(20.5, 9.5)]),
        (Vec2::new(20.5, 20.5), vec![Vec2::new(20.5, 20.5), Vec2::new(15.5, 20.5), Vec2::new(15.5, 16.5)]),
        (Vec2::new(3.5, 14.5), vec![Vec2::new(3.5, 14.5), Vec2::new(8.5, 14.5)]),
    ];
    corners
        .into_iter()
        .map(|(spawn, route)| {
            let entity = arena.add_body(spawn, 0.3, BodyKind::Agent);
            AgentSpawn::new(Body::new(entity, spawn, 0.0), route)
        })
        .collect()
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = load_config()?;
    tracing::debug!(config = %serde_json::to_string(&cfg)?, "effective config");

    let mut arena = build_arena();
    let spawns = guards(&mut arena);
    let start = cfg.intruder.state_at(EntityId::INVALID, 0.0).position;
    let intruder = arena.add_body(start, 0.3, BodyKind::Target);

    let grid = NavGridBuilder::new(GridConfig::new(Vec2::ZERO, SIZE, SIZE, 1.0).with_seed(cfg.sim.seed))
        .rasterize(&arena)
        .build()
        .context("building nav grid")?;
    tracing::info!(cells = grid.node_count(), blocked = grid.obstacle_count(), "grid ready");

    let mut sim: Sim<Arena, AStarPlanner> = SimBuilder::new(cfg.sim.clone(), arena, grid, AStarPlanner)
        .brain(cfg.brain.clone())
        .squad(cfg.squad.clone())
        .target(cfg.intruder.state_at(intruder, 0.0))
        .agents(spawns)
        .build()?;

    let mut narrator = Narrator::default();
    while sim.clock.current_tick < sim.config.end_tick() {
        let now = sim.clock.elapsed_secs();
        sim.set_target(cfg.intruder.state_at(intruder, now));
        sim.step(&mut narrator);
    }
    narrator.on_sim_end(sim.clock.current_tick);

    let report = Report {
        ticks:         sim.clock.current_tick.0,
        transitions:   narrator.transitions,
        squad_alerts:  narrator.alerts,
        attack_orders: narrator.attacks,
        strafe_orders: narrator.strafes,
        final_states:  sim.views().map(|v| (v.id.0, v.state_name)).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
