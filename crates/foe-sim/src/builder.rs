//! Fluent builder for constructing a [`Sim`].

use foe_brain::{AgentController, AttackController, BrainConfig, TimedAttack};
use foe_core::{AgentId, AgentRng, Body, PhysicsWorld, SimConfig, SimRng, TargetState, Vec2};
use foe_nav::{NavGrid, PathPlanner};
use foe_squad::{SquadConfig, TacticalCoordinator};

use crate::{Sim, SimError, SimResult};

/// One agent to spawn.  Agents get `AgentId`s in the order they are added.
pub struct AgentSpawn {
    pub body:   Body,
    pub patrol: Vec<Vec2>,
    /// Defaults to [`TimedAttack::default`].
    pub attack: Option<Box<dyn AttackController>>,
    /// Per-agent override of the builder's brain configuration.
    pub config: Option<BrainConfig>,
}

impl AgentSpawn {
    pub fn new(body: Body, patrol: Vec<Vec2>) -> Self {
        Self { body, patrol, attack: None, config: None }
    }

    pub fn with_attack(mut self, attack: Box<dyn AttackController>) -> Self {
        self.attack = Some(attack);
        self
    }

    pub fn with_config(mut self, config: BrainConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Fluent builder for [`Sim<W, P>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — tick length, tick count, seed
/// - `W: PhysicsWorld` — raycasts and region queries
/// - [`NavGrid`] — built once from the same world
/// - `P: PathPlanner` — e.g. [`foe_nav::AStarPlanner`]
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                             |
/// |-----------------|-------------------------------------|
/// | `.brain(c)`     | `BrainConfig::default()`            |
/// | `.squad(c)`     | `SquadConfig::default()`            |
/// | `.target(t)`    | Invalid entity at the origin        |
/// | `.agent(s)`     | no agents                           |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, arena, grid, AStarPlanner)
///     .target(TargetState::new(player, Vec2::new(12.0, 4.0)))
///     .agent(AgentSpawn::new(Body::new(e0, Vec2::new(2.5, 2.5), 0.0), patrol))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<W: PhysicsWorld, P: PathPlanner> {
    config:  SimConfig,
    world:   W,
    grid:    NavGrid,
    planner: P,
    brain:   BrainConfig,
    squad:   SquadConfig,
    target:  TargetState,
    spawns:  Vec<AgentSpawn>,
}

impl<W: PhysicsWorld, P: PathPlanner> SimBuilder<W, P> {
    pub fn new(config: SimConfig, world: W, grid: NavGrid, planner: P) -> Self {
        Self {
            config,
            world,
            grid,
            planner,
            brain:  BrainConfig::default(),
            squad:  SquadConfig::default(),
            target: TargetState::new(foe_core::EntityId::INVALID, Vec2::ZERO),
            spawns: Vec::new(),
        }
    }

    /// Brain configuration for every agent without its own override.
    pub fn brain(mut self, config: BrainConfig) -> Self {
        self.brain = config;
        self
    }

    pub fn squad(mut self, config: SquadConfig) -> Self {
        self.squad = config;
        self
    }

    pub fn target(mut self, target: TargetState) -> Self {
        self.target = target;
        self
    }

    pub fn agent(mut self, spawn: AgentSpawn) -> Self {
        self.spawns.push(spawn);
        self
    }

    pub fn agents(mut self, spawns: impl IntoIterator<Item = AgentSpawn>) -> Self {
        self.spawns.extend(spawns);
        self
    }

    /// Validate every configuration, construct the controllers and the
    /// coordinator, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<W, P>> {
        self.config.validate()?;
        if u32::try_from(self.spawns.len()).is_err() {
            return Err(SimError::Config(format!("too many agents: {}", self.spawns.len())));
        }

        let coordinator = TacticalCoordinator::new(self.squad)?;

        let mut agents = Vec::with_capacity(self.spawns.len());
        let mut rngs = Vec::with_capacity(self.spawns.len());
        for (i, spawn) in self.spawns.into_iter().enumerate() {
            let id = AgentId(i as u32);
            let attack = spawn.attack.unwrap_or_else(|| Box::new(TimedAttack::default()));
            let config = spawn.config.unwrap_or_else(|| self.brain.clone());
            agents.push(AgentController::new(id, spawn.body, spawn.patrol, config, attack)?);
            rngs.push(AgentRng::new(self.config.seed, id));
        }

        let mut world = self.world;
        if self.target.entity.is_valid() {
            world.sync_body(self.target.entity, self.target.position);
        }

        tracing::info!(
            agents = agents.len(),
            cells = self.grid.node_count(),
            seed = self.config.seed,
            "sim built"
        );

        Ok(Sim {
            clock:       self.config.make_clock(),
            squad_rng:   SimRng::new(self.config.seed).child(u64::MAX),
            config:      self.config,
            world,
            grid:        self.grid,
            planner:     self.planner,
            target:      self.target,
            agents,
            rngs,
            coordinator,
            events:      Vec::new(),
            transitions: Vec::new(),
            positions:   Vec::new(),
            members:     Vec::new(),
        })
    }
}
