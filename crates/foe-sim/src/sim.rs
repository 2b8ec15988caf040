//! The `Sim` struct and its tick loop.

use std::mem;

use foe_brain::{AgentController, AgentView, Directive, SquadEvent, TickContext, Transition};
use foe_core::{AgentId, AgentRng, CoreError, PhysicsWorld, SimClock, SimConfig, SimRng, TargetState, Vec2};
use foe_nav::{NavGrid, PathPlanner};
use foe_squad::{MemberSnapshot, SquadContext, TacticalCoordinator};

use crate::{SimObserver, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<W, P>` owns the world, the shared navigation grid, every agent and
/// the squad coordinator, and drives the fixed-step tick loop:
///
/// 1. **Agents**: each agent ticks in ascending `AgentId` order:
///    perception, state update, steering force.
/// 2. **Integrate** (if `config.integrate_bodies`): step every body and
///    mirror its position into the world.
/// 3. **Squad**: the coordinator drains this tick's events and, on its
///    cadence, broadcasts directives.
/// 4. **Directives**: applied in the order produced.
/// 5. **Observer**: transitions and directives are reported.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<W: PhysicsWorld, P: PathPlanner> {
    pub config: SimConfig,
    pub clock:  SimClock,

    /// Physics world.  Agent bodies are synced into it after integration.
    pub world: W,

    /// Static obstacle grid, shared read-only by every agent's planner calls.
    pub grid: NavGrid,

    pub planner: P,

    /// The target as the AI sees it.  Update with [`Sim::set_target`].
    pub target: TargetState,

    /// Indexed by `AgentId`.
    pub agents: Vec<AgentController>,

    /// Per-agent deterministic RNGs, kept apart from the controllers for the
    /// split-borrow in the agent loop.
    pub rngs: Vec<AgentRng>,

    pub coordinator: TacticalCoordinator,

    pub(crate) squad_rng:   SimRng,
    pub(crate) events:      Vec<SquadEvent>,
    pub(crate) transitions: Vec<Transition>,
    pub(crate) positions:   Vec<Vec2>,
    pub(crate) members:     Vec<MemberSnapshot>,
}

impl<W: PhysicsWorld, P: PathPlanner> Sim<W, P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    /// Run until `pred` holds after a tick, at most `limit` ticks.  Returns
    /// whether it did.
    pub fn run_until<O: SimObserver>(
        &mut self,
        limit:    u64,
        observer: &mut O,
        mut pred: impl FnMut(&Self) -> bool,
    ) -> bool {
        for _ in 0..limit {
            self.step(observer);
            if pred(&*self) {
                return true;
            }
        }
        false
    }

    /// Replace the target snapshot, mirroring its position into the world.
    pub fn set_target(&mut self, target: TargetState) {
        if target.entity.is_valid() {
            self.world.sync_body(target.entity, target.position);
        }
        self.target = target;
    }

    pub fn agent(&self, id: AgentId) -> SimResult<&AgentController> {
        self.agents.get(id.index()).ok_or(CoreError::AgentNotFound(id).into())
    }

    pub fn agent_mut(&mut self, id: AgentId) -> SimResult<&mut AgentController> {
        self.agents.get_mut(id.index()).ok_or(CoreError::AgentNotFound(id).into())
    }

    pub fn views(&self) -> impl Iterator<Item = AgentView<'_>> + '_ {
        self.agents.iter().map(AgentController::view)
    }

    /// Route a directive to its agent outside the coordinator cycle.
    pub fn apply_directive(&mut self, directive: &Directive) -> SimResult<()> {
        let i = directive.agent().index();
        if i >= self.agents.len() {
            return Err(CoreError::AgentNotFound(directive.agent()).into());
        }
        self.deliver(i, directive);
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Advance one tick.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        // ── Phase 1: agents ───────────────────────────────────────────────
        let mut positions = mem::take(&mut self.positions);
        positions.clear();
        positions.extend(self.agents.iter().map(AgentController::position));

        let now_secs = self.clock.elapsed_secs();
        for (agent, rng) in self.agents.iter_mut().zip(self.rngs.iter_mut()) {
            let mut ctx = TickContext {
                now:         now_secs,
                dt:          self.clock.dt_secs,
                target:      &self.target,
                world:       &self.world,
                grid:        &self.grid,
                planner:     &self.planner,
                neighbors:   &positions,
                rng,
                events:      &mut self.events,
                transitions: &mut self.transitions,
            };
            agent.tick(&mut ctx);
        }
        self.positions = positions;

        // ── Phase 2: integrate ────────────────────────────────────────────
        if self.config.integrate_bodies {
            let dt = self.clock.dt_secs;
            for agent in &mut self.agents {
                let body = agent.body_mut();
                body.integrate(dt);
                self.world.sync_body(body.entity, body.position);
            }
        }

        // ── Phase 3: squad cycle ──────────────────────────────────────────
        self.coordinator.extend(self.events.drain(..));
        self.members.clear();
        self.members.extend(self.agents.iter().map(|a| MemberSnapshot {
            id:           a.id(),
            entity:       a.body().entity,
            position:     a.position(),
            state:        a.state(),
            attacking:    a.is_attacking(),
            attack_ready: a.can_start_new_attack(),
        }));
        let ctx = SquadContext { members: &self.members, target: &self.target, world: &self.world };
        let directives = self.coordinator.run_cycle(now, &ctx, &mut self.squad_rng);

        // ── Phase 4: directives ───────────────────────────────────────────
        for d in &directives {
            let i = d.agent().index();
            if i >= self.agents.len() {
                tracing::warn!(agent = %d.agent(), "directive for unknown agent dropped");
                continue;
            }
            self.deliver(i, d);
        }

        // ── Phase 5: report ───────────────────────────────────────────────
        for t in self.transitions.drain(..) {
            observer.on_transition(now, &t);
        }
        for d in &directives {
            observer.on_directive(now, d);
        }
        observer.on_tick_end(now, &self.agents);

        tracing::trace!(tick = %now, directives = directives.len(), "tick done");
        self.clock.advance();
    }

    fn deliver(&mut self, i: usize, directive: &Directive) {
        let mut ctx = TickContext {
            now:         self.clock.elapsed_secs(),
            dt:          self.clock.dt_secs,
            target:      &self.target,
            world:       &self.world,
            grid:        &self.grid,
            planner:     &self.planner,
            neighbors:   &self.positions,
            rng:         &mut self.rngs[i],
            events:      &mut self.events,
            transitions: &mut self.transitions,
        };
        self.agents[i].apply_directive(directive, &mut ctx);
    }
}
