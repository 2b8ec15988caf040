//! `AgentController` — one enemy's brain.
//!
//! Owns the body, perception, steering trees, path follower and state
//! machine of a single agent.  Per tick: perception → state update (may
//! transition) → steering output applied to the body as a force.

use foe_core::heading::vec_to_heading;
use foe_core::{AgentId, Body, Cooldown, Timer, Vec2};
use foe_perception::{DetectionLevel, Observer, Perception};
use foe_steering::{
    BehaviorTag, ContextBehavior, ContextSteering, Limits, PathFollow, SteeringInput,
    SteeringOutput,
};

use crate::machine::handlers;
use crate::{
    AgentState, AnimationHint, AttackController, BrainConfig, BrainResult, Directive,
    PatrolRoute, SquadEvent, TickContext, Transition,
};

/// Progress through a look-around sweep.
#[derive(Clone, Debug, Default)]
pub(crate) struct Sweep {
    pub base:  f32,
    pub phase: u8,
    pub timer: Timer,
}

/// Read-only snapshot for rendering, debug overlays and the coordinator.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentView<'a> {
    pub id:           AgentId,
    pub state:        AgentState,
    pub state_name:   &'static str,
    pub detection:    DetectionLevel,
    pub steering:     SteeringOutput,
    pub animation:    AnimationHint,
    /// Alertness gauge in `[0, 1]`.
    pub gauge:        f32,
    pub position:     Vec2,
    pub path:         &'a [Vec2],
    pub in_battle:    bool,
    pub is_attacking: bool,
    pub attack_ready: bool,
}

pub struct AgentController {
    pub(crate) id:               AgentId,
    pub(crate) body:             Body,
    pub(crate) config:           BrainConfig,
    pub(crate) state:            AgentState,
    pub(crate) previous:         AgentState,
    pub(crate) perception:       Perception,
    pub(crate) detection:        DetectionLevel,
    pub(crate) attack:           Box<dyn AttackController>,
    pub(crate) patrol:           PatrolRoute,
    pub(crate) follow:           PathFollow,
    /// Out-of-combat steering toward the next path waypoint.
    pub(crate) travel:           ContextSteering,
    /// Close-range combat steering.
    pub(crate) battle:           ContextSteering,
    /// Registered with the coordinator.
    pub(crate) in_battle:        bool,
    pub(crate) replan:           Cooldown,
    pub(crate) replan_requested: bool,
    pub(crate) sweep:            Sweep,
    pub(crate) gauge:            f32,
    pub(crate) last_known:       Vec2,
    pub(crate) output:           SteeringOutput,
    pub(crate) animation:        AnimationHint,
}

impl AgentController {
    /// Build a controller in `INIT`.  Fails on invalid configuration.
    pub fn new(
        id:      AgentId,
        mut body: Body,
        patrol:  Vec<Vec2>,
        config:  BrainConfig,
        attack:  Box<dyn AttackController>,
    ) -> BrainResult<Self> {
        config.validate()?;
        body.max_turn_rate = config.turn_rate_deg.to_radians();

        let s = &config.steering;
        let travel = ContextSteering::new(
            s.resolution,
            ContextBehavior::combiner(vec![
                ContextBehavior::seek(),
                ContextBehavior::separation(s.separation_radius, s.separation_spread),
            ]),
        )?;
        let battle = ContextSteering::new(
            s.battle_resolution,
            ContextBehavior::combiner(vec![
                ContextBehavior::approach().disabled(),
                ContextBehavior::strafe(s.strafe_handedness),
                ContextBehavior::evade(s.evade_radius),
                ContextBehavior::avoid(s.avoid_ray_length, s.avoid_spread),
                ContextBehavior::separation(s.separation_radius, s.separation_spread),
            ]),
        )?;

        Ok(Self {
            id,
            last_known:       body.position,
            body,
            perception:       Perception::new(config.perception.clone()),
            follow:           PathFollow::new(config.arrival_radius),
            replan:           Cooldown::new(config.replan_interval_secs),
            state:            AgentState::Init,
            previous:         AgentState::Init,
            detection:        DetectionLevel::None,
            attack,
            patrol:           PatrolRoute::new(patrol),
            travel,
            battle,
            in_battle:        false,
            replan_requested: false,
            sweep:            Sweep::default(),
            gauge:            0.0,
            output:           SteeringOutput::ZERO,
            animation:        AnimationHint::Idle,
            config,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn state(&self) -> AgentState {
        self.state
    }

    /// State active before the most recent transition.
    #[inline]
    pub fn previous_state(&self) -> AgentState {
        self.previous
    }

    #[inline]
    pub fn detection(&self) -> DetectionLevel {
        self.detection
    }

    #[inline]
    pub fn body(&self) -> &Body {
        &self.body
    }

    #[inline]
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn config(&self) -> &BrainConfig {
        &self.config
    }

    pub fn is_attacking(&self) -> bool {
        self.attack.is_attacking()
    }

    pub fn can_start_new_attack(&self) -> bool {
        self.attack.can_start_new_attack()
    }

    pub fn in_battle(&self) -> bool {
        self.in_battle
    }

    pub fn gauge(&self) -> f32 {
        self.gauge
    }

    /// Combat steering tree, for inspection.
    pub fn battle_steering(&self) -> &ContextSteering {
        &self.battle
    }

    pub fn view(&self) -> AgentView<'_> {
        AgentView {
            id:           self.id,
            state:        self.state,
            state_name:   self.state.name(),
            detection:    self.detection,
            steering:     self.output,
            animation:    self.animation,
            gauge:        self.gauge,
            position:     self.body.position,
            path:         self.follow.waypoints(),
            in_battle:    self.in_battle,
            is_attacking: self.attack.is_attacking(),
            attack_ready: self.attack.can_start_new_attack(),
        }
    }

    // ── Integration points ────────────────────────────────────────────────

    /// Replan the current path on the next tick.
    pub fn update_path(&mut self) {
        self.replan_requested = true;
    }

    /// Patrol waypoint the agent is currently heading for.
    pub fn patrol_target(&self) -> Option<Vec2> {
        self.patrol.current()
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Run one tick.  Steering output is applied to the body as a force; the
    /// caller integrates.
    pub fn tick(&mut self, ctx: &mut TickContext<'_>) {
        let observer = Observer {
            entity:     self.body.entity,
            position:   self.body.position,
            facing:     self.body.orientation,
            heightened: self.state.is_heightened(),
        };
        self.detection = self.perception.detect(ctx.now, &observer, ctx.target, ctx.world);
        if self.detection.is_aware() {
            if let Some(p) = self.perception.last_known() {
                self.last_known = p;
            }
        }
        self.attack.update(ctx.dt);
        self.output = SteeringOutput::ZERO;

        self.refresh_animation();

        if let Some(next) = (handlers(self.state).update)(self, ctx) {
            self.change_state(next, ctx);
        }

        if !self.output.is_zero() {
            self.body.apply_force(self.output.linear);
        }
    }

    /// Apply a coordinator directive addressed to this agent.
    pub fn apply_directive(&mut self, directive: &Directive, ctx: &mut TickContext<'_>) {
        debug_assert_eq!(directive.agent(), self.id);
        match *directive {
            Directive::Attack(_) => self.set_stance(true),
            Directive::Strafe(_) => self.set_stance(false),
            Directive::FlipStrafe(_) => self.battle.root_mut().flip_handedness(),
            Directive::ForceAlert { target_position, .. } => {
                if matches!(self.state, AgentState::Alert | AgentState::Attack) {
                    return;
                }
                self.perception.raise(DetectionLevel::Alert, target_position);
                self.detection = self.detection.max(DetectionLevel::Alert);
                self.last_known = target_position;
                self.change_state(AgentState::Alert, ctx);
            }
        }
    }

    /// Close in (approach) or hold distance (strafe + evade).
    fn set_stance(&mut self, attack: bool) {
        let root = self.battle.root_mut();
        root.set_enabled(BehaviorTag::Approach, attack);
        root.set_enabled(BehaviorTag::Strafe, !attack);
        root.set_enabled(BehaviorTag::Evade, !attack);
    }

    /// Unconditionally replace the current state: run the old state's exit,
    /// record the transition, run the new state's entry.
    pub(crate) fn change_state(&mut self, to: AgentState, ctx: &mut TickContext<'_>) {
        let from = self.state;
        (handlers(from).exit)(self, ctx, to);
        self.previous = from;
        self.state = to;
        ctx.transitions.push(Transition { agent: self.id, from, to });
        tracing::debug!(agent = %self.id, %from, %to, "state transition");
        (handlers(to).enter)(self, ctx);
    }

    // ── Shared helpers for the state handlers ─────────────────────────────

    /// Any-state overlay.
    fn refresh_animation(&mut self) {
        let speed = self.body.speed();
        self.animation = match self.state {
            AgentState::Attack => AnimationHint::Attack,
            _ if speed > 0.5 * self.body.max_speed => AnimationHint::Run,
            _ if speed > 0.05 => AnimationHint::Walk,
            AgentState::LookAround | AgentState::Noticed => AnimationHint::Turn,
            _ => AnimationHint::Idle,
        };
    }

    pub(crate) fn limits(&self) -> Limits {
        Limits { max_speed: self.body.max_speed, max_acceleration: self.body.max_acceleration }
    }

    /// Plan to `dest` and load the result into the follower.  A failed
    /// search leaves an empty path: hold position.
    pub(crate) fn plan_to(&mut self, dest: Vec2, ctx: &TickContext<'_>) -> bool {
        self.replan_requested = false;
        match ctx.planner.plan(ctx.grid, self.body.position, dest) {
            Ok(path) => {
                self.follow.set_path(&path.waypoints);
                true
            }
            Err(e) => {
                tracing::debug!(agent = %self.id, error = %e, "path failed; holding position");
                self.follow.clear();
                false
            }
        }
    }

    /// Seek the next waypoint through the out-of-combat steering tree.
    pub(crate) fn travel(&mut self, ctx: &TickContext<'_>) {
        let Some(waypoint) = self.follow.advance(self.body.position) else {
            self.output = SteeringOutput::ZERO;
            return;
        };
        let input = SteeringInput {
            entity:       self.body.entity,
            position:     self.body.position,
            facing:       self.body.orientation,
            target:       waypoint,
            attack_ready: false,
            neighbors:    ctx.neighbors,
            limits:       self.limits(),
            world:        ctx.world,
        };
        self.output = self.travel.steer(&input);
        self.face_motion(ctx.dt);
    }

    /// Close-range combat steering around the target.
    pub(crate) fn fight(&mut self, ctx: &TickContext<'_>) {
        let input = SteeringInput {
            entity:       self.body.entity,
            position:     self.body.position,
            facing:       self.body.orientation,
            target:       ctx.target.position,
            attack_ready: self.attack.can_start_new_attack(),
            neighbors:    ctx.neighbors,
            limits:       self.limits(),
            world:        ctx.world,
        };
        self.output = self.battle.steer(&input);
        self.body.face_point(ctx.target.position, ctx.dt);
    }

    /// Turn toward the direction of travel.
    pub(crate) fn face_motion(&mut self, dt: f32) {
        let v = if self.output.linear != Vec2::ZERO { self.output.linear } else { self.body.linear_velocity };
        if v.length_squared() > 1e-6 {
            self.body.turn_towards(vec_to_heading(v), dt);
        }
    }

    /// Stop and drop any steering for this tick.
    pub(crate) fn freeze(&mut self) {
        self.body.halt();
        self.output = SteeringOutput::ZERO;
    }

    pub(crate) fn publish(&self, event: SquadEvent, ctx: &mut TickContext<'_>) {
        ctx.events.push(event);
    }
}
