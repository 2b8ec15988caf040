//! The state machine as a transition table.
//!
//! Each [`AgentState`] has an `enter`, `update` and `exit` handler.  `update`
//! returns the next state, if any; [`AgentController::change_state`] runs
//! `exit` of the old state and `enter` of the new one synchronously, within
//! the same tick.

use foe_core::{RayFilter, Vec2};
use foe_perception::DetectionLevel;

use crate::{AgentController, AgentState, SquadEvent, TickContext};

pub(crate) type EnterFn = fn(&mut AgentController, &mut TickContext<'_>);
pub(crate) type UpdateFn = fn(&mut AgentController, &mut TickContext<'_>) -> Option<AgentState>;
/// The third argument is the state being entered next.
pub(crate) type ExitFn = fn(&mut AgentController, &mut TickContext<'_>, AgentState);

pub(crate) struct StateHandlers {
    pub enter:  EnterFn,
    pub update: UpdateFn,
    pub exit:   ExitFn,
}

/// Indexed by [`AgentState::index`]; order must match the enum.
const TABLE: [StateHandlers; 7] = [
    StateHandlers { enter: no_enter,        update: init_update,      exit: no_exit },
    StateHandlers { enter: patrol_enter,    update: patrol_update,    exit: no_exit },
    StateHandlers { enter: look_enter,      update: look_update,      exit: no_exit },
    StateHandlers { enter: noticed_enter,   update: noticed_update,   exit: no_exit },
    StateHandlers { enter: indicator_enter, update: indicator_update, exit: no_exit },
    StateHandlers { enter: alert_enter,     update: alert_update,     exit: alert_exit },
    StateHandlers { enter: attack_enter,    update: attack_update,    exit: attack_exit },
];

#[inline]
pub(crate) fn handlers(state: AgentState) -> &'static StateHandlers {
    &TABLE[state.index()]
}

fn no_enter(_: &mut AgentController, _: &mut TickContext<'_>) {}

fn no_exit(_: &mut AgentController, _: &mut TickContext<'_>, _: AgentState) {}

// ── INIT ──────────────────────────────────────────────────────────────────────

fn init_update(_: &mut AgentController, _: &mut TickContext<'_>) -> Option<AgentState> {
    Some(AgentState::Patrol)
}

// ── PATROL ────────────────────────────────────────────────────────────────────

fn patrol_enter(a: &mut AgentController, ctx: &mut TickContext<'_>) {
    let Some(mut point) = a.patrol.current() else {
        a.follow.clear();
        return;
    };
    // Resuming on top of the current waypoint (after a look-around): move on.
    if a.body.position.distance(point) <= a.config.arrival_radius {
        if let Some(next) = a.patrol.advance() {
            point = next;
        }
    }
    a.plan_to(point, ctx);
}

fn patrol_update(a: &mut AgentController, ctx: &mut TickContext<'_>) -> Option<AgentState> {
    if a.detection.is_aware() {
        return Some(AgentState::Noticed);
    }
    if a.replan_requested {
        if let Some(point) = a.patrol.current() {
            a.plan_to(point, ctx);
        }
    }

    a.travel(ctx);
    if a.follow.arrived() && !a.patrol.is_empty() {
        if ctx.rng.chance(a.config.look_around_chance) {
            return Some(AgentState::LookAround);
        }
        if let Some(next) = a.patrol.advance() {
            a.plan_to(next, ctx);
        }
    }
    None
}

// ── LOOK_AROUND ───────────────────────────────────────────────────────────────

fn look_enter(a: &mut AgentController, _: &mut TickContext<'_>) {
    a.freeze();
    a.follow.clear();
    a.sweep.base = a.body.orientation;
    a.sweep.phase = 0;
    a.sweep.timer.reset(a.config.look_phase_secs);
}

/// Three timed phases: one extreme, the other extreme, back to the start.
fn look_update(a: &mut AgentController, ctx: &mut TickContext<'_>) -> Option<AgentState> {
    if a.detection.is_aware() {
        return Some(AgentState::Noticed);
    }
    a.freeze();

    let sweep = a.config.look_sweep_deg.to_radians();
    let heading = match a.sweep.phase {
        0 => a.sweep.base + sweep,
        1 => a.sweep.base - sweep,
        _ => a.sweep.base,
    };
    a.body.turn_towards(heading, ctx.dt);

    if a.sweep.timer.advance(ctx.dt) {
        a.sweep.phase += 1;
        if a.sweep.phase >= 3 {
            return Some(AgentState::Patrol);
        }
        a.sweep.timer.reset(a.config.look_phase_secs);
    }
    None
}

// ── NOTICED ───────────────────────────────────────────────────────────────────

fn noticed_enter(a: &mut AgentController, _: &mut TickContext<'_>) {
    a.freeze();
    a.follow.clear();
}

fn noticed_update(a: &mut AgentController, ctx: &mut TickContext<'_>) -> Option<AgentState> {
    a.freeze();
    let error = a.body.face_point(a.last_known, ctx.dt);
    (error <= a.config.facing_threshold_deg.to_radians()).then_some(AgentState::Indicator)
}

// ── INDICATOR ─────────────────────────────────────────────────────────────────

fn indicator_enter(a: &mut AgentController, ctx: &mut TickContext<'_>) {
    // Falling back from ALERT keeps full alertness; the gauge then drains.
    a.gauge = if a.previous == AgentState::Alert { 1.0 } else { a.config.gauge_initial };
    a.replan.trigger();
    a.plan_to(a.last_known, ctx);
}

fn indicator_update(a: &mut AgentController, ctx: &mut TickContext<'_>) -> Option<AgentState> {
    let aware = a.detection.is_aware();
    let delta = if aware { a.config.gauge_rise } else { -a.config.gauge_fall };
    a.gauge = (a.gauge + delta * ctx.dt).clamp(0.0, 1.0);

    if a.gauge >= 1.0 {
        if a.previous == AgentState::Noticed {
            a.publish(SquadEvent::Found { reporter: a.id }, ctx);
        }
        return Some(AgentState::Alert);
    }

    let due = a.replan.tick(ctx.dt);
    if (due && aware) || a.replan_requested {
        a.plan_to(a.last_known, ctx);
    }
    a.travel(ctx);

    (a.gauge <= 0.0 && a.follow.arrived()).then_some(AgentState::LookAround)
}

// ── ALERT ─────────────────────────────────────────────────────────────────────

fn alert_enter(a: &mut AgentController, ctx: &mut TickContext<'_>) {
    a.gauge = 1.0;
    a.replan.trigger();
    a.plan_to(a.last_known, ctx);
}

fn alert_update(a: &mut AgentController, ctx: &mut TickContext<'_>) -> Option<AgentState> {
    if a.detection == DetectionLevel::None {
        return Some(AgentState::Indicator);
    }

    let target = ctx.target.position;
    let distance = a.body.position.distance(target);
    if distance <= a.config.attack_range && a.attack.can_start_new_attack() {
        return Some(AgentState::Attack);
    }

    let due = a.replan.tick(ctx.dt);
    if distance <= a.config.strafe_distance && sees(a, target, ctx) {
        if !a.in_battle {
            a.in_battle = true;
            a.publish(SquadEvent::Add(a.id), ctx);
        }
        a.fight(ctx);
        return None;
    }

    if due || a.replan_requested {
        a.plan_to(target, ctx);
    }
    a.travel(ctx);
    None
}

fn alert_exit(a: &mut AgentController, ctx: &mut TickContext<'_>, next: AgentState) {
    if next != AgentState::Attack {
        leave_battle(a, ctx);
    }
}

// ── ATTACK ────────────────────────────────────────────────────────────────────

fn attack_enter(a: &mut AgentController, ctx: &mut TickContext<'_>) {
    a.attack.initiate_attack();
    a.freeze();
    a.body.face_point(ctx.target.position, ctx.dt);
}

fn attack_update(a: &mut AgentController, ctx: &mut TickContext<'_>) -> Option<AgentState> {
    a.freeze();
    a.body.face_point(ctx.target.position, ctx.dt);
    (!a.attack.is_attacking()).then_some(AgentState::Alert)
}

fn attack_exit(a: &mut AgentController, ctx: &mut TickContext<'_>, next: AgentState) {
    if next != AgentState::Alert {
        leave_battle(a, ctx);
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn leave_battle(a: &mut AgentController, ctx: &mut TickContext<'_>) {
    if a.in_battle {
        a.in_battle = false;
        a.publish(SquadEvent::Remove(a.id), ctx);
    }
}

/// Unobstructed sight line from the agent to `target`.
fn sees(a: &AgentController, target: Vec2, ctx: &TickContext<'_>) -> bool {
    let filter = RayFilter::sight(a.body.entity);
    if ctx.target.entity.is_valid() {
        ctx.world.reaches(a.body.position, target, ctx.target.entity, &filter)
    } else {
        ctx.world.is_clear(a.body.position, target, &filter)
    }
}
