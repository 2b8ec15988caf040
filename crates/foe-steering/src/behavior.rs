//! Context behaviors — the units that fill a [`ContextMap`].
//!
//! A behavior is a tagged variant rather than a trait object: the set of
//! fill routines is closed, a [`Combiner`] is just another variant, and the
//! whole tree can be cloned, toggled and inspected without dynamic dispatch.
//!
//! Every fill routine clears the map before writing, so the result of one
//! behavior never depends on what a sibling left behind.  That is what makes
//! the combiner's max-merge independent of registration order.

use foe_core::{EntityId, Handedness, PhysicsWorld, RayFilter, Vec2};

use crate::combiner::Combiner;
use crate::map::ContextMap;

// ── Inputs ────────────────────────────────────────────────────────────────────

/// Speed and acceleration caps applied to a behavior's output.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limits {
    pub max_speed:        f32,
    pub max_acceleration: f32,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_speed: 3.0, max_acceleration: 12.0 }
    }
}

/// Read-only agent state a behavior samples.  Built fresh every tick by the
/// owning controller; borrows everything, allocates nothing.
#[derive(Copy, Clone)]
pub struct SteeringInput<'a> {
    /// The agent's own physics handle, skipped by feelers.
    pub entity:       EntityId,
    pub position:     Vec2,
    /// Facing heading in radians.
    pub facing:       f32,
    /// Point the behaviors orient around (usually the target).
    pub target:       Vec2,
    /// Result of the attack subsystem's `can_start_new_attack`.
    pub attack_ready: bool,
    /// Positions of nearby agents.
    pub neighbors:    &'a [Vec2],
    /// The agent's own limits; used when a behavior has no limiter.
    pub limits:       Limits,
    pub world:        &'a dyn PhysicsWorld,
}

impl SteeringInput<'_> {
    /// Unit vector toward `target`, or zero when standing on it.
    #[inline]
    pub fn toward_target(&self) -> Vec2 {
        (self.target - self.position).normalize_or_zero()
    }

    #[inline]
    pub fn distance_to_target(&self) -> f32 {
        self.position.distance(self.target)
    }
}

// ── Behavior variants ─────────────────────────────────────────────────────────

/// Discriminant used to toggle behaviors by kind.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BehaviorTag {
    Seek,
    Approach,
    Strafe,
    Avoid,
    Separation,
    Evade,
    Combiner,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BehaviorKind {
    /// Interest toward the target, ungated.
    Seek,
    /// Interest toward the target while an attack can start.
    Approach,
    /// Interest along the target direction rotated ±90°.
    Strafe { handedness: Handedness },
    /// Danger on slots whose feeler hits anything but the target, widened by
    /// `spread` slots on each side.
    Avoid { ray_length: f32, spread: usize },
    /// Danger on slots pointing at agents closer than `radius`.
    Separation { radius: f32, spread: usize },
    /// Interest away from the target while no attack can start, weighted by
    /// `min(1, radius / distance)`.
    Evade { radius: f32 },
    Combiner(Combiner),
}

impl BehaviorKind {
    pub fn tag(&self) -> BehaviorTag {
        match self {
            BehaviorKind::Seek              => BehaviorTag::Seek,
            BehaviorKind::Approach          => BehaviorTag::Approach,
            BehaviorKind::Strafe { .. }     => BehaviorTag::Strafe,
            BehaviorKind::Avoid { .. }      => BehaviorTag::Avoid,
            BehaviorKind::Separation { .. } => BehaviorTag::Separation,
            BehaviorKind::Evade { .. }      => BehaviorTag::Evade,
            BehaviorKind::Combiner(_)       => BehaviorTag::Combiner,
        }
    }
}

/// One node of an agent's behavior tree.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextBehavior {
    pub kind:    BehaviorKind,
    pub enabled: bool,
    /// Overrides the agent's own limits when set.  See
    /// [`ContextBehavior::effective_limits`].
    pub limits:  Option<Limits>,
}

impl ContextBehavior {
    pub fn new(kind: BehaviorKind) -> Self {
        Self { kind, enabled: true, limits: None }
    }

    pub fn seek() -> Self {
        Self::new(BehaviorKind::Seek)
    }

    pub fn approach() -> Self {
        Self::new(BehaviorKind::Approach)
    }

    pub fn strafe(handedness: Handedness) -> Self {
        Self::new(BehaviorKind::Strafe { handedness })
    }

    pub fn avoid(ray_length: f32, spread: usize) -> Self {
        Self::new(BehaviorKind::Avoid { ray_length, spread })
    }

    pub fn separation(radius: f32, spread: usize) -> Self {
        Self::new(BehaviorKind::Separation { radius, spread })
    }

    pub fn evade(radius: f32) -> Self {
        Self::new(BehaviorKind::Evade { radius })
    }

    pub fn combiner(children: Vec<ContextBehavior>) -> Self {
        Self::new(BehaviorKind::Combiner(Combiner::new(children)))
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    #[inline]
    pub fn tag(&self) -> BehaviorTag {
        self.kind.tag()
    }

    /// Fill `map` for this tick.  A disabled behavior zeroes the map.
    pub fn calculate_maps(&mut self, map: &mut ContextMap, input: &SteeringInput<'_>) {
        if !self.enabled {
            map.clear();
            return;
        }
        self.fill(map, input);
    }

    fn fill(&mut self, map: &mut ContextMap, input: &SteeringInput<'_>) {
        match &mut self.kind {
            BehaviorKind::Combiner(combiner) => combiner.fill(map, input),
            BehaviorKind::Seek => {
                map.clear();
                map.interest_along(input.toward_target(), 1.0);
            }
            BehaviorKind::Approach => {
                map.clear();
                if input.attack_ready {
                    map.interest_along(input.toward_target(), 1.0);
                }
            }
            BehaviorKind::Strafe { handedness } => {
                map.clear();
                let perp = handedness.perpendicular(input.toward_target());
                map.interest_along(perp, 1.0);
            }
            BehaviorKind::Avoid { ray_length, spread } => {
                map.clear();
                let filter = RayFilter::movement(input.entity).past_target();
                for slot in 0..map.resolution() {
                    let end = input.position + map.direction(slot) * *ray_length;
                    if input.world.raycast(input.position, end, &filter).is_some() {
                        map.raise_danger(slot, *spread, 1.0);
                    }
                }
            }
            BehaviorKind::Separation { radius, spread } => {
                map.clear();
                for &other in input.neighbors {
                    let offset = other - input.position;
                    let dist = offset.length();
                    if dist <= 1e-4 || dist >= *radius {
                        continue;
                    }
                    let slot = map.slot_of(offset);
                    map.raise_danger(slot, *spread, 1.0 - dist / *radius);
                }
            }
            BehaviorKind::Evade { radius } => {
                map.clear();
                if input.attack_ready {
                    return;
                }
                let dist = input.distance_to_target();
                let weight = if dist <= 1e-4 { 1.0 } else { (*radius / dist).min(1.0) };
                map.interest_along(-input.toward_target(), weight);
            }
        }
    }

    /// Limiter governing this subtree's output.  A node's own limiter wins;
    /// otherwise a combiner takes the tightest limiter among its enabled
    /// children, component-wise.  `None` means the agent's own limits apply.
    pub fn effective_limits(&self) -> Option<Limits> {
        if self.limits.is_some() {
            return self.limits;
        }
        let BehaviorKind::Combiner(c) = &self.kind else { return None };
        c.children()
            .iter()
            .filter(|b| b.enabled)
            .filter_map(ContextBehavior::effective_limits)
            .reduce(|a, b| Limits {
                max_speed:        a.max_speed.min(b.max_speed),
                max_acceleration: a.max_acceleration.min(b.max_acceleration),
            })
    }

    // ── Toggles ───────────────────────────────────────────────────────────────

    /// Enable or disable every behavior of kind `tag` in this subtree.
    /// Returns how many nodes matched.
    pub fn set_enabled(&mut self, tag: BehaviorTag, enabled: bool) -> usize {
        let mut hits = 0;
        if self.tag() == tag {
            self.enabled = enabled;
            hits += 1;
        }
        if let BehaviorKind::Combiner(c) = &mut self.kind {
            hits += c.children_mut().iter_mut().map(|b| b.set_enabled(tag, enabled)).sum::<usize>();
        }
        hits
    }

    /// `true` if any enabled node of kind `tag` exists in this subtree.
    pub fn is_enabled(&self, tag: BehaviorTag) -> bool {
        if !self.enabled {
            return false;
        }
        if self.tag() == tag {
            return true;
        }
        match &self.kind {
            BehaviorKind::Combiner(c) => c.children().iter().any(|b| b.is_enabled(tag)),
            _ => false,
        }
    }

    /// Reverse every strafe in this subtree.
    pub fn flip_handedness(&mut self) {
        match &mut self.kind {
            BehaviorKind::Strafe { handedness } => *handedness = handedness.flipped(),
            BehaviorKind::Combiner(c) => c.children_mut().iter_mut().for_each(Self::flip_handedness),
            _ => {}
        }
    }

    /// Handedness of the first strafe found depth-first.
    pub fn handedness(&self) -> Option<Handedness> {
        match &self.kind {
            BehaviorKind::Strafe { handedness } => Some(*handedness),
            BehaviorKind::Combiner(c) => c.children().iter().find_map(Self::handedness),
            _ => None,
        }
    }
}
