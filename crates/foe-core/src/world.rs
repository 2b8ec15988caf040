//! The physics-world seam.
//!
//! The AI never resolves collisions itself.  It asks the world two kinds of
//! question: "what does a segment hit?" (sight lines, obstacle feelers) and
//! "is this region obstructed?" (grid rasterization at level load).  Engines
//! implement [`PhysicsWorld`]; [`crate::Arena`] is the in-memory version used
//! by tests and the demo.

use glam::Vec2;

use crate::EntityId;

// ── Aabb ──────────────────────────────────────────────────────────────────────

/// Axis-aligned box in world units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Build from any two opposite corners.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Strict overlap: boxes that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

// ── Ray queries ───────────────────────────────────────────────────────────────

/// Collision category of a world body.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BodyKind {
    /// Opaque static geometry: blocks movement and sight.
    Solid,
    /// Static geometry flagged see-through (glass, fences): blocks movement,
    /// not sight.
    SeeThrough,
    /// Another enemy agent.
    Agent,
    /// The target the agents hunt.
    Target,
}

/// Which bodies a raycast skips.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayFilter {
    /// Skip `BodyKind::Agent` bodies.
    pub ignore_agents: bool,
    /// Skip `BodyKind::SeeThrough` geometry.
    pub see_through: bool,
    /// Skip `BodyKind::Target` bodies.
    pub ignore_target: bool,
    /// Skip this specific body (normally the caster's own).
    pub ignore_entity: Option<EntityId>,
}

impl RayFilter {
    /// Sight line: other agents and see-through geometry do not occlude.
    pub fn sight(caster: EntityId) -> Self {
        Self { ignore_agents: true, see_through: true, ignore_target: false, ignore_entity: Some(caster) }
    }

    /// Movement feeler: anything static blocks, agents are handled by
    /// separation instead.
    pub fn movement(caster: EntityId) -> Self {
        Self { ignore_agents: true, see_through: false, ignore_target: false, ignore_entity: Some(caster) }
    }

    /// Let rays pass through the target, so whatever stands behind it is hit.
    pub fn past_target(mut self) -> Self {
        self.ignore_target = true;
        self
    }

    /// `true` if a body of `kind`/`entity` should be tested.
    #[inline]
    pub fn accepts(&self, kind: BodyKind, entity: EntityId) -> bool {
        if self.ignore_entity == Some(entity) {
            return false;
        }
        match kind {
            BodyKind::Agent      => !self.ignore_agents,
            BodyKind::SeeThrough => !self.see_through,
            BodyKind::Target     => !self.ignore_target,
            BodyKind::Solid      => true,
        }
    }
}

/// The closest body a segment hits.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    pub point: Vec2,
    pub normal: Vec2,
    /// Position of `point` along the segment, in `[0, 1]`.
    pub fraction: f32,
    pub entity: EntityId,
    pub kind: BodyKind,
}

/// Query primitives the AI core consumes from the physics world.
pub trait PhysicsWorld {
    /// First body hit by the segment `origin → target`, or `None` if the
    /// segment is clear under `filter`.
    fn raycast(&self, origin: Vec2, target: Vec2, filter: &RayFilter) -> Option<RayHit>;

    /// `true` if any static geometry overlaps the box `[min, max]`.
    fn query_region(&self, min: Vec2, max: Vec2) -> bool;

    /// Move a dynamic body.  Called by the sim after integrating agents; engines
    /// that own their bodies can leave the default no-op.
    fn sync_body(&mut self, _entity: EntityId, _position: Vec2) {}

    /// `true` if the segment reaches `entity` before anything else.
    fn reaches(&self, origin: Vec2, target: Vec2, entity: EntityId, filter: &RayFilter) -> bool {
        matches!(self.raycast(origin, target, filter), Some(hit) if hit.entity == entity)
    }

    /// `true` if nothing accepted by `filter` lies between the two points.
    fn is_clear(&self, origin: Vec2, target: Vec2, filter: &RayFilter) -> bool {
        self.raycast(origin, target, filter).is_none()
    }
}
