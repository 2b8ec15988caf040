//! In-memory world made of static boxes and dynamic circles.
//!
//! Good enough to drive the whole AI stack without a physics engine: walls
//! and windows are axis-aligned boxes, agents and the target are circles the
//! sim moves through [`PhysicsWorld::sync_body`].  Shapes that contain the ray
//! origin are skipped, so an agent standing inside geometry can still see out.

use glam::Vec2;

use crate::world::{Aabb, BodyKind, PhysicsWorld, RayFilter, RayHit};
use crate::EntityId;

#[derive(Clone, Debug)]
struct BoxShape {
    entity: EntityId,
    aabb:   Aabb,
    kind:   BodyKind,
}

#[derive(Clone, Debug)]
struct CircleShape {
    entity: EntityId,
    center: Vec2,
    radius: f32,
    kind:   BodyKind,
}

/// Static boxes plus dynamic circles.
#[derive(Clone, Debug, Default)]
pub struct Arena {
    boxes:   Vec<BoxShape>,
    circles: Vec<CircleShape>,
    next_entity: u32,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        id
    }

    /// Add an opaque wall spanning the two corners.
    pub fn add_wall(&mut self, a: Vec2, b: Vec2) -> EntityId {
        self.add_box(Aabb::new(a, b), BodyKind::Solid)
    }

    /// Add see-through geometry (blocks movement, not sight).
    pub fn add_window(&mut self, a: Vec2, b: Vec2) -> EntityId {
        self.add_box(Aabb::new(a, b), BodyKind::SeeThrough)
    }

    fn add_box(&mut self, aabb: Aabb, kind: BodyKind) -> EntityId {
        let entity = self.allocate();
        self.boxes.push(BoxShape { entity, aabb, kind });
        entity
    }

    /// Add a dynamic circular body (agent or target).
    pub fn add_body(&mut self, center: Vec2, radius: f32, kind: BodyKind) -> EntityId {
        let entity = self.allocate();
        self.circles.push(CircleShape { entity, center, radius, kind });
        entity
    }

    /// Current center of a dynamic body.
    pub fn body_position(&self, entity: EntityId) -> Option<Vec2> {
        self.circles.iter().find(|c| c.entity == entity).map(|c| c.center)
    }
}

impl PhysicsWorld for Arena {
    fn raycast(&self, origin: Vec2, target: Vec2, filter: &RayFilter) -> Option<RayHit> {
        let delta = target - origin;
        let mut best: Option<RayHit> = None;

        let mut consider = |t: f32, normal: Vec2, entity: EntityId, kind: BodyKind| {
            if best.is_none_or(|b| t < b.fraction) {
                best = Some(RayHit { point: origin + delta * t, normal, fraction: t, entity, kind });
            }
        };

        for b in &self.boxes {
            if !filter.accepts(b.kind, b.entity) {
                continue;
            }
            if let Some((t, n)) = segment_vs_aabb(origin, delta, &b.aabb) {
                consider(t, n, b.entity, b.kind);
            }
        }
        for c in &self.circles {
            if !filter.accepts(c.kind, c.entity) {
                continue;
            }
            if let Some(t) = segment_vs_circle(origin, delta, c.center, c.radius) {
                let normal = (origin + delta * t - c.center).normalize_or_zero();
                consider(t, normal, c.entity, c.kind);
            }
        }
        best
    }

    fn query_region(&self, min: Vec2, max: Vec2) -> bool {
        let region = Aabb::new(min, max);
        self.boxes.iter().any(|b| b.aabb.overlaps(&region))
    }

    fn sync_body(&mut self, entity: EntityId, position: Vec2) {
        if let Some(c) = self.circles.iter_mut().find(|c| c.entity == entity) {
            c.center = position;
        }
    }
}

// ── Intersection tests ────────────────────────────────────────────────────────

/// Slab test.  Returns entry fraction and surface normal; `None` on a miss or
/// when `origin` is inside the box.
fn segment_vs_aabb(origin: Vec2, delta: Vec2, aabb: &Aabb) -> Option<(f32, Vec2)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec2::ZERO;

    for axis in 0..2 {
        let (o, d, lo, hi) = (origin[axis], delta[axis], aabb.min[axis], aabb.max[axis]);
        if d.abs() < 1e-9 {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let (mut t1, mut t2) = ((lo - o) / d, (hi - o) / d);
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        if t1 > t_enter {
            t_enter = t1;
            normal = Vec2::ZERO;
            normal[axis] = -d.signum();
        }
        t_exit = t_exit.min(t2);
        if t_enter > t_exit {
            return None;
        }
    }

    if t_enter < 0.0 || t_enter > 1.0 {
        return None;
    }
    Some((t_enter, normal))
}

/// Entry fraction of the segment into a circle; `None` on a miss or when
/// `origin` is inside the circle.
fn segment_vs_circle(origin: Vec2, delta: Vec2, center: Vec2, radius: f32) -> Option<f32> {
    let f = origin - center;
    let c = f.length_squared() - radius * radius;
    if c <= 0.0 {
        return None;
    }
    let a = delta.length_squared();
    if a < 1e-12 {
        return None;
    }
    let b = 2.0 * f.dot(delta);
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let t = (-b - disc.sqrt()) / (2.0 * a);
    (0.0..=1.0).contains(&t).then_some(t)
}
