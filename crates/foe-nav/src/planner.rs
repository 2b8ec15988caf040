//! Path-planning trait and the default A* implementation.
//!
//! # Pluggability
//!
//! Agents request paths through the [`PathPlanner`] trait, so a game can swap
//! in hierarchical or flow-field planners without touching the brain.  The
//! default [`AStarPlanner`] searches the [`NavGrid`] directly.
//!
//! # Output
//!
//! A [`Path`] always starts at the exact source point and ends at the exact
//! target point.  Everything in between is the centroid of an intermediate
//! node on the search result; no further smoothing is applied.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::f32::consts::SQRT_2;

use foe_core::{EdgeId, NodeId, Vec2};

use crate::grid::NavGrid;
use crate::{NavError, NavResult};

// ── Path ──────────────────────────────────────────────────────────────────────

/// Result of a planning query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    /// World-space points to visit in order.
    pub waypoints: Vec<Vec2>,
    /// Grid nodes on the search result, source node first.
    pub nodes: Vec<NodeId>,
    /// Sum of edge costs along `nodes`.
    pub cost: f32,
}

impl Path {
    /// The "hold position" path.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Polyline length through `waypoints`.
    pub fn length(&self) -> f32 {
        self.waypoints.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

// ── PathPlanner trait ─────────────────────────────────────────────────────────

/// Pluggable path planner.
///
/// Implementations must treat the grid as read-only; one planner and one
/// grid are shared by every agent.
pub trait PathPlanner {
    /// Plan from `from` to `to` (world points).
    ///
    /// Returns [`NavError::NoPath`] when the target is unreachable; callers
    /// hold position rather than treating it as fatal.
    fn plan(&self, grid: &NavGrid, from: Vec2, to: Vec2) -> NavResult<Path>;
}

// ── AStarPlanner ──────────────────────────────────────────────────────────────

/// A* with a Euclidean heuristic.
///
/// The heuristic is scaled by `min(cardinal_cost, diagonal_cost / √2)` so it
/// never overestimates, whatever costs the grid was built with.  Ties on f
/// are broken by insertion order.
#[derive(Copy, Clone, Debug, Default)]
pub struct AStarPlanner;

impl PathPlanner for AStarPlanner {
    fn plan(&self, grid: &NavGrid, from: Vec2, to: Vec2) -> NavResult<Path> {
        let no_path = || NavError::NoPath { from, to };

        let start = endpoint_node(grid, from, to).ok_or_else(no_path)?;
        let goal = endpoint_node(grid, to, from).ok_or_else(no_path)?;

        match astar(grid, start, goal) {
            Some((nodes, cost)) => Ok(assemble(grid, from, to, nodes, cost)),
            None => {
                tracing::debug!(%from, %to, "no path");
                Err(no_path())
            }
        }
    }
}

// ── Endpoint correction ───────────────────────────────────────────────────────

/// Grid node to search from for `point`.
///
/// An obstructed cell is replaced by its nearest free neighbor that lies on
/// the side facing `other` (positive dot product); if no neighbor faces
/// `other`, the nearest free neighbor is used.  `None` when the cell is
/// walled in.
fn endpoint_node(grid: &NavGrid, point: Vec2, other: Vec2) -> Option<NodeId> {
    let node = grid.clamped_cell_of(point);
    if !grid.is_obstacle(node) {
        return Some(node);
    }

    let toward = other - point;
    let center = grid.centroid(node);
    let mut facing: Option<(NodeId, f32)> = None;
    let mut nearest: Option<(NodeId, f32)> = None;

    for n in grid.ring(node).filter(|&n| !grid.is_obstacle(n)) {
        let c = grid.centroid(n);
        let d = c.distance_squared(point);
        if nearest.is_none_or(|(_, best)| d < best) {
            nearest = Some((n, d));
        }
        if (c - center).dot(toward) > 0.0 && facing.is_none_or(|(_, best)| d < best) {
            facing = Some((n, d));
        }
    }
    facing.or(nearest).map(|(n, _)| n)
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// Open-list entry.  Ordered by f, then by push order.
#[derive(Copy, Clone, Debug)]
struct Open {
    f:    f32,
    seq:  u64,
    node: NodeId,
}

impl PartialEq for Open {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Open {}

impl PartialOrd for Open {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Open {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f.total_cmp(&other.f).then(self.seq.cmp(&other.seq))
    }
}

fn astar(grid: &NavGrid, start: NodeId, goal: NodeId) -> Option<(Vec<NodeId>, f32)> {
    if start == goal {
        return Some((vec![start], 0.0));
    }

    let cfg = grid.config();
    let h_scale = cfg.cardinal_cost.min(cfg.diagonal_cost / SQRT_2);
    let goal_pos = grid.centroid(goal);
    let h = |n: NodeId| grid.centroid(n).distance(goal_pos) * h_scale;

    let n = grid.node_count();
    let mut g = vec![f32::INFINITY; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];
    let mut closed = vec![false; n];

    // Reverse turns the max-heap into a min-heap.
    let mut heap: BinaryHeap<Reverse<Open>> = BinaryHeap::new();
    let mut seq = 0u64;
    g[start.index()] = 0.0;
    heap.push(Reverse(Open { f: h(start), seq, node: start }));

    while let Some(Reverse(Open { node, .. })) = heap.pop() {
        if node == goal {
            return Some((reconstruct(grid, &prev_edge, goal), g[goal.index()]));
        }
        // Skip stale entries.
        if closed[node.index()] {
            continue;
        }
        closed[node.index()] = true;

        let base = g[node.index()];
        for edge in grid.out_edges(node) {
            let next = grid.edge_to[edge.index()];
            if closed[next.index()] {
                continue;
            }
            let tentative = base + grid.edge_cost[edge.index()];
            if tentative < g[next.index()] {
                g[next.index()] = tentative;
                prev_edge[next.index()] = edge;
                seq += 1;
                heap.push(Reverse(Open { f: tentative + h(next), seq, node: next }));
            }
        }
    }
    None
}

fn reconstruct(grid: &NavGrid, prev_edge: &[EdgeId], goal: NodeId) -> Vec<NodeId> {
    let mut nodes = vec![goal];
    let mut cur = goal;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        cur = grid.edge_from[e.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    nodes
}

fn assemble(grid: &NavGrid, from: Vec2, to: Vec2, nodes: Vec<NodeId>, cost: f32) -> Path {
    let mut waypoints = Vec::with_capacity(nodes.len() + 1);
    waypoints.push(from);
    if nodes.len() > 2 {
        waypoints.extend(nodes[1..nodes.len() - 1].iter().map(|&n| grid.centroid(n)));
    }
    waypoints.push(to);
    Path { waypoints, nodes, cost }
}
