//! Rasterized obstacle grid and its builder.
//!
//! # Data layout
//!
//! Cells are numbered row-major: `NodeId = y * width + x`.  Outgoing edges
//! use **Compressed Sparse Row (CSR)** format.  Given a `NodeId n`, its edges
//! occupy
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Each node's slice is shuffled once at build time with a seeded RNG, so
//! agents sharing a grid do not all break ties toward the same neighbor.
//! Obstructed cells have no edges and no edge leads into them.  The grid is
//! immutable after `build`.

use std::f32::consts::SQRT_2;

use foe_core::{Aabb, EdgeId, NodeId, PhysicsWorld, SimRng, Vec2};

use crate::{NavError, NavResult};

/// Offsets of the 8-neighborhood, cardinals first.
pub(crate) const NEIGHBOR_OFFSETS: [(i32, i32); 8] =
    [(1, 0), (0, 1), (-1, 0), (0, -1), (1, 1), (-1, 1), (-1, -1), (1, -1)];

// ── GridConfig ────────────────────────────────────────────────────────────────

/// Extent and edge-cost parameters of a [`NavGrid`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// World position of the minimum corner of cell `(0, 0)`.
    pub origin:               Vec2,
    pub width:                u32,
    pub height:               u32,
    /// Edge length of one square cell in world units.
    pub cell_size:            f32,
    /// Cost of a cardinal step, in cell sizes.
    pub cardinal_cost:        f32,
    /// Cost of a diagonal step, in cell sizes.
    pub diagonal_cost:        f32,
    /// Seed of the per-node neighbor shuffle.
    pub shuffle_seed:         u64,
    /// Allow a diagonal step past an obstructed orthogonal neighbor.
    pub allow_corner_cutting: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            origin:               Vec2::ZERO,
            width:                32,
            height:               32,
            cell_size:            1.0,
            cardinal_cost:        1.0,
            diagonal_cost:        SQRT_2,
            shuffle_seed:         0,
            allow_corner_cutting: false,
        }
    }
}

impl GridConfig {
    /// Grid covering `[origin, origin + (width, height) * cell_size]`.
    pub fn new(origin: Vec2, width: u32, height: u32, cell_size: f32) -> Self {
        Self { origin, width, height, cell_size, ..Self::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = seed;
        self
    }

    pub fn validate(&self) -> NavResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(NavError::EmptyGrid);
        }
        if !(self.cell_size > 0.0) {
            return Err(NavError::Config(format!("cell_size must be positive, got {}", self.cell_size)));
        }
        if !(self.cardinal_cost > 0.0 && self.diagonal_cost > 0.0) {
            return Err(NavError::Config("edge costs must be positive".into()));
        }
        Ok(())
    }
}

// ── NavGrid ───────────────────────────────────────────────────────────────────

/// Immutable 8-connected grid graph.
pub struct NavGrid {
    config: GridConfig,
    /// Per-cell obstruction flag.  Indexed by `NodeId`.
    pub obstacle: Vec<bool>,
    /// CSR row pointer, length `node_count + 1`.
    pub node_out_start: Vec<u32>,
    /// Source node of each edge; used to walk predecessors back.
    pub edge_from: Vec<NodeId>,
    pub edge_to: Vec<NodeId>,
    /// Traversal cost in world units.
    pub edge_cost: Vec<f32>,
}

impl NavGrid {
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.config.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.config.height
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.config.cell_size
    }

    pub fn node_count(&self) -> usize {
        self.obstacle.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacle.iter().filter(|&&o| o).count()
    }

    // ── Cell addressing ───────────────────────────────────────────────────

    #[inline]
    pub fn node_at(&self, x: u32, y: u32) -> Option<NodeId> {
        (x < self.width() && y < self.height()).then(|| NodeId(y * self.width() + x))
    }

    #[inline]
    pub fn coords(&self, node: NodeId) -> (u32, u32) {
        (node.0 % self.width(), node.0 / self.width())
    }

    /// Node containing `point`, or `None` outside the grid.
    pub fn cell_of(&self, point: Vec2) -> Option<NodeId> {
        let local = (point - self.config.origin) / self.config.cell_size;
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        self.node_at(local.x as u32, local.y as u32)
    }

    /// Node containing `point`, clamping points outside the grid to the
    /// nearest border cell.
    pub fn clamped_cell_of(&self, point: Vec2) -> NodeId {
        let local = (point - self.config.origin) / self.config.cell_size;
        let x = (local.x.max(0.0) as u32).min(self.width() - 1);
        let y = (local.y.max(0.0) as u32).min(self.height() - 1);
        NodeId(y * self.width() + x)
    }

    /// World-space center of `node`.
    #[inline]
    pub fn centroid(&self, node: NodeId) -> Vec2 {
        let (x, y) = self.coords(node);
        self.config.origin + (Vec2::new(x as f32, y as f32) + 0.5) * self.config.cell_size
    }

    #[inline]
    pub fn is_obstacle(&self, node: NodeId) -> bool {
        self.obstacle[node.index()]
    }

    /// In-grid cells of the 8-neighborhood of `node`, obstructed or not.
    pub fn ring(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let (x, y) = self.coords(node);
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            self.node_at(nx, ny)
        })
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Outgoing edges of `node`, in the shuffled build order.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Traversable neighbors of `node` in edge order.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_edges(node).map(|e| self.edge_to[e.index()])
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }
}

// ── NavGridBuilder ────────────────────────────────────────────────────────────

/// Marks obstructed cells, then builds the CSR graph.
///
/// ```
/// use foe_core::{Arena, Vec2};
/// use foe_nav::{GridConfig, NavGridBuilder};
///
/// let mut arena = Arena::new();
/// arena.add_wall(Vec2::new(2.0, 0.0), Vec2::new(3.0, 5.0));
/// let grid = NavGridBuilder::new(GridConfig::new(Vec2::ZERO, 5, 5, 1.0))
///     .rasterize(&arena)
///     .build()
///     .unwrap();
/// assert_eq!(grid.obstacle_count(), 5);
/// ```
pub struct NavGridBuilder {
    config:   GridConfig,
    obstacle: Vec<bool>,
}

impl NavGridBuilder {
    pub fn new(config: GridConfig) -> Self {
        let cells = config.width as usize * config.height as usize;
        Self { config, obstacle: vec![false; cells] }
    }

    /// Mark every cell that any static geometry overlaps.  One
    /// `query_region` per cell.
    pub fn rasterize(mut self, world: &dyn PhysicsWorld) -> Self {
        let cs = self.config.cell_size;
        for y in 0..self.config.height {
            for x in 0..self.config.width {
                let min = self.config.origin + Vec2::new(x as f32, y as f32) * cs;
                let cell = Aabb::new(min, min + Vec2::splat(cs));
                if world.query_region(cell.min, cell.max) {
                    let i = (y * self.config.width + x) as usize;
                    self.obstacle[i] = true;
                }
            }
        }
        self
    }

    /// Mark a single cell.  Out-of-range coordinates are ignored.
    pub fn mark_obstacle(mut self, x: u32, y: u32) -> Self {
        if x < self.config.width && y < self.config.height {
            let i = (y * self.config.width + x) as usize;
            self.obstacle[i] = true;
        }
        self
    }

    /// Consume the builder and produce a [`NavGrid`].
    pub fn build(self) -> NavResult<NavGrid> {
        self.config.validate()?;
        let (w, h) = (self.config.width, self.config.height);
        let node_count = self.obstacle.len();
        let cardinal = self.config.cardinal_cost * self.config.cell_size;
        let diagonal = self.config.diagonal_cost * self.config.cell_size;
        let blocked = |x: u32, y: u32| self.obstacle[(y * w + x) as usize];

        let mut rng = SimRng::new(self.config.shuffle_seed);
        let mut node_out_start = Vec::with_capacity(node_count + 1);
        let mut edge_from = Vec::with_capacity(node_count * 8);
        let mut edge_to = Vec::with_capacity(node_count * 8);
        let mut edge_cost = Vec::with_capacity(node_count * 8);
        let mut scratch: Vec<(NodeId, f32)> = Vec::with_capacity(8);

        for y in 0..h {
            for x in 0..w {
                node_out_start.push(edge_to.len() as u32);
                if blocked(x, y) {
                    continue;
                }
                scratch.clear();
                for &(dx, dy) in &NEIGHBOR_OFFSETS {
                    let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy))
                    else {
                        continue;
                    };
                    if nx >= w || ny >= h || blocked(nx, ny) {
                        continue;
                    }
                    let is_diagonal = dx != 0 && dy != 0;
                    if is_diagonal && !self.config.allow_corner_cutting && (blocked(nx, y) || blocked(x, ny)) {
                        continue;
                    }
                    let cost = if is_diagonal { diagonal } else { cardinal };
                    scratch.push((NodeId(ny * w + nx), cost));
                }
                rng.shuffle(&mut scratch);
                let from = NodeId(y * w + x);
                for &(to, cost) in &scratch {
                    edge_from.push(from);
                    edge_to.push(to);
                    edge_cost.push(cost);
                }
            }
        }
        node_out_start.push(edge_to.len() as u32);
        debug_assert_eq!(node_out_start.len(), node_count + 1);

        let grid = NavGrid {
            config: self.config,
            obstacle: self.obstacle,
            node_out_start,
            edge_from,
            edge_to,
            edge_cost,
        };
        tracing::info!(
            width = w,
            height = h,
            obstacles = grid.obstacle_count(),
            edges = grid.edge_count(),
            "nav grid built"
        );
        Ok(grid)
    }
}
