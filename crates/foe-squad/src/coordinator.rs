//! `TacticalCoordinator` — the squad's message handler and directive source.
//!
//! Agents publish [`SquadEvent`]s during their ticks; the coordinator drains
//! them once per cycle, after every agent has ticked.  FOUND reports are
//! answered in the same cycle; ATTACK/STRAFE directives go out only on
//! broadcast ticks.

use std::mem;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use foe_brain::{AgentState, Directive, SquadEvent};
use foe_core::{AgentId, EntityId, PhysicsWorld, RayFilter, SimRng, TargetState, Tick, Vec2};

use crate::{Roster, SquadConfig, SquadResult};

/// What the coordinator needs to know about one agent this cycle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MemberSnapshot {
    pub id:           AgentId,
    pub entity:       EntityId,
    pub position:     Vec2,
    pub state:        AgentState,
    pub attacking:    bool,
    pub attack_ready: bool,
}

/// Read-only world view for one coordination cycle.
pub struct SquadContext<'a> {
    /// Every active agent, in any order.
    pub members: &'a [MemberSnapshot],
    pub target:  &'a TargetState,
    pub world:   &'a dyn PhysicsWorld,
}

impl SquadContext<'_> {
    fn member(&self, id: AgentId) -> Option<&MemberSnapshot> {
        self.members.iter().find(|m| m.id == id)
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct MemberEntry {
    point: [f32; 2],
    id:    AgentId,
}

impl RTreeObject for MemberEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for MemberEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── TacticalCoordinator ───────────────────────────────────────────────────────

pub struct TacticalCoordinator {
    config: SquadConfig,
    roster: Roster,
    inbox:  Vec<SquadEvent>,
}

impl TacticalCoordinator {
    pub fn new(config: SquadConfig) -> SquadResult<Self> {
        config.validate()?;
        Ok(Self { config, roster: Roster::new(), inbox: Vec::new() })
    }

    pub fn config(&self) -> &SquadConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Events queued for the next cycle.
    pub fn pending(&self) -> usize {
        self.inbox.len()
    }

    pub fn publish(&mut self, event: SquadEvent) {
        self.inbox.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = SquadEvent>) {
        self.inbox.extend(events);
    }

    /// Drain queued events in publication order, then broadcast if `tick`
    /// is on the cadence.  Returns every directive produced, in order.
    pub fn run_cycle(
        &mut self,
        tick: Tick,
        ctx:  &SquadContext<'_>,
        rng:  &mut SimRng,
    ) -> Vec<Directive> {
        let mut out = Vec::new();
        let mut index: Option<RTree<MemberEntry>> = None;

        for event in mem::take(&mut self.inbox) {
            match event {
                SquadEvent::Add(agent) => {
                    if self.roster.add(agent) {
                        tracing::debug!(%agent, roster = self.roster.len(), "joined battle");
                    }
                }
                SquadEvent::Remove(agent) => {
                    if self.roster.remove(agent) {
                        tracing::debug!(%agent, roster = self.roster.len(), "left battle");
                    }
                }
                SquadEvent::Found { reporter } => {
                    let tree = index.get_or_insert_with(|| build_index(ctx.members));
                    self.alert_nearby(reporter, tree, ctx, &mut out);
                }
            }
        }

        if tick.is_cadence(self.config.broadcast_interval_ticks) {
            self.broadcast(ctx, rng, &mut out);
        }
        out
    }

    /// Force every ally in range and sight of `reporter` that is not mid-attack
    /// into ALERT.  Agents already in ALERT or ATTACK ignore the directive.
    fn alert_nearby(
        &self,
        reporter: AgentId,
        tree:     &RTree<MemberEntry>,
        ctx:      &SquadContext<'_>,
        out:      &mut Vec<Directive>,
    ) {
        let Some(from) = ctx.member(reporter) else {
            tracing::warn!(%reporter, "FOUND from unknown agent ignored");
            return;
        };
        let radius = self.config.found_radius;
        let mut nearby: Vec<AgentId> = tree
            .locate_within_distance([from.position.x, from.position.y], radius * radius)
            .map(|e| e.id)
            .filter(|&id| id != reporter)
            .collect();
        nearby.sort_unstable();

        let sight = RayFilter::sight(from.entity);
        for id in nearby {
            let Some(ally) = ctx.member(id) else { continue };
            if ally.attacking {
                continue;
            }
            if !ctx.world.is_clear(from.position, ally.position, &sight) {
                continue;
            }
            tracing::debug!(%reporter, ally = %id, "alerting ally");
            out.push(Directive::ForceAlert { agent: id, target_position: ctx.target.position });
        }
    }

    /// One directive round over the roster, in join order.
    fn broadcast(&self, ctx: &SquadContext<'_>, rng: &mut SimRng, out: &mut Vec<Directive>) {
        let before = out.len();
        for id in self.roster.iter() {
            let Some(m) = ctx.member(id) else { continue };
            if m.state != AgentState::Alert {
                continue;
            }
            if rng.chance(self.config.strafe_flip_chance) {
                out.push(Directive::FlipStrafe(id));
            }
            let behind = ctx.target.is_behind(m.position, self.config.behind_dot);
            let directive = if m.attack_ready
                && (behind || rng.chance(self.config.frontal_attack_chance))
            {
                Directive::Attack(id)
            } else {
                Directive::Strafe(id)
            };
            out.push(directive);
        }
        tracing::trace!(roster = self.roster.len(), directives = out.len() - before, "broadcast");
    }
}

fn build_index(members: &[MemberSnapshot]) -> RTree<MemberEntry> {
    RTree::bulk_load(
        members
            .iter()
            .map(|m| MemberEntry { point: [m.position.x, m.position.y], id: m.id })
            .collect(),
    )
}
