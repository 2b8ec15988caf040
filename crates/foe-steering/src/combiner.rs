//! `Combiner` — per-slot maximum over child behaviors.

use crate::behavior::{ContextBehavior, SteeringInput};
use crate::map::ContextMap;

/// Ordered children plus two scratch buffers reused across ticks.
///
/// Each child fills the shared map, then every slot of the scratch buffers is
/// raised to the child's value.  After the last child the scratch buffers are
/// copied back.  Max is commutative and associative, so registration order
/// never changes the result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Combiner {
    children: Vec<ContextBehavior>,
    danger:   Vec<f32>,
    interest: Vec<f32>,
}

impl Combiner {
    pub fn new(children: Vec<ContextBehavior>) -> Self {
        Self { children, danger: Vec::new(), interest: Vec::new() }
    }

    pub fn push(&mut self, child: ContextBehavior) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[ContextBehavior] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [ContextBehavior] {
        &mut self.children
    }

    pub(crate) fn fill(&mut self, map: &mut ContextMap, input: &SteeringInput<'_>) {
        let n = map.resolution();
        // Sized on first use, then only zeroed.
        if self.danger.len() != n {
            self.danger.resize(n, 0.0);
            self.interest.resize(n, 0.0);
        }
        self.danger.fill(0.0);
        self.interest.fill(0.0);

        for child in &mut self.children {
            child.calculate_maps(map, input);
            for i in 0..n {
                self.danger[i] = self.danger[i].max(map.danger()[i]);
                self.interest[i] = self.interest[i].max(map.interest()[i]);
            }
        }

        map.danger_mut().copy_from_slice(&self.danger);
        map.interest_mut().copy_from_slice(&self.interest);
    }
}
