use serde::Serialize;

use crate::edge::EdgeId;

/// Record of one selection decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Move {
    exploratory: bool,
    candidates: Vec<EdgeId>,
    selected: EdgeId,
}

impl Move {
    /// `selected` must be one of `candidates`; the graph engine is the only producer.
    pub(crate) fn new(exploratory: bool, candidates: Vec<EdgeId>, selected: EdgeId) -> Self {
        debug_assert!(candidates.contains(&selected));
        Self {
            exploratory,
            candidates,
            selected,
        }
    }

    pub fn was_exploratory(&self) -> bool {
        self.exploratory
    }

    /// The full outgoing edge set of the queried vertex, in insertion order.
    pub fn candidates(&self) -> &[EdgeId] {
        &self.candidates
    }

    pub fn selected(&self) -> EdgeId {
        self.selected
    }
}
