use std::collections::BTreeMap;

use serde::Serialize;

use antsomg_core::VertexId;

/// One position per graph dimension, keyed by dimension name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Trace(BTreeMap<String, VertexId>);

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, dimension: impl Into<String>, vertex: VertexId) {
        self.0.insert(dimension.into(), vertex);
    }

    pub fn dimension(&self, name: &str) -> Option<VertexId> {
        self.0.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, VertexId)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, VertexId)> for Trace {
    fn from_iter<I: IntoIterator<Item = (String, VertexId)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A single agent walking every dimension in lockstep.
#[derive(Debug, Clone, Serialize)]
pub struct Ant {
    current: Trace,
    route: Vec<Trace>,
    completed: bool,
}

impl Ant {
    pub fn new(start: Trace) -> Self {
        Self {
            route: vec![start.clone()],
            current: start,
            completed: false,
        }
    }

    pub fn current(&self) -> &Trace {
        &self.current
    }

    /// Every trace visited, the starting one included.
    pub fn route(&self) -> &[Trace] {
        &self.route
    }

    /// Steps taken so far.
    pub fn steps(&self) -> usize {
        self.route.len() - 1
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn advance(&mut self, next: Trace) {
        self.route.push(next.clone());
        self.current = next;
    }

    pub(crate) fn complete(&mut self) {
        self.completed = true;
    }
}
