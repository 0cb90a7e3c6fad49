use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Interned vertex handle.
///
/// Handles are only meaningful inside the registry that issued them; two
/// handles from the same registry are equal exactly when they name the same
/// label.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct VertexId(pub u32);

impl VertexId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Arena of vertex labels owned by a graph.
#[derive(Debug, Clone, Default)]
pub struct VertexRegistry {
    names: Vec<String>,
    index: HashMap<String, VertexId>,
}

impl VertexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the canonical handle for `label`, interning it on first use.
    pub fn get(&mut self, label: &str) -> VertexId {
        if let Some(id) = self.index.get(label) {
            return *id;
        }
        let id = VertexId(self.names.len() as u32);
        self.names.push(label.to_string());
        self.index.insert(label.to_string(), id);
        id
    }

    /// Look up an already interned label without creating it.
    pub fn lookup(&self, label: &str) -> Option<VertexId> {
        self.index.get(label).copied()
    }

    pub fn name(&self, id: VertexId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All vertices in interning order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (VertexId(i as u32), name.as_str()))
    }
}
