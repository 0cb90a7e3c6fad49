//! Graph engine: pheromone-guided move selection over a directed multigraph.
//!
//! A `Graph` owns its vertex arena, its edges (in insertion order) and a
//! designated start vertex. Topology is fixed once loaded; only the per-edge
//! pheromone trails change, through [`Graph::deposit`] (also applied by
//! [`Graph::make_move`]) and [`Graph::evaporate_all`] (decay).
//!
//! Callers are expected to run all moves of a cycle before evaporating once.

use std::fmt::Write;

use tracing::{debug, warn};

use crate::edge::{validate_deposit, validate_rate, Edge, EdgeId};
use crate::error::{AntsError, Result};
use crate::fraction::{fraction, FractionMode};
use crate::moves::Move;
use crate::random::RandomSource;
use crate::vertex::{VertexId, VertexRegistry};

#[derive(Debug, Clone)]
pub struct Graph {
    vertices: VertexRegistry,
    edges: Vec<Edge>,
    start: Option<VertexId>,
    alpha: f64,
    beta: f64,
    fraction_mode: FractionMode,
    initial_trail: f64,
}

impl Graph {
    /// Create an empty graph whose edges start with a zero trail.
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self {
            vertices: VertexRegistry::new(),
            edges: Vec::new(),
            start: None,
            alpha,
            beta,
            fraction_mode: FractionMode::default(),
            initial_trail: 0.0,
        }
    }

    /// Create an empty graph whose edges start with `trail`.
    ///
    /// Unlike [`Graph::new`], `alpha` and `beta` are checked up front.
    pub fn with_initial_trail(alpha: f64, beta: f64, trail: f64) -> Result<Self> {
        validate_weights(alpha, beta)?;
        if !(trail.is_finite() && trail >= 0.0) {
            return Err(AntsError::InvalidParameter(format!(
                "initial pheromone trail must be nonnegative, got {}",
                trail
            )));
        }
        let mut graph = Self::new(alpha, beta);
        graph.initial_trail = trail;
        Ok(graph)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn initial_trail(&self) -> f64 {
        self.initial_trail
    }

    pub fn fraction_mode(&self) -> FractionMode {
        self.fraction_mode
    }

    pub fn set_fraction_mode(&mut self, mode: FractionMode) {
        self.fraction_mode = mode;
    }

    // -- topology ----------------------------------------------------------

    /// Canonical handle for `label`, interning it if needed.
    pub fn vertex(&mut self, label: &str) -> VertexId {
        self.vertices.get(label)
    }

    pub fn find_vertex(&self, label: &str) -> Option<VertexId> {
        self.vertices.lookup(label)
    }

    pub fn vertex_name(&self, id: VertexId) -> Option<&str> {
        self.vertices.name(id)
    }

    pub fn vertices(&self) -> &VertexRegistry {
        &self.vertices
    }

    /// Append one edge between two labels.
    pub fn add_edge(&mut self, from: &str, to: &str, cost: f64) -> Result<EdgeId> {
        let from = self.vertices.get(from);
        let to = self.vertices.get(to);
        let edge = Edge::new(from, to, cost, self.initial_trail)?;
        self.edges.push(edge);
        Ok(EdgeId(self.edges.len() - 1))
    }

    /// Bulk-load edges as `(from, to, cost)` triples.
    ///
    /// Either every edge is added or, on the first invalid cost, none is.
    pub fn add_edges<'a, I>(&mut self, edges: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a str, f64)>,
    {
        let mut staged = Vec::new();
        let mut registry = self.vertices.clone();
        for (from, to, cost) in edges {
            let from = registry.get(from);
            let to = registry.get(to);
            staged.push(Edge::new(from, to, cost, self.initial_trail)?);
        }
        self.vertices = registry;
        self.edges.extend(staged);
        Ok(())
    }

    /// Designate the start vertex. It must already appear in the graph.
    pub fn set_start(&mut self, label: &str) -> Result<VertexId> {
        let id = self
            .vertices
            .lookup(label)
            .ok_or_else(|| AntsError::UnknownVertex(label.to_string()))?;
        self.start = Some(id);
        Ok(id)
    }

    pub fn start(&self) -> Result<VertexId> {
        self.start.ok_or(AntsError::MissingStart)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> Result<&Edge> {
        self.edges.get(id.0).ok_or(AntsError::UnknownEdge(id.0))
    }

    /// Edges leaving `vertex`, in insertion order.
    pub fn outgoing_edges(&self, vertex: VertexId) -> Vec<EdgeId> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.from() == vertex)
            .map(|(i, _)| EdgeId(i))
            .collect()
    }

    /// Attractiveness of one edge under the current mode and parameters.
    pub fn fraction(&self, id: EdgeId) -> Result<f64> {
        let edge = self.edge(id)?;
        fraction(edge, self.alpha, self.beta, self.fraction_mode)
    }

    // -- engine ------------------------------------------------------------

    /// Choose an outgoing edge of `current` and reinforce it.
    ///
    /// With probability `explore_chance` the choice is uniform over the
    /// candidates; otherwise it is a roulette-wheel draw weighted by
    /// [`Graph::fraction`]. The selected edge receives `deposit` either way.
    /// On error no trail is modified.
    pub fn make_move<R>(
        &mut self,
        current: VertexId,
        deposit: f64,
        explore_chance: f64,
        rng: &mut R,
    ) -> Result<Move>
    where
        R: RandomSource + ?Sized,
    {
        validate_deposit(deposit)?;
        let mv = self.select_move(current, explore_chance, rng)?;
        self.deposit(mv.selected(), deposit)?;
        Ok(mv)
    }

    /// The selection half of [`Graph::make_move`]: draws a move without
    /// touching any trail.
    pub fn select_move<R>(
        &self,
        current: VertexId,
        explore_chance: f64,
        rng: &mut R,
    ) -> Result<Move>
    where
        R: RandomSource + ?Sized,
    {
        validate_weights(self.alpha, self.beta)?;
        if !(0.0..=1.0).contains(&explore_chance) {
            return Err(AntsError::out_of_unit_range(
                "explore probability",
                explore_chance,
            ));
        }
        let name = self
            .vertices
            .name(current)
            .ok_or_else(|| AntsError::UnknownVertex(current.to_string()))?;

        let candidates = self.outgoing_edges(current);
        if candidates.is_empty() {
            return Err(AntsError::DeadEnd {
                vertex: name.to_string(),
            });
        }
        let fractions = candidates
            .iter()
            .map(|id| self.fraction(*id))
            .collect::<Result<Vec<f64>>>()?;
        let total: f64 = fractions.iter().sum();

        let exploring = rng.chance(explore_chance);
        let index = if exploring {
            rng.pick(candidates.len())
        } else {
            if !(total.is_finite() && total > 0.0) {
                return Err(AntsError::Numeric(format!(
                    "total attractiveness at {} is {}",
                    name, total
                )));
            }
            let threshold = rng.uniform(total);
            roulette(&fractions, threshold)
        };

        let selected = *candidates.get(index).ok_or_else(|| {
            AntsError::InvalidParameter(format!(
                "random source picked {} of {} candidates",
                index,
                candidates.len()
            ))
        })?;

        debug!(
            vertex = %name,
            candidates = candidates.len(),
            selected = %selected,
            exploring,
            "Move selected"
        );
        Ok(Move::new(exploring, candidates, selected))
    }

    /// Add `amount` to the trail of one edge.
    pub fn deposit(&mut self, id: EdgeId, amount: f64) -> Result<()> {
        self.edges
            .get_mut(id.0)
            .ok_or(AntsError::UnknownEdge(id.0))?
            .deposit(amount)
    }

    /// Decay every trail by `rate`.
    pub fn evaporate_all(&mut self, rate: f64) -> Result<()> {
        validate_rate(rate)?;
        for edge in &mut self.edges {
            edge.evaporate(rate)?;
        }
        debug!(rate, edges = self.edges.len(), "Evaporated trails");
        Ok(())
    }

    /// Sum of every trail in the graph.
    pub fn total_pheromone(&self) -> f64 {
        self.edges.iter().map(Edge::pheromone_trail).sum()
    }

    // -- export ------------------------------------------------------------

    /// One line per edge: `FROM -> TO [ label="p=<trail>,c=<cost>"];`
    pub fn export_topology(&self) -> String {
        let mut out = String::new();
        for edge in &self.edges {
            let _ = writeln!(
                out,
                "{} -> {} [ label=\"p={:.3},c={:.2}\"];",
                self.vertices.name(edge.from()).unwrap_or_default(),
                self.vertices.name(edge.to()).unwrap_or_default(),
                edge.pheromone_trail(),
                edge.cost()
            );
        }
        out
    }

    /// The topology wrapped as a Graphviz digraph named `name`.
    pub fn as_graphviz(&self, name: &str) -> String {
        let mut out = format!("digraph {} {{\n", name);
        for line in self.export_topology().lines() {
            out.push('\t');
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("}\n");
        out
    }
}

fn validate_weights(alpha: f64, beta: f64) -> Result<()> {
    if alpha.is_finite() && beta.is_finite() {
        Ok(())
    } else {
        Err(AntsError::InvalidParameter(format!(
            "alpha and beta must be finite, got alpha={}, beta={}",
            alpha, beta
        )))
    }
}

/// Cumulative roulette walk over `fractions`.
///
/// Returns the first index whose weight exceeds the running remainder of
/// `threshold`. If rounding leaves a residue past the last boundary, the last
/// candidate is selected.
pub(crate) fn roulette(fractions: &[f64], threshold: f64) -> usize {
    let mut remainder = threshold;
    for (i, f) in fractions.iter().enumerate() {
        if remainder < *f {
            return i;
        }
        remainder -= f;
    }
    warn!(
        threshold,
        remainder, "Roulette walk exhausted candidates, falling back to last"
    );
    fractions.len().saturating_sub(1)
}
