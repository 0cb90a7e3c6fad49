//! Shared test utilities for antsomg crates.
//!
//! - [`ScriptedSource`]: a [`RandomSource`] that replays queued draws.
//! - Graph fixtures: the two-edge scenario graph and the spiral dimensions.
//! - Config helpers writing TOML to temporary files.

use std::collections::VecDeque;
use std::io::Write;

use antsomg_core::{FractionMode, Graph, RandomSource};

/// Threshold draw for an exploitation move.
#[derive(Debug, Clone, Copy)]
pub enum Threshold {
    /// Use this value verbatim.
    Absolute(f64),
    /// Use `ratio * total` of the wheel being spun.
    OfTotal(f64),
}

/// Random source returning pre-scripted draws.
///
/// Empty queues fall back to: not exploring, index 0, threshold 0.0.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    explores: VecDeque<bool>,
    picks: VecDeque<usize>,
    thresholds: VecDeque<Threshold>,
    /// Number of `uniform` draws served.
    pub threshold_draws: usize,
    /// Number of `pick` draws served.
    pub pick_draws: usize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always exploit, spinning the wheel to `threshold`.
    pub fn exploit_at(threshold: f64) -> Self {
        Self::new().then_exploit(Threshold::Absolute(threshold))
    }

    /// Always explore, picking candidate `index`.
    pub fn explore_pick(index: usize) -> Self {
        Self::new().then_explore(index)
    }

    pub fn then_exploit(mut self, threshold: Threshold) -> Self {
        self.explores.push_back(false);
        self.thresholds.push_back(threshold);
        self
    }

    pub fn then_explore(mut self, index: usize) -> Self {
        self.explores.push_back(true);
        self.picks.push_back(index);
        self
    }
}

impl RandomSource for ScriptedSource {
    fn chance(&mut self, _p: f64) -> bool {
        self.explores.pop_front().unwrap_or(false)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.pick_draws += 1;
        self.picks.pop_front().unwrap_or(0).min(len.saturating_sub(1))
    }

    fn uniform(&mut self, upper: f64) -> f64 {
        self.threshold_draws += 1;
        match self.thresholds.pop_front() {
            Some(Threshold::Absolute(v)) => v,
            Some(Threshold::OfTotal(ratio)) => ratio * upper,
            None => 0.0,
        }
    }
}

/// `A -> B` (cost 1) and `A -> A` (cost 2), coefficient mode, alpha = beta = 1.
pub fn scenario_graph() -> Graph {
    let mut graph = Graph::new(1.0, 1.0);
    graph
        .add_edges([("A", "B", 1.0), ("A", "A", 2.0)])
        .expect("valid scenario edges");
    graph.set_start("A").expect("start vertex present");
    graph
}

/// Radial dimension of the spiral demo: STAY / IN / OUT.
pub fn spiral_x(alpha: f64, beta: f64) -> Graph {
    let mut graph = Graph::new(alpha, beta);
    graph.set_fraction_mode(FractionMode::Power);
    graph
        .add_edges([
            ("STAY", "IN", 10.0),
            ("IN", "STAY", 1.0),
            ("STAY", "OUT", 1.0),
            ("OUT", "STAY", 10.0),
            ("IN", "OUT", 1.0),
            ("OUT", "OUT", 500.0),
            ("STAY", "STAY", 1.0),
        ])
        .expect("valid spiral x edges");
    graph.set_start("STAY").expect("start vertex present");
    graph
}

/// Colour dimension of the spiral demo: WHITE hub with BLUE / RED / YELLOW spokes.
pub fn spiral_y(alpha: f64, beta: f64) -> Graph {
    let mut graph = Graph::new(alpha, beta);
    graph.set_fraction_mode(FractionMode::Power);
    graph
        .add_edges([
            ("WHITE", "WHITE", 1.0),
            ("BLUE", "BLUE", 1.0),
            ("RED", "RED", 1.0),
            ("YELLOW", "YELLOW", 1.0),
            ("WHITE", "BLUE", 10.0),
            ("BLUE", "WHITE", 10.0),
            ("WHITE", "RED", 10.0),
            ("RED", "WHITE", 10.0),
            ("WHITE", "YELLOW", 10.0),
            ("YELLOW", "WHITE", 10.0),
        ])
        .expect("valid spiral y edges");
    graph.set_start("WHITE").expect("start vertex present");
    graph
}

/// Minimal two-dimension config in TOML form.
pub fn minimal_config_toml() -> &'static str {
    r#"
[colony]
population = 5
seed = 7
max_cycles = 500

[[graphs]]
name = "x"
fraction_mode = "power"
start = "STAY"
edges = [
    { from = "STAY", to = "IN", cost = 10.0 },
    { from = "IN", to = "STAY", cost = 1.0 },
    { from = "STAY", to = "STAY", cost = 1.0 },
]

[[graphs]]
name = "y"
start = "WHITE"
edges = [
    { from = "WHITE", to = "WHITE", cost = 1.0 },
    { from = "WHITE", to = "RED", cost = 10.0 },
    { from = "RED", to = "WHITE", cost = 10.0 },
]
"#
}

/// Write `contents` to a temporary `.toml` file kept alive by the returned handle.
pub fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut tmp = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp file");
    tmp.write_all(contents.as_bytes()).expect("write toml");
    tmp
}
