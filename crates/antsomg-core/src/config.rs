use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AntsError, Result};
use crate::fraction::FractionMode;
use crate::graph::Graph;

/// Top-level configuration: colony parameters plus one entry per graph dimension.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub colony: ColonyConfig,
    #[serde(default)]
    pub graphs: Vec<GraphConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColonyConfig {
    /// Number of ants.
    #[serde(default = "default_population")]
    pub population: usize,
    /// Trail added to every selected edge.
    #[serde(default = "default_pheromone_deposit")]
    pub pheromone_deposit: f64,
    /// Probability of an exploratory (uniform) move.
    #[serde(default = "default_explore_chance")]
    pub explore_chance: f64,
    /// Fraction of every trail removed per cycle.
    #[serde(default = "default_evaporate_rate")]
    pub evaporate_rate: f64,
    /// Upper bound on navigation cycles for a single run.
    #[serde(default = "default_max_cycles")]
    pub max_cycles: usize,
    /// Fixed seed for reproducible runs; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            population: default_population(),
            pheromone_deposit: default_pheromone_deposit(),
            explore_chance: default_explore_chance(),
            evaporate_rate: default_evaporate_rate(),
            max_cycles: default_max_cycles(),
            seed: None,
        }
    }
}

impl ColonyConfig {
    /// Check the parameters the engine would otherwise reject mid-run.
    pub fn validate(&self) -> Result<()> {
        if !(self.pheromone_deposit.is_finite() && self.pheromone_deposit >= 0.0) {
            return Err(AntsError::Config(format!(
                "colony.pheromone_deposit must be nonnegative, got {}",
                self.pheromone_deposit
            )));
        }
        if !(0.0..=1.0).contains(&self.explore_chance) {
            return Err(AntsError::Config(format!(
                "colony.explore_chance must be within [0, 1], got {}",
                self.explore_chance
            )));
        }
        if !(0.0..=1.0).contains(&self.evaporate_rate) {
            return Err(AntsError::Config(format!(
                "colony.evaporate_rate must be within [0, 1], got {}",
                self.evaporate_rate
            )));
        }
        Ok(())
    }
}

fn default_population() -> usize {
    200
}

fn default_pheromone_deposit() -> f64 {
    0.5
}

fn default_explore_chance() -> f64 {
    0.1
}

fn default_evaporate_rate() -> f64 {
    0.05
}

fn default_max_cycles() -> usize {
    10_000
}

/// One graph dimension: parameters, start vertex and edge list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    pub name: String,
    #[serde(default = "default_weight")]
    pub alpha: f64,
    #[serde(default = "default_weight")]
    pub beta: f64,
    #[serde(default)]
    pub fraction_mode: FractionMode,
    #[serde(default)]
    pub initial_trail: f64,
    pub start: String,
    #[serde(default)]
    pub edges: Vec<EdgeConfig>,
}

fn default_weight() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeConfig {
    pub from: String,
    pub to: String,
    pub cost: f64,
}

impl GraphConfig {
    /// Bulk-load the configured edges into a fresh graph.
    pub fn build(&self) -> Result<Graph> {
        let mut graph = Graph::with_initial_trail(self.alpha, self.beta, self.initial_trail)?;
        graph.set_fraction_mode(self.fraction_mode);
        graph.add_edges(
            self.edges
                .iter()
                .map(|e| (e.from.as_str(), e.to.as_str(), e.cost)),
        )?;
        graph.set_start(&self.start)?;
        Ok(graph)
    }
}

impl AppConfig {
    /// Load config from a TOML file, with env var expansion.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| AntsError::ConfigNotFound(path.display().to_string()))?;

        // Expand ${ENV_VAR} references
        let expanded = expand_env_vars(&content);

        let config: AppConfig =
            toml::from_str(&expanded).map_err(|e| AntsError::Config(e.to_string()))?;
        config.colony.validate()?;
        Ok(config)
    }

    pub fn graph(&self, name: &str) -> Option<&GraphConfig> {
        self.graphs.iter().find(|g| g.name == name)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| AntsError::Config(e.to_string()))
    }
}

/// Substitute `${NAME}` references with the value of the environment variable.
///
/// Unset variables and an unterminated `${` are left in the text as written.
fn expand_env_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find("${") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let name = &after[..close];
        let value = if name.is_empty() {
            None
        } else {
            std::env::var(name).ok()
        };
        match value {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[open..open + close + 3]),
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}
