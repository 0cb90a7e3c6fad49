//! Attractiveness ("fraction") of an edge.
//!
//! Combines the pheromone trail with the heuristic desirability `1 / cost`
//! using one of two closed formulas selected by [`FractionMode`].

use serde::{Deserialize, Serialize};

use crate::edge::Edge;
use crate::error::{AntsError, Result};

/// Formula used to weight candidate edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractionMode {
    /// `trail * alpha + (1 / cost) * beta`
    #[default]
    Coefficient,
    /// `trail ^ alpha + (1 / cost) ^ beta`
    Power,
}

impl std::fmt::Display for FractionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FractionMode::Coefficient => write!(f, "coefficient"),
            FractionMode::Power => write!(f, "power"),
        }
    }
}

/// Compute the attractiveness of `edge`.
///
/// The result is finite and nonnegative for valid edges; anything else is
/// reported as [`AntsError::Numeric`].
pub fn fraction(edge: &Edge, alpha: f64, beta: f64, mode: FractionMode) -> Result<f64> {
    let cost = edge.cost();
    if !(cost.is_finite() && cost > 0.0) {
        return Err(AntsError::Numeric(format!(
            "edge cost must be positive, got {}",
            cost
        )));
    }
    let trail = edge.pheromone_trail();
    let heuristic = 1.0 / cost;

    let value = match mode {
        FractionMode::Coefficient => trail * alpha + heuristic * beta,
        FractionMode::Power => trail.powf(alpha) + heuristic.powf(beta),
    };

    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(AntsError::Numeric(format!(
            "{} fraction is {} (trail={}, cost={}, alpha={}, beta={})",
            mode, value, trail, cost, alpha, beta
        )))
    }
}
