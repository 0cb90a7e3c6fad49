use serde::{Deserialize, Serialize};

use crate::error::{AntsError, Result};
use crate::vertex::VertexId;

/// Position of an edge in its graph's insertion order.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A directed arc with a fixed cost and a mutable pheromone trail.
///
/// Serialize-only: edges are built through [`Edge::new`] so cost and trail
/// are always checked.
#[derive(Debug, Clone, Serialize)]
pub struct Edge {
    from: VertexId,
    to: VertexId,
    cost: f64,
    pheromone_trail: f64,
}

impl Edge {
    /// Create an edge. `cost` must be positive and finite, `trail` nonnegative.
    pub fn new(from: VertexId, to: VertexId, cost: f64, trail: f64) -> Result<Self> {
        if !(cost.is_finite() && cost > 0.0) {
            return Err(AntsError::Numeric(format!(
                "edge cost must be positive and finite, got {}",
                cost
            )));
        }
        if !(trail.is_finite() && trail >= 0.0) {
            return Err(AntsError::InvalidParameter(format!(
                "initial pheromone trail must be nonnegative, got {}",
                trail
            )));
        }
        Ok(Self {
            from,
            to,
            cost,
            pheromone_trail: trail,
        })
    }

    pub fn from(&self) -> VertexId {
        self.from
    }

    pub fn to(&self) -> VertexId {
        self.to
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn pheromone_trail(&self) -> f64 {
        self.pheromone_trail
    }

    /// Reinforce the trail. No upper bound is applied.
    pub fn deposit(&mut self, amount: f64) -> Result<()> {
        validate_deposit(amount)?;
        self.pheromone_trail += amount;
        Ok(())
    }

    /// Decay the trail: `trail := trail * (1 - rate)`.
    pub fn evaporate(&mut self, rate: f64) -> Result<()> {
        validate_rate(rate)?;
        self.pheromone_trail *= 1.0 - rate;
        Ok(())
    }
}

pub(crate) fn validate_deposit(amount: f64) -> Result<()> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(AntsError::InvalidParameter(format!(
            "pheromone deposit must be nonnegative and finite, got {}",
            amount
        )))
    }
}

pub(crate) fn validate_rate(rate: f64) -> Result<()> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(AntsError::out_of_unit_range("evaporation rate", rate))
    }
}
