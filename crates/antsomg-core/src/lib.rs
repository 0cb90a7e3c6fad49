pub mod config;
pub mod edge;
pub mod error;
pub mod fraction;
pub mod graph;
pub mod moves;
pub mod random;
pub mod vertex;

pub use config::AppConfig;
pub use edge::{Edge, EdgeId};
pub use error::{AntsError, Result};
pub use fraction::{fraction, FractionMode};
pub use graph::Graph;
pub use moves::Move;
pub use random::{RandomSource, RngSource};
pub use vertex::{VertexId, VertexRegistry};
