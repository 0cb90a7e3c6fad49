use thiserror::Error;

#[derive(Debug, Error)]
pub enum AntsError {
    // Traversal errors
    #[error("Dead end: vertex {vertex} has no outgoing edges")]
    DeadEnd { vertex: String },

    #[error("Unknown vertex: {0}")]
    UnknownVertex(String),

    #[error("Unknown edge: #{0}")]
    UnknownEdge(usize),

    #[error("Graph has no start vertex")]
    MissingStart,

    // Caller misuse
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    // Malformed graph data
    #[error("Numeric error: {0}")]
    Numeric(String),

    // Config errors
    #[error("Config error: {0}")]
    Config(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AntsError {
    /// Shorthand for an out-of-range probability/rate parameter.
    pub(crate) fn out_of_unit_range(name: &str, value: f64) -> Self {
        AntsError::InvalidParameter(format!("{} must be within [0, 1], got {}", name, value))
    }
}

pub type Result<T> = std::result::Result<T, AntsError>;
