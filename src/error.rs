use thiserror::Error;

#[derive(Debug, Error)]
pub enum PmcError {
    #[error("edge {from} -> {to} has probability {probability}, expected a value in [0, 1]")]
    InvalidProbability { from: usize, to: usize, probability: f64 },

    #[error("edge {from} -> {to} appears more than once")]
    DuplicateEdge { from: usize, to: usize },

    #[error("line {line}: {reason}")]
    MalformedEdge { line: usize, reason: String },

    #[error("cannot select {k} seeds from a network with {nodes} nodes")]
    InvalidSeedCount { k: usize, nodes: usize },

    #[error("the number of trials must be at least 1")]
    InvalidTrialCount,

    #[error("the network has no nodes")]
    EmptyGraph,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PmcError {
    /// Returns true for errors caused by bad edges or run parameters.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            PmcError::InvalidProbability { .. }
                | PmcError::DuplicateEdge { .. }
                | PmcError::MalformedEdge { .. }
                | PmcError::InvalidSeedCount { .. }
                | PmcError::InvalidTrialCount
        )
    }
}
