use std::path::PathBuf;

use thiserror::Error;

/// Error type shared by every core operation.
#[derive(Debug, Error)]
pub enum SaboteurError {
    /// Malformed or degenerate input (empty positions, duplicate group names,
    /// unknown failed groups, bad CSV rows).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A handful of elements appear in every candidate group, so they alone
    /// could make the whole batch fail and no design can tell them apart.
    #[error(
        "Not possible to detect up to {max_saboteurs} saboteurs, as the following {count} \
         elements collectively cover all groups, and therefore all groups would fail at once \
         if these {count} elements alone were saboteurs: {elements}. Remove these elements \
         from the problem or decrease the max number of saboteurs if possible.",
        count = .covering_elements.len(),
        elements = .covering_elements.join(", ")
    )]
    DesignInfeasible { max_saboteurs: usize, covering_elements: Vec<String> },

    /// The cover search exhausted every branch.
    #[error("No solution found.")]
    NoSolution,

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience result type for core operations.
pub type SaboteurResult<T> = Result<T, SaboteurError>;
