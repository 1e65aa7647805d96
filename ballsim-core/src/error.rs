use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised while configuring or populating a simulation.
///
/// Stepping a world never fails; everything here happens before the first tick.
#[derive(Debug, Error)]
pub enum SimError {
    /// A parameter violates a precondition (non-positive radius, inverted range, ...).
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Rejection sampling could not find a free spot for a ball.
    #[error("could not place ball {index} without overlap after {attempts} attempts")]
    PlacementFailed { index: usize, attempts: u32 },

    /// A configuration document could not be decoded.
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SimError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParam(message.into())
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
