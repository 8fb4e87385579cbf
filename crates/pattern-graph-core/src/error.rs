//! Error types for pattern graph operations.
//!
//! Only failures the caller must act on are errors. Two outcomes that
//! look like failures are deliberately *not* represented here:
//!
//! - A missing origin pattern is an explicitly flagged, empty
//!   [`TraceResult`](crate::tracer::TraceResult).
//! - Nodes the layout engine cannot place are defaulted to the origin and
//!   listed in [`LayoutOutcome::unpositioned`](crate::layout::LayoutOutcome).
//!
//! Malformed payload leaves are skipped by the extractor and only logged.

use thiserror::Error;

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// User-facing message for a trace whose origin pattern does not exist.
pub const MSG_PATTERN_NOT_FOUND: &str = "pattern not found";

/// User-facing message for a retryable store failure.
pub const MSG_STORE_RETRY: &str = "could not reach store, retry";

/// Error type for all pattern graph operations.
#[derive(Error, Debug)]
pub enum GraphError {
    // ========== Store Errors ==========
    /// The pattern store could not be reached or failed transiently.
    #[error("Pattern store unavailable: {0}")]
    StoreUnavailable(String),

    /// A trace did not resolve within the configured interval.
    #[error("Trace timed out after {timeout_ms}ms")]
    TraceTimeout { timeout_ms: u64 },

    // ========== Validation Errors ==========
    /// Requested trace depth is outside the accepted range.
    #[error("Invalid trace depth: {requested} (limit is {max})")]
    InvalidDepth { requested: usize, max: usize },

    /// Invalid input provided to a function.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========== Configuration Errors ==========
    /// Invalid configuration parameter.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration source could not be loaded or deserialized.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // ========== Layout Errors ==========
    /// Force layout requested without a physics simulator.
    #[error("Force layout requires an external simulator, none was supplied")]
    SimulatorUnavailable,

    /// The external physics simulator reported a failure.
    #[error("Force simulator failed: {0}")]
    Simulator(String),

    // ========== Serialization / IO ==========
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    /// Create a store-unavailable error.
    #[inline]
    pub fn store_unavailable(reason: impl Into<String>) -> Self {
        Self::StoreUnavailable(reason.into())
    }

    /// Create an invalid input error.
    #[inline]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Whether the same call may succeed if retried unchanged.
    #[inline]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::StoreUnavailable(_) | Self::TraceTimeout { .. } => true,
            Self::Io(_)
            | Self::InvalidDepth { .. }
            | Self::InvalidInput(_)
            | Self::InvalidConfig(_)
            | Self::Config(_)
            | Self::SimulatorUnavailable
            | Self::Simulator(_)
            | Self::Serialization(_) => false,
        }
    }

    /// Short message suitable for showing to an end user.
    pub fn user_message(&self) -> String {
        if self.is_retryable() {
            return MSG_STORE_RETRY.to_string();
        }
        self.to_string()
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for GraphError {
    fn from(err: toml::de::Error) -> Self {
        GraphError::InvalidConfig(err.to_string())
    }
}

static_assertions::assert_impl_all!(GraphError: Send, Sync, std::error::Error);
