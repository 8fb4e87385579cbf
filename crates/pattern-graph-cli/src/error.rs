//! CLI error type and exit code mapping.

use pattern_graph_core::GraphError;
use thiserror::Error;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum CliExitCode {
    Success = 0,
    Error = 1,
    Timeout = 2,
    StoreUnavailable = 3,
    InvalidInput = 4,
    NotFound = 5,
}

impl From<CliExitCode> for i32 {
    fn from(code: CliExitCode) -> Self {
        code as i32
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Message for stderr; store failures get the retry hint.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Graph(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// Map an error to the exit code scripts can branch on.
pub fn exit_code_for_error(err: &CliError) -> CliExitCode {
    match err {
        CliError::Graph(e) => match e {
            GraphError::TraceTimeout { .. } => CliExitCode::Timeout,
            GraphError::StoreUnavailable(_) => CliExitCode::StoreUnavailable,
            GraphError::InvalidDepth { .. }
            | GraphError::InvalidInput(_)
            | GraphError::SimulatorUnavailable
            | GraphError::Serialization(_)
            | GraphError::Io(_) => CliExitCode::InvalidInput,
            GraphError::InvalidConfig(_) | GraphError::Config(_) | GraphError::Simulator(_) => {
                CliExitCode::Error
            }
        },
        CliError::InvalidArgument(_) => CliExitCode::InvalidInput,
        CliError::Output(_) => CliExitCode::Error,
    }
}
