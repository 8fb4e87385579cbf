//! Helpers shared by the command handlers.

use std::path::Path;

use serde::Serialize;
use tracing::{error, warn};

use pattern_graph_core::{Discipline, InMemoryGateway, LayoutOutcome, LayoutSpec, ReverseLookup};

use crate::error::{exit_code_for_error, CliError};

/// Load the fixture store. `scan` disables the reverse index.
pub fn load_gateway(store: &Path, scan: bool) -> Result<InMemoryGateway, CliError> {
    let lookup = if scan {
        ReverseLookup::Scan
    } else {
        ReverseLookup::Indexed
    };
    Ok(InMemoryGateway::from_json_file(store, lookup)?)
}

/// Layout spec for `--layout NAME`, seeded from the configured defaults.
pub fn layout_spec(name: &str, base: &LayoutSpec) -> Result<LayoutSpec, CliError> {
    let discipline: Discipline = name
        .parse()
        .map_err(|_| CliError::InvalidArgument(format!("unknown layout discipline: {name}")))?;
    Ok(base.clone().discipline(discipline))
}

/// Layout as printed: positions plus the user-facing diagnostic, if any.
#[derive(Debug, Serialize)]
pub struct LayoutReport {
    #[serde(flatten)]
    pub outcome: LayoutOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<LayoutOutcome> for LayoutReport {
    fn from(outcome: LayoutOutcome) -> Self {
        let message = outcome.diagnostic();
        if let Some(diagnostic) = &message {
            warn!(%diagnostic, "layout incomplete");
        }
        Self { outcome, message }
    }
}

pub fn render<T: Serialize>(value: &T, compact: bool) -> Result<String, CliError> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(out)
}

/// Log and print `err`, returning its exit code.
pub fn report(command: &str, err: &CliError) -> i32 {
    error!(command, error = %err, "command failed");
    eprintln!("Error: {}", err.user_message());
    exit_code_for_error(err).into()
}
