//! Sub-configuration structures for the pattern graph engine.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::layout::{AngularMode, Discipline};
use crate::tracer::MAX_TRACE_DEPTH;
use crate::types::NodeSizing;

/// Trace configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TraceConfig {
    /// Depth used when a query does not specify one (default: 3)
    #[serde(default = "default_max_depth")]
    pub default_max_depth: usize,

    /// Largest depth a query may request (default: 5, never above 5)
    #[serde(default = "default_max_depth_limit")]
    pub max_depth_limit: usize,

    /// Gateway round-trip budget for one whole trace, in milliseconds (default: 10000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_max_depth() -> usize {
    3
}

fn default_max_depth_limit() -> usize {
    MAX_TRACE_DEPTH
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            default_max_depth: default_max_depth(),
            max_depth_limit: default_max_depth_limit(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl TraceConfig {
    pub fn validate(&self) -> GraphResult<()> {
        if self.max_depth_limit == 0 || self.max_depth_limit > MAX_TRACE_DEPTH {
            return Err(GraphError::InvalidConfig(format!(
                "trace.max_depth_limit must be in 1..={}, got {}",
                MAX_TRACE_DEPTH, self.max_depth_limit
            )));
        }
        if self.default_max_depth == 0 || self.default_max_depth > self.max_depth_limit {
            return Err(GraphError::InvalidConfig(format!(
                "trace.default_max_depth must be in 1..={}, got {}",
                self.max_depth_limit, self.default_max_depth
            )));
        }
        if self.timeout_ms == 0 {
            return Err(GraphError::InvalidConfig(
                "trace.timeout_ms must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Layout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutConfig {
    /// Discipline used when none is requested
    #[serde(default)]
    pub default_discipline: Discipline,

    /// Gap between neighbouring nodes within a rank
    #[serde(default = "default_node_spacing")]
    pub node_spacing: f64,

    /// Gap between adjacent ranks
    #[serde(default = "default_rank_spacing")]
    pub rank_spacing: f64,

    /// Radius step between radial rings
    #[serde(default = "default_ring_spacing")]
    pub ring_spacing: f64,

    /// Barycenter sweeps during crossing minimization
    #[serde(default = "default_crossing_iterations")]
    pub crossing_iterations: usize,

    /// Node size at frequency 0
    #[serde(default = "default_base_node_size")]
    pub base_node_size: f64,

    /// Multiplier on ln(frequency + 1)
    #[serde(default = "default_size_scale")]
    pub size_scale: f64,

    /// How radial layouts split each ring's angle
    #[serde(default)]
    pub angular_mode: AngularMode,
}

fn default_node_spacing() -> f64 {
    80.0
}

fn default_rank_spacing() -> f64 {
    150.0
}

fn default_ring_spacing() -> f64 {
    120.0
}

fn default_crossing_iterations() -> usize {
    24
}

fn default_base_node_size() -> f64 {
    10.0
}

fn default_size_scale() -> f64 {
    4.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_discipline: Discipline::default(),
            node_spacing: default_node_spacing(),
            rank_spacing: default_rank_spacing(),
            ring_spacing: default_ring_spacing(),
            crossing_iterations: default_crossing_iterations(),
            base_node_size: default_base_node_size(),
            size_scale: default_size_scale(),
            angular_mode: AngularMode::default(),
        }
    }
}

impl LayoutConfig {
    pub fn sizing(&self) -> NodeSizing {
        NodeSizing {
            base: self.base_node_size,
            scale: self.size_scale,
        }
    }

    pub fn validate(&self) -> GraphResult<()> {
        let spacings = [
            ("layout.node_spacing", self.node_spacing),
            ("layout.rank_spacing", self.rank_spacing),
            ("layout.ring_spacing", self.ring_spacing),
            ("layout.base_node_size", self.base_node_size),
        ];
        for (name, value) in spacings {
            if !value.is_finite() || value <= 0.0 {
                return Err(GraphError::InvalidConfig(format!(
                    "{name} must be a finite value > 0, got {value}"
                )));
            }
        }
        if !self.size_scale.is_finite() || self.size_scale < 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "layout.size_scale must be finite and >= 0, got {}",
                self.size_scale
            )));
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "pretty", "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> GraphResult<()> {
        match self.format.as_str() {
            "pretty" | "compact" | "json" => Ok(()),
            other => Err(GraphError::InvalidConfig(format!(
                "logging.format must be one of pretty|compact|json, got {other:?}"
            ))),
        }
    }
}
