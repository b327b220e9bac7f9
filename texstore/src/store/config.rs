//! Texture store configuration.

use crate::store::types::StoreError;

/// Default memory budget for embedded use: 256 MiB.
pub const DEFAULT_MAX_SIZE: usize = 256 * 1024 * 1024;

/// Larger budget suggested to interactive frontends: 1 GiB.
///
/// Published through [`TileStoreConfig::params_metadata`]; the value an
/// application actually configures is always authoritative.
pub const SUGGESTED_UI_MAX_SIZE: usize = 1024 * 1024 * 1024;

/// Texture store configuration.
///
/// The tracking flags gate per-operation debug traces and default to
/// off; they are diagnostics only and never change store behavior.
#[derive(Debug, Clone)]
pub struct TileStoreConfig {
    /// Memory budget in bytes (default: 256 MiB)
    pub max_size: usize,
    /// Trace every tile load (default: false)
    pub track_tile_loading: bool,
    /// Trace every tile unload (default: false)
    pub track_tile_unloading: bool,
    /// Trace store size against the budget after each load (default: false)
    pub track_store_size: bool,
}

impl Default for TileStoreConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            track_tile_loading: false,
            track_tile_unloading: false,
            track_store_size: false,
        }
    }
}

impl TileStoreConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the memory budget in bytes.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Enable or disable tile load tracing.
    pub fn with_track_tile_loading(mut self, enabled: bool) -> Self {
        self.track_tile_loading = enabled;
        self
    }

    /// Enable or disable tile unload tracing.
    pub fn with_track_tile_unloading(mut self, enabled: bool) -> Self {
        self.track_tile_unloading = enabled;
        self
    }

    /// Enable or disable store size tracing.
    pub fn with_track_store_size(mut self, enabled: bool) -> Self {
        self.track_store_size = enabled;
        self
    }

    /// Check the configuration for values the store cannot run with.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.max_size == 0 {
            return Err(StoreError::InvalidConfig(
                "max_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Metadata describing the configurable parameters, for host
    /// applications that build settings UIs.
    pub fn params_metadata() -> Vec<ParamMetadata> {
        vec![ParamMetadata {
            name: "max_size",
            param_type: "int",
            default_value: SUGGESTED_UI_MAX_SIZE.to_string(),
            label: "Texture Cache Size",
            help: "Texture cache size in bytes",
        }]
    }
}

/// Description of one configurable parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamMetadata {
    /// Parameter name as used in configuration
    pub name: &'static str,
    /// Value type ("int", "bool", ...)
    pub param_type: &'static str,
    /// Default value, rendered as a string
    pub default_value: String,
    /// Short human-readable label
    pub label: &'static str,
    /// One-line help text
    pub help: &'static str,
}
