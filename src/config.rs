//! Configuration for a paginated table
//!
//! A `TableConfig` is passed explicitly into the controller. It can be built
//! in code or loaded from a YAML (or JSON) file.

use crate::error::{Error, Result};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Table Config
// ============================================================================

/// Complete configuration for one paginated table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Base URI that every page request is built from
    pub base_uri: String,

    /// Page marker window settings
    #[serde(default)]
    pub markers: MarkerConfig,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,
}

impl TableConfig {
    /// Create a config with default marker and HTTP settings
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            markers: MarkerConfig::default(),
            http: HttpConfig::default(),
        }
    }

    /// Replace the marker settings
    #[must_use]
    pub fn with_markers(mut self, markers: MarkerConfig) -> Self {
        self.markers = markers;
        self
    }

    /// Replace the HTTP settings
    #[must_use]
    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_uri.trim().is_empty() {
            return Err(Error::invalid_value("base_uri", "cannot be empty"));
        }

        let url = Url::parse(&self.base_uri)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_uri",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if url.cannot_be_a_base() {
            return Err(Error::invalid_value("base_uri", "must be a hierarchical URL"));
        }

        self.markers.validate()
    }
}

// ============================================================================
// Marker Config
// ============================================================================

/// Budget for visible page markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerConfig {
    /// Maximum number of page markers shown at once
    #[serde(default = "default_max_markers")]
    pub max_markers: usize,

    /// Markers shown on each side of the active page once the window recenters
    #[serde(default = "default_side_span")]
    pub side_span: usize,
}

fn default_max_markers() -> usize {
    11
}

fn default_side_span() -> usize {
    5
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            max_markers: default_max_markers(),
            side_span: default_side_span(),
        }
    }
}

impl MarkerConfig {
    /// Create a marker budget
    pub fn new(max_markers: usize, side_span: usize) -> Self {
        Self {
            max_markers,
            side_span,
        }
    }

    /// Validate the marker budget
    pub fn validate(&self) -> Result<()> {
        if self.max_markers == 0 {
            return Err(Error::invalid_value(
                "markers.max_markers",
                "must be at least 1",
            ));
        }
        let centered_width = self
            .side_span
            .checked_mul(2)
            .and_then(|width| width.checked_add(1))
            .ok_or_else(|| Error::invalid_value("markers.side_span", "is too large"))?;
        if centered_width > self.max_markers {
            return Err(Error::invalid_value(
                "markers.side_span",
                format!(
                    "a centered window of {} markers exceeds max_markers ({})",
                    centered_width, self.max_markers
                ),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of retries per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff strategy between retries
    #[serde(default)]
    pub backoff: BackoffType,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Requests per second (None disables rate limiting)
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: Option<u32>,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    100
}

fn default_max_backoff_ms() -> u64 {
    60_000
}

#[allow(clippy::unnecessary_wraps)]
fn default_requests_per_second() -> Option<u32> {
    Some(10)
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            backoff: BackoffType::default(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            requests_per_second: default_requests_per_second(),
            headers: HashMap::new(),
        }
    }
}

impl HttpConfig {
    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Initial backoff delay
    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    /// Maximum backoff delay
    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }

    /// Disable rate limiting
    #[must_use]
    pub fn without_rate_limit(mut self) -> Self {
        self.requests_per_second = None;
        self
    }

    /// Set max retries
    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set backoff configuration
    #[must_use]
    pub fn with_backoff(mut self, backoff: BackoffType, initial: Duration, max: Duration) -> Self {
        self.backoff = backoff;
        self.initial_backoff_ms = initial.as_millis() as u64;
        self.max_backoff_ms = max.as_millis() as u64;
        self
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load a table config from a YAML or JSON file
pub fn load_config(path: impl AsRef<Path>) -> Result<TableConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let config: TableConfig = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        _ => serde_yaml::from_str(&content)?,
    };

    config.validate()?;
    Ok(config)
}

/// Load a table config from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<TableConfig> {
    let config: TableConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}
