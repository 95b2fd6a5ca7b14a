//! Configuration for conversion timing and browser setup.
//!
//! This module provides [`ConvertConfig`] and [`ConvertConfigBuilder`] for
//! configuring the timeouts, viewport, and Chrome binary location used by a
//! conversion run.
//!
//! The defaults reproduce the converter's historical behavior exactly: 60s
//! load timeout, 30s readiness timeout, 2000ms settle delay, 200ms readiness
//! poll interval, 1200×800 viewport. They exist as configuration so callers
//! embedding the library can tune them, but the CLI always runs with the
//! defaults (plus any environment overrides).
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use mermaid2pdf::ConvertConfigBuilder;
//!
//! let config = ConvertConfigBuilder::new()
//!     .load_timeout(Duration::from_secs(90))
//!     .settle_delay(Duration::from_millis(500))
//!     .build()
//!     .expect("Invalid configuration");
//!
//! assert_eq!(config.load_timeout, Duration::from_secs(90));
//! ```
//!
//! # Environment Configuration
//!
//! When the `env-config` feature is enabled, configuration can be loaded from
//! environment variables and an optional `app.env` file. See [`mod@env`].

use std::time::Duration;

/// Configuration for one conversion run.
///
/// Use [`ConvertConfigBuilder`] for validation and convenience.
///
/// # Fields Overview
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `viewport_width` | 1200 | Page viewport width (logical px) |
/// | `viewport_height` | 800 | Page viewport height (logical px) |
/// | `load_timeout` | 60s | Content load limit (fatal on expiry) |
/// | `ready_timeout` | 30s | Readiness-marker wait (advisory on expiry) |
/// | `ready_poll_interval` | 200ms | Marker polling frequency |
/// | `settle_delay` | 2s | Unconditional post-readiness delay |
/// | `chrome_path` | auto | Custom Chrome/Chromium binary path |
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Page viewport width in logical pixels.
    pub viewport_width: u32,

    /// Page viewport height in logical pixels.
    pub viewport_height: u32,

    /// Maximum time for content load (navigation or injected file content).
    ///
    /// Expiry is fatal for the run; the error is propagated, never retried.
    pub load_timeout: Duration,

    /// Maximum time to wait for the `data-mermaid-ready` marker.
    ///
    /// Expiry is advisory: the converter logs one warning and proceeds with
    /// best-effort rendering state. This tolerates pages that never set the
    /// marker (e.g. documents without embedded diagrams).
    pub ready_timeout: Duration,

    /// Interval between readiness-marker polls.
    pub ready_poll_interval: Duration,

    /// Unconditional delay after readiness resolves (or the warning fires).
    ///
    /// Compensates for rendering work not observable through the marker,
    /// such as font loading and layout settling.
    pub settle_delay: Duration,

    /// Custom Chrome/Chromium binary path. `None` means auto-detect.
    pub chrome_path: Option<String>,
}

impl Default for ConvertConfig {
    /// Defaults matching the converter's documented behavior.
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use mermaid2pdf::ConvertConfig;
    ///
    /// let config = ConvertConfig::default();
    /// assert_eq!(config.viewport_width, 1200);
    /// assert_eq!(config.viewport_height, 800);
    /// assert_eq!(config.load_timeout, Duration::from_secs(60));
    /// assert_eq!(config.ready_timeout, Duration::from_secs(30));
    /// assert_eq!(config.ready_poll_interval, Duration::from_millis(200));
    /// assert_eq!(config.settle_delay, Duration::from_millis(2000));
    /// assert!(config.chrome_path.is_none());
    /// ```
    fn default() -> Self {
        Self {
            viewport_width: 1200,
            viewport_height: 800,
            load_timeout: Duration::from_secs(60),
            ready_timeout: Duration::from_secs(30),
            ready_poll_interval: Duration::from_millis(200),
            settle_delay: Duration::from_millis(2000),
            chrome_path: None,
        }
    }
}

/// Builder for [`ConvertConfig`] with validation.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use mermaid2pdf::ConvertConfigBuilder;
///
/// let config = ConvertConfigBuilder::new()
///     .viewport(1920, 1080)
///     .ready_timeout(Duration::from_secs(10))
///     .build()
///     .expect("Invalid configuration");
/// ```
///
/// # Validation
///
/// The [`build()`](Self::build) method validates:
/// - viewport dimensions must be greater than 0
/// - `load_timeout` must be non-zero
/// - `ready_poll_interval` must be non-zero and no longer than `ready_timeout`
#[derive(Debug, Default)]
pub struct ConvertConfigBuilder {
    config: ConvertConfig,
}

impl ConvertConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self {
            config: ConvertConfig::default(),
        }
    }

    /// Set the viewport dimensions (both must be > 0).
    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self
    }

    /// Set the fatal content-load timeout.
    pub fn load_timeout(mut self, timeout: Duration) -> Self {
        self.config.load_timeout = timeout;
        self
    }

    /// Set the advisory readiness-marker timeout.
    pub fn ready_timeout(mut self, timeout: Duration) -> Self {
        self.config.ready_timeout = timeout;
        self
    }

    /// Set the readiness-marker poll interval.
    pub fn ready_poll_interval(mut self, interval: Duration) -> Self {
        self.config.ready_poll_interval = interval;
        self
    }

    /// Set the unconditional post-readiness settle delay.
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.config.settle_delay = delay;
        self
    }

    /// Set a custom Chrome/Chromium binary path.
    pub fn chrome_path(mut self, path: impl Into<String>) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns a descriptive `Err(String)` if any value is out of range.
    pub fn build(self) -> std::result::Result<ConvertConfig, String> {
        let config = self.config;

        if config.viewport_width == 0 || config.viewport_height == 0 {
            return Err("viewport dimensions must be greater than 0".to_string());
        }

        if config.load_timeout.is_zero() {
            return Err("load_timeout must be non-zero".to_string());
        }

        if config.ready_poll_interval.is_zero() {
            return Err("ready_poll_interval must be non-zero".to_string());
        }

        if config.ready_poll_interval > config.ready_timeout {
            return Err(format!(
                "ready_poll_interval ({:?}) must not exceed ready_timeout ({:?})",
                config.ready_poll_interval, config.ready_timeout
            ));
        }

        Ok(config)
    }
}

// ============================================================================
// Environment Configuration (feature-gated)
// ============================================================================

/// Environment-based configuration loading.
#[cfg(feature = "env-config")]
pub mod env {
    use super::*;
    use crate::error::ConvertError;

    /// Default environment file name.
    pub const ENV_FILE_NAME: &str = "app.env";

    /// Load environment variables from the `app.env` file.
    ///
    /// The file is optional; callers typically ignore a load failure and fall
    /// back to the process environment and defaults.
    pub fn load_env_file() -> std::result::Result<std::path::PathBuf, dotenvy::Error> {
        dotenvy::from_filename(ENV_FILE_NAME)
    }

    /// Read a custom Chrome binary path from the `CHROME_PATH` variable.
    pub fn chrome_path_from_env() -> Option<String> {
        std::env::var("CHROME_PATH").ok().filter(|s| !s.is_empty())
    }

    /// Load conversion configuration from environment variables.
    ///
    /// Also loads the `app.env` file if present (via `dotenvy`).
    ///
    /// # Environment Variables
    ///
    /// - `CONVERT_LOAD_TIMEOUT_SECONDS`: content load limit (default: 60)
    /// - `CONVERT_READY_TIMEOUT_SECONDS`: readiness-marker wait (default: 30)
    /// - `CONVERT_SETTLE_DELAY_MS`: post-readiness delay (default: 2000)
    /// - `CHROME_PATH`: custom Chrome binary path (default: auto-detect)
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Configuration`] if the resulting values fail
    /// builder validation.
    pub fn from_env() -> std::result::Result<ConvertConfig, ConvertError> {
        match load_env_file() {
            Ok(path) => {
                log::info!("Loaded configuration from: {:?}", path);
            }
            Err(e) => {
                log::debug!(
                    "No {} file found or failed to load: {} (using environment variables and defaults)",
                    ENV_FILE_NAME,
                    e
                );
            }
        }

        let defaults = ConvertConfig::default();

        let load_timeout_secs = std::env::var("CONVERT_LOAD_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.load_timeout.as_secs());

        let ready_timeout_secs = std::env::var("CONVERT_READY_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.ready_timeout.as_secs());

        let settle_delay_ms = std::env::var("CONVERT_SETTLE_DELAY_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.settle_delay.as_millis() as u64);

        let mut builder = ConvertConfigBuilder::new()
            .load_timeout(Duration::from_secs(load_timeout_secs))
            .ready_timeout(Duration::from_secs(ready_timeout_secs))
            .settle_delay(Duration::from_millis(settle_delay_ms));

        if let Some(path) = chrome_path_from_env() {
            log::debug!("Using Chrome binary from CHROME_PATH: {}", path);
            builder = builder.chrome_path(path);
        }

        builder.build().map_err(ConvertError::Configuration)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_documented_behavior() {
        let config = ConvertConfig::default();
        assert_eq!(config.viewport_width, 1200);
        assert_eq!(config.viewport_height, 800);
        assert_eq!(config.load_timeout, Duration::from_secs(60));
        assert_eq!(config.ready_timeout, Duration::from_secs(30));
        assert_eq!(config.ready_poll_interval, Duration::from_millis(200));
        assert_eq!(config.settle_delay, Duration::from_millis(2000));
        assert!(config.chrome_path.is_none());
    }

    #[test]
    fn test_builder_default_is_valid() {
        let result = ConvertConfigBuilder::new().build();
        assert!(result.is_ok(), "Default configuration should be valid");
    }

    #[test]
    fn test_builder_rejects_zero_viewport() {
        let result = ConvertConfigBuilder::new().viewport(0, 800).build();
        assert!(result.is_err());

        let result = ConvertConfigBuilder::new().viewport(1200, 0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_zero_load_timeout() {
        let result = ConvertConfigBuilder::new()
            .load_timeout(Duration::ZERO)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_poll_longer_than_ready_timeout() {
        let result = ConvertConfigBuilder::new()
            .ready_timeout(Duration::from_millis(100))
            .ready_poll_interval(Duration::from_millis(500))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_applies_overrides() {
        let config = ConvertConfigBuilder::new()
            .viewport(1920, 1080)
            .load_timeout(Duration::from_secs(90))
            .ready_timeout(Duration::from_secs(10))
            .settle_delay(Duration::from_millis(250))
            .chrome_path("/usr/bin/chromium")
            .build()
            .unwrap();

        assert_eq!(config.viewport_width, 1920);
        assert_eq!(config.viewport_height, 1080);
        assert_eq!(config.load_timeout, Duration::from_secs(90));
        assert_eq!(config.ready_timeout, Duration::from_secs(10));
        assert_eq!(config.settle_delay, Duration::from_millis(250));
        assert_eq!(config.chrome_path.as_deref(), Some("/usr/bin/chromium"));
    }
}
