//! # Reconciler Configuration
//!
//! Provides configuration for a reconciliation pass.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! [`ReconcilerConfig`] holding every platform choice the core would otherwise
//! read from the ambient host. Validation is fail-fast: an inconsistent
//! configuration is rejected by [`ReconcilerConfigBuilder::build`] instead of
//! surfacing later as a wrong identity or a missed incompatibility.
//!
//! ## Settings
//!
//! - `platform` - Rules of the local filesystem (identity folding). Defaults
//!   to the host platform.
//! - `target_platform` - Rules checked by the incompatibility detector.
//!   Defaults to `platform`.
//! - `sync_path_separator` - Separator used by the sync root. Defaults to the
//!   preferred separator of `platform`.
//! - `detect_incompatibilities` - Whether the reconciler reports platform
//!   incompatibilities at all. Enabled by default.
//! - `logging` - [`LoggingConfig`] handed to
//!   [`init_logging`](crate::logging::init_logging).
//!
//! ## Usage
//!
//! ```
//! use bridge_traits::Platform;
//! use core_runtime::config::ReconcilerConfig;
//!
//! let config = ReconcilerConfig::builder()
//!     .platform(Platform::Linux)
//!     .target_platform(Platform::Windows)
//!     .build()
//!     .expect("valid config");
//!
//! assert_eq!(config.sync_path_separator, '/');
//! ```
//!
//! ## Error Handling
//!
//! ```should_panic
//! use core_runtime::config::ReconcilerConfig;
//!
//! // A sync root cannot use ':' as a separator
//! let config = ReconcilerConfig::builder()
//!     .sync_path_separator(':')
//!     .build()
//!     .expect("Should fail - invalid separator");
//! ```

use crate::error::{Error, Result};
use crate::logging::LoggingConfig;
use bridge_traits::Platform;

/// Separators a sync root may use
const ALLOWED_SEPARATORS: &[char] = &['/', '\\'];

/// Configuration for a reconciliation pass.
///
/// Use [`ReconcilerConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct ReconcilerConfig {
    /// Local filesystem rules
    pub platform: Platform,

    /// Rules of the platform entries must remain syncable to
    pub target_platform: Platform,

    /// Separator used by the sync root
    pub sync_path_separator: char,

    /// Report platform incompatibilities
    pub detect_incompatibilities: bool,

    /// Logging setup
    pub logging: LoggingConfig,
}

impl std::fmt::Debug for ReconcilerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReconcilerConfig")
            .field("platform", &self.platform)
            .field("target_platform", &self.target_platform)
            .field("sync_path_separator", &self.sync_path_separator)
            .field("detect_incompatibilities", &self.detect_incompatibilities)
            .field("logging", &self.logging.format)
            .finish()
    }
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        let platform = Platform::current();
        Self {
            platform,
            target_platform: platform,
            sync_path_separator: platform.separator(),
            detect_incompatibilities: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl ReconcilerConfig {
    /// Creates a new builder for constructing a `ReconcilerConfig`.
    pub fn builder() -> ReconcilerConfigBuilder {
        ReconcilerConfigBuilder::default()
    }

    /// Installs the global `tracing` subscriber described by `logging`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a global subscriber is already installed
    /// or the log filter does not parse.
    pub fn init_logging(&self) -> Result<()> {
        crate::logging::init_logging(self.logging.clone())
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - The sync path separator is `/` or `\`
    /// - A `\` separator is only used with Windows rules
    pub fn validate(&self) -> Result<()> {
        if !ALLOWED_SEPARATORS.contains(&self.sync_path_separator) {
            return Err(Error::Config(format!(
                "Sync path separator must be '/' or '\\', got {:?}",
                self.sync_path_separator
            )));
        }

        if self.sync_path_separator == '\\' && !self.platform.separators().contains(&'\\') {
            return Err(Error::Config(format!(
                "Sync path separator '\\' is not a separator on {}",
                self.platform
            )));
        }

        Ok(())
    }
}

/// Builder for constructing [`ReconcilerConfig`] instances.
#[derive(Default)]
pub struct ReconcilerConfigBuilder {
    platform: Option<Platform>,
    target_platform: Option<Platform>,
    sync_path_separator: Option<char>,
    detect_incompatibilities: Option<bool>,
    logging: Option<LoggingConfig>,
}

impl ReconcilerConfigBuilder {
    /// Sets the local filesystem rules.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Sets the rules checked by the incompatibility detector.
    pub fn target_platform(mut self, platform: Platform) -> Self {
        self.target_platform = Some(platform);
        self
    }

    /// Sets the separator used by the sync root.
    pub fn sync_path_separator(mut self, separator: char) -> Self {
        self.sync_path_separator = Some(separator);
        self
    }

    /// Enables or disables incompatibility detection.
    pub fn detect_incompatibilities(mut self, enabled: bool) -> Self {
        self.detect_incompatibilities = Some(enabled);
        self
    }

    /// Sets the logging configuration.
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when [`ReconcilerConfig::validate`] fails.
    pub fn build(self) -> Result<ReconcilerConfig> {
        let platform = self.platform.unwrap_or_else(Platform::current);

        let config = ReconcilerConfig {
            platform,
            target_platform: self.target_platform.unwrap_or(platform),
            sync_path_separator: self
                .sync_path_separator
                .unwrap_or_else(|| platform.separator()),
            detect_incompatibilities: self.detect_incompatibilities.unwrap_or(true),
            logging: self.logging.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogFormat;

    #[test]
    fn test_build_with_defaults() {
        let config = ReconcilerConfig::builder().build().unwrap();
        assert_eq!(config.platform, Platform::current());
        assert_eq!(config.target_platform, config.platform);
        assert_eq!(config.sync_path_separator, config.platform.separator());
        assert!(config.detect_incompatibilities);
    }

    #[test]
    fn test_target_platform_defaults_to_platform() {
        let config = ReconcilerConfig::builder()
            .platform(Platform::MacOs)
            .build()
            .unwrap();
        assert_eq!(config.target_platform, Platform::MacOs);
        assert_eq!(config.sync_path_separator, '/');
    }

    #[test]
    fn test_windows_defaults_to_backslash() {
        let config = ReconcilerConfig::builder()
            .platform(Platform::Windows)
            .build()
            .unwrap();
        assert_eq!(config.sync_path_separator, '\\');
    }

    #[test]
    fn test_validate_rejects_unknown_separator() {
        let result = ReconcilerConfig::builder().sync_path_separator(':').build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_backslash_on_unix() {
        let result = ReconcilerConfig::builder()
            .platform(Platform::Linux)
            .sync_path_separator('\\')
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_forward_slash_is_accepted_on_windows() {
        let config = ReconcilerConfig::builder()
            .platform(Platform::Windows)
            .sync_path_separator('/')
            .build()
            .unwrap();
        assert_eq!(config.sync_path_separator, '/');
    }

    #[test]
    fn test_builder_with_logging() {
        let config = ReconcilerConfig::builder()
            .logging(LoggingConfig::default().with_format(LogFormat::Compact))
            .detect_incompatibilities(false)
            .build()
            .unwrap();
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert!(!config.detect_incompatibilities);
    }

    #[test]
    fn test_config_is_cloneable() {
        let config = ReconcilerConfig::default();
        let cloned = config.clone();
        assert_eq!(cloned.platform, config.platform);
        assert!(format!("{:?}", cloned).contains("ReconcilerConfig"));
    }
}
