//! Configuration file management.
//!
//! An optional TOML file supplies defaults for any flag:
//!
//! ```toml
//! template = '{{ if hasPrefix .Value "ssm:" }}{{ trimPrefix .Value "ssm:" }}{{ end }}'
//! with_decryption = true
//! no_fail = false
//! batch_size = 5
//! ```
//!
//! Command-line flags and their environment variables take precedence.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::core::batch::BatchSize;
use crate::core::constants::{DEFAULT_BATCH_SIZE, DEFAULT_TEMPLATE};
use crate::core::engine::Options;
use crate::core::resolver::ErrorPolicy;
use crate::error::{ConfigError, Result};

/// Contents of a config file. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub template: Option<String>,
    pub with_decryption: Option<bool>,
    pub no_fail: Option<bool>,
    pub batch_size: Option<i64>,
}

impl FileConfig {
    /// Load and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse`.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let display = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: display.clone(),
            source,
        })?;
        Self::parse(&contents, &display)
    }

    fn parse(contents: &str, path: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|source| {
            ConfigError::Parse {
                path: path.to_string(),
                source,
            }
            .into()
        })
    }
}

/// Values given on the command line (or through their environment variables).
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub template: Option<String>,
    pub with_decryption: bool,
    pub no_fail: bool,
    pub batch_size: Option<i64>,
}

/// Effective settings after merging flags, file and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub template: String,
    pub with_decryption: bool,
    pub no_fail: bool,
    pub batch_size: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            with_decryption: false,
            no_fail: false,
            batch_size: DEFAULT_BATCH_SIZE as i64,
        }
    }
}

impl Settings {
    /// Merge command-line values over file values over defaults.
    ///
    /// Switches are enabled if either source enables them.
    pub fn merge(overrides: Overrides, file: FileConfig) -> Self {
        let defaults = Self::default();
        Self {
            template: overrides
                .template
                .or(file.template)
                .unwrap_or(defaults.template),
            with_decryption: overrides.with_decryption || file.with_decryption.unwrap_or(false),
            no_fail: overrides.no_fail || file.no_fail.unwrap_or(false),
            batch_size: overrides
                .batch_size
                .or(file.batch_size)
                .unwrap_or(defaults.batch_size),
        }
    }

    /// Validate and convert into engine options.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBatchSize` if the batch size is out of range.
    pub fn options(&self) -> Result<Options> {
        Ok(Options {
            decrypt: self.with_decryption,
            policy: ErrorPolicy::from_no_fail(self.no_fail),
            batch_size: BatchSize::new(self.batch_size)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_defaults() {
        let s = Settings::merge(Overrides::default(), FileConfig::default());
        assert_eq!(s, Settings::default());
        assert_eq!(s.template, DEFAULT_TEMPLATE);
        assert_eq!(s.batch_size, 10);
    }

    #[test]
    fn test_flags_win_over_file() {
        let file = FileConfig {
            template: Some("{{ .Name }}".into()),
            batch_size: Some(3),
            ..FileConfig::default()
        };
        let flags = Overrides {
            batch_size: Some(5),
            ..Overrides::default()
        };
        let s = Settings::merge(flags, file);
        assert_eq!(s.template, "{{ .Name }}");
        assert_eq!(s.batch_size, 5);
    }

    #[test]
    fn test_switches_combine() {
        let file = FileConfig {
            no_fail: Some(true),
            ..FileConfig::default()
        };
        let flags = Overrides {
            with_decryption: true,
            ..Overrides::default()
        };
        let s = Settings::merge(flags, file);
        assert!(s.with_decryption);
        assert!(s.no_fail);
        assert_eq!(s.options().unwrap().policy, ErrorPolicy::Tolerant);
    }

    #[test]
    fn test_parse_file() {
        let parsed =
            FileConfig::parse("batch_size = 4\nwith_decryption = true\n", "t.toml").unwrap();
        assert_eq!(parsed.batch_size, Some(4));
        assert_eq!(parsed.with_decryption, Some(true));
        assert_eq!(parsed.template, None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = FileConfig::parse("batchsize = 4\n", "t.toml").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_invalid_batch_size() {
        let s = Settings {
            batch_size: 0,
            ..Settings::default()
        };
        assert!(matches!(
            s.options(),
            Err(Error::Config(ConfigError::InvalidBatchSize { size: 0, .. }))
        ));
    }

    #[test]
    fn test_negative_batch_size() {
        let parsed = FileConfig::parse("batch_size = -1\n", "t.toml").unwrap();
        let s = Settings::merge(Overrides::default(), parsed);
        let err = s.options().unwrap_err();
        assert_eq!(err.to_string(), "invalid batch size -1: must be between 1 and 10");
    }

    #[test]
    fn test_load_missing_file() {
        let err = FileConfig::load(Path::new("/nonexistent/ssm-env.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ReadFile { .. })));
    }
}
