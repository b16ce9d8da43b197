//! Relay configuration: which binary to run and with which arguments

use log::debug;
use relay_core::{RelayError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::args::ArgumentVector;

/// Binary used when neither the build nor the environment names one.
pub const DEFAULT_BINARY: &str = "../preproc/ecpg";

/// Runtime override for [`RelayConfig::binary`].
pub const BINARY_ENV: &str = "ECPG_BINARY";

fn default_binary() -> PathBuf {
    PathBuf::from(option_env!("ECPG_BINARY_PATH").unwrap_or(DEFAULT_BINARY))
}

/// Relay configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Program spawned for every run
    pub binary: PathBuf,
    /// Flag introducing the compatibility mode
    pub mode_flag: String,
    /// Compatibility mode name passed after `mode_flag`
    pub compat_mode: String,
    /// Input file for the plain variant
    pub plain_input: String,
    /// Input file for the informix variant
    pub informix_input: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            mode_flag: "-C".to_string(),
            compat_mode: "INFORMIX".to_string(),
            plain_input: "preproc/notice.pgc".to_string(),
            informix_input: "preproc/notice_informix.pgc".to_string(),
        }
    }
}

impl RelayConfig {
    /// Load from a JSON file; absent fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let config: RelayConfig = serde_json::from_str(&raw).map_err(|e| {
            RelayError::InvalidConfig(format!("{}: {}", path.display(), e))
        })?;
        debug!("Loaded relay config from {}", path.display());
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(binary) = lookup(BINARY_ENV).filter(|value| !value.is_empty()) {
            debug!("Overriding binary from {}: {}", BINARY_ENV, binary);
            self.binary = PathBuf::from(binary);
        }
        self
    }

    /// Reject empty values before anything is spawned.
    pub fn validate(&self) -> Result<()> {
        if self.binary.as_os_str().is_empty() {
            return Err(RelayError::InvalidConfig(
                "binary path cannot be empty".to_string(),
            ));
        }

        let fields = [
            ("mode_flag", &self.mode_flag),
            ("compat_mode", &self.compat_mode),
            ("plain_input", &self.plain_input),
            ("informix_input", &self.informix_input),
        ];
        for (name, value) in fields {
            if value.is_empty() {
                return Err(RelayError::InvalidConfig(format!(
                    "{} cannot be empty",
                    name
                )));
            }
        }

        Ok(())
    }
}

/// The ways the harness invokes the relayed program
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExecVariant {
    /// Input file only
    Plain,
    /// Compatibility mode flags, then the input file
    Informix,
}

impl ExecVariant {
    /// Argument vector for this variant; `input` replaces the configured file.
    pub fn arguments(&self, config: &RelayConfig, input: Option<&str>) -> ArgumentVector {
        match self {
            ExecVariant::Plain => {
                ArgumentVector::single(input.unwrap_or(&config.plain_input))
            }
            ExecVariant::Informix => ArgumentVector::with_mode(
                config.mode_flag.as_str(),
                config.compat_mode.as_str(),
                input.unwrap_or(&config.informix_input),
            ),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ExecVariant::Plain => "Run the preprocessor on the input file",
            ExecVariant::Informix => "Run the preprocessor in INFORMIX compatibility mode",
        }
    }

    pub fn all() -> [ExecVariant; 2] {
        [ExecVariant::Plain, ExecVariant::Informix]
    }
}
