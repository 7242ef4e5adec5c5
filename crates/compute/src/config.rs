//! Per-kernel configuration.
//!
//! The only knob is whether the kernel logs its `fc: N=..` diagnostic line.
//! Hosts that cannot pass a config (the C entry point) read it from the
//! environment with [`KernelConfig::from_env`].

use crate::ComputeError;

/// Environment variable that switches the diagnostic line on or off.
pub const VERBOSE_ENV: &str = "FC_VERBOSE";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KernelConfig {
    /// Emit one `fc: N=.. a[0]=.. b[0]=..` line per call.
    pub diagnostics: bool,
}

impl KernelConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self { diagnostics: false }
    }

    #[must_use]
    pub const fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Reads the configuration from the process environment.
    ///
    /// An unset `FC_VERBOSE` keeps the default.
    ///
    /// # Errors
    ///
    /// Returns `ComputeError::InvalidConfig` when `FC_VERBOSE` is set to
    /// something other than a recognised boolean.
    pub fn from_env() -> Result<Self, ComputeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`KernelConfig::from_env`] with an injectable variable lookup.
    ///
    /// # Errors
    ///
    /// See [`KernelConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ComputeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(VERBOSE_ENV) {
            config.diagnostics = parse_flag(VERBOSE_ENV, &value)?;
        }
        Ok(config)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ComputeError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "" | "0" | "false" | "off" | "no" => Ok(false),
        other => Err(ComputeError::InvalidConfig(format!(
            "{key}={other} is not a boolean"
        ))),
    }
}
