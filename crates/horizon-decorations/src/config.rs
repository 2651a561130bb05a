//! Decoration configuration.
//!
//! Metrics of the native window controls and the defaults applied to newly
//! created title bars can be loaded from TOML:
//!
//! ```toml
//! [metrics]
//! windows_button_width = 46.0
//! macos_controls_width = 70.0
//!
//! [title_bar]
//! height = 32.0
//!
//! [title_bar.properties]
//! "controls.dark" = true
//! "controls.background.hovered" = "#2A2A2AFF"
//! ```
//!
//! Every section and field is optional; missing values fall back to
//! [`DecorationConfig::default`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DecorationError, DecorationResult};
use crate::logging::targets;
use crate::property::{PropertyKey, PropertyValue};

/// Top-level decoration configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationConfig {
    /// Native control metrics used to derive title bar insets.
    pub metrics: ControlsMetrics,
    /// Defaults applied to each new title bar.
    pub title_bar: TitleBarDefaults,
}

/// Sizes of the native window controls, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsMetrics {
    /// Width of a single caption button on Windows.
    pub windows_button_width: f32,
    /// Width of the traffic-light block on macOS, including its padding.
    pub macos_controls_width: f32,
}

impl Default for ControlsMetrics {
    fn default() -> Self {
        Self {
            windows_button_width: 46.0,
            macos_controls_width: 70.0,
        }
    }
}

/// Defaults for newly created title bars.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleBarDefaults {
    /// Initial height. When unset, title bars start at 0 and must be given a
    /// height before they can be attached.
    pub height: Option<f32>,
    /// Initial properties, keyed by their string names.
    pub properties: BTreeMap<String, PropertyValue>,
}

impl DecorationConfig {
    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml_str(source: &str) -> DecorationResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> DecorationResult<Self> {
        let path = path.as_ref();
        tracing::debug!(
            target: targets::CONFIG,
            path = %path.display(),
            "loading decoration config"
        );
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> DecorationResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Check all values against the same rules the runtime API enforces.
    pub fn validate(&self) -> DecorationResult<()> {
        let metrics = &self.metrics;
        for (name, value) in [
            ("metrics.windows_button_width", metrics.windows_button_width),
            ("metrics.macos_controls_width", metrics.macos_controls_width),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(DecorationError::invalid_argument(
                    name,
                    format!("must be a finite number >= 0, got {value}"),
                ));
            }
        }

        if let Some(height) = self.title_bar.height
            && !(height.is_finite() && height > 0.0)
        {
            return Err(DecorationError::invalid_argument(
                "title_bar.height",
                format!("must be > 0, got {height}"),
            ));
        }

        for (key, value) in &self.title_bar.properties {
            key.parse::<PropertyKey>()?.validate(value)?;
        }

        Ok(())
    }
}
