//! Configuration settings for the crossword solver

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub propagation: PropagationConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationConfig {
    /// Run AC-3 over every arc before the search starts
    pub arc_consistency: bool,
    /// Re-run AC-3 from each tentatively assigned slot during the search
    pub maintain_arc_consistency: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub variable_ordering: VariableOrdering,
    pub value_ordering: ValueOrdering,
    /// Explore the candidates of the first slot on the rayon pool
    pub parallel: bool,
    /// Zero disables the limit
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableOrdering {
    /// Fewest remaining values, then highest degree, then lowest slot id
    MrvDegree,
    /// Lowest unassigned slot id
    Static,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueOrdering {
    LeastConstraining,
    Alphabetical,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            arc_consistency: true,
            maintain_arc_consistency: false,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            variable_ordering: VariableOrdering::MrvDegree,
            value_ordering: ValueOrdering::LeastConstraining,
            parallel: false,
            timeout_seconds: 0,
        }
    }
}

impl SearchConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse settings from a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)
            .context("Invalid settings document")?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.propagation.maintain_arc_consistency && !self.propagation.arc_consistency {
            anyhow::bail!("maintain_arc_consistency requires arc_consistency to be enabled");
        }

        Ok(())
    }

    /// Apply caller-supplied overrides on top of loaded settings
    pub fn merge_with_overrides(&mut self, overrides: &SettingsOverrides) {
        if let Some(arc_consistency) = overrides.arc_consistency {
            self.propagation.arc_consistency = arc_consistency;
        }
        if let Some(mac) = overrides.maintain_arc_consistency {
            self.propagation.maintain_arc_consistency = mac;
        }
        if let Some(parallel) = overrides.parallel {
            self.search.parallel = parallel;
        }
        if let Some(timeout_seconds) = overrides.timeout_seconds {
            self.search.timeout_seconds = timeout_seconds;
        }
    }
}

/// Overrides layered on top of file-based settings
#[derive(Debug, Default)]
pub struct SettingsOverrides {
    pub arc_consistency: Option<bool>,
    pub maintain_arc_consistency: Option<bool>,
    pub parallel: Option<bool>,
    pub timeout_seconds: Option<u64>,
}
