//! Configuration settings for the backtracking search engine

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub search: SearchConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Knobs shared by every search run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Deepest recursion allowed before the run fails with stack exhaustion.
    /// The recursion runs on threads whose stack is sized from this value,
    /// so the limit is reached before the real stack is.
    pub max_depth: usize,
    /// Stop a collect-all search once this many solutions are recorded.
    #[serde(default)]
    pub max_solutions: Option<usize>,
    /// Explore the root frame's branches on a rayon pool.
    #[serde(default)]
    pub parallel: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 0 = info, 1 = debug, 2+ = trace
    pub verbosity: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 10_000,
            max_solutions: None,
            parallel: false,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Text,
                save: false,
                output_directory: PathBuf::from("output/solutions"),
            },
            logging: LoggingConfig { verbosity: 0 },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
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
        if self.search.max_depth == 0 {
            anyhow::bail!("Maximum search depth must be positive");
        }

        if self.search.max_solutions == Some(0) {
            anyhow::bail!("Maximum solutions must be positive when set");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(max_depth) = cli_overrides.max_depth {
            self.search.max_depth = max_depth;
        }
        if let Some(max_solutions) = cli_overrides.max_solutions {
            self.search.max_solutions = Some(max_solutions);
        }
        if cli_overrides.parallel {
            self.search.parallel = true;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
            self.output.save = true;
        }
        if cli_overrides.verbosity > 0 {
            self.logging.verbosity = cli_overrides.verbosity;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub max_depth: Option<usize>,
    pub max_solutions: Option<usize>,
    pub parallel: bool,
    pub format: Option<OutputFormat>,
    pub output_dir: Option<PathBuf>,
    pub verbosity: u8,
}
