//! Configuration settings for the Game of Life canvas

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CELL_SIZE: u32 = 5;
pub const DEFAULT_MARGIN: u32 = 1;
pub const DEFAULT_FRAMES_PER_STEP: u32 = 4;
pub const DEFAULT_INITIAL_DENSITY: f64 = 0.3;
pub const DEFAULT_EDGE_DENSITY: f64 = 0.3;
pub const DEFAULT_FRAME_RATE: u32 = 60;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub display: DisplayConfig,
    pub simulation: SimulationConfig,
    pub overlay: OverlayConfig,
    pub runtime: RuntimeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Side length of one cell in raster pixels
    pub cell_size: u32,
    /// Gap in pixels on the leading edge of every cell
    pub margin: u32,
    /// Visible columns, derived from the terminal when unset
    pub columns: Option<usize>,
    /// Visible rows, derived from the terminal when unset
    pub rows: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub frames_per_step: u32,
    /// Seed the world randomly instead of starting empty
    pub populate: bool,
    pub initial_density: f64,
    pub randomize_edges: bool,
    pub edge_density: f64,
    pub backend: BackendKind,
    pub seed: Option<u64>,
    pub pattern: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[default]
    Cpu,
    Parallel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub clock: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub frame_rate: u32,
    pub max_frames: Option<u64>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            margin: DEFAULT_MARGIN,
            columns: None,
            rows: None,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frames_per_step: DEFAULT_FRAMES_PER_STEP,
            populate: false,
            initial_density: DEFAULT_INITIAL_DENSITY,
            randomize_edges: true,
            edge_density: DEFAULT_EDGE_DENSITY,
            backend: BackendKind::Cpu,
            seed: None,
            pattern: None,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            max_frames: None,
        }
    }
}

/// A malformed configuration value that was replaced by its default
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigIssue {
    #[error("cell_size must be positive, using {}", DEFAULT_CELL_SIZE)]
    ZeroCellSize,
    #[error("margin {margin} must be smaller than cell_size {cell_size}, using {fallback}")]
    MarginTooLarge { margin: u32, cell_size: u32, fallback: u32 },
    #[error("frames_per_step must be positive, using {}", DEFAULT_FRAMES_PER_STEP)]
    ZeroFramesPerStep,
    #[error("frame_rate must be positive, using {}", DEFAULT_FRAME_RATE)]
    ZeroFrameRate,
    #[error("{field} = {value} is not a probability, using {fallback}")]
    InvalidProbability { field: &'static str, value: f64, fallback: f64 },
    #[error("{field} must be positive, ignoring it")]
    ZeroDimension { field: &'static str },
    #[error("{field} = {value} is malformed, using the default")]
    MalformedValue { field: String, value: String },
}

fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

impl Settings {
    /// Load settings from a YAML or JSON file, chosen by extension
    ///
    /// Only a syntax error fails the whole file. A value of the wrong type
    /// keeps its default, is logged, and leaves the other values in place.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let value: Value = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
            _ => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
        };

        let (settings, issues) = Self::from_value(value)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        for issue in &issues {
            warn!("{}", issue);
        }

        Ok(settings)
    }

    /// Build settings from a parsed document one field at a time
    ///
    /// Each `section.field` is accepted only if the settings still deserialize
    /// with it; rejected fields are reported and keep their defaults.
    pub fn from_value(value: Value) -> Result<(Self, Vec<ConfigIssue>)> {
        let sections = match value {
            Value::Null => return Ok((Self::default(), Vec::new())),
            Value::Object(sections) => sections,
            other => anyhow::bail!("expected a map of sections, found {}", other),
        };

        let mut accepted = serde_json::to_value(Self::default()).context("Failed to serialize settings")?;
        let mut issues = Vec::new();

        for (section, fields) in sections {
            let fields = match fields {
                Value::Null => continue,
                Value::Object(fields) => fields,
                other => {
                    issues.push(ConfigIssue::MalformedValue {
                        field: section,
                        value: other.to_string(),
                    });
                    continue;
                }
            };

            for (field, value) in fields {
                let mut candidate = accepted.clone();
                candidate[section.as_str()][field.as_str()] = value.clone();

                if serde_json::from_value::<Self>(candidate.clone()).is_ok() {
                    accepted = candidate;
                } else {
                    issues.push(ConfigIssue::MalformedValue {
                        field: format!("{}.{}", section, field),
                        value: value.to_string(),
                    });
                }
            }
        }

        let settings = serde_json::from_value(accepted).context("Failed to build settings")?;
        Ok((settings, issues))
    }

    /// Load settings, falling back to defaults when the file is missing or broken
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            warn!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }

        Self::from_file(path).unwrap_or_else(|e| {
            warn!("{:#}, using defaults", e);
            Self::default()
        })
    }

    /// Save settings to a YAML or JSON file, chosen by extension
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::to_string_pretty(self).context("Failed to serialize settings")?,
            _ => serde_yaml::to_string(self).context("Failed to serialize settings")?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Replace malformed values with their defaults, returning what was changed
    pub fn sanitize(&mut self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let display = &mut self.display;
        if display.cell_size == 0 {
            display.cell_size = DEFAULT_CELL_SIZE;
            issues.push(ConfigIssue::ZeroCellSize);
        }
        if display.margin >= display.cell_size {
            let fallback = DEFAULT_MARGIN.min(display.cell_size - 1);
            issues.push(ConfigIssue::MarginTooLarge {
                margin: display.margin,
                cell_size: display.cell_size,
                fallback,
            });
            display.margin = fallback;
        }
        if display.columns == Some(0) {
            display.columns = None;
            issues.push(ConfigIssue::ZeroDimension { field: "columns" });
        }
        if display.rows == Some(0) {
            display.rows = None;
            issues.push(ConfigIssue::ZeroDimension { field: "rows" });
        }

        let simulation = &mut self.simulation;
        if simulation.frames_per_step == 0 {
            simulation.frames_per_step = DEFAULT_FRAMES_PER_STEP;
            issues.push(ConfigIssue::ZeroFramesPerStep);
        }
        for (field, value, fallback) in [
            ("initial_density", &mut simulation.initial_density, DEFAULT_INITIAL_DENSITY),
            ("edge_density", &mut simulation.edge_density, DEFAULT_EDGE_DENSITY),
        ] {
            if !is_probability(*value) {
                issues.push(ConfigIssue::InvalidProbability { field, value: *value, fallback });
                *value = fallback;
            }
        }

        if self.runtime.frame_rate == 0 {
            self.runtime.frame_rate = DEFAULT_FRAME_RATE;
            issues.push(ConfigIssue::ZeroFrameRate);
        }

        for issue in &issues {
            warn!("{}", issue);
        }

        issues
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(cell_size) = cli_overrides.cell_size {
            self.display.cell_size = cell_size;
        }
        if let Some(margin) = cli_overrides.margin {
            self.display.margin = margin;
        }
        if let Some(columns) = cli_overrides.columns {
            self.display.columns = Some(columns);
        }
        if let Some(rows) = cli_overrides.rows {
            self.display.rows = Some(rows);
        }
        if let Some(frames_per_step) = cli_overrides.frames_per_step {
            self.simulation.frames_per_step = frames_per_step;
        }
        if cli_overrides.populate {
            self.simulation.populate = true;
        }
        if let Some(density) = cli_overrides.initial_density {
            self.simulation.initial_density = density;
        }
        if cli_overrides.still_edges {
            self.simulation.randomize_edges = false;
        }
        if let Some(backend) = cli_overrides.backend {
            self.simulation.backend = backend;
        }
        if let Some(seed) = cli_overrides.seed {
            self.simulation.seed = Some(seed);
        }
        if let Some(ref pattern) = cli_overrides.pattern {
            self.simulation.pattern = Some(pattern.clone());
        }
        if cli_overrides.clock {
            self.overlay.clock = true;
        }
        if let Some(frame_rate) = cli_overrides.frame_rate {
            self.runtime.frame_rate = frame_rate;
        }
        if let Some(max_frames) = cli_overrides.max_frames {
            self.runtime.max_frames = Some(max_frames);
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub cell_size: Option<u32>,
    pub margin: Option<u32>,
    pub columns: Option<usize>,
    pub rows: Option<usize>,
    pub frames_per_step: Option<u32>,
    pub populate: bool,
    pub initial_density: Option<f64>,
    pub still_edges: bool,
    pub backend: Option<BackendKind>,
    pub seed: Option<u64>,
    pub pattern: Option<PathBuf>,
    pub clock: bool,
    pub frame_rate: Option<u32>,
    pub max_frames: Option<u64>,
}
