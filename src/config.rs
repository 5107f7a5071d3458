use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::metrics::MAX_SWEEP_STEPS;
use crate::relativity::special::{C, PhysicalParams};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "relcalc.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub physics: PhysicsConfig,
    pub scenario: ScenarioConfig,
    pub sweep: SweepConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub rest_mass_kg: f64,
    pub speed_of_light: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            rest_mass_kg: 1.0,
            speed_of_light: C,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub proper_time_years: f64,
    pub proper_length_m: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            proper_time_years: 10.0,
            proper_length_m: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub steps: u32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self { steps: 100 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub metrics_csv: String,
    pub realtime_csv: String,
    pub plot: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            metrics_csv: "metrics.csv".to_string(),
            realtime_csv: "realtime.csv".to_string(),
            plot: "plot.png".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn metrics_csv_path(&self) -> PathBuf {
        self.dir.join(&self.metrics_csv)
    }

    pub fn realtime_csv_path(&self) -> PathBuf {
        self.dir.join(&self.realtime_csv)
    }

    pub fn plot_path(&self) -> PathBuf {
        self.dir.join(&self.plot)
    }
}

impl Config {
    /// Loads from `path`, or from [`DEFAULT_CONFIG_FILE`] when present, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(fallback)?
                } else {
                    tracing::debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.physical_params()?;
        if self.sweep.steps == 0 {
            bail!("sweep.steps must be at least 1");
        }
        if self.sweep.steps > MAX_SWEEP_STEPS {
            bail!("sweep.steps must be at most {MAX_SWEEP_STEPS}");
        }
        if !self.scenario.proper_time_years.is_finite() || !self.scenario.proper_length_m.is_finite()
        {
            bail!("scenario values must be finite");
        }
        Ok(())
    }

    pub fn physical_params(&self) -> Result<PhysicalParams> {
        PhysicalParams::new(self.physics.rest_mass_kg, self.physics.speed_of_light)
            .context("Invalid [physics] section")
    }
}
