use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::simulator::{Population, SimulationRequest, DEFAULT_MAX_PERIODS};

fn default_max_periods() -> u32 {
    DEFAULT_MAX_PERIODS
}

/// One side of a comparison as a user enters it: a country code, a starting
/// population and a growth rate in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contender {
    pub country: String,
    pub population: f64,
    pub growth_rate_percent: f64,
}

impl Contender {
    pub fn population(&self) -> Population {
        Population::from_percent(self.population, self.growth_rate_percent)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_max_periods")]
    pub max_periods: u32,
    /// The population expected to catch up.
    pub contender: Contender,
    /// The population expected to be overtaken.
    pub incumbent: Contender,
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    pub fn request(&self) -> SimulationRequest {
        SimulationRequest::new(self.contender.population(), self.incumbent.population())
    }

    pub fn max_periods(&self, override_periods: Option<u32>) -> u32 {
        override_periods.unwrap_or(self.max_periods)
    }
}
