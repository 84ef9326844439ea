use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::services::simulation_types::SimulationConfig;

#[derive(Error, Debug)]
pub enum ConfigYamlError {
    #[error("failed to read config yaml file {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("failed to parse config yaml file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigRecord {
    days: Option<usize>,
    workers: Option<usize>,
    iterations: Option<usize>,
    low: Option<f64>,
    high: Option<f64>,
    integer_only: Option<bool>,
    seed: Option<u64>,
    fixed_roll: Option<f64>,
}

/// Loads a simulation config from YAML. Every field is optional; missing
/// fields keep the values of [`SimulationConfig::default`].
///
/// ```yaml
/// days: 10
/// workers: 6
/// iterations: 100
/// low: 1
/// high: 6
/// integer_only: true
/// seed: 7
/// ```
pub fn load_simulation_config_from_yaml_file<P: AsRef<Path>>(
    path: P,
) -> Result<SimulationConfig, ConfigYamlError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigYamlError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    deserialize_simulation_config_from_yaml_str(&contents, path)
}

fn deserialize_simulation_config_from_yaml_str(
    contents: &str,
    path: &Path,
) -> Result<SimulationConfig, ConfigYamlError> {
    // An empty document deserializes to nothing rather than an empty map.
    let record: ConfigRecord = if contents.trim().is_empty() {
        ConfigRecord::default()
    } else {
        serde_yaml::from_str(contents).map_err(|source| ConfigYamlError::Parse {
            path: path.to_path_buf(),
            source,
        })?
    };
    Ok(apply_record(SimulationConfig::default(), record))
}

fn apply_record(mut config: SimulationConfig, record: ConfigRecord) -> SimulationConfig {
    if let Some(days) = record.days {
        config.days = days;
    }
    if let Some(workers) = record.workers {
        config.workers = workers;
    }
    if let Some(iterations) = record.iterations {
        config.iterations = iterations;
    }
    if let Some(low) = record.low {
        config.roll_range.low = low;
    }
    if let Some(high) = record.high {
        config.roll_range.high = high;
    }
    if let Some(integer_only) = record.integer_only {
        config.roll_range.integer_only = integer_only;
    }
    config.seed = record.seed.or(config.seed);
    config.fixed_roll = record.fixed_roll.or(config.fixed_roll);
    config
}
