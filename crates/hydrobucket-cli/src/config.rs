/// Parameter files.
///
/// ```toml
/// [parameters]
/// runoff_coefficient = 0.3
/// max_storage = 200.0
/// baseflow_coefficient = 0.1
/// catchment_area = 38.77e6
/// initial_storage = 50.0
/// # time_step = 1.0
/// ```
use std::fs;
use std::path::{Path, PathBuf};

use hydrobucket_core::{BucketError, Parameters};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse parameter file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] BucketError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParameterFile {
    parameters: Parameters,
}

/// Parse and validate a parameter file's contents.
pub fn parse_parameters(text: &str) -> Result<Parameters, ConfigError> {
    let file: ParameterFile = toml::from_str(text)?;
    file.parameters.validate()?;
    Ok(file.parameters)
}

pub fn load_parameters(path: &Path) -> Result<Parameters, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_parameters(&text)
}
