//! A whole generation call described as a TOML document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use toml::de::Error as TomlError;

use crate::area::AreaGenerator;
use crate::error::GenerationError;
use crate::mapgen::{DungeonMap, GeneratorConfig};
use crate::types::AreaTheme;

const DEFAULT_WIDTH: usize = 60;
const DEFAULT_HEIGHT: usize = 40;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid generation request: {0}")]
    Parse(#[from] TomlError),
}

/// Inputs for one [`AreaGenerator`] call.
///
/// ```toml
/// theme = "sewers"
/// width = 48
/// seed = 7
///
/// [generator]
/// algorithm = "cellular"
/// fill_probability = 0.4
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationRequest {
    #[serde(default)]
    pub theme: AreaTheme,
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default)]
    pub seed: u64,
    /// Overrides the generator bound to `theme` when present.
    #[serde(default)]
    pub generator: Option<GeneratorConfig>,
}

fn default_width() -> usize {
    DEFAULT_WIDTH
}

fn default_height() -> usize {
    DEFAULT_HEIGHT
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            theme: AreaTheme::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: 0,
            generator: None,
        }
    }
}

impl GenerationRequest {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }

    pub fn run(&self, areas: &AreaGenerator) -> Result<DungeonMap, GenerationError> {
        match &self.generator {
            Some(config) => {
                areas.generate_area_with(self.theme, config, self.width, self.height, self.seed)
            }
            None => areas.generate_area(self.theme, self.width, self.height, self.seed),
        }
    }
}
