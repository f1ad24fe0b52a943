//! Configuration loading and typed config structures for the Survival simulation.
//!
//! The configuration lives in `survival-config.yaml` in the working
//! directory. Every field has a default, so a missing file or a partial file
//! is fine. The turn rules themselves (restore and attrition percentages) are
//! constants in `survival-fauna` and are not configurable.

use std::path::Path;

use serde::Deserialize;

/// Environment variable that overrides `world.seed`.
pub const SEED_ENV_VAR: &str = "SURVIVAL_SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an impossible setup.
    #[error("invalid configuration: {message}")]
    Invalid {
        /// Description of the problem.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `survival-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, seed, pacing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Initial population parameters.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Simulation boundary parameters.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `SURVIVAL_SEED` overrides `world.seed` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `SURVIVAL_SEED` is not a `u64`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.world
            .apply_seed_override(std::env::var(SEED_ENV_VAR).ok().as_deref())
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.population.validate()
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable habitat name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducibility. `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Real-time milliseconds to wait between passes.
    #[serde(default = "default_pass_interval_ms")]
    pub pass_interval_ms: u64,
}

impl WorldConfig {
    /// Override the seed from a raw environment value, if present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the value is not a `u64`.
    pub fn apply_seed_override(&mut self, raw: Option<&str>) -> Result<(), ConfigError> {
        if let Some(raw) = raw {
            let seed = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                message: format!("{SEED_ENV_VAR}={raw:?} is not a valid seed: {e}"),
            })?;
            self.seed = Some(seed);
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: None,
            pass_interval_ms: default_pass_interval_ms(),
        }
    }
}

/// Initial population configuration.
///
/// Strength and speed are drawn independently and uniformly from the
/// closed ranges `[strength_min, strength_max]` and `[speed_min, speed_max]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PopulationConfig {
    /// Number of randomly generated animals at simulation start.
    #[serde(default = "default_initial_animals")]
    pub initial_animals: u32,

    /// Lowest birth strength.
    #[serde(default = "default_attribute_min")]
    pub strength_min: u32,

    /// Highest birth strength.
    #[serde(default = "default_attribute_max")]
    pub strength_max: u32,

    /// Lowest speed.
    #[serde(default = "default_attribute_min")]
    pub speed_min: u32,

    /// Highest speed.
    #[serde(default = "default_attribute_max")]
    pub speed_max: u32,

    /// An extra predator added after the random animals. `null` disables it.
    #[serde(default = "default_apex_predator")]
    pub apex_predator: Option<ApexPredatorConfig>,
}

impl PopulationConfig {
    /// Check that both attribute ranges are non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a minimum exceeds its maximum.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.strength_min > self.strength_max {
            return Err(ConfigError::Invalid {
                message: format!(
                    "population.strength_min ({}) exceeds strength_max ({})",
                    self.strength_min, self.strength_max
                ),
            });
        }
        if self.speed_min > self.speed_max {
            return Err(ConfigError::Invalid {
                message: format!(
                    "population.speed_min ({}) exceeds speed_max ({})",
                    self.speed_min, self.speed_max
                ),
            });
        }
        Ok(())
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_animals: default_initial_animals(),
            strength_min: default_attribute_min(),
            strength_max: default_attribute_max(),
            speed_min: default_attribute_min(),
            speed_max: default_attribute_max(),
            apex_predator: default_apex_predator(),
        }
    }
}

/// Fixed attributes of the apex predator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ApexPredatorConfig {
    /// Birth strength.
    pub strength: u32,
    /// Speed.
    pub speed: u32,
}

/// Simulation boundary configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum number of passes before the simulation ends (0 = unlimited).
    #[serde(default)]
    pub max_passes: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_world_name() -> String {
    String::from("Forest")
}

const fn default_pass_interval_ms() -> u64 {
    1000
}

const fn default_initial_animals() -> u32 {
    100
}

const fn default_attribute_min() -> u32 {
    25
}

const fn default_attribute_max() -> u32 {
    100
}

const fn default_apex_predator() -> Option<ApexPredatorConfig> {
    Some(ApexPredatorConfig {
        strength: 95,
        speed: 95,
    })
}

fn default_log_level() -> String {
    String::from("info")
}
