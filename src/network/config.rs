use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How many `train` calls pass between two surfaced error samples.
pub const DEFAULT_LOG_FREQUENCY: usize = 20_000;

/// Controls the periodic error sample emitted by `Network::train`.
///
/// - `enabled`   — when `false`, no sample is ever logged
/// - `frequency` — one sample per `frequency` training calls; must be ≥ 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_frequency")]
    pub frequency: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_frequency() -> usize {
    DEFAULT_LOG_FREQUENCY
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        DiagnosticsConfig {
            enabled: default_enabled(),
            frequency: default_frequency(),
        }
    }
}

impl DiagnosticsConfig {
    pub fn disabled() -> Self {
        DiagnosticsConfig {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn every(frequency: usize) -> Self {
        DiagnosticsConfig {
            enabled: true,
            frequency,
        }
    }
}

/// Layer sizes plus construction-time options for a `Network`.
///
/// Can be stored as JSON ahead of training; it never carries learned weights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub num_inputs: usize,
    pub num_hidden: usize,
    pub num_outputs: usize,
    /// Seed for weight initialization. `None` draws from the thread RNG.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl NetworkConfig {
    pub fn new(num_inputs: usize, num_hidden: usize, num_outputs: usize) -> Self {
        NetworkConfig {
            num_inputs,
            num_hidden,
            num_outputs,
            seed: None,
            diagnostics: DiagnosticsConfig::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: DiagnosticsConfig) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.diagnostics.frequency == 0 {
            return Err(Error::Config(
                "diagnostics.frequency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads and validates a config previously written by `save_json`.
    pub fn load_json(path: &str) -> Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: NetworkConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}
