use std::fs;

use serde::Deserialize;
use tracing::{debug, info};

use crate::constants::{DEFAULT_CONSTANT_TX_CURRENT, DEFAULT_ETA, DEFAULT_STANDBY_CURRENT, DEFAULT_VOLTAGE};
use crate::error::Error;
use crate::report::{Sweep, Transition};
use crate::{ConstantTxCurrentModel, CurrentModel, LinearTxCurrentModel, Sx1272CurrentModel};

/// Contents of a TOML config file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub model: ModelConfig,
    #[serde(default)]
    pub transitions: Vec<Transition>,
    pub sweep: Option<Sweep>,
}

/// A current model and its attributes. Missing attributes take the model
/// defaults.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelConfig {
    Linear {
        #[serde(default = "default_eta")]
        eta: f64,
        #[serde(default = "default_voltage")]
        voltage: f64,
        #[serde(default = "default_standby_current")]
        standby_current: f64,
    },
    Constant {
        #[serde(default = "default_constant_tx_current")]
        tx_current: f64,
    },
    Sx1272 {
        voltage: Option<f64>,
        idle_current: Option<f64>,
        sleep_current: Option<f64>,
        tx_current: Option<f64>,
        tx_power_to_tx_current: Option<f64>,
        rx_current: Option<f64>,
        use_pa_boost: Option<bool>,
        use_lna_boost: Option<bool>,
    },
}

fn default_eta() -> f64 {
    DEFAULT_ETA
}

fn default_voltage() -> f64 {
    DEFAULT_VOLTAGE
}

fn default_standby_current() -> f64 {
    DEFAULT_STANDBY_CURRENT
}

fn default_constant_tx_current() -> f64 {
    DEFAULT_CONSTANT_TX_CURRENT
}

impl ModelConfig {
    /// Validates the attributes and builds the model.
    pub fn build(&self) -> Result<CurrentModel, Error> {
        let model: CurrentModel = match *self {
            ModelConfig::Linear {
                eta,
                voltage,
                standby_current,
            } => LinearTxCurrentModel::new(eta, voltage, standby_current)?.into(),
            ModelConfig::Constant { tx_current } => ConstantTxCurrentModel::new(tx_current)?.into(),
            ModelConfig::Sx1272 {
                voltage,
                idle_current,
                sleep_current,
                tx_current,
                tx_power_to_tx_current,
                rx_current,
                use_pa_boost,
                use_lna_boost,
            } => {
                let mut builder = Sx1272CurrentModel::builder();
                if let Some(voltage) = voltage {
                    builder = builder.voltage(voltage);
                }
                if let Some(idle_current) = idle_current {
                    builder = builder.idle_current(idle_current);
                }
                if let Some(sleep_current) = sleep_current {
                    builder = builder.sleep_current(sleep_current);
                }
                if let Some(tx_current) = tx_current {
                    builder = builder.tx_current(tx_current);
                }
                if let Some(tx_power_dbm) = tx_power_to_tx_current {
                    builder = builder.tx_power_dbm(tx_power_dbm);
                }
                if let Some(rx_current) = rx_current {
                    builder = builder.rx_current(rx_current);
                }
                if let Some(use_pa_boost) = use_pa_boost {
                    builder = builder.pa_boost(use_pa_boost);
                }
                if let Some(use_lna_boost) = use_lna_boost {
                    builder = builder.lna_boost(use_lna_boost);
                }
                builder.build()?.into()
            }
        };
        debug!("built model: {}", model);
        Ok(model)
    }
}

/// Parses a config and checks the sweep range; the model itself is validated
/// by [`ModelConfig::build`].
pub fn parse_config(content: &str) -> Result<Config, Error> {
    let config: Config = toml::from_str(content)?;
    if let Some(sweep) = &config.sweep {
        sweep.validate()?;
    }
    Ok(config)
}

pub fn load_config(path: &str) -> Result<Config, Error> {
    info!("Loading Config: {}", path);
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_string(),
        source,
    })?;
    let config = parse_config(&content)?;
    debug!("Config: {:#?}", config);
    Ok(config)
}
