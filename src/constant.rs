use std::fmt;

use crate::constants::DEFAULT_CONSTANT_TX_CURRENT;
use crate::current_model::TxCurrentModel;
use crate::error::{check_current, ConfigError};

/// A transmit current model that ignores the transmit power.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantTxCurrentModel {
    tx_current: f64, // A
}

impl fmt::Display for ConstantTxCurrentModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ConstantTxCurrentModel {{ tx_current: {} A }}", self.tx_current)
    }
}

impl Default for ConstantTxCurrentModel {
    fn default() -> Self {
        Self {
            tx_current: DEFAULT_CONSTANT_TX_CURRENT,
        }
    }
}

impl ConstantTxCurrentModel {
    pub fn new(tx_current: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            tx_current: check_current("tx_current", tx_current)?,
        })
    }

    pub fn set_tx_current(&mut self, tx_current: f64) -> Result<(), ConfigError> {
        self.tx_current = check_current("tx_current", tx_current)?;
        Ok(())
    }

    pub fn tx_current(&self) -> f64 {
        self.tx_current
    }
}

impl TxCurrentModel for ConstantTxCurrentModel {
    fn calc_tx_current(&self, _tx_power_dbm: f64) -> f64 {
        self.tx_current
    }
}
