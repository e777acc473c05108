use std::fmt;

use crate::constants::{DEFAULT_ETA, DEFAULT_STANDBY_CURRENT, DEFAULT_VOLTAGE, MILLIWATTS_PER_WATT};
use crate::current_model::TxCurrentModel;
use crate::error::{check_current, check_voltage, ConfigError};

/// Linear model of the transmit current, derived from the power amplifier
/// efficiency and the supply voltage.
///
/// `I = P_W / (V * eta) + I_standby`
#[derive(Clone, Debug, PartialEq)]
pub struct LinearTxCurrentModel {
    eta: f64,
    voltage: f64,
    standby_current: f64, // A
}

impl fmt::Display for LinearTxCurrentModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "LinearTxCurrentModel {{ eta: {}, voltage: {} V, standby_current: {} A }}",
            self.eta, self.voltage, self.standby_current
        )
    }
}

impl Default for LinearTxCurrentModel {
    fn default() -> Self {
        Self {
            eta: DEFAULT_ETA,
            voltage: DEFAULT_VOLTAGE,
            standby_current: DEFAULT_STANDBY_CURRENT,
        }
    }
}

impl LinearTxCurrentModel {
    /// Creates a linear model, rejecting an efficiency outside (0, 1], a
    /// non-positive voltage or a negative standby current.
    pub fn new(eta: f64, voltage: f64, standby_current: f64) -> Result<Self, ConfigError> {
        let mut model = Self::default();
        model.set_eta(eta)?;
        model.set_voltage(voltage)?;
        model.set_standby_current(standby_current)?;
        Ok(model)
    }

    pub fn set_eta(&mut self, eta: f64) -> Result<(), ConfigError> {
        if !(eta > 0.0 && eta <= 1.0) {
            return Err(ConfigError::InvalidEfficiency(eta));
        }
        self.eta = eta;
        Ok(())
    }

    pub fn set_voltage(&mut self, voltage: f64) -> Result<(), ConfigError> {
        self.voltage = check_voltage(voltage)?;
        Ok(())
    }

    pub fn set_standby_current(&mut self, standby_current: f64) -> Result<(), ConfigError> {
        self.standby_current = check_current("standby_current", standby_current)?;
        Ok(())
    }

    pub fn eta(&self) -> f64 {
        self.eta
    }

    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    pub fn standby_current(&self) -> f64 {
        self.standby_current
    }
}

impl TxCurrentModel for LinearTxCurrentModel {
    fn calc_tx_current(&self, tx_power_dbm: f64) -> f64 {
        let tx_power_watts = rfconversions::power::db_to_linear(tx_power_dbm) / MILLIWATTS_PER_WATT;
        tx_power_watts / (self.voltage * self.eta) + self.standby_current
    }
}
