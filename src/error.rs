use thiserror::Error;

/// A configuration value was rejected when it was set.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("supply voltage must be greater than 0 V, got {0} V")]
    InvalidVoltage(f64),
    #[error("power amplifier efficiency must be in (0, 1], got {0}")]
    InvalidEfficiency(f64),
    #[error("{name} must be a non-negative current in Ampere, got {value} A")]
    InvalidCurrent { name: &'static str, value: f64 },
    #[error("transition {0} commands the transmit state without a tx_power_dbm")]
    MissingTxPower(usize),
    #[error("sweep from {start_dbm} dBm to {stop_dbm} dBm in {step_db} dB steps needs finite bounds, a positive step and at most {max_points} points")]
    InvalidSweep {
        start_dbm: f64,
        stop_dbm: f64,
        step_db: f64,
        max_points: usize,
    },
}

/// The modeled hardware cannot do what was requested.
///
/// These are never corrected automatically: the caller asked for a transmit
/// power, amplifier path or bandwidth the transceiver does not support.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum HardwareError {
    #[error("{0} dBm is not available on the SX1272")]
    UnsupportedTxPower(f64),
    #[error("transmit current values for the RFO pin are not defined on the SX1272")]
    RfoPathUndefined,
    #[error("receive current values for a bandwidth of {0} Hz are not available on the SX1272")]
    UnsupportedBandwidth(f64),
}

/// Crate-level error for the configuration file and command line layers.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Hardware(#[from] HardwareError),
    #[error("unable to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Error {
    /// True when the error means the configuration asks for something the
    /// modeled transceiver cannot do, as opposed to a malformed value.
    pub fn is_hardware_capability(&self) -> bool {
        matches!(self, Error::Hardware(_))
    }
}

pub(crate) fn check_current(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidCurrent { name, value })
    }
}

pub(crate) fn check_voltage(voltage: f64) -> Result<f64, ConfigError> {
    if voltage.is_finite() && voltage > 0.0 {
        Ok(voltage)
    } else {
        Err(ConfigError::InvalidVoltage(voltage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_current_rejected() {
        let err = check_current("idle_current", -0.001).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidCurrent {
                name: "idle_current",
                value: -0.001
            }
        );
    }

    #[test]
    fn zero_current_accepted() {
        assert_eq!(check_current("sleep_current", 0.0).unwrap(), 0.0);
    }

    #[test]
    fn non_positive_voltage_rejected() {
        assert!(check_voltage(0.0).is_err());
        assert!(check_voltage(-3.3).is_err());
        assert!(check_voltage(f64::NAN).is_err());
        assert_eq!(check_voltage(3.3).unwrap(), 3.3);
    }

    #[test]
    fn hardware_errors_are_flagged() {
        let err: Error = HardwareError::RfoPathUndefined.into();
        assert!(err.is_hardware_capability());

        let err: Error = ConfigError::InvalidVoltage(0.0).into();
        assert!(!err.is_hardware_capability());
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = HardwareError::UnsupportedBandwidth(500000.0);
        assert!(err.to_string().contains("500000"));
        let err = HardwareError::UnsupportedTxPower(18.0);
        assert_eq!(err.to_string(), "18 dBm is not available on the SX1272");
    }
}
