//! Table-based current model of the Semtech SX1272 LoRa transceiver.
//!
//! Transmit current is looked up per integer dBm on the PA_BOOST pin, receive
//! current per channel bandwidth and LNA boost setting. Idle and sleep currents
//! are fixed. The model keeps the transmit and receive currents of the last
//! commanded power and bandwidth, the same way the hardware does.

use std::fmt;

use tracing::{debug, trace};

use crate::constants::{
    DEFAULT_VOLTAGE, SX1272_IDLE_CURRENT, SX1272_MAX_TX_POWER_DBM, SX1272_MIN_TX_POWER_DBM,
    SX1272_RX_CURRENT, SX1272_SLEEP_CURRENT, SX1272_TX_CURRENT, SX1272_TX_POWER_DBM,
};
use crate::current_model::TxCurrentModel;
use crate::error::{check_current, check_voltage, ConfigError, Error, HardwareError};
use crate::state::RadioState;

/// Transmit current (A) on the PA_BOOST pin, 2 dBm to 20 dBm in 1 dB steps.
/// 18 dBm and 19 dBm cannot be configured on the SX1272.
pub const PA_BOOST_TX_CURRENT: [Option<f64>; 19] = [
    Some(0.032018), // 2 dBm
    Some(0.033157),
    Some(0.034224),
    Some(0.035168),
    Some(0.036302),
    Some(0.037481),
    Some(0.038711),
    Some(0.040310),
    Some(0.042289), // 10 dBm
    Some(0.044276),
    Some(0.046755),
    Some(0.050334),
    Some(0.054216), // 14 dBm
    Some(0.061582),
    Some(0.068982),
    Some(0.077138), // 17 dBm
    None,
    None,
    Some(0.105454), // 20 dBm, high power mode
];

/// Receive current (A) per bandwidth (Hz) with LNA boost enabled.
pub const RX_CURRENT_LNA_BOOST: [(f64, f64); 2] = [(125_000.0, 0.010803), (250_000.0, 0.011607)];

/// Receive current (A) per bandwidth (Hz) with LNA boost disabled.
pub const RX_CURRENT_NO_LNA_BOOST: [(f64, f64); 2] =
    [(125_000.0, 0.009877), (250_000.0, 0.010694)];

/// Clamps a requested transmit power into the PA_BOOST range.
///
/// Powers below 2 dBm become 2 dBm and powers above 20 dBm become 20 dBm.
pub fn clamp_tx_power(tx_power_dbm: f64) -> Result<f64, HardwareError> {
    if tx_power_dbm.is_nan() {
        return Err(HardwareError::UnsupportedTxPower(tx_power_dbm));
    }
    if tx_power_dbm < SX1272_MIN_TX_POWER_DBM {
        debug!(
            "Chosen dBm of {} is less than the SX1272 min of {}dBm, using {}dBm instead.",
            tx_power_dbm, SX1272_MIN_TX_POWER_DBM, SX1272_MIN_TX_POWER_DBM
        );
        Ok(SX1272_MIN_TX_POWER_DBM)
    } else if tx_power_dbm > SX1272_MAX_TX_POWER_DBM {
        debug!(
            "Chosen dBm of {} is higher than the SX1272 max of {}dBm, using {}dBm instead.",
            tx_power_dbm, SX1272_MAX_TX_POWER_DBM, SX1272_MAX_TX_POWER_DBM
        );
        Ok(SX1272_MAX_TX_POWER_DBM)
    } else {
        Ok(tx_power_dbm)
    }
}

/// Index into [`PA_BOOST_TX_CURRENT`] for a power already inside 2..=20 dBm.
pub fn tx_table_index(clamped_tx_power_dbm: f64) -> usize {
    (clamped_tx_power_dbm.floor() - SX1272_MIN_TX_POWER_DBM) as usize
}

/// Transmit current on the PA_BOOST pin for a requested power.
///
/// Clamps into range first; 18 dBm and 19 dBm are rejected, never rounded.
pub fn pa_boost_tx_current(tx_power_dbm: f64) -> Result<f64, HardwareError> {
    let clamped = clamp_tx_power(tx_power_dbm)?;
    let index = tx_table_index(clamped);
    trace!("tx table lookup: {} dBm -> index {}", clamped, index);
    PA_BOOST_TX_CURRENT
        .get(index)
        .copied()
        .flatten()
        .ok_or(HardwareError::UnsupportedTxPower(clamped.floor()))
}

/// Receive current for an exact bandwidth match in the selected sub-table.
pub fn rx_current_for_bandwidth(bandwidth_hz: f64, use_lna_boost: bool) -> Result<f64, HardwareError> {
    let table = if use_lna_boost {
        &RX_CURRENT_LNA_BOOST
    } else {
        &RX_CURRENT_NO_LNA_BOOST
    };
    table
        .iter()
        .find(|(bandwidth, _)| *bandwidth == bandwidth_hz)
        .map(|(_, current)| *current)
        .ok_or(HardwareError::UnsupportedBandwidth(bandwidth_hz))
}

/// Current model of the SX1272, holding the current of every radio state.
#[derive(Clone, Debug, PartialEq)]
pub struct Sx1272CurrentModel {
    voltage: f64,
    idle_current: f64,  // A
    sleep_current: f64, // A
    tx_current: f64,    // A, of the last commanded power
    rx_current: f64,    // A, of the last commanded bandwidth
    tx_power_dbm: f64,  // last power translated into tx_current
    use_pa_boost: bool,
    use_lna_boost: bool,
}

impl fmt::Display for Sx1272CurrentModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Sx1272CurrentModel {{ voltage: {} V, idle: {} A, sleep: {} A, tx: {} A, rx: {} A, pa_boost: {}, lna_boost: {} }}",
            self.voltage,
            self.idle_current,
            self.sleep_current,
            self.tx_current,
            self.rx_current,
            self.use_pa_boost,
            self.use_lna_boost
        )
    }
}

impl Default for Sx1272CurrentModel {
    fn default() -> Self {
        Self {
            voltage: DEFAULT_VOLTAGE,
            idle_current: SX1272_IDLE_CURRENT,
            sleep_current: SX1272_SLEEP_CURRENT,
            tx_current: SX1272_TX_CURRENT,
            rx_current: SX1272_RX_CURRENT,
            tx_power_dbm: SX1272_TX_POWER_DBM,
            use_pa_boost: true,
            use_lna_boost: true,
        }
    }
}

impl Sx1272CurrentModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a builder applying attributes over the defaults.
    pub fn builder() -> Sx1272CurrentModelBuilder {
        Sx1272CurrentModelBuilder::default()
    }

    /// Sets the transmit current from a transmit power in dBm and returns it.
    ///
    /// Fails when the RFO pin is selected, or for 18 dBm and 19 dBm. On
    /// failure the cached transmit current is left unchanged.
    pub fn set_tx_current(&mut self, tx_power_dbm: f64) -> Result<f64, HardwareError> {
        if !self.use_pa_boost {
            return Err(HardwareError::RfoPathUndefined);
        }
        let clamped = clamp_tx_power(tx_power_dbm)?;
        let tx_current = pa_boost_tx_current(clamped)?;
        debug!(
            "SX1272 tx power {} dBm -> tx current {} A",
            clamped, tx_current
        );
        self.tx_current = tx_current;
        self.tx_power_dbm = clamped;
        Ok(tx_current)
    }

    /// Sets the transmit current itself, bypassing the power lookup.
    pub fn set_tx_current_directly(&mut self, tx_current: f64) -> Result<(), ConfigError> {
        self.tx_current = check_current("tx_current", tx_current)?;
        Ok(())
    }

    /// Current in the transmit state, for the last commanded power.
    pub fn tx_current(&self) -> f64 {
        self.tx_current
    }

    /// The transmit power last translated by [`Self::set_tx_current`], after
    /// clamping into 2..=20 dBm.
    pub fn tx_power_to_tx_current(&self) -> f64 {
        self.tx_power_dbm
    }

    /// Sets the receive current from the channel bandwidth in Hz and returns it.
    ///
    /// Only 125 kHz and 250 kHz are characterized.
    pub fn set_rx_current(&mut self, bandwidth_hz: f64) -> Result<f64, HardwareError> {
        let rx_current = rx_current_for_bandwidth(bandwidth_hz, self.use_lna_boost)?;
        debug!(
            "SX1272 rx bandwidth {} Hz (lna boost: {}) -> rx current {} A",
            bandwidth_hz, self.use_lna_boost, rx_current
        );
        self.rx_current = rx_current;
        Ok(rx_current)
    }

    /// Sets the receive current itself, bypassing the bandwidth lookup.
    pub fn set_rx_current_directly(&mut self, rx_current: f64) -> Result<(), ConfigError> {
        self.rx_current = check_current("rx_current", rx_current)?;
        Ok(())
    }

    pub fn rx_current(&self) -> f64 {
        self.rx_current
    }

    pub fn set_voltage(&mut self, voltage: f64) -> Result<(), ConfigError> {
        self.voltage = check_voltage(voltage)?;
        Ok(())
    }

    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    pub fn set_idle_current(&mut self, idle_current: f64) -> Result<(), ConfigError> {
        self.idle_current = check_current("idle_current", idle_current)?;
        Ok(())
    }

    pub fn idle_current(&self) -> f64 {
        self.idle_current
    }

    pub fn set_sleep_current(&mut self, sleep_current: f64) -> Result<(), ConfigError> {
        self.sleep_current = check_current("sleep_current", sleep_current)?;
        Ok(())
    }

    pub fn sleep_current(&self) -> f64 {
        self.sleep_current
    }

    /// Selects the PA_BOOST pin (true) or the RFO pin (false).
    pub fn set_pa_boost(&mut self, use_pa_boost: bool) {
        self.use_pa_boost = use_pa_boost;
    }

    pub fn pa_boost(&self) -> bool {
        self.use_pa_boost
    }

    /// Selects the receive sub-table. Takes effect on the next
    /// [`Self::set_rx_current`].
    pub fn set_lna_boost(&mut self, use_lna_boost: bool) {
        self.use_lna_boost = use_lna_boost;
    }

    pub fn lna_boost(&self) -> bool {
        self.use_lna_boost
    }

    /// Current drawn in the given radio state (A).
    pub fn current(&self, state: RadioState) -> f64 {
        match state {
            RadioState::Idle => self.idle_current,
            RadioState::Sleep => self.sleep_current,
            RadioState::Transmit => self.tx_current,
            RadioState::Receive => self.rx_current,
        }
    }
}

impl TxCurrentModel for Sx1272CurrentModel {
    // The transmit current belongs to the last commanded power, so the
    // argument is ignored; use set_tx_current to change it.
    fn calc_tx_current(&self, _tx_power_dbm: f64) -> f64 {
        self.tx_current
    }
}

/// Builder for [`Sx1272CurrentModel`].
///
/// Attributes are applied in a fixed order: voltage, idle current, sleep
/// current, tx current, tx power, rx current, PA boost, LNA boost. A tx power
/// therefore overrides a directly given tx current.
#[derive(Clone, Debug, Default)]
pub struct Sx1272CurrentModelBuilder {
    voltage: Option<f64>,
    idle_current: Option<f64>,
    sleep_current: Option<f64>,
    tx_current: Option<f64>,
    tx_power_dbm: Option<f64>,
    rx_current: Option<f64>,
    use_pa_boost: Option<bool>,
    use_lna_boost: Option<bool>,
}

impl Sx1272CurrentModelBuilder {
    pub fn voltage(mut self, voltage: f64) -> Self {
        self.voltage = Some(voltage);
        self
    }

    pub fn idle_current(mut self, idle_current: f64) -> Self {
        self.idle_current = Some(idle_current);
        self
    }

    pub fn sleep_current(mut self, sleep_current: f64) -> Self {
        self.sleep_current = Some(sleep_current);
        self
    }

    pub fn tx_current(mut self, tx_current: f64) -> Self {
        self.tx_current = Some(tx_current);
        self
    }

    pub fn tx_power_dbm(mut self, tx_power_dbm: f64) -> Self {
        self.tx_power_dbm = Some(tx_power_dbm);
        self
    }

    pub fn rx_current(mut self, rx_current: f64) -> Self {
        self.rx_current = Some(rx_current);
        self
    }

    pub fn pa_boost(mut self, use_pa_boost: bool) -> Self {
        self.use_pa_boost = Some(use_pa_boost);
        self
    }

    pub fn lna_boost(mut self, use_lna_boost: bool) -> Self {
        self.use_lna_boost = Some(use_lna_boost);
        self
    }

    /// Build the [`Sx1272CurrentModel`], validating every attribute.
    pub fn build(self) -> Result<Sx1272CurrentModel, Error> {
        let mut model = Sx1272CurrentModel::default();
        if let Some(voltage) = self.voltage {
            model.set_voltage(voltage)?;
        }
        if let Some(idle_current) = self.idle_current {
            model.set_idle_current(idle_current)?;
        }
        if let Some(sleep_current) = self.sleep_current {
            model.set_sleep_current(sleep_current)?;
        }
        if let Some(tx_current) = self.tx_current {
            model.set_tx_current_directly(tx_current)?;
        }
        if let Some(tx_power_dbm) = self.tx_power_dbm {
            model.set_tx_current(tx_power_dbm)?;
        }
        if let Some(rx_current) = self.rx_current {
            model.set_rx_current_directly(rx_current)?;
        }
        if let Some(use_pa_boost) = self.use_pa_boost {
            model.set_pa_boost(use_pa_boost);
        }
        if let Some(use_lna_boost) = self.use_lna_boost {
            model.set_lna_boost(use_lna_boost);
        }
        Ok(model)
    }
}
