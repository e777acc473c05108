/// Milliwatts per Watt, used when turning dBm into Watts.
pub const MILLIWATTS_PER_WATT: f64 = 1000.0;

/// Default supply voltage (V).
pub const DEFAULT_VOLTAGE: f64 = 3.3;
/// Default power amplifier efficiency of the linear model.
pub const DEFAULT_ETA: f64 = 0.10;
/// Default standby current of the linear model, 1.4 mA.
pub const DEFAULT_STANDBY_CURRENT: f64 = 0.0014;
/// Default transmit current of the constant model, 28 mA at 0 dBm.
pub const DEFAULT_CONSTANT_TX_CURRENT: f64 = 0.028;

/// SX1272 standby current (A).
pub const SX1272_IDLE_CURRENT: f64 = 0.001664;
/// SX1272 sleep current (A).
pub const SX1272_SLEEP_CURRENT: f64 = 0.000001;
/// SX1272 transmit current at the default 14 dBm on PA_BOOST (A).
pub const SX1272_TX_CURRENT: f64 = 0.054216;
/// SX1272 default commanded transmit power (dBm).
pub const SX1272_TX_POWER_DBM: f64 = 14.0;
/// SX1272 receive current at 125 kHz with LNA boost (A).
pub const SX1272_RX_CURRENT: f64 = 0.010803;

/// Lowest transmit power on the PA_BOOST pin (dBm).
pub const SX1272_MIN_TX_POWER_DBM: f64 = 2.0;
/// Highest transmit power on the PA_BOOST pin (dBm).
pub const SX1272_MAX_TX_POWER_DBM: f64 = 20.0;

/// Upper bound on the number of points in a transmit current sweep.
pub const MAX_SWEEP_POINTS: usize = 10_000;
