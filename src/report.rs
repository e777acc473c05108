//! Drives a current model through radio state transitions and power sweeps.

use std::fmt;

use serde::Deserialize;
use tracing::{debug, info};

use crate::constants::MAX_SWEEP_POINTS;
use crate::current_model::{CurrentModel, TxCurrentModel};
use crate::error::{ConfigError, Error};
use crate::state::RadioState;

/// A state change commanded by the PHY/MAC layer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Transition {
    pub state: RadioState,
    /// Requested transmit power (dBm), for the transmit state.
    pub tx_power_dbm: Option<f64>,
    /// Channel bandwidth (Hz), for the receive state.
    pub bandwidth_hz: Option<f64>,
}

impl Transition {
    pub fn idle() -> Self {
        Self::to(RadioState::Idle)
    }

    pub fn sleep() -> Self {
        Self::to(RadioState::Sleep)
    }

    pub fn transmit(tx_power_dbm: f64) -> Self {
        Self {
            tx_power_dbm: Some(tx_power_dbm),
            ..Self::to(RadioState::Transmit)
        }
    }

    pub fn receive(bandwidth_hz: f64) -> Self {
        Self {
            bandwidth_hz: Some(bandwidth_hz),
            ..Self::to(RadioState::Receive)
        }
    }

    fn to(state: RadioState) -> Self {
        Self {
            state,
            tx_power_dbm: None,
            bandwidth_hz: None,
        }
    }
}

/// Current drawn after one transition.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportStep {
    pub transition: Transition,
    /// Current in the new state (A), or `None` when the model does not
    /// characterize that state.
    pub current: Option<f64>,
    /// `current * voltage` (W), when the model carries a supply voltage.
    pub power: Option<f64>,
}

impl fmt::Display for ReportStep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ReportStep {{ state: {}", self.transition.state)?;
        if let Some(tx_power_dbm) = self.transition.tx_power_dbm {
            write!(f, ", tx_power: {} dBm", tx_power_dbm)?;
        }
        if let Some(bandwidth_hz) = self.transition.bandwidth_hz {
            write!(f, ", bandwidth: {} Hz", bandwidth_hz)?;
        }
        match self.current {
            Some(current) => write!(f, ", current: {:.3} mA }}", current * 1e3),
            None => write!(f, ", current: N/A }}"),
        }
    }
}

/// Applies each transition to the model in order and records the current.
///
/// The model is left in the state of the last transition. A hardware error
/// stops the run; the steps before it are discarded.
pub fn run_transitions(
    model: &mut CurrentModel,
    transitions: &[Transition],
) -> Result<Vec<ReportStep>, Error> {
    let voltage = model.voltage();
    let mut steps = Vec::with_capacity(transitions.len());
    for (i, transition) in transitions.iter().enumerate() {
        let current = apply_transition(model, i, transition)?;
        debug!("transition {}: {:?} -> {:?} A", i, transition.state, current);
        steps.push(ReportStep {
            transition: transition.clone(),
            current,
            power: current.zip(voltage).map(|(amps, volts)| amps * volts),
        });
    }
    info!("applied {} transitions to the {} model", steps.len(), model.name());
    Ok(steps)
}

fn apply_transition(
    model: &mut CurrentModel,
    index: usize,
    transition: &Transition,
) -> Result<Option<f64>, Error> {
    let current = match model {
        CurrentModel::Sx1272(sx1272) => {
            match transition.state {
                RadioState::Transmit => {
                    if let Some(tx_power_dbm) = transition.tx_power_dbm {
                        sx1272.set_tx_current(tx_power_dbm)?;
                    }
                }
                RadioState::Receive => {
                    if let Some(bandwidth_hz) = transition.bandwidth_hz {
                        sx1272.set_rx_current(bandwidth_hz)?;
                    }
                }
                RadioState::Idle | RadioState::Sleep => {}
            }
            Some(sx1272.current(transition.state))
        }
        CurrentModel::Linear(linear) => match transition.state {
            RadioState::Transmit => {
                let tx_power_dbm = transition
                    .tx_power_dbm
                    .ok_or(ConfigError::MissingTxPower(index))?;
                Some(linear.calc_tx_current(tx_power_dbm))
            }
            RadioState::Idle => Some(linear.standby_current()),
            RadioState::Sleep | RadioState::Receive => None,
        },
        CurrentModel::Constant(constant) => match transition.state {
            RadioState::Transmit => Some(constant.tx_current()),
            _ => None,
        },
    };
    Ok(current)
}

/// Transmit power range to characterize.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sweep {
    #[serde(default = "default_sweep_start")]
    pub start_dbm: f64,
    #[serde(default = "default_sweep_stop")]
    pub stop_dbm: f64,
    #[serde(default = "default_sweep_step")]
    pub step_db: f64,
}

fn default_sweep_start() -> f64 {
    0.0
}

fn default_sweep_stop() -> f64 {
    20.0
}

fn default_sweep_step() -> f64 {
    1.0
}

impl Sweep {
    /// Number of points from `start_dbm` up to `stop_dbm`, or `None` when the
    /// bounds are not finite, the step is not positive or there would be more
    /// than [`MAX_SWEEP_POINTS`].
    pub fn point_count(&self) -> Option<usize> {
        if !(self.start_dbm.is_finite() && self.stop_dbm.is_finite() && self.step_db.is_finite())
            || self.step_db <= 0.0
        {
            return None;
        }
        if self.stop_dbm < self.start_dbm {
            return Some(0);
        }
        // 1 % of a step absorbs rounding at the stop power
        let steps = ((self.stop_dbm - self.start_dbm) / self.step_db + 0.01).floor();
        if steps >= MAX_SWEEP_POINTS as f64 {
            return None;
        }
        Some(steps as usize + 1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.point_count() {
            Some(_) => Ok(()),
            None => Err(ConfigError::InvalidSweep {
                start_dbm: self.start_dbm,
                stop_dbm: self.stop_dbm,
                step_db: self.step_db,
                max_points: MAX_SWEEP_POINTS,
            }),
        }
    }

    /// Power of the `index`-th point, snapped to 1e-9 dB so that table
    /// lookups see the intended integer powers.
    pub fn power_at(&self, index: usize) -> f64 {
        let power = self.start_dbm + index as f64 * self.step_db;
        let snapped = (power * 1e9).round() / 1e9;
        if snapped.is_finite() {
            snapped
        } else {
            power
        }
    }
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            start_dbm: default_sweep_start(),
            stop_dbm: default_sweep_stop(),
            step_db: default_sweep_step(),
        }
    }
}

/// A single point of a transmit current sweep.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepPoint {
    pub tx_power_dbm: f64,
    /// `None` where the hardware has no setting for this power.
    pub tx_current: Option<f64>,
}

/// Transmit current from `start_dbm` to `stop_dbm` in `step_db` steps.
///
/// The table-based model is swept on a copy, so its commanded state is not
/// changed. A sweep rejected by [`Sweep::validate`] yields no points.
pub fn tx_current_sweep(model: &CurrentModel, sweep: &Sweep) -> Vec<SweepPoint> {
    let count = sweep.point_count().unwrap_or(0);
    let mut copy = model.clone();
    (0..count)
        .map(|i| {
            let power = sweep.power_at(i);
            let tx_current = match &mut copy {
                CurrentModel::Sx1272(sx1272) => sx1272.set_tx_current(power).ok(),
                other => Some(other.calc_tx_current(power)),
            };
            SweepPoint {
                tx_power_dbm: power,
                tx_current,
            }
        })
        .collect()
}
