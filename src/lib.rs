mod constant;
pub mod cli;
pub mod config;
pub mod constants;
mod current_model;
mod error;
mod linear;
#[cfg(feature = "plot")]
mod plot;
pub mod report;
mod state;
pub mod sx1272;

pub use config::{load_config, Config, ModelConfig};
pub use constant::ConstantTxCurrentModel;
pub use current_model::{CurrentModel, TxCurrentModel};
pub use error::{ConfigError, Error, HardwareError};
pub use linear::LinearTxCurrentModel;
pub use report::{run_transitions, tx_current_sweep, ReportStep, Sweep, SweepPoint, Transition};
pub use state::RadioState;
pub use sx1272::{Sx1272CurrentModel, Sx1272CurrentModelBuilder};

#[cfg(test)]
mod tests {
    use super::*;

    // idle -> tx -> idle -> rx -> idle -> sleep, as driven by the PHY layer
    #[test]
    fn end_device_uplink_cycle() {
        let mut model = Sx1272CurrentModel::builder()
            .voltage(3.3)
            .pa_boost(true)
            .lna_boost(true)
            .build()
            .unwrap();

        assert_eq!(model.set_tx_current(12.0).unwrap(), sx1272::PA_BOOST_TX_CURRENT[10].unwrap());
        assert_eq!(model.set_rx_current(125000.0).unwrap(), sx1272::RX_CURRENT_LNA_BOOST[0].1);
        assert_eq!(
            model.set_tx_current(18.0).unwrap_err(),
            HardwareError::UnsupportedTxPower(18.0)
        );

        // the failed request leaves the 12 dBm setting in place
        assert_eq!(model.current(RadioState::Transmit), 0.046755);
        assert_eq!(model.calc_tx_current(0.0), 0.046755);
    }
}
