//! README example: 3. SX1272 Transmit Current

use loracurrent::sx1272::PA_BOOST_TX_CURRENT;
use loracurrent::{HardwareError, Sx1272CurrentModel, TxCurrentModel};

#[test]
fn sx1272_transmit_table() {
    let mut model = Sx1272CurrentModel::new();

    for dbm in (2..=17).chain([20]) {
        model.set_tx_current(dbm as f64).unwrap();
        assert_eq!(Some(model.tx_current()), PA_BOOST_TX_CURRENT[dbm - 2]);
    }
}

#[test]
fn sx1272_transmit_clamping() {
    let mut model = Sx1272CurrentModel::new();

    model.set_tx_current(1.0).unwrap();
    let clamped_low = model.tx_current();
    model.set_tx_current(2.0).unwrap();
    assert_eq!(clamped_low, model.tx_current());

    model.set_tx_current(25.0).unwrap();
    let clamped_high = model.tx_current();
    model.set_tx_current(20.0).unwrap();
    assert_eq!(clamped_high, model.tx_current());
}

#[test]
fn sx1272_transmit_gap() {
    let mut model = Sx1272CurrentModel::new();
    assert_eq!(
        model.set_tx_current(18.0),
        Err(HardwareError::UnsupportedTxPower(18.0))
    );
    assert_eq!(
        model.set_tx_current(19.0),
        Err(HardwareError::UnsupportedTxPower(19.0))
    );
}

#[test]
fn sx1272_rfo_pin() {
    let mut model = Sx1272CurrentModel::new();
    model.set_pa_boost(false);
    assert_eq!(model.set_tx_current(10.0), Err(HardwareError::RfoPathUndefined));
}

#[test]
fn sx1272_transmit_current_is_state() {
    let mut model = Sx1272CurrentModel::new();
    model.set_tx_current(10.0).unwrap();

    // the last commanded power decides, not the argument
    assert_eq!(model.calc_tx_current(20.0), 0.042289);
    assert_eq!(model.tx_power_to_tx_current(), 10.0);

    model.set_tx_current_directly(0.1).unwrap();
    assert_eq!(model.calc_tx_current(10.0), 0.1);
}
