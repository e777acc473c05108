//! Transmit current models.

use std::fmt;

use dyn_clone::{clone_trait_object, DynClone};

use crate::constant::ConstantTxCurrentModel;
use crate::linear::LinearTxCurrentModel;
use crate::sx1272::Sx1272CurrentModel;

/// Model for computing the current a radio draws while transmitting.
///
/// Implementations never return a negative current. Hardware-specific models
/// plug in by implementing this trait and can then be boxed next to the
/// built-in ones.
pub trait TxCurrentModel: DynClone + fmt::Debug + Send + Sync {
    /// Returns the transmit current (A).
    ///
    /// * `tx_power_dbm` - nominal transmit power in dBm.
    fn calc_tx_current(&self, tx_power_dbm: f64) -> f64;
}

clone_trait_object!(TxCurrentModel);

/// The built-in current models, one case per model.
#[derive(Clone, Debug, PartialEq)]
pub enum CurrentModel {
    Linear(LinearTxCurrentModel),
    Constant(ConstantTxCurrentModel),
    Sx1272(Sx1272CurrentModel),
}

impl CurrentModel {
    /// Short name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            CurrentModel::Linear(_) => "linear",
            CurrentModel::Constant(_) => "constant",
            CurrentModel::Sx1272(_) => "sx1272",
        }
    }

    /// Supply voltage, for models that carry one.
    pub fn voltage(&self) -> Option<f64> {
        match self {
            CurrentModel::Linear(model) => Some(model.voltage()),
            CurrentModel::Constant(_) => None,
            CurrentModel::Sx1272(model) => Some(model.voltage()),
        }
    }

    /// The table-based model, if this is one.
    pub fn as_sx1272(&self) -> Option<&Sx1272CurrentModel> {
        match self {
            CurrentModel::Sx1272(model) => Some(model),
            _ => None,
        }
    }

    pub fn as_sx1272_mut(&mut self) -> Option<&mut Sx1272CurrentModel> {
        match self {
            CurrentModel::Sx1272(model) => Some(model),
            _ => None,
        }
    }
}

impl TxCurrentModel for CurrentModel {
    fn calc_tx_current(&self, tx_power_dbm: f64) -> f64 {
        match self {
            CurrentModel::Linear(model) => model.calc_tx_current(tx_power_dbm),
            CurrentModel::Constant(model) => model.calc_tx_current(tx_power_dbm),
            CurrentModel::Sx1272(model) => model.calc_tx_current(tx_power_dbm),
        }
    }
}

impl fmt::Display for CurrentModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CurrentModel::Linear(model) => write!(f, "{}", model),
            CurrentModel::Constant(model) => write!(f, "{}", model),
            CurrentModel::Sx1272(model) => write!(f, "{}", model),
        }
    }
}

impl From<LinearTxCurrentModel> for CurrentModel {
    fn from(model: LinearTxCurrentModel) -> Self {
        CurrentModel::Linear(model)
    }
}

impl From<ConstantTxCurrentModel> for CurrentModel {
    fn from(model: ConstantTxCurrentModel) -> Self {
        CurrentModel::Constant(model)
    }
}

impl From<Sx1272CurrentModel> for CurrentModel {
    fn from(model: Sx1272CurrentModel) -> Self {
        CurrentModel::Sx1272(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // a model outside the built-in enum, e.g. another transceiver
    #[derive(Clone, Debug)]
    struct HalfWattModel;

    impl TxCurrentModel for HalfWattModel {
        fn calc_tx_current(&self, _tx_power_dbm: f64) -> f64 {
            0.5 / 3.3
        }
    }

    #[test]
    fn boxed_models_are_clonable() {
        let models: Vec<Box<dyn TxCurrentModel>> = vec![
            Box::new(HalfWattModel),
            Box::new(CurrentModel::from(ConstantTxCurrentModel::default())),
            Box::new(LinearTxCurrentModel::default()),
        ];
        let cloned = models.clone();
        for (a, b) in models.iter().zip(cloned.iter()) {
            assert_eq!(a.calc_tx_current(10.0), b.calc_tx_current(10.0));
        }
    }

    #[test]
    fn enum_delegates_to_each_model() {
        let linear = LinearTxCurrentModel::default();
        let expected = linear.calc_tx_current(7.0);
        assert_eq!(CurrentModel::from(linear).calc_tx_current(7.0), expected);

        let constant = CurrentModel::from(ConstantTxCurrentModel::default());
        assert_eq!(constant.calc_tx_current(7.0), 0.028);

        let sx1272 = CurrentModel::from(Sx1272CurrentModel::default());
        assert_eq!(sx1272.calc_tx_current(7.0), 0.054216);
    }

    #[test]
    fn names() {
        assert_eq!(CurrentModel::from(LinearTxCurrentModel::default()).name(), "linear");
        assert_eq!(
            CurrentModel::from(ConstantTxCurrentModel::default()).name(),
            "constant"
        );
        let model = CurrentModel::from(Sx1272CurrentModel::default());
        assert_eq!(model.name(), "sx1272");
        assert!(model.as_sx1272().is_some());
    }
}
