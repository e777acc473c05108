use std::fmt;

use serde::Deserialize;

/// Operating state of the radio, as commanded by the PHY/MAC layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadioState {
    /// Powered on, neither transmitting nor receiving (standby).
    #[serde(alias = "standby")]
    Idle,
    Sleep,
    #[serde(alias = "tx")]
    Transmit,
    #[serde(alias = "rx")]
    Receive,
}

impl RadioState {
    pub const ALL: [RadioState; 4] = [
        RadioState::Idle,
        RadioState::Sleep,
        RadioState::Transmit,
        RadioState::Receive,
    ];
}

impl fmt::Display for RadioState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            RadioState::Idle => "Idle",
            RadioState::Sleep => "Sleep",
            RadioState::Transmit => "Transmit",
            RadioState::Receive => "Receive",
        };
        write!(f, "{}", name)
    }
}
