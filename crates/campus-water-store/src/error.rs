use std::fmt::{Display, Formatter};

use campus_water_model::{AlertStatus, MeasurementError};

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum StoreError {
    FaucetNotFound(String),
    AlertNotFound(String),
    InvalidTransition {
        alert_id: String,
        from: AlertStatus,
        to: AlertStatus,
    },
    Duplicate {
        kind: &'static str,
        id: String,
    },
    Measurement(MeasurementError),
    Decode(String),
    Io(String),
}

impl StoreError {
    /// Stable machine code, used as `MachineError::code` by the CLI.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::FaucetNotFound(_) => "faucet_not_found",
            Self::AlertNotFound(_) => "alert_not_found",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::Duplicate { .. } => "duplicate_id",
            Self::Measurement(_) => "invalid_measurement",
            Self::Decode(_) => "decode_error",
            Self::Io(_) => "io_error",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FaucetNotFound(id) => write!(f, "faucet not found: {id}"),
            Self::AlertNotFound(id) => write!(f, "alert not found: {id}"),
            Self::InvalidTransition { alert_id, from, to } => {
                write!(f, "alert {alert_id} cannot move from {from} to {to}")
            }
            Self::Duplicate { kind, id } => write!(f, "{kind} id already exists: {id}"),
            Self::Measurement(err) => write!(f, "{err}"),
            Self::Decode(message) => write!(f, "decode failed: {message}"),
            Self::Io(message) => write!(f, "io failed: {message}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Measurement(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MeasurementError> for StoreError {
    fn from(err: MeasurementError) -> Self {
        Self::Measurement(err)
    }
}
