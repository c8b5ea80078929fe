//! Error types for ev-fleet.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FleetError {
    #[error("invalid vehicle configuration: {field} {reason}")]
    InvalidConfig {
        field:  &'static str,
        reason: &'static str,
    },

    #[error("prototype factory has no prototypes to copy")]
    NoPrototypes,
}

pub type FleetResult<T> = Result<T, FleetError>;
