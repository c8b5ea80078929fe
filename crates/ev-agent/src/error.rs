use ev_core::VehicleId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("{0} received a timestep update before begin()")]
    NotStarted(VehicleId),

    #[error("{0} was started twice")]
    AlreadyStarted(VehicleId),
}

pub type AgentResult<T> = Result<T, AgentError>;
