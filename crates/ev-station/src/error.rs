use ev_core::VehicleId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StationError {
    /// A vehicle asked for a bay while already charging or queued.
    #[error("{0} is already at the charging station")]
    AlreadyPresent(VehicleId),

    /// The station holds an id with no matching device in the slice it was
    /// ticked with.
    #[error("{id} is at the station but only {len} devices were supplied")]
    UnknownDevice { id: VehicleId, len: usize },
}

pub type StationResult<T> = Result<T, StationError>;
