use ev_agent::AgentError;
use ev_core::EvError;
use ev_fleet::FleetError;
use ev_station::StationError;
use thiserror::Error;

/// Scheduler construction failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("tick size must be greater than 0 ms")]
    ZeroTickSize,

    #[error("time compression ratio must be greater than 0")]
    ZeroCompression,

    #[error("a tick callback is required")]
    MissingCallback,

    #[error("a run of {minutes} minutes overflows the millisecond clock")]
    DurationOverflow { minutes: u64 },
}

pub type TimerResult<T> = Result<T, TimerError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] EvError),

    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Station(#[from] StationError),

    #[error(transparent)]
    Timer(#[from] TimerError),

    #[error("each simulation instance can only run once")]
    AlreadyRun,
}

pub type SimResult<T> = Result<T, SimError>;
