//! Agent intents: requests an agent hands back to the driver.

/// An action an agent wants the driver to perform on its behalf during the
/// apply phase of the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Intent {
    /// The agent is low on charge and wants a charging bay.
    ///
    /// The driver forwards it to `ChargingStation::admit`; the agent waits
    /// until the station starts delivering charge.
    RequestCharge,
}
