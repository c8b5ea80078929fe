//! The `SimulationAgent` trait: anything that receives timestep updates.

use ev_core::TickSpan;

use crate::{AgentResult, Intent};

/// A participant in the simulation that updates its own state once per tick.
///
/// # Lifecycle
///
/// `begin` is called exactly once before the first tick.  After that the
/// scheduler calls `tick_update` once per tick with the span just covered.
/// Calling `tick_update` on an agent that was never started is a logic error
/// and must be reported, not ignored.
///
/// # Example
///
/// ```rust,ignore
/// let mut vehicle = factory.create_vehicle()?;
/// vehicle.begin()?;
/// if let Some(Intent::RequestCharge) = vehicle.tick_update(span)? {
///     station.admit(vehicle.id())?;
/// }
/// ```
pub trait SimulationAgent {
    /// One-time initialisation before any timestep updates.
    fn begin(&mut self) -> AgentResult<()>;

    /// Advance the agent's state across `span`.
    ///
    /// Returns the agent's request for the apply phase, if any.
    fn tick_update(&mut self, span: TickSpan) -> AgentResult<Option<Intent>>;
}
