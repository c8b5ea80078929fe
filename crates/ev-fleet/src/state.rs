//! Vehicle state enum.

/// Where a vehicle is in its fly / wait / charge cycle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum VehicleState {
    /// Created but `begin()` not yet called.
    #[default]
    Unknown,
    /// In the air, draining the battery.
    Flying,
    /// Queued at (or just admitted to) the station, no charge received yet.
    Waiting,
    /// Occupying a bay and receiving charge.
    Charging,
}

impl VehicleState {
    /// Upper-case label used in result tables and output rows.
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleState::Unknown  => "UNKNOWN",
            VehicleState::Flying   => "FLYING",
            VehicleState::Waiting  => "WAITING",
            VehicleState::Charging => "CHARGING",
        }
    }
}

impl std::fmt::Display for VehicleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
