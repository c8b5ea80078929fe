//! Strongly typed vehicle identifier.
//!
//! `VehicleId` is `Copy + Ord + Hash` so it can be used as a map key and
//! sorted without ceremony.  The inner integer is `pub` to allow direct
//! indexing into the fleet `Vec` via `id.0 as usize`, but callers should
//! prefer [`VehicleId::index`] for clarity.

use std::fmt;

/// Index of a vehicle in the fleet.  The station, the reports, and the
/// output rows all refer to vehicles by this id rather than by reference.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleId(pub u32);

impl VehicleId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VehicleId({})", self.0)
    }
}

impl From<VehicleId> for usize {
    #[inline(always)]
    fn from(id: VehicleId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for VehicleId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<VehicleId, Self::Error> {
        u32::try_from(n).map(VehicleId)
    }
}
