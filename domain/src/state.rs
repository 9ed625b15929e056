//! Per-entity initial/runtime state shapes (§3): the values an encoder reads to populate a
//! `Problem`'s initial fluent assignments, and that a decoder's history records reuse for each
//! timestamped snapshot.

use crate::ids::{FieldAccessId, FieldId, MachineId, SiloAccessId};
use crate::naming::LocationName;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MachineState {
    pub position: crate::entities::Point2D,
    pub bunker_mass: f64,
    pub bunker_volume: f64,
    pub location: MachineLocation,
    /// The TV or harvester this machine is mid-overload with, if any.
    pub overloading_partner: Option<MachineId>,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum MachineLocation {
    Field(FieldId),
    FieldAccess(FieldAccessId),
    SiloAccess(SiloAccessId),
    InitialLocation,
    Street,
}

impl MachineLocation {
    pub fn to_name(self, machine: MachineId) -> String {
        match self {
            MachineLocation::Field(id) => LocationName::Field(id).to_name(),
            MachineLocation::FieldAccess(id) => LocationName::FieldAccess(id).to_name(),
            MachineLocation::SiloAccess(id) => LocationName::SiloAccess(id).to_name(),
            MachineLocation::InitialLocation => LocationName::MachineInitial(machine).to_name(),
            MachineLocation::Street => LocationName::Street.to_name(),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct FieldState {
    pub avg_mass_per_area: f64,
    /// Percentage in `[0, 100]`; §3 invariant: monotonically non-decreasing during planning.
    pub harvested_percentage: f64,
}

impl FieldState {
    pub fn is_harvested(&self) -> bool {
        self.harvested_percentage >= 100.0
    }
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SiloAccessState {
    pub available_capacity: f64,
    pub free: bool,
    /// Earliest time the access is next available; `WITH_SILO_ACCESS_AVAILABILITY` and
    /// `WITH_SILO_ACCESS_CAPACITY_AND_COMPACTION` keep this current as TVs use the access.
    pub timestamp: f64,
    pub cleared: bool,
}

/// Field pre-assignment: a hard binding of a field to a harvester, with an optional turn number
/// (1-based; `0` means "any turn").
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FieldPreAssignment {
    pub field: FieldId,
    pub harvester: MachineId,
    pub turn: u32,
}

/// TV pre-assignment, §3's two forms.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum TvPreAssignment {
    /// An ordered list of TVs serving one harvester.
    Ordered {
        harvester: MachineId,
        tvs: Vec<MachineId>,
        cyclic: bool,
    },
    /// A TV bound to a harvester without a fixed turn order.
    Unordered { tv: MachineId, harvester: MachineId },
}

impl TvPreAssignment {
    pub fn harvester(&self) -> MachineId {
        match self {
            TvPreAssignment::Ordered { harvester, .. } => *harvester,
            TvPreAssignment::Unordered { harvester, .. } => *harvester,
        }
    }
}

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct PreAssignments {
    pub fields: Vec<FieldPreAssignment>,
    pub tvs: Vec<TvPreAssignment>,
}
