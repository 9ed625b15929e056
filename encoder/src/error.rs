//! §7 item 1: build-time infeasibility the encoder itself can detect, distinct from the domain's
//! own [`agri_planning_domain::error::DomainBuildError`] (which is already resolved by the time a
//! `Domain` reaches this crate).

use agri_planning_domain::ids::{FieldAccessId, MachineId, SiloAccessId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EncodeError {
    #[error("no route planner result between machine {machine} and field access {access}; the scenario is unreachable")]
    UnreachableFieldAccess { machine: MachineId, access: FieldAccessId },
    #[error("no route planner result between machine {machine} and silo access {access}; the scenario is unreachable")]
    UnreachableSiloAccess { machine: MachineId, access: SiloAccessId },
    #[error("domain has no transport vehicles; no overload target exists for any field")]
    NoTransportVehicle,
    #[error("encoded problem has zero actions; nothing in the initial state can exercise any action variant")]
    NoApplicableActions,
}
