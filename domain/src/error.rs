//! Error taxonomy item 1 and 4 (§7): infeasible-at-build-time scenarios and numeric degeneracies
//! that survive default substitution. Both are fatal for Domain construction; neither is a panic.

use crate::ids::{FieldId, MachineId, SiloId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DomainBuildError {
    #[error("duplicate field id {0}")]
    DuplicateFieldId(FieldId),
    #[error("duplicate machine id {0}")]
    DuplicateMachineId(MachineId),
    #[error("duplicate silo id {0}")]
    DuplicateSiloId(SiloId),
    #[error("no fields registered")]
    NoFields,
    #[error("no harvester registered")]
    NoHarvester,
    #[error("no silo registered")]
    NoSilo,
    #[error("machine {0} has a degenerate attribute that remains zero after default substitution: {1}")]
    DegenerateMachineAttribute(MachineId, &'static str),
    #[error("silo {0} has zero mass capacity")]
    DegenerateSiloCapacity(SiloId),
    #[error(
        "pre-assignment of TV {tv} is bound to both harvester {first} and harvester {second}"
    )]
    TvBoundToMultipleHarvesters {
        tv: MachineId,
        first: MachineId,
        second: MachineId,
    },
    #[error("pre-assignment of harvester {harvester} has two fields at turn {turn}: {first} and {second}")]
    DuplicateFieldTurn {
        harvester: MachineId,
        turn: u32,
        first: FieldId,
        second: FieldId,
    },
    #[error("pre-assignment references unknown field {0}")]
    UnknownField(FieldId),
    #[error("pre-assignment references unknown machine {0}")]
    UnknownMachine(MachineId),
}
