//! The Planner external interface (§6): "accepts a problem supporting numeric fluents, (durative
//! or instantaneous) actions ..., and an optional metric ... returns a plan." This crate never
//! implements a planner; it only defines the trait a caller's chosen engine must satisfy, plus the
//! result shape the rest of the pipeline (the decoder, the validator glue) consumes.

use crate::plan::Plan;
use crate::problem::Problem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ::prost::Enumeration)]
#[repr(i32)]
pub enum PlanStatus {
    SolvedSatisficing = 0,
    SolvedOptimally = 1,
    UnsolvableProven = 2,
    UnsolvableIncompletely = 3,
    Timeout = 13,
    InternalError = 15,
    UnsupportedProblem = 16,
}

impl PlanStatus {
    pub fn has_plan(self) -> bool {
        matches!(self, PlanStatus::SolvedSatisficing | PlanStatus::SolvedOptimally)
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct PlanGenerationResult {
    #[prost(enumeration = "PlanStatus", tag = "1")]
    pub status: i32,
    #[prost(message, optional, tag = "2")]
    pub plan: ::core::option::Option<Plan>,
    #[prost(map = "string, string", tag = "3")]
    pub metrics: ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}

impl PlanGenerationResult {
    pub fn status(&self) -> PlanStatus {
        match self.status {
            0 => PlanStatus::SolvedSatisficing,
            1 => PlanStatus::SolvedOptimally,
            2 => PlanStatus::UnsolvableProven,
            3 => PlanStatus::UnsolvableIncompletely,
            13 => PlanStatus::Timeout,
            16 => PlanStatus::UnsupportedProblem,
            _ => PlanStatus::InternalError,
        }
    }
}

/// A request to solve a `Problem`, honoring a wall-clock budget; the planner imposes its own
/// timeout (§5 Cancellation), this crate installs none of its own.
pub struct PlanRequest<'p> {
    pub problem: &'p Problem,
    pub timeout: Duration,
    pub options: HashMap<String, String>,
}

/// The search engine this crate assumes but never implements (§1 Non-goals: "the search engine
/// itself"). Given to the orchestrator so it can drive `encode -> plan -> decode -> validate`.
pub trait Planner {
    fn plan(&self, request: PlanRequest<'_>) -> PlanGenerationResult;
}
