//! The Validator external interface (§4.8, §6): "accepts (problem, plan) and returns
//! `{VALID, INVALID, UNKNOWN}` with a reason." As with [`crate::planner`], this crate only defines
//! the trait; `agri-validator` supplies the glue code that calls it and interprets the result.

use crate::plan::Plan;
use crate::problem::Problem;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ::prost::Enumeration)]
#[repr(i32)]
pub enum ValidationOutcome {
    Valid = 0,
    Invalid = 1,
    Unknown = 2,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct ValidationResult {
    #[prost(enumeration = "ValidationOutcome", tag = "1")]
    pub outcome: i32,
    #[prost(string, tag = "2")]
    pub reason: ::prost::alloc::string::String,
}

impl ValidationResult {
    pub fn outcome(&self) -> ValidationOutcome {
        match self.outcome {
            0 => ValidationOutcome::Valid,
            1 => ValidationOutcome::Invalid,
            _ => ValidationOutcome::Unknown,
        }
    }

    pub fn valid(reason: impl Into<String>) -> Self {
        ValidationResult {
            outcome: ValidationOutcome::Valid as i32,
            reason: reason.into(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        ValidationResult {
            outcome: ValidationOutcome::Invalid as i32,
            reason: reason.into(),
        }
    }
}

pub trait Validator {
    fn validate(&self, problem: &Problem, plan: &Plan) -> ValidationResult;
}
