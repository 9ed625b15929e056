//! The `Problem` message and everything it is built from: types, fluents, objects, actions,
//! initial state, goals, a metric and a feature set. This is the ready-to-plan output of the
//! encoder (see `agri-planners::encoder`) and the input half of the Validator's contract.

use crate::expression::Atom;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct TypeDeclaration {
    #[prost(string, tag = "1")]
    pub type_name: ::prost::alloc::string::String,
    /// Empty string for a root type (object, integer, real, bool are implicit).
    #[prost(string, tag = "2")]
    pub parent_type: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct Parameter {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub r#type: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct Fluent {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    /// One of "bool", "integer[lb, ub]", "real[lb, ub]", or an object-kind type name.
    #[prost(string, tag = "2")]
    pub value_type: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "3")]
    pub parameters: ::prost::alloc::vec::Vec<Parameter>,
    #[prost(message, optional, tag = "4")]
    pub default_value: ::core::option::Option<Atom>,
    /// Fluent never changes after the initial state (the encoder folds these into lookup tables).
    #[prost(bool, tag = "5")]
    pub is_static: bool,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct ObjectDeclaration {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub r#type: ::prost::alloc::string::String,
}

pub mod effect_expression {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum EffectKind {
        Assign = 0,
        Increase = 1,
        Decrease = 2,
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct EffectExpression {
    #[prost(enumeration = "effect_expression::EffectKind", tag = "1")]
    pub kind: i32,
    /// A `StateVariable`-shaped expression naming the fluent instance affected: fluent name plus
    /// ground parameter atoms, e.g. `field_harvester(field_3)`.
    #[prost(string, tag = "2")]
    pub fluent: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "3")]
    pub fluent_params: ::prost::alloc::vec::Vec<Atom>,
    /// Concrete value. Absent when the value is only known through the action's simulated effect.
    #[prost(message, optional, tag = "4")]
    pub value: ::core::option::Option<Atom>,
    /// Guard for a conditional effect; absent for an unconditional one.
    #[prost(message, optional, tag = "5")]
    pub condition: ::core::option::Option<super::plan::BoolExpr>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct Effect {
    #[prost(message, optional, tag = "1")]
    pub effect: ::core::option::Option<EffectExpression>,
    #[prost(message, optional, tag = "2")]
    pub occurrence_time: ::core::option::Option<Timing>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct Condition {
    #[prost(message, optional, tag = "1")]
    pub cond: ::core::option::Option<super::plan::BoolExpr>,
    #[prost(message, optional, tag = "2")]
    pub span: ::core::option::Option<TimeInterval>,
}

pub mod timepoint {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum TimepointKind {
        GlobalStart = 0,
        GlobalEnd = 1,
        Start = 2,
        End = 3,
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct Timepoint {
    #[prost(enumeration = "timepoint::TimepointKind", tag = "1")]
    pub kind: i32,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct Timing {
    #[prost(message, optional, tag = "1")]
    pub timepoint: ::core::option::Option<Timepoint>,
    #[prost(message, optional, tag = "2")]
    pub delay: ::core::option::Option<crate::expression::Real>,
}

impl Timing {
    pub fn start() -> Self {
        Timing {
            timepoint: Some(Timepoint {
                kind: timepoint::TimepointKind::Start as i32,
            }),
            delay: Some(0.0.into()),
        }
    }

    pub fn end() -> Self {
        Timing {
            timepoint: Some(Timepoint {
                kind: timepoint::TimepointKind::End as i32,
            }),
            delay: Some(0.0.into()),
        }
    }

    /// `end_minus(delay)`: a timing that coincides with `End` when `delay == 0`.
    pub fn end_minus(delay: f64) -> Self {
        Timing {
            timepoint: Some(Timepoint {
                kind: timepoint::TimepointKind::End as i32,
            }),
            delay: Some((-delay).into()),
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct Interval {
    #[prost(bool, tag = "1")]
    pub is_left_open: bool,
    #[prost(message, optional, tag = "2")]
    pub lower: ::core::option::Option<Atom>,
    #[prost(bool, tag = "3")]
    pub is_right_open: bool,
    #[prost(message, optional, tag = "4")]
    pub upper: ::core::option::Option<Atom>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct TimeInterval {
    #[prost(bool, tag = "1")]
    pub is_left_open: bool,
    #[prost(message, optional, tag = "2")]
    pub lower: ::core::option::Option<Timing>,
    #[prost(bool, tag = "3")]
    pub is_right_open: bool,
    #[prost(message, optional, tag = "4")]
    pub upper: ::core::option::Option<Timing>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct Duration {
    #[prost(message, optional, tag = "1")]
    pub controllable_in_bounds: ::core::option::Option<Interval>,
}

impl Duration {
    pub fn fixed(seconds: f64) -> Self {
        Duration {
            controllable_in_bounds: Some(Interval {
                is_left_open: false,
                lower: Some(Atom::real(seconds)),
                is_right_open: false,
                upper: Some(Atom::real(seconds)),
            }),
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct Action {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub parameters: ::prost::alloc::vec::Vec<Parameter>,
    /// Absent for instantaneous (sequential) actions.
    #[prost(message, optional, tag = "3")]
    pub duration: ::core::option::Option<Duration>,
    #[prost(message, repeated, tag = "4")]
    pub conditions: ::prost::alloc::vec::Vec<Condition>,
    #[prost(message, repeated, tag = "5")]
    pub effects: ::prost::alloc::vec::Vec<Effect>,
}

impl Action {
    pub fn is_durative(&self) -> bool {
        self.duration.is_some()
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct Goal {
    #[prost(message, optional, tag = "1")]
    pub goal: ::core::option::Option<super::plan::BoolExpr>,
    #[prost(message, optional, tag = "2")]
    pub timing: ::core::option::Option<TimeInterval>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct TimedEffect {
    #[prost(message, optional, tag = "1")]
    pub effect: ::core::option::Option<EffectExpression>,
    #[prost(message, optional, tag = "2")]
    pub occurrence_time: ::core::option::Option<Timing>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct Assignment {
    #[prost(string, tag = "1")]
    pub fluent: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub fluent_params: ::prost::alloc::vec::Vec<Atom>,
    #[prost(message, optional, tag = "3")]
    pub value: ::core::option::Option<Atom>,
}

pub mod metric {
    /// Restricted to the two kinds the Problem encoder ever produces: a makespan minimisation for
    /// temporal problems, and a weighted expression over the final state for sequential ones
    /// (§4.3 item 6 and the settings surface's `temporal_optimization_setting` /
    /// `sequential_optimization_settings`).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum MetricKind {
        MinimizeMakespan = 2,
        MinimizeExpressionOnFinalState = 3,
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct Metric {
    #[prost(enumeration = "metric::MetricKind", tag = "1")]
    pub kind: i32,
    #[prost(message, optional, tag = "2")]
    pub expression: ::core::option::Option<super::plan::NumExpr>,
}

/// Restricted to the features this crate's problems actually declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ::prost::Enumeration)]
#[repr(i32)]
pub enum Feature {
    NumericFluents = 20,
    ConditionalEffects = 13,
    SimulatedEffects = 17,
    DurativeActions = 21,
    ContinuousTime = 0,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct Problem {
    #[prost(string, tag = "1")]
    pub domain_name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub problem_name: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "3")]
    pub types: ::prost::alloc::vec::Vec<TypeDeclaration>,
    #[prost(message, repeated, tag = "4")]
    pub fluents: ::prost::alloc::vec::Vec<Fluent>,
    #[prost(message, repeated, tag = "5")]
    pub objects: ::prost::alloc::vec::Vec<ObjectDeclaration>,
    #[prost(message, repeated, tag = "6")]
    pub actions: ::prost::alloc::vec::Vec<Action>,
    #[prost(message, repeated, tag = "7")]
    pub initial_state: ::prost::alloc::vec::Vec<Assignment>,
    #[prost(message, repeated, tag = "8")]
    pub timed_effects: ::prost::alloc::vec::Vec<TimedEffect>,
    #[prost(message, repeated, tag = "9")]
    pub goals: ::prost::alloc::vec::Vec<Goal>,
    #[prost(enumeration = "Feature", repeated, tag = "10")]
    pub features: ::prost::alloc::vec::Vec<i32>,
    #[prost(message, repeated, tag = "11")]
    pub metrics: ::prost::alloc::vec::Vec<Metric>,
}

impl Problem {
    pub fn object_names(&self) -> HashMap<&str, &str> {
        self.objects.iter().map(|o| (o.name.as_str(), o.r#type.as_str())).collect()
    }
}
