//! Wire-level types for the two narrow external interfaces this crate talks to: a **Planner**
//! that turns a [`Problem`] into a [`Plan`], and a **Validator** that checks a `(Problem, Plan)`
//! pair. Both are expressed as plain Rust traits over these message types (see [`planner`] and
//! [`validator`]) rather than as a hosted RPC service: the surrounding specification never asks
//! this crate to host or dial a network endpoint, only to build and consume these messages.
//!
//! The message shapes themselves mirror the Unified Planning wire protocol, trimmed to the subset
//! this system's problems actually populate. Keeping `prost::Message` derives on them costs
//! nothing and means a caller that *does* want to ship them over gRPC can reuse these types
//! unchanged.

pub mod expression;
pub mod plan;
pub mod planner;
pub mod problem;
pub mod validator;

pub use expression::*;
pub use plan::*;
pub use problem::*;
