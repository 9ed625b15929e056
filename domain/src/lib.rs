//! Typed world state shared by the rest of the workspace (§3, §4.1): the entity catalog, the
//! fluent registry, the location namespace and the settings surface. Nothing in this crate talks
//! to a planner or a validator; it is pure data plus the invariants enforced at construction time.

pub mod defaults;
pub mod domain;
pub mod entities;
pub mod error;
pub mod fluents;
pub mod ids;
pub mod naming;
pub mod settings;
pub mod state;

pub use domain::{Domain, DomainBuilder};
pub use error::DomainBuildError;
