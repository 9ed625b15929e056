//! Decodes a `Plan` produced against one of this crate's `Problem`s back into per-entity machine,
//! field and silo-access state histories a caller can query at any point in time (§4.7).

pub mod decoder;
pub mod error;
pub mod history;

pub use decoder::{decode, DecodedPlan};
pub use error::DecodeError;
pub use history::{FieldStateRecord, History, MachineStateRecord, SiloStateRecord, TimeSpan};
