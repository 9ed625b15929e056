//! §4.7.1: decode error conditions, each naming the offending action index and name.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("action #{index} ({action}) references unknown object {object:?}")]
    UnknownObject { index: usize, action: String, object: String },

    #[error("action #{index} ({action}) overloads {entity} past 100%/capacity: {value} > {limit}")]
    Overload {
        index: usize,
        action: String,
        entity: String,
        value: f64,
        limit: f64,
    },

    #[error("action #{index} ({action}) drives {entity}'s bunker mass negative: {value}")]
    NegativeBunkerMass { index: usize, action: String, entity: String, value: f64 },

    #[error("action #{index} ({action}) produces an overlapping record for {entity} at t={at}")]
    OverlappingRecord { index: usize, action: String, entity: String, at: f64 },
}
