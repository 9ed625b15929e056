//! Constant-valued expressions. Unlike the full Unified Planning expression language (which also
//! covers parameters, variables and function application for describing action bodies
//! symbolically), every expression this crate emits or consumes at the wire boundary is already
//! fully ground: fluent values, action-instance parameters and goal values are always constants
//! by the time they reach a `Problem` or a `Plan`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct Real {
    #[prost(int64, tag = "1")]
    pub numerator: i64,
    #[prost(int64, tag = "2")]
    pub denominator: i64,
}

impl Real {
    pub fn from_f64(value: f64) -> Self {
        // matches the precision the teacher's planner-facing messages already settle for:
        // a fixed denominator is enough for every duration/mass/speed this crate produces.
        const DENOM: i64 = 1_000_000;
        Real {
            numerator: (value * DENOM as f64).round() as i64,
            denominator: DENOM,
        }
    }

    pub fn to_f64(self) -> f64 {
        if self.denominator == 0 {
            0.0
        } else {
            self.numerator as f64 / self.denominator as f64
        }
    }
}

impl From<f64> for Real {
    fn from(value: f64) -> Self {
        Real::from_f64(value)
    }
}

/// A ground constant value: a symbol (object or sentinel name), an integer, a real, or a boolean.
#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Oneof)]
pub enum AtomContent {
    #[prost(string, tag = "1")]
    Symbol(::prost::alloc::string::String),
    #[prost(int64, tag = "2")]
    Int(i64),
    #[prost(message, tag = "3")]
    Real(Real),
    #[prost(bool, tag = "4")]
    Boolean(bool),
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct Atom {
    #[prost(oneof = "AtomContent", tags = "1, 2, 3, 4")]
    pub content: ::core::option::Option<AtomContent>,
}

impl Atom {
    pub fn symbol(name: impl Into<String>) -> Self {
        Atom {
            content: Some(AtomContent::Symbol(name.into())),
        }
    }

    pub fn int(value: i64) -> Self {
        Atom {
            content: Some(AtomContent::Int(value)),
        }
    }

    pub fn real(value: f64) -> Self {
        Atom {
            content: Some(AtomContent::Real(Real::from_f64(value))),
        }
    }

    pub fn boolean(value: bool) -> Self {
        Atom {
            content: Some(AtomContent::Boolean(value)),
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match &self.content {
            Some(AtomContent::Symbol(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match &self.content {
            Some(AtomContent::Real(r)) => Some(r.to_f64()),
            Some(AtomContent::Int(i)) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match &self.content {
            Some(AtomContent::Boolean(b)) => Some(*b),
            _ => None,
        }
    }
}
