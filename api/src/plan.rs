//! The `Plan` message, its `ActionInstance`s, and the small boolean/numeric expression trees used
//! by action conditions, effect guards and goals (`BoolExpr`, `NumExpr`). Unlike the constant-only
//! [`crate::expression::Atom`], these trees may reference a fluent instance symbolically — they
//! are evaluated against a planner `State`, never embedded in a `Plan` itself.

use crate::expression::Atom;
use serde::{Deserialize, Serialize};

/// A reference to one fluent instance: its name plus ground parameter atoms, e.g.
/// `field_harvester(field_3)`.
#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct FluentRef {
    #[prost(string, tag = "1")]
    pub fluent: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub params: ::prost::alloc::vec::Vec<Atom>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Oneof)]
pub enum NumExprKind {
    #[prost(message, tag = "1")]
    Const(Atom),
    #[prost(message, tag = "2")]
    Fluent(FluentRef),
    #[prost(message, tag = "3")]
    Sum(NumExprList),
    #[prost(message, tag = "4")]
    Neg(Box<NumExpr>),
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct NumExprList {
    #[prost(message, repeated, tag = "1")]
    pub terms: ::prost::alloc::vec::Vec<NumExpr>,
}

/// A numeric expression: a constant, a fluent reference, a sum of sub-expressions, or a negation.
/// Enough to express every metric and simulated-effect recomputation this crate needs, without a
/// full general-purpose arithmetic language.
#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct NumExpr {
    #[prost(oneof = "NumExprKind", tags = "1, 2, 3, 4")]
    pub kind: ::core::option::Option<NumExprKind>,
}

impl NumExpr {
    pub fn constant(value: f64) -> Self {
        NumExpr {
            kind: Some(NumExprKind::Const(Atom::real(value))),
        }
    }

    /// Wraps any ground atom — including a symbol — as a constant expression. Used to compare an
    /// object-valued fluent (e.g. `tv_current_location`) against a specific object by name.
    pub fn from_atom(atom: Atom) -> Self {
        NumExpr {
            kind: Some(NumExprKind::Const(atom)),
        }
    }

    pub fn fluent(name: impl Into<String>, params: Vec<Atom>) -> Self {
        NumExpr {
            kind: Some(NumExprKind::Fluent(FluentRef {
                fluent: name.into(),
                params,
            })),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ::prost::Enumeration)]
#[repr(i32)]
pub enum Cmp {
    Eq = 0,
    Neq = 1,
    Lt = 2,
    Leq = 3,
    Gt = 4,
    Geq = 5,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Oneof)]
pub enum BoolExprKind {
    #[prost(bool, tag = "1")]
    Const(bool),
    #[prost(message, tag = "2")]
    Fluent(FluentRef),
    #[prost(message, tag = "3")]
    Compare(Box<CompareExpr>),
    #[prost(message, tag = "4")]
    And(BoolExprList),
    #[prost(message, tag = "5")]
    Or(BoolExprList),
    #[prost(message, tag = "6")]
    Not(Box<BoolExpr>),
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct CompareExpr {
    #[prost(enumeration = "Cmp", tag = "1")]
    pub op: i32,
    #[prost(message, optional, tag = "2")]
    pub lhs: ::core::option::Option<NumExpr>,
    #[prost(message, optional, tag = "3")]
    pub rhs: ::core::option::Option<NumExpr>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct BoolExprList {
    #[prost(message, repeated, tag = "1")]
    pub terms: ::prost::alloc::vec::Vec<BoolExpr>,
}

/// A boolean expression: a constant, a boolean fluent reference, a comparison between two numeric
/// expressions, a conjunction/disjunction, or a negation.
#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct BoolExpr {
    #[prost(oneof = "BoolExprKind", tags = "1, 2, 3, 4, 5, 6")]
    pub kind: ::core::option::Option<BoolExprKind>,
}

impl BoolExpr {
    pub fn fluent(name: impl Into<String>, params: Vec<Atom>) -> Self {
        BoolExpr {
            kind: Some(BoolExprKind::Fluent(FluentRef {
                fluent: name.into(),
                params,
            })),
        }
    }

    pub fn not(self) -> Self {
        BoolExpr {
            kind: Some(BoolExprKind::Not(Box::new(self))),
        }
    }

    pub fn and(terms: Vec<BoolExpr>) -> Self {
        BoolExpr {
            kind: Some(BoolExprKind::And(BoolExprList { terms })),
        }
    }

    pub fn or(terms: Vec<BoolExpr>) -> Self {
        BoolExpr {
            kind: Some(BoolExprKind::Or(BoolExprList { terms })),
        }
    }

    pub fn eq(lhs: NumExpr, rhs: NumExpr) -> Self {
        BoolExpr::compare(Cmp::Eq, lhs, rhs)
    }

    pub fn neq(lhs: NumExpr, rhs: NumExpr) -> Self {
        BoolExpr::compare(Cmp::Neq, lhs, rhs)
    }

    pub fn geq(lhs: NumExpr, rhs: NumExpr) -> Self {
        BoolExpr::compare(Cmp::Geq, lhs, rhs)
    }

    pub fn compare(op: Cmp, lhs: NumExpr, rhs: NumExpr) -> Self {
        BoolExpr {
            kind: Some(BoolExprKind::Compare(Box::new(CompareExpr {
                op: op as i32,
                lhs: Some(lhs),
                rhs: Some(rhs),
            }))),
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct ActionInstance {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub action_name: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "3")]
    pub parameters: ::prost::alloc::vec::Vec<Atom>,
    /// `0` is fine for sequential plans; meaningful only under `DURATIVE_ACTIONS`.
    #[prost(message, optional, tag = "4")]
    pub start_time: ::core::option::Option<crate::expression::Real>,
    #[prost(message, optional, tag = "5")]
    pub end_time: ::core::option::Option<crate::expression::Real>,
}

impl ActionInstance {
    pub fn start(&self) -> f64 {
        self.start_time.map(|r| r.to_f64()).unwrap_or(0.0)
    }

    pub fn end(&self) -> f64 {
        self.end_time.map(|r| r.to_f64()).unwrap_or_else(|| self.start())
    }

    pub fn param_str(&self, idx: usize) -> Option<&str> {
        self.parameters.get(idx).and_then(|a| a.as_symbol())
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct Plan {
    /// Ordered so that, for sequential plans, the list order alone defines the total order.
    #[prost(message, repeated, tag = "1")]
    pub actions: ::prost::alloc::vec::Vec<ActionInstance>,
}
