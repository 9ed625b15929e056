//! §9 redesign note: "Arbitrary per-state Python objects passed into simulated-effect callbacks ->
//! the callback receives an immutable state-view object exposing typed getters `get_bool`,
//! `get_int`, `get_real`, `get_object`. No dynamic dispatch on fluent types." [`StateView`] is
//! that object; [`FluentState`] is the dense, owned implementation used by encoder-side
//! simulation, tests, and the decoder's round-trip check (§8).

use std::collections::HashMap;

/// A single fluent instance key: the fluent name plus its ground object-parameter names.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FluentKey {
    pub fluent: String,
    pub params: Vec<String>,
}

impl FluentKey {
    pub fn new(fluent: impl Into<String>, params: &[&str]) -> Self {
        FluentKey {
            fluent: fluent.into(),
            params: params.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum FluentValue {
    Bool(bool),
    Int(i64),
    Real(f64),
    Object(String),
}

impl FluentValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FluentValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FluentValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            FluentValue::Real(r) => Some(*r),
            FluentValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&str> {
        match self {
            FluentValue::Object(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// The typed-getter contract simulated-effect callbacks see. Callbacks must not retain a
/// `&dyn StateView` past the call (§3 "Planner State ... passed to simulated-effect callbacks by
/// reference; callbacks must not retain them") — enforced here only by convention, since Rust
/// lifetimes already prevent a borrow from outliving the call in well-typed callback signatures.
pub trait StateView {
    fn get_bool(&self, key: &FluentKey) -> bool;
    fn get_int(&self, key: &FluentKey) -> i64;
    fn get_real(&self, key: &FluentKey) -> f64;
    fn get_object(&self, key: &FluentKey) -> String;
}

/// A dense, owned fluent assignment. Not the planner's actual `State` type (that lives in the
/// external planner, §3) — this is the crate-local stand-in used wherever the core needs to
/// simulate effects itself: heuristics' base-plan simulation (§4.6) and the decoder/validator
/// round-trip check (§8).
#[derive(Clone, Default, Debug)]
pub struct FluentState {
    values: HashMap<FluentKey, FluentValue>,
}

impl FluentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: FluentKey, value: FluentValue) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: &FluentKey) -> Option<&FluentValue> {
        self.values.get(key)
    }
}

impl StateView for FluentState {
    fn get_bool(&self, key: &FluentKey) -> bool {
        self.values.get(key).and_then(|v| v.as_bool()).unwrap_or(false)
    }

    fn get_int(&self, key: &FluentKey) -> i64 {
        self.values.get(key).and_then(|v| v.as_int()).unwrap_or(0)
    }

    fn get_real(&self, key: &FluentKey) -> f64 {
        self.values.get(key).and_then(|v| v.as_real()).unwrap_or(0.0)
    }

    fn get_object(&self, key: &FluentKey) -> String {
        self.values
            .get(key)
            .and_then(|v| v.as_object())
            .map(|s| s.to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fluent_reads_as_type_default() {
        let state = FluentState::new();
        let key = FluentKey::new("tv_bunker_mass", &["tv_1"]);
        assert_eq!(state.get_real(&key), 0.0);
        assert!(!state.get_bool(&FluentKey::new("tv_free", &["tv_1"])));
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut state = FluentState::new();
        let key = FluentKey::new("tv_bunker_mass", &["tv_1"]);
        state.set(key.clone(), FluentValue::Real(4500.0));
        assert_eq!(state.get_real(&key), 4500.0);
    }
}
