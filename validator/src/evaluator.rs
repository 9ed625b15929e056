//! A small recursive evaluator for the `BoolExpr`/`NumExpr` trees goals and conditions are written
//! in (§4.8: the validator "interprets" the planner's claim that a plan reaches the goal). Fluent
//! types aren't carried on `FluentRef` itself, so each fluent reference is resolved against the
//! `Problem`'s fluent declarations to know whether to read it as a bool, a number, or an object.

use agri_planning_actions::state_view::{FluentKey, StateView};
use agri_planning_api::expression::{Atom, AtomContent};
use agri_planning_api::plan::{BoolExpr, BoolExprKind, Cmp, NumExpr, NumExprKind};
use agri_planning_api::problem::Problem;

const EPS: f64 = 1e-6;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Real(f64),
    Symbol(String),
    Bool(bool),
}

impl Value {
    fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(r) => Some(*r),
            _ => None,
        }
    }
}

fn atom_to_value(atom: &Atom) -> Value {
    match &atom.content {
        Some(AtomContent::Symbol(s)) => Value::Symbol(s.clone()),
        Some(AtomContent::Int(i)) => Value::Real(*i as f64),
        Some(AtomContent::Real(r)) => Value::Real(r.to_f64()),
        Some(AtomContent::Boolean(b)) => Value::Bool(*b),
        None => Value::Real(0.0),
    }
}

fn fluent_value_type<'p>(problem: &'p Problem, name: &str) -> &'p str {
    problem.fluents.iter().find(|f| f.name == name).map(|f| f.value_type.as_str()).unwrap_or("real")
}

fn fluent_key(fluent: &str, params: &[Atom]) -> FluentKey {
    FluentKey::new(fluent, &params.iter().map(|a| a.as_symbol().unwrap_or_default()).collect::<Vec<_>>())
}

pub fn eval_num(expr: &NumExpr, problem: &Problem, state: &dyn StateView) -> Value {
    match &expr.kind {
        Some(NumExprKind::Const(atom)) => atom_to_value(atom),
        Some(NumExprKind::Fluent(fref)) => {
            let key = fluent_key(&fref.fluent, &fref.params);
            let value_type = fluent_value_type(problem, &fref.fluent);
            if value_type == "bool" {
                Value::Bool(state.get_bool(&key))
            } else if value_type.starts_with("integer") {
                Value::Real(state.get_int(&key) as f64)
            } else if value_type.starts_with("real") {
                Value::Real(state.get_real(&key))
            } else {
                Value::Symbol(state.get_object(&key))
            }
        }
        Some(NumExprKind::Sum(list)) => {
            let total = list.terms.iter().map(|t| eval_num(t, problem, state).as_real().unwrap_or(0.0)).sum();
            Value::Real(total)
        }
        Some(NumExprKind::Neg(inner)) => Value::Real(-eval_num(inner, problem, state).as_real().unwrap_or(0.0)),
        None => Value::Real(0.0),
    }
}

fn compare(lhs: Value, op: Cmp, rhs: Value) -> bool {
    match (lhs, rhs) {
        (Value::Real(a), Value::Real(b)) => match op {
            Cmp::Eq => (a - b).abs() < EPS,
            Cmp::Neq => (a - b).abs() >= EPS,
            Cmp::Lt => a < b - EPS,
            Cmp::Leq => a <= b + EPS,
            Cmp::Gt => a > b + EPS,
            Cmp::Geq => a >= b - EPS,
        },
        (Value::Symbol(a), Value::Symbol(b)) => match op {
            Cmp::Eq => a == b,
            Cmp::Neq => a != b,
            _ => false,
        },
        (Value::Bool(a), Value::Bool(b)) => match op {
            Cmp::Eq => a == b,
            Cmp::Neq => a != b,
            _ => false,
        },
        _ => false,
    }
}

pub fn eval_bool(expr: &BoolExpr, problem: &Problem, state: &dyn StateView) -> bool {
    match &expr.kind {
        Some(BoolExprKind::Const(b)) => *b,
        Some(BoolExprKind::Fluent(fref)) => state.get_bool(&fluent_key(&fref.fluent, &fref.params)),
        Some(BoolExprKind::Compare(cmp)) => {
            let lhs = cmp.lhs.as_ref().map(|l| eval_num(l, problem, state)).unwrap_or(Value::Real(0.0));
            let rhs = cmp.rhs.as_ref().map(|r| eval_num(r, problem, state)).unwrap_or(Value::Real(0.0));
            let op = match cmp.op {
                0 => Cmp::Eq,
                1 => Cmp::Neq,
                2 => Cmp::Lt,
                3 => Cmp::Leq,
                4 => Cmp::Gt,
                _ => Cmp::Geq,
            };
            compare(lhs, op, rhs)
        }
        Some(BoolExprKind::And(list)) => list.terms.iter().all(|t| eval_bool(t, problem, state)),
        Some(BoolExprKind::Or(list)) => list.terms.iter().any(|t| eval_bool(t, problem, state)),
        Some(BoolExprKind::Not(inner)) => !eval_bool(inner, problem, state),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agri_planning_actions::state_view::{FluentState, FluentValue};

    #[test]
    fn compares_real_fluent_against_constant() {
        let problem = Problem {
            domain_name: "agri".to_string(),
            problem_name: "p".to_string(),
            types: vec![],
            fluents: vec![agri_planning_api::problem::Fluent {
                name: "field_harvested_percentage".to_string(),
                value_type: "real[0, 100]".to_string(),
                parameters: vec![],
                default_value: None,
                is_static: false,
            }],
            objects: vec![],
            actions: vec![],
            initial_state: vec![],
            timed_effects: vec![],
            goals: vec![],
            features: vec![],
            metrics: vec![],
        };
        let mut state = FluentState::new();
        state.set(FluentKey::new("field_harvested_percentage", &["field_1"]), FluentValue::Real(100.0));
        let goal = BoolExpr::eq(
            NumExpr::fluent("field_harvested_percentage", vec![Atom::symbol("field_1")]),
            NumExpr::constant(100.0),
        );
        assert!(eval_bool(&goal, &problem, &state));
    }

    #[test]
    fn and_requires_every_term() {
        let problem = Problem {
            domain_name: "agri".to_string(),
            problem_name: "p".to_string(),
            types: vec![],
            fluents: vec![],
            objects: vec![],
            actions: vec![],
            initial_state: vec![],
            timed_effects: vec![],
            goals: vec![],
            features: vec![],
            metrics: vec![],
        };
        let state = FluentState::new();
        let goal = BoolExpr::and(vec![BoolExpr { kind: Some(BoolExprKind::Const(true)) }, BoolExpr { kind: Some(BoolExprKind::Const(false)) }]);
        assert!(!eval_bool(&goal, &problem, &state));
    }
}
