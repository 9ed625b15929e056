//! A [`Validator`] implementation that doesn't shell out to an external checker: it decodes the
//! plan itself (re-using `agri-planning-decoder`'s re-simulation) and evaluates the problem's goal
//! expressions against the resulting final state. Decode errors (overloads, negative bunker mass,
//! unknown objects) already double as plan-invalidity; anything that decodes cleanly is then
//! checked against the declared goals.

use crate::evaluator::eval_bool;
use agri_planning_actions::state_view::{FluentKey, FluentState, FluentValue};
use agri_planning_api::plan::Plan;
use agri_planning_api::problem::{Feature, Problem};
use agri_planning_api::validator::{ValidationResult, Validator};
use agri_planning_decoder::decode;

const HARVESTED_THRESHOLD: f64 = 100.0 - 1e-6;

pub struct SimulatingValidator;

impl SimulatingValidator {
    pub fn new() -> Self {
        SimulatingValidator
    }

    fn final_state(&self, problem: &Problem, decoded: &agri_planning_decoder::DecodedPlan, horizon: f64) -> FluentState {
        let mut state = FluentState::new();
        for object in &problem.objects {
            match object.r#type.as_str() {
                "field" => {
                    if let Some((_, record)) = decoded.get_field_state_at(&object.name, horizon, None) {
                        state.set(FluentKey::new("field_harvested_percentage", &[&object.name]), FluentValue::Real(record.harvested_percentage));
                        state.set(
                            FluentKey::new("field_harvested", &[&object.name]),
                            FluentValue::Bool(record.harvested_percentage >= HARVESTED_THRESHOLD),
                        );
                        if let Some(harvester) = &record.harvester {
                            state.set(FluentKey::new("field_harvester", &[&object.name]), FluentValue::Object(harvester.clone()));
                        }
                    }
                }
                "tv" => {
                    if let Some((_, record)) = decoded.get_machine_state_at(&object.name, horizon, None) {
                        state.set(FluentKey::new("tv_bunker_mass", &[&object.name]), FluentValue::Real(record.mass_end));
                        state.set(FluentKey::new("tv_current_location", &[&object.name]), FluentValue::Object(record.location.clone()));
                    }
                }
                "harvester" => {
                    if let Some((_, record)) = decoded.get_machine_state_at(&object.name, horizon, None) {
                        state.set(FluentKey::new("harv_current_field_access", &[&object.name]), FluentValue::Object(record.location.clone()));
                    }
                }
                "silo_access" => {
                    if let Some((_, record)) = decoded.get_silo_state_at(&object.name, horizon, None) {
                        state.set(FluentKey::new("silo_access_mass_stored", &[&object.name]), FluentValue::Real(record.mass_in_silo));
                    }
                }
                _ => {}
            }
        }
        state
    }
}

impl Default for SimulatingValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for SimulatingValidator {
    fn validate(&self, problem: &Problem, plan: &Plan) -> ValidationResult {
        let is_temporal = problem.features.contains(&(Feature::DurativeActions as i32));
        let decoded = match decode(problem, plan, is_temporal) {
            Ok(decoded) => decoded,
            Err(err) => return ValidationResult::invalid(err.to_string()),
        };

        let horizon = if is_temporal {
            plan.actions.iter().map(|a| a.end()).fold(0.0_f64, f64::max)
        } else {
            plan.actions.len() as f64
        };
        let state = self.final_state(problem, &decoded, horizon);

        for (index, goal) in problem.goals.iter().enumerate() {
            let Some(expr) = &goal.goal else { continue };
            if !eval_bool(expr, problem, &state) {
                return ValidationResult::invalid(format!("goal #{index} not satisfied in the final state"));
            }
        }

        ValidationResult::valid("plan decodes cleanly and satisfies every declared goal")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agri_planning_api::expression::Atom;
    use agri_planning_api::plan::{ActionInstance, BoolExpr, NumExpr};
    use agri_planning_api::problem::{Assignment, Goal, ObjectDeclaration};
    use agri_planning_api::validator::ValidationOutcome;

    fn obj(name: &str, kind: &str) -> ObjectDeclaration {
        ObjectDeclaration {
            name: name.to_string(),
            r#type: kind.to_string(),
        }
    }

    fn assign(fluent: &str, param: &str, value: Atom) -> Assignment {
        Assignment {
            fluent: fluent.to_string(),
            fluent_params: vec![Atom::symbol(param)],
            value: Some(value),
        }
    }

    fn instance(name: &str) -> ActionInstance {
        ActionInstance {
            id: name.to_string(),
            action_name: name.to_string(),
            parameters: vec![],
            start_time: None,
            end_time: None,
        }
    }

    fn problem_with_goal() -> Problem {
        Problem {
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
            objects: vec![
                obj("field_1", "field"),
                obj("machine_1", "harvester"),
                obj("machine_2", "tv"),
                obj("silo_access_1", "silo_access"),
            ],
            actions: vec![],
            initial_state: vec![
                assign("field_total_yield_mass", "field_1", Atom::real(1000.0)),
                assign("field_harvested_percentage", "field_1", Atom::real(0.0)),
                assign("tv_bunker_capacity", "machine_2", Atom::real(2000.0)),
                assign("tv_bunker_mass", "machine_2", Atom::real(0.0)),
                assign("tv_current_location", "machine_2", Atom::symbol("init_loc_2")),
                assign("silo_access_available_capacity", "silo_access_1", Atom::real(5000.0)),
            ],
            timed_effects: vec![],
            goals: vec![Goal {
                goal: Some(BoolExpr::eq(
                    NumExpr::fluent("field_harvested_percentage", vec![Atom::symbol("field_1")]),
                    NumExpr::constant(100.0),
                )),
                timing: None,
            }],
            features: vec![],
            metrics: vec![],
        }
    }

    #[test]
    fn plan_reaching_the_goal_validates() {
        let problem = problem_with_goal();
        let plan = Plan {
            actions: vec![
                instance("drive_harv_to_field_and_init_machine_1_field_1"),
                instance("drive_tv_to_field_and_reserve_overload_at_start_machine_2_field_1"),
                instance("overload_field_finished_machine_1_machine_2"),
            ],
        };
        let validator = SimulatingValidator::new();
        let result = validator.validate(&problem, &plan);
        assert_eq!(result.outcome(), ValidationOutcome::Valid);
    }

    #[test]
    fn plan_not_reaching_the_goal_is_invalid() {
        let problem = problem_with_goal();
        let plan = Plan {
            actions: vec![instance("drive_harv_to_field_and_init_machine_1_field_1")],
        };
        let validator = SimulatingValidator::new();
        let result = validator.validate(&problem, &plan);
        assert_eq!(result.outcome(), ValidationOutcome::Invalid);
    }

    #[test]
    fn decode_error_is_reported_as_invalid() {
        let problem = problem_with_goal();
        let plan = Plan {
            actions: vec![instance("drive_harv_to_field_and_init_machine_1_field_99")],
        };
        let validator = SimulatingValidator::new();
        let result = validator.validate(&problem, &plan);
        assert_eq!(result.outcome(), ValidationOutcome::Invalid);
    }
}
