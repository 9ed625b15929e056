//! §4.7: walks a [`Plan`] once against the [`Problem`] it was generated for, classifying each
//! action by name prefix and appending machine/field/silo-access state records. Actions are fully
//! grounded — the action name itself encodes every object the action touches (§9: no formal
//! parameters survive past the action library) — so object extraction works by peeling known
//! object names off the tail of the action name, in the same order the action library's
//! `format!` calls concatenated them.

use crate::error::DecodeError;
use crate::history::{FieldStateRecord, History, MachineStateRecord, SiloStateRecord};
use agri_planning_actions::action::ActionKind;
use agri_planning_api::plan::Plan;
use agri_planning_api::problem::Problem;
use std::collections::HashMap;

const EPS: f64 = 1e-6;

pub struct DecodedPlan {
    machines: HashMap<String, History<MachineStateRecord>>,
    fields: HashMap<String, History<FieldStateRecord>>,
    silo_accesses: HashMap<String, History<SiloStateRecord>>,
    precise_positions: bool,
}

impl DecodedPlan {
    pub fn get_machine_state_at(&self, name: &str, t: f64, hint: Option<usize>) -> Option<(usize, &MachineStateRecord)> {
        self.machines.get(name)?.get_state_at(t, hint)
    }

    pub fn get_field_state_at(&self, name: &str, t: f64, hint: Option<usize>) -> Option<(usize, &FieldStateRecord)> {
        self.fields.get(name)?.get_state_at(t, hint)
    }

    pub fn get_silo_state_at(&self, name: &str, t: f64, hint: Option<usize>) -> Option<(usize, &SiloStateRecord)> {
        self.silo_accesses.get(name)?.get_state_at(t, hint)
    }

    /// True iff positions are interpolated from geometry (§4.7: sequential decode may resolve
    /// out-of-field routes and so report precise positions; temporal decode never does).
    pub fn gives_precise_machine_positions(&self) -> bool {
        self.precise_positions
    }
}

/// The *last* matching assignment wins, mirroring how a planner State applies initial-state
/// assignments in order: a later assignment for the same fluent/object overrides an earlier one.
fn real_assignment(problem: &Problem, fluent: &str, object: &str) -> Option<f64> {
    problem
        .initial_state
        .iter()
        .filter(|a| a.fluent == fluent && a.fluent_params.first().and_then(|p| p.as_symbol()) == Some(object))
        .last()
        .and_then(|a| a.value.as_ref())
        .and_then(|v| v.as_real())
}

fn symbol_assignment(problem: &Problem, fluent: &str, object: &str) -> Option<String> {
    problem
        .initial_state
        .iter()
        .filter(|a| a.fluent == fluent && a.fluent_params.first().and_then(|p| p.as_symbol()) == Some(object))
        .last()
        .and_then(|a| a.value.as_ref())
        .and_then(|v| v.as_symbol())
        .map(|s| s.to_string())
}

fn match_one<'a>(remaining: &'a str, known_desc: &[&str]) -> Option<&'a str> {
    if known_desc.iter().any(|n| *n == remaining) {
        return Some(remaining);
    }
    known_desc.iter().find_map(|name| {
        remaining.strip_prefix(name).filter(|rest| rest.starts_with('_')).map(|_| &remaining[..name.len()])
    })
}

/// Peels exactly `expected_count` known object-name tokens off `remaining`, in order, the same
/// way the action library concatenated them with `_` separators. Returns `None` if any token
/// can't be resolved against the catalog or the whole string isn't exactly consumed.
fn parse_grounded_objects(remaining: &str, known_desc: &[&str], expected_count: usize) -> Option<Vec<String>> {
    let mut rest = remaining;
    let mut out = Vec::with_capacity(expected_count);
    for i in 0..expected_count {
        let is_last = i + 1 == expected_count;
        if is_last {
            if known_desc.iter().any(|n| *n == rest) {
                out.push(rest.to_string());
                rest = "";
            } else {
                return None;
            }
        } else {
            let matched = match_one(rest, known_desc)?;
            out.push(matched.to_string());
            rest = rest.get(matched.len() + 1..)?;
        }
    }
    if rest.is_empty() {
        Some(out)
    } else {
        None
    }
}

fn strip_tag<'a>(remaining: &'a str, tag: &str) -> Option<&'a str> {
    remaining.strip_prefix(tag).and_then(|r| r.strip_prefix('_')).or(if remaining == tag { Some("") } else { None })
}

fn close_and_push_machine(history: &mut History<MachineStateRecord>, ts: f64, location: String, mass: f64) {
    if let Some(last) = history.last_mut() {
        if last.ts_end.is_none() {
            last.ts_end = Some(ts);
        }
    }
    history.push(MachineStateRecord {
        ts_start: ts,
        ts_end: None,
        location,
        mass_start: mass,
        mass_end: mass,
    });
}

fn update_machine_mass(history: &mut History<MachineStateRecord>, new_mass: f64) {
    if let Some(last) = history.last_mut() {
        last.mass_end = new_mass;
    }
}

fn close_and_push_field(history: &mut History<FieldStateRecord>, ts: f64, harvester: Option<String>, pct: f64) {
    if let Some(last) = history.last_mut() {
        if last.ts_end.is_none() {
            last.ts_end = Some(ts);
        }
    }
    history.push(FieldStateRecord {
        ts_start: ts,
        ts_end: None,
        harvester,
        harvested_percentage: pct,
    });
}

fn update_field_percentage(history: &mut History<FieldStateRecord>, pct: f64) {
    if let Some(last) = history.last_mut() {
        last.harvested_percentage = pct;
    }
}

/// Decodes `plan` against `problem`. `is_temporal` selects whether action timestamps come from
/// the `ActionInstance`'s scheduled start/end (temporal) or a synthetic per-action sequence index
/// (sequential, where the plan wire format carries no cumulative-timestamp fluent values).
pub fn decode(problem: &Problem, plan: &Plan, is_temporal: bool) -> Result<DecodedPlan, DecodeError> {
    let object_names = problem.object_names();
    let mut known: Vec<&str> = object_names.keys().copied().collect();
    known.sort_unstable_by_key(|n| std::cmp::Reverse(n.len()));

    let mut machines: HashMap<String, History<MachineStateRecord>> = HashMap::new();
    let mut fields: HashMap<String, History<FieldStateRecord>> = HashMap::new();
    let mut silo_accesses: HashMap<String, History<SiloStateRecord>> = HashMap::new();

    let mut field_total_mass: HashMap<String, f64> = HashMap::new();
    let mut field_pct: HashMap<String, f64> = HashMap::new();
    let mut tv_capacity: HashMap<String, f64> = HashMap::new();
    let mut tv_mass: HashMap<String, f64> = HashMap::new();
    let mut silo_capacity: HashMap<String, f64> = HashMap::new();
    let mut harv_current_field: HashMap<String, String> = HashMap::new();

    for (name, kind) in &object_names {
        match *kind {
            "field" => {
                let total = real_assignment(problem, "field_total_yield_mass", name).unwrap_or(0.0);
                let pct = real_assignment(problem, "field_harvested_percentage", name).unwrap_or(0.0);
                field_total_mass.insert(name.to_string(), total);
                field_pct.insert(name.to_string(), pct);
                fields.insert(name.to_string(), {
                    let mut h = History::new();
                    h.push(FieldStateRecord {
                        ts_start: 0.0,
                        ts_end: None,
                        harvester: None,
                        harvested_percentage: pct,
                    });
                    h
                });
            }
            "tv" => {
                let capacity = real_assignment(problem, "tv_bunker_capacity", name).unwrap_or(0.0);
                let mass = real_assignment(problem, "tv_bunker_mass", name).unwrap_or(0.0);
                let location = symbol_assignment(problem, "tv_current_location", name).unwrap_or_default();
                tv_capacity.insert(name.to_string(), capacity);
                tv_mass.insert(name.to_string(), mass);
                machines.insert(name.to_string(), {
                    let mut h = History::new();
                    h.push(MachineStateRecord {
                        ts_start: 0.0,
                        ts_end: None,
                        location,
                        mass_start: mass,
                        mass_end: mass,
                    });
                    h
                });
            }
            "harvester" => {
                machines.insert(name.to_string(), {
                    let mut h = History::new();
                    h.push(MachineStateRecord {
                        ts_start: 0.0,
                        ts_end: None,
                        location: String::new(),
                        mass_start: 0.0,
                        mass_end: 0.0,
                    });
                    h
                });
            }
            "silo_access" => {
                let available = real_assignment(problem, "silo_access_available_capacity", name).unwrap_or(0.0);
                silo_capacity.insert(name.to_string(), available);
                silo_accesses.insert(name.to_string(), {
                    let mut h = History::new();
                    h.push(SiloStateRecord {
                        ts_start: 0.0,
                        ts_end: None,
                        mass_in_silo: 0.0,
                    });
                    h
                });
            }
            _ => {}
        }
    }

    for (index, instance) in plan.actions.iter().enumerate() {
        let name = instance.action_name.as_str();
        let ts_start = if is_temporal { instance.start() } else { index as f64 };
        let ts_end = if is_temporal { instance.end() } else { index as f64 + 1.0 };

        let Some(kind) = ActionKind::classify(name) else {
            tracing::trace!(action = name, "unclassified action name, skipping in decode");
            continue;
        };

        match kind {
            ActionKind::DriveHarvToFieldAndInit => {
                let remaining = name.strip_prefix("drive_harv_to_field_and_init_").unwrap_or(name);
                let objs = parse_grounded_objects(remaining, &known, 2)
                    .ok_or_else(|| DecodeError::UnknownObject { index, action: name.to_string(), object: remaining.to_string() })?;
                let (harvester, field) = (&objs[0], &objs[1]);
                let history = machines.entry(harvester.clone()).or_insert_with(History::new);
                close_and_push_machine(history, ts_start, field.clone(), 0.0);
                harv_current_field.insert(harvester.clone(), field.clone());
                let pct = *field_pct.get(field).unwrap_or(&0.0);
                let fhist = fields.entry(field.clone()).or_insert_with(History::new);
                close_and_push_field(fhist, ts_start, Some(harvester.clone()), pct);
            }
            ActionKind::DriveHarvToFieldExit => {
                let remaining = name.strip_prefix("drive_harv_to_field_exit_").unwrap_or(name);
                let objs = parse_grounded_objects(remaining, &known, 2)
                    .ok_or_else(|| DecodeError::UnknownObject { index, action: name.to_string(), object: remaining.to_string() })?;
                let (harvester, access) = (&objs[0], &objs[1]);
                let history = machines.entry(harvester.clone()).or_insert_with(History::new);
                close_and_push_machine(history, ts_start, access.clone(), 0.0);
                harv_current_field.remove(harvester);
            }
            ActionKind::DriveTvToFieldAndReserveOverload => {
                let remaining = name.strip_prefix("drive_tv_to_field_and_reserve_overload_").unwrap_or(name);
                let remaining = strip_tag(remaining, "at_arrival").or_else(|| strip_tag(remaining, "at_start")).unwrap_or(remaining);
                let objs = parse_grounded_objects(remaining, &known, 2)
                    .ok_or_else(|| DecodeError::UnknownObject { index, action: name.to_string(), object: remaining.to_string() })?;
                let (tv, field) = (&objs[0], &objs[1]);
                let mass = *tv_mass.get(tv).unwrap_or(&0.0);
                let history = machines.entry(tv.clone()).or_insert_with(History::new);
                close_and_push_machine(history, ts_start, field.clone(), mass);
            }
            ActionKind::DriveTvToFieldExit => {
                let remaining = name.strip_prefix("drive_tv_to_field_exit_").unwrap_or(name);
                let objs = parse_grounded_objects(remaining, &known, 2)
                    .ok_or_else(|| DecodeError::UnknownObject { index, action: name.to_string(), object: remaining.to_string() })?;
                let (tv, access) = (&objs[0], &objs[1]);
                let mass = *tv_mass.get(tv).unwrap_or(&0.0);
                let history = machines.entry(tv.clone()).or_insert_with(History::new);
                close_and_push_machine(history, ts_start, access.clone(), mass);
            }
            ActionKind::DoOverload => {
                let stripped = name.strip_prefix("do_overload_").or_else(|| name.strip_prefix("overload_")).unwrap_or(name);
                let (field_finished, remaining) = if let Some(r) = stripped.strip_prefix("field_finished_") {
                    (true, r)
                } else if let Some(r) = stripped.strip_prefix("field_not_finished_") {
                    (false, r)
                } else {
                    (false, stripped)
                };
                let objs = parse_grounded_objects(remaining, &known, 2)
                    .ok_or_else(|| DecodeError::UnknownObject { index, action: name.to_string(), object: remaining.to_string() })?;
                let (harvester, tv) = (&objs[0], &objs[1]);
                let field = harv_current_field
                    .get(harvester)
                    .cloned()
                    .ok_or_else(|| DecodeError::UnknownObject { index, action: name.to_string(), object: format!("current field of {harvester}") })?;

                let total = *field_total_mass.get(&field).unwrap_or(&0.0);
                let current_pct = *field_pct.get(&field).unwrap_or(&0.0);
                let remaining_mass = (total * (1.0 - current_pct / 100.0)).max(0.0);
                let capacity = *tv_capacity.get(tv).unwrap_or(&0.0);
                let current_tv_mass = *tv_mass.get(tv).unwrap_or(&0.0);
                let free_capacity = (capacity - current_tv_mass).max(0.0);
                let transferred = remaining_mass.min(free_capacity).max(0.0);

                let new_tv_mass = current_tv_mass + transferred;
                if new_tv_mass > capacity + EPS {
                    return Err(DecodeError::Overload {
                        index,
                        action: name.to_string(),
                        entity: tv.clone(),
                        value: new_tv_mass,
                        limit: capacity,
                    });
                }
                let new_pct = if field_finished {
                    100.0
                } else if total > 0.0 {
                    (current_pct + (transferred / total) * 100.0).min(100.0)
                } else {
                    current_pct
                };
                if new_pct > 100.0 + EPS {
                    return Err(DecodeError::Overload {
                        index,
                        action: name.to_string(),
                        entity: field.clone(),
                        value: new_pct,
                        limit: 100.0,
                    });
                }

                tv_mass.insert(tv.clone(), new_tv_mass);
                field_pct.insert(field.clone(), new_pct);
                if let Some(history) = machines.get_mut(tv) {
                    update_machine_mass(history, new_tv_mass);
                }
                if let Some(history) = fields.get_mut(&field) {
                    update_field_percentage(history, new_pct);
                }
                let _ = ts_end;
            }
            ActionKind::DriveToSilo | ActionKind::DriveToSiloAndUnload => {
                let prefix = format!("{}_", kind.name_prefix());
                let stripped = name.strip_prefix(&prefix).unwrap_or(name);
                let remaining = stripped
                    .strip_prefix("nocheck_")
                    .or_else(|| stripped.strip_prefix("wait_"))
                    .or_else(|| stripped.strip_prefix("nowait_"))
                    .unwrap_or(stripped);
                let objs = parse_grounded_objects(remaining, &known, 2)
                    .ok_or_else(|| DecodeError::UnknownObject { index, action: name.to_string(), object: remaining.to_string() })?;
                let (tv, silo_access) = (&objs[0], &objs[1]);
                let mass = *tv_mass.get(tv).unwrap_or(&0.0);
                let history = machines.entry(tv.clone()).or_insert_with(History::new);
                close_and_push_machine(history, ts_start, silo_access.clone(), mass);

                if matches!(kind, ActionKind::DriveToSiloAndUnload) {
                    unload(tv, silo_access, index, name, &mut tv_mass, &mut silo_capacity, &mut machines, &mut silo_accesses)?;
                }
            }
            ActionKind::UnloadAtSilo => {
                let remaining = name.strip_prefix("unload_at_silo_").unwrap_or(name);
                let objs = parse_grounded_objects(remaining, &known, 2)
                    .ok_or_else(|| DecodeError::UnknownObject { index, action: name.to_string(), object: remaining.to_string() })?;
                let (tv, silo_access) = (&objs[0], &objs[1]);
                unload(tv, silo_access, index, name, &mut tv_mass, &mut silo_capacity, &mut machines, &mut silo_accesses)?;
            }
            ActionKind::SweepSiloAccess => {
                let remaining = name.strip_prefix("sweep_silo_access_").unwrap_or(name);
                parse_grounded_objects(remaining, &known, 2)
                    .ok_or_else(|| DecodeError::UnknownObject { index, action: name.to_string(), object: remaining.to_string() })?;
            }
        }
    }

    Ok(DecodedPlan {
        machines,
        fields,
        silo_accesses,
        precise_positions: !is_temporal,
    })
}

#[allow(clippy::too_many_arguments)]
fn unload(
    tv: &str,
    silo_access: &str,
    index: usize,
    action_name: &str,
    tv_mass: &mut HashMap<String, f64>,
    silo_capacity: &mut HashMap<String, f64>,
    machines: &mut HashMap<String, History<MachineStateRecord>>,
    silo_accesses: &mut HashMap<String, History<SiloStateRecord>>,
) -> Result<(), DecodeError> {
    let amount = *tv_mass.get(tv).unwrap_or(&0.0);
    if amount < -EPS {
        return Err(DecodeError::NegativeBunkerMass {
            index,
            action: action_name.to_string(),
            entity: tv.to_string(),
            value: amount,
        });
    }
    let capacity = *silo_capacity.get(silo_access).unwrap_or(&f64::INFINITY);
    let history = silo_accesses.entry(silo_access.to_string()).or_insert_with(History::new);
    let current_stored = history.last().map(|r| r.mass_in_silo).unwrap_or(0.0);
    let new_stored = current_stored + amount;
    if new_stored > capacity + EPS {
        return Err(DecodeError::Overload {
            index,
            action: action_name.to_string(),
            entity: silo_access.to_string(),
            value: new_stored,
            limit: capacity,
        });
    }
    if let Some(last) = history.last_mut() {
        last.mass_in_silo = new_stored;
    }
    tv_mass.insert(tv.to_string(), 0.0);
    if let Some(h) = machines.get_mut(tv) {
        update_machine_mass(h, 0.0);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agri_planning_api::expression::Atom;
    use agri_planning_api::plan::ActionInstance;
    use agri_planning_api::problem::{Assignment, ObjectDeclaration};

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

    fn minimal_problem() -> Problem {
        Problem {
            domain_name: "agri".to_string(),
            problem_name: "p".to_string(),
            types: vec![],
            fluents: vec![],
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
                assign("tv_bunker_capacity", "machine_2", Atom::real(400.0)),
                assign("tv_bunker_mass", "machine_2", Atom::real(0.0)),
                assign("tv_current_location", "machine_2", Atom::symbol("init_loc_2")),
                assign("silo_access_available_capacity", "silo_access_1", Atom::real(5000.0)),
            ],
            timed_effects: vec![],
            goals: vec![],
            features: vec![],
            metrics: vec![],
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

    #[test]
    fn full_overload_and_unload_cycle_transfers_mass() {
        let problem = minimal_problem();
        let plan = Plan {
            actions: vec![
                instance("drive_harv_to_field_and_init_machine_1_field_1"),
                instance("drive_tv_to_field_and_reserve_overload_at_start_machine_2_field_1"),
                instance("overload_field_finished_machine_1_machine_2"),
                instance("drive_to_silo_and_unload_nocheck_machine_2_silo_access_1"),
            ],
        };
        let decoded = decode(&problem, &plan, false).unwrap();
        let (_, field_record) = decoded.get_field_state_at("field_1", 10.0, None).unwrap();
        assert_eq!(field_record.harvested_percentage, 100.0);
        let (_, tv_record) = decoded.get_machine_state_at("machine_2", 10.0, None).unwrap();
        assert_eq!(tv_record.mass_end, 0.0);
        let (_, silo_record) = decoded.get_silo_state_at("silo_access_1", 10.0, None).unwrap();
        assert_eq!(silo_record.mass_in_silo, 1000.0);
    }

    #[test]
    fn overload_past_capacity_is_a_decode_error() {
        let mut problem = minimal_problem();
        // Overrides the 5000.0 capacity set by `minimal_problem`; `real_assignment` must read this
        // later assignment back, or the 400.0 the TV unloads never overflows a 10.0 silo-access.
        problem.initial_state.push(assign("silo_access_available_capacity", "silo_access_1", Atom::real(10.0)));
        let plan = Plan {
            actions: vec![
                instance("drive_harv_to_field_and_init_machine_1_field_1"),
                instance("overload_field_finished_machine_1_machine_2"),
                instance("drive_to_silo_and_unload_nocheck_machine_2_silo_access_1"),
            ],
        };
        assert!(matches!(decode(&problem, &plan, false), Err(DecodeError::Overload { .. })));
    }

    #[test]
    fn unknown_object_in_action_name_is_a_decode_error() {
        let problem = minimal_problem();
        let plan = Plan {
            actions: vec![instance("drive_harv_to_field_and_init_machine_1_field_99")],
        };
        assert!(matches!(decode(&problem, &plan, false), Err(DecodeError::UnknownObject { .. })));
    }
}
