//! The action catalogue (§4.2 "Action catalogue"). Each `build_*` function grounds one action
//! instance: a harvester/TV/field/silo-access combination plus the numbers the encoder already
//! derived from the Domain and problem statistics (distances, speeds, capacities). The encoder
//! calls these once per combination it decides to ground (§4.3 item 4: "include only the variants
//! that the initial state can exercise").

use crate::action::{planning_not_failed_precondition, ActionKind, BuiltAction};
use crate::effects::{EffectEntry, EffectsHandler};
use crate::state_view::{FluentKey, StateView};
use crate::windows::Window;
use agri_planning_api::expression::Atom;
use agri_planning_api::plan::{BoolExpr, NumExpr};
use agri_planning_api::problem::{Action as WireAction, Condition, Duration, Effect, Timing};
use agri_planning_domain::settings::{EffectsMode, ProblemSettings};
use std::sync::Arc;

fn fluent(name: &str, params: &[&str]) -> BoolExpr {
    BoolExpr::fluent(name, params.iter().map(|p| Atom::symbol(*p)).collect())
}

fn num_fluent(name: &str, params: &[&str]) -> NumExpr {
    NumExpr::fluent(name, params.iter().map(|p| Atom::symbol(*p)).collect())
}

fn wire_from(name: &str, durative: bool, duration_s: Option<f64>, preconditions: &[BoolExpr], effects: &crate::effects::EffectsHandler, mode: EffectsMode) -> WireAction {
    let emitted = effects.emit(mode);
    WireAction {
        name: name.to_string(),
        parameters: vec![],
        duration: if durative {
            Some(duration_s.map(Duration::fixed).unwrap_or_else(|| Duration::fixed(0.0)))
        } else {
            None
        },
        conditions: preconditions
            .iter()
            .map(|c| Condition {
                cond: Some(c.clone()),
                span: None,
            })
            .collect(),
        effects: emitted
            .into_iter()
            .filter(|e| e.value.is_some() || e.is_simulated)
            .map(|e| Effect {
                effect: Some(agri_planning_api::problem::EffectExpression {
                    kind: agri_planning_api::problem::effect_expression::EffectKind::Assign as i32,
                    fluent: e.fluent,
                    fluent_params: e.fluent_params,
                    value: e.value,
                    condition: e.condition,
                }),
                occurrence_time: Some(e.timing),
            })
            .collect(),
    }
}

/// **drive_harv_to_field_and_init** (§4.2). Transit duration = `distance / empty_speed`;
/// precondition mirrors "Must respect pre-assignment of field to harvester and pre-assigned turn
/// ordering" and "Fails if field already harvested or assigned."
pub fn drive_harv_to_field_and_init(
    harvester: &str,
    field: &str,
    distance: f64,
    empty_speed: f64,
    settings: &ProblemSettings,
) -> BuiltAction {
    let duration = (distance.max(0.0)) / empty_speed;

    let mut preconditions = vec![planning_not_failed_precondition(), fluent("harv_free", &[harvester]), fluent("field_harvested", &[field]).not()];
    // Pre-assigned-turn ordering: a field with turn t assigned to harvester h may be taken only
    // when h's turn counter is t-1; turn 0 or no pre-assigned harvester means "free for the taking".
    preconditions.push(BoolExpr::or(vec![
        fluent("field_pre_assigned_harvester", &[field]).not(),
        BoolExpr::eq(num_fluent("field_pre_assigned_turn", &[field]), NumExpr::constant(0.0)),
        BoolExpr::and(vec![
            BoolExpr::eq(num_fluent("field_pre_assigned_turn", &[field]), NumExpr::constant(1.0)),
            BoolExpr::eq(num_fluent("harv_field_turn_counter", &[harvester]), NumExpr::constant(0.0)),
        ]),
    ]));
    // "A field whose turn is 0 or whose harvester is none may be taken freely": the field is either
    // unassigned or already pinned to this harvester.
    preconditions.push(BoolExpr::or(vec![
        fluent("field_pre_assigned_harvester", &[field]).not(),
        fluent("field_harvester", &[field]).not(),
    ]));

    let mut effects = EffectsHandler::new();
    effects.push(EffectEntry {
        timing: Timing::start(),
        fluent: "field_harvester".to_string(),
        fluent_params: vec![Atom::symbol(field)],
        value: Some(Atom::symbol(harvester)),
        condition: None,
        value_applies_in_sim_effect: false,
    });
    effects.push(EffectEntry {
        timing: Timing::start(),
        fluent: "harv_free".to_string(),
        fluent_params: vec![Atom::symbol(harvester)],
        value: Some(Atom::boolean(false)),
        condition: None,
        value_applies_in_sim_effect: false,
    });
    effects.push(EffectEntry {
        timing: Timing::end(),
        fluent: "harv_current_field".to_string(),
        fluent_params: vec![Atom::symbol(harvester)],
        value: Some(Atom::symbol(field)),
        condition: None,
        value_applies_in_sim_effect: false,
    });
    effects.push(EffectEntry {
        timing: Timing::end(),
        fluent: "field_timestamp_assigned".to_string(),
        fluent_params: vec![Atom::symbol(field)],
        value: None,
        condition: None,
        value_applies_in_sim_effect: true,
    });
    effects.push(EffectEntry {
        timing: Timing::end(),
        fluent: "harv_transit_time".to_string(),
        fluent_params: vec![Atom::symbol(harvester)],
        value: None,
        condition: None,
        value_applies_in_sim_effect: true,
    });

    let harvester_owned = harvester.to_string();
    effects.with_simulated(Arc::new(move |_problem: &dyn std::any::Any, state: &dyn StateView, _params: &[Atom]| {
        let harv_timestamp = state.get_real(&FluentKey::new("harv_timestamp", &[&harvester_owned]));
        // field_timestamp_assigned: the clock reading at arrival; harv_transit_time: this leg's duration.
        vec![Atom::real(harv_timestamp + duration), Atom::real(duration)]
    }));

    let name = format!("drive_harv_to_field_and_init_{harvester}_{field}");
    let wire = wire_from(&name, true, Some(duration), &preconditions, &effects, settings.effects_settings.drive_harv_to_field);
    BuiltAction {
        name,
        kind: ActionKind::DriveHarvToFieldAndInit,
        durative: true,
        preconditions,
        effects: effects.emit(settings.effects_settings.drive_harv_to_field),
        simulated_effect: effects.simulated_effect(),
        wire,
    }
}

/// **drive_tv_to_field_and_reserve_overload** (§4.2, temporal). `check_at_arrival` selects between
/// the two scheduling variants: checking/applying harvester conditions at TV start (simpler) vs.
/// at TV arrival (more permissive).
pub fn drive_tv_to_field_and_reserve_overload(
    tv: &str,
    field: &str,
    distance: f64,
    empty_speed: f64,
    check_at_arrival: bool,
    settings: &ProblemSettings,
) -> BuiltAction {
    let duration = distance.max(0.0) / empty_speed;
    let harvester_assigned = fluent("field_harvester", &[field]);

    let mut preconditions = vec![planning_not_failed_precondition(), fluent("tv_free", &[tv]), fluent("tv_can_load", &[tv])];
    if !check_at_arrival {
        preconditions.push(harvester_assigned.clone());
    }

    let mut effects = EffectsHandler::new();
    effects.push(EffectEntry {
        timing: Timing::start(),
        fluent: "tv_free".to_string(),
        fluent_params: vec![Atom::symbol(tv)],
        value: Some(Atom::boolean(false)),
        condition: None,
        value_applies_in_sim_effect: false,
    });
    let reserve_timing = if check_at_arrival { Timing::end() } else { Timing::start() };
    effects.push(EffectEntry {
        timing: reserve_timing.clone(),
        fluent: "field_reserved_mass".to_string(),
        fluent_params: vec![Atom::symbol(field)],
        value: None,
        condition: if check_at_arrival { Some(harvester_assigned) } else { None },
        value_applies_in_sim_effect: true,
    });
    effects.push(EffectEntry {
        timing: Timing::end(),
        fluent: "tv_current_location".to_string(),
        fluent_params: vec![Atom::symbol(tv)],
        value: Some(Atom::symbol(field)),
        condition: None,
        value_applies_in_sim_effect: false,
    });
    effects.push(EffectEntry {
        timing: Timing::end(),
        fluent: "tv_transit_time".to_string(),
        fluent_params: vec![Atom::symbol(tv)],
        value: None,
        condition: None,
        value_applies_in_sim_effect: true,
    });

    let field_owned = field.to_string();
    let tv_owned = tv.to_string();
    effects.with_simulated(Arc::new(move |_problem: &dyn std::any::Any, state: &dyn StateView, _params: &[Atom]| {
        let reserved = state.get_real(&FluentKey::new("field_reserved_mass", &[&field_owned]));
        let capacity = state.get_real(&FluentKey::new("tv_bunker_capacity", &[&tv_owned]));
        let bunker_mass = state.get_real(&FluentKey::new("tv_bunker_mass", &[&tv_owned]));
        // The TV reserves mass equal to its own free capacity, ahead of the harvester reaching it.
        let new_reserved = reserved + (capacity - bunker_mass).max(0.0);
        vec![Atom::real(new_reserved), Atom::real(duration)]
    }));

    let suffix = if check_at_arrival { "at_arrival" } else { "at_start" };
    let name = format!("drive_tv_to_field_and_reserve_overload_{suffix}_{tv}_{field}");
    let wire = wire_from(&name, true, Some(duration), &preconditions, &effects, settings.effects_settings.drive_tv_to_field);
    BuiltAction {
        name,
        kind: ActionKind::DriveTvToFieldAndReserveOverload,
        durative: true,
        preconditions,
        effects: effects.emit(settings.effects_settings.drive_tv_to_field),
        simulated_effect: effects.simulated_effect(),
        wire,
    }
}

/// **do_overload** (temporal) / **overload** (sequential), §4.2. `max_transferable_mass` is the
/// grounding-time upper bound `min(tv free capacity, remaining field mass)`; duration is that
/// bound divided by the harvester's unload speed (the simulated effect may transfer less if the
/// field empties first, but the *duration* itself is fixed at grounding time the same way the
/// teacher's durative actions fix theirs). `field_finished` selects the decomposed "last overload
/// of a field" variant that may additionally send the TV onward to a silo
/// (`action_decomposition_settings.do_overload`).
pub fn do_overload(
    harvester: &str,
    tv: &str,
    field: &str,
    max_transferable_mass: f64,
    unload_speed: f64,
    field_finished: bool,
    settings: &ProblemSettings,
) -> BuiltAction {
    let preconditions = vec![
        planning_not_failed_precondition(),
        fluent("field_harvester", &[field]),
        fluent("harv_current_field", &[harvester]),
        fluent("tv_can_load", &[tv]),
    ];

    let mut effects = EffectsHandler::new();
    for (fl, params) in [
        ("tv_bunker_mass", vec![tv]),
        ("field_harvested_percentage", vec![field]),
        ("harv_waiting_time", vec![harvester]),
        ("total_harvested_mass", vec![]),
        ("total_mass_unreserved_in_fields", vec![]),
    ] {
        effects.push(EffectEntry {
            timing: Timing::end(),
            fluent: fl.to_string(),
            fluent_params: params.into_iter().map(Atom::symbol).collect(),
            value: None,
            condition: None,
            value_applies_in_sim_effect: true,
        });
    }
    if field_finished {
        effects.push(EffectEntry {
            timing: Timing::end(),
            fluent: "field_harvested".to_string(),
            fluent_params: vec![Atom::symbol(field)],
            value: Some(Atom::boolean(true)),
            condition: None,
            value_applies_in_sim_effect: false,
        });
    }

    let field_owned = field.to_string();
    let tv_owned = tv.to_string();
    effects.with_simulated(Arc::new(move |_problem: &dyn std::any::Any, state: &dyn StateView, _params: &[Atom]| {
        let total = state.get_real(&FluentKey::new("field_total_yield_mass", &[&field_owned]));
        let current_pct = state.get_real(&FluentKey::new("field_harvested_percentage", &[&field_owned]));
        let remaining_mass = (total * (1.0 - current_pct / 100.0)).max(0.0);
        let capacity = state.get_real(&FluentKey::new("tv_bunker_capacity", &[&tv_owned]));
        let current_tv_mass = state.get_real(&FluentKey::new("tv_bunker_mass", &[&tv_owned]));
        let free_capacity = (capacity - current_tv_mass).max(0.0);
        let transferred = remaining_mass.min(free_capacity).max(0.0);

        let new_tv_mass = current_tv_mass + transferred;
        let new_pct = if field_finished {
            100.0
        } else if total > 0.0 {
            (current_pct + (transferred / total) * 100.0).min(100.0)
        } else {
            current_pct
        };
        let total_harvested = state.get_real(&FluentKey::new("total_harvested_mass", &[])) + transferred;
        let total_unreserved = (state.get_real(&FluentKey::new("total_mass_unreserved_in_fields", &[])) - transferred).max(0.0);

        vec![
            Atom::real(new_tv_mass),
            Atom::real(new_pct),
            // harv_waiting_time resets to zero once an overload actually executes.
            Atom::real(0.0),
            Atom::real(total_harvested),
            Atom::real(total_unreserved),
        ]
    }));

    let durative = settings.is_temporal();
    let timing_window = Window {
        fluent: "tv_ready_to_unload".to_string(),
        params: vec![Atom::symbol(tv)],
        duration_s: settings.control_windows.enable_drive_after_overload,
    };
    for e in timing_window.open_and_close_effects() {
        effects.push(e);
    }

    let decomposed_suffix = if field_finished { "field_finished" } else { "field_not_finished" };
    let name = format!("{}_{}_{}_{}", if durative { "do_overload" } else { "overload" }, decomposed_suffix, harvester, tv);
    let duration = max_transferable_mass.max(0.0) / unload_speed;
    let wire = wire_from(&name, durative, Some(duration), &preconditions, &effects, settings.effects_settings.do_overload);
    BuiltAction {
        name,
        kind: ActionKind::DoOverload,
        durative,
        preconditions,
        effects: effects.emit(settings.effects_settings.do_overload),
        simulated_effect: effects.simulated_effect(),
        wire,
    }
}

/// **drive_harv_to_field_exit** / **drive_tv_to_field_exit** (§4.2): fixed-duration in-field
/// transit; clears "at field" and sets the location to the chosen exit access point.
pub fn drive_to_field_exit(machine: &str, access_point: &str, is_harvester: bool, settings: &ProblemSettings) -> BuiltAction {
    let current_field_fluent = if is_harvester { "harv_current_field" } else { "tv_current_location" };
    let preconditions = vec![planning_not_failed_precondition(), fluent(current_field_fluent, &[machine])];

    let mut effects = EffectsHandler::new();
    let location_fluent = if is_harvester { "harv_current_field_access" } else { "tv_current_location" };
    effects.push(EffectEntry {
        timing: Timing::end(),
        fluent: location_fluent.to_string(),
        fluent_params: vec![Atom::symbol(machine)],
        value: Some(Atom::symbol(access_point)),
        condition: None,
        value_applies_in_sim_effect: false,
    });
    if is_harvester {
        effects.push(EffectEntry {
            timing: Timing::end(),
            fluent: "harv_current_field".to_string(),
            fluent_params: vec![Atom::symbol(machine)],
            value: Some(Atom::symbol("no_field")),
            condition: None,
            value_applies_in_sim_effect: false,
        });
    }

    let kind = if is_harvester { ActionKind::DriveHarvToFieldExit } else { ActionKind::DriveTvToFieldExit };
    let mode = settings.effects_settings.drive_harv_to_field;
    let durative = settings.is_temporal();
    let name = format!("{}_{}_{}", kind.name_prefix(), machine, access_point);
    let wire = wire_from(
        &name,
        durative,
        Some(settings.infield_transit_duration_to_field_access),
        &preconditions,
        &effects,
        mode,
    );
    BuiltAction {
        name,
        kind,
        durative,
        preconditions,
        effects: effects.emit(mode),
        simulated_effect: effects.simulated_effect(),
        wire,
    }
}

/// Which precondition/scheduling variant of `drive_to_silo(+unload)` to build (§4.2: "Three
/// unload variants").
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SiloAccessDiscipline {
    /// (a) no silo-access availability check.
    NoCheck,
    /// (b) the TV waits for the silo-access to become free, then unloads.
    WaitThenUnload,
    /// (c) the TV does not wait; it may find the access still busy.
    NoWait,
}

/// **drive_to_silo** (with optional combined **unload**), §4.2. Speed is linearly interpolated
/// from empty-speed to full-speed by bunker filling ratio; unload duration (when combined) is
/// `bunker_mass / unload_speed`.
pub fn drive_to_silo(
    tv: &str,
    silo_access: &str,
    distance: f64,
    speeds: agri_planning_domain::entities::MachineSpeeds,
    filling_ratio: f64,
    with_unload: bool,
    discipline: SiloAccessDiscipline,
    settings: &ProblemSettings,
) -> BuiltAction {
    let speed = speeds.interpolated(filling_ratio);
    let duration = distance.max(0.0) / speed;

    let mut preconditions = vec![planning_not_failed_precondition(), fluent("tv_can_unload", &[tv])];
    if matches!(discipline, SiloAccessDiscipline::WaitThenUnload | SiloAccessDiscipline::NoCheck) && with_unload {
        preconditions.push(fluent("silo_access_free", &[silo_access]));
    }

    let mut effects = EffectsHandler::new();
    effects.push(EffectEntry {
        timing: Timing::end(),
        fluent: "tv_current_location".to_string(),
        fluent_params: vec![Atom::symbol(tv)],
        value: Some(Atom::symbol(silo_access)),
        condition: None,
        value_applies_in_sim_effect: false,
    });
    if discipline != SiloAccessDiscipline::NoCheck {
        effects.push(EffectEntry {
            timing: Timing::end(),
            fluent: "silo_access_free".to_string(),
            fluent_params: vec![Atom::symbol(silo_access)],
            value: Some(Atom::boolean(false)),
            condition: None,
            value_applies_in_sim_effect: false,
        });
        effects.push(EffectEntry {
            timing: Timing::end(),
            fluent: "silo_access_timestamp".to_string(),
            fluent_params: vec![Atom::symbol(silo_access)],
            value: None,
            condition: None,
            value_applies_in_sim_effect: true,
        });
    }
    if with_unload {
        for fl in ["tv_bunker_mass", "total_mass_in_silos", "silo_access_available_capacity"] {
            let params = if fl == "tv_bunker_mass" { vec![tv] } else if fl == "total_mass_in_silos" { vec![] } else { vec![silo_access] };
            effects.push(EffectEntry {
                timing: Timing::end(),
                fluent: fl.to_string(),
                fluent_params: params.into_iter().map(Atom::symbol).collect(),
                value: None,
                condition: None,
                value_applies_in_sim_effect: true,
            });
        }
        if discipline != SiloAccessDiscipline::NoCheck {
            effects.push(EffectEntry {
                timing: Timing::end(),
                fluent: "silo_access_free".to_string(),
                fluent_params: vec![Atom::symbol(silo_access)],
                value: Some(Atom::boolean(true)),
                condition: None,
                value_applies_in_sim_effect: false,
            });
        }
    }

    let needs_timestamp = discipline != SiloAccessDiscipline::NoCheck;
    if needs_timestamp || with_unload {
        let tv_owned = tv.to_string();
        let silo_access_owned = silo_access.to_string();
        effects.with_simulated(Arc::new(move |_problem: &dyn std::any::Any, state: &dyn StateView, _params: &[Atom]| {
            let mut out = Vec::new();
            if needs_timestamp {
                let prior = state.get_real(&FluentKey::new("silo_access_timestamp", &[&silo_access_owned]));
                out.push(Atom::real(prior + duration));
            }
            if with_unload {
                let amount = state.get_real(&FluentKey::new("tv_bunker_mass", &[&tv_owned]));
                let total_in_silos = state.get_real(&FluentKey::new("total_mass_in_silos", &[])) + amount;
                let available =
                    (state.get_real(&FluentKey::new("silo_access_available_capacity", &[&silo_access_owned])) - amount).max(0.0);
                out.push(Atom::real(0.0));
                out.push(Atom::real(total_in_silos));
                out.push(Atom::real(available));
            }
            out
        }));
    }

    let kind = if with_unload { ActionKind::DriveToSiloAndUnload } else { ActionKind::DriveToSilo };
    let durative = settings.is_temporal();
    let discipline_tag = match discipline {
        SiloAccessDiscipline::NoCheck => "nocheck",
        SiloAccessDiscipline::WaitThenUnload => "wait",
        SiloAccessDiscipline::NoWait => "nowait",
    };
    let name = format!("{}_{}_{}_{}", kind.name_prefix(), discipline_tag, tv, silo_access);
    let wire = wire_from(&name, durative, Some(duration), &preconditions, &effects, settings.effects_settings.drive_to_silo);
    BuiltAction {
        name,
        kind,
        durative,
        preconditions,
        effects: effects.emit(settings.effects_settings.drive_to_silo),
        simulated_effect: effects.simulated_effect(),
        wire,
    }
}

/// **unload_at_silo** (§4.2): stand-alone unload for a TV already at a silo-access.
pub fn unload_at_silo(tv: &str, silo_access: &str, settings: &ProblemSettings) -> BuiltAction {
    let preconditions = vec![
        planning_not_failed_precondition(),
        fluent("tv_can_unload", &[tv]),
        // The TV must already be at `silo_access`, having driven there without unloading.
        BoolExpr::eq(num_fluent("tv_current_location", &[tv]), NumExpr::from_atom(Atom::symbol(silo_access))),
    ];

    let mut effects = EffectsHandler::new();
    for (fl, params) in [
        ("tv_bunker_mass", vec![tv]),
        ("total_mass_in_silos", vec![]),
        ("silo_access_available_capacity", vec![silo_access]),
    ] {
        effects.push(EffectEntry {
            timing: Timing::end(),
            fluent: fl.to_string(),
            fluent_params: params.into_iter().map(Atom::symbol).collect(),
            value: None,
            condition: None,
            value_applies_in_sim_effect: true,
        });
    }

    let tv_owned = tv.to_string();
    let silo_access_owned = silo_access.to_string();
    effects.with_simulated(Arc::new(move |_problem: &dyn std::any::Any, state: &dyn StateView, _params: &[Atom]| {
        let amount = state.get_real(&FluentKey::new("tv_bunker_mass", &[&tv_owned]));
        let total_in_silos = state.get_real(&FluentKey::new("total_mass_in_silos", &[])) + amount;
        let available = (state.get_real(&FluentKey::new("silo_access_available_capacity", &[&silo_access_owned])) - amount).max(0.0);
        vec![Atom::real(0.0), Atom::real(total_in_silos), Atom::real(available)]
    }));

    let durative = settings.is_temporal();
    let name = format!("unload_at_silo_{tv}_{silo_access}");
    let wire = wire_from(&name, durative, Some(0.0), &preconditions, &effects, settings.effects_settings.unload_at_silo);
    BuiltAction {
        name,
        kind: ActionKind::UnloadAtSilo,
        durative,
        preconditions,
        effects: effects.emit(settings.effects_settings.unload_at_silo),
        simulated_effect: effects.simulated_effect(),
        wire,
    }
}

/// **sweep_silo_access** (§4.2, temporal, full silo model only): a compactor removes up to
/// `mass_per_sweep` from a silo-access. Uses a conditional effect: whether the remaining mass is
/// fully or partially restored depends on how much was left.
pub fn sweep_silo_access(
    compactor: &str,
    silo_access: &str,
    mass_per_sweep: f64,
    total_capacity: f64,
    settings: &ProblemSettings,
) -> BuiltAction {
    let preconditions = vec![planning_not_failed_precondition(), fluent("compactor_free", &[compactor])];

    // The accumulated fill (total_capacity - available_capacity, i.e. how much dirt sits on the
    // access before this sweep) fits in one pass exactly when available_capacity is already
    // within mass_per_sweep of total_capacity.
    let fully_cleared = BoolExpr::geq(
        num_fluent("silo_access_available_capacity", &[silo_access]),
        NumExpr::constant(total_capacity - mass_per_sweep),
    );

    let mut effects = EffectsHandler::new();
    effects.push(EffectEntry {
        timing: Timing::end(),
        fluent: "silo_access_available_capacity".to_string(),
        fluent_params: vec![Atom::symbol(silo_access)],
        value: None,
        condition: None,
        value_applies_in_sim_effect: true,
    });
    effects.push(EffectEntry {
        timing: Timing::end(),
        fluent: "silo_access_cleared".to_string(),
        fluent_params: vec![Atom::symbol(silo_access)],
        value: Some(Atom::boolean(true)),
        condition: Some(fully_cleared),
        value_applies_in_sim_effect: false,
    });

    let silo_access_owned = silo_access.to_string();
    effects.with_simulated(Arc::new(move |_problem: &dyn std::any::Any, state: &dyn StateView, _params: &[Atom]| {
        let current = state.get_real(&FluentKey::new("silo_access_available_capacity", &[&silo_access_owned]));
        vec![Atom::real((current + mass_per_sweep).min(total_capacity))]
    }));

    let name = format!("sweep_silo_access_{compactor}_{silo_access}");
    let wire = wire_from(&name, true, Some(0.0), &preconditions, &effects, settings.effects_settings.sweep_silo_access);
    BuiltAction {
        name,
        kind: ActionKind::SweepSiloAccess,
        durative: true,
        preconditions,
        effects: effects.emit(settings.effects_settings.sweep_silo_access),
        simulated_effect: effects.simulated_effect(),
        wire,
    }
}

pub type Catalogue = Vec<BuiltAction>;

#[cfg(test)]
mod tests {
    use super::*;
    use agri_planning_domain::settings::ProblemSettings;

    #[test]
    fn drive_harv_duration_is_distance_over_empty_speed() {
        let settings = ProblemSettings::default();
        let a = drive_harv_to_field_and_init("h1", "field_1", 100.0, 4.0, &settings);
        let wire = a.to_wire();
        let duration = wire.duration.unwrap().controllable_in_bounds.unwrap();
        assert_eq!(duration.lower.unwrap().as_real(), Some(25.0));
    }

    #[test]
    fn do_overload_field_finished_sets_field_harvested_effect() {
        let settings = ProblemSettings::default();
        let a = do_overload("h1", "tv1", "field_1", 6000.0, 100.0, true, &settings);
        assert!(a.effects.iter().any(|e| e.fluent == "field_harvested"));
    }

    #[test]
    fn do_overload_not_finished_has_no_field_harvested_effect() {
        let settings = ProblemSettings::default();
        let a = do_overload("h1", "tv1", "field_1", 6000.0, 100.0, false, &settings);
        assert!(!a.effects.iter().any(|e| e.fluent == "field_harvested"));
    }

    #[test]
    fn drive_to_silo_speed_interpolates_by_filling_ratio() {
        let settings = ProblemSettings::default();
        let speeds = agri_planning_domain::entities::MachineSpeeds {
            max_speed_empty: 10.0,
            max_speed_full: 5.0,
            working_speed: 1.0,
        };
        let empty = drive_to_silo("tv1", "silo_access_1", 100.0, speeds, 0.0, false, SiloAccessDiscipline::NoCheck, &settings);
        let full = drive_to_silo("tv1", "silo_access_1", 100.0, speeds, 1.0, false, SiloAccessDiscipline::NoCheck, &settings);
        let dur = |a: &BuiltAction| a.to_wire().duration.unwrap().controllable_in_bounds.unwrap().lower.unwrap().as_real().unwrap();
        assert!(dur(&empty) < dur(&full));
    }

    #[test]
    fn sweep_silo_access_is_durative_and_conditional() {
        let settings = ProblemSettings::default();
        let a = sweep_silo_access("compactor_1", "silo_access_1", 500.0, 5000.0, &settings);
        assert!(a.is_durative());
        assert!(a.effects.iter().any(|e| e.fluent == "silo_access_cleared" && e.condition.is_some()));
    }

    #[test]
    fn do_overload_simulated_effect_transfers_capped_mass_in_declared_order() {
        use crate::state_view::{FluentKey, FluentState, FluentValue};
        let settings = ProblemSettings::default();
        let a = do_overload("h1", "tv1", "field_1", 6000.0, 100.0, false, &settings);
        let mut state = FluentState::new();
        state.set(FluentKey::new("field_total_yield_mass", &["field_1"]), FluentValue::Real(1000.0));
        state.set(FluentKey::new("field_harvested_percentage", &["field_1"]), FluentValue::Real(0.0));
        state.set(FluentKey::new("tv_bunker_capacity", &["tv1"]), FluentValue::Real(400.0));
        state.set(FluentKey::new("tv_bunker_mass", &["tv1"]), FluentValue::Real(0.0));

        let sim = a.simulated_effect.expect("do_overload must register a simulated-effect callback");
        let out = sim(&(), &state, &[]);
        let values: Vec<f64> = out.iter().map(|v| v.as_real().unwrap()).collect();
        // tv_bunker_mass, field_harvested_percentage, harv_waiting_time, total_harvested_mass, total_mass_unreserved_in_fields
        assert_eq!(values[0], 400.0);
        assert_eq!(values[1], 40.0);
        assert_eq!(values[2], 0.0);
        assert_eq!(values[3], 400.0);
        assert_eq!(values[4], 0.0);
    }

    #[test]
    fn do_overload_simulated_effect_never_exceeds_tv_capacity() {
        use crate::state_view::{FluentKey, FluentState, FluentValue};
        let settings = ProblemSettings::default();
        let a = do_overload("h1", "tv1", "field_1", 6000.0, 100.0, false, &settings);
        let mut state = FluentState::new();
        state.set(FluentKey::new("field_total_yield_mass", &["field_1"]), FluentValue::Real(1000.0));
        state.set(FluentKey::new("field_harvested_percentage", &["field_1"]), FluentValue::Real(0.0));
        state.set(FluentKey::new("tv_bunker_capacity", &["tv1"]), FluentValue::Real(10.0));
        state.set(FluentKey::new("tv_bunker_mass", &["tv1"]), FluentValue::Real(0.0));

        let sim = a.simulated_effect.unwrap();
        let out = sim(&(), &state, &[]);
        assert_eq!(out[0].as_real(), Some(10.0));
    }

    #[test]
    fn unload_at_silo_simulated_effect_empties_the_bunker() {
        use crate::state_view::{FluentKey, FluentState, FluentValue};
        let settings = ProblemSettings::default();
        let a = unload_at_silo("tv1", "silo_access_1", &settings);
        let mut state = FluentState::new();
        state.set(FluentKey::new("tv_bunker_mass", &["tv1"]), FluentValue::Real(250.0));
        state.set(FluentKey::new("total_mass_in_silos", &[]), FluentValue::Real(1000.0));
        state.set(FluentKey::new("silo_access_available_capacity", &["silo_access_1"]), FluentValue::Real(500.0));

        let sim = a.simulated_effect.expect("unload_at_silo must register a simulated-effect callback");
        let out = sim(&(), &state, &[]);
        let values: Vec<f64> = out.iter().map(|v| v.as_real().unwrap()).collect();
        assert_eq!(values, vec![0.0, 1250.0, 250.0]);
    }

    #[test]
    fn sweep_silo_access_simulated_effect_restores_capacity_capped_at_total() {
        use crate::state_view::{FluentKey, FluentState, FluentValue};
        let settings = ProblemSettings::default();
        let a = sweep_silo_access("compactor_1", "silo_access_1", 500.0, 5000.0, &settings);
        let mut state = FluentState::new();
        state.set(FluentKey::new("silo_access_available_capacity", &["silo_access_1"]), FluentValue::Real(4800.0));

        let sim = a.simulated_effect.expect("sweep_silo_access must register a simulated-effect callback");
        let out = sim(&(), &state, &[]);
        assert_eq!(out[0].as_real(), Some(5000.0));
    }
}
