//! The Problem encoder (§4.3): turns a [`Domain`] plus [`ProblemSettings`] plus a [`RoutePlanner`]
//! into a ready-to-plan [`agri_planning_api::problem::Problem`]. Grounds only the action variants
//! the initial state can exercise (§4.3 item 4); never emits a variant for an unreachable pair.

use crate::bounds::apply_bounds;
use crate::error::EncodeError;
use crate::preassign::{resolve_field_pre_assignments, resolve_tv_pre_assignments, FieldPreAssignmentTarget};
use crate::route::RoutePlanner;
use crate::stats::ProblemStatistics;
use agri_planning_actions::action::Action;
use agri_planning_actions::catalogue::{self, SiloAccessDiscipline};
use agri_planning_domain::defaults;
use agri_planning_domain::domain::Domain;
use agri_planning_domain::entities::{MachineAttributes, Point2D};
use agri_planning_domain::fluents::{FluentDefault, ObjectKind};
use agri_planning_domain::ids::{MachineId, MachineKind, SiloAccessId};
use agri_planning_domain::naming;
use agri_planning_domain::settings::{HarvConditionsAtTvArrival, ProblemSettings, SiloPlanningType, TemporalOptimizationSetting};
use agri_planning_domain::state::MachineLocation;
use agri_planning_api::expression::Atom;
use agri_planning_api::plan::{BoolExpr, NumExpr, NumExprKind, NumExprList};
use agri_planning_api::problem::{
    metric::MetricKind, Action as WireAction, Assignment, Feature, Fluent, Goal, Metric, ObjectDeclaration, Parameter, Problem, TypeDeclaration,
};
use anyhow::Context;

/// Internal helper composed with `?`/`.context()` the way the teacher's `encode.rs` builds up
/// fallible internal steps; converted to the typed [`EncodeError`] at `build_actions`'s boundary.
fn reachable_distance(routes: &dyn RoutePlanner, from: Point2D, to: Point2D, machine: MachineId) -> anyhow::Result<f64> {
    let distance = routes.get_distance(from, to, machine);
    anyhow::ensure!(distance >= 0.0, "route planner reports no path from {from:?} to {to:?} for machine {machine}");
    Ok(distance)
}

/// The encoder's single entry point. Builds the statistics, resolves any missing pre-assignments,
/// computes fluent bounds, then grounds objects/fluents/actions/initial-state/goals/metric.
pub fn encode(domain: &Domain, routes: &dyn RoutePlanner, settings: &ProblemSettings) -> Result<Problem, EncodeError> {
    if domain.machines_of_kind(MachineKind::TransportVehicle).next().is_none() {
        return Err(EncodeError::NoTransportVehicle);
    }

    let stats = ProblemStatistics::compute(domain, routes);
    let mut registry = agri_planning_domain::fluents::FluentRegistry::standard();
    apply_bounds(&mut registry, &stats, settings.numeric_fluent_bounds_option);

    let field_count = domain.fields().count();
    let harvester_count = domain.machines_of_kind(MachineKind::Harvester).count().max(1);
    let target = FieldPreAssignmentTarget {
        field_count,
        turn_count: ((field_count + harvester_count - 1) / harvester_count) as u32,
    };
    let field_pre = resolve_field_pre_assignments(domain, target, &domain.pre_assignments().fields);
    let tv_pre = resolve_tv_pre_assignments(domain, routes, &domain.pre_assignments().tvs);

    let types = build_types();
    let objects = build_objects(domain);
    let fluents = build_fluents(&registry);
    let initial_state = build_initial_state(domain, &field_pre, &tv_pre);
    let actions = build_actions(domain, routes, settings, &field_pre)?;
    if actions.is_empty() {
        return Err(EncodeError::NoApplicableActions);
    }
    let goals = build_goals(domain);
    let metrics = build_metric(domain, settings);
    let features = build_features(settings);

    Ok(Problem {
        domain_name: "agri_field_operations".to_string(),
        problem_name: "agri_field_operations_instance".to_string(),
        types,
        fluents,
        objects,
        actions,
        initial_state,
        timed_effects: vec![],
        goals,
        features: features.into_iter().map(|f| f as i32).collect(),
        metrics,
    })
}

fn sentinel_name(kind: ObjectKind) -> String {
    format!("no_{}", agri_planning_domain::fluents::object_kind_type_name(kind))
}

fn build_types() -> Vec<TypeDeclaration> {
    let root = |name: &str| TypeDeclaration {
        type_name: name.to_string(),
        parent_type: String::new(),
    };
    let child = |name: &str, parent: &str| TypeDeclaration {
        type_name: name.to_string(),
        parent_type: parent.to_string(),
    };
    vec![
        root("field"),
        root("field_access"),
        root("silo"),
        root("silo_access"),
        root("machine"),
        child("harvester", "machine"),
        child("tv", "machine"),
        child("compactor", "machine"),
        root("location"),
    ]
}

fn build_objects(domain: &Domain) -> Vec<ObjectDeclaration> {
    let mut objects = Vec::new();
    let obj = |name: String, r#type: &str| ObjectDeclaration { name, r#type: r#type.to_string() };

    for field in domain.fields() {
        objects.push(obj(naming::field_name(field.id), "field"));
        for ap in &field.access_points {
            objects.push(obj(naming::field_access_name(*ap), "field_access"));
        }
    }
    for silo in domain.silos() {
        objects.push(obj(naming::silo_name(silo.id), "silo"));
        for ap in &silo.access_points {
            objects.push(obj(naming::silo_access_name(*ap), "silo_access"));
        }
    }
    for machine in domain.machines() {
        let type_name = match machine.kind() {
            MachineKind::Harvester => "harvester",
            MachineKind::TransportVehicle => "tv",
            MachineKind::Compactor => "compactor",
        };
        objects.push(obj(naming::machine_name(machine.id), type_name));
        objects.push(obj(naming::init_loc_name(machine.initial_location), "location"));
    }
    objects.push(obj("street".to_string(), "location"));

    for kind in [
        ObjectKind::Field,
        ObjectKind::FieldAccess,
        ObjectKind::Silo,
        ObjectKind::SiloAccess,
        ObjectKind::Harvester,
        ObjectKind::TransportVehicle,
        ObjectKind::Compactor,
        ObjectKind::Machine,
        ObjectKind::Location,
    ] {
        objects.push(obj(sentinel_name(kind), agri_planning_domain::fluents::object_kind_type_name(kind)));
    }

    objects
}

fn build_fluents(registry: &agri_planning_domain::fluents::FluentRegistry) -> Vec<Fluent> {
    registry
        .iter()
        .map(|def| {
            let parameters = def
                .param_kinds
                .iter()
                .enumerate()
                .map(|(i, kind)| Parameter {
                    name: format!("p{i}"),
                    r#type: agri_planning_domain::fluents::object_kind_type_name(*kind).to_string(),
                })
                .collect();
            let default_value = Some(match def.default {
                FluentDefault::Bool(b) => Atom::boolean(b),
                FluentDefault::Int(i) => Atom::int(i),
                FluentDefault::Real(r) => Atom::real(r),
                FluentDefault::SentinelOf(kind) => Atom::symbol(sentinel_name(kind)),
            });
            Fluent {
                name: def.name.to_string(),
                value_type: def.wire_type(),
                parameters,
                default_value,
                is_static: def.is_static,
            }
        })
        .collect()
}

fn build_initial_state(
    domain: &Domain,
    field_pre: &[agri_planning_domain::state::FieldPreAssignment],
    tv_pre: &[agri_planning_domain::state::TvPreAssignment],
) -> Vec<Assignment> {
    let mut out = Vec::new();
    let mut push = |fluent: &str, params: Vec<Atom>, value: Atom| {
        out.push(Assignment {
            fluent: fluent.to_string(),
            fluent_params: params,
            value: Some(value),
        });
    };

    for field in domain.fields() {
        let name = naming::field_name(field.id);
        let state = domain.field_state(field.id);
        push("field_id", vec![Atom::symbol(&name)], Atom::int(field.id.raw() as i64));
        push("field_area", vec![Atom::symbol(&name)], Atom::real(field.area()));
        push("field_total_yield_mass", vec![Atom::symbol(&name)], Atom::real(field.initial_yield_mass()));
        push("field_harvester", vec![Atom::symbol(&name)], Atom::symbol(sentinel_name(ObjectKind::Harvester)));
        push("field_timestamp_assigned", vec![Atom::symbol(&name)], Atom::real(-1.0));
        let harvested = state.map(|s| s.is_harvested()).unwrap_or(false);
        push("field_harvested", vec![Atom::symbol(&name)], Atom::boolean(harvested));
        push("field_planned_harvested", vec![Atom::symbol(&name)], Atom::boolean(false));
        push(
            "field_harvested_percentage",
            vec![Atom::symbol(&name)],
            Atom::real(state.map(|s| s.harvested_percentage).unwrap_or(0.0)),
        );
        push("field_reserved_mass", vec![Atom::symbol(&name)], Atom::real(0.0));
        let pre = field_pre.iter().find(|fa| fa.field == field.id);
        push(
            "field_pre_assigned_harvester",
            vec![Atom::symbol(&name)],
            pre.map(|fa| Atom::symbol(naming::machine_name(fa.harvester))).unwrap_or_else(|| Atom::symbol(sentinel_name(ObjectKind::Harvester))),
        );
        push("field_pre_assigned_turn", vec![Atom::symbol(&name)], Atom::int(pre.map(|fa| fa.turn as i64).unwrap_or(0)));
    }

    for machine in domain.machines_of_kind(MachineKind::Harvester) {
        let name = naming::machine_name(machine.id);
        let state = domain.machine_state(machine.id);
        let turn_count = field_pre.iter().filter(|fa| fa.harvester == machine.id).count() as i64;
        push("harv_timestamp", vec![Atom::symbol(&name)], Atom::real(0.0));
        push("harv_free", vec![Atom::symbol(&name)], Atom::boolean(true));
        let current_field = match state.map(|s| s.location) {
            Some(MachineLocation::Field(id)) => Atom::symbol(naming::field_name(id)),
            _ => Atom::symbol(sentinel_name(ObjectKind::Field)),
        };
        push("harv_current_field", vec![Atom::symbol(&name)], current_field);
        let current_access = match state.map(|s| s.location) {
            Some(MachineLocation::FieldAccess(id)) => Atom::symbol(naming::field_access_name(id)),
            _ => Atom::symbol(sentinel_name(ObjectKind::FieldAccess)),
        };
        push("harv_current_field_access", vec![Atom::symbol(&name)], current_access);
        push("harv_field_turn_counter", vec![Atom::symbol(&name)], Atom::int(0));
        push("harv_transit_time", vec![Atom::symbol(&name)], Atom::real(0.0));
        push("harv_waiting_time", vec![Atom::symbol(&name)], Atom::real(0.0));
        push("harv_pre_assigned_turn_count", vec![Atom::symbol(&name)], Atom::int(turn_count));
        push("harv_enabled_to_drive", vec![Atom::symbol(&name)], Atom::boolean(false));
    }

    for machine in domain.machines_of_kind(MachineKind::TransportVehicle) {
        let name = naming::machine_name(machine.id);
        let state = domain.machine_state(machine.id);
        let bunker_mass = state.map(|s| s.bunker_mass).unwrap_or(0.0);
        let capacity = machine.bunker().map(|b| b.mass_capacity).unwrap_or(0.0);
        let location = state
            .map(|s| s.location.to_name(machine.id))
            .unwrap_or_else(|| naming::init_loc_name(machine.initial_location));
        let pre_harvester = tv_pre.iter().find(|p| match p {
            agri_planning_domain::state::TvPreAssignment::Unordered { tv, .. } => *tv == machine.id,
            agri_planning_domain::state::TvPreAssignment::Ordered { tvs, .. } => tvs.first() == Some(&machine.id),
        });

        push("tv_timestamp", vec![Atom::symbol(&name)], Atom::real(0.0));
        push("tv_free", vec![Atom::symbol(&name)], Atom::boolean(true));
        push("tv_bunker_mass", vec![Atom::symbol(&name)], Atom::real(bunker_mass));
        push("tv_bunker_capacity", vec![Atom::symbol(&name)], Atom::real(capacity));
        push("tv_current_location", vec![Atom::symbol(&name)], Atom::symbol(location));
        push("tv_can_load", vec![Atom::symbol(&name)], Atom::boolean(bunker_mass < capacity));
        push("tv_can_unload", vec![Atom::symbol(&name)], Atom::boolean(bunker_mass > 0.0));
        push("tv_ready_to_unload", vec![Atom::symbol(&name)], Atom::boolean(false));
        push("tv_ready_to_drive", vec![Atom::symbol(&name)], Atom::boolean(true));
        push("tv_waiting_to_drive_id", vec![Atom::symbol(&name)], Atom::int(-1));
        push("tv_transit_time", vec![Atom::symbol(&name)], Atom::real(0.0));
        push("tv_waiting_time", vec![Atom::symbol(&name)], Atom::real(0.0));
        push("tv_enabled_to_drive", vec![Atom::symbol(&name)], Atom::boolean(false));
        push(
            "tv_pre_assigned_harvester",
            vec![Atom::symbol(&name)],
            pre_harvester.map(|p| Atom::symbol(naming::machine_name(p.harvester()))).unwrap_or_else(|| Atom::symbol(sentinel_name(ObjectKind::Harvester))),
        );
    }

    for silo in domain.silos() {
        for ap in &silo.access_points {
            let name = naming::silo_access_name(*ap);
            if let Some(state) = domain.silo_access_state(*ap) {
                push("silo_access_available_capacity", vec![Atom::symbol(&name)], Atom::real(state.available_capacity));
                push("silo_access_free", vec![Atom::symbol(&name)], Atom::boolean(state.free));
                push("silo_access_timestamp", vec![Atom::symbol(&name)], Atom::real(state.timestamp));
                push("silo_access_cleared", vec![Atom::symbol(&name)], Atom::boolean(state.cleared));
            }
            if domain.silo_access_point(*ap).is_some() {
                push("silo_access_sweep_duration", vec![Atom::symbol(&name)], Atom::real(*defaults::DEF_MASS_PER_SWEEP.get()));
            }
        }
    }

    for machine in domain.machines_of_kind(MachineKind::Compactor) {
        let name = naming::machine_name(machine.id);
        if let MachineAttributes::Compactor { silo, mass_per_sweep } = machine.attributes {
            push("compactor_silo", vec![Atom::symbol(&name)], Atom::symbol(naming::silo_name(silo)));
            push("compactor_mass_per_sweep", vec![Atom::symbol(&name)], Atom::real(mass_per_sweep));
        }
        push("compactor_free", vec![Atom::symbol(&name)], Atom::boolean(true));
    }

    let reserved_in_silos: f64 = 0.0;
    let mass_in_silos: f64 = domain
        .silos()
        .flat_map(|s| s.access_points.iter())
        .filter_map(|ap| domain.silo_access_point(*ap).zip(domain.silo_access_state(*ap)))
        .map(|(ap, state)| ap.mass_capacity - state.available_capacity)
        .sum();

    push("total_harvested_mass", vec![], Atom::real(0.0));
    push("total_mass_in_silos", vec![], Atom::real(mass_in_silos));
    push("total_mass_reserved_in_silos", vec![], Atom::real(reserved_in_silos));
    push("total_mass_unreserved_in_fields", vec![], Atom::real(domain.total_initial_yield_mass()));
    push("planning_failed", vec![], Atom::boolean(false));
    push("tvs_waiting_to_drive_count", vec![], Atom::int(0));

    out
}

fn build_actions(
    domain: &Domain,
    routes: &dyn RoutePlanner,
    settings: &ProblemSettings,
    field_pre: &[agri_planning_domain::state::FieldPreAssignment],
) -> Result<Vec<WireAction>, EncodeError> {
    let mut actions = Vec::new();
    let check_at_arrival = matches!(settings.with_harv_conditions_and_effects_at_tv_arrival, HarvConditionsAtTvArrival::AtTvArrival);

    for harvester in domain.machines_of_kind(MachineKind::Harvester) {
        let (speeds, _bunker) = match &harvester.attributes {
            MachineAttributes::Harvester { speeds, bunker, .. } => (*speeds, *bunker),
            _ => continue,
        };
        let from = domain.machine_state(harvester.id).map(|s| s.position).unwrap_or(agri_planning_domain::entities::Point2D::new(0.0, 0.0));
        for field in domain.fields() {
            if domain.field_state(field.id).map(|s| s.is_harvested()).unwrap_or(false) {
                continue;
            }
            let access = field.access_points.first().copied();
            let access_point = access.and_then(|id| domain.field_access_point(id));
            let access_point = match access_point {
                Some(a) => a,
                None => continue,
            };
            let distance = routes.get_distance(from, access_point.position, harvester.id);
            if distance < 0.0 {
                continue;
            }
            let built = catalogue::drive_harv_to_field_and_init(
                &naming::machine_name(harvester.id),
                &naming::field_name(field.id),
                distance,
                speeds.max_speed_empty,
                settings,
            );
            actions.push(built.to_wire());

            if settings.with_drive_to_field_exit {
                let exit = catalogue::drive_to_field_exit(&naming::machine_name(harvester.id), &naming::field_access_name(access_point.id), true, settings);
                actions.push(exit.to_wire());
            }
        }
    }

    for tv in domain.machines_of_kind(MachineKind::TransportVehicle) {
        let (speeds, bunker) = match &tv.attributes {
            MachineAttributes::TransportVehicle { speeds, bunker, .. } => (*speeds, *bunker),
            _ => continue,
        };
        let from = domain.machine_state(tv.id).map(|s| s.position).unwrap_or(agri_planning_domain::entities::Point2D::new(0.0, 0.0));
        let bunker_mass = domain.machine_state(tv.id).map(|s| s.bunker_mass).unwrap_or(0.0);
        let filling_ratio = if bunker.mass_capacity > 0.0 { bunker_mass / bunker.mass_capacity } else { 0.0 };

        for field in domain.fields() {
            if domain.field_state(field.id).map(|s| s.is_harvested()).unwrap_or(false) {
                continue;
            }
            let access_point = field.access_points.first().and_then(|id| domain.field_access_point(*id));
            let access_point = match access_point {
                Some(a) => a,
                None => continue,
            };
            let distance = routes.get_distance(from, access_point.position, tv.id);
            if distance < 0.0 {
                continue;
            }
            let built = catalogue::drive_tv_to_field_and_reserve_overload(
                &naming::machine_name(tv.id),
                &naming::field_name(field.id),
                distance,
                speeds.max_speed_empty,
                check_at_arrival,
                settings,
            );
            actions.push(built.to_wire());

            if settings.with_drive_to_field_exit {
                let exit = catalogue::drive_to_field_exit(&naming::machine_name(tv.id), &naming::field_access_name(access_point.id), false, settings);
                actions.push(exit.to_wire());
            }

            for harvester in domain.machines_of_kind(MachineKind::Harvester) {
                let unload_speed = match &harvester.attributes {
                    MachineAttributes::Harvester { unloading_speed_mass, .. } => *unloading_speed_mass,
                    _ => continue,
                };
                if let Some(pre) = field_pre.iter().find(|fa| fa.field == field.id) {
                    if pre.harvester != harvester.id {
                        continue;
                    }
                }
                let remaining_tv = (bunker.mass_capacity - bunker_mass).max(0.0);
                let remaining_field = field.initial_yield_mass() * (1.0 - domain.field_state(field.id).map(|s| s.harvested_percentage).unwrap_or(0.0) / 100.0);
                let max_transfer = remaining_tv.min(remaining_field.max(0.0));
                if max_transfer <= 0.0 {
                    continue;
                }
                for field_finished in [false, true] {
                    let built = catalogue::do_overload(
                        &naming::machine_name(harvester.id),
                        &naming::machine_name(tv.id),
                        &naming::field_name(field.id),
                        max_transfer,
                        unload_speed,
                        field_finished,
                        settings,
                    );
                    actions.push(built.to_wire());
                }
            }
        }

        for silo in domain.silos() {
            for ap in &silo.access_points {
                let silo_access = match domain.silo_access_point(*ap) {
                    Some(a) => a,
                    None => continue,
                };
                let distance = reachable_distance(routes, from, silo_access.position, tv.id).with_context(|| {
                    format!("tv {} has no route to silo access {}", naming::machine_name(tv.id), naming::silo_access_name(*ap))
                });
                let distance = match distance {
                    Ok(d) => d,
                    Err(err) => {
                        tracing::warn!(error = ?err, "silo access unreachable");
                        return Err(EncodeError::UnreachableSiloAccess { machine: tv.id, access: *ap });
                    }
                };
                let discipline = match settings.silo_planning_type {
                    SiloPlanningType::WithoutSiloAccessAvailability => SiloAccessDiscipline::NoCheck,
                    SiloPlanningType::WithSiloAccessAvailability => SiloAccessDiscipline::WaitThenUnload,
                    SiloPlanningType::WithSiloAccessCapacityAndCompaction => SiloAccessDiscipline::NoWait,
                };
                let combined = catalogue::drive_to_silo(
                    &naming::machine_name(tv.id),
                    &naming::silo_access_name(*ap),
                    distance,
                    speeds,
                    filling_ratio,
                    true,
                    discipline,
                    settings,
                );
                actions.push(combined.to_wire());
                let separate = catalogue::drive_to_silo(
                    &naming::machine_name(tv.id),
                    &naming::silo_access_name(*ap),
                    distance,
                    speeds,
                    filling_ratio,
                    false,
                    discipline,
                    settings,
                );
                actions.push(separate.to_wire());
                let unload = catalogue::unload_at_silo(&naming::machine_name(tv.id), &naming::silo_access_name(*ap), settings);
                actions.push(unload.to_wire());

                if matches!(settings.silo_planning_type, SiloPlanningType::WithSiloAccessCapacityAndCompaction) {
                    for compactor in domain.machines_of_kind(MachineKind::Compactor) {
                        if let MachineAttributes::Compactor { silo: compactor_silo, mass_per_sweep } = compactor.attributes {
                            if compactor_silo == silo.id {
                                let sweep = catalogue::sweep_silo_access(
                                    &naming::machine_name(compactor.id),
                                    &naming::silo_access_name(*ap),
                                    mass_per_sweep,
                                    silo_access.mass_capacity,
                                    settings,
                                );
                                actions.push(sweep.to_wire());
                            }
                        }
                    }
                }
            }
        }
    }

    Ok(actions)
}

fn build_goals(domain: &Domain) -> Vec<Goal> {
    let mut terms = Vec::new();
    for field in domain.fields() {
        terms.push(BoolExpr::fluent("field_harvested", vec![Atom::symbol(naming::field_name(field.id))]));
    }
    for tv in domain.machines_of_kind(MachineKind::TransportVehicle) {
        terms.push(BoolExpr::eq(
            NumExpr::fluent("tv_bunker_mass", vec![Atom::symbol(naming::machine_name(tv.id))]),
            NumExpr::constant(0.0),
        ));
    }
    vec![Goal {
        goal: Some(BoolExpr::and(terms)),
        timing: None,
    }]
}

fn build_metric(domain: &Domain, settings: &ProblemSettings) -> Vec<Metric> {
    if settings.is_temporal() {
        return match settings.temporal_optimization_setting {
            TemporalOptimizationSetting::Makespan => vec![Metric {
                kind: MetricKind::MinimizeMakespan as i32,
                expression: None,
            }],
            TemporalOptimizationSetting::None => vec![],
        };
    }

    if !settings.sequential_optimization_settings.is_active() {
        return vec![];
    }

    let mut terms = Vec::new();
    if settings.sequential_optimization_settings.k_harv_waiting_time > 0.0 {
        for h in domain.machines_of_kind(MachineKind::Harvester) {
            terms.push(NumExpr::fluent("harv_waiting_time", vec![Atom::symbol(naming::machine_name(h.id))]));
        }
    }
    if settings.sequential_optimization_settings.k_tv_waiting_time > 0.0 {
        for tv in domain.machines_of_kind(MachineKind::TransportVehicle) {
            terms.push(NumExpr::fluent("tv_waiting_time", vec![Atom::symbol(naming::machine_name(tv.id))]));
        }
    }
    vec![Metric {
        kind: MetricKind::MinimizeExpressionOnFinalState as i32,
        expression: Some(NumExpr {
            kind: Some(NumExprKind::Sum(NumExprList { terms })),
        }),
    }]
}

fn build_features(settings: &ProblemSettings) -> Vec<Feature> {
    let mut features = vec![Feature::NumericFluents, Feature::SimulatedEffects, Feature::ConditionalEffects];
    if settings.is_temporal() {
        features.push(Feature::DurativeActions);
        features.push(Feature::ContinuousTime);
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;
    use agri_planning_domain::domain::DomainBuilder;
    use agri_planning_domain::entities::*;
    use agri_planning_domain::ids::*;
    use agri_planning_domain::state::*;
    use crate::route::StraightLineRoutePlanner;

    fn point(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    fn build_minimal_domain() -> Domain {
        let mut b = DomainBuilder::new();
        let boundary = Polygon(vec![point(0.0, 0.0), point(100.0, 0.0), point(100.0, 100.0), point(0.0, 100.0)]);
        let field = Field {
            id: FieldId::new(1),
            subfield: Subfield {
                outer_boundary: boundary.clone(),
                inner_boundary: boundary,
                reference_lines: vec![],
            },
            access_points: vec![FieldAccessId::new(1)],
            avg_mass_per_area: 1.0,
        };
        let field_state = FieldState {
            avg_mass_per_area: 1.0,
            harvested_percentage: 0.0,
        };
        let ap = FieldAccessPoint {
            id: FieldAccessId::new(1),
            field: FieldId::new(1),
            position: point(0.0, 0.0),
        };
        b.register_field(field, field_state, vec![ap]).unwrap();

        let harvester = Machine {
            id: MachineId::new(1),
            geometry: None,
            attributes: MachineAttributes::Harvester {
                bunker: BunkerCapacity {
                    mass_capacity: 10_000.0,
                    volume_capacity: 20.0,
                },
                speeds: MachineSpeeds {
                    max_speed_empty: 2.0,
                    max_speed_full: 2.0,
                    working_speed: 1.0,
                },
                unloading_speed_mass: 100.0,
                unloading_speed_volume: 100.0,
            },
            initial_location: InitLocId::new(1),
        };
        let harvester_state = MachineState {
            position: point(0.0, 0.0),
            bunker_mass: 0.0,
            bunker_volume: 0.0,
            location: MachineLocation::InitialLocation,
            overloading_partner: None,
        };
        b.register_machine(harvester, harvester_state).unwrap();

        let tv = Machine {
            id: MachineId::new(2),
            geometry: None,
            attributes: MachineAttributes::TransportVehicle {
                bunker: BunkerCapacity {
                    mass_capacity: 8_000.0,
                    volume_capacity: 16.0,
                },
                speeds: MachineSpeeds {
                    max_speed_empty: 5.0,
                    max_speed_full: 3.0,
                    working_speed: 1.0,
                },
                unloading_speed_mass: 200.0,
                unloading_speed_volume: 200.0,
            },
            initial_location: InitLocId::new(2),
        };
        let tv_state = MachineState {
            position: point(10.0, 10.0),
            bunker_mass: 0.0,
            bunker_volume: 0.0,
            location: MachineLocation::InitialLocation,
            overloading_partner: None,
        };
        b.register_machine(tv, tv_state).unwrap();

        let silo = Silo {
            id: SiloId::new(1),
            boundary: Polygon(vec![]),
            mass_capacity: 50_000.0,
            access_points: vec![SiloAccessId::new(1)],
        };
        let silo_ap = SiloAccessPoint {
            id: SiloAccessId::new(1),
            silo: SiloId::new(1),
            position: point(500.0, 500.0),
            mass_capacity: 50_000.0,
        };
        b.register_silo(silo, vec![silo_ap]).unwrap();

        b.build().unwrap()
    }

    #[test]
    fn encode_produces_a_nonempty_plannable_problem() {
        let domain = build_minimal_domain();
        let routes = StraightLineRoutePlanner { speed: 5.0 };
        let settings = ProblemSettings::default();
        let problem = encode(&domain, &routes, &settings).unwrap();
        assert!(!problem.actions.is_empty());
        assert!(!problem.objects.is_empty());
        assert_eq!(problem.goals.len(), 1);
    }

    #[test]
    fn encode_fails_without_a_transport_vehicle() {
        let mut b = DomainBuilder::new();
        let boundary = Polygon(vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0), point(0.0, 10.0)]);
        let field = Field {
            id: FieldId::new(1),
            subfield: Subfield {
                outer_boundary: boundary.clone(),
                inner_boundary: boundary,
                reference_lines: vec![],
            },
            access_points: vec![FieldAccessId::new(1)],
            avg_mass_per_area: 1.0,
        };
        b.register_field(
            field,
            FieldState {
                avg_mass_per_area: 1.0,
                harvested_percentage: 0.0,
            },
            vec![FieldAccessPoint {
                id: FieldAccessId::new(1),
                field: FieldId::new(1),
                position: point(0.0, 0.0),
            }],
        )
        .unwrap();
        let harvester = Machine {
            id: MachineId::new(1),
            geometry: None,
            attributes: MachineAttributes::Harvester {
                bunker: BunkerCapacity {
                    mass_capacity: 1000.0,
                    volume_capacity: 10.0,
                },
                speeds: MachineSpeeds {
                    max_speed_empty: 1.0,
                    max_speed_full: 1.0,
                    working_speed: 1.0,
                },
                unloading_speed_mass: 10.0,
                unloading_speed_volume: 10.0,
            },
            initial_location: InitLocId::new(1),
        };
        b.register_machine(
            harvester,
            MachineState {
                position: point(0.0, 0.0),
                bunker_mass: 0.0,
                bunker_volume: 0.0,
                location: MachineLocation::InitialLocation,
                overloading_partner: None,
            },
        )
        .unwrap();
        b.register_silo(
            Silo {
                id: SiloId::new(1),
                boundary: Polygon(vec![]),
                mass_capacity: 1000.0,
                access_points: vec![SiloAccessId::new(1)],
            },
            vec![SiloAccessPoint {
                id: SiloAccessId::new(1),
                silo: SiloId::new(1),
                position: point(1.0, 1.0),
                mass_capacity: 1000.0,
            }],
        )
        .unwrap();
        let domain = b.build().unwrap();
        let routes = StraightLineRoutePlanner { speed: 1.0 };
        let settings = ProblemSettings::default();
        assert_eq!(encode(&domain, &routes, &settings).unwrap_err(), EncodeError::NoTransportVehicle);
    }
}
