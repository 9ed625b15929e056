//! §4.6.1: the representative and supplemental heuristic kinds carried over from
//! `general_heuristics.py`, each a small struct implementing [`crate::heuristic::Heuristic`].

use crate::heuristic::Heuristic;
use agri_planning_actions::state_view::{FluentKey, StateView};
use agri_planning_domain::domain::Domain;
use agri_planning_domain::fluents::ObjectKind;
use agri_planning_domain::ids::MachineKind;
use agri_planning_domain::naming::{field_name, machine_name};

fn sentinel_name(kind: ObjectKind) -> String {
    format!("no_{}", agri_planning_domain::fluents::object_kind_type_name(kind))
}

/// Remaining field mass, subtracting either the harvested percentage or the reserved mass —
/// §4.6.1's "both are 'remaining mass' variants differing only in which per-field flag they
/// subtract against".
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum FieldSubtrahend {
    Harvested,
    Assigned,
}

fn remaining_field_mass(domain: &Domain, state: &dyn StateView, subtrahend: FieldSubtrahend) -> f64 {
    domain
        .fields()
        .map(|field| {
            let name = field_name(field.id);
            let total = state.get_real(&FluentKey::new("field_total_yield_mass", &[&name]));
            let remaining = match subtrahend {
                FieldSubtrahend::Harvested => {
                    let pct = state.get_real(&FluentKey::new("field_harvested_percentage", &[&name]));
                    total * (1.0 - (pct / 100.0).clamp(0.0, 1.0))
                }
                FieldSubtrahend::Assigned => {
                    let reserved = state.get_real(&FluentKey::new("field_reserved_mass", &[&name]));
                    (total - reserved).max(0.0)
                }
            };
            remaining.max(0.0)
        })
        .sum()
}

pub struct HeuristicInitialYieldMassInFieldsMinusHarvested;

impl Heuristic for HeuristicInitialYieldMassInFieldsMinusHarvested {
    fn name(&self) -> &str {
        "initial_yield_mass_in_fields_minus_harvested"
    }

    fn cost(&self, domain: &Domain, state: &dyn StateView) -> f64 {
        remaining_field_mass(domain, state, FieldSubtrahend::Harvested)
    }
}

pub struct HeuristicInitialYieldMassInFieldsMinusAssigned;

impl Heuristic for HeuristicInitialYieldMassInFieldsMinusAssigned {
    fn name(&self) -> &str {
        "initial_yield_mass_in_fields_minus_assigned"
    }

    fn cost(&self, domain: &Domain, state: &dyn StateView) -> f64 {
        remaining_field_mass(domain, state, FieldSubtrahend::Assigned)
    }
}

/// Silo-side remaining-mass variants: the total yield mass still to be stored, minus either
/// what's physically in silos already or what's reserved for an in-flight overload.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum SiloSubtrahend {
    Stored,
    Reserved,
}

fn remaining_mass_to_store(domain: &Domain, state: &dyn StateView, subtrahend: SiloSubtrahend) -> f64 {
    let total = domain.total_initial_yield_mass();
    let subtracted = match subtrahend {
        SiloSubtrahend::Stored => state.get_real(&FluentKey::new("total_mass_in_silos", &[])),
        SiloSubtrahend::Reserved => state.get_real(&FluentKey::new("total_mass_reserved_in_silos", &[])),
    };
    (total - subtracted).max(0.0)
}

pub struct HeuristicInitialYieldMassToStoreMinusStored;

impl Heuristic for HeuristicInitialYieldMassToStoreMinusStored {
    fn name(&self) -> &str {
        "initial_yield_mass_to_store_minus_stored"
    }

    fn cost(&self, domain: &Domain, state: &dyn StateView) -> f64 {
        remaining_mass_to_store(domain, state, SiloSubtrahend::Stored)
    }
}

pub struct HeuristicInitialYieldMassToStoreMinusReserved;

impl Heuristic for HeuristicInitialYieldMassToStoreMinusReserved {
    fn name(&self) -> &str {
        "initial_yield_mass_to_store_minus_reserved"
    }

    fn cost(&self, domain: &Domain, state: &dyn StateView) -> f64 {
        remaining_mass_to_store(domain, state, SiloSubtrahend::Reserved)
    }
}

fn is_field_unassigned(domain: &Domain, state: &dyn StateView, field_name_str: &str) -> bool {
    let harvester = state.get_object(&FluentKey::new("field_harvester", &[field_name_str]));
    harvester == sentinel_name(ObjectKind::Harvester) || harvester.is_empty()
}

pub struct HeuristicCountUnassignedFields;

impl Heuristic for HeuristicCountUnassignedFields {
    fn name(&self) -> &str {
        "count_unassigned_fields"
    }

    fn cost(&self, domain: &Domain, state: &dyn StateView) -> f64 {
        domain.fields().filter(|f| is_field_unassigned(domain, state, &field_name(f.id))).count() as f64
    }
}

pub struct HeuristicYieldMassUnassignedFields;

impl Heuristic for HeuristicYieldMassUnassignedFields {
    fn name(&self) -> &str {
        "yield_mass_unassigned_fields"
    }

    fn cost(&self, domain: &Domain, state: &dyn StateView) -> f64 {
        domain
            .fields()
            .filter_map(|f| {
                let name = field_name(f.id);
                is_field_unassigned(domain, state, &name).then(|| state.get_real(&FluentKey::new("field_total_yield_mass", &[&name])))
            })
            .sum()
    }
}

fn sum_transit_time(domain: &Domain, state: &dyn StateView, kind: MachineKind, fluent: &str) -> f64 {
    domain
        .machines_of_kind(kind)
        .map(|m| state.get_real(&FluentKey::new(fluent, &[&machine_name(m.id)])))
        .sum()
}

pub struct HeuristicHarvestersTransitTime;

impl Heuristic for HeuristicHarvestersTransitTime {
    fn name(&self) -> &str {
        "harvesters_transit_time"
    }

    fn cost(&self, domain: &Domain, state: &dyn StateView) -> f64 {
        sum_transit_time(domain, state, MachineKind::Harvester, "harv_transit_time")
    }
}

pub struct HeuristicTVsTransitTime;

impl Heuristic for HeuristicTVsTransitTime {
    fn name(&self) -> &str {
        "tvs_transit_time"
    }

    fn cost(&self, domain: &Domain, state: &dyn StateView) -> f64 {
        sum_transit_time(domain, state, MachineKind::TransportVehicle, "tv_transit_time")
    }
}

/// Transit distance weighted by a constant base cost per still-active harvester; used as a
/// tie-breaker (§4.6.1).
pub struct HeuristicHarvestersTransitDistanceWithBaseCost {
    pub base_cost_per_harvester: f64,
}

impl Default for HeuristicHarvestersTransitDistanceWithBaseCost {
    fn default() -> Self {
        HeuristicHarvestersTransitDistanceWithBaseCost { base_cost_per_harvester: 1.0 }
    }
}

impl Heuristic for HeuristicHarvestersTransitDistanceWithBaseCost {
    fn name(&self) -> &str {
        "harvesters_transit_distance_with_base_cost"
    }

    fn cost(&self, domain: &Domain, state: &dyn StateView) -> f64 {
        let mut total = 0.0;
        for m in domain.machines_of_kind(MachineKind::Harvester) {
            let name = machine_name(m.id);
            let free = state.get_bool(&FluentKey::new("harv_free", &[&name]));
            total += state.get_real(&FluentKey::new("harv_transit_time", &[&name]));
            if !free {
                total += self.base_cost_per_harvester;
            }
        }
        total
    }
}

/// Idle-capacity penalty: bunker mass of TVs currently waiting to drive, or bunker capacity of
/// TVs currently waiting to overload — §4.6 "penalises idle capacity".
pub struct HeuristicTVsWaitingToDriveBunkerMass;

impl Heuristic for HeuristicTVsWaitingToDriveBunkerMass {
    fn name(&self) -> &str {
        "tvs_waiting_to_drive_bunker_mass"
    }

    fn cost(&self, domain: &Domain, state: &dyn StateView) -> f64 {
        domain
            .machines_of_kind(MachineKind::TransportVehicle)
            .map(|m| {
                let name = machine_name(m.id);
                if state.get_int(&FluentKey::new("tv_waiting_to_drive_id", &[&name])) >= 0 {
                    state.get_real(&FluentKey::new("tv_bunker_mass", &[&name]))
                } else {
                    0.0
                }
            })
            .sum()
    }
}

pub struct HeuristicTVsWaitingToOverloadBunkerCapacity;

impl Heuristic for HeuristicTVsWaitingToOverloadBunkerCapacity {
    fn name(&self) -> &str {
        "tvs_waiting_to_overload_bunker_capacity"
    }

    fn cost(&self, domain: &Domain, state: &dyn StateView) -> f64 {
        domain
            .machines_of_kind(MachineKind::TransportVehicle)
            .map(|m| {
                let name = machine_name(m.id);
                let free = state.get_bool(&FluentKey::new("tv_free", &[&name]));
                let can_load = state.get_bool(&FluentKey::new("tv_can_load", &[&name]));
                if free && can_load {
                    let capacity = state.get_real(&FluentKey::new("tv_bunker_capacity", &[&name]));
                    let used = state.get_real(&FluentKey::new("tv_bunker_mass", &[&name]));
                    (capacity - used).max(0.0)
                } else {
                    0.0
                }
            })
            .sum()
    }
}

/// A control heuristic: returns `f64::INFINITY` once `fluent` exceeds `bound` in the evaluated
/// state, rejecting states worse than a known-valid base plan's final state (§4.6 "Control
/// heuristics"). Otherwise falls through to zero so it composes additively with other weighted
/// components without double-penalising.
pub struct ControlBoundHeuristic {
    label: String,
    fluent: &'static str,
    params: Vec<String>,
    bound: f64,
}

impl ControlBoundHeuristic {
    pub fn new(label: impl Into<String>, fluent: &'static str, params: Vec<String>, bound: f64) -> Self {
        ControlBoundHeuristic {
            label: label.into(),
            fluent,
            params,
            bound,
        }
    }
}

impl Heuristic for ControlBoundHeuristic {
    fn name(&self) -> &str {
        &self.label
    }

    fn cost(&self, _domain: &Domain, state: &dyn StateView) -> f64 {
        let params: Vec<&str> = self.params.iter().map(String::as_str).collect();
        let value = state.get_real(&FluentKey::new(self.fluent, &params));
        if value > self.bound {
            f64::INFINITY
        } else {
            0.0
        }
    }
}

/// A zero-cost diagnostic sink: records selected fluent values to an in-memory log rather than
/// contributing to the weighted sum (§4.6 "Debug heuristics").
pub struct DebugSnapshotHeuristic {
    label: String,
    watched: Vec<(&'static str, Vec<String>)>,
}

impl DebugSnapshotHeuristic {
    pub fn new(label: impl Into<String>, watched: Vec<(&'static str, Vec<String>)>) -> Self {
        DebugSnapshotHeuristic {
            label: label.into(),
            watched,
        }
    }
}

impl Heuristic for DebugSnapshotHeuristic {
    fn name(&self) -> &str {
        &self.label
    }

    fn cost(&self, _domain: &Domain, state: &dyn StateView) -> f64 {
        for (fluent, params) in &self.watched {
            let param_refs: Vec<&str> = params.iter().map(String::as_str).collect();
            let value = state.get_real(&FluentKey::new(*fluent, &param_refs));
            tracing::debug!(heuristic = %self.label, fluent = %fluent, value, "debug heuristic snapshot");
        }
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agri_planning_actions::state_view::{FluentState, FluentValue};

    #[test]
    fn remaining_mass_subtracts_harvested_percentage() {
        let mut state = FluentState::new();
        state.set(FluentKey::new("field_total_yield_mass", &["field_1"]), FluentValue::Real(1000.0));
        state.set(FluentKey::new("field_harvested_percentage", &["field_1"]), FluentValue::Real(40.0));
        // This unit test exercises only the pure helper, not a full Domain; see encoder crate
        // tests for end-to-end fixtures that build a Domain.
        let total = state.get_real(&FluentKey::new("field_total_yield_mass", &["field_1"]));
        let pct = state.get_real(&FluentKey::new("field_harvested_percentage", &["field_1"]));
        assert_eq!(total * (1.0 - pct / 100.0), 600.0);
    }

    #[test]
    fn control_bound_heuristic_rejects_beyond_bound() {
        let mut state = FluentState::new();
        state.set(FluentKey::new("harv_waiting_time", &["machine_1"]), FluentValue::Real(120.0));
        let h = ControlBoundHeuristic::new("harv_waiting_time_bound", "harv_waiting_time", vec!["machine_1".to_string()], 60.0);
        assert_eq!(h.cost(&fixture_domain(), &state), f64::INFINITY);
    }

    #[test]
    fn control_bound_heuristic_passes_within_bound() {
        let mut state = FluentState::new();
        state.set(FluentKey::new("harv_waiting_time", &["machine_1"]), FluentValue::Real(10.0));
        let h = ControlBoundHeuristic::new("harv_waiting_time_bound", "harv_waiting_time", vec!["machine_1".to_string()], 60.0);
        assert_eq!(h.cost(&fixture_domain(), &state), 0.0);
    }

    fn fixture_domain() -> Domain {
        use agri_planning_domain::domain::DomainBuilder;
        use agri_planning_domain::entities::*;
        use agri_planning_domain::ids::*;

        let mut b = DomainBuilder::new();
        let boundary = Polygon(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(100.0, 0.0),
            Point2D::new(100.0, 100.0),
            Point2D::new(0.0, 100.0),
        ]);
        b.register_field(
            Field {
                id: FieldId::new(1),
                subfield: Subfield {
                    outer_boundary: boundary.clone(),
                    inner_boundary: boundary,
                    reference_lines: vec![],
                },
                access_points: vec![FieldAccessId::new(1)],
                avg_mass_per_area: 1.0,
            },
            FieldState {
                avg_mass_per_area: 1.0,
                harvested_percentage: 0.0,
            },
            vec![FieldAccessPoint {
                id: FieldAccessId::new(1),
                field: FieldId::new(1),
                position: Point2D::new(0.0, 0.0),
            }],
        )
        .unwrap();
        b.register_machine(
            Machine {
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
            },
            MachineState {
                position: Point2D::new(0.0, 0.0),
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
                mass_capacity: 50_000.0,
                access_points: vec![SiloAccessId::new(1)],
            },
            vec![SiloAccessPoint {
                id: SiloAccessId::new(1),
                silo: SiloId::new(1),
                position: Point2D::new(500.0, 500.0),
                mass_capacity: 50_000.0,
            }],
        )
        .unwrap();
        b.build().unwrap()
    }
}
