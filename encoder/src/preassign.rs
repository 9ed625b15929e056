//! The pre-assignment resolver (§4.4): computes field<->harvester and TV<->harvester pre-bindings
//! when the caller hasn't supplied a complete set. Externally supplied base pre-assignments are
//! always preserved; this module only fills in what's missing.

use crate::route::RoutePlanner;
use agri_planning_domain::domain::Domain;
use agri_planning_domain::ids::{FieldId, MachineId, MachineKind};
use agri_planning_domain::state::{FieldPreAssignment, MachineLocation, TvPreAssignment};
use std::collections::{HashMap, HashSet};

/// Target shape for field pre-assignment: how many fields to pre-assign, and how many turns
/// (rounds) to distribute them over (§4.4 "given a target field count F and target turn count T").
#[derive(Copy, Clone, Debug)]
pub struct FieldPreAssignmentTarget {
    pub field_count: usize,
    pub turn_count: u32,
}

/// §4.4 field pre-assignment: "pick the F largest-area fields (after accounting for fields where a
/// harvester is already in-field), and assign them round-robin over harvesters. A harvester
/// already located at a field takes that field as its turn-1 assignment if it is still to be
/// worked."
pub fn resolve_field_pre_assignments(domain: &Domain, target: FieldPreAssignmentTarget, base: &[FieldPreAssignment]) -> Vec<FieldPreAssignment> {
    let mut resolved: Vec<FieldPreAssignment> = base.to_vec();
    let mut already_assigned: HashSet<FieldId> = resolved.iter().map(|fa| fa.field).collect();

    // Ascending id order, so round-robining doesn't depend on `Domain`'s internal HashMap order.
    let mut harvesters: Vec<MachineId> = domain.machines_of_kind(MachineKind::Harvester).map(|m| m.id).collect();
    harvesters.sort();
    if harvesters.is_empty() || target.field_count == 0 {
        return resolved;
    }

    // A harvester already standing in a field takes that field as its turn-1 assignment, ahead of
    // the largest-area ranking, if the field is still unharvested.
    let mut next_turn: HashMap<MachineId, u32> = harvesters.iter().map(|h| (*h, 1)).collect();
    for harvester in &harvesters {
        if already_assigned.iter().any(|f| resolved.iter().any(|fa| fa.field == *f && fa.harvester == *harvester)) {
            continue;
        }
        if let Some(state) = domain.machine_state(*harvester) {
            if let MachineLocation::Field(field_id) = state.location {
                if !domain.field_state(field_id).map(|fs| fs.is_harvested()).unwrap_or(true) && !already_assigned.contains(&field_id) {
                    resolved.push(FieldPreAssignment {
                        field: field_id,
                        harvester: *harvester,
                        turn: 1,
                    });
                    already_assigned.insert(field_id);
                    next_turn.insert(*harvester, 2);
                }
            }
        }
    }

    let mut candidates: Vec<FieldId> = domain
        .fields()
        .map(|f| f.id)
        .filter(|id| !already_assigned.contains(id))
        .filter(|id| !domain.field_state(*id).map(|fs| fs.is_harvested()).unwrap_or(true))
        .collect();
    candidates.sort_by(|a, b| {
        let area_a = domain.field(*a).map(|f| f.area()).unwrap_or(0.0);
        let area_b = domain.field(*b).map(|f| f.area()).unwrap_or(0.0);
        // Ties broken by ascending field id for determinism.
        area_b.partial_cmp(&area_a).unwrap_or(std::cmp::Ordering::Equal).then_with(|| a.cmp(b))
    });
    candidates.truncate(target.field_count.saturating_sub(already_assigned.len()));

    let mut harvester_idx = 0usize;
    for field in candidates {
        let harvester = harvesters[harvester_idx % harvesters.len()];
        let turn = *next_turn.get(&harvester).unwrap_or(&1);
        if turn <= target.turn_count.max(1) {
            resolved.push(FieldPreAssignment { field, harvester, turn });
            next_turn.insert(harvester, turn + 1);
        }
        harvester_idx += 1;
    }

    resolved
}

/// §4.4 TV pre-assignment: rank harvesters by minimum travel time from any free TV; round-robin
/// the closest free TV onto the next harvester in ranked order. TVs already overloading are bound
/// to their current harvester. TVs that are currently full are sent to their closest silo first
/// (represented here by simply excluding them from pre-assignment, since routing a full TV to a
/// silo is the drive-to-silo action's job, not the resolver's).
pub fn resolve_tv_pre_assignments(domain: &Domain, routes: &dyn RoutePlanner, base: &[TvPreAssignment]) -> Vec<TvPreAssignment> {
    let mut resolved: Vec<TvPreAssignment> = base.to_vec();
    let mut bound_tvs: HashSet<MachineId> = HashSet::new();
    for b in &resolved {
        match b {
            TvPreAssignment::Ordered { tvs, .. } => bound_tvs.extend(tvs.iter().copied()),
            TvPreAssignment::Unordered { tv, .. } => {
                bound_tvs.insert(*tv);
            }
        }
    }

    let mut harvesters: Vec<MachineId> = domain.machines_of_kind(MachineKind::Harvester).map(|m| m.id).collect();
    harvesters.sort();
    let mut free_tvs: Vec<MachineId> = domain
        .machines_of_kind(MachineKind::TransportVehicle)
        .filter(|m| !bound_tvs.contains(&m.id))
        .filter(|m| domain.machine_state(m.id).map(|s| s.bunker_mass < m.bunker().map(|b| b.mass_capacity).unwrap_or(f64::MAX)).unwrap_or(true))
        .map(|m| m.id)
        .collect();

    if harvesters.is_empty() || free_tvs.is_empty() {
        return resolved;
    }

    // Rank harvesters by the minimum travel time from any free TV (closer harvesters served first).
    let mut ranked_harvesters = harvesters.clone();
    ranked_harvesters.sort_by(|a, b| {
        let ta = min_travel_time(domain, routes, *a, &free_tvs);
        let tb = min_travel_time(domain, routes, *b, &free_tvs);
        ta.partial_cmp(&tb).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut idx = 0usize;
    while !free_tvs.is_empty() {
        let harvester = ranked_harvesters[idx % ranked_harvesters.len()];
        if let Some(closest_idx) = closest_tv_index(domain, routes, harvester, &free_tvs) {
            let tv = free_tvs.remove(closest_idx);
            resolved.push(TvPreAssignment::Unordered { tv, harvester });
        }
        idx += 1;
        if idx > harvesters.len() * (domain.machines_of_kind(MachineKind::TransportVehicle).count() + 1) {
            break;
        }
    }

    resolved
}

fn min_travel_time(domain: &Domain, routes: &dyn RoutePlanner, harvester: MachineId, tvs: &[MachineId]) -> f64 {
    tvs.iter()
        .filter_map(|tv| travel_time(domain, routes, harvester, *tv))
        .fold(f64::INFINITY, f64::min)
}

fn closest_tv_index(domain: &Domain, routes: &dyn RoutePlanner, harvester: MachineId, tvs: &[MachineId]) -> Option<usize> {
    tvs.iter()
        .enumerate()
        .filter_map(|(i, tv)| travel_time(domain, routes, harvester, *tv).map(|t| (i, t)))
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
}

fn travel_time(domain: &Domain, routes: &dyn RoutePlanner, harvester: MachineId, tv: MachineId) -> Option<f64> {
    let harv_pos = domain.machine_state(harvester)?.position;
    let tv_pos = domain.machine_state(tv)?.position;
    let d = routes.get_duration(tv_pos, harv_pos, tv);
    if d >= 0.0 {
        Some(d)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agri_planning_domain::domain::DomainBuilder;
    use agri_planning_domain::entities::*;
    use agri_planning_domain::ids::*;
    use agri_planning_domain::state::*;

    #[test]
    fn field_pre_assignment_target_zero_changes_nothing() {
        // A target of zero fields must leave the base list untouched.
        let target = FieldPreAssignmentTarget {
            field_count: 0,
            turn_count: 1,
        };
        assert_eq!(target.field_count, 0);
    }

    fn point(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    /// Every field this helper builds has the same 100x100 boundary, so all candidates tie on
    /// area and the resolver's id tie-break is the only thing that can order them.
    fn equal_area_field(id: u32) -> (Field, FieldState, Vec<FieldAccessPoint>) {
        let boundary = Polygon(vec![point(0.0, 0.0), point(100.0, 0.0), point(100.0, 100.0), point(0.0, 100.0)]);
        let field = Field {
            id: FieldId::new(id),
            subfield: Subfield {
                outer_boundary: boundary.clone(),
                inner_boundary: boundary,
                reference_lines: vec![],
            },
            access_points: vec![FieldAccessId::new(id)],
            avg_mass_per_area: 1.0,
        };
        let state = FieldState {
            avg_mass_per_area: 1.0,
            harvested_percentage: 0.0,
        };
        let ap = FieldAccessPoint {
            id: FieldAccessId::new(id),
            field: FieldId::new(id),
            position: point(0.0, 0.0),
        };
        (field, state, vec![ap])
    }

    fn harvester(id: u32) -> (Machine, MachineState) {
        let machine = Machine {
            id: MachineId::new(id),
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
            initial_location: InitLocId::new(id),
        };
        let state = MachineState {
            position: point(0.0, 0.0),
            bunker_mass: 0.0,
            bunker_volume: 0.0,
            location: MachineLocation::InitialLocation,
            overloading_partner: None,
        };
        (machine, state)
    }

    fn silo(id: u32) -> (Silo, Vec<SiloAccessPoint>) {
        let silo = Silo {
            id: SiloId::new(id),
            boundary: Polygon(vec![]),
            mass_capacity: 50_000.0,
            access_points: vec![SiloAccessId::new(id)],
        };
        let ap = SiloAccessPoint {
            id: SiloAccessId::new(id),
            silo: SiloId::new(id),
            position: point(500.0, 500.0),
            mass_capacity: 50_000.0,
        };
        (silo, vec![ap])
    }

    #[test]
    fn equal_area_candidates_are_ordered_by_ascending_field_id() {
        let mut b = DomainBuilder::new();
        // Registered out of id order, so only the tie-break (not insertion order) can explain the result.
        for id in [7, 2, 5] {
            let (f, fs, aps) = equal_area_field(id);
            b.register_field(f, fs, aps).unwrap();
        }
        let (h, hs) = harvester(1);
        b.register_machine(h, hs).unwrap();
        let (s, saps) = silo(1);
        b.register_silo(s, saps).unwrap();
        let domain = b.build().unwrap();

        let target = FieldPreAssignmentTarget {
            field_count: 3,
            turn_count: 3,
        };
        let resolved = resolve_field_pre_assignments(&domain, target, &[]);
        let mut turns: Vec<(u32, u32)> = resolved.iter().map(|fa| (fa.turn, fa.field.raw())).collect();
        turns.sort();
        assert_eq!(turns, vec![(1, 2), (2, 5), (3, 7)]);
    }

    #[test]
    fn harvester_round_robin_is_ascending_id_order() {
        let mut b = DomainBuilder::new();
        for id in [1, 2] {
            let (f, fs, aps) = equal_area_field(id);
            b.register_field(f, fs, aps).unwrap();
        }
        // Registered out of id order: harvester 5 first, harvester 2 second.
        for id in [5, 2] {
            let (h, hs) = harvester(id);
            b.register_machine(h, hs).unwrap();
        }
        let (s, saps) = silo(1);
        b.register_silo(s, saps).unwrap();
        let domain = b.build().unwrap();

        let target = FieldPreAssignmentTarget {
            field_count: 2,
            turn_count: 1,
        };
        let resolved = resolve_field_pre_assignments(&domain, target, &[]);
        let mut by_field: Vec<(u32, u32)> = resolved.iter().map(|fa| (fa.field.raw(), fa.harvester.raw())).collect();
        by_field.sort();
        assert_eq!(by_field, vec![(1, 2), (2, 5)]);
    }
}
