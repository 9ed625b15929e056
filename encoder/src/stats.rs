//! Problem statistics (§4.5): min/max/avg/count over fields, machines, silos, and pairwise transit
//! distances segregated by category. Feeds fluent-bound computation (`bounds.rs`) and several
//! heuristics (`agri-planning-heuristics`).

use agri_planning_domain::domain::Domain;
use agri_planning_domain::ids::MachineKind;
use crate::route::RoutePlanner;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MinMaxAvg {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub count: usize,
}

impl MinMaxAvg {
    pub fn of(values: impl Iterator<Item = f64>) -> Self {
        let values: Vec<f64> = values.collect();
        if values.is_empty() {
            return MinMaxAvg::default();
        }
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let avg = values.iter().sum::<f64>() / values.len() as f64;
        MinMaxAvg {
            min,
            max,
            avg,
            count: values.len(),
        }
    }
}

/// Pairwise transit distance categories (§4.5): "(init->field, init->silo, field<->field
/// same/different, field<->silo)".
#[derive(Copy, Clone, Debug, Default)]
pub struct TransitStats {
    pub init_to_field: MinMaxAvg,
    pub init_to_silo: MinMaxAvg,
    pub field_to_field: MinMaxAvg,
    pub field_to_silo: MinMaxAvg,
}

#[derive(Clone, Debug, Default)]
pub struct ProblemStatistics {
    pub field_areas: MinMaxAvg,
    pub field_masses: MinMaxAvg,
    pub harvester_speeds_empty: MinMaxAvg,
    pub tv_speeds_empty: MinMaxAvg,
    pub tv_bunker_capacities: MinMaxAvg,
    pub harv_bunker_capacities: MinMaxAvg,
    pub silo_capacities: MinMaxAvg,
    pub transit: TransitStats,
}

impl ProblemStatistics {
    pub fn compute(domain: &Domain, routes: &dyn RoutePlanner) -> Self {
        let field_areas = MinMaxAvg::of(domain.fields().map(|f| f.area()));
        let field_masses = MinMaxAvg::of(domain.fields().map(|f| f.initial_yield_mass()));

        let harvester_speeds_empty = MinMaxAvg::of(domain.machines_of_kind(MachineKind::Harvester).filter_map(|m| match &m.attributes {
            agri_planning_domain::entities::MachineAttributes::Harvester { speeds, .. } => Some(speeds.max_speed_empty),
            _ => None,
        }));
        let tv_speeds_empty = MinMaxAvg::of(domain.machines_of_kind(MachineKind::TransportVehicle).filter_map(|m| match &m.attributes {
            agri_planning_domain::entities::MachineAttributes::TransportVehicle { speeds, .. } => Some(speeds.max_speed_empty),
            _ => None,
        }));
        let tv_bunker_capacities = MinMaxAvg::of(domain.machines_of_kind(MachineKind::TransportVehicle).filter_map(|m| m.bunker()).map(|b| b.mass_capacity));
        let harv_bunker_capacities = MinMaxAvg::of(domain.machines_of_kind(MachineKind::Harvester).filter_map(|m| m.bunker()).map(|b| b.mass_capacity));
        let silo_capacities = MinMaxAvg::of(domain.silos().map(|s| s.mass_capacity));

        let transit = compute_transit_stats(domain, routes);

        ProblemStatistics {
            field_areas,
            field_masses,
            harvester_speeds_empty,
            tv_speeds_empty,
            tv_bunker_capacities,
            harv_bunker_capacities,
            silo_capacities,
            transit,
        }
    }
}

fn compute_transit_stats(domain: &Domain, routes: &dyn RoutePlanner) -> TransitStats {
    let fields: Vec<_> = domain.fields().collect();
    let machines: Vec<_> = domain.machines().collect();

    let mut init_to_field = vec![];
    let mut field_to_field = vec![];
    let mut field_to_silo = vec![];
    let mut init_to_silo = vec![];

    for m in &machines {
        let from = match domain.machine_state(m.id) {
            Some(s) => s.position,
            None => continue,
        };
        for f in &fields {
            for ap in &f.access_points {
                if let Some(fap) = domain.field_access_point(*ap) {
                    let d = routes.get_distance(from, fap.position, m.id);
                    if d >= 0.0 {
                        init_to_field.push(d);
                    }
                }
            }
        }
        for s in domain.silos() {
            for ap in &s.access_points {
                if let Some(sap) = domain.silo_access_point(*ap) {
                    let d = routes.get_distance(from, sap.position, m.id);
                    if d >= 0.0 {
                        init_to_silo.push(d);
                    }
                }
            }
        }
    }

    for fi in &fields {
        for fj in &fields {
            if fi.id == fj.id {
                continue;
            }
            for api in &fi.access_points {
                for apj in &fj.access_points {
                    if let (Some(a), Some(b)) = (domain.field_access_point(*api), domain.field_access_point(*apj)) {
                        if let Some(harv) = machines.iter().find(|m| m.kind() == MachineKind::Harvester) {
                            let d = routes.get_distance(a.position, b.position, harv.id);
                            if d >= 0.0 {
                                field_to_field.push(d);
                            }
                        }
                    }
                }
            }
        }
    }

    for f in &fields {
        for ap in &f.access_points {
            if let Some(fap) = domain.field_access_point(*ap) {
                for s in domain.silos() {
                    for sap_id in &s.access_points {
                        if let Some(sap) = domain.silo_access_point(*sap_id) {
                            if let Some(tv) = machines.iter().find(|m| m.kind() == MachineKind::TransportVehicle) {
                                let d = routes.get_distance(fap.position, sap.position, tv.id);
                                if d >= 0.0 {
                                    field_to_silo.push(d);
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    TransitStats {
        init_to_field: MinMaxAvg::of(init_to_field.into_iter()),
        init_to_silo: MinMaxAvg::of(init_to_silo.into_iter()),
        field_to_field: MinMaxAvg::of(field_to_field.into_iter()),
        field_to_silo: MinMaxAvg::of(field_to_silo.into_iter()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_max_avg_of_empty_iterator_is_zeroed() {
        let stats = MinMaxAvg::of(std::iter::empty());
        assert_eq!(stats, MinMaxAvg::default());
    }

    #[test]
    fn min_max_avg_computes_correctly() {
        let stats = MinMaxAvg::of(vec![1.0, 2.0, 3.0].into_iter());
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        assert_eq!(stats.avg, 2.0);
        assert_eq!(stats.count, 3);
    }
}
