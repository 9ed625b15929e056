//! Fluent-bound computation (§4.1 "Bounds are computed (when enabled) from problem statistics;
//! otherwise fluents are unbounded."). Both modes must produce semantically identical plans — this
//! module only ever tightens [`agri_planning_domain::fluents::FluentRegistry`] bounds, it never
//! changes a fluent's default or kind.

use crate::stats::ProblemStatistics;
use agri_planning_domain::fluents::FluentRegistry;
use agri_planning_domain::settings::NumericFluentBoundsOption;

/// Applies `numeric_fluent_bounds_option` to `registry`, in place. `None` leaves every fluent
/// unbounded; `Default` applies a small set of universally-safe bounds (percentages, etc.);
/// `ProblemSpecific` additionally derives bounds from `stats`.
pub fn apply_bounds(registry: &mut FluentRegistry, stats: &ProblemStatistics, option: NumericFluentBoundsOption) {
    if matches!(option, NumericFluentBoundsOption::None) {
        return;
    }

    registry.set_bounds("field_harvested_percentage", (0.0, 100.0));
    registry.set_bounds("planning_failed", (0.0, 1.0));

    if matches!(option, NumericFluentBoundsOption::ProblemSpecific) {
        if stats.field_masses.count > 0 {
            registry.set_bounds("field_total_yield_mass", (0.0, stats.field_masses.max));
            registry.set_bounds("field_reserved_mass", (0.0, stats.field_masses.max));
        }
        if stats.tv_bunker_capacities.count > 0 {
            registry.set_bounds("tv_bunker_mass", (0.0, stats.tv_bunker_capacities.max));
            registry.set_bounds("tv_bunker_capacity", (0.0, stats.tv_bunker_capacities.max));
        }
        if stats.silo_capacities.count > 0 {
            let total: f64 = stats.silo_capacities.max * stats.silo_capacities.count as f64;
            registry.set_bounds("total_mass_in_silos", (0.0, total));
            registry.set_bounds("total_mass_reserved_in_silos", (0.0, total));
        }
        let total_field_mass = stats.field_masses.avg * stats.field_masses.count as f64;
        registry.set_bounds("total_harvested_mass", (0.0, total_field_mass.max(0.0)));
        registry.set_bounds("total_mass_unreserved_in_fields", (0.0, total_field_mass.max(0.0)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_option_leaves_registry_unbounded() {
        let mut reg = FluentRegistry::standard();
        let stats = ProblemStatistics::default();
        apply_bounds(&mut reg, &stats, NumericFluentBoundsOption::None);
        assert!(reg.get("field_harvested_percentage").unwrap().bounds.is_none());
    }

    #[test]
    fn default_option_bounds_percentages() {
        let mut reg = FluentRegistry::standard();
        let stats = ProblemStatistics::default();
        apply_bounds(&mut reg, &stats, NumericFluentBoundsOption::Default);
        assert_eq!(reg.get("field_harvested_percentage").unwrap().bounds, Some((0.0, 100.0)));
    }

    #[test]
    fn problem_specific_option_bounds_from_stats() {
        let mut reg = FluentRegistry::standard();
        let mut stats = ProblemStatistics::default();
        stats.tv_bunker_capacities = crate::stats::MinMaxAvg {
            min: 5000.0,
            max: 12000.0,
            avg: 8000.0,
            count: 2,
        };
        apply_bounds(&mut reg, &stats, NumericFluentBoundsOption::ProblemSpecific);
        assert_eq!(reg.get("tv_bunker_mass").unwrap().bounds, Some((0.0, 12000.0)));
    }
}
