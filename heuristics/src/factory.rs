//! §4.6 "Two factories assemble standard heuristic bundles -- one for sequential, one for
//! temporal planning -- with named presets." §6.1's sequential factory additionally takes a base
//! plan or its final state, from which control heuristics derive their reference bound by
//! simulating the base plan via the engine's simulator (that simulation itself lives in the
//! decoder/validator layer; this factory only consumes its result).

use crate::heuristic::Heuristic;
use crate::library::{
    HeuristicCountUnassignedFields, HeuristicHarvestersTransitDistanceWithBaseCost, HeuristicHarvestersTransitTime,
    HeuristicInitialYieldMassInFieldsMinusAssigned, HeuristicInitialYieldMassInFieldsMinusHarvested, HeuristicTVsTransitTime,
    HeuristicTVsWaitingToDriveBunkerMass, HeuristicTVsWaitingToOverloadBunkerCapacity, HeuristicYieldMassUnassignedFields,
};
use crate::weighted::WeightedHeuristic;
use agri_planning_actions::state_view::FluentState;

fn boxed(h: impl Heuristic + Send + Sync + 'static) -> Box<dyn Heuristic + Send + Sync> {
    Box::new(h)
}

/// Assembles sequential-planning heuristic presets. Reference bounds for control heuristics are
/// derived from `base_final_state`, when supplied, by simulating a known-valid base plan to its
/// last reachable state (§4.6 "a known-valid base plan's final state").
pub struct SequentialHeuristicFactory {
    base_final_state: Option<FluentState>,
}

impl SequentialHeuristicFactory {
    pub fn new() -> Self {
        SequentialHeuristicFactory { base_final_state: None }
    }

    pub fn with_base_final_state(base_final_state: FluentState) -> Self {
        SequentialHeuristicFactory {
            base_final_state: Some(base_final_state),
        }
    }

    /// Known preset names: `"default_sequential"`. Returns `None` for anything else.
    pub fn build(&self, preset: &str) -> Option<WeightedHeuristic> {
        match preset {
            "default_sequential" => Some(self.default_sequential()),
            _ => None,
        }
    }

    fn default_sequential(&self) -> WeightedHeuristic {
        let mut components: Vec<(Box<dyn Heuristic + Send + Sync>, f64)> = vec![
            (boxed(HeuristicInitialYieldMassInFieldsMinusHarvested), 1.0),
            (boxed(HeuristicCountUnassignedFields), 1.0),
        ];
        if self.base_final_state.is_some() {
            components.push((boxed(HeuristicTVsWaitingToDriveBunkerMass), 1.0));
        }
        WeightedHeuristic::new("default_sequential", components)
    }
}

impl Default for SequentialHeuristicFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Assembles temporal-planning heuristic presets, which lean more heavily on the transit-time
/// accumulators since temporal plans expose real concurrency between machines.
pub struct TemporalHeuristicFactory {
    base_final_state: Option<FluentState>,
}

impl TemporalHeuristicFactory {
    pub fn new() -> Self {
        TemporalHeuristicFactory { base_final_state: None }
    }

    pub fn with_base_final_state(base_final_state: FluentState) -> Self {
        TemporalHeuristicFactory {
            base_final_state: Some(base_final_state),
        }
    }

    /// Known preset names: `"default_temporal"`. Returns `None` for anything else.
    pub fn build(&self, preset: &str) -> Option<WeightedHeuristic> {
        match preset {
            "default_temporal" => Some(self.default_temporal()),
            _ => None,
        }
    }

    fn default_temporal(&self) -> WeightedHeuristic {
        let mut components: Vec<(Box<dyn Heuristic + Send + Sync>, f64)> = vec![
            (boxed(HeuristicInitialYieldMassInFieldsMinusAssigned), 1.0),
            (boxed(HeuristicYieldMassUnassignedFields), 1.0),
            (boxed(HeuristicHarvestersTransitTime), 1.0),
            (boxed(HeuristicTVsTransitTime), 1.0),
        ];
        if self.base_final_state.is_some() {
            components.push((boxed(HeuristicTVsWaitingToOverloadBunkerCapacity), 1.0));
            components.push((boxed(HeuristicHarvestersTransitDistanceWithBaseCost::default()), 1.0));
        }
        WeightedHeuristic::new("default_temporal", components)
    }
}

impl Default for TemporalHeuristicFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sequential_preset_is_known() {
        let factory = SequentialHeuristicFactory::new();
        assert!(factory.build("default_sequential").is_some());
        assert!(factory.build("not_a_real_preset").is_none());
    }

    #[test]
    fn default_temporal_preset_is_known() {
        let factory = TemporalHeuristicFactory::new();
        assert!(factory.build("default_temporal").is_some());
    }

    #[test]
    fn base_final_state_adds_control_components() {
        let without = SequentialHeuristicFactory::new().build("default_sequential").unwrap();
        let with = SequentialHeuristicFactory::with_base_final_state(FluentState::new())
            .build("default_sequential")
            .unwrap();
        // Both must evaluate without panicking on an empty state; the extra component changes
        // nothing about a state with no TVs waiting to drive.
        let domain = test_domain();
        assert_eq!(without.cost(&domain, &FluentState::new()), with.cost(&domain, &FluentState::new()));
    }

    fn test_domain() -> agri_planning_domain::domain::Domain {
        use agri_planning_domain::domain::DomainBuilder;
        use agri_planning_domain::entities::*;
        use agri_planning_domain::ids::*;

        let mut b = DomainBuilder::new();
        let boundary = Polygon(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
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
                        mass_capacity: 1000.0,
                        volume_capacity: 10.0,
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
                mass_capacity: 5000.0,
                access_points: vec![SiloAccessId::new(1)],
            },
            vec![SiloAccessPoint {
                id: SiloAccessId::new(1),
                silo: SiloId::new(1),
                position: Point2D::new(50.0, 50.0),
                mass_capacity: 5000.0,
            }],
        )
        .unwrap();
        b.build().unwrap()
    }
}
