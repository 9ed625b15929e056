//! The Domain (§3 "Ownership and lifecycle"): exclusively owns the entity catalog and initial
//! states, built once per problem and immutable thereafter. `DomainBuilder` performs the
//! uniqueness and degeneracy checks described in §3.1 and §7 item 1/4; a successfully built
//! `Domain` is guaranteed free of those defects for the rest of the pipeline.

use crate::defaults;
use crate::entities::{Field, FieldAccessPoint, Machine, MachineAttributes, Silo, SiloAccessPoint};
use crate::error::DomainBuildError;
use crate::fluents::FluentRegistry;
use crate::ids::{FieldId, MachineId, MachineKind, SiloId};
use crate::state::{FieldState, MachineState, PreAssignments, SiloAccessState};
use std::collections::HashMap;

pub struct Domain {
    fields: HashMap<FieldId, Field>,
    field_states: HashMap<FieldId, FieldState>,
    machines: HashMap<MachineId, Machine>,
    machine_states: HashMap<MachineId, MachineState>,
    silos: HashMap<SiloId, Silo>,
    field_access_points: HashMap<crate::ids::FieldAccessId, FieldAccessPoint>,
    silo_access_points: HashMap<crate::ids::SiloAccessId, SiloAccessPoint>,
    silo_access_states: HashMap<crate::ids::SiloAccessId, SiloAccessState>,
    pre_assignments: PreAssignments,
    registry: FluentRegistry,
}

impl Domain {
    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(&id)
    }

    pub fn field_state(&self, id: FieldId) -> Option<&FieldState> {
        self.field_states.get(&id)
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn machine(&self, id: MachineId) -> Option<&Machine> {
        self.machines.get(&id)
    }

    pub fn machine_state(&self, id: MachineId) -> Option<&MachineState> {
        self.machine_states.get(&id)
    }

    pub fn machines(&self) -> impl Iterator<Item = &Machine> {
        self.machines.values()
    }

    pub fn machines_of_kind(&self, kind: MachineKind) -> impl Iterator<Item = &Machine> {
        self.machines.values().filter(move |m| m.kind() == kind)
    }

    pub fn silo(&self, id: SiloId) -> Option<&Silo> {
        self.silos.get(&id)
    }

    pub fn silos(&self) -> impl Iterator<Item = &Silo> {
        self.silos.values()
    }

    pub fn field_access_point(&self, id: crate::ids::FieldAccessId) -> Option<&FieldAccessPoint> {
        self.field_access_points.get(&id)
    }

    pub fn silo_access_point(&self, id: crate::ids::SiloAccessId) -> Option<&SiloAccessPoint> {
        self.silo_access_points.get(&id)
    }

    pub fn silo_access_state(&self, id: crate::ids::SiloAccessId) -> Option<&SiloAccessState> {
        self.silo_access_states.get(&id)
    }

    pub fn pre_assignments(&self) -> &PreAssignments {
        &self.pre_assignments
    }

    pub fn registry(&self) -> &FluentRegistry {
        &self.registry
    }

    pub fn total_initial_yield_mass(&self) -> f64 {
        self.fields.values().map(|f| f.initial_yield_mass()).sum()
    }

    pub fn total_silo_capacity(&self) -> f64 {
        self.silos.values().map(|s| s.mass_capacity).sum()
    }
}

#[derive(Default)]
pub struct DomainBuilder {
    fields: HashMap<FieldId, Field>,
    field_states: HashMap<FieldId, FieldState>,
    machines: HashMap<MachineId, Machine>,
    machine_states: HashMap<MachineId, MachineState>,
    silos: HashMap<SiloId, Silo>,
    field_access_points: HashMap<crate::ids::FieldAccessId, FieldAccessPoint>,
    silo_access_points: HashMap<crate::ids::SiloAccessId, SiloAccessPoint>,
    silo_access_states: HashMap<crate::ids::SiloAccessId, SiloAccessState>,
    pre_assignments: PreAssignments,
}

impl DomainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_field(
        &mut self,
        field: Field,
        state: FieldState,
        access_points: Vec<FieldAccessPoint>,
    ) -> Result<&mut Self, DomainBuildError> {
        if self.fields.contains_key(&field.id) {
            return Err(DomainBuildError::DuplicateFieldId(field.id));
        }
        for ap in access_points {
            self.field_access_points.insert(ap.id, ap);
        }
        self.field_states.insert(field.id, state);
        self.fields.insert(field.id, field);
        Ok(self)
    }

    pub fn register_silo(
        &mut self,
        silo: Silo,
        access_points: Vec<SiloAccessPoint>,
    ) -> Result<&mut Self, DomainBuildError> {
        if self.silos.contains_key(&silo.id) {
            return Err(DomainBuildError::DuplicateSiloId(silo.id));
        }
        if silo.mass_capacity <= 0.0 {
            return Err(DomainBuildError::DegenerateSiloCapacity(silo.id));
        }
        for ap in access_points {
            self.silo_access_states.insert(
                ap.id,
                SiloAccessState {
                    available_capacity: ap.mass_capacity,
                    free: true,
                    timestamp: 0.0,
                    cleared: true,
                },
            );
            self.silo_access_points.insert(ap.id, ap);
        }
        self.silos.insert(silo.id, silo);
        Ok(self)
    }

    /// Registers a harvester or TV, substituting degenerate speeds/unloading-speeds per §3.1 and
    /// failing the build if substitution still leaves a zero value (§7 item 4).
    pub fn register_machine(&mut self, mut machine: Machine, state: MachineState) -> Result<&mut Self, DomainBuildError> {
        if self.machines.contains_key(&machine.id) {
            return Err(DomainBuildError::DuplicateMachineId(machine.id));
        }
        machine.attributes = substitute_attributes(machine.id, machine.attributes)?;
        self.machine_states.insert(machine.id, state);
        self.machines.insert(machine.id, machine);
        Ok(self)
    }

    pub fn with_pre_assignments(&mut self, pre_assignments: PreAssignments) -> &mut Self {
        self.pre_assignments = pre_assignments;
        self
    }

    pub fn build(self) -> Result<Domain, DomainBuildError> {
        if self.fields.is_empty() {
            return Err(DomainBuildError::NoFields);
        }
        if !self.machines.values().any(|m| m.kind() == MachineKind::Harvester) {
            return Err(DomainBuildError::NoHarvester);
        }
        if self.silos.is_empty() {
            return Err(DomainBuildError::NoSilo);
        }
        validate_pre_assignments(&self.pre_assignments, &self.fields, &self.machines)?;

        Ok(Domain {
            fields: self.fields,
            field_states: self.field_states,
            machines: self.machines,
            machine_states: self.machine_states,
            silos: self.silos,
            field_access_points: self.field_access_points,
            silo_access_points: self.silo_access_points,
            silo_access_states: self.silo_access_states,
            pre_assignments: self.pre_assignments,
            registry: FluentRegistry::standard(),
        })
    }
}

fn substitute_attributes(id: MachineId, attrs: MachineAttributes) -> Result<MachineAttributes, DomainBuildError> {
    match attrs {
        MachineAttributes::Harvester {
            bunker,
            mut speeds,
            unloading_speed_mass,
            unloading_speed_volume,
        } => {
            speeds.max_speed_empty =
                defaults::substitute_speed(speeds.max_speed_empty).ok_or(DomainBuildError::DegenerateMachineAttribute(id, "max_speed_empty"))?;
            speeds.max_speed_full = defaults::substitute_speed(speeds.max_speed_full).unwrap_or(speeds.max_speed_empty);
            if bunker.mass_capacity <= 0.0 {
                return Err(DomainBuildError::DegenerateMachineAttribute(id, "bunker_mass_capacity"));
            }
            Ok(MachineAttributes::Harvester {
                bunker,
                speeds,
                unloading_speed_mass: defaults::substitute_harv_unloading_speed_mass(unloading_speed_mass),
                unloading_speed_volume: defaults::substitute_harv_unloading_speed_volume(unloading_speed_volume),
            })
        }
        MachineAttributes::TransportVehicle {
            bunker,
            mut speeds,
            unloading_speed_mass,
            unloading_speed_volume,
        } => {
            speeds.max_speed_empty =
                defaults::substitute_speed(speeds.max_speed_empty).ok_or(DomainBuildError::DegenerateMachineAttribute(id, "max_speed_empty"))?;
            speeds.max_speed_full = defaults::substitute_speed(speeds.max_speed_full).unwrap_or(speeds.max_speed_empty);
            if bunker.mass_capacity <= 0.0 {
                return Err(DomainBuildError::DegenerateMachineAttribute(id, "bunker_mass_capacity"));
            }
            Ok(MachineAttributes::TransportVehicle {
                bunker,
                speeds,
                unloading_speed_mass: defaults::substitute_tv_unloading_speed_mass(unloading_speed_mass),
                unloading_speed_volume: defaults::substitute_tv_unloading_speed_volume(unloading_speed_volume),
            })
        }
        MachineAttributes::Compactor { silo, mass_per_sweep } => Ok(MachineAttributes::Compactor {
            silo,
            mass_per_sweep: defaults::substitute_mass_per_sweep(mass_per_sweep),
        }),
    }
}

fn validate_pre_assignments(
    pre: &PreAssignments,
    fields: &HashMap<FieldId, Field>,
    machines: &HashMap<MachineId, Machine>,
) -> Result<(), DomainBuildError> {
    let mut seen_turns: HashMap<(MachineId, u32), FieldId> = HashMap::new();
    for fa in &pre.fields {
        if !fields.contains_key(&fa.field) {
            return Err(DomainBuildError::UnknownField(fa.field));
        }
        if !machines.contains_key(&fa.harvester) {
            return Err(DomainBuildError::UnknownMachine(fa.harvester));
        }
        if fa.turn != 0 {
            if let Some(&existing) = seen_turns.get(&(fa.harvester, fa.turn)) {
                if existing != fa.field {
                    return Err(DomainBuildError::DuplicateFieldTurn {
                        harvester: fa.harvester,
                        turn: fa.turn,
                        first: existing,
                        second: fa.field,
                    });
                }
            }
            seen_turns.insert((fa.harvester, fa.turn), fa.field);
        }
    }

    let mut tv_harvester: HashMap<MachineId, MachineId> = HashMap::new();
    for tv_pre in &pre.tvs {
        let harvester = tv_pre.harvester();
        if !machines.contains_key(&harvester) {
            return Err(DomainBuildError::UnknownMachine(harvester));
        }
        let tvs: Vec<MachineId> = match tv_pre {
            crate::state::TvPreAssignment::Ordered { tvs, .. } => tvs.clone(),
            crate::state::TvPreAssignment::Unordered { tv, .. } => vec![*tv],
        };
        for tv in tvs {
            if !machines.contains_key(&tv) {
                return Err(DomainBuildError::UnknownMachine(tv));
            }
            if let Some(&existing) = tv_harvester.get(&tv) {
                if existing != harvester {
                    return Err(DomainBuildError::TvBoundToMultipleHarvesters {
                        tv,
                        first: existing,
                        second: harvester,
                    });
                }
            }
            tv_harvester.insert(tv, harvester);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::*;
    use crate::ids::*;
    use crate::state::*;

    fn point(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    fn simple_field(id: u32) -> (Field, FieldState, Vec<FieldAccessPoint>) {
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
    fn builds_a_minimal_valid_domain() {
        let mut b = DomainBuilder::new();
        let (f, fs, aps) = simple_field(1);
        b.register_field(f, fs, aps).unwrap();
        let (h, hs) = harvester(1);
        b.register_machine(h, hs).unwrap();
        let (s, saps) = silo(1);
        b.register_silo(s, saps).unwrap();
        let domain = b.build().unwrap();
        assert_eq!(domain.fields().count(), 1);
        assert_eq!(domain.total_initial_yield_mass(), 10_000.0);
    }

    #[test]
    fn empty_field_set_is_a_build_error() {
        let mut b = DomainBuilder::new();
        let (h, hs) = harvester(1);
        b.register_machine(h, hs).unwrap();
        let (s, saps) = silo(1);
        b.register_silo(s, saps).unwrap();
        assert_eq!(b.build().unwrap_err(), DomainBuildError::NoFields);
    }

    #[test]
    fn duplicate_field_id_is_rejected() {
        let mut b = DomainBuilder::new();
        let (f1, fs1, aps1) = simple_field(1);
        b.register_field(f1, fs1, aps1).unwrap();
        let (f2, fs2, aps2) = simple_field(1);
        let err = b.register_field(f2, fs2, aps2).unwrap_err();
        assert_eq!(err, DomainBuildError::DuplicateFieldId(FieldId::new(1)));
    }

    #[test]
    fn zero_unloading_speed_is_substituted_not_rejected() {
        let mut b = DomainBuilder::new();
        let (mut h, hs) = harvester(2);
        if let MachineAttributes::Harvester { unloading_speed_mass, .. } = &mut h.attributes {
            *unloading_speed_mass = 0.0;
        }
        b.register_machine(h, hs).unwrap();
        let machine = b.machines.get(&MachineId::new(2)).unwrap();
        if let MachineAttributes::Harvester { unloading_speed_mass, .. } = machine.attributes {
            assert_eq!(unloading_speed_mass, *defaults::DEF_HARV_UNLOADING_SPEED_MASS.get());
        } else {
            panic!("expected harvester attributes");
        }
    }

    #[test]
    fn zero_speed_is_a_build_error_when_substitution_fails() {
        let mut b = DomainBuilder::new();
        let (mut h, hs) = harvester(3);
        if let MachineAttributes::Harvester { speeds, .. } = &mut h.attributes {
            speeds.max_speed_empty = 0.0;
        }
        let err = b.register_machine(h, hs).unwrap_err();
        assert_eq!(err, DomainBuildError::DegenerateMachineAttribute(MachineId::new(3), "max_speed_empty"));
    }

    #[test]
    fn duplicate_field_turn_for_same_harvester_is_rejected() {
        let mut b = DomainBuilder::new();
        for id in [1, 2] {
            let (f, fs, aps) = simple_field(id);
            b.register_field(f, fs, aps).unwrap();
        }
        let (h, hs) = harvester(1);
        b.register_machine(h, hs).unwrap();
        let (s, saps) = silo(1);
        b.register_silo(s, saps).unwrap();
        b.with_pre_assignments(PreAssignments {
            fields: vec![
                FieldPreAssignment {
                    field: FieldId::new(1),
                    harvester: MachineId::new(1),
                    turn: 1,
                },
                FieldPreAssignment {
                    field: FieldId::new(2),
                    harvester: MachineId::new(1),
                    turn: 1,
                },
            ],
            tvs: vec![],
        });
        assert!(matches!(b.build(), Err(DomainBuildError::DuplicateFieldTurn { .. })));
    }
}
