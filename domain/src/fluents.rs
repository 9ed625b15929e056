//! The fluent registry (§4.1): for each fluent, its name, return kind, parameter kinds, default
//! value, optional bounds, and "static" flag. This is metadata only — the values themselves live
//! in a `Problem`'s initial state (static fluents) or a planner `State` (everything else); the
//! registry is what the encoder and the action library both consult to avoid re-deriving a
//! fluent's shape at every call site.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum ObjectKind {
    Field,
    FieldAccess,
    Silo,
    SiloAccess,
    Harvester,
    TransportVehicle,
    Compactor,
    Machine,
    Location,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum FluentKind {
    Bool,
    Int,
    Real,
    Object(ObjectKind),
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum FluentDefault {
    Bool(bool),
    Int(i64),
    Real(f64),
    /// An object default is always a sentinel (`no_harvester`, `no_field`, ...); the registry
    /// records only that the default is the sentinel of the given kind, not a specific name,
    /// since the sentinel's name is only known once the Domain registers it as an object.
    SentinelOf(ObjectKind),
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct FluentDef {
    pub name: &'static str,
    pub kind: FluentKind,
    pub param_kinds: Vec<ObjectKind>,
    pub default: FluentDefault,
    pub bounds: Option<(f64, f64)>,
    pub is_static: bool,
}

impl FluentDef {
    pub fn wire_type(&self) -> String {
        match self.kind {
            FluentKind::Bool => "bool".to_string(),
            FluentKind::Int => match self.bounds {
                Some((lb, ub)) => format!("integer[{lb}, {ub}]"),
                None => "integer".to_string(),
            },
            FluentKind::Real => match self.bounds {
                Some((lb, ub)) => format!("real[{lb}, {ub}]"),
                None => "real".to_string(),
            },
            FluentKind::Object(k) => object_kind_type_name(k).to_string(),
        }
    }
}

pub fn object_kind_type_name(kind: ObjectKind) -> &'static str {
    match kind {
        ObjectKind::Field => "field",
        ObjectKind::FieldAccess => "field_access",
        ObjectKind::Silo => "silo",
        ObjectKind::SiloAccess => "silo_access",
        ObjectKind::Harvester => "harvester",
        ObjectKind::TransportVehicle => "tv",
        ObjectKind::Compactor => "compactor",
        ObjectKind::Machine => "machine",
        ObjectKind::Location => "location",
    }
}

/// Registry of every fluent named in §4.1, grouped by the category the spec lists them under.
/// Bounds are left `None` here unconditionally; `numeric_fluent_bounds_option` (§6) fills them in
/// from problem statistics at encode time (`agri-planning-encoder::bounds`), never at registry
/// construction, so the registry itself stays scenario-independent.
pub struct FluentRegistry {
    defs: Vec<FluentDef>,
}

impl FluentRegistry {
    pub fn standard() -> Self {
        use FluentKind::*;
        use ObjectKind::*;

        let mut defs = Vec::new();
        let mut push = |name: &'static str, kind: FluentKind, params: &[ObjectKind], default: FluentDefault, is_static: bool| {
            defs.push(FluentDef {
                name,
                kind,
                param_kinds: params.to_vec(),
                default,
                bounds: None,
                is_static,
            });
        };

        // Per field (§4.1 "Per field").
        push("field_id", Int, &[Field], FluentDefault::Int(0), true);
        push("field_area", Real, &[Field], FluentDefault::Real(0.0), true);
        push("field_total_yield_mass", Real, &[Field], FluentDefault::Real(0.0), true);
        push("field_harvester", Object(Harvester), &[Field], FluentDefault::SentinelOf(Harvester), false);
        push("field_timestamp_assigned", Real, &[Field], FluentDefault::Real(-1.0), false);
        push("field_harvested", Bool, &[Field], FluentDefault::Bool(false), false);
        push("field_planned_harvested", Bool, &[Field], FluentDefault::Bool(false), false);
        push("field_harvested_percentage", Real, &[Field], FluentDefault::Real(0.0), false);
        push("field_reserved_mass", Real, &[Field], FluentDefault::Real(0.0), false);
        push("field_pre_assigned_harvester", Object(Harvester), &[Field], FluentDefault::SentinelOf(Harvester), true);
        push("field_pre_assigned_turn", Int, &[Field], FluentDefault::Int(0), true);

        // Per harvester (§4.1 "Per harvester").
        push("harv_timestamp", Real, &[Harvester], FluentDefault::Real(0.0), false);
        push("harv_free", Bool, &[Harvester], FluentDefault::Bool(true), false);
        push("harv_current_field", Object(Field), &[Harvester], FluentDefault::SentinelOf(Field), false);
        push(
            "harv_current_field_access",
            Object(FieldAccess),
            &[Harvester],
            FluentDefault::SentinelOf(FieldAccess),
            false,
        );
        push("harv_field_turn_counter", Int, &[Harvester], FluentDefault::Int(0), false);
        push("harv_transit_time", Real, &[Harvester], FluentDefault::Real(0.0), false);
        push("harv_waiting_time", Real, &[Harvester], FluentDefault::Real(0.0), false);
        push("harv_pre_assigned_turn_count", Int, &[Harvester], FluentDefault::Int(0), true);
        push("harv_enabled_to_drive", Bool, &[Harvester], FluentDefault::Bool(false), false);

        // Per TV (§4.1 "Per TV").
        push("tv_timestamp", Real, &[TransportVehicle], FluentDefault::Real(0.0), false);
        push("tv_free", Bool, &[TransportVehicle], FluentDefault::Bool(true), false);
        push("tv_bunker_mass", Real, &[TransportVehicle], FluentDefault::Real(0.0), false);
        push("tv_bunker_capacity", Real, &[TransportVehicle], FluentDefault::Real(0.0), true);
        push("tv_current_location", Object(Location), &[TransportVehicle], FluentDefault::SentinelOf(Location), false);
        push("tv_can_load", Bool, &[TransportVehicle], FluentDefault::Bool(true), false);
        push("tv_can_unload", Bool, &[TransportVehicle], FluentDefault::Bool(false), false);
        push("tv_ready_to_unload", Bool, &[TransportVehicle], FluentDefault::Bool(false), false);
        push("tv_ready_to_drive", Bool, &[TransportVehicle], FluentDefault::Bool(true), false);
        push(
            "tv_waiting_to_drive_id",
            Int,
            &[TransportVehicle],
            FluentDefault::Int(-1),
            false,
        );
        push("tv_transit_time", Real, &[TransportVehicle], FluentDefault::Real(0.0), false);
        push("tv_waiting_time", Real, &[TransportVehicle], FluentDefault::Real(0.0), false);
        push("tv_enabled_to_drive", Bool, &[TransportVehicle], FluentDefault::Bool(false), false);
        push(
            "tv_pre_assigned_harvester",
            Object(Harvester),
            &[TransportVehicle],
            FluentDefault::SentinelOf(Harvester),
            true,
        );

        // Per silo / silo-access (§4.1 "Per silo and silo-access").
        push("silo_access_available_capacity", Real, &[SiloAccess], FluentDefault::Real(0.0), false);
        push("silo_access_free", Bool, &[SiloAccess], FluentDefault::Bool(true), false);
        push("silo_access_timestamp", Real, &[SiloAccess], FluentDefault::Real(0.0), false);
        push("silo_access_sweep_duration", Real, &[SiloAccess], FluentDefault::Real(0.0), true);
        push("silo_access_cleared", Bool, &[SiloAccess], FluentDefault::Bool(true), false);

        // Per compactor.
        push("compactor_silo", Object(Silo), &[Compactor], FluentDefault::SentinelOf(Silo), true);
        push("compactor_free", Bool, &[Compactor], FluentDefault::Bool(true), false);
        push("compactor_mass_per_sweep", Real, &[Compactor], FluentDefault::Real(0.0), true);

        // Global (§4.1 "Global").
        push("total_harvested_mass", Real, &[], FluentDefault::Real(0.0), false);
        push("total_mass_in_silos", Real, &[], FluentDefault::Real(0.0), false);
        push("total_mass_reserved_in_silos", Real, &[], FluentDefault::Real(0.0), false);
        push("total_mass_unreserved_in_fields", Real, &[], FluentDefault::Real(0.0), false);
        push("planning_failed", Bool, &[], FluentDefault::Bool(false), true);
        push("tvs_waiting_to_drive_count", Int, &[], FluentDefault::Int(0), false);

        FluentRegistry { defs }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FluentDef> {
        self.defs.iter()
    }

    pub fn get(&self, name: &str) -> Option<&FluentDef> {
        self.defs.iter().find(|d| d.name == name)
    }

    pub fn static_fluents(&self) -> impl Iterator<Item = &FluentDef> {
        self.defs.iter().filter(|d| d.is_static)
    }

    /// Overwrites the bounds of a previously registered fluent; used by
    /// `agri-planning-encoder::bounds` when `numeric_fluent_bounds_option` asks for computed
    /// bounds. Leaving a fluent's bounds `None` must still produce a semantically identical plan
    /// (§4.1), so this is purely additive metadata, never required for correctness.
    pub fn set_bounds(&mut self, name: &str, bounds: (f64, f64)) -> bool {
        if let Some(def) = self.defs.iter_mut().find(|d| d.name == name) {
            def.bounds = Some(bounds);
            true
        } else {
            false
        }
    }
}

impl Default for FluentRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_has_no_duplicate_names() {
        let reg = FluentRegistry::standard();
        let mut names: Vec<&str> = reg.iter().map(|d| d.name).collect();
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), before);
    }

    #[test]
    fn bounds_default_to_unset() {
        let reg = FluentRegistry::standard();
        assert!(reg.get("field_harvested_percentage").unwrap().bounds.is_none());
    }

    #[test]
    fn set_bounds_updates_existing_fluent() {
        let mut reg = FluentRegistry::standard();
        assert!(reg.set_bounds("tv_bunker_mass", (0.0, 12000.0)));
        assert_eq!(reg.get("tv_bunker_mass").unwrap().bounds, Some((0.0, 12000.0)));
        assert!(!reg.set_bounds("no_such_fluent", (0.0, 1.0)));
    }
}
