//! Entity catalog types (§3, supplemented by §3.1). Geometry is carried opaquely: the core never
//! interprets a boundary or reference line beyond summing an area and forwarding the rest to the
//! (out-of-scope) route planner and visualiser.

use crate::ids::{FieldAccessId, FieldId, InitLocId, MachineId, SiloAccessId, SiloId};
use crate::naming::{self};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Point2D { x, y }
    }

    pub fn distance_to(self, other: Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A closed polygon, outer-boundary-only shoelace area. Used for both the field's outer boundary
/// and a subfield's inner (headland-trimmed) boundary.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Polygon(pub Vec<Point2D>);

impl Polygon {
    /// Shoelace formula; callers are responsible for passing a simple (non-self-intersecting)
    /// polygon, same assumption the (out-of-scope) geometry producer already makes.
    pub fn area(&self) -> f64 {
        if self.0.len() < 3 {
            return 0.0;
        }
        let mut acc = 0.0;
        for i in 0..self.0.len() {
            let a = self.0[i];
            let b = self.0[(i + 1) % self.0.len()];
            acc += a.x * b.y - b.x * a.y;
        }
        (acc / 2.0).abs()
    }
}

/// §3.1: outer boundary plus a headland-trimmed inner boundary, and reference lines carried
/// opaquely for the (out-of-scope) route planner.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Subfield {
    pub outer_boundary: Polygon,
    pub inner_boundary: Polygon,
    pub reference_lines: Vec<Vec<Point2D>>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct FieldAccessPoint {
    pub id: FieldAccessId,
    pub field: FieldId,
    pub position: Point2D,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    pub subfield: Subfield,
    pub access_points: Vec<FieldAccessId>,
    /// Mass-per-area applied to `area()` to derive the initial unharvested yield; set from the
    /// scenario's `FieldState.avg_mass_per_area_unit` at construction time.
    pub avg_mass_per_area: f64,
}

impl Field {
    pub fn area(&self) -> f64 {
        self.subfield.outer_boundary.area()
    }

    /// Derived initial unharvested yield mass (§3 "derived: ... initial unharvested yield mass").
    pub fn initial_yield_mass(&self) -> f64 {
        self.area() * self.avg_mass_per_area
    }

    pub fn name(&self) -> String {
        naming::field_name(self.id)
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SiloAccessPoint {
    pub id: SiloAccessId,
    pub silo: SiloId,
    pub position: Point2D,
    pub mass_capacity: f64,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Silo {
    pub id: SiloId,
    pub boundary: Polygon,
    pub mass_capacity: f64,
    pub access_points: Vec<SiloAccessId>,
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MachineGeometry {
    pub width: f64,
    pub length: f64,
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MachineSpeeds {
    pub max_speed_empty: f64,
    pub max_speed_full: f64,
    pub working_speed: f64,
}

impl MachineSpeeds {
    /// §4.2 `drive_to_silo`: "speed is linearly interpolated from empty-speed to full-speed by
    /// bunker filling ratio".
    pub fn interpolated(&self, filling_ratio: f64) -> f64 {
        let r = filling_ratio.clamp(0.0, 1.0);
        self.max_speed_empty + (self.max_speed_full - self.max_speed_empty) * r
    }
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct BunkerCapacity {
    pub mass_capacity: f64,
    pub volume_capacity: f64,
}

/// Attributes specific to harvesters and transport vehicles; compactors carry
/// [`CompactorAttributes`] instead. Kept as an enum rather than all-optional fields on one struct
/// so a harvester can never be asked for a `mass_per_sweep` it doesn't have.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum MachineAttributes {
    Harvester {
        bunker: BunkerCapacity,
        speeds: MachineSpeeds,
        unloading_speed_mass: f64,
        unloading_speed_volume: f64,
    },
    TransportVehicle {
        bunker: BunkerCapacity,
        speeds: MachineSpeeds,
        unloading_speed_mass: f64,
        unloading_speed_volume: f64,
    },
    Compactor {
        silo: SiloId,
        mass_per_sweep: f64,
    },
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Machine {
    pub id: MachineId,
    pub geometry: Option<MachineGeometry>,
    pub attributes: MachineAttributes,
    /// Every machine starts somewhere; this is the location name used before it ever moves, and
    /// the object registered under `no_value`-style sentinels elsewhere does not apply here.
    pub initial_location: InitLocId,
}

impl Machine {
    pub fn kind(&self) -> crate::ids::MachineKind {
        match self.attributes {
            MachineAttributes::Harvester { .. } => crate::ids::MachineKind::Harvester,
            MachineAttributes::TransportVehicle { .. } => crate::ids::MachineKind::TransportVehicle,
            MachineAttributes::Compactor { .. } => crate::ids::MachineKind::Compactor,
        }
    }

    pub fn name(&self) -> String {
        naming::machine_name(self.id)
    }

    pub fn bunker(&self) -> Option<BunkerCapacity> {
        match self.attributes {
            MachineAttributes::Harvester { bunker, .. } | MachineAttributes::TransportVehicle { bunker, .. } => {
                Some(bunker)
            }
            MachineAttributes::Compactor { .. } => None,
        }
    }
}
