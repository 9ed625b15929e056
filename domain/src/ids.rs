//! Newtype identifiers for every entity kind in §3. Kept as thin `u32` wrappers (teacher's style
//! in `model/src/bounds/var_bound.rs`: a dense index type cheap enough to use as a map key or a
//! `Vec` index) rather than `String`s; the location namespace (`naming.rs`) is the only place ids
//! are turned into the stable strings the rest of the system sees.

use std::fmt;

macro_rules! id_type {
    ($name:ident) => {
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, serde::Serialize, serde::Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            pub fn new(raw: u32) -> Self {
                $name(raw)
            }

            pub fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(FieldId);
id_type!(FieldAccessId);
id_type!(SiloId);
id_type!(SiloAccessId);
id_type!(MachineId);
id_type!(InitLocId);

/// Discriminates the three machine roles named in §3; kept distinct from [`MachineId`] so a
/// catalog lookup never has to guess which sub-table a bare id belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub enum MachineKind {
    Harvester,
    TransportVehicle,
    Compactor,
}

impl fmt::Display for MachineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MachineKind::Harvester => "harvester",
            MachineKind::TransportVehicle => "tv",
            MachineKind::Compactor => "compactor",
        };
        write!(f, "{s}")
    }
}
