//! The **location namespace** (§3): stable string names derived from numeric ids, bijective and
//! pure. The core never embeds geometry into a name, and every name round-trips back to the id it
//! was built from — this is the property §8 calls out explicitly ("Naming is bijective").

use crate::ids::{FieldAccessId, FieldId, InitLocId, MachineId, SiloAccessId, SiloId};

/// One member of the location namespace: everywhere a `MachineState.location` or a fluent's
/// object-of-kind-location parameter is populated, it is one of these, rendered through
/// [`LocationName::to_name`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LocationName {
    Field(FieldId),
    FieldAccess(FieldAccessId),
    SiloAccess(SiloAccessId),
    MachineInitial(MachineId),
    Street,
}

impl LocationName {
    pub fn to_name(self) -> String {
        match self {
            LocationName::Field(id) => format!("field_{}", id.0),
            LocationName::FieldAccess(id) => format!("field_access_{}", id.0),
            LocationName::SiloAccess(id) => format!("silo_access_{}", id.0),
            LocationName::MachineInitial(id) => format!("init_loc_{}", id.0),
            LocationName::Street => "street".to_string(),
        }
    }

    /// Parses a name previously produced by [`LocationName::to_name`]. Returns `None` for any
    /// string this namespace never emits, rather than panicking: callers that see foreign plan
    /// action parameters need to detect that case (see the decoder's `UnknownObject` error).
    pub fn parse(name: &str) -> Option<LocationName> {
        if name == "street" {
            return Some(LocationName::Street);
        }
        let (prefix, rest) = name.rsplit_once('_')?;
        let raw: u32 = rest.parse().ok()?;
        match prefix {
            "field" => Some(LocationName::Field(FieldId::new(raw))),
            "field_access" => Some(LocationName::FieldAccess(FieldAccessId::new(raw))),
            "silo_access" => Some(LocationName::SiloAccess(SiloAccessId::new(raw))),
            "init_loc" => Some(LocationName::MachineInitial(MachineId::new(raw))),
            _ => None,
        }
    }
}

pub fn field_name(id: FieldId) -> String {
    LocationName::Field(id).to_name()
}

pub fn field_access_name(id: FieldAccessId) -> String {
    LocationName::FieldAccess(id).to_name()
}

pub fn silo_name(id: SiloId) -> String {
    format!("silo_{}", id.0)
}

pub fn silo_access_name(id: SiloAccessId) -> String {
    LocationName::SiloAccess(id).to_name()
}

pub fn machine_name(id: MachineId) -> String {
    format!("machine_{}", id.0)
}

pub fn init_loc_name(id: InitLocId) -> String {
    format!("init_loc_{}", id.0)
}

/// Inverse of [`field_name`]; the identity §8 requires: `field_id_of(field_name(f)) == id(f)`.
pub fn field_id_of(name: &str) -> Option<FieldId> {
    match LocationName::parse(name)? {
        LocationName::Field(id) => Some(id),
        _ => None,
    }
}

pub fn field_access_id_of(name: &str) -> Option<FieldAccessId> {
    match LocationName::parse(name)? {
        LocationName::FieldAccess(id) => Some(id),
        _ => None,
    }
}

pub fn silo_id_of(name: &str) -> Option<SiloId> {
    let raw = name.strip_prefix("silo_")?.parse().ok()?;
    Some(SiloId::new(raw))
}

pub fn silo_access_id_of(name: &str) -> Option<SiloAccessId> {
    match LocationName::parse(name)? {
        LocationName::SiloAccess(id) => Some(id),
        _ => None,
    }
}

pub fn machine_id_of(name: &str) -> Option<MachineId> {
    let raw = name.strip_prefix("machine_")?.parse().ok()?;
    Some(MachineId::new(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_naming_round_trips() {
        let id = FieldId::new(42);
        assert_eq!(field_id_of(&field_name(id)), Some(id));
    }

    #[test]
    fn field_access_naming_round_trips() {
        let id = FieldAccessId::new(7);
        assert_eq!(field_access_id_of(&field_access_name(id)), Some(id));
    }

    #[test]
    fn silo_access_naming_round_trips() {
        let id = SiloAccessId::new(3);
        assert_eq!(silo_access_id_of(&silo_access_name(id)), Some(id));
    }

    #[test]
    fn machine_naming_round_trips() {
        let id = MachineId::new(5);
        assert_eq!(machine_id_of(&machine_name(id)), Some(id));
    }

    #[test]
    fn street_is_not_a_parsed_id() {
        assert!(field_id_of("street").is_none());
        assert_eq!(LocationName::parse("street"), Some(LocationName::Street));
    }

    #[test]
    fn foreign_names_parse_to_none() {
        assert_eq!(LocationName::parse("banana_9"), None);
        assert_eq!(LocationName::parse("field_abc"), None);
    }
}
