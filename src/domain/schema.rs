//! Entity schema
//!
//! Metadata describing the six levels of the territorial hierarchy: their
//! table names, ordered field lists and id widths. Serializers and exporters
//! derive all field knowledge from here.

use crate::domain::{GeodataError, Result};
use std::fmt;
use std::str::FromStr;

/// One level of the administrative hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    State,
    Mesoregion,
    Microregion,
    Municipality,
    District,
    Subdistrict,
}

impl EntityKind {
    /// All entity kinds, root to leaf
    pub const ALL: [EntityKind; 6] = [
        EntityKind::State,
        EntityKind::Mesoregion,
        EntityKind::Microregion,
        EntityKind::Municipality,
        EntityKind::District,
        EntityKind::Subdistrict,
    ];

    /// Table name used by every output format
    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::State => "states",
            EntityKind::Mesoregion => "mesoregions",
            EntityKind::Microregion => "microregions",
            EntityKind::Municipality => "municipalities",
            EntityKind::District => "districts",
            EntityKind::Subdistrict => "subdistricts",
        }
    }

    /// Singular key, the prefix of entity-qualified field names
    pub fn key(&self) -> &'static str {
        match self {
            EntityKind::State => "state",
            EntityKind::Mesoregion => "mesoregion",
            EntityKind::Microregion => "microregion",
            EntityKind::Municipality => "municipality",
            EntityKind::District => "district",
            EntityKind::Subdistrict => "subdistrict",
        }
    }

    /// Name of the column holding a reference to this kind (`state_id`, ...)
    pub fn id_field(&self) -> &'static str {
        match self {
            EntityKind::State => "state_id",
            EntityKind::Mesoregion => "mesoregion_id",
            EntityKind::Microregion => "microregion_id",
            EntityKind::Municipality => "municipality_id",
            EntityKind::District => "district_id",
            EntityKind::Subdistrict => "subdistrict_id",
        }
    }

    /// Name of the flattened column holding this kind's name (`state_name`, ...)
    pub fn name_field(&self) -> &'static str {
        match self {
            EntityKind::State => "state_name",
            EntityKind::Mesoregion => "mesoregion_name",
            EntityKind::Microregion => "microregion_name",
            EntityKind::Municipality => "municipality_name",
            EntityKind::District => "district_name",
            EntityKind::Subdistrict => "subdistrict_name",
        }
    }

    /// Zero-based position in the hierarchy (State = 0)
    pub fn depth(&self) -> usize {
        *self as usize
    }

    /// Immediate ancestor, `None` for the root
    pub fn parent(&self) -> Option<EntityKind> {
        self.depth().checked_sub(1).map(|d| Self::ALL[d])
    }

    /// Ancestor kinds, innermost first
    pub fn ancestors(&self) -> Vec<EntityKind> {
        Self::ALL[..self.depth()].iter().rev().copied().collect()
    }

    /// Ordered field list: id, ancestor ids innermost to outermost, then name
    pub fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::with_capacity(self.depth() + 2);
        fields.push(Field::Id);
        fields.extend(self.ancestors().into_iter().map(Field::AncestorId));
        fields.push(Field::Name);
        fields
    }

    /// Number of digits of ids at this level
    pub fn id_digits(&self) -> u32 {
        match self {
            EntityKind::State => 2,
            EntityKind::Mesoregion => 4,
            EntityKind::Microregion => 5,
            EntityKind::Municipality => 7,
            EntityKind::District => 9,
            EntityKind::Subdistrict => 11,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for EntityKind {
    type Err = GeodataError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .find(|kind| kind.table_name() == s || kind.key() == s)
            .copied()
            .ok_or_else(|| GeodataError::Configuration(format!("Unknown entity type: {s}")))
    }
}

/// A column of an entity table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The entity's own identifier
    Id,
    /// Denormalized reference to an ancestor's id
    AncestorId(EntityKind),
    /// Display name
    Name,
}

impl Field {
    /// Canonical field name
    pub fn name(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::AncestorId(kind) => kind.id_field(),
            Field::Name => "name",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_root_to_leaf() {
        for (depth, kind) in EntityKind::ALL.iter().enumerate() {
            assert_eq!(kind.depth(), depth);
        }
        assert_eq!(EntityKind::State.parent(), None);
        assert_eq!(
            EntityKind::Subdistrict.parent(),
            Some(EntityKind::District)
        );
    }

    #[test]
    fn test_district_fields() {
        let names: Vec<&str> = EntityKind::District
            .fields()
            .iter()
            .map(Field::name)
            .collect();
        assert_eq!(
            names,
            vec![
                "id",
                "municipality_id",
                "microregion_id",
                "mesoregion_id",
                "state_id",
                "name"
            ]
        );
    }

    #[test]
    fn test_state_fields() {
        assert_eq!(EntityKind::State.fields(), vec![Field::Id, Field::Name]);
    }

    #[test]
    fn test_id_digits_grow_with_depth() {
        let digits: Vec<u32> = EntityKind::ALL.iter().map(EntityKind::id_digits).collect();
        assert!(digits.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "municipalities".parse::<EntityKind>().unwrap(),
            EntityKind::Municipality
        );
        assert_eq!("state".parse::<EntityKind>().unwrap(), EntityKind::State);
        assert!(matches!(
            "county".parse::<EntityKind>(),
            Err(GeodataError::Configuration(_))
        ));
    }
}
