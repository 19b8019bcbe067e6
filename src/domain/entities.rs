//! Territorial entity models
//!
//! One struct per level of the hierarchy. Each record carries the ids of all
//! of its ancestors (not only its parent) so that flattened and tabular
//! outputs never need to join, and owns the list of its children in source
//! order.

use super::schema::EntityKind;

/// Common read-only view over every entity level
pub trait Entity {
    /// Hierarchy level of this record
    fn kind(&self) -> EntityKind;

    /// Identifier, unique within the entity's table
    fn id(&self) -> u64;

    /// Display name
    fn name(&self) -> &str;

    /// Denormalized ancestor ids, innermost first (same order as
    /// [`EntityKind::ancestors`])
    fn ancestor_ids(&self) -> Vec<u64>;

    /// Direct children in source order
    fn children(&self) -> Vec<&dyn Entity>;
}

/// Federative unit (top-level region)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct State {
    pub id: u64,
    pub name: String,
    pub mesoregions: Vec<Mesoregion>,
}

/// Mesoregion, grouping microregions inside a state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesoregion {
    pub id: u64,
    pub state_id: u64,
    pub name: String,
    pub microregions: Vec<Microregion>,
}

/// Microregion, grouping municipalities inside a mesoregion
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Microregion {
    pub id: u64,
    pub mesoregion_id: u64,
    pub state_id: u64,
    pub name: String,
    pub municipalities: Vec<Municipality>,
}

/// Municipality
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Municipality {
    pub id: u64,
    pub microregion_id: u64,
    pub mesoregion_id: u64,
    pub state_id: u64,
    pub name: String,
    pub districts: Vec<District>,
}

/// District of a municipality
#[derive(Debug, Clone, PartialEq, Default)]
pub struct District {
    pub id: u64,
    pub municipality_id: u64,
    pub microregion_id: u64,
    pub mesoregion_id: u64,
    pub state_id: u64,
    pub name: String,
    pub subdistricts: Vec<Subdistrict>,
}

/// Subdistrict of a district
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subdistrict {
    pub id: u64,
    pub district_id: u64,
    pub municipality_id: u64,
    pub microregion_id: u64,
    pub mesoregion_id: u64,
    pub state_id: u64,
    pub name: String,
}

impl State {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            mesoregions: Vec::new(),
        }
    }

    /// Appends a mesoregion, deriving its ancestor keys from this state
    pub fn add_mesoregion(&mut self, id: u64, name: impl Into<String>) -> &mut Mesoregion {
        self.mesoregions.push(Mesoregion {
            id,
            state_id: self.id,
            name: name.into(),
            microregions: Vec::new(),
        });
        let last = self.mesoregions.len() - 1;
        &mut self.mesoregions[last]
    }
}

impl Mesoregion {
    /// Appends a microregion, deriving its ancestor keys from this mesoregion
    pub fn add_microregion(&mut self, id: u64, name: impl Into<String>) -> &mut Microregion {
        self.microregions.push(Microregion {
            id,
            mesoregion_id: self.id,
            state_id: self.state_id,
            name: name.into(),
            municipalities: Vec::new(),
        });
        let last = self.microregions.len() - 1;
        &mut self.microregions[last]
    }
}

impl Microregion {
    /// Appends a municipality, deriving its ancestor keys from this microregion
    pub fn add_municipality(&mut self, id: u64, name: impl Into<String>) -> &mut Municipality {
        self.municipalities.push(Municipality {
            id,
            microregion_id: self.id,
            mesoregion_id: self.mesoregion_id,
            state_id: self.state_id,
            name: name.into(),
            districts: Vec::new(),
        });
        let last = self.municipalities.len() - 1;
        &mut self.municipalities[last]
    }
}

impl Municipality {
    /// Appends a district, deriving its ancestor keys from this municipality
    pub fn add_district(&mut self, id: u64, name: impl Into<String>) -> &mut District {
        self.districts.push(District {
            id,
            municipality_id: self.id,
            microregion_id: self.microregion_id,
            mesoregion_id: self.mesoregion_id,
            state_id: self.state_id,
            name: name.into(),
            subdistricts: Vec::new(),
        });
        let last = self.districts.len() - 1;
        &mut self.districts[last]
    }
}

impl District {
    /// Appends a subdistrict, deriving its ancestor keys from this district
    pub fn add_subdistrict(&mut self, id: u64, name: impl Into<String>) -> &mut Subdistrict {
        self.subdistricts.push(Subdistrict {
            id,
            district_id: self.id,
            municipality_id: self.municipality_id,
            microregion_id: self.microregion_id,
            mesoregion_id: self.mesoregion_id,
            state_id: self.state_id,
            name: name.into(),
        });
        let last = self.subdistricts.len() - 1;
        &mut self.subdistricts[last]
    }
}

fn as_entities<T: Entity>(items: &[T]) -> Vec<&dyn Entity> {
    items.iter().map(|item| item as &dyn Entity).collect()
}

impl Entity for State {
    fn kind(&self) -> EntityKind {
        EntityKind::State
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn ancestor_ids(&self) -> Vec<u64> {
        Vec::new()
    }

    fn children(&self) -> Vec<&dyn Entity> {
        as_entities(&self.mesoregions)
    }
}

impl Entity for Mesoregion {
    fn kind(&self) -> EntityKind {
        EntityKind::Mesoregion
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn ancestor_ids(&self) -> Vec<u64> {
        vec![self.state_id]
    }

    fn children(&self) -> Vec<&dyn Entity> {
        as_entities(&self.microregions)
    }
}

impl Entity for Microregion {
    fn kind(&self) -> EntityKind {
        EntityKind::Microregion
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn ancestor_ids(&self) -> Vec<u64> {
        vec![self.mesoregion_id, self.state_id]
    }

    fn children(&self) -> Vec<&dyn Entity> {
        as_entities(&self.municipalities)
    }
}

impl Entity for Municipality {
    fn kind(&self) -> EntityKind {
        EntityKind::Municipality
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn ancestor_ids(&self) -> Vec<u64> {
        vec![self.microregion_id, self.mesoregion_id, self.state_id]
    }

    fn children(&self) -> Vec<&dyn Entity> {
        as_entities(&self.districts)
    }
}

impl Entity for District {
    fn kind(&self) -> EntityKind {
        EntityKind::District
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn ancestor_ids(&self) -> Vec<u64> {
        vec![
            self.municipality_id,
            self.microregion_id,
            self.mesoregion_id,
            self.state_id,
        ]
    }

    fn children(&self) -> Vec<&dyn Entity> {
        as_entities(&self.subdistricts)
    }
}

impl Entity for Subdistrict {
    fn kind(&self) -> EntityKind {
        EntityKind::Subdistrict
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn ancestor_ids(&self) -> Vec<u64> {
        vec![
            self.district_id,
            self.municipality_id,
            self.microregion_id,
            self.mesoregion_id,
            self.state_id,
        ]
    }

    fn children(&self) -> Vec<&dyn Entity> {
        Vec::new()
    }
}
