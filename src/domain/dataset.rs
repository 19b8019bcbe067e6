//! Loaded dataset
//!
//! A [`Dataset`] is the fully populated entity tree for one edition. It is
//! built once per export run and only read afterwards.

use super::entities::{District, Entity, Mesoregion, Microregion, Municipality, State, Subdistrict};
use super::ids::Edition;
use super::schema::EntityKind;
use super::{GeodataError, Result};
use std::collections::HashSet;

/// The territorial division tree for one edition
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub edition: Edition,
    pub states: Vec<State>,
}

impl Dataset {
    pub fn new(edition: Edition, states: Vec<State>) -> Self {
        Self { edition, states }
    }

    /// Database name used by formats that label their root element
    pub fn name(&self) -> String {
        format!("dtb_{}", self.edition)
    }

    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.iter()
    }

    pub fn mesoregions(&self) -> impl Iterator<Item = &Mesoregion> {
        self.states().flat_map(|s| s.mesoregions.iter())
    }

    pub fn microregions(&self) -> impl Iterator<Item = &Microregion> {
        self.mesoregions().flat_map(|m| m.microregions.iter())
    }

    pub fn municipalities(&self) -> impl Iterator<Item = &Municipality> {
        self.microregions().flat_map(|m| m.municipalities.iter())
    }

    pub fn districts(&self) -> impl Iterator<Item = &District> {
        self.municipalities().flat_map(|m| m.districts.iter())
    }

    pub fn subdistricts(&self) -> impl Iterator<Item = &Subdistrict> {
        self.districts().flat_map(|d| d.subdistricts.iter())
    }

    /// Every record of one entity kind, in source order
    pub fn entities(&self, kind: EntityKind) -> Vec<&dyn Entity> {
        match kind {
            EntityKind::State => self.states().map(|e| e as &dyn Entity).collect(),
            EntityKind::Mesoregion => self.mesoregions().map(|e| e as &dyn Entity).collect(),
            EntityKind::Microregion => self.microregions().map(|e| e as &dyn Entity).collect(),
            EntityKind::Municipality => {
                self.municipalities().map(|e| e as &dyn Entity).collect()
            }
            EntityKind::District => self.districts().map(|e| e as &dyn Entity).collect(),
            EntityKind::Subdistrict => self.subdistricts().map(|e| e as &dyn Entity).collect(),
        }
    }

    /// Number of records of one entity kind
    pub fn record_count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::State => self.states.len(),
            EntityKind::Mesoregion => self.mesoregions().count(),
            EntityKind::Microregion => self.microregions().count(),
            EntityKind::Municipality => self.municipalities().count(),
            EntityKind::District => self.districts().count(),
            EntityKind::Subdistrict => self.subdistricts().count(),
        }
    }

    /// True when no state was loaded
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Best-effort integrity check of the tree
    ///
    /// Verifies that ids are unique per table and that every record's
    /// denormalized ancestor ids agree with the chain of records it hangs
    /// from.
    ///
    /// # Errors
    ///
    /// Returns [`GeodataError::DataIntegrity`] on the first violation found.
    pub fn validate(&self) -> Result<()> {
        let mut seen: Vec<HashSet<u64>> = vec![HashSet::new(); EntityKind::ALL.len()];
        for state in &self.states {
            validate_node(state, &[], &mut seen)?;
        }
        Ok(())
    }
}

fn validate_node(
    entity: &dyn Entity,
    expected_ancestors: &[u64],
    seen: &mut [HashSet<u64>],
) -> Result<()> {
    let kind = entity.kind();
    if !seen[kind.depth()].insert(entity.id()) {
        return Err(GeodataError::DataIntegrity(format!(
            "Duplicate id {} in table {}",
            entity.id(),
            kind.table_name()
        )));
    }

    let recorded = entity.ancestor_ids();
    if recorded != expected_ancestors {
        return Err(GeodataError::DataIntegrity(format!(
            "{} {} records ancestors {:?} but belongs to {:?}",
            kind.key(),
            entity.id(),
            recorded,
            expected_ancestors
        )));
    }

    let mut child_ancestors = Vec::with_capacity(recorded.len() + 1);
    child_ancestors.push(entity.id());
    child_ancestors.extend_from_slice(&recorded);

    for child in entity.children() {
        validate_node(child, &child_ancestors, seen)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let mut ro = State::new(11, "Rondônia");
        let meso = ro.add_mesoregion(1101, "Madeira-Guaporé");
        let micro = meso.add_microregion(11001, "Porto Velho");
        micro.add_municipality(1100205, "Porto Velho");
        micro.add_municipality(1100106, "Guajará-Mirim");

        let mut ac = State::new(12, "Acre");
        ac.add_mesoregion(1201, "Vale do Juruá");

        Dataset::new(Edition::new(2016).unwrap(), vec![ro, ac])
    }

    #[test]
    fn test_level_iterators_preserve_source_order() {
        let dataset = sample();
        let mesos: Vec<u64> = dataset.mesoregions().map(|m| m.id).collect();
        assert_eq!(mesos, vec![1101, 1201]);
        let munis: Vec<u64> = dataset.municipalities().map(|m| m.id).collect();
        assert_eq!(munis, vec![1100205, 1100106]);
    }

    #[test]
    fn test_record_counts() {
        let dataset = sample();
        assert_eq!(dataset.record_count(EntityKind::State), 2);
        assert_eq!(dataset.record_count(EntityKind::Municipality), 2);
        assert_eq!(dataset.record_count(EntityKind::District), 0);
        assert_eq!(dataset.entities(EntityKind::Mesoregion).len(), 2);
    }

    #[test]
    fn test_name() {
        assert_eq!(sample().name(), "dtb_2016");
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_broken_ancestor() {
        let mut dataset = sample();
        dataset.states[0].mesoregions[0].microregions[0].state_id = 99;
        let err = dataset.validate().unwrap_err();
        assert!(matches!(err, GeodataError::DataIntegrity(_)));
    }

    #[test]
    fn test_validate_duplicate_id() {
        let mut dataset = sample();
        dataset.states[1].id = 11;
        dataset.states[1].mesoregions[0].state_id = 11;
        let err = dataset.validate().unwrap_err();
        assert!(err.to_string().contains("Duplicate id 11"));
    }
}
