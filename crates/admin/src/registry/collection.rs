//! Copy-on-write record list for one animal kind.

use std::sync::Arc;

use pawtrack_core::{Animal, AnimalId, AnimalKind};

/// Ordered records of a single kind, newest first.
///
/// Readers take cheap [`snapshot`](Self::snapshot)s. A mutation never
/// alters a snapshot that is still held; it copies the list first
/// (`Arc::make_mut`) and publishes the result as the new current value.
#[derive(Debug, Clone)]
pub struct AnimalCollection {
    kind: AnimalKind,
    records: Arc<Vec<Animal>>,
}

impl AnimalCollection {
    #[must_use]
    pub fn new(kind: AnimalKind) -> Self {
        Self {
            kind,
            records: Arc::new(Vec::new()),
        }
    }

    /// Build a collection from existing records. Records of the wrong kind
    /// or with a duplicate id are dropped.
    #[must_use]
    pub fn from_records(kind: AnimalKind, records: Vec<Animal>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let records = records
            .into_iter()
            .filter(|r| r.kind() == kind && seen.insert(r.id.clone()))
            .collect();
        Self {
            kind,
            records: Arc::new(records),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> AnimalKind {
        self.kind
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Animal] {
        &self.records
    }

    /// Shared handle to the current list.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<Animal>> {
        Arc::clone(&self.records)
    }

    #[must_use]
    pub fn get(&self, id: &AnimalId) -> Option<&Animal> {
        self.records.iter().find(|r| &r.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &AnimalId) -> bool {
        self.get(id).is_some()
    }

    /// Insert at the front. The caller guarantees the id is unused.
    pub(crate) fn prepend(&mut self, record: Animal) {
        Arc::make_mut(&mut self.records).insert(0, record);
    }

    /// Replace the record with `id` by `f(existing)`. Returns the new record,
    /// or `None` when no record has that id.
    pub(crate) fn replace_with<F>(&mut self, id: &AnimalId, f: F) -> Option<Animal>
    where
        F: FnOnce(&Animal) -> Animal,
    {
        let index = self.records.iter().position(|r| &r.id == id)?;
        let records = Arc::make_mut(&mut self.records);
        let slot = records.get_mut(index)?;
        *slot = f(slot);
        Some(slot.clone())
    }

    /// Remove and return the record with `id`.
    pub(crate) fn remove(&mut self, id: &AnimalId) -> Option<Animal> {
        let index = self.records.iter().position(|r| &r.id == id)?;
        Some(Arc::make_mut(&mut self.records).remove(index))
    }
}
