//! Animal registry: the in-memory cat and dog collections.
//!
//! The registry is the single owner of both collections. Records are never
//! persisted or reconciled with a server; [`Registry::seeded`] regenerates
//! demo data on every start.
//!
//! Every successful create/update/delete reports a confirmation through the
//! registry's [`Notifier`]. Updates and deletes that target an unknown id
//! return `None` without notifying.

mod collection;
mod ids;
pub mod seed;

pub use collection::AnimalCollection;
pub use ids::IdGenerator;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use pawtrack_core::{Animal, AnimalId, AnimalKind, AnimalPayload};

use crate::services::notify::{Notifier, TracingNotifier};

/// The cat and dog collections plus identifier state.
#[derive(Debug)]
pub struct Registry<N = TracingNotifier> {
    cats: AnimalCollection,
    dogs: AnimalCollection,
    ids: IdGenerator,
    notifier: N,
    revision: u64,
}

impl Registry<TracingNotifier> {
    /// Empty registry that logs confirmations.
    #[must_use]
    pub fn new() -> Self {
        Self::with_notifier(TracingNotifier)
    }
}

impl Default for Registry<TracingNotifier> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Notifier> Registry<N> {
    /// Empty registry reporting to `notifier`.
    pub fn with_notifier(notifier: N) -> Self {
        Self {
            cats: AnimalCollection::new(AnimalKind::Cat),
            dogs: AnimalCollection::new(AnimalKind::Dog),
            ids: IdGenerator::new(),
            notifier,
            revision: 0,
        }
    }

    /// Registry filled with [`seed::SEED_COUNT`] demo records of each kind.
    ///
    /// The same `seed` yields the same records; `None` draws from entropy.
    pub fn seeded(notifier: N, seed: Option<u64>) -> Self {
        let now = Utc::now();
        let mut rng = seed::rng_from(seed);
        let cats = seed::generate(AnimalKind::Cat, seed::SEED_COUNT, &mut rng, now);
        let dogs = seed::generate(AnimalKind::Dog, seed::SEED_COUNT, &mut rng, now);
        info!(cats = cats.len(), dogs = dogs.len(), seeded = seed.is_some(), "Generated demo registrations");
        Self::from_records(notifier, cats, dogs)
    }

    /// Registry holding the given records.
    pub fn from_records(notifier: N, cats: Vec<Animal>, dogs: Vec<Animal>) -> Self {
        Self {
            cats: AnimalCollection::from_records(AnimalKind::Cat, cats),
            dogs: AnimalCollection::from_records(AnimalKind::Dog, dogs),
            ids: IdGenerator::new(),
            notifier,
            revision: 0,
        }
    }

    #[must_use]
    pub const fn collection(&self, kind: AnimalKind) -> &AnimalCollection {
        match kind {
            AnimalKind::Cat => &self.cats,
            AnimalKind::Dog => &self.dogs,
        }
    }

    const fn collection_mut(&mut self, kind: AnimalKind) -> &mut AnimalCollection {
        match kind {
            AnimalKind::Cat => &mut self.cats,
            AnimalKind::Dog => &mut self.dogs,
        }
    }

    #[must_use]
    pub fn cats(&self) -> &[Animal] {
        self.cats.as_slice()
    }

    #[must_use]
    pub fn dogs(&self) -> &[Animal] {
        self.dogs.as_slice()
    }

    /// Shared handle to the current records of `kind`.
    #[must_use]
    pub fn snapshot(&self, kind: AnimalKind) -> Arc<Vec<Animal>> {
        self.collection(kind).snapshot()
    }

    /// Cats followed by dogs.
    #[must_use]
    pub fn all(&self) -> Vec<Animal> {
        self.cats
            .as_slice()
            .iter()
            .chain(self.dogs.as_slice())
            .cloned()
            .collect()
    }

    /// Look up a record in either collection.
    #[must_use]
    pub fn find(&self, id: &AnimalId) -> Option<&Animal> {
        self.cats.get(id).or_else(|| self.dogs.get(id))
    }

    /// Incremented on every successful mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Register a new animal at the front of its collection.
    ///
    /// Dog flags missing from the payload are stored as `false`; cat
    /// records never carry them.
    #[instrument(skip(self, payload), fields(tag = %payload.details.tag_number))]
    pub fn create(&mut self, kind: AnimalKind, payload: AnimalPayload) -> Animal {
        let now = Utc::now();
        let mut id = self.ids.next(kind, now);
        while self.collection(kind).contains(&id) {
            id = self.ids.next(kind, now);
        }

        let record = Animal {
            id,
            species: payload.species_for(kind),
            details: payload.details,
            created_at: now,
            updated_at: now,
        };
        self.collection_mut(kind).prepend(record.clone());
        self.revision += 1;

        info!(id = %record.id, kind = %kind, "Registered animal");
        self.notifier
            .success(&format!("New {} registered successfully!", kind.as_str()));
        record
    }

    /// Merge `payload` into the record with `id`.
    ///
    /// The id, kind and `created_at` are kept. `updated_at` becomes the
    /// current time, or stays put if the clock reads earlier than it.
    /// Returns `None` when `kind` has no record with that id.
    #[instrument(skip(self, payload))]
    pub fn update(
        &mut self,
        kind: AnimalKind,
        id: &AnimalId,
        payload: AnimalPayload,
    ) -> Option<Animal> {
        let now = Utc::now();
        let updated = self
            .collection_mut(kind)
            .replace_with(id, |existing| merged(existing, payload, now));

        let Some(updated) = updated else {
            debug!(id = %id, kind = %kind, "Update ignored, no such record");
            return None;
        };
        self.revision += 1;

        info!(id = %id, kind = %kind, "Updated animal");
        self.notifier
            .success(&format!("{} updated successfully!", kind.label()));
        Some(updated)
    }

    /// Remove the record with `id` from the `kind` collection.
    ///
    /// Deleting an unknown id is a no-op returning `None`.
    #[instrument(skip(self))]
    pub fn delete(&mut self, kind: AnimalKind, id: &AnimalId) -> Option<Animal> {
        let Some(removed) = self.collection_mut(kind).remove(id) else {
            debug!(id = %id, kind = %kind, "Delete ignored, no such record");
            return None;
        };
        self.revision += 1;

        info!(id = %id, kind = %kind, "Deleted animal");
        self.notifier
            .success(&format!("{} deleted successfully!", kind.label()));
        Some(removed)
    }

    /// Remove `id` from whichever collection holds it (cats are checked
    /// first).
    pub fn delete_any(&mut self, id: &AnimalId) -> Option<Animal> {
        let kind = if self.cats.contains(id) {
            AnimalKind::Cat
        } else {
            AnimalKind::Dog
        };
        self.delete(kind, id)
    }
}

fn merged(existing: &Animal, payload: AnimalPayload, now: DateTime<Utc>) -> Animal {
    Animal {
        id: existing.id.clone(),
        species: payload.merge_species(existing.species),
        details: payload.details,
        created_at: existing.created_at,
        updated_at: now.max(existing.updated_at),
    }
}
