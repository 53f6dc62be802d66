//! Registration form for a single cat or dog.

use pawtrack_core::{
    Animal, AnimalId, AnimalKind, AnimalPayload, BreedError, DogTraits, NO_MARKINGS,
    RegistrationDetails, Species, lookup_breed,
};

use super::FormErrors;
use crate::registry::Registry;
use crate::services::notify::Notifier;

/// Whether submitting the form creates a record or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(AnimalId),
}

/// Editable registration fields plus the form's kind and target.
///
/// Dog flags exist only when the form is in dog mode. Breed code and label
/// change together through [`select_breed`](Self::select_breed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimalForm {
    kind: AnimalKind,
    mode: FormMode,
    pub details: RegistrationDetails,
    dog: Option<DogTraits>,
}

/// A validated form, ready to be applied to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create {
        kind: AnimalKind,
        payload: AnimalPayload,
    },
    Update {
        kind: AnimalKind,
        id: AnimalId,
        payload: AnimalPayload,
    },
}

impl Submission {
    /// Create or update the record. `None` when an update targets a record
    /// that no longer exists.
    pub fn apply<N: Notifier>(self, registry: &mut Registry<N>) -> Option<Animal> {
        match self {
            Self::Create { kind, payload } => Some(registry.create(kind, payload)),
            Self::Update { kind, id, payload } => registry.update(kind, &id, payload),
        }
    }
}

impl AnimalForm {
    /// Blank form for a new record. Markings start as `"None"`.
    #[must_use]
    pub fn empty(kind: AnimalKind) -> Self {
        Self {
            kind,
            mode: FormMode::Create,
            details: RegistrationDetails {
                markings: NO_MARKINGS.to_string(),
                sterilised: false,
                ..RegistrationDetails::default()
            },
            dog: match kind {
                AnimalKind::Cat => None,
                AnimalKind::Dog => Some(DogTraits::default()),
            },
        }
    }

    /// Form pre-filled from an existing record, including dog flags.
    #[must_use]
    pub fn from_record(record: &Animal) -> Self {
        let dog = match record.species {
            Species::Cat => None,
            Species::Dog(traits) => Some(traits),
        };
        Self {
            kind: record.kind(),
            mode: FormMode::Edit(record.id.clone()),
            details: record.details.clone(),
            dog,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> AnimalKind {
        self.kind
    }

    #[must_use]
    pub const fn mode(&self) -> &FormMode {
        &self.mode
    }

    #[must_use]
    pub const fn dog_traits(&self) -> Option<&DogTraits> {
        self.dog.as_ref()
    }

    /// Dog flags for editing; `None` in cat mode.
    pub const fn dog_traits_mut(&mut self) -> Option<&mut DogTraits> {
        self.dog.as_mut()
    }

    /// Select a breed by code, overwriting the breed label.
    ///
    /// # Errors
    ///
    /// Returns [`BreedError`] if the code is not in this kind's breed table;
    /// the form is left unchanged.
    pub fn select_breed(&mut self, code: &str) -> Result<(), BreedError> {
        let breed = lookup_breed(self.kind, code)?;
        self.details.breed_code = breed.code.to_string();
        self.details.breed = breed.label.to_string();
        Ok(())
    }

    /// Check the fields and build the payload.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrors`] with one message per failing field.
    pub fn validate(&self) -> Result<AnimalPayload, FormErrors> {
        let d = &self.details;
        let mut errors = FormErrors::new();

        errors.require("tag_number", &d.tag_number, "Tag number is required");
        errors.require("last_name", &d.last_name, "Last name is required");
        errors.require("given_name", &d.given_name, "Given name is required");
        errors.require("address_no", &d.address_no, "Address number is required");
        errors.require("street", &d.street, "Street is required");
        errors.require("suburb", &d.suburb, "Suburb is required");
        errors.require("name", &d.name, "Animal name is required");
        errors.require("breed_code", &d.breed_code, "Breed code is required");
        errors.require("breed", &d.breed, "Breed is required");
        errors.require("colour", &d.colour, "Colour is required");
        errors.require("markings", &d.markings, "Markings are required");

        if !d.breed_code.trim().is_empty() {
            match lookup_breed(self.kind, d.breed_code.trim()) {
                Ok(breed) if breed.label != d.breed.trim() => {
                    errors.add("breed", "Breed does not match the selected breed code");
                }
                Ok(_) => {}
                Err(e) => errors.add("breed_code", e.to_string()),
            }
        }

        match (
            d.current_conviction_banned_start_date,
            d.current_conviction_banned_end_date,
        ) {
            (Some(start), Some(end)) if end < start => errors.add(
                "current_conviction_banned_end_date",
                "Ban end date cannot be before the start date",
            ),
            (Some(_), None) => errors.add(
                "current_conviction_banned_end_date",
                "Ban end date is required when a start date is set",
            ),
            (None, Some(_)) => errors.add(
                "current_conviction_banned_start_date",
                "Ban start date is required when an end date is set",
            ),
            _ => {}
        }

        errors.into_result(AnimalPayload {
            details: trimmed(d),
            dangerous: self.dog.map(|t| t.dangerous),
            animal_breeder: self.dog.map(|t| t.animal_breeder),
        })
    }

    /// Validate and pair the payload with the form's create/edit target.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrors`] as for [`validate`](Self::validate).
    pub fn submit(&self) -> Result<Submission, FormErrors> {
        let payload = self.validate()?;
        Ok(match &self.mode {
            FormMode::Create => Submission::Create {
                kind: self.kind,
                payload,
            },
            FormMode::Edit(id) => Submission::Update {
                kind: self.kind,
                id: id.clone(),
                payload,
            },
        })
    }
}

fn trimmed(d: &RegistrationDetails) -> RegistrationDetails {
    let t = |s: &str| s.trim().to_string();
    RegistrationDetails {
        tag_number: t(&d.tag_number),
        na: t(&d.na),
        last_name: t(&d.last_name),
        given_name: t(&d.given_name),
        address_no: t(&d.address_no),
        lot_no: t(&d.lot_no),
        house_no: t(&d.house_no),
        street: t(&d.street),
        suburb: t(&d.suburb),
        name: t(&d.name),
        breed_code: t(&d.breed_code),
        breed: t(&d.breed),
        colour: t(&d.colour),
        markings: t(&d.markings),
        sterilised: d.sterilised,
        next_year_tag_no: t(&d.next_year_tag_no),
        old_tag_no: t(&d.old_tag_no),
        microchip_no: t(&d.microchip_no),
        current_conviction_banned_start_date: d.current_conviction_banned_start_date,
        current_conviction_banned_end_date: d.current_conviction_banned_end_date,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::services::notify::MemoryNotifier;

    fn filled(kind: AnimalKind, breed_code: &str) -> AnimalForm {
        let mut form = AnimalForm::empty(kind);
        form.details.tag_number = "C000001".to_string();
        form.details.last_name = "Smith".to_string();
        form.details.given_name = "Jane".to_string();
        form.details.address_no = "12".to_string();
        form.details.street = "Oak Avenue".to_string();
        form.details.suburb = "Riverside".to_string();
        form.details.name = " Whiskers ".to_string();
        form.details.colour = "Tabby".to_string();
        form.select_breed(breed_code).unwrap();
        form
    }

    #[test]
    fn test_empty_form_defaults() {
        let form = AnimalForm::empty(AnimalKind::Cat);
        assert_eq!(form.details.markings, "None");
        assert!(!form.details.sterilised);
        assert!(form.dog_traits().is_none());
        assert_eq!(form.mode(), &FormMode::Create);
        assert!(AnimalForm::empty(AnimalKind::Dog).dog_traits().is_some());
    }

    #[test]
    fn test_required_field_messages() {
        let errors = AnimalForm::empty(AnimalKind::Cat).validate().unwrap_err();
        assert_eq!(errors.get("tag_number"), Some("Tag number is required"));
        assert_eq!(errors.get("suburb"), Some("Suburb is required"));
        assert_eq!(errors.get("breed_code"), Some("Breed code is required"));
        assert!(errors.get("markings").is_none());
        assert!(errors.get("lot_no").is_none());
    }

    #[test]
    fn test_select_breed_sets_label_and_rejects_foreign_codes() {
        let mut form = AnimalForm::empty(AnimalKind::Cat);
        form.select_breed("SIA").unwrap();
        assert_eq!(form.details.breed, "Siamese");

        assert!(form.select_breed("LAB").is_err());
        assert_eq!(form.details.breed_code, "SIA");
        assert_eq!(form.details.breed, "Siamese");
    }

    #[test]
    fn test_label_edited_out_of_step_is_rejected() {
        let mut form = filled(AnimalKind::Cat, "PER");
        form.details.breed = "Sphynx".to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.get("breed").is_some());
    }

    #[test]
    fn test_cat_payload_has_no_dog_flags() {
        let payload = filled(AnimalKind::Cat, "PER").validate().unwrap();
        assert_eq!(payload.dangerous, None);
        assert_eq!(payload.animal_breeder, None);
        assert_eq!(payload.details.name, "Whiskers");
    }

    #[test]
    fn test_dog_flags_carry_into_payload() {
        let mut form = filled(AnimalKind::Dog, "LAB");
        form.dog_traits_mut().unwrap().dangerous = true;
        let payload = form.validate().unwrap();
        assert_eq!(payload.dangerous, Some(true));
        assert_eq!(payload.animal_breeder, Some(false));
    }

    #[test]
    fn test_ban_dates_must_pair_and_order() {
        let start = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();

        let mut form = filled(AnimalKind::Cat, "PER");
        form.details.current_conviction_banned_start_date = Some(start);
        assert!(
            form.validate()
                .unwrap_err()
                .get("current_conviction_banned_end_date")
                .is_some()
        );

        form.details.current_conviction_banned_end_date = Some(end);
        assert!(form.validate().is_err());

        form.details.current_conviction_banned_end_date = Some(start);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_submit_creates_then_edits() {
        let mut registry = Registry::with_notifier(MemoryNotifier::new());
        let created = filled(AnimalKind::Cat, "PER")
            .submit()
            .unwrap()
            .apply(&mut registry)
            .unwrap();

        let mut form = AnimalForm::from_record(&created);
        assert_eq!(form.mode(), &FormMode::Edit(created.id.clone()));
        form.details.colour = "Black".to_string();

        let submission = form.submit().unwrap();
        assert!(matches!(submission, Submission::Update { .. }));
        let updated = submission.apply(&mut registry).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.details.colour, "Black");
        assert_eq!(registry.cats().len(), 1);
    }
}
