//! Animal registration records.
//!
//! A registration is either a cat or a dog. Both share
//! [`RegistrationDetails`]; dogs additionally carry [`DogTraits`]. The kind
//! is a tagged variant ([`Species`]) so every dog-only accessor has to match
//! on it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::AnimalId;

/// The two kinds of animal that can be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimalKind {
    Cat,
    Dog,
}

impl AnimalKind {
    /// Lowercase wire name, also used as the identifier prefix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cat => "cat",
            Self::Dog => "dog",
        }
    }

    /// Capitalised name for user-facing messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cat => "Cat",
            Self::Dog => "Dog",
        }
    }

    /// Prefix letter used on physical tag numbers (`C000001`, `D000001`).
    #[must_use]
    pub const fn tag_prefix(self) -> char {
        match self {
            Self::Cat => 'C',
            Self::Dog => 'D',
        }
    }
}

impl std::fmt::Display for AnimalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AnimalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cat" | "cats" => Ok(Self::Cat),
            "dog" | "dogs" => Ok(Self::Dog),
            _ => Err(format!("invalid animal kind: {s}")),
        }
    }
}

/// Dog-only registration flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DogTraits {
    /// Declared dangerous.
    pub dangerous: bool,
    /// Owner is a registered animal breeder.
    pub animal_breeder: bool,
}

/// Kind discriminator plus variant-specific data.
///
/// Serialized as a `type` tag (`"cat"` / `"dog"`) with the dog fields
/// flattened beside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Species {
    Cat,
    Dog(DogTraits),
}

impl Species {
    /// The kind tag of this variant.
    #[must_use]
    pub const fn kind(&self) -> AnimalKind {
        match self {
            Self::Cat => AnimalKind::Cat,
            Self::Dog(_) => AnimalKind::Dog,
        }
    }

    /// Default variant data for a kind (dog flags all `false`).
    #[must_use]
    pub fn default_for(kind: AnimalKind) -> Self {
        match kind {
            AnimalKind::Cat => Self::Cat,
            AnimalKind::Dog => Self::Dog(DogTraits::default()),
        }
    }
}

/// Fields shared by cat and dog registrations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDetails {
    /// Number printed on the physical registration tag.
    pub tag_number: String,
    /// Free-text "N/A" marker carried over from the paper register.
    #[serde(default)]
    pub na: String,
    /// Owner family name.
    pub last_name: String,
    /// Owner given name.
    pub given_name: String,
    /// Street number of the owner's address.
    pub address_no: String,
    #[serde(default)]
    pub lot_no: String,
    #[serde(default)]
    pub house_no: String,
    pub street: String,
    pub suburb: String,
    /// Animal name.
    pub name: String,
    /// Breed code from the kind's breed table.
    pub breed_code: String,
    /// Breed label paired with `breed_code`.
    pub breed: String,
    pub colour: String,
    pub markings: String,
    pub sterilised: bool,
    #[serde(default)]
    pub next_year_tag_no: String,
    #[serde(default)]
    pub old_tag_no: String,
    #[serde(default)]
    pub microchip_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_conviction_banned_start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_conviction_banned_end_date: Option<DateTime<Utc>>,
}

impl RegistrationDetails {
    /// The conviction ban, if both of its dates are recorded.
    #[must_use]
    pub fn conviction_ban(&self) -> Option<ConvictionBan> {
        match (
            self.current_conviction_banned_start_date,
            self.current_conviction_banned_end_date,
        ) {
            (Some(start), Some(end)) => Some(ConvictionBan { start, end }),
            _ => None,
        }
    }

    /// Owner name as shown in the table ("Given Last").
    #[must_use]
    pub fn owner_display_name(&self) -> String {
        format!("{} {}", self.given_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A time-bounded restriction recorded against an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvictionBan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ConvictionBan {
    /// Whether `at` falls inside the ban period (inclusive on both ends).
    #[must_use]
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// A registered animal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    /// Internal record identifier (distinct from the tag number).
    pub id: AnimalId,
    #[serde(flatten)]
    pub species: Species,
    #[serde(flatten)]
    pub details: RegistrationDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Animal {
    #[must_use]
    pub const fn kind(&self) -> AnimalKind {
        self.species.kind()
    }

    /// Dog flags, or `None` for cats.
    #[must_use]
    pub const fn dog_traits(&self) -> Option<&DogTraits> {
        match &self.species {
            Species::Dog(traits) => Some(traits),
            Species::Cat => None,
        }
    }

    #[must_use]
    pub fn is_dangerous(&self) -> bool {
        self.dog_traits().is_some_and(|t| t.dangerous)
    }

    #[must_use]
    pub fn is_breeder(&self) -> bool {
        self.dog_traits().is_some_and(|t| t.animal_breeder)
    }

    /// The conviction ban if one is in force at `at`.
    #[must_use]
    pub fn active_ban_at(&self, at: DateTime<Utc>) -> Option<ConvictionBan> {
        self.details
            .conviction_ban()
            .filter(|ban| ban.is_active_at(at))
    }
}

/// Validated input for creating or updating a registration.
///
/// Dog flags are optional: on create a missing flag becomes `false`, on
/// update a missing flag keeps the stored value. Cat payloads never carry
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnimalPayload {
    pub details: RegistrationDetails,
    pub dangerous: Option<bool>,
    pub animal_breeder: Option<bool>,
}

impl AnimalPayload {
    /// Variant data for a freshly created record of `kind`.
    #[must_use]
    pub fn species_for(&self, kind: AnimalKind) -> Species {
        match kind {
            AnimalKind::Cat => Species::Cat,
            AnimalKind::Dog => Species::Dog(DogTraits {
                dangerous: self.dangerous.unwrap_or(false),
                animal_breeder: self.animal_breeder.unwrap_or(false),
            }),
        }
    }

    /// Merge the payload's variant flags into an existing variant.
    ///
    /// The kind never changes; cats ignore dog flags.
    #[must_use]
    pub fn merge_species(&self, existing: Species) -> Species {
        match existing {
            Species::Cat => Species::Cat,
            Species::Dog(traits) => Species::Dog(DogTraits {
                dangerous: self.dangerous.unwrap_or(traits.dangerous),
                animal_breeder: self.animal_breeder.unwrap_or(traits.animal_breeder),
            }),
        }
    }
}
