//! Fixed breed, colour and markings vocabularies.
//!
//! Breed codes are paired with a display label. Selecting a code always
//! determines the label; the reverse lookup is never used.

use super::animal::AnimalKind;

/// A breed code and its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breed {
    pub code: &'static str,
    pub label: &'static str,
}

const fn breed(code: &'static str, label: &'static str) -> Breed {
    Breed { code, label }
}

/// Cat breeds offered by the registration form.
pub const CAT_BREEDS: &[Breed] = &[
    breed("PER", "Persian"),
    breed("SIA", "Siamese"),
    breed("MAI", "Maine Coon"),
    breed("RAG", "Ragdoll"),
    breed("BRI", "British Shorthair"),
    breed("ABY", "Abyssinian"),
    breed("RUS", "Russian Blue"),
    breed("BEN", "Bengal"),
    breed("BIR", "Birman"),
    breed("NOR", "Norwegian Forest Cat"),
    breed("SPH", "Sphynx"),
    breed("SCO", "Scottish Fold"),
    breed("AME", "American Shorthair"),
    breed("ORI", "Oriental"),
    breed("SOM", "Somali"),
    breed("DSH", "Domestic Shorthair"),
    breed("DLH", "Domestic Longhair"),
];

/// Dog breeds offered by the registration form.
pub const DOG_BREEDS: &[Breed] = &[
    breed("LAB", "Labrador Retriever"),
    breed("GER", "German Shepherd"),
    breed("GOL", "Golden Retriever"),
    breed("BUL", "French Bulldog"),
    breed("BEA", "Beagle"),
    breed("POO", "Poodle"),
    breed("ROT", "Rottweiler"),
    breed("YOR", "Yorkshire Terrier"),
    breed("SIB", "Siberian Husky"),
    breed("POM", "Pomeranian"),
    breed("BOS", "Boston Terrier"),
    breed("AUS", "Australian Shepherd"),
    breed("SHI", "Shih Tzu"),
    breed("BOX", "Boxer"),
    breed("COC", "Cocker Spaniel"),
    breed("BOR", "Border Collie"),
    breed("CHI", "Chihuahua"),
    breed("DAL", "Dalmatian"),
    breed("GRE", "Great Dane"),
    breed("MIX", "Mixed Breed"),
];

/// Colour options shared by both kinds.
pub const COLOURS: &[&str] = &[
    "Black",
    "White",
    "Brown",
    "Grey",
    "Cream",
    "Orange",
    "Tabby",
    "Calico",
    "Tortoiseshell",
    "Tuxedo",
    "Silver",
    "Blue",
    "Red",
    "Chocolate",
    "Lilac",
    "Fawn",
    "Brindle",
    "Merle",
    "Sable",
    "Tri-color",
    "Bi-color",
    "Solid",
    "Spotted",
    "Striped",
];

/// Markings options. `"None"` is the form default.
pub const MARKINGS: &[&str] = &[
    "None",
    "White chest",
    "White paws",
    "White face",
    "Black mask",
    "Stripe on back",
    "Spotted",
    "Patches",
    "Collar marking",
    "Tail tip",
    "Ear tips",
    "Facial markings",
    "Leg markings",
    "Belly markings",
    "Unique pattern",
    "Scar on leg",
    "Birthmark",
    "Distinctive spots",
];

/// The markings value meaning "nothing notable".
pub const NO_MARKINGS: &str = "None";

/// Error returned when a breed code is not in the kind's table.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} breed code: {code}")]
pub struct BreedError {
    pub kind: AnimalKind,
    pub code: String,
}

/// The breed table for a kind.
#[must_use]
pub const fn breeds_for(kind: AnimalKind) -> &'static [Breed] {
    match kind {
        AnimalKind::Cat => CAT_BREEDS,
        AnimalKind::Dog => DOG_BREEDS,
    }
}

/// Look up a breed by code within the kind's table.
///
/// # Errors
///
/// Returns [`BreedError`] when the code belongs to no breed of that kind.
pub fn lookup_breed(kind: AnimalKind, code: &str) -> Result<Breed, BreedError> {
    breeds_for(kind)
        .iter()
        .find(|b| b.code == code)
        .copied()
        .ok_or_else(|| BreedError {
            kind,
            code: code.to_string(),
        })
}
