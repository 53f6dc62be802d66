//! Demo registrations.
//!
//! The registry is not persisted; every process starts from a freshly
//! generated set of records. Passing the same seed reproduces the same set
//! (relative to the same `now`).

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use pawtrack_core::{
    Animal, AnimalId, AnimalKind, Breed, COLOURS, DogTraits, MARKINGS, RegistrationDetails,
    Species, breeds_for,
};

/// Records generated per kind.
pub const SEED_COUNT: usize = 100;

const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Michael", "Sarah", "David", "Emma", "Robert", "Lisa", "James", "Mary",
    "William", "Patricia", "Richard", "Jennifer", "Charles", "Linda", "Joseph", "Elizabeth",
    "Thomas", "Barbara", "Christopher", "Susan", "Daniel", "Jessica", "Matthew", "Margaret",
    "Anthony", "Dorothy", "Mark", "Nancy", "Donald", "Karen", "Steven", "Helen", "Paul",
    "Sandra", "Andrew", "Donna", "Joshua", "Carol", "Kenneth", "Ruth", "Kevin", "Sharon",
    "Brian", "Michelle", "George", "Laura", "Edward", "Ronald", "Kimberly",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
    "Scott", "Torres", "Nguyen", "Hill", "Flores", "Green", "Adams", "Nelson", "Baker", "Hall",
    "Rivera", "Campbell", "Mitchell", "Carter", "Roberts", "Gomez", "Phillips", "Evans",
    "Turner", "Diaz",
];

const STREETS: &[&str] = &[
    "Main Street", "Oak Avenue", "Pine Road", "Maple Drive", "Cedar Lane", "Elm Street",
    "Park Avenue", "First Street", "Second Street", "Third Street", "Fourth Street",
    "Fifth Street", "Washington Street", "Lincoln Avenue", "Jefferson Road", "Madison Drive",
    "Monroe Street", "Adams Lane", "Jackson Avenue", "Harrison Street", "Tyler Road",
    "Taylor Drive", "Wilson Lane", "Anderson Street", "Thomas Avenue", "White Street",
    "Harris Avenue", "Martin Lane", "Thompson Street", "Garcia Road", "Robinson Street",
    "Clark Lane", "Lewis Avenue", "Lee Street", "Walker Lane", "Hall Road", "Allen Avenue",
    "Young Street", "King Road", "Wright Avenue", "Lopez Street", "Hill Lane",
];

const SUBURBS: &[&str] = &[
    "Downtown", "Riverside", "Highland", "Westside", "Eastside", "Northgate", "Southpark",
    "Midtown", "Uptown", "Lakeside", "Hillcrest", "Sunset", "Sunrise", "Greenwood", "Fairview",
    "Brookside", "Valley View", "Park Hills", "Forest Hills", "Garden City", "Spring Valley",
    "Golden Valley", "Meadowbrook", "Oak Hill", "Pine Valley", "Cedar Heights", "Maple Grove",
    "Elm Heights", "Birchwood", "Ashwood", "Willow Creek", "Stonegate", "Millbrook",
    "Clearwater", "Springdale", "Woodland", "Parkview", "Hillside", "Creekside", "Lakeview",
    "Mountain View", "Ocean View", "City Center", "Old Town",
];

const CAT_NAMES: &[&str] = &[
    "Whiskers", "Mittens", "Shadow", "Luna", "Simba", "Bella", "Max", "Chloe", "Tiger",
    "Princess", "Smokey", "Ginger", "Felix", "Nala", "Oliver", "Lucy", "Charlie", "Lily", "Milo",
    "Sophie", "Jack", "Coco", "Leo", "Zoe", "Oreo", "Daisy", "Boots", "Ruby", "Jasper", "Molly",
    "Oscar", "Stella", "Bandit", "Willow", "Toby", "Rosie", "Sam", "Poppy", "Buster", "Penny",
    "Chester", "Hazel", "Murphy", "Ivy", "Rusty", "Mia", "Ziggy", "Pearl", "Finn", "Olive",
    "Rocco", "Sage", "Bruno", "Honey", "Duke", "Cleo",
];

const DOG_NAMES: &[&str] = &[
    "Buddy", "Bella", "Max", "Lucy", "Charlie", "Molly", "Cooper", "Lola", "Rocky", "Sadie",
    "Bear", "Maggie", "Duke", "Bailey", "Tucker", "Sophie", "Jack", "Chloe", "Oliver", "Stella",
    "Zeus", "Zoe", "Bentley", "Penny", "Milo", "Nala", "Toby", "Roxy", "Oscar", "Luna", "Leo",
    "Lily", "Finn", "Ruby", "Buster", "Daisy", "Rusty", "Rosie", "Scout", "Gracie", "Gunner",
    "Abby", "Diesel", "Coco", "Hank", "Ginger", "Bruno", "Princess", "Ace", "Honey", "Rex",
    "Hazel", "Cash", "Piper", "Ranger", "Ellie",
];

/// Tag number for the `index`-th record of a kind (`C000001`, ...).
#[must_use]
pub fn tag_number(kind: AnimalKind, index: usize) -> String {
    format!("{}{:06}", kind.tag_prefix(), index + 1)
}

/// Build an RNG from an optional seed (entropy when `None`).
#[must_use]
pub fn rng_from(seed: Option<u64>) -> StdRng {
    seed.map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64)
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, options: &[&'a str]) -> &'a str {
    options.choose(rng).copied().unwrap_or_default()
}

fn digits<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

fn maybe_number<R: Rng + ?Sized>(rng: &mut R, probability: f64, max: u32) -> String {
    if rng.random_bool(probability) {
        rng.random_range(1..=max).to_string()
    } else {
        String::new()
    }
}

fn days_before<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(rng.random_range(0..days))
}

/// Generate `count` records of `kind` with ids `<kind>-1`, `<kind>-2`, ...
pub fn generate<R: Rng + ?Sized>(
    kind: AnimalKind,
    count: usize,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<Animal> {
    (0..count).map(|i| generate_one(kind, i, rng, now)).collect()
}

fn generate_one<R: Rng + ?Sized>(
    kind: AnimalKind,
    index: usize,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Animal {
    let fallback = Breed {
        code: "",
        label: "",
    };
    let breed = breeds_for(kind).choose(rng).copied().unwrap_or(fallback);
    let names = match kind {
        AnimalKind::Cat => CAT_NAMES,
        AnimalKind::Dog => DOG_NAMES,
    };

    let created_at = days_before(rng, now, 365);
    let updated_at =
        (created_at + Duration::minutes(rng.random_range(0..30 * 24 * 60))).min(now);

    let (ban_start, ban_end) = if rng.random_bool(0.1) {
        (
            Some(days_before(rng, now, 30)),
            Some(now + Duration::days(rng.random_range(1..=365))),
        )
    } else {
        (None, None)
    };

    let details = RegistrationDetails {
        tag_number: tag_number(kind, index),
        na: if rng.random_bool(0.05) {
            "N/A".to_string()
        } else {
            String::new()
        },
        last_name: pick(rng, LAST_NAMES).to_string(),
        given_name: pick(rng, FIRST_NAMES).to_string(),
        address_no: rng.random_range(1..=999).to_string(),
        lot_no: maybe_number(rng, 0.3, 99),
        house_no: maybe_number(rng, 0.7, 99),
        street: pick(rng, STREETS).to_string(),
        suburb: pick(rng, SUBURBS).to_string(),
        name: pick(rng, names).to_string(),
        breed_code: breed.code.to_string(),
        breed: breed.label.to_string(),
        colour: pick(rng, COLOURS).to_string(),
        markings: pick(rng, MARKINGS).to_string(),
        sterilised: rng.random_bool(0.7),
        next_year_tag_no: tag_number(kind, index + SEED_COUNT),
        old_tag_no: if index >= 10 && rng.random_bool(0.3) {
            tag_number(kind, index - 10)
        } else {
            String::new()
        },
        microchip_no: digits(rng, 15),
        current_conviction_banned_start_date: ban_start,
        current_conviction_banned_end_date: ban_end,
    };

    let species = match kind {
        AnimalKind::Cat => Species::Cat,
        AnimalKind::Dog => Species::Dog(DogTraits {
            dangerous: rng.random_bool(0.05),
            animal_breeder: rng.random_bool(0.1),
        }),
    };

    Animal {
        id: AnimalId::new(format!("{}-{}", kind.as_str(), index + 1)),
        species,
        details,
        created_at,
        updated_at,
    }
}
