//! Search, sort and pagination over animal records.
//!
//! [`TableState`] holds the transient view settings of one table. The view
//! is recomputed from scratch on every call to [`TableState::view`]: filter
//! by kind, then search, then a stable sort, then slice out one page.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use pawtrack_core::{Animal, AnimalId, AnimalKind, NO_MARKINGS};

/// Rows per page.
pub const PAGE_SIZE: usize = 10;

/// Which kinds a table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KindFilter {
    #[default]
    All,
    Cat,
    Dog,
}

impl KindFilter {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Cat => "cat",
            Self::Dog => "dog",
        }
    }

    /// Tab heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::All => "All Animals",
            Self::Cat => "Cats",
            Self::Dog => "Dogs",
        }
    }

    /// The single kind shown, or `None` for the combined table.
    #[must_use]
    pub const fn kind(self) -> Option<AnimalKind> {
        match self {
            Self::All => None,
            Self::Cat => Some(AnimalKind::Cat),
            Self::Dog => Some(AnimalKind::Dog),
        }
    }

    #[must_use]
    pub fn matches(self, kind: AnimalKind) -> bool {
        self.kind().is_none_or(|k| k == kind)
    }
}

impl From<AnimalKind> for KindFilter {
    fn from(kind: AnimalKind) -> Self {
        match kind {
            AnimalKind::Cat => Self::Cat,
            AnimalKind::Dog => Self::Dog,
        }
    }
}

impl FromStr for KindFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<AnimalKind>()
            .map(Self::from)
            .map_err(|_| format!("invalid type filter: {s} (expected all, cat or dog)"))
    }
}

/// A record field the table can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    TagNumber,
    #[default]
    Name,
    LastName,
    GivenName,
    Breed,
    Suburb,
    Colour,
    Sterilised,
    Dangerous,
    AnimalBreeder,
    BanStart,
    BanEnd,
    CreatedAt,
    UpdatedAt,
}

const SORT_FIELDS: [SortField; 14] = [
    SortField::TagNumber,
    SortField::Name,
    SortField::LastName,
    SortField::GivenName,
    SortField::Breed,
    SortField::Suburb,
    SortField::Colour,
    SortField::Sterilised,
    SortField::Dangerous,
    SortField::AnimalBreeder,
    SortField::BanStart,
    SortField::BanEnd,
    SortField::CreatedAt,
    SortField::UpdatedAt,
];

/// Comparable value of one sort field. Variants are never mixed for a
/// single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue<'a> {
    Text(&'a str),
    Flag(bool),
    Time(DateTime<Utc>),
}

impl SortField {
    /// Wire key (matches the record's JSON field name).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::TagNumber => "tagNumber",
            Self::Name => "name",
            Self::LastName => "lastName",
            Self::GivenName => "givenName",
            Self::Breed => "breed",
            Self::Suburb => "suburb",
            Self::Colour => "colour",
            Self::Sterilised => "sterilised",
            Self::Dangerous => "dangerous",
            Self::AnimalBreeder => "animalBreeder",
            Self::BanStart => "currentConvictionBannedStartDate",
            Self::BanEnd => "currentConvictionBannedEndDate",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }

    /// Column header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TagNumber => "Tag Number",
            Self::Name => "Animal Name",
            Self::LastName => "Owner",
            Self::GivenName => "Given Name",
            Self::Breed => "Breed",
            Self::Suburb => "Suburb",
            Self::Colour => "Colour",
            Self::Sterilised => "Sterilised",
            Self::Dangerous => "Dangerous",
            Self::AnimalBreeder => "Breeder",
            Self::BanStart => "Ban Start",
            Self::BanEnd => "Ban End",
            Self::CreatedAt => "Created",
            Self::UpdatedAt => "Updated",
        }
    }

    /// Every sortable field.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &SORT_FIELDS
    }

    /// `None` when the record has no value for this field (dog flags on a
    /// cat, unset ban dates).
    fn value(self, animal: &Animal) -> Option<SortValue<'_>> {
        let d = &animal.details;
        match self {
            Self::TagNumber => Some(SortValue::Text(&d.tag_number)),
            Self::Name => Some(SortValue::Text(&d.name)),
            Self::LastName => Some(SortValue::Text(&d.last_name)),
            Self::GivenName => Some(SortValue::Text(&d.given_name)),
            Self::Breed => Some(SortValue::Text(&d.breed)),
            Self::Suburb => Some(SortValue::Text(&d.suburb)),
            Self::Colour => Some(SortValue::Text(&d.colour)),
            Self::Sterilised => Some(SortValue::Flag(d.sterilised)),
            Self::Dangerous => animal.dog_traits().map(|t| SortValue::Flag(t.dangerous)),
            Self::AnimalBreeder => animal
                .dog_traits()
                .map(|t| SortValue::Flag(t.animal_breeder)),
            Self::BanStart => d
                .current_conviction_banned_start_date
                .map(SortValue::Time),
            Self::BanEnd => d.current_conviction_banned_end_date.map(SortValue::Time),
            Self::CreatedAt => Some(SortValue::Time(animal.created_at)),
            Self::UpdatedAt => Some(SortValue::Time(animal.updated_at)),
        }
    }

    fn compare(self, a: &Animal, b: &Animal) -> Ordering {
        // `None < Some(_)`, so absent values lead when ascending.
        self.value(a).cmp(&self.value(b))
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SORT_FIELDS
            .iter()
            .copied()
            .find(|f| f.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("invalid sort field: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Search, sort and page settings of one table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableState {
    filter: KindFilter,
    search: String,
    sort_field: SortField,
    direction: SortDirection,
    page: usize,
}

impl TableState {
    /// Sorted by animal name ascending, first page.
    #[must_use]
    pub fn new(filter: KindFilter) -> Self {
        Self {
            filter,
            page: 1,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn filter(&self) -> KindFilter {
        self.filter
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub const fn sort(&self) -> (SortField, SortDirection) {
        (self.sort_field, self.direction)
    }

    /// Requested page (1-based); [`view`](Self::view) clamps it.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Kind offered by the add button; `None` on the combined table.
    #[must_use]
    pub const fn can_add(&self) -> Option<AnimalKind> {
        self.filter.kind()
    }

    /// Change the type filter and return to the first page.
    pub fn set_filter(&mut self, filter: KindFilter) {
        self.filter = filter;
        self.page = 1;
    }

    /// Change the search text and return to the first page.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.page = 1;
    }

    /// Sort by `field`. Choosing the current field flips the direction; a
    /// new field starts ascending.
    pub fn set_sort(&mut self, field: SortField) {
        if field == self.sort_field {
            self.direction = self.direction.toggled();
        } else {
            self.sort_field = field;
            self.direction = SortDirection::Asc;
        }
        self.page = 1;
    }

    /// Set sort field and direction explicitly.
    pub fn sort_by(&mut self, field: SortField, direction: SortDirection) {
        self.sort_field = field;
        self.direction = direction;
        self.page = 1;
    }

    /// Jump to `page`, clamped to `1..=total_pages`.
    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }

    /// Advance one page; no-op on the last page.
    pub fn next_page(&mut self, total_pages: usize) {
        if self.page < total_pages {
            self.page += 1;
        }
    }

    /// Go back one page; no-op on the first page.
    pub const fn previous_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Whether `animal` passes the type filter and the search text.
    #[must_use]
    pub fn matches(&self, animal: &Animal) -> bool {
        self.filter.matches(animal.kind()) && matches_search(animal, &self.search)
    }

    /// Filtered and sorted records, before pagination.
    #[must_use]
    pub fn filtered_sorted<'a>(&self, records: &'a [Animal]) -> Vec<&'a Animal> {
        let mut rows: Vec<&Animal> = records.iter().filter(|a| self.matches(a)).collect();
        let field = self.sort_field;
        match self.direction {
            SortDirection::Asc => rows.sort_by(|a, b| field.compare(a, b)),
            SortDirection::Desc => rows.sort_by(|a, b| field.compare(b, a)),
        }
        rows
    }

    /// The current page of the table, with rows rendered at `now`.
    #[must_use]
    pub fn view(&self, records: &[Animal], now: DateTime<Utc>) -> TableView {
        let matched = self.filtered_sorted(records);
        let total = matched.len();
        let total_pages = total.div_ceil(PAGE_SIZE);
        let page = self.page.clamp(1, total_pages.max(1));
        let offset = (page - 1) * PAGE_SIZE;
        let rows: Vec<TableRow> = matched
            .iter()
            .skip(offset)
            .take(PAGE_SIZE)
            .map(|a| TableRow::render(a, now))
            .collect();

        let (start, end) = if rows.is_empty() {
            (0, 0)
        } else {
            (offset + 1, offset + rows.len())
        };

        TableView {
            rows,
            page,
            total_pages,
            total,
            start,
            end,
        }
    }
}

/// Case-insensitive substring match over the searchable fields. An empty
/// needle matches everything; whitespace is matched literally.
#[must_use]
pub fn matches_search(animal: &Animal, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let d = &animal.details;
    [
        &d.name,
        &d.tag_number,
        &d.last_name,
        &d.given_name,
        &d.breed,
        &d.suburb,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// One page of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub rows: Vec<TableRow>,
    /// Page shown (1-based, clamped).
    pub page: usize,
    pub total_pages: usize,
    /// Records matching filter and search.
    pub total: usize,
    /// 1-based index of the first row shown (0 when empty).
    pub start: usize,
    pub end: usize,
}

impl TableView {
    /// "Showing 11 to 20 of 42 animals".
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} animals",
            self.start, self.end, self.total
        )
    }

    /// Header badge, e.g. "42 records".
    #[must_use]
    pub fn record_count(&self) -> String {
        format!("{} records", self.total)
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Status badges shown beside a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Badge {
    Sterilised,
    Dangerous,
    Breeder,
}

impl Badge {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sterilised => "Sterilised",
            Self::Dangerous => "Dangerous",
            Self::Breeder => "Breeder",
        }
    }
}

/// Display icon for a kind.
#[must_use]
pub const fn kind_icon(kind: AnimalKind) -> &'static str {
    match kind {
        AnimalKind::Cat => "🐱",
        AnimalKind::Dog => "🐶",
    }
}

/// A record rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub id: AnimalId,
    pub kind: AnimalKind,
    pub icon: &'static str,
    pub tag_number: String,
    pub name: String,
    pub owner: String,
    pub breed: String,
    pub breed_code: String,
    pub suburb: String,
    pub badges: Vec<Badge>,
    /// "Banned until <date>" while a conviction ban is in force.
    pub ban: Option<String>,
    /// "Chip: 12345678..." when a microchip is recorded.
    pub chip: Option<String>,
    /// "Markings: <value>" unless the markings are "None".
    pub markings: Option<String>,
}

impl TableRow {
    #[must_use]
    pub fn render(animal: &Animal, now: DateTime<Utc>) -> Self {
        let d = &animal.details;

        let mut badges = Vec::new();
        if d.sterilised {
            badges.push(Badge::Sterilised);
        }
        if animal.is_dangerous() {
            badges.push(Badge::Dangerous);
        }
        if animal.is_breeder() {
            badges.push(Badge::Breeder);
        }

        let chip = (!d.microchip_no.is_empty()).then(|| {
            let preview: String = d.microchip_no.chars().take(8).collect();
            format!("Chip: {preview}...")
        });

        let markings = (!d.markings.is_empty() && d.markings != NO_MARKINGS)
            .then(|| format!("Markings: {}", d.markings));

        Self {
            id: animal.id.clone(),
            kind: animal.kind(),
            icon: kind_icon(animal.kind()),
            tag_number: d.tag_number.clone(),
            name: d.name.clone(),
            owner: d.owner_display_name(),
            breed: d.breed.clone(),
            breed_code: d.breed_code.clone(),
            suburb: d.suburb.clone(),
            badges,
            ban: animal
                .active_ban_at(now)
                .map(|ban| format!("Banned until {}", ban.end.format("%d/%m/%Y"))),
            chip,
            markings,
        }
    }

    /// Badge labels joined for single-line display.
    #[must_use]
    pub fn badge_labels(&self) -> String {
        self.badges
            .iter()
            .map(|b| b.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::{Duration, TimeZone};
    use pawtrack_core::{DogTraits, RegistrationDetails, Species};

    use super::*;
    use crate::registry::seed;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn animal(id: &str, species: Species, name: &str, breed: &str) -> Animal {
        Animal {
            id: AnimalId::new(id),
            species,
            details: RegistrationDetails {
                tag_number: format!("T-{id}"),
                name: name.to_string(),
                last_name: "Smith".to_string(),
                given_name: "Jane".to_string(),
                breed: breed.to_string(),
                suburb: "Riverside".to_string(),
                markings: "None".to_string(),
                ..RegistrationDetails::default()
            },
            created_at: now(),
            updated_at: now(),
        }
    }

    fn seeded() -> Vec<Animal> {
        let mut rng = seed::rng_from(Some(11));
        let mut records = seed::generate(AnimalKind::Cat, 37, &mut rng, now());
        records.extend(seed::generate(AnimalKind::Dog, 25, &mut rng, now()));
        records
    }

    #[test]
    fn test_whiskers_buddy_search() {
        let records = vec![
            animal("cat-1", Species::Cat, "Whiskers", "Persian"),
            animal(
                "dog-1",
                Species::Dog(DogTraits::default()),
                "Buddy",
                "Labrador Retriever",
            ),
        ];
        let mut state = TableState::new(KindFilter::All);

        state.set_search("whisk");
        let view = state.view(&records, now());
        assert_eq!(view.total, 1);
        assert_eq!(view.rows[0].name, "Whiskers");

        state.set_search("LAB");
        let view = state.view(&records, now());
        assert_eq!(view.total, 1);
        assert_eq!(view.rows[0].name, "Buddy");

        state.set_search("");
        assert_eq!(state.view(&records, now()).total, 2);
    }

    fn whiskers_and_buddy() -> Vec<Animal> {
        let mut whiskers = animal("cat-1", Species::Cat, "Whiskers", "Persian");
        whiskers.details.tag_number = "C000001".to_string();
        let mut buddy = animal(
            "dog-1",
            Species::Dog(DogTraits::default()),
            "Buddy",
            "Labrador Retriever",
        );
        buddy.details.tag_number = "D000001".to_string();
        buddy.details.last_name = "Okafor".to_string();
        buddy.details.given_name = "Amara".to_string();
        vec![whiskers, buddy]
    }

    fn names(state: &TableState, records: &[Animal]) -> Vec<String> {
        state
            .filtered_sorted(records)
            .iter()
            .map(|a| a.details.name.clone())
            .collect()
    }

    #[test]
    fn test_search_by_name_tag_and_owner() {
        let records = whiskers_and_buddy();
        let mut state = TableState::new(KindFilter::All);

        state.set_search("whis");
        assert_eq!(names(&state, &records), ["Whiskers"]);

        state.set_search("D000001");
        assert_eq!(names(&state, &records), ["Buddy"]);

        state.set_search("zzz");
        assert!(names(&state, &records).is_empty());

        state.set_search("okaf");
        assert_eq!(names(&state, &records), ["Buddy"]);

        state.set_search("JANE");
        assert_eq!(names(&state, &records), ["Whiskers"]);
    }

    #[test]
    fn test_search_does_not_trim_whitespace() {
        let records = whiskers_and_buddy();
        let mut state = TableState::new(KindFilter::All);

        state.set_search("whiskers ");
        assert!(names(&state, &records).is_empty());

        // Only "Labrador Retriever" contains a space.
        state.set_search(" ");
        assert_eq!(names(&state, &records), ["Buddy"]);
    }

    #[test]
    fn test_filtered_rows_are_a_matching_subset() {
        let records = seeded();
        let mut state = TableState::new(KindFilter::Dog);
        state.set_search("an");
        let rows = state.filtered_sorted(&records);
        assert!(rows.len() <= 25);
        for row in &rows {
            assert_eq!(row.kind(), AnimalKind::Dog);
            assert!(matches_search(row, "an"));
        }
        for excluded in records.iter().filter(|a| !rows.iter().any(|r| r.id == a.id)) {
            assert!(excluded.kind() != AnimalKind::Dog || !matches_search(excluded, "an"));
        }
    }

    #[test]
    fn test_descending_reverses_ascending_for_distinct_keys() {
        let records = seeded();
        let mut state = TableState::new(KindFilter::All);
        state.sort_by(SortField::TagNumber, SortDirection::Asc);
        let asc: Vec<_> = state
            .filtered_sorted(&records)
            .iter()
            .map(|a| a.id.clone())
            .collect();
        state.set_sort(SortField::TagNumber);
        assert_eq!(state.sort().1, SortDirection::Desc);
        let mut desc: Vec<_> = state
            .filtered_sorted(&records)
            .iter()
            .map(|a| a.id.clone())
            .collect();
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let records = vec![
            animal("cat-1", Species::Cat, "Luna", "Persian"),
            animal("cat-2", Species::Cat, "Luna", "Siamese"),
            animal("cat-3", Species::Cat, "Abby", "Persian"),
        ];
        let state = TableState::new(KindFilter::Cat);
        let ids: Vec<_> = state
            .filtered_sorted(&records)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["cat-3", "cat-1", "cat-2"]);
    }

    #[test]
    fn test_absent_values_lead_ascending_and_trail_descending() {
        let records = vec![
            animal("dog-1", Species::Dog(DogTraits::default()), "Rex", "Boxer"),
            animal("cat-1", Species::Cat, "Tom", "Persian"),
        ];
        let mut state = TableState::new(KindFilter::All);
        state.sort_by(SortField::Dangerous, SortDirection::Asc);
        assert_eq!(state.filtered_sorted(&records)[0].id.as_str(), "cat-1");
        state.sort_by(SortField::Dangerous, SortDirection::Desc);
        assert_eq!(state.filtered_sorted(&records)[0].id.as_str(), "dog-1");
    }

    #[test]
    fn test_pages_cover_every_match_once() {
        let records = seeded();
        let mut state = TableState::new(KindFilter::All);
        let first = state.view(&records, now());
        assert_eq!(first.total, 62);
        assert_eq!(first.total_pages, 7);
        assert_eq!(first.summary(), "Showing 1 to 10 of 62 animals");

        let mut seen = Vec::new();
        for _ in 0..first.total_pages {
            let view = state.view(&records, now());
            seen.extend(view.rows.into_iter().map(|r| r.id));
            state.next_page(first.total_pages);
        }
        assert_eq!(state.page(), 7);
        let last = state.view(&records, now());
        assert_eq!(last.summary(), "Showing 61 to 62 of 62 animals");
        assert!(!last.has_next());

        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 62);
    }

    #[test]
    fn test_search_and_sort_reset_page_and_view_clamps() {
        let records = seeded();
        let mut state = TableState::new(KindFilter::All);
        state.go_to(5, 7);
        state.set_search("x");
        assert_eq!(state.page(), 1);

        state.go_to(3, 7);
        state.set_sort(SortField::Suburb);
        assert_eq!(state.page(), 1);
        state.previous_page();
        assert_eq!(state.page(), 1);

        let mut stale = TableState::new(KindFilter::Cat);
        stale.go_to(4, 4);
        let view = stale.view(&records[..12], now());
        assert_eq!(view.page, 2);
        assert_eq!(view.rows.len(), 2);
    }

    #[test]
    fn test_empty_view_summary() {
        let state = TableState::new(KindFilter::All);
        let view = state.view(&[], now());
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.summary(), "Showing 0 to 0 of 0 animals");
    }

    #[test]
    fn test_row_presentation() {
        let mut dog = animal(
            "dog-1",
            Species::Dog(DogTraits {
                dangerous: true,
                animal_breeder: false,
            }),
            "Rex",
            "Boxer",
        );
        dog.details.sterilised = true;
        dog.details.microchip_no = "982000123456789".to_string();
        dog.details.markings = "White chest".to_string();
        dog.details.current_conviction_banned_start_date = Some(now() - Duration::days(2));
        dog.details.current_conviction_banned_end_date =
            Some(Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap());

        let row = TableRow::render(&dog, now());
        assert_eq!(row.icon, "🐶");
        assert_eq!(row.owner, "Jane Smith");
        assert_eq!(row.badge_labels(), "Sterilised, Dangerous");
        assert_eq!(row.chip.as_deref(), Some("Chip: 98200012..."));
        assert_eq!(row.markings.as_deref(), Some("Markings: White chest"));
        assert_eq!(row.ban.as_deref(), Some("Banned until 31/12/2025"));

        let later = TableRow::render(&dog, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        assert!(later.ban.is_none());

        let cat = TableRow::render(&animal("cat-1", Species::Cat, "Tom", "Persian"), now());
        assert!(cat.markings.is_none());
        assert!(cat.chip.is_none());
        assert!(cat.badges.is_empty());
    }

    #[test]
    fn test_parse_filter_and_sort_field() {
        assert_eq!("cats".parse::<KindFilter>().unwrap(), KindFilter::Cat);
        assert_eq!("ALL".parse::<KindFilter>().unwrap(), KindFilter::All);
        assert!("bird".parse::<KindFilter>().is_err());
        assert_eq!("lastname".parse::<SortField>().unwrap(), SortField::LastName);
        assert!(TableState::new(KindFilter::All).can_add().is_none());
        assert_eq!(
            TableState::new(KindFilter::Dog).can_add(),
            Some(AnimalKind::Dog)
        );
    }
}
