//! Timestamp-derived record identifiers.

use chrono::{DateTime, Utc};

use pawtrack_core::{AnimalId, AnimalKind};

/// Issues `cat-<millis>` / `dog-<millis>` identifiers.
///
/// The millisecond component never repeats within one generator: two
/// records created in the same millisecond get consecutive values.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last_millis: i64,
}

impl IdGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self { last_millis: 0 }
    }

    /// Next identifier for `kind`, derived from `now`.
    pub fn next(&mut self, kind: AnimalKind, now: DateTime<Utc>) -> AnimalId {
        let millis = now.timestamp_millis().max(self.last_millis.saturating_add(1));
        self.last_millis = millis;
        AnimalId::new(format!("{}-{millis}", kind.as_str()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_same_millisecond_is_bumped() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let mut ids = IdGenerator::new();

        assert_eq!(ids.next(AnimalKind::Cat, now).as_str(), "cat-1700000000000");
        assert_eq!(ids.next(AnimalKind::Dog, now).as_str(), "dog-1700000000001");
        assert_eq!(ids.next(AnimalKind::Cat, now).as_str(), "cat-1700000000002");
    }

    #[test]
    fn test_clock_going_backwards_still_increases() {
        let mut ids = IdGenerator::new();
        let later = Utc.timestamp_millis_opt(2_000).unwrap();
        let earlier = Utc.timestamp_millis_opt(1_000).unwrap();

        ids.next(AnimalKind::Dog, later);
        assert_eq!(ids.next(AnimalKind::Dog, earlier).as_str(), "dog-2001");
    }
}
