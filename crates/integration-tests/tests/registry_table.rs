//! Registry, form, table and dialog state working together.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use chrono::{TimeZone, Utc};

use pawtrack_admin::Registry;
use pawtrack_admin::components::{
    Badge, DeleteConfirm, EditorModal, KindFilter, PAGE_SIZE, SortDirection, SortField,
    TableState,
};
use pawtrack_admin::services::MemoryNotifier;
use pawtrack_core::{AnimalKind, Species};

fn fill_dog_form(modal: &mut EditorModal) {
    let form = modal.form_mut().unwrap();
    let d = &mut form.details;
    d.tag_number = "D999999".to_string();
    d.last_name = "Quokka".to_string();
    d.given_name = "Robin".to_string();
    d.address_no = "12".to_string();
    d.street = "Banksia Road".to_string();
    d.suburb = "Zanzibar Flats".to_string();
    d.name = "Biscuit".to_string();
    d.colour = "Brown".to_string();
    form.select_breed("LAB").unwrap();
    form.dog_traits_mut().unwrap().dangerous = true;
}

#[test]
fn test_create_edit_delete_round_trip() {
    let notifier = MemoryNotifier::new();
    let mut registry = Registry::seeded(&notifier, Some(7));
    let dogs_before = registry.dogs().len();

    // Create through the editor dialog.
    let mut modal = EditorModal::default();
    modal.open_create(AnimalKind::Dog);
    assert_eq!(modal.title().as_deref(), Some("Add New Dog"));

    // An empty form stays open with errors.
    assert!(modal.save().is_err());
    assert!(modal.is_open());

    fill_dog_form(&mut modal);
    let created = modal.save().unwrap().unwrap().apply(&mut registry).unwrap();
    assert!(!modal.is_open());
    assert_eq!(registry.dogs().len(), dogs_before + 1);
    assert_eq!(registry.dogs()[0].id, created.id);
    assert_eq!(created.details.breed, "Labrador Retriever");
    assert!(matches!(created.species, Species::Dog(t) if t.dangerous && !t.animal_breeder));

    // The new record is findable from the table.
    let mut table = TableState::new(KindFilter::All);
    table.set_search("zanzibar");
    let view = table.view(&registry.all(), Utc::now());
    assert_eq!(view.total, 1);
    assert_eq!(view.rows[0].id, created.id);
    assert_eq!(view.rows[0].owner, "Robin Quokka");
    assert!(view.rows[0].badges.contains(&Badge::Dangerous));
    assert_eq!(view.summary(), "Showing 1 to 1 of 1 animals");

    // Edit keeps the id and creation time.
    modal.open_edit(&created);
    assert_eq!(modal.title().as_deref(), Some("Edit Dog"));
    modal.form_mut().unwrap().details.name = "Biscuit II".to_string();
    let updated = modal.save().unwrap().unwrap().apply(&mut registry).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(registry.find(&created.id).unwrap().details.name, "Biscuit II");

    // Delete needs confirmation; dismissing deletes nothing.
    let mut confirm = DeleteConfirm::default();
    confirm.request(&updated);
    assert!(confirm.prompt().unwrap().contains("\"Biscuit II\""));
    confirm.dismiss();
    assert_eq!(confirm.confirm(), None);
    assert!(registry.find(&created.id).is_some());

    confirm.request(&updated);
    let id = confirm.confirm().unwrap();
    registry.delete(AnimalKind::Dog, &id).unwrap();
    assert!(registry.find(&created.id).is_none());
    assert_eq!(registry.dogs().len(), dogs_before);

    assert_eq!(
        notifier.messages(),
        vec![
            "New dog registered successfully!".to_string(),
            "Dog updated successfully!".to_string(),
            "Dog deleted successfully!".to_string(),
        ]
    );
}

#[test]
fn test_table_pages_through_seeded_cats() {
    let registry = Registry::seeded(MemoryNotifier::new(), Some(3));
    let records = registry.all();
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();

    let mut table = TableState::new(KindFilter::Cat);
    table.sort_by(SortField::TagNumber, SortDirection::Asc);
    let first = table.view(&records, now);
    assert_eq!(first.total, registry.cats().len());
    assert_eq!(first.rows.len(), PAGE_SIZE);
    assert!(first.rows.iter().all(|r| r.kind == AnimalKind::Cat));
    assert!(!first.has_previous());

    let total_pages = first.total_pages;
    table.next_page(total_pages);
    let second = table.view(&records, now);
    assert_eq!(second.page, 2);
    assert!(first.rows.last().unwrap().tag_number < second.rows[0].tag_number);

    // Past the end clamps to the last page.
    table.go_to(total_pages + 5, total_pages);
    assert_eq!(table.view(&records, now).page, total_pages);

    // Changing the sort returns to page 1.
    table.set_sort(SortField::TagNumber);
    assert_eq!(table.page(), 1);
    assert_eq!(table.sort(), (SortField::TagNumber, SortDirection::Desc));
    let descending = table.view(&records, now);
    assert!(descending.rows[0].tag_number > descending.rows[1].tag_number);
}

#[test]
fn test_search_with_no_matches_shows_empty_summary() {
    let registry = Registry::seeded(MemoryNotifier::new(), Some(5));
    let mut table = TableState::new(KindFilter::Dog);
    table.set_search("no animal is called this");

    let view = table.view(&registry.all(), Utc::now());
    assert_eq!(view.total, 0);
    assert!(view.rows.is_empty());
    assert_eq!(view.summary(), "Showing 0 to 0 of 0 animals");
    assert_eq!(view.record_count(), "0 records");
}
