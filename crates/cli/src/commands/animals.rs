//! Registry browsing commands.
//!
//! The registry lives in memory only, so each invocation works on a freshly
//! seeded set of records. Set `PAWTRACK_SEED` to get the same records every
//! time.
//!
//! # Usage
//!
//! ```bash
//! pawtrack animals list --kind dog --search lab --sort tagNumber --desc --page 2
//! pawtrack animals show cat-17
//! pawtrack animals breeds --kind cat
//! ```

use chrono::Utc;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use tracing::info;

use pawtrack_admin::components::{
    DataTableConfig, KindFilter, PAGE_SIZE, SortDirection, SortField, TableRow, TableState,
    TableView, animals_table_config,
};
use pawtrack_admin::{AdminConfig, AppError, Registry};
use pawtrack_core::{AnimalId, AnimalKind, breeds_for};

/// Options for `animals list`.
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub kind: KindFilter,
    pub search: Option<String>,
    pub sort: SortField,
    pub descending: bool,
    pub page: usize,
    pub json: bool,
}

/// Show one page of the record table.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the view cannot be encoded as JSON.
pub fn list(config: &AdminConfig, options: &ListOptions) -> Result<(), AppError> {
    let registry = Registry::seeded(pawtrack_admin::services::TracingNotifier, config.seed);
    let records = registry.all();

    let mut state = TableState::new(options.kind);
    if let Some(search) = &options.search {
        state.set_search(search.as_str());
    }
    let direction = if options.descending {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };
    state.sort_by(options.sort, direction);
    let total_pages = state.filtered_sorted(&records).len().div_ceil(PAGE_SIZE);
    state.go_to(options.page, total_pages);

    let view = state.view(&records, Utc::now());

    if options.json {
        let json = serde_json::to_string_pretty(&view)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        emit(&json);
        return Ok(());
    }

    let layout = animals_table_config(options.kind);
    info!("{} ({})", layout.title, view.record_count());
    emit(&render_table(&layout, &view).to_string());
    info!(
        "{} | page {} of {}",
        view.summary(),
        view.page,
        view.total_pages.max(1)
    );
    if view.total == 0 {
        info!(
            "{}. {}",
            layout.empty_title,
            layout.empty_description.as_deref().unwrap_or_default()
        );
    }
    Ok(())
}

/// Show every field of one record.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no record has this id.
pub fn show(config: &AdminConfig, id: &str) -> Result<(), AppError> {
    let registry = Registry::seeded(pawtrack_admin::services::TracingNotifier, config.seed);
    let id = AnimalId::new(id);
    let record = registry
        .find(&id)
        .ok_or_else(|| AppError::NotFound(id.clone()))?;

    let json = serde_json::to_string_pretty(record)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    emit(&json);

    let row = TableRow::render(record, Utc::now());
    if let Some(ban) = &row.ban {
        info!("{ban}");
    }
    Ok(())
}

/// List the breed codes for a kind.
pub fn breeds(kind: AnimalKind) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![header_cell("Code"), header_cell("Breed")]);
    for breed in breeds_for(kind) {
        table.add_row(vec![breed.code, breed.label]);
    }
    emit(&table.to_string());
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn render_table(config: &DataTableConfig, view: &TableView) -> Table {
    let columns: Vec<_> = config
        .columns
        .iter()
        .filter(|c| c.default_visible && c.key != "actions")
        .collect();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![header_cell("ID")];
    header.extend(columns.iter().map(|c| header_cell(&c.label)));
    table.set_header(header);

    for row in &view.rows {
        let mut cells = vec![Cell::new(row.id.as_str())];
        cells.extend(columns.iter().map(|c| Cell::new(cell_text(row, &c.key))));
        table.add_row(cells);
    }
    table
}

fn cell_text(row: &TableRow, key: &str) -> String {
    match key {
        "type" => format!("{} {}", row.icon, row.kind.label()),
        "tagNumber" => row.tag_number.clone(),
        "name" => row.name.clone(),
        "lastName" => row.owner.clone(),
        "breed" => format!("{} ({})", row.breed, row.breed_code),
        "suburb" => row.suburb.clone(),
        "status" => row.badge_labels(),
        "attributes" => [&row.ban, &row.chip, &row.markings]
            .into_iter()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

#[allow(clippy::print_stdout)]
fn emit(text: &str) {
    println!("{text}");
}
