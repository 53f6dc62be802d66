//! Data table component types.
//!
//! These types describe how a record table is laid out: its columns, the
//! filters it offers, its search placeholder and its empty state.

use serde::{Deserialize, Serialize};

use super::animal_table::{KindFilter, SortField};

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColumn {
    /// Unique key for the column. For sortable columns this is the sort key.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Whether the column is sortable.
    pub sortable: bool,
    /// Whether the column is visible by default.
    pub default_visible: bool,
}

impl TableColumn {
    /// Create a column that sorts by `field`.
    #[must_use]
    pub fn sortable(field: SortField) -> Self {
        Self {
            key: field.key().to_string(),
            label: field.label().to_string(),
            sortable: true,
            default_visible: true,
        }
    }

    /// Create a new non-sortable column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: false,
            default_visible: true,
        }
    }

    /// Set whether the column is visible by default.
    #[must_use]
    pub const fn visible(mut self, visible: bool) -> Self {
        self.default_visible = visible;
        self
    }
}

/// Filter type for data tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Text input filter.
    Text,
    /// Single-select dropdown.
    Select,
}

/// Filter definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFilter {
    /// Filter parameter key.
    pub key: String,
    /// Display label.
    pub label: String,
    pub filter_type: FilterType,
    /// Placeholder text (for text inputs).
    pub placeholder: Option<String>,
    /// Available options (for selects).
    pub options: Vec<FilterOption>,
}

/// Option for select filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

impl TableFilter {
    /// Create a text filter.
    #[must_use]
    pub fn text(key: &str, label: &str, placeholder: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Text,
            placeholder: Some(placeholder.to_string()),
            options: vec![],
        }
    }

    /// Create a select filter.
    #[must_use]
    pub fn select(key: &str, label: &str, options: Vec<FilterOption>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Select,
            placeholder: None,
            options,
        }
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Heading shown above the table.
    pub title: String,
    pub columns: Vec<TableColumn>,
    pub filters: Vec<TableFilter>,
    /// Search placeholder text.
    pub search_placeholder: String,
    /// Label of the add button, when the table offers one.
    pub add_label: Option<String>,
    /// Title for empty state.
    pub empty_title: String,
    /// Description for empty state.
    pub empty_description: Option<String>,
    /// Whether to show filter panel.
    pub has_filters: bool,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new(table_id: &str, title: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            title: title.to_string(),
            columns: vec![],
            filters: vec![],
            search_placeholder: "Search...".to_string(),
            add_label: None,
            empty_title: "No items found".to_string(),
            empty_description: None,
            has_filters: false,
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Add a filter.
    #[must_use]
    pub fn filter(mut self, filter: TableFilter) -> Self {
        self.has_filters = true;
        self.filters.push(filter);
        self
    }

    /// Set search placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, placeholder: &str) -> Self {
        self.search_placeholder = placeholder.to_string();
        self
    }

    /// Offer an add button with this label.
    #[must_use]
    pub fn add_button(mut self, label: String) -> Self {
        self.add_label = Some(label);
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub fn empty_state(mut self, title: &str, description: Option<&str>) -> Self {
        self.empty_title = title.to_string();
        self.empty_description = description.map(ToString::to_string);
        self
    }

    /// Get default visible columns.
    #[must_use]
    pub fn default_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.default_visible)
            .map(|c| c.key.clone())
            .collect()
    }

    /// Header labels of the default visible columns.
    #[must_use]
    pub fn headers(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.default_visible)
            .map(|c| c.label.as_str())
            .collect()
    }
}

/// Build the animal table configuration for a tab.
///
/// Only the combined tab offers a type filter; only single-kind tabs offer
/// an add button.
#[must_use]
pub fn animals_table_config(filter: KindFilter) -> DataTableConfig {
    let mut config = DataTableConfig::new(filter.as_str(), filter.title())
        .column(TableColumn::new("type", "Type"))
        .column(TableColumn::sortable(SortField::TagNumber))
        .column(TableColumn::sortable(SortField::Name))
        .column(TableColumn::sortable(SortField::LastName))
        .column(TableColumn::sortable(SortField::Breed))
        .column(TableColumn::sortable(SortField::Suburb))
        .column(TableColumn::new("status", "Status"))
        .column(TableColumn::new("attributes", "Special Attributes"))
        .column(TableColumn::sortable(SortField::UpdatedAt).visible(false))
        .column(TableColumn::new("actions", "Actions"))
        .search_placeholder("Search animals...")
        .empty_state(
            "No animals found",
            Some("Try adjusting your search or filters"),
        );

    match filter.kind() {
        Some(kind) => {
            config = config.add_button(format!("Add New {}", kind.label()));
        }
        None => {
            config = config.filter(TableFilter::select(
                "type",
                "Type",
                vec![
                    FilterOption::new("all", "All"),
                    FilterOption::new("cat", "Cats"),
                    FilterOption::new("dog", "Dogs"),
                ],
            ));
        }
    }
    config
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_single_kind_table_offers_add_button() {
        let config = animals_table_config(KindFilter::Dog);
        assert_eq!(config.add_label.as_deref(), Some("Add New Dog"));
        assert!(!config.has_filters);
        assert_eq!(config.search_placeholder, "Search animals...");
    }

    #[test]
    fn test_combined_table_has_type_filter_and_no_add() {
        let config = animals_table_config(KindFilter::All);
        assert!(config.add_label.is_none());
        assert_eq!(config.filters.len(), 1);
        assert_eq!(config.filters[0].options.len(), 3);
    }

    #[test]
    fn test_sortable_columns_use_sort_keys() {
        let config = animals_table_config(KindFilter::Cat);
        let sortable: Vec<_> = config
            .columns
            .iter()
            .filter(|c| c.sortable && c.default_visible)
            .map(|c| (c.key.as_str(), c.label.as_str()))
            .collect();
        assert_eq!(
            sortable,
            vec![
                ("tagNumber", "Tag Number"),
                ("name", "Animal Name"),
                ("lastName", "Owner"),
                ("breed", "Breed"),
                ("suburb", "Suburb"),
            ]
        );
        for (key, _) in sortable {
            assert!(key.parse::<SortField>().is_ok());
        }
        assert!(!config.headers().contains(&"Updated"));
    }
}
