//! Selectable options for dropdown lists

use serde::{Deserialize, Serialize};

/// An option in a dropdown list
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    /// The value (reported to callbacks when selected)
    pub value: String,
    /// The display label shown in UI
    pub label: String,
    /// Secondary text shown under the label, also matched by search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Extra text matched by search but never displayed (aliases, codes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
    /// Whether this option is disabled
    #[serde(default)]
    pub disabled: bool,
}

impl DropdownOption {
    /// Create a new option with value and label
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    /// Set the secondary description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set extra searchable text
    pub fn search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    /// Mark this option as disabled
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Check if this option matches a search query (case-insensitive)
    pub fn matches(&self, query: &str) -> bool {
        self.matches_lowercase(&query.to_lowercase())
    }

    /// Match against a query that is already lower-cased.
    ///
    /// The haystack is `label + " " + description + " " + search_text`, so a
    /// query may span the boundary between two fields.
    pub(crate) fn matches_lowercase(&self, query_lower: &str) -> bool {
        if query_lower.is_empty() {
            return true;
        }
        let haystack = format!(
            "{} {} {}",
            self.label,
            self.description.as_deref().unwrap_or(""),
            self.search_text.as_deref().unwrap_or("")
        );
        haystack.to_lowercase().contains(query_lower)
    }
}
