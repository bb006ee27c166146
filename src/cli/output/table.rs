//! Table output formatting for CLI commands
//!
//! Renders secrets entries with comfy-table. Values are never shown.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::cli::commands::secrets::SecretEntry;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub const fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format injected secrets entries as a table
    pub fn format_secrets(&self, entries: &[SecretEntry]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("Key").add_attribute(Attribute::Bold),
            Cell::new("Type").add_attribute(Attribute::Bold),
            Cell::new("Overrides").add_attribute(Attribute::Bold),
        ]);

        for entry in entries {
            let overrides = if entry.overrides_static { "yes" } else { "-" };
            let overrides_cell = if self.use_colors && entry.overrides_static {
                Cell::new(overrides).fg(Color::Yellow)
            } else {
                Cell::new(overrides)
            };

            table.add_row(vec![
                Cell::new(truncate_text(&entry.key, 48)),
                Cell::new(entry.value_type),
                overrides_cell,
            ]);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        // Use UTF-8 preset for nice borders
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check for dumb terminal
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}

fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
