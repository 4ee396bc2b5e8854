pub mod charts;
pub mod panels;

/// Text shown for a cell value; blank cells get a visible placeholder.
pub fn display_value(value: &str) -> &str {
    if value.is_empty() {
        "(blank)"
    } else {
        value
    }
}
