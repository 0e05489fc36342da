//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats a count as "1 item" / "N items".
///
/// Usage in templates: `{{ cart.line_count|items_label }}`
#[askama::filter_fn]
pub fn items_label(count: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(pluralize_items(&count.to_string()))
}

fn pluralize_items(count: &str) -> String {
    if count == "1" {
        format!("{count} item")
    } else {
        format!("{count} items")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize_items() {
        assert_eq!(pluralize_items("0"), "0 items");
        assert_eq!(pluralize_items("1"), "1 item");
        assert_eq!(pluralize_items("12"), "12 items");
    }
}
