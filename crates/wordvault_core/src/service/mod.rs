//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep transport layers decoupled from storage details.

pub mod account_service;
pub mod word_list_service;
pub mod word_service;

/// Current wall-clock time in epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Collapses empty or whitespace-only search input to "no filter".
pub(crate) fn normalize_filter(filter: Option<&str>) -> Option<String> {
    match filter.map(str::trim) {
        None | Some("") => None,
        Some(needle) => Some(needle.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_filter;

    #[test]
    fn blank_filters_collapse_to_none() {
        assert_eq!(normalize_filter(None), None);
        assert_eq!(normalize_filter(Some("")), None);
        assert_eq!(normalize_filter(Some("   ")), None);
        assert_eq!(normalize_filter(Some(" cat ")), Some("cat".to_string()));
    }
}
