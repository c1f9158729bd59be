//! Formatting, validation and pagination helpers shared by the pages

use std::path::Path;

/// Placeholder shown when a value is missing
pub const MISSING: &str = "--";

/// Format a call duration as `m:ss`
///
/// Minutes are not capped at 60, so a 62 minute call renders as `62:05`.
#[must_use]
pub fn format_duration(seconds: Option<u64>) -> String {
    match seconds {
        Some(total) => format!("{}:{:02}", total / 60, total % 60),
        None => MISSING.to_string(),
    }
}

/// Format a minute counter with one decimal place
#[must_use]
pub fn format_minutes(minutes: f64) -> String {
    if minutes.is_finite() {
        format!("{minutes:.1}")
    } else {
        MISSING.to_string()
    }
}

/// Validate file extension
#[must_use]
pub fn validate_file_extension(filename: &str, allowed: &[&str]) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| allowed.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
}

/// Whether the file name looks like a CSV export
#[must_use]
pub fn is_csv_file(filename: &str) -> bool {
    validate_file_extension(filename, &["csv"])
}

/// Escape text for inclusion in HTML element content or attribute values
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Page position within a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    /// Current page (1-based)
    pub page: u32,
    /// Items per page
    pub page_size: u32,
    /// Total number of items
    pub total: u64,
}

impl Pager {
    /// Create a pager; a zero page size is treated as one
    #[must_use]
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            total,
        }
    }

    /// Number of pages, never less than one
    #[must_use]
    pub fn page_count(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.page_size.max(1)));
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }

    /// Whether a previous page exists
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    /// The next page, if navigation is allowed
    #[must_use]
    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }

    /// The previous page, if navigation is allowed
    #[must_use]
    pub fn prev(&self) -> Option<u32> {
        self.has_prev().then(|| self.page - 1)
    }

    /// The same pager with `page` moved into `1..=page_count`
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            page: self.page.clamp(1, self.page_count()),
            ..self
        }
    }

    /// Index of the first item on this page, for "Showing x-y of z"
    #[must_use]
    pub fn first_item(&self) -> u64 {
        if self.total == 0 {
            return 0;
        }
        u64::from(self.page - 1) * u64::from(self.page_size) + 1
    }

    /// Index of the last item on this page
    #[must_use]
    pub fn last_item(&self) -> u64 {
        (u64::from(self.page) * u64::from(self.page_size)).min(self.total)
    }
}
