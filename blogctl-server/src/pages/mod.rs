//! Server-rendered pages
//!
//! Templates are maud macros; every interpolated value is HTML-escaped.

mod templates;

use chrono::{DateTime, Utc};

pub use templates::{create_post_page, error_page, home_page, post_page, CreatePostForm};

/// Number of characters shown in a home-page excerpt
pub const EXCERPT_CHARS: usize = 100;

/// Presentation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSettings {
    pub site_title: String,
    /// Freshness hint for post pages, in seconds
    pub revalidate_secs: u64,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            site_title: "My Blog".to_string(),
            revalidate_secs: 60,
        }
    }
}

impl PageSettings {
    /// `Cache-Control` value for post pages.
    pub fn post_cache_control(&self) -> String {
        format!(
            "public, max-age=0, s-maxage={}, stale-while-revalidate",
            self.revalidate_secs
        )
    }
}

/// First 100 characters of the content followed by `...`.
pub fn excerpt(content: &str) -> String {
    let mut out: String = content.chars().take(EXCERPT_CHARS).collect();
    out.push_str("...");
    out
}

/// `YYYY-MM-DD`
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}
