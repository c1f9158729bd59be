//! HTTP handlers

pub mod api;
pub mod auth;
pub mod fragments;
pub mod pages;

use serde::Deserialize;

/// `?page=N` on paged listings
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    /// Page number (1-based)
    pub page: Option<u32>,
}

impl PageQuery {
    /// Requested page, 1 when absent or zero
    #[must_use]
    pub fn page(self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
}
