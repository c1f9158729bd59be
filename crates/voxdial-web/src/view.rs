//! Loading, failed and ready states of a page section

use tracing::warn;
use voxdial_core::Result;

/// What a page section currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// Data is being fetched
    Loading,
    /// Fetching failed; the message is shown inline
    Failed(String),
    /// Data is available
    Ready(T),
}

impl<T> ViewState<T> {
    /// Turn a fetch result into a view state, logging failures
    pub fn from_result(result: Result<T>, section: &str) -> Self {
        match result {
            Ok(data) => Self::Ready(data),
            Err(e) => {
                warn!(section, error = %e, "Failed to load page data");
                Self::Failed(e.user_message())
            }
        }
    }

    /// Whether data is available
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}
