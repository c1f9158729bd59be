//! Reusable HTML components

pub mod audio_player;
pub mod call_list;
pub mod error_banner;
pub mod import_results;
pub mod layout;
pub mod loading;
pub mod pagination;
pub mod status_badge;
pub mod transcript;
