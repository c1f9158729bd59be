//! Audio player component for call recordings

use voxdial_core::utils::escape_html;

/// Recording player with a download link
#[must_use]
pub fn render(recording_url: &str) -> String {
    let url = escape_html(recording_url);
    format!(
        r#"<div class="audio-player">
<audio controls preload="none" src="{url}">Your browser does not support audio playback.</audio>
<a class="btn btn-sm" href="{url}" download>Download</a>
</div>"#
    )
}
