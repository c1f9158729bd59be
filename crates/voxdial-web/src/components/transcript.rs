//! Transcript viewer

use voxdial_core::{TranscriptRole, TranscriptStats, TranscriptTurn, utils::escape_html};

/// Conversation turns with word and turn counts
#[must_use]
pub fn render(turns: &[TranscriptTurn]) -> String {
    if turns.is_empty() {
        return r#"<p class="muted">No transcript available for this call.</p>"#.to_string();
    }

    let stats = TranscriptStats::from_turns(turns);
    let items: String = turns.iter().map(turn).collect();

    format!(
        r#"<div class="transcript">
<p class="transcript-stats">{} turns, {} words</p>
<ol class="transcript-turns">{items}</ol>
</div>"#,
        stats.turn_count, stats.word_count
    )
}

fn turn(turn: &TranscriptTurn) -> String {
    let time = turn
        .timestamp
        .map(|ts| format!(r#"<time>{}</time>"#, ts.format("%H:%M:%S")))
        .unwrap_or_default();

    format!(
        r#"<li class="turn turn-{role}"><span class="turn-role">{label}</span>{time}<p>{content}</p></li>"#,
        role = match turn.role {
            TranscriptRole::User => "user",
            TranscriptRole::Assistant => "assistant",
        },
        label = turn.role.label(),
        content = escape_html(&turn.content),
    )
}
