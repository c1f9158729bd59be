//! Status badges

use voxdial_core::{CallStatus, CampaignStatus};

/// Badge for a call status
#[must_use]
pub fn call_status(status: CallStatus) -> String {
    badge(status.badge_class(), status.label())
}

/// Badge for a campaign status
#[must_use]
pub fn campaign_status(status: CampaignStatus) -> String {
    badge(status.badge_class(), status.label())
}

fn badge(class: &str, label: &str) -> String {
    format!(r#"<span class="{class}">{label}</span>"#)
}
