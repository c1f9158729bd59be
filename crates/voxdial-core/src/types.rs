//! Data transfer objects mirrored from the backend API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

/// Outcome state of a call as reported by the telephony backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    /// The callee picked up
    Answered,
    /// The call ran to completion
    Completed,
    /// Dialing or the call itself failed
    Failed,
    /// Nobody answered
    NoAnswer,
    /// The line was busy
    Busy,
    /// The call is still running
    InProgress,
    /// Any status this dashboard does not know about
    #[serde(other)]
    Other,
}

impl CallStatus {
    /// Label shown to users
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Answered => "Answered",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::NoAnswer => "No Answer",
            Self::Busy => "Busy",
            Self::InProgress => "In Progress",
            Self::Other => "Unknown",
        }
    }

    /// CSS class of the status badge
    #[must_use]
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Answered | Self::Completed => "badge badge-success",
            Self::Failed => "badge badge-danger",
            Self::NoAnswer | Self::Busy => "badge badge-warning",
            Self::InProgress => "badge badge-info",
            Self::Other => "badge",
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Speaker of a transcript turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptRole {
    /// The person who was called
    User,
    /// The AI voice agent
    Assistant,
}

impl TranscriptRole {
    /// Label shown next to the turn
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "Contact",
            Self::Assistant => "Agent",
        }
    }
}

/// One utterance in a call transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptTurn {
    /// Who spoke
    pub role: TranscriptRole,
    /// What was said
    pub content: String,
    /// When it was said
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// A single outbound or inbound call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    /// Call identifier
    pub id: String,
    /// Dialed number
    pub phone_number: String,
    /// Call state
    pub status: CallStatus,
    /// Free-text outcome recorded by the agent
    #[serde(default)]
    pub outcome: Option<String>,
    /// Duration in seconds
    #[serde(default, deserialize_with = "deserialize_seconds")]
    pub duration_seconds: Option<u64>,
    /// When the call was created
    pub created_at: DateTime<Utc>,
    /// AI generated summary
    #[serde(default)]
    pub summary: Option<String>,
    /// Link to the call recording
    #[serde(default)]
    pub recording_url: Option<String>,
    /// Transcript, when the backend embeds it
    #[serde(default)]
    pub transcript: Option<Vec<TranscriptTurn>>,
}

/// One page of the call listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallsPage {
    /// Calls on this page
    #[serde(default)]
    pub calls: Vec<Call>,
    /// Total number of calls across all pages
    #[serde(default)]
    pub total: u64,
    /// Page number (1-based)
    #[serde(default = "default_page")]
    pub page: u32,
    /// Requested page size
    #[serde(default)]
    pub page_size: u32,
}

const fn default_page() -> u32 {
    1
}

/// The transcript of a call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Call the transcript belongs to
    #[serde(default)]
    pub call_id: String,
    /// Ordered turns
    #[serde(default)]
    pub turns: Vec<TranscriptTurn>,
}

impl Transcript {
    /// Counters derived from the turns
    #[must_use]
    pub fn stats(&self) -> TranscriptStats {
        TranscriptStats::from_turns(&self.turns)
    }
}

/// Counters kept alongside a transcript
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptStats {
    /// Number of turns
    pub turn_count: usize,
    /// Number of whitespace separated words over all turns
    pub word_count: usize,
    /// Turn contents joined by newlines
    pub full_text: String,
}

impl TranscriptStats {
    /// Compute the counters for a slice of turns
    #[must_use]
    pub fn from_turns(turns: &[TranscriptTurn]) -> Self {
        let word_count = turns
            .iter()
            .map(|turn| turn.content.split_whitespace().count())
            .sum();
        let full_text = turns
            .iter()
            .map(|turn| turn.content.trim())
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            turn_count: turns.len(),
            word_count,
            full_text,
        }
    }
}

/// Lifecycle of a campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    /// Not started yet
    Draft,
    /// Dialing leads
    Running,
    /// Temporarily stopped
    Paused,
    /// All leads processed
    Completed,
    /// Any status this dashboard does not know about
    #[serde(other)]
    Other,
}

impl CampaignStatus {
    /// Label shown to users
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Running => "Running",
            Self::Paused => "Paused",
            Self::Completed => "Completed",
            Self::Other => "Unknown",
        }
    }

    /// CSS class of the status badge
    #[must_use]
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Draft | Self::Other => "badge",
            Self::Running => "badge badge-success",
            Self::Paused => "badge badge-warning",
            Self::Completed => "badge badge-info",
        }
    }
}

/// A calling campaign driven by an AI agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// Campaign identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Instructions given to the voice agent
    #[serde(default)]
    pub system_prompt: String,
    /// Selected voice
    #[serde(default)]
    pub voice: Option<String>,
    /// What the campaign tries to achieve
    #[serde(default)]
    pub goal: Option<String>,
    /// Lifecycle state
    pub status: CampaignStatus,
    /// Leads attached to the campaign
    #[serde(default)]
    pub total_leads: u64,
    /// Calls placed so far
    #[serde(default)]
    pub calls_made: u64,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Voices offered on the campaign form
pub const VOICE_OPTIONS: &[(&str, &str)] = &[
    ("alloy", "Alloy (neutral)"),
    ("echo", "Echo (male)"),
    ("nova", "Nova (female)"),
    ("shimmer", "Shimmer (warm)"),
];

/// Payload for creating a campaign
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewCampaign {
    /// Display name
    #[validate(custom(function = "validate_campaign_name"))]
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Instructions given to the voice agent
    #[validate(custom(function = "validate_system_prompt"))]
    pub system_prompt: String,
    /// Selected voice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    /// What the campaign tries to achieve
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

impl NewCampaign {
    /// Validate the form, reporting the first failing field in form order
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] when the name or system prompt is blank.
    pub fn check(&self) -> crate::Result<()> {
        let Err(errors) = self.validate() else {
            return Ok(());
        };
        let field_errors = errors.field_errors();

        for field in ["name", "system_prompt"] {
            if let Some(message) = field_errors
                .get(field)
                .and_then(|errs| errs.first())
                .and_then(|err| err.message.as_ref())
            {
                return Err(crate::Error::validation(field, message.to_string()));
            }
        }

        Err(crate::Error::validation("campaign", errors.to_string()))
    }

    /// Trim every field and drop empty optional ones
    #[must_use]
    pub fn normalized(self) -> Self {
        fn optional(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            name: self.name.trim().to_string(),
            description: optional(self.description),
            system_prompt: self.system_prompt.trim().to_string(),
            voice: optional(self.voice),
            goal: optional(self.goal),
        }
    }
}

fn required(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(message.into()));
    }
    Ok(())
}

fn validate_campaign_name(name: &str) -> Result<(), ValidationError> {
    required(name, "Campaign name is required")
}

fn validate_system_prompt(prompt: &str) -> Result<(), ValidationError> {
    required(prompt, "System prompt is required")
}

/// Aggregate counters shown on the dashboard home page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// All calls placed
    #[serde(default)]
    pub total_calls: u64,
    /// Calls that were answered
    #[serde(default)]
    pub answered_calls: u64,
    /// Calls that failed
    #[serde(default)]
    pub failed_calls: u64,
    /// Campaigns currently running
    #[serde(default)]
    pub active_campaigns: u64,
    /// Minutes consumed in the billing period
    #[serde(default)]
    pub minutes_used: f64,
    /// Minutes left in the billing period
    #[serde(default)]
    pub minutes_remaining: f64,
}

impl DashboardSummary {
    /// Percentage of calls that were answered, 0 when no calls were made
    #[must_use]
    pub fn answer_rate(&self) -> f64 {
        if self.total_calls == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let rate = self.answered_calls as f64 / self.total_calls as f64 * 100.0;
        rate
    }
}

/// A row the backend could not import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRowError {
    /// Row number in the uploaded file
    pub row: u64,
    /// Phone number as found in the row
    #[serde(default)]
    pub phone: String,
    /// Why the row was rejected
    pub error: String,
}

/// Result of a contacts CSV upload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkImportResult {
    /// Data rows in the file
    #[serde(default)]
    pub total_rows: u64,
    /// Contacts created
    #[serde(default)]
    pub imported: u64,
    /// Rows skipped because the phone number already exists
    #[serde(default)]
    pub duplicates_skipped: u64,
    /// Rows that failed
    #[serde(default)]
    pub failed: u64,
    /// Per-row failures, in file order
    #[serde(default)]
    pub errors: Vec<ImportRowError>,
}

impl BulkImportResult {
    /// Whether some rows were rejected
    #[must_use]
    pub fn has_row_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Tokens delivered by the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthTokens {
    /// Bearer token for backend calls
    pub access_token: String,
    /// Token used to renew the session
    pub refresh_token: Option<String>,
}

/// Accepts whole or fractional seconds
fn deserialize_seconds<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seconds {
        Whole(u64),
        Fractional(f64),
    }

    Ok(match Option::<Seconds>::deserialize(deserializer)? {
        Some(Seconds::Whole(secs)) => Some(secs),
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(Seconds::Fractional(secs)) if secs.is_finite() && secs >= 0.0 => {
            Some(secs.round() as u64)
        }
        Some(Seconds::Fractional(_)) | None => None,
    })
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn call_json(extra: &str) -> String {
        format!(
            r#"{{"id":"c1","phone_number":"+15550100","status":"answered",
                "created_at":"2024-05-01T12:00:00Z"{extra}}}"#
        )
    }

    #[rstest]
    #[case("answered", CallStatus::Answered)]
    #[case("completed", CallStatus::Completed)]
    #[case("failed", CallStatus::Failed)]
    #[case("no_answer", CallStatus::NoAnswer)]
    #[case("busy", CallStatus::Busy)]
    #[case("in_progress", CallStatus::InProgress)]
    #[case("voicemail", CallStatus::Other)]
    fn test_call_status_wire_values(#[case] wire: &str, #[case] expected: CallStatus) {
        let status: CallStatus = serde_json::from_str(&format!("\"{wire}\"")).unwrap();
        assert_eq!(status, expected);
    }

    #[test]
    fn test_call_minimal_payload() {
        let call: Call = serde_json::from_str(&call_json("")).unwrap();

        assert_eq!(call.id, "c1");
        assert_eq!(call.status, CallStatus::Answered);
        assert!(call.duration_seconds.is_none());
        assert!(call.summary.is_none());
        assert!(call.transcript.is_none());
    }

    #[rstest]
    #[case(r#","duration_seconds":125"#, Some(125))]
    #[case(r#","duration_seconds":124.6"#, Some(125))]
    #[case(r#","duration_seconds":null"#, None)]
    #[case(r#","duration_seconds":-3.0"#, None)]
    fn test_call_duration_forms(#[case] extra: &str, #[case] expected: Option<u64>) {
        let call: Call = serde_json::from_str(&call_json(extra)).unwrap();
        assert_eq!(call.duration_seconds, expected);
    }

    #[test]
    fn test_call_with_embedded_transcript() {
        let extra = r#","transcript":[
            {"role":"assistant","content":"Hi, this is Ava","timestamp":"2024-05-01T12:00:01Z"},
            {"role":"user","content":"Hello"}]"#;
        let call: Call = serde_json::from_str(&call_json(extra)).unwrap();
        let turns = call.transcript.unwrap();

        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, TranscriptRole::Assistant);
        assert!(turns[0].timestamp.is_some());
        assert!(turns[1].timestamp.is_none());
    }

    #[test]
    fn test_transcript_stats() {
        let transcript = Transcript {
            call_id: "c1".to_string(),
            turns: vec![
                TranscriptTurn {
                    role: TranscriptRole::Assistant,
                    content: "Hi there, how are you?".to_string(),
                    timestamp: None,
                },
                TranscriptTurn {
                    role: TranscriptRole::User,
                    content: "  Fine thanks ".to_string(),
                    timestamp: None,
                },
            ],
        };

        let stats = transcript.stats();
        assert_eq!(stats.turn_count, 2);
        assert_eq!(stats.word_count, 7);
        assert_eq!(stats.full_text, "Hi there, how are you?\nFine thanks");
    }

    #[test]
    fn test_empty_transcript_stats() {
        assert_eq!(TranscriptStats::from_turns(&[]), TranscriptStats::default());
    }

    #[test]
    fn test_calls_page_defaults() {
        let page: CallsPage = serde_json::from_str(r#"{"calls":[]}"#).unwrap();
        assert!(page.calls.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_new_campaign_requires_name_first() {
        let campaign = NewCampaign::default();
        let err = campaign.check().unwrap_err();

        assert_eq!(err.user_message(), "Campaign name is required");
        assert!(matches!(err, crate::Error::Validation { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_new_campaign_requires_prompt() {
        let campaign = NewCampaign {
            name: "Spring renewals".to_string(),
            system_prompt: "   ".to_string(),
            ..NewCampaign::default()
        };

        assert_eq!(
            campaign.check().unwrap_err().user_message(),
            "System prompt is required"
        );
    }

    #[test]
    fn test_new_campaign_valid() {
        let campaign = NewCampaign {
            name: "Spring renewals".to_string(),
            system_prompt: "You are a friendly renewals agent.".to_string(),
            ..NewCampaign::default()
        };
        assert!(campaign.check().is_ok());
    }

    #[test]
    fn test_new_campaign_normalized_drops_blank_optionals() {
        let campaign = NewCampaign {
            name: "  Renewals ".to_string(),
            description: Some("  ".to_string()),
            system_prompt: " Be kind ".to_string(),
            voice: Some("nova".to_string()),
            goal: Some(String::new()),
        }
        .normalized();

        assert_eq!(campaign.name, "Renewals");
        assert_eq!(campaign.system_prompt, "Be kind");
        assert_eq!(campaign.description, None);
        assert_eq!(campaign.voice.as_deref(), Some("nova"));
        assert_eq!(campaign.goal, None);

        let body = serde_json::to_value(&campaign).unwrap();
        assert!(body.get("description").is_none());
    }

    #[test]
    fn test_answer_rate() {
        let summary = DashboardSummary {
            total_calls: 40,
            answered_calls: 10,
            ..DashboardSummary::default()
        };
        assert!((summary.answer_rate() - 25.0).abs() < f64::EPSILON);
        assert!(DashboardSummary::default().answer_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn test_bulk_import_result() {
        let json = r#"{"total_rows":10,"imported":7,"duplicates_skipped":2,"failed":1,
            "errors":[{"row":5,"phone":"123","error":"invalid"}]}"#;
        let result: BulkImportResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.total_rows, 10);
        assert_eq!(result.imported, 7);
        assert_eq!(result.duplicates_skipped, 2);
        assert_eq!(result.failed, 1);
        assert!(result.has_row_errors());
        assert_eq!(
            result.errors[0],
            ImportRowError {
                row: 5,
                phone: "123".to_string(),
                error: "invalid".to_string(),
            }
        );
    }

    #[test]
    fn test_campaign_status_labels() {
        let campaign: Campaign = serde_json::from_str(
            r#"{"id":"k1","name":"Renewals","status":"running","total_leads":120}"#,
        )
        .unwrap();

        assert_eq!(campaign.status, CampaignStatus::Running);
        assert_eq!(campaign.status.label(), "Running");
        assert_eq!(campaign.total_leads, 120);
        assert_eq!(campaign.calls_made, 0);
    }

    #[test]
    fn test_unknown_campaign_status_keeps_listing() {
        let campaigns: Vec<Campaign> = serde_json::from_str(
            r#"[{"id":"k1","name":"Renewals","status":"running"},
                {"id":"k2","name":"Winback","status":"scheduled"}]"#,
        )
        .unwrap();

        let statuses: Vec<_> = campaigns.iter().map(|c| c.status).collect();
        assert_eq!(statuses, [CampaignStatus::Running, CampaignStatus::Other]);
        assert_eq!(CampaignStatus::Other.label(), "Unknown");
    }
}
