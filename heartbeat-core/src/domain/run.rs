//! Job run domain types

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder rendered for any field the API left out
pub const UNKNOWN: &str = "Unknown";

/// Snapshot of a single dbt Cloud job run
///
/// A fresh snapshot is fetched on every poll tick. Every field is optional
/// because the upstream payload is not guaranteed to be complete; the
/// accessors below substitute [`UNKNOWN`] for missing strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRun {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub job_id: Option<u64>,
    #[serde(default)]
    pub status_humanized: Option<String>,
    #[serde(default)]
    pub duration_humanized: Option<String>,
    #[serde(default)]
    pub run_duration_humanized: Option<String>,
    #[serde(default)]
    pub queued_duration_humanized: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub is_success: bool,
    #[serde(default, deserialize_with = "flag")]
    pub is_error: bool,
    #[serde(default, deserialize_with = "flag")]
    pub in_progress: bool,
    /// Error text reported by dbt Cloud for failed runs
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub finished_at: Option<String>,
    /// Link to the run in the dbt Cloud UI
    #[serde(default)]
    pub href: Option<String>,
}

/// Status flag as the API may send it
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// Reads a status flag by truthiness: `null` is false, numbers are true when
/// non-zero, strings are true for `"true"` and `"1"`
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawFlag>::deserialize(deserializer)? {
        None => false,
        Some(RawFlag::Bool(value)) => value,
        Some(RawFlag::Int(value)) => value != 0,
        Some(RawFlag::Text(value)) => {
            matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1")
        }
    })
}

impl JobRun {
    /// Returns true when the payload carried none of the identifying fields
    ///
    /// An empty or missing `data` object deserializes into this state.
    pub fn is_malformed(&self) -> bool {
        self.id.is_none() && self.job_id.is_none() && self.status_humanized.is_none()
    }

    pub fn status(&self) -> &str {
        self.status_humanized.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn duration(&self) -> &str {
        self.duration_humanized.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn run_duration(&self) -> &str {
        self.run_duration_humanized.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn queued_duration(&self) -> &str {
        self.queued_duration_humanized.as_deref().unwrap_or(UNKNOWN)
    }

    /// Run id as display text
    pub fn run_id(&self) -> String {
        self.id
            .map(|id| id.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Error text for failed runs, with a fixed fallback when dbt sent none
    pub fn error_message(&self) -> &str {
        self.status_message
            .as_deref()
            .filter(|msg| !msg.trim().is_empty())
            .unwrap_or("No error message available")
    }
}
