//! Data Transfer Objects for the dbt Cloud API
//!
//! Every v2 endpoint wraps its payload in a `{ "status": ..., "data": ... }`
//! envelope. Only `data` is interesting to the monitor.

use serde::{Deserialize, Serialize};

/// Response envelope shared by all dbt Cloud v2 endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub data: Option<T>,
}

impl<T: Default> ApiEnvelope<T> {
    /// Unwraps the payload, substituting an empty record for a missing or
    /// `null` `data` field
    pub fn into_data(self) -> T {
        self.data.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{JobMetadata, JobRun};
    use serde_json::json;

    #[test]
    fn test_envelope_unwraps_data() {
        let envelope: ApiEnvelope<JobMetadata> = serde_json::from_value(json!({
            "status": { "code": 200, "is_success": true },
            "data": { "id": 67890, "name": "Test Job", "project_id": 1 }
        }))
        .unwrap();

        let job = envelope.into_data();
        assert_eq!(job.id, Some(67890));
        assert_eq!(job.display_name(), "Test Job");
    }

    #[test]
    fn test_missing_or_null_data_becomes_empty_record() {
        let missing: ApiEnvelope<JobRun> = serde_json::from_value(json!({})).unwrap();
        assert!(missing.into_data().is_malformed());

        let null: ApiEnvelope<JobRun> = serde_json::from_value(json!({ "data": null })).unwrap();
        assert!(null.into_data().is_malformed());
    }
}
