//! Job domain types

use serde::{Deserialize, Serialize};

/// Static metadata of a dbt Cloud job
///
/// Only the fields the monitor displays are kept; everything else in the
/// payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMetadata {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl JobMetadata {
    /// Job name, or `Unknown` when the API did not return one
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(super::run::UNKNOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_unknown() {
        let job = JobMetadata::default();
        assert_eq!(job.display_name(), "Unknown");

        let job = JobMetadata {
            id: Some(67890),
            name: Some("Nightly build".to_string()),
        };
        assert_eq!(job.display_name(), "Nightly build");
    }
}
