//! Job-related API endpoints

use crate::DbtCloudClient;
use crate::error::Result;
use heartbeat_core::domain::JobMetadata;
use tracing::debug;

impl DbtCloudClient {
    /// Get the static metadata of a job
    ///
    /// # Arguments
    /// * `job_id` - The dbt Cloud job id (a run's `job_id`)
    ///
    /// # Returns
    /// The job metadata; only the name is used by the monitor
    pub async fn get_job(&self, job_id: u64) -> Result<JobMetadata> {
        let url = format!("{}/jobs/{}/", self.account_url(), job_id);
        debug!("Fetching job details: {}", url);

        let response = self.get(&url).send().await?;

        self.handle_response(response).await
    }
}
