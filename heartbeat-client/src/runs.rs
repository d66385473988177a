//! Run-related API endpoints

use crate::DbtCloudClient;
use crate::error::Result;
use heartbeat_core::domain::JobRun;
use tracing::debug;

impl DbtCloudClient {
    /// Get the current status of a job run
    ///
    /// Issues exactly one request; retrying is left to the caller.
    ///
    /// # Arguments
    /// * `run_id` - The dbt Cloud run id
    ///
    /// # Returns
    /// A snapshot of the run. Fields the API omitted are `None`.
    pub async fn get_run(&self, run_id: u64) -> Result<JobRun> {
        let url = format!("{}/runs/{}/", self.account_url(), run_id);
        debug!("Fetching run status: {}", url);

        let response = self.get(&url).send().await?;

        self.handle_response(response).await
    }
}
