//! Run source abstraction
//!
//! The poll loop only needs two reads. Keeping them behind a trait lets the
//! loop be driven by a scripted source in tests.

use async_trait::async_trait;
use heartbeat_core::domain::{JobMetadata, JobRun};

use crate::DbtCloudClient;
use crate::error::Result;

/// Read-only access to job runs and job metadata
#[async_trait]
pub trait RunSource: Send + Sync {
    /// Fetches the current snapshot of a run
    ///
    /// # Arguments
    /// * `run_id` - The run to fetch
    async fn fetch_run(&self, run_id: u64) -> Result<JobRun>;

    /// Fetches the metadata of a job
    ///
    /// # Arguments
    /// * `job_id` - The job to fetch
    async fn fetch_job(&self, job_id: u64) -> Result<JobMetadata>;
}

#[async_trait]
impl RunSource for DbtCloudClient {
    async fn fetch_run(&self, run_id: u64) -> Result<JobRun> {
        self.get_run(run_id).await
    }

    async fn fetch_job(&self, job_id: u64) -> Result<JobMetadata> {
        self.get_job(job_id).await
    }
}
