//! Run poller
//!
//! Polls a single job run until it reaches an outcome. Each tick is one
//! fetch followed, while the run is still going, by one sleep. There is no
//! overlap between fetches and no backoff.

use std::time::Duration;

use heartbeat_client::{ClientError, RunSource};
use heartbeat_core::domain::{JobRun, UNKNOWN, classify};
use tokio::time;
use tracing::{debug, info, warn};

use crate::presenter;

/// Polls `run_id` every `interval` until the run succeeds or fails
///
/// Runs that are in progress, or whose flags are all unset, keep the loop
/// going. Retryable fetch errors are reported and retried after the same
/// interval, indefinitely. Any other error is returned immediately, without
/// sleeping.
///
/// # Returns
/// The last snapshot fetched, whose classification is Success or Error
pub async fn poll_run(
    source: &dyn RunSource,
    run_id: u64,
    interval: Duration,
) -> Result<JobRun, ClientError> {
    info!(
        "Starting to poll job run {} with interval {:?}",
        run_id, interval
    );
    presenter::print_start(run_id);

    loop {
        debug!("Fetching job status...");

        match source.fetch_run(run_id).await {
            Ok(run) => {
                if run.is_malformed() {
                    warn!("No data field in job response for run {}", run_id);
                }

                let classification = classify(&run);
                debug!(
                    "Current status: {}, Duration: {}, Classification: {:?}",
                    run.status(),
                    run.duration(),
                    classification
                );
                presenter::print_tick(&run, classification);

                if classification.is_terminal() {
                    info!("Job is no longer in progress");
                    return Ok(run);
                }

                debug!(
                    "Job still in progress, waiting {:?} before next poll",
                    interval
                );
            }
            Err(e) if e.is_retryable() => {
                warn!("Error polling job status: {}", e);
                presenter::print_poll_error(&e);
            }
            Err(e) => return Err(e),
        }

        time::sleep(interval).await;
    }
}

/// Resolves the display name of the job a run belongs to
///
/// Any failure degrades to `Unknown`.
pub async fn resolve_job_name(source: &dyn RunSource, run: &JobRun) -> String {
    let Some(job_id) = run.job_id else {
        debug!("Run has no job id, job name unknown");
        return UNKNOWN.to_string();
    };

    match source.fetch_job(job_id).await {
        Ok(job) => job.display_name().to_string(),
        Err(e) => {
            warn!("Failed to fetch job details for job {}: {}", job_id, e);
            UNKNOWN.to_string()
        }
    }
}
