//! Desktop notifications
//!
//! Composes a short title/body pair for the final run state and hands it to
//! a [`NotificationSink`]. Delivery is best-effort: failures are logged and
//! never reach the caller.

use std::time::Duration;

use anyhow::Result;
use heartbeat_core::domain::{Classification, JobRun, classify};
use tracing::{debug, error, info};

/// How long the notification stays on screen
pub const DISPLAY_TIMEOUT: Duration = Duration::from_secs(10);

/// Platform sound played with the notification
pub const SOUND: &str = "default";

/// A composed notification, ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub sound: &'static str,
    pub timeout: Duration,
}

/// Trait for notification delivery backends
pub trait NotificationSink: Send + Sync {
    /// Deliver a notification
    fn deliver(&self, notice: &Notice) -> Result<()>;
}

/// Delivers notifications through the OS notification center
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifier;

impl NotificationSink for DesktopNotifier {
    fn deliver(&self, notice: &Notice) -> Result<()> {
        notify_rust::Notification::new()
            .summary(&notice.title)
            .body(&notice.body)
            .sound_name(notice.sound)
            .timeout(notify_rust::Timeout::Milliseconds(timeout_millis(
                notice.timeout,
            )))
            .show()
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

/// Display timeout in milliseconds, saturating at `u32::MAX`
fn timeout_millis(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX)
}

/// Compose the notification for a finished run
///
/// Returns `None` for a malformed record.
pub fn compose(run: &JobRun, job_name: &str) -> Option<Notice> {
    if run.is_malformed() {
        return None;
    }

    let classification = classify(run);
    let icon = match classification {
        Classification::Success => "✅",
        Classification::Error => "❌",
        _ => "⚠️",
    };

    let mut body = format!(
        "Job: {}\nStatus: {}\nDuration: {}",
        job_name,
        run.status(),
        run.duration()
    );

    if let Some(finished) = &run.finished_at {
        body.push_str(&format!("\nFinished: {}", finished));
    }

    if classification == Classification::Error {
        body.push_str(&format!("\nError: {}", run.error_message()));
    }

    Some(Notice {
        title: format!("{} dbt Job Status Update", icon),
        body,
        sound: SOUND,
        timeout: DISPLAY_TIMEOUT,
    })
}

/// Compose and deliver the completion notification
///
/// Returns whether a notification was handed to the sink successfully.
/// Nothing here propagates: a failed notification must not fail the run.
pub fn notify_completion(sink: &dyn NotificationSink, run: &JobRun, job_name: &str) -> bool {
    let Some(notice) = compose(run, job_name) else {
        error!("No data field in job response for notification");
        return false;
    };

    debug!("Sending notification: {:?}", notice);

    match sink.deliver(&notice) {
        Ok(()) => {
            info!("System notification sent successfully");
            true
        }
        Err(e) => {
            error!("Failed to send system notification: {:#}", e);
            false
        }
    }
}
