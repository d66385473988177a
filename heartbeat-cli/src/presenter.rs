//! Terminal presentation
//!
//! Renders poll ticks and the final run summary. Rendering is split from
//! printing so the output can be checked without capturing stdout.

use colored::*;
use heartbeat_core::domain::{Classification, JobRun, classify};
use tracing::error;

/// Marker printed in place of a summary when the run record is unusable
pub const MALFORMED_MARKER: &str = "Error: Invalid job data format";

/// Render the banner shown before the first poll
pub fn render_start(run_id: u64) -> String {
    format!("Starting to poll job run {}", run_id)
        .blue()
        .bold()
        .to_string()
}

/// Render the one-line status shown on every poll tick
pub fn render_tick(run: &JobRun, classification: Classification) -> String {
    let line = format!(
        "Current status: {} (Duration: {})",
        run.status(),
        run.duration()
    );

    match classification {
        Classification::Success => line.green().to_string(),
        Classification::Error => line.red().to_string(),
        Classification::InProgress => line.yellow().to_string(),
        Classification::Unknown => line,
    }
}

/// Render a failed poll attempt that will be retried
pub fn render_poll_error(err: &dyn std::fmt::Display) -> String {
    format!("Error polling job status: {}", err).red().to_string()
}

/// Render the final run summary
///
/// A malformed record renders as [`MALFORMED_MARKER`] and is logged; this
/// never fails.
pub fn render_summary(run: &JobRun, job_name: &str) -> String {
    if run.is_malformed() {
        error!("No data field in job response");
        return MALFORMED_MARKER.red().to_string();
    }

    let classification = classify(run);
    let mut out = Vec::new();

    out.push(format!("{}", "dbt Cloud Job Status".bold()));
    out.push(format!("  Job Name:        {}", job_name.cyan()));
    out.push(format!("  Run ID:          {}", run.run_id().dimmed()));
    out.push(format!(
        "  Status:          {}",
        colorize_status(run.status(), classification)
    ));
    out.push(format!("  Duration:        {}", run.duration()));
    out.push(format!("  Run Duration:    {}", run.run_duration()));
    out.push(format!("  Queued Duration: {}", run.queued_duration()));

    if let Some(finished) = &run.finished_at {
        out.push(format!("  Finished:        {}", finished));
    }

    if let Some(href) = &run.href {
        out.push(format!("  Run URL:         {}", href.dimmed()));
    }

    if classification == Classification::Error {
        out.push(format!("\n{}", "Error:".bold()));
        out.push(format!("{}", run.error_message().red()));
    }

    out.join("\n")
}

/// Render the closing line printed after the summary
pub fn render_completion(run: &JobRun) -> String {
    format!("Job completed with status: {}", run.status())
        .bold()
        .to_string()
}

/// Print the start banner
pub fn print_start(run_id: u64) {
    println!("{}", render_start(run_id));
}

/// Print a poll tick
pub fn print_tick(run: &JobRun, classification: Classification) {
    println!("{}", render_tick(run, classification));
}

/// Print a retried poll failure
pub fn print_poll_error(err: &dyn std::fmt::Display) {
    println!("{}", render_poll_error(err));
}

/// Print the final summary
pub fn print_summary(run: &JobRun, job_name: &str) {
    println!();
    println!("{}", render_summary(run, job_name));
    println!();
}

/// Print the closing line
pub fn print_completion(run: &JobRun) {
    println!("{}", render_completion(run));
}

/// Colorize a run status for display
fn colorize_status(status: &str, classification: Classification) -> ColoredString {
    match classification {
        Classification::Success => status.green(),
        Classification::Error => status.red(),
        Classification::InProgress => status.yellow(),
        Classification::Unknown => status.normal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished_run(is_success: bool) -> JobRun {
        JobRun {
            id: Some(12345),
            job_id: Some(67890),
            status_humanized: Some(if is_success { "Success" } else { "Error" }.to_string()),
            duration_humanized: Some("4 minutes, 20 seconds".to_string()),
            run_duration_humanized: Some("4 minutes, 15 seconds".to_string()),
            queued_duration_humanized: Some("5 seconds".to_string()),
            is_success,
            is_error: !is_success,
            in_progress: false,
            status_message: (!is_success).then(|| "Database Error in model orders".to_string()),
            finished_at: Some("11:11 AM".to_string()),
            href: None,
        }
    }

    #[test]
    fn test_render_tick_contains_status_and_duration() {
        let run = finished_run(true);
        let line = render_tick(&run, Classification::Success);
        assert!(line.contains("Current status: Success (Duration: 4 minutes, 20 seconds)"));
    }

    #[test]
    fn test_render_tick_unknown_is_uncolored() {
        let run = JobRun::default();
        assert_eq!(
            render_tick(&run, Classification::Unknown),
            "Current status: Unknown (Duration: Unknown)"
        );
    }

    #[test]
    fn test_render_summary_success() {
        let summary = render_summary(&finished_run(true), "Test Job");

        assert!(summary.contains("Test Job"));
        assert!(summary.contains("12345"));
        assert!(summary.contains("Success"));
        assert!(summary.contains("4 minutes, 20 seconds"));
        assert!(summary.contains("4 minutes, 15 seconds"));
        assert!(summary.contains("5 seconds"));
        assert!(summary.contains("11:11 AM"));
        assert!(!summary.contains("Error:"));
    }

    #[test]
    fn test_render_summary_error_includes_message() {
        let summary = render_summary(&finished_run(false), "Test Job");

        assert!(summary.contains("Error:"));
        assert!(summary.contains("Database Error in model orders"));
    }

    #[test]
    fn test_render_summary_error_without_message() {
        let mut run = finished_run(false);
        run.status_message = None;

        let summary = render_summary(&run, "Test Job");
        assert!(summary.contains("No error message available"));
    }

    #[test]
    fn test_render_summary_missing_fields_show_unknown() {
        let run = JobRun {
            id: Some(1),
            is_success: true,
            ..Default::default()
        };

        let summary = render_summary(&run, "Unknown");
        assert!(summary.contains("Duration:        Unknown"));
        assert!(summary.contains("Queued Duration: Unknown"));
    }

    #[test]
    fn test_render_summary_malformed_prints_marker() {
        let summary = render_summary(&JobRun::default(), "Unknown");
        assert!(summary.contains(MALFORMED_MARKER));
        assert!(!summary.contains("Job Name"));
    }
}
