//! Run status classification
//!
//! dbt Cloud reports a run's state through three independent flags. The
//! monitor collapses them into a single [`Classification`] that drives both
//! terminal colouring and notification iconography.

use super::run::JobRun;

/// Outcome of classifying a run snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Success,
    Error,
    InProgress,
    Unknown,
}

impl Classification {
    /// Returns true when polling should stop
    ///
    /// `Unknown` keeps the loop going, exactly like `InProgress`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

/// Classifies a run snapshot
///
/// Success and error are checked before `in_progress`, so a record with
/// conflicting flags is never reported as still running once it has an
/// outcome.
pub fn classify(run: &JobRun) -> Classification {
    if run.is_success {
        Classification::Success
    } else if run.is_error {
        Classification::Error
    } else if run.in_progress {
        Classification::InProgress
    } else {
        Classification::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with(is_success: bool, is_error: bool, in_progress: bool) -> JobRun {
        JobRun {
            is_success,
            is_error,
            in_progress,
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_single_flags() {
        assert_eq!(
            classify(&run_with(true, false, false)),
            Classification::Success
        );
        assert_eq!(classify(&run_with(false, true, false)), Classification::Error);
        assert_eq!(
            classify(&run_with(false, false, true)),
            Classification::InProgress
        );
        assert_eq!(
            classify(&run_with(false, false, false)),
            Classification::Unknown
        );
    }

    #[test]
    fn test_outcome_flags_win_over_in_progress() {
        assert_eq!(classify(&run_with(true, false, true)), Classification::Success);
        assert_eq!(classify(&run_with(false, true, true)), Classification::Error);
        assert_eq!(classify(&run_with(true, true, true)), Classification::Success);
    }

    #[test]
    fn test_is_terminal() {
        assert!(Classification::Success.is_terminal());
        assert!(Classification::Error.is_terminal());
        assert!(!Classification::InProgress.is_terminal());
        assert!(!Classification::Unknown.is_terminal());
    }
}
