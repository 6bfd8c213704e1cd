//! Simulated upstream
//!
//! Stands in for the inference API when `USE_MOCK_UPSTREAM` is on, so the
//! full submit/poll/resolve workflow can be exercised without spending API
//! credits. A synthetic job moves through scripted windows measured from
//! the creation instant embedded in its handle: processing first, then a
//! settle window where roughly half of all jobs fail, then ready for good.

use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use mirage_core::dto::status::StatusReport;

/// How long a synthetic job reports `processing`.
const PROCESSING_WINDOW_MS: i64 = 5_000;
/// Age at which the settle window ends and every job reports `ready`.
const SETTLE_WINDOW_MS: i64 = 10_000;

/// Output URI every successful synthetic job resolves to.
pub const SAMPLE_OUTPUT_URL: &str =
    "https://images.unsplash.com/photo-1579546929518-9e396f3cc809?q=80&w=1000&auto=format&fit=crop";

const PROCESSING_MESSAGE: &str =
    "Simulated response - image generation in progress (no API credits used)";
const READY_MESSAGE: &str =
    "Simulated response - image generated successfully (no API credits used)";
const FAILED_ERROR: &str = "Simulated response - image generation failed";
const FAILED_DETAIL: &str = "This is a simulated failure for testing purposes";

/// Resolve a synthetic job's status from its age alone.
///
/// The settle-window outcome is derived from the handle's uuid rather than
/// rolled per poll, so repeated polls inside the window always agree. Once
/// the window closes every job reports ready, including one that reported
/// failed while the window was open.
pub fn resolve(id: Uuid, created_at: DateTime<Utc>, now: DateTime<Utc>) -> StatusReport {
    let age = now - created_at;

    if age < TimeDelta::milliseconds(PROCESSING_WINDOW_MS) {
        return StatusReport::Processing {
            message: Some(PROCESSING_MESSAGE.to_string()),
        };
    }

    if age < TimeDelta::milliseconds(SETTLE_WINDOW_MS) && !settles_ready(&id) {
        return StatusReport::failed(FAILED_ERROR, FAILED_DETAIL);
    }

    StatusReport::Ready {
        output: vec![SAMPLE_OUTPUT_URL.to_string()],
        message: Some(READY_MESSAGE.to_string()),
    }
}

/// Roughly half of all handles succeed inside the settle window.
fn settles_ready(id: &Uuid) -> bool {
    id.as_bytes()[0] % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lucky_id() -> Uuid {
        Uuid::from_bytes([0; 16])
    }

    fn unlucky_id() -> Uuid {
        let mut bytes = [0; 16];
        bytes[0] = 1;
        Uuid::from_bytes(bytes)
    }

    fn at_age(seconds: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        let now = Utc::now();
        (now - TimeDelta::seconds(seconds), now)
    }

    #[test]
    fn young_jobs_report_processing() {
        let (created_at, now) = at_age(1);

        let report = resolve(unlucky_id(), created_at, now);
        assert!(matches!(report, StatusReport::Processing { .. }));
    }

    #[test]
    fn settle_window_outcome_depends_on_the_handle() {
        let (created_at, now) = at_age(7);

        assert!(matches!(
            resolve(lucky_id(), created_at, now),
            StatusReport::Ready { .. }
        ));
        assert!(matches!(
            resolve(unlucky_id(), created_at, now),
            StatusReport::Failed { .. }
        ));
    }

    #[test]
    fn settle_window_outcome_is_stable_across_polls() {
        let now = Utc::now();
        let created_at = now - TimeDelta::seconds(6);

        let first = resolve(unlucky_id(), created_at, now);
        let again = resolve(unlucky_id(), created_at, now + TimeDelta::seconds(2));

        assert!(matches!(first, StatusReport::Failed { .. }));
        assert!(matches!(again, StatusReport::Failed { .. }));
    }

    #[test]
    fn settle_window_failures_turn_ready_once_the_window_closes() {
        let now = Utc::now();
        let created_at = now - TimeDelta::seconds(7);

        let settling = resolve(unlucky_id(), created_at, now);
        let settled = resolve(unlucky_id(), created_at, now + TimeDelta::seconds(5));

        assert!(matches!(settling, StatusReport::Failed { .. }));
        assert!(matches!(settled, StatusReport::Ready { .. }));
    }

    #[test]
    fn old_jobs_always_report_ready() {
        let (created_at, now) = at_age(11);

        let report = resolve(unlucky_id(), created_at, now);
        match report {
            StatusReport::Ready { output, .. } => {
                assert_eq!(output, vec![SAMPLE_OUTPUT_URL.to_string()]);
            }
            other => panic!("expected ready report, got {other:?}"),
        }
    }

    #[test]
    fn ready_reports_carry_a_non_empty_output() {
        let (created_at, now) = at_age(12);

        let report = resolve(lucky_id(), created_at, now);
        match report {
            StatusReport::Ready { output, .. } => assert!(!output.is_empty()),
            other => panic!("expected ready report, got {other:?}"),
        }
    }
}
