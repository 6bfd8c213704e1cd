//! Job domain types
//!
//! A generation job is identified by a [`JobHandle`] minted at submission
//! time and observed through [`JobStatus`] values until it reaches a
//! terminal state.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire prefix for synthetic handles.
const SYNTHETIC_PREFIX: &str = "sim-";

/// Identifier for one generation job.
///
/// The variant is decided once, at submission: handles issued by the
/// upstream inference API are `Real`, handles minted locally in mock mode
/// are `Synthetic` and embed their creation instant. Code downstream of
/// submission matches on the variant; nothing re-inspects the string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobHandle {
    /// Opaque identifier issued by the upstream inference API.
    Real(String),
    /// Locally minted identifier used when the upstream is bypassed.
    Synthetic {
        id: Uuid,
        created_at: DateTime<Utc>,
    },
}

impl JobHandle {
    /// Wraps an identifier received from the upstream API.
    pub fn real(id: impl Into<String>) -> Self {
        Self::Real(id.into())
    }

    /// Mints a fresh synthetic handle created now.
    ///
    /// The creation instant is truncated to the millisecond carried by the
    /// wire form, so a handle compares equal to itself after a round trip.
    pub fn synthetic() -> Self {
        let now = Utc::now();
        Self::Synthetic {
            id: Uuid::new_v4(),
            created_at: DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now),
        }
    }

    /// Builds a synthetic handle with an explicit creation instant.
    pub fn synthetic_at(id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self::Synthetic { id, created_at }
    }

    /// Whether this handle was minted locally rather than by the upstream.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic { .. })
    }

    /// Time elapsed since a synthetic handle was minted.
    ///
    /// `None` for real handles, whose lifecycle is tracked upstream.
    pub fn age(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        match self {
            Self::Real(_) => None,
            Self::Synthetic { created_at, .. } => Some(now - *created_at),
        }
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(id) => f.write_str(id),
            Self::Synthetic { id, created_at } => {
                write!(f, "{SYNTHETIC_PREFIX}{id}-{}", created_at.timestamp_millis())
            }
        }
    }
}

impl From<JobHandle> for String {
    fn from(handle: JobHandle) -> Self {
        handle.to_string()
    }
}

impl From<String> for JobHandle {
    /// Recovers the variant from the wire string.
    ///
    /// Synthetic handles round-trip as `sim-<uuid>-<millis>`. Anything that
    /// does not parse strictly, including `sim-` strings with a malformed
    /// tail, is treated as a real upstream identifier.
    fn from(raw: String) -> Self {
        if let Some(rest) = raw.strip_prefix(SYNTHETIC_PREFIX) {
            // The uuid itself contains hyphens; the millisecond suffix is
            // everything after the last one.
            if let Some((id, millis)) = rest.rsplit_once('-') {
                if let (Ok(id), Ok(millis)) = (Uuid::parse_str(id), millis.parse::<i64>()) {
                    if let Some(created_at) = DateTime::from_timestamp_millis(millis) {
                        return Self::Synthetic { id, created_at };
                    }
                }
            }
        }
        Self::Real(raw)
    }
}

impl From<&str> for JobHandle {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

/// Normalized status of a generation job.
///
/// Observation failures (network errors, malformed relay responses) are not
/// job states and never appear here; they surface as errors on the caller
/// side and leave the job's last known status untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// The job has been accepted and is still being generated.
    Processing,
    /// The job finished and produced at least one artifact URI.
    Ready { outputs: Vec<String> },
    /// The job failed upstream and will never produce output.
    Failed { detail: String },
}

impl JobStatus {
    /// Whether this status ends the job's lifecycle.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready { .. } | Self::Failed { .. })
    }

    /// First artifact URI of a ready job, if any.
    pub fn primary_output(&self) -> Option<&str> {
        match self {
            Self::Ready { outputs } => outputs.first().map(String::as_str),
            _ => None,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Processing => write!(f, "processing"),
            Self::Ready { .. } => write!(f, "ready"),
            Self::Failed { .. } => write!(f, "failed"),
        }
    }
}
