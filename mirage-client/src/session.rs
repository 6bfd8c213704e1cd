//! Generation session
//!
//! Drives one submitted job from acceptance to a terminal outcome by
//! polling the relay on a fixed interval. Each session owns its own watch
//! task and cancel flag; the [`Generator`] guarantees at most one live
//! session at a time, so a new submission can never race an old loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::RelayClient;
use crate::config::PollConfig;
use crate::error::{ClientError, Result};
use mirage_core::domain::job::JobHandle;
use mirage_core::domain::request::GenerationRequest;
use mirage_core::dto::generate::SubmitResponse;
use mirage_core::dto::status::StatusReport;

/// Relay operations the polling loop depends on
///
/// [`RelayClient`] is the production implementation; tests script this
/// trait with in-memory doubles to exercise the loop without a server.
#[async_trait]
pub trait RelayApi: Send + Sync {
    /// Submit a generation request, returning the accepted job envelope
    async fn submit_generation(&self, request: &GenerationRequest) -> Result<SubmitResponse>;

    /// Fetch the current status report for a job
    async fn check_status(&self, handle: &JobHandle, api_key: &str) -> Result<StatusReport>;
}

#[async_trait]
impl RelayApi for RelayClient {
    async fn submit_generation(&self, request: &GenerationRequest) -> Result<SubmitResponse> {
        RelayClient::submit_generation(self, request).await
    }

    async fn check_status(&self, handle: &JobHandle, api_key: &str) -> Result<StatusReport> {
        RelayClient::check_status(self, handle, api_key).await
    }
}

/// How a polling session ended
#[derive(Debug)]
pub enum PollOutcome {
    /// The job completed; `outputs` holds the artifact URIs
    Ready { outputs: Vec<String> },
    /// The job failed upstream and will never complete
    Failed { detail: String },
    /// Too many consecutive failed observations
    RetriesExhausted { attempts: u32, last_error: ClientError },
    /// The session was cancelled before reaching a terminal status
    Cancelled,
}

/// One live polling session for a submitted job
///
/// The watch task re-checks the cancel flag before every poll, so a stale
/// session performs no further relay calls once cancelled even if the task
/// abort races an in-flight tick.
pub struct GenerationSession {
    job: JobHandle,
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<PollOutcome>,
}

impl GenerationSession {
    /// Spawns the watch task for an accepted job
    pub fn spawn(
        api: Arc<dyn RelayApi>,
        job: JobHandle,
        api_key: String,
        config: PollConfig,
    ) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let watched = job.clone();

        let task = tokio::spawn(async move { watch(api, watched, api_key, config, flag).await });

        Self {
            job,
            cancelled,
            task,
        }
    }

    /// The job this session is watching
    pub fn job(&self) -> &JobHandle {
        &self.job
    }

    /// Stops the session; no poll fires after this returns
    pub fn cancel(self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.task.abort();
        debug!(job = %self.job, "session cancelled");
    }

    /// Waits for the session's outcome
    pub async fn wait(self) -> PollOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => PollOutcome::Cancelled,
            Err(e) => {
                warn!(job = %self.job, error = %e, "watch task panicked");
                PollOutcome::Cancelled
            }
        }
    }
}

/// Submission front door holding at most one active session
///
/// Submitting while a session is live cancels it first, so two loops can
/// never poll concurrently, not even for different jobs.
pub struct Generator {
    api: Arc<dyn RelayApi>,
    config: PollConfig,
    session: Option<GenerationSession>,
}

impl Generator {
    /// Creates a generator over a relay API
    ///
    /// # Arguments
    /// * `api` - The relay client (or a test double)
    /// * `config` - Polling parameters, validated here
    pub fn new(api: Arc<dyn RelayApi>, config: PollConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            api,
            config,
            session: None,
        })
    }

    /// Submit a generation request and start polling it
    ///
    /// The request is validated locally first; a rejected request returns
    /// before any network call and leaves any active session running. A
    /// valid submission then cancels the previous session before the new
    /// job is sent.
    ///
    /// # Returns
    /// The accepted job's handle
    pub async fn submit(&mut self, request: GenerationRequest) -> Result<JobHandle> {
        request.validate()?;

        if self.cancel() {
            debug!("previous session cancelled by new submission");
        }

        let accepted = self.api.submit_generation(&request).await?;
        let job = accepted.inference_id.clone();
        info!(job = %job, "generation job accepted");

        self.session = Some(GenerationSession::spawn(
            Arc::clone(&self.api),
            job.clone(),
            request.api_key,
            self.config.clone(),
        ));
        Ok(job)
    }

    /// Waits for the active session's outcome
    ///
    /// Returns `None` when no session is active. The session is consumed;
    /// a second call returns `None` until the next submission.
    pub async fn wait(&mut self) -> Option<PollOutcome> {
        match self.session.take() {
            Some(session) => Some(session.wait().await),
            None => None,
        }
    }

    /// Cancels the active session, if any
    ///
    /// Returns whether a session was actually cancelled. The cancelled
    /// session's outcome is discarded.
    pub fn cancel(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                session.cancel();
                true
            }
            None => false,
        }
    }

    /// Whether a session is currently polling
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Handle of the job currently being watched, if any
    pub fn active_job(&self) -> Option<&JobHandle> {
        self.session.as_ref().map(GenerationSession::job)
    }
}

/// The polling loop.
///
/// Ticks on a fixed interval (missed ticks delay rather than burst, so at
/// most one poll fires per interval) and interprets each observation:
/// terminal reports end the loop, `processing` clears the error budget,
/// and failed observations count against it until it runs out. The first
/// poll fires one full interval after submission.
async fn watch(
    api: Arc<dyn RelayApi>,
    job: JobHandle,
    api_key: String,
    config: PollConfig,
    cancelled: Arc<AtomicBool>,
) -> PollOutcome {
    let mut ticker = time::interval(config.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; consume it so the job has one
    // interval of headroom before the first poll.
    ticker.tick().await;

    let mut consecutive_errors: u32 = 0;

    loop {
        ticker.tick().await;

        if cancelled.load(Ordering::SeqCst) {
            return PollOutcome::Cancelled;
        }

        let failure = match api.check_status(&job, &api_key).await {
            Ok(StatusReport::Processing { .. }) => {
                debug!(job = %job, "still processing");
                consecutive_errors = 0;
                None
            }
            Ok(StatusReport::Ready { output, .. }) => {
                info!(job = %job, outputs = output.len(), "generation ready");
                return PollOutcome::Ready { outputs: output };
            }
            Ok(StatusReport::Failed { error, details }) => {
                let detail = if details.is_empty() {
                    error
                } else {
                    format!("{error}: {details}")
                };
                warn!(job = %job, %detail, "generation failed");
                return PollOutcome::Failed { detail };
            }
            Ok(StatusReport::Error {
                error,
                details,
                status_code,
            }) => Some(ClientError::Api {
                status: status_code.unwrap_or(500),
                message: error,
                detail: details,
            }),
            Err(e) => Some(e),
        };

        if let Some(last_error) = failure {
            consecutive_errors += 1;
            warn!(
                job = %job,
                attempt = consecutive_errors,
                error = %last_error,
                "status check failed"
            );
            if consecutive_errors >= config.max_consecutive_errors {
                return PollOutcome::RetriesExhausted {
                    attempts: consecutive_errors,
                    last_error,
                };
            }
        }
    }
}
