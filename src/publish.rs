//! The publish pipeline: a small state machine around one cancellable
//! background upload.
//!
//! One caller-facing side triggers [`LogPublisher::publish`] and polls
//! status snapshots (or awaits [`LogPublisher::wait_terminal`]); at most one
//! background worker task is live per pipeline instance, spawned fresh on
//! each publish attempt and never reused. Terminal state for an attempt is
//! written either by the active worker or by the abort path, never both: the
//! abort path sets the aborted flag first, and the worker suppresses its own
//! transition once the flag is observed.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{AbortHandle, Abortable};
use tokio::sync::Notify;
use tracing::{debug, error, info, warn};

use crate::bundle::LogBundle;
use crate::collect::LogPathResolver;
use crate::manifest::ComponentDescriptor;
use crate::payload::GistPayload;
use crate::response::{parse_gist_url, SUCCESS_STATUS_LINE};
use crate::transport::GistTransport;

/// Fixed user-facing message when bundle assembly fails.
pub const COLLECT_FAILED_MESSAGE: &str = "Failed to collect data";

/// Fixed user-facing message when a successful response cannot be parsed.
pub const PARSE_FAILED_MESSAGE: &str = "Failed to parse response";

/// Fixed user-facing message set by [`LogPublisher::abort`].
pub const ABORTED_MESSAGE: &str = "Aborted by user";

/// Observable pipeline status. `Done` and `Error` are terminal until the
/// next `publish()` recycles the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStatus {
    Ready,
    Uploading,
    Done,
    Error,
}

#[derive(Debug)]
struct PublishState {
    status: PublishStatus,
    result_url: Option<String>,
    error_message: Option<String>,
}

/// Collects, redacts and uploads the application log as a gist, exposing
/// progress through status snapshots.
pub struct LogPublisher<T: GistTransport + 'static> {
    transport: Arc<T>,
    resolver: Box<dyn LogPathResolver>,
    components: Vec<ComponentDescriptor>,
    install_dir: PathBuf,
    state: Arc<Mutex<PublishState>>,
    notify: Arc<Notify>,
    aborted: Arc<AtomicBool>,
    abort_handle: Mutex<Option<AbortHandle>>,
}

impl<T: GistTransport + 'static> LogPublisher<T> {
    pub fn new(
        transport: T,
        resolver: impl LogPathResolver + 'static,
        components: Vec<ComponentDescriptor>,
        install_dir: PathBuf,
    ) -> Self {
        LogPublisher {
            transport: Arc::new(transport),
            resolver: Box::new(resolver),
            components,
            install_dir,
            state: Arc::new(Mutex::new(PublishState {
                status: PublishStatus::Ready,
                result_url: None,
                error_message: None,
            })),
            notify: Arc::new(Notify::new()),
            aborted: Arc::new(AtomicBool::new(false)),
            abort_handle: Mutex::new(None),
        }
    }

    /// Current status snapshot.
    pub fn status(&self) -> PublishStatus {
        self.state_guard().status
    }

    /// The created gist URL; set if and only if the terminal status is `Done`.
    pub fn result_url(&self) -> Option<String> {
        self.state_guard().result_url.clone()
    }

    /// The failure message; set if and only if the terminal status is `Error`.
    pub fn error_message(&self) -> Option<String> {
        self.state_guard().error_message.clone()
    }

    /// Resolves once the current attempt reaches `Done` or `Error`. Returns
    /// immediately when no upload is in flight.
    pub async fn wait_terminal(&self) -> PublishStatus {
        loop {
            let notified = self.notify.notified();
            let status = self.status();
            if matches!(status, PublishStatus::Done | PublishStatus::Error) {
                return status;
            }
            notified.await;
        }
    }

    /// Starts a publish attempt: synchronously assembles the redacted bundle,
    /// then spawns one background worker for the upload. A no-op while an
    /// upload is already in flight. Must be called from within a tokio
    /// runtime.
    pub fn publish(&self) {
        {
            let mut state = self.state_guard();
            if state.status == PublishStatus::Uploading {
                debug!("publish() ignored: upload already in flight");
                return;
            }
            state.status = PublishStatus::Uploading;
            state.error_message = None;
            state.result_url = None;
        }
        self.aborted.store(false, Ordering::SeqCst);
        info!("Starting log publish attempt");

        let bundle = match LogBundle::assemble(
            self.resolver.as_ref(),
            &self.components,
            &self.install_dir,
        ) {
            Ok(bundle) => bundle,
            Err(e) => {
                // Diagnostic sink gets the cause; the caller gets the fixed message.
                error!(error = ?e, "Failed to collect data for log publishing");
                set_error(&self.state, &self.notify, COLLECT_FAILED_MESSAGE.to_string());
                return;
            }
        };

        let payload = GistPayload::for_log(bundle.into_text());
        let (handle, registration) = AbortHandle::new_pair();
        *lock_or_recover(&self.abort_handle) = Some(handle);

        let transport = Arc::clone(&self.transport);
        let state = Arc::clone(&self.state);
        let notify = Arc::clone(&self.notify);
        let aborted = Arc::clone(&self.aborted);
        tokio::spawn(async move {
            let work = async {
                match transport.create_gist(payload).await {
                    Ok(response) => {
                        if response.status_line == SUCCESS_STATUS_LINE {
                            match parse_gist_url(&response.body) {
                                Some(url) => {
                                    info!(url = %url, "Log published");
                                    resolve(&state, &notify, &aborted, Outcome::Done(url));
                                }
                                None => {
                                    warn!(
                                        body_len = response.body.len(),
                                        "Gist creation response could not be parsed"
                                    );
                                    resolve(
                                        &state,
                                        &notify,
                                        &aborted,
                                        Outcome::Error(PARSE_FAILED_MESSAGE.to_string()),
                                    );
                                }
                            }
                        } else {
                            warn!(status_line = %response.status_line, "Gist creation rejected");
                            resolve(
                                &state,
                                &notify,
                                &aborted,
                                Outcome::Error(response.status_line),
                            );
                        }
                    }
                    Err(e) => {
                        warn!(error = ?e, "Exception during log publishing (gist creation)");
                        resolve(&state, &notify, &aborted, Outcome::Error(e.to_string()));
                    }
                }
            };
            // A cancelled future resolves to Err(Aborted); the abort path has
            // already written the terminal state in that case.
            let _ = Abortable::new(work, registration).await;
        });
    }

    /// Cancels the in-flight upload: sets the abort flag, drops the worker
    /// future and immediately forces the fixed error state. A no-op unless an
    /// upload is in flight.
    pub fn abort(&self) {
        {
            let mut state = self.state_guard();
            if state.status != PublishStatus::Uploading {
                debug!("abort() ignored: no upload in flight");
                return;
            }
            self.aborted.store(true, Ordering::SeqCst);
            state.status = PublishStatus::Error;
            state.error_message = Some(ABORTED_MESSAGE.to_string());
        }
        if let Some(handle) = lock_or_recover(&self.abort_handle).take() {
            handle.abort();
        }
        self.notify.notify_waiters();
        info!("Log publish aborted by user");
    }

    fn state_guard(&self) -> MutexGuard<'_, PublishState> {
        lock_or_recover(&self.state)
    }
}

enum Outcome {
    Done(String),
    Error(String),
}

/// Terminal write for the worker path. The abort flag is re-checked under the
/// state lock: `abort()` sets the flag while holding the same lock, so a
/// worker that loses the race never clobbers the forced abort state.
fn resolve(state: &Mutex<PublishState>, notify: &Notify, aborted: &AtomicBool, outcome: Outcome) {
    let mut state = lock_or_recover(state);
    if aborted.load(Ordering::SeqCst) {
        debug!("Worker outcome suppressed after user abort");
        return;
    }
    match outcome {
        Outcome::Done(url) => {
            state.status = PublishStatus::Done;
            state.result_url = Some(url);
        }
        Outcome::Error(message) => {
            state.status = PublishStatus::Error;
            state.error_message = Some(message);
        }
    }
    drop(state);
    notify.notify_waiters();
}

fn set_error(state: &Mutex<PublishState>, notify: &Notify, message: String) {
    let mut state = lock_or_recover(state);
    state.status = PublishStatus::Error;
    state.error_message = Some(message);
    drop(state);
    notify.notify_waiters();
}

/// State writes are small and never panic while holding the lock, but a
/// poisoned mutex must not take the whole pipeline down with it.
fn lock_or_recover<'a, S>(mutex: &'a Mutex<S>) -> MutexGuard<'a, S> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
