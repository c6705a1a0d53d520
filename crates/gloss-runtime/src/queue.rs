//! The single-flight translation queue.
//!
//! At most one job executes at a time. Submission is non-blocking from any
//! context: it appends to the backlog and, if the queue was idle, spawns the
//! worker task. The worker drains the backlog FIFO, creating one decoder per
//! job, and broadcasts every lifecycle event through the shared emitter.
//!
//! Cancellation is cooperative: a per-job [`CancellationToken`] is installed
//! when the job leaves the backlog, and `cancel()` fires it while also
//! clearing the entire backlog.

use std::collections::VecDeque;
use std::sync::Arc;

use gloss_core::{Provenance, TranslateError, TranslateEvent, TranslationJob, TranslationResult};
use gloss_decode::StreamDecoder;
use gloss_llm::Transport;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::emitter::EventEmitter;
use crate::history::History;
use crate::result::ResultBuilder;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Busy,
}

struct QueueState {
    phase: Phase,
    backlog: VecDeque<TranslationJob>,
    /// Token of the job currently executing, if any.
    cancel: Option<CancellationToken>,
}

struct QueueInner {
    transport: Arc<dyn Transport>,
    emitter: EventEmitter,
    state: Mutex<QueueState>,
    history: Mutex<History>,
    current: Mutex<Option<TranslationResult>>,
}

/// Handle to the single-flight translation executor.
///
/// Cheap to clone; all clones share one backlog, history, and event channel.
#[derive(Clone)]
pub struct TranslationQueue {
    inner: Arc<QueueInner>,
}

impl TranslationQueue {
    /// Create an idle queue over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(QueueInner {
                transport,
                emitter: EventEmitter::new(),
                state: Mutex::new(QueueState {
                    phase: Phase::Idle,
                    backlog: VecDeque::new(),
                    cancel: None,
                }),
                history: Mutex::new(History::new()),
                current: Mutex::new(None),
            }),
        }
    }

    /// Subscribe to lifecycle events emitted after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TranslateEvent> {
        self.inner.emitter.subscribe()
    }

    /// Enqueue a translation job.
    ///
    /// Non-blocking. If the queue is idle the job starts immediately;
    /// otherwise it waits in the backlog in FIFO order.
    pub fn submit(&self, text: impl Into<String>, provenance: Provenance) {
        let job = TranslationJob::new(text, provenance);
        let spawn_worker = {
            let mut state = self.inner.state.lock();
            state.backlog.push_back(job);
            if state.phase == Phase::Idle {
                state.phase = Phase::Busy;
                true
            } else {
                false
            }
        };
        if spawn_worker {
            let inner = Arc::clone(&self.inner);
            let _ = tokio::spawn(run_worker(inner));
        }
    }

    /// Abort the in-flight job and discard the entire backlog.
    ///
    /// A no-op while idle. The aborted job surfaces as a
    /// [`TranslateEvent::JobFailed`] with [`TranslateError::Cancelled`].
    pub fn cancel(&self) {
        let token = {
            let mut state = self.inner.state.lock();
            state.backlog.clear();
            state.cancel.take()
        };
        if let Some(token) = token {
            token.cancel();
        }
    }

    /// Whether a job is currently executing.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.inner.state.lock().phase == Phase::Busy
    }

    /// Number of jobs waiting behind the in-flight one.
    #[must_use]
    pub fn backlog_len(&self) -> usize {
        self.inner.state.lock().backlog.len()
    }

    /// Snapshot of completed results, newest first, bounded to
    /// [`crate::history::HISTORY_CAPACITY`].
    #[must_use]
    pub fn history(&self) -> Vec<TranslationResult> {
        self.inner.history.lock().snapshot()
    }

    /// The most recently completed result, if any.
    #[must_use]
    pub fn current(&self) -> Option<TranslationResult> {
        self.inner.current.lock().clone()
    }
}

/// Drain the backlog until it is empty, then return to idle.
async fn run_worker(inner: Arc<QueueInner>) {
    loop {
        let next = {
            let mut state = inner.state.lock();
            match state.backlog.pop_front() {
                Some(job) => {
                    let token = CancellationToken::new();
                    state.cancel = Some(token.clone());
                    Some((job, token))
                }
                None => {
                    state.phase = Phase::Idle;
                    state.cancel = None;
                    None
                }
            }
        };
        let Some((job, token)) = next else {
            return;
        };

        match run_job(&inner, &job, &token).await {
            Ok(result) => {
                // Update-then-publish: history and the current slot are
                // committed before the completion event goes out.
                inner.history.lock().push(result.clone());
                *inner.current.lock() = Some(result.clone());
                inner.emitter.emit(TranslateEvent::JobCompleted { result });
            }
            Err(error) => {
                if error.is_silent() {
                    debug!(category = error.category(), "translation job cancelled");
                } else {
                    warn!(category = error.category(), error = %error, "translation job failed");
                }
                inner.emitter.emit(TranslateEvent::JobFailed { error });
            }
        }
    }
}

/// Execute one job: open the stream, pump fragments through the decoder,
/// fold sentence events, finalize on end-of-data.
#[instrument(skip_all, fields(provenance = ?job.provenance, input_len = job.text.len()))]
async fn run_job(
    inner: &Arc<QueueInner>,
    job: &TranslationJob,
    cancel: &CancellationToken,
) -> Result<TranslationResult, TranslateError> {
    inner.emitter.emit(TranslateEvent::JobStarted {
        text: job.text.clone(),
        provenance: job.provenance,
    });

    let mut builder = ResultBuilder::new(job);
    let mut decoder = StreamDecoder::new();

    let mut fragments = tokio::select! {
        () = cancel.cancelled() => return Err(TranslateError::Cancelled),
        opened = inner.transport.stream(&job.text) => opened?,
    };

    loop {
        let item = tokio::select! {
            () = cancel.cancelled() => return Err(TranslateError::Cancelled),
            item = fragments.next() => item,
        };
        match item {
            Some(Ok(fragment)) => {
                for sentence in decoder.ingest(&fragment) {
                    if builder.fold(&sentence) {
                        inner.emitter.emit(TranslateEvent::Sentence { sentence });
                    }
                }
            }
            Some(Err(error)) => return Err(error),
            None => break,
        }
    }

    for sentence in decoder.finalize() {
        if builder.fold(&sentence) {
            inner.emitter.emit(TranslateEvent::Sentence { sentence });
        }
    }

    debug!(sentences = builder.len(), "translation stream complete");
    Ok(builder.finish())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
