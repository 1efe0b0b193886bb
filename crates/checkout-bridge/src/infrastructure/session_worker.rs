//! Session worker: a tokio task that owns one [`CheckoutSession`].
//!
//! Messages may be posted from any task, but a session must see them one at a
//! time and in arrival order.  The worker gives it that: senders push
//! [`SessionCommand`]s into a bounded mpsc channel, and a single task pops
//! them, routes them, and drives the [`PresentationSurface`] from each
//! [`RoutingOutcome`].
//!
//! ```text
//! send()/cancel()/respond() ──▶ mpsc ──▶ worker task ──▶ CheckoutSession
//!                                             │
//!                                             └──▶ PresentationSurface::reload / tear_down / post_response
//! ```
//!
//! The worker stops when the session reaches a terminal state or every
//! [`SessionHandle`] sender is gone, and reports a [`SessionReport`].

use std::sync::Arc;

use async_trait::async_trait;
use checkout_core::{BridgeMessage, DeliveryAddressChange};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::router::RoutingOutcome;
use crate::application::session::{CheckoutSession, SessionError, SessionState};

/// Capacity of the command channel between handles and the worker.
const COMMAND_CHANNEL_CAPACITY: usize = 64;

/// The view that displays checkout.
///
/// Infrastructure implementations drive a web view; test implementations
/// record calls.
#[async_trait]
pub trait PresentationSurface: Send + Sync {
    /// Reloads the page at `url` after a recoverable error.
    async fn reload(&self, url: &str);

    /// Closes the presentation.
    async fn tear_down(&self);

    /// Posts a serialised reply to a page request back into the page.
    async fn post_response(&self, response: &str);
}

/// What a reply carries.
#[derive(Debug)]
pub enum ReplyPayload {
    /// Any JSON result.
    Raw(Value),
    /// An address change reply, validated before it is sent.
    AddressChange(DeliveryAddressChange),
}

/// A request for the worker.
#[derive(Debug)]
pub enum SessionCommand {
    Message(BridgeMessage),
    Cancel,
    Respond {
        id: String,
        payload: ReplyPayload,
        done: oneshot::Sender<Result<(), SessionError>>,
    },
}

/// Error type for talking to a session worker.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("session worker has stopped")]
    Closed,
    #[error("session worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("reply rejected: {0}")]
    Rejected(#[from] SessionError),
}

/// How many routed messages ended in each [`RoutingOutcome`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub handled: u64,
    pub recovered: u64,
    pub terminated: u64,
    pub ignored: u64,
}

impl OutcomeCounts {
    fn record(&mut self, outcome: &RoutingOutcome) {
        match outcome {
            RoutingOutcome::Handled => self.handled += 1,
            RoutingOutcome::Recover { .. } => self.recovered += 1,
            RoutingOutcome::Terminate => self.terminated += 1,
            RoutingOutcome::Ignored => self.ignored += 1,
        }
    }

    /// Total number of messages routed.
    pub fn routed(&self) -> u64 {
        self.handled + self.recovered + self.terminated + self.ignored
    }
}

/// Summary returned when a worker stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub session_id: Uuid,
    pub final_state: SessionState,
    /// Reloads requested over the whole session.
    pub recovery_attempts: u32,
    pub outcomes: OutcomeCounts,
}

/// Handle to a running session worker.
#[derive(Debug)]
pub struct SessionHandle {
    session_id: Uuid,
    tx: mpsc::Sender<SessionCommand>,
    task: JoinHandle<SessionReport>,
}

impl SessionHandle {
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Queues a message for the session.
    ///
    /// # Errors
    ///
    /// [`WorkerError::Closed`] once the worker has stopped.
    pub async fn send(&self, message: BridgeMessage) -> Result<(), WorkerError> {
        self.tx
            .send(SessionCommand::Message(message))
            .await
            .map_err(|_| WorkerError::Closed)
    }

    /// Queues a cancel request.  It takes effect after earlier messages.
    pub async fn cancel(&self) -> Result<(), WorkerError> {
        self.tx
            .send(SessionCommand::Cancel)
            .await
            .map_err(|_| WorkerError::Closed)
    }

    /// Replies to the pending page request `id` with a raw JSON result.
    ///
    /// Resolves once the worker has posted the reply, after every message
    /// queued before it.
    ///
    /// # Errors
    ///
    /// [`WorkerError::Rejected`] if the session refuses the reply (see
    /// [`CheckoutSession::respond`]), [`WorkerError::Closed`] once the
    /// worker has stopped.
    pub async fn respond(&self, id: impl Into<String>, result: Value) -> Result<(), WorkerError> {
        self.request_reply(id.into(), ReplyPayload::Raw(result)).await
    }

    /// Replies to the pending address change request `id`.
    ///
    /// # Errors
    ///
    /// As for [`respond`](Self::respond); an invalid reply is rejected and
    /// leaves the request pending.
    pub async fn respond_to_address_change(
        &self,
        id: impl Into<String>,
        reply: DeliveryAddressChange,
    ) -> Result<(), WorkerError> {
        self.request_reply(id.into(), ReplyPayload::AddressChange(reply)).await
    }

    async fn request_reply(&self, id: String, payload: ReplyPayload) -> Result<(), WorkerError> {
        let (done, outcome) = oneshot::channel();
        self.tx
            .send(SessionCommand::Respond { id, payload, done })
            .await
            .map_err(|_| WorkerError::Closed)?;
        outcome.await.map_err(|_| WorkerError::Closed)??;
        Ok(())
    }

    /// Closes the queue, lets the worker drain it, and returns its report.
    pub async fn finish(self) -> Result<SessionReport, WorkerError> {
        drop(self.tx);
        Ok(self.task.await?)
    }
}

/// Spawns a worker for `session` on the current tokio runtime.
///
/// The session should already be presenting; messages sent to an idle
/// session are dropped by the session itself.
pub fn spawn_session(
    session: CheckoutSession,
    surface: Arc<dyn PresentationSurface>,
) -> SessionHandle {
    let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
    let session_id = session.id();
    let task = tokio::spawn(run_session(session, surface, rx));
    SessionHandle {
        session_id,
        tx,
        task,
    }
}

async fn run_session(
    mut session: CheckoutSession,
    surface: Arc<dyn PresentationSurface>,
    mut rx: mpsc::Receiver<SessionCommand>,
) -> SessionReport {
    let mut outcomes = OutcomeCounts::default();

    while let Some(command) = rx.recv().await {
        match command {
            SessionCommand::Message(message) => {
                let outcome = session.handle(message);
                match &outcome {
                    RoutingOutcome::Recover { url } => surface.reload(url).await,
                    RoutingOutcome::Terminate => surface.tear_down().await,
                    RoutingOutcome::Handled | RoutingOutcome::Ignored => {}
                }
                outcomes.record(&outcome);
            }
            SessionCommand::Cancel => {
                if session.cancel() {
                    surface.tear_down().await;
                }
            }
            SessionCommand::Respond { id, payload, done } => {
                let result = post_reply(&mut session, surface.as_ref(), &id, payload).await;
                // The caller may have stopped waiting; the reply was still handled.
                let _ = done.send(result);
            }
        }

        if session.state().is_terminal() {
            debug!(session = %session.id(), state = %session.state(), "session worker stopping");
            break;
        }
    }

    info!(
        session = %session.id(),
        state = %session.state(),
        recoveries = session.total_recoveries(),
        routed = outcomes.routed(),
        "session finished"
    );
    SessionReport {
        session_id: session.id(),
        final_state: session.state(),
        recovery_attempts: session.total_recoveries(),
        outcomes,
    }
}

async fn post_reply(
    session: &mut CheckoutSession,
    surface: &dyn PresentationSurface,
    id: &str,
    payload: ReplyPayload,
) -> Result<(), SessionError> {
    let response = match payload {
        ReplyPayload::Raw(result) => session.respond(id, result)?,
        ReplyPayload::AddressChange(reply) => session.respond_to_address_change(id, &reply)?,
    };
    match response.to_json() {
        Ok(text) => {
            surface.post_response(&text).await;
            Ok(())
        }
        Err(e) => {
            warn!(session = %session.id(), %id, error = %e, "failed to encode reply");
            Err(SessionError::EncodeReply(e.to_string()))
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
