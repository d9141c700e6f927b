//! Cloneable façade for issuing commands to a running match.
//!
//! [`MatchHandle`] hides channel plumbing and offers async helpers for
//! submitting plans, reporting timeouts and forfeits, and streaming events.
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, oneshot};

use arena_core::{MatchState, TeamSide, Winner};

use super::errors::{Result, RuntimeError};
use super::events::MatchEvent;
use super::submission::Submission;
use crate::workers::Command;

/// What happened to an accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    /// Stored; the other side has not submitted yet.
    Waiting,
    /// This submission completed the pair and `turn` was resolved.
    Resolved { turn: u32, winner: Option<Winner> },
}

/// Client-facing handle to interact with one match
#[derive(Clone)]
pub struct MatchHandle {
    match_id: Arc<str>,
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<MatchEvent>,
}

impl MatchHandle {
    pub(crate) fn new(
        match_id: &str,
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<MatchEvent>,
    ) -> Self {
        Self {
            match_id: Arc::from(match_id),
            command_tx,
            event_tx,
        }
    }

    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Submit `side`'s plan for the current turn.
    ///
    /// The turn resolves as soon as both sides have submitted.
    pub async fn submit(&self, side: TeamSide, submission: Submission) -> Result<SubmitOutcome> {
        self.request(|reply| Command::Submit {
            side,
            submission,
            reply,
        })
        .await?
    }

    /// Pass on behalf of `side` after it missed its deadline.
    pub async fn timeout(&self, side: TeamSide) -> Result<SubmitOutcome> {
        self.request(|reply| Command::Timeout { side, reply }).await?
    }

    /// Concede the match. The opponent wins immediately.
    pub async fn forfeit(&self, side: TeamSide) -> Result<()> {
        self.request(|reply| Command::Forfeit { side, reply }).await?
    }

    /// Query the current match state (read-only snapshot)
    pub async fn state(&self) -> Result<MatchState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Subscribe to match events.
    ///
    /// Receivers only see events published after they subscribe.
    pub fn subscribe(&self) -> broadcast::Receiver<MatchEvent> {
        self.event_tx.subscribe()
    }
}
