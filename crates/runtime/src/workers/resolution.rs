//! Resolution worker that owns the authoritative [`arena_core::MatchState`].
//!
//! Receives commands from [`MatchHandle`](crate::MatchHandle), validates
//! submissions, resolves a turn once both sides are in, persists the result
//! through the [`MatchRepository`], and broadcasts [`MatchEvent`]s.
//!
//! Commands are processed one at a time, so there is never more than one
//! resolution in flight for a match.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};

use arena_core::{
    ArenaConfig, ArenaEnv, MatchState, Phase, RngOracle, Roster, TeamSide, Winner, resolve_turn,
};

use crate::api::{
    MatchEvent, Result, Submission, SubmissionError, SubmitOutcome, validate_submission,
};
use crate::repository::{MatchRepository, TurnRecord};

/// Commands that can be sent to the resolution worker
pub enum Command {
    /// Validate and store a side's plan. Resolves the turn if it completes the pair.
    Submit {
        side: TeamSide,
        submission: Submission,
        reply: oneshot::Sender<Result<SubmitOutcome>>,
    },
    /// Pass on behalf of a side that missed its deadline.
    Timeout {
        side: TeamSide,
        reply: oneshot::Sender<Result<SubmitOutcome>>,
    },
    /// End the match with the other side as winner.
    Forfeit {
        side: TeamSide,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Query the current match state (read-only).
    QueryState { reply: oneshot::Sender<MatchState> },
}

/// Static inputs the worker resolves against.
pub struct WorkerContext {
    pub roster: Roster,
    pub config: ArenaConfig,
    pub rng: Box<dyn RngOracle>,
}

/// Background task that processes match commands.
pub struct ResolutionWorker {
    match_id: String,
    state: MatchState,
    pending: [Option<Submission>; 2],
    context: WorkerContext,
    repository: Arc<dyn MatchRepository>,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<MatchEvent>,
}

const fn slot(side: TeamSide) -> usize {
    match side {
        TeamSide::A => 0,
        TeamSide::B => 1,
    }
}

impl ResolutionWorker {
    /// Creates a new resolution worker.
    pub fn new(
        match_id: String,
        state: MatchState,
        context: WorkerContext,
        repository: Arc<dyn MatchRepository>,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<MatchEvent>,
    ) -> Self {
        info!(
            match_id = %match_id,
            turn = state.turn,
            phase = %state.phase,
            "ResolutionWorker initialized"
        );

        Self {
            match_id,
            state,
            pending: [None, None],
            context,
            repository,
            command_rx,
            event_tx,
        }
    }

    /// Main worker loop. Ends once every handle is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!(match_id = %self.match_id, "ResolutionWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Submit {
                side,
                submission,
                reply,
            } => {
                let result = self.handle_submit(side, submission);
                if reply.send(result).is_err() {
                    debug!("Submit reply channel closed (caller dropped)");
                }
            }
            Command::Timeout { side, reply } => {
                let result = self.handle_timeout(side);
                if reply.send(result).is_err() {
                    debug!("Timeout reply channel closed (caller dropped)");
                }
            }
            Command::Forfeit { side, reply } => {
                let result = self.handle_forfeit(side);
                if reply.send(result).is_err() {
                    debug!("Forfeit reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn publish(&self, event: MatchEvent) {
        // No subscribers is not an error.
        let _ = self.event_tx.send(event);
    }

    fn ensure_open(&self, side: TeamSide) -> Result<()> {
        if self.pending[slot(side)].is_some() {
            return Err(SubmissionError::AlreadySubmitted {
                side,
                turn: self.state.turn,
            }
            .into());
        }
        Ok(())
    }

    fn handle_submit(&mut self, side: TeamSide, submission: Submission) -> Result<SubmitOutcome> {
        self.ensure_open(side)?;
        validate_submission(&self.state, side, &submission)?;

        debug!(
            match_id = %self.match_id,
            %side,
            turn = self.state.turn,
            actions = submission.actions.len(),
            burns = submission.burn.len(),
            "submission accepted"
        );
        self.pending[slot(side)] = Some(submission);
        self.publish(MatchEvent::SubmissionAccepted {
            side,
            turn: self.state.turn,
        });

        if self.pending.iter().all(Option::is_some) {
            self.resolve()
        } else {
            Ok(SubmitOutcome::Waiting)
        }
    }

    fn handle_timeout(&mut self, side: TeamSide) -> Result<SubmitOutcome> {
        self.ensure_open(side)?;
        validate_submission(&self.state, side, &Submission::pass())?;

        warn!(match_id = %self.match_id, %side, turn = self.state.turn, "side timed out");
        self.publish(MatchEvent::TimedOut {
            side,
            turn: self.state.turn,
        });
        self.handle_submit(side, Submission::pass())
    }

    fn handle_forfeit(&mut self, side: TeamSide) -> Result<()> {
        if self.state.is_finished() {
            return Err(SubmissionError::MatchFinished.into());
        }

        let mut next = self.state.clone();
        let winner = Winner::Side(side.opponent());
        next.phase = Phase::Finished;
        next.winner = Some(winner);
        self.repository.save_state(&self.match_id, &next)?;

        info!(match_id = %self.match_id, %side, turn = next.turn, "side forfeited");
        self.pending = [None, None];
        self.state = next;
        self.publish(MatchEvent::MatchFinished {
            winner,
            turn: self.state.turn,
            forfeited_by: Some(side),
        });
        Ok(())
    }

    /// Resolves the current turn from both stored submissions.
    ///
    /// The new state is persisted before it replaces the current one. If
    /// persistence fails both submissions are dropped and the turn stays open.
    fn resolve(&mut self) -> Result<SubmitOutcome> {
        let [Some(plan_a), Some(plan_b)] = std::mem::take(&mut self.pending) else {
            return Ok(SubmitOutcome::Waiting);
        };
        let turn = self.state.turn;

        let mut locked = self.state.clone();
        locked.phase = Phase::Locked;
        locked.player_a.queue_burn(plan_a.burn.iter().copied());
        locked.player_b.queue_burn(plan_b.burn.iter().copied());

        let outcome = {
            let ctx = &self.context;
            let env = ArenaEnv::new(&ctx.roster, &*ctx.rng, &ctx.config);
            resolve_turn(&locked, &plan_a.actions, &plan_b.actions, &env)
        };

        let record = TurnRecord {
            turn,
            log: outcome.log,
        };
        if let Err(err) = self
            .repository
            .commit_turn(&self.match_id, &outcome.state, &record)
        {
            warn!(match_id = %self.match_id, turn, error = %err, "turn not persisted; reopening");
            return Err(err.into());
        }

        self.state = outcome.state;
        info!(
            match_id = %self.match_id,
            turn,
            entries = record.log.len(),
            phase = %self.state.phase,
            "turn resolved"
        );

        self.publish(MatchEvent::TurnResolved {
            turn,
            log: record.log,
            state: Box::new(self.state.clone()),
        });

        let winner = self.state.winner;
        if let Some(winner) = winner {
            info!(match_id = %self.match_id, ?winner, turn, "match finished");
            self.publish(MatchEvent::MatchFinished {
                winner,
                turn,
                forfeited_by: None,
            });
        }

        Ok(SubmitOutcome::Resolved { turn, winner })
    }
}
