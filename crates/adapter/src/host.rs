//! Game loop side of the adapter.
//!
//! [`Host`] owns the [`Session`] and turns each inbound command into the
//! outbound messages it produces. Commands are applied strictly one at a time,
//! so the session never sees concurrent calls.

use arrayvec::ArrayVec;
use block_puzzle_core::{HighScoreStore, Session, ShapeSource};
use tracing::{debug, info};

use crate::observe::{build_observation, error_code_for, last_event_from_report};
use crate::protocol::{create_ack, create_error, LastEvent, ObservationMessage};
use crate::runtime::{Adapter, ClientCommand, InboundCommand, InboundPayload, OutboundMessage};

/// Messages produced by one inbound command
pub type Replies = ArrayVec<OutboundMessage, 2>;

pub struct Host<R, S> {
    session: Session<R, S>,
    obs_seq: u64,
    last_event: Option<LastEvent>,
}

impl<R: ShapeSource, S: HighScoreStore> Host<R, S> {
    pub fn new(session: Session<R, S>) -> Self {
        Self {
            session,
            obs_seq: 0,
            last_event: None,
        }
    }

    pub fn session(&self) -> &Session<R, S> {
        &self.session
    }

    fn observation(&mut self) -> ObservationMessage {
        self.obs_seq += 1;
        build_observation(&self.session.snapshot(), self.obs_seq, self.last_event.clone())
    }

    /// Apply one command and collect the replies.
    ///
    /// A successful command is acked and followed by a broadcast observation.
    /// A failed one produces a single error for the sender.
    pub fn handle(&mut self, cmd: InboundCommand) -> Replies {
        let mut out = Replies::new();
        let client_id = cmd.client_id;

        let command = match cmd.payload {
            InboundPayload::SnapshotRequest => {
                let obs = self.observation();
                out.push(OutboundMessage::ToClientObservation { client_id, obs });
                return out;
            }
            InboundPayload::Command(command) => command,
        };

        match command {
            ClientCommand::Place { slot, row, col } => {
                match self.session.attempt_placement(slot, row, col) {
                    Ok(report) => {
                        debug!(
                            client = client_id,
                            slot,
                            row,
                            col,
                            points = report.score.total,
                            "placement applied"
                        );
                        self.last_event = Some(last_event_from_report(&report));
                    }
                    Err(e) => {
                        debug!(client = client_id, error = %e, "placement refused");
                        let err = create_error(cmd.seq, error_code_for(&e), &e.to_string());
                        out.push(OutboundMessage::ToClientError { client_id, err });
                        return out;
                    }
                }
            }
            ClientCommand::Restart => {
                info!(client = client_id, "restart requested");
                self.session.restart();
                self.last_event = None;
            }
        }

        out.push(OutboundMessage::ToClientAck {
            client_id,
            ack: create_ack(cmd.seq),
        });
        let obs = self.observation();
        out.push(OutboundMessage::BroadcastObservation { obs });
        out
    }

    /// Serve commands from `adapter` until its command channel closes.
    pub fn run(&mut self, adapter: &mut Adapter) {
        info!(addr = %adapter.local_addr(), "serving session");
        while let Some(cmd) = adapter.recv_blocking() {
            for msg in self.handle(cmd) {
                adapter.send(msg);
            }
        }
    }
}
