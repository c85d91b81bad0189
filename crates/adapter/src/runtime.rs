//! Adapter runtime integration.
//!
//! Bridges the sync game loop with the async TCP server.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, oneshot};
use tracing::error;

use crate::protocol::{AckMessage, ErrorMessage, ObservationMessage};
use crate::server::{run_server, ServerConfig};

/// Command delivered to the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundCommand {
    pub client_id: usize,
    pub seq: u64,
    pub payload: InboundPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundPayload {
    Command(ClientCommand),
    /// A client asked for the current state right after its hello.
    SnapshotRequest,
}

/// Command payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCommand {
    Place { slot: usize, row: i8, col: i8 },
    Restart,
}

/// Outbound message to be delivered by the server.
#[derive(Debug, Clone)]
pub enum OutboundMessage {
    ToClientAck { client_id: usize, ack: AckMessage },
    ToClientError { client_id: usize, err: ErrorMessage },
    ToClientObservation { client_id: usize, obs: ObservationMessage },
    BroadcastObservation { obs: ObservationMessage },
}

/// Running adapter instance.
pub struct Adapter {
    _rt: Runtime,
    cmd_rx: mpsc::Receiver<InboundCommand>,
    out_tx: mpsc::UnboundedSender<OutboundMessage>,
    local_addr: SocketAddr,
}

impl Adapter {
    /// Start the adapter from `BLOCK_PUZZLE_*` environment variables.
    pub fn start_from_env() -> anyhow::Result<Self> {
        Self::start(ServerConfig::from_env())
    }

    /// Spin up a runtime, bind the listener and wait until it accepts.
    pub fn start(config: ServerConfig) -> anyhow::Result<Self> {
        let max_pending = config.max_pending_commands.max(1);
        let (cmd_tx, cmd_rx) = mpsc::channel::<InboundCommand>(max_pending);
        let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();
        let (ready_tx, ready_rx) = oneshot::channel();

        let rt = Runtime::new().context("failed to create tokio runtime")?;
        rt.spawn(async move {
            if let Err(e) = run_server(config, cmd_tx, out_rx, Some(ready_tx)).await {
                error!(error = %e, "adapter server stopped");
            }
        });

        // The sender is dropped without a value when bind fails.
        let local_addr = rt
            .block_on(ready_rx)
            .context("adapter server failed to start")?;

        Ok(Self {
            _rt: rt,
            cmd_rx,
            out_tx,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn try_recv(&mut self) -> Option<InboundCommand> {
        self.cmd_rx.try_recv().ok()
    }

    /// Block the calling thread until a command arrives.
    ///
    /// Must not be called from inside an async context.
    pub fn recv_blocking(&mut self) -> Option<InboundCommand> {
        self.cmd_rx.blocking_recv()
    }

    pub fn send(&self, msg: OutboundMessage) {
        let _ = self.out_tx.send(msg);
    }
}
