//! TCP server for the control adapter
//!
//! Handles incoming connections and manages client lifecycle.
//! Uses tokio for async networking.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, RwLock};
use tracing::{debug, info, warn};

use crate::protocol::*;
use crate::runtime::{ClientCommand, InboundCommand, InboundPayload, OutboundMessage};

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_pending_commands: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            max_pending_commands: 16,
        }
    }
}

impl ServerConfig {
    /// Create from `BLOCK_PUZZLE_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = lookup("BLOCK_PUZZLE_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = lookup("BLOCK_PUZZLE_PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        let max_pending_commands = lookup("BLOCK_PUZZLE_MAX_PENDING")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_pending_commands);

        Self {
            host,
            port,
            max_pending_commands,
        }
    }
}

/// Shared server state
pub struct ServerState {
    clients: RwLock<Vec<ClientHandle>>,
    controller: RwLock<Option<usize>>, // client id
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            clients: RwLock::new(Vec::new()),
            controller: RwLock::new(None),
        }
    }

    pub async fn controller(&self) -> Option<usize> {
        *self.controller.read().await
    }

    pub async fn client_count(&self) -> usize {
        self.clients.read().await.len()
    }

    async fn is_handshaken(&self, client_id: usize) -> bool {
        let clients = self.clients.read().await;
        clients
            .iter()
            .find(|c| c.id == client_id)
            .map(|c| c.handshaken)
            .unwrap_or(false)
    }

    async fn is_controller(&self, client_id: usize) -> bool {
        *self.controller.read().await == Some(client_id)
    }

    /// Record `seq` if it is strictly greater than the last one seen.
    async fn check_and_update_seq(&self, client_id: usize, seq: u64) -> bool {
        let mut clients = self.clients.write().await;
        let Some(client) = clients.iter_mut().find(|c| c.id == client_id) else {
            return true;
        };

        match client.last_seq {
            Some(prev) if seq <= prev => false,
            _ => {
                client.last_seq = Some(seq);
                true
            }
        }
    }

    async fn send_to(&self, client_id: usize, msg: ClientOutbound) {
        let clients = self.clients.read().await;
        if let Some(c) = clients.iter().find(|c| c.id == client_id) {
            let _ = c.tx.send(msg);
        }
    }

    async fn broadcast(&self, obs: ObservationMessage) {
        let clients = self.clients.read().await;
        for c in clients.iter().filter(|c| c.stream_observations) {
            let _ = c.tx.send(ClientOutbound::Observation(obs.clone()));
        }
    }

    /// Remove a client, promoting the lowest remaining id if it held control.
    async fn remove_client(&self, client_id: usize) {
        let mut controller = self.controller.write().await;
        let mut clients = self.clients.write().await;

        clients.retain(|c| c.id != client_id);
        if *controller != Some(client_id) {
            return;
        }

        let next = clients
            .iter_mut()
            .filter(|c| c.handshaken)
            .min_by_key(|c| c.id);
        match next {
            Some(c) => {
                c.is_controller = true;
                *controller = Some(c.id);
                info!(client = c.id, "controller promoted");
            }
            None => {
                *controller = None;
                info!(client = client_id, "controller released");
            }
        }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a connected client
pub struct ClientHandle {
    pub id: usize,
    pub addr: SocketAddr,
    pub is_controller: bool,
    pub stream_observations: bool,
    pub handshaken: bool,
    pub last_seq: Option<u64>,
    pub tx: mpsc::UnboundedSender<ClientOutbound>,
}

#[derive(Debug, Clone)]
pub enum ClientOutbound {
    Ack(AckMessage),
    Error(ErrorMessage),
    Welcome(WelcomeMessage),
    Observation(ObservationMessage),
}

/// Start the TCP server.
///
/// `ready_tx` receives the bound address once the listener is up, which lets
/// callers bind port 0 and discover the real port.
pub async fn run_server(
    config: ServerConfig,
    command_tx: mpsc::Sender<InboundCommand>,
    mut out_rx: mpsc::UnboundedReceiver<OutboundMessage>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    let bound = listener.local_addr()?;
    info!(addr = %bound, "adapter listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let state = Arc::new(ServerState::new());
    let mut client_id_counter = 0usize;

    // Outbound dispatcher.
    {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                match msg {
                    OutboundMessage::ToClientAck { client_id, ack } => {
                        state.send_to(client_id, ClientOutbound::Ack(ack)).await;
                    }
                    OutboundMessage::ToClientError { client_id, err } => {
                        state.send_to(client_id, ClientOutbound::Error(err)).await;
                    }
                    OutboundMessage::ToClientObservation { client_id, obs } => {
                        state
                            .send_to(client_id, ClientOutbound::Observation(obs))
                            .await;
                    }
                    OutboundMessage::BroadcastObservation { obs } => {
                        state.broadcast(obs).await;
                    }
                }
            }
        });
    }

    // Accept incoming connections
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;

        info!(client = client_id, %addr, "client connected");

        let state = Arc::clone(&state);
        let command_tx = command_tx.clone();

        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, addr, client_id, state, command_tx).await {
                warn!(client = client_id, error = %e, "client error");
            }
            info!(client = client_id, "client disconnected");
        });
    }
}

fn send_error(
    tx: &mpsc::UnboundedSender<ClientOutbound>,
    seq: u64,
    code: ErrorCode,
    message: &str,
) {
    let _ = tx.send(ClientOutbound::Error(create_error(seq, code, message)));
}

/// Common gate for command/control: handshake first, then monotonic seq.
async fn admit(
    state: &ServerState,
    client_id: usize,
    seq: u64,
    tx: &mpsc::UnboundedSender<ClientOutbound>,
) -> bool {
    if !state.is_handshaken(client_id).await {
        send_error(
            tx,
            seq,
            ErrorCode::HandshakeRequired,
            "Send hello before command or control",
        );
        return false;
    }
    if !state.check_and_update_seq(client_id, seq).await {
        send_error(
            tx,
            seq,
            ErrorCode::InvalidCommand,
            "seq must be strictly increasing",
        );
        return false;
    }
    true
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    addr: SocketAddr,
    client_id: usize,
    state: Arc<ServerState>,
    command_tx: mpsc::Sender<InboundCommand>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = tokio::io::split(socket);
    let mut reader = BufReader::new(reader);

    // Channel to send messages to this client
    let (tx, mut rx) = mpsc::unbounded_channel::<ClientOutbound>();

    {
        let mut clients = state.clients.write().await;
        clients.push(ClientHandle {
            id: client_id,
            addr,
            is_controller: false,
            stream_observations: false,
            handshaken: false,
            last_seq: None,
            tx: tx.clone(),
        });
    }

    let write_task = tokio::spawn(async move {
        let mut buf: Vec<u8> = Vec::with_capacity(4096);
        while let Some(msg) = rx.recv().await {
            buf.clear();
            let encoded = match &msg {
                ClientOutbound::Ack(v) => serde_json::to_writer(&mut buf, v),
                ClientOutbound::Error(v) => serde_json::to_writer(&mut buf, v),
                ClientOutbound::Welcome(v) => serde_json::to_writer(&mut buf, v),
                ClientOutbound::Observation(v) => serde_json::to_writer(&mut buf, v),
            };
            if encoded.is_err() {
                continue;
            }
            buf.push(b'\n');
            if writer.write_all(&buf).await.is_err() {
                break;
            }
            if writer.flush().await.is_err() {
                break;
            }
        }
    });

    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        debug!(client = client_id, line = trimmed, "recv");

        match parse_message(trimmed) {
            Ok(ParsedMessage::Hello(hello)) => {
                if state.is_handshaken(client_id).await
                    && !state.check_and_update_seq(client_id, hello.seq).await
                {
                    send_error(
                        &tx,
                        hello.seq,
                        ErrorCode::InvalidCommand,
                        "seq must be strictly increasing",
                    );
                    continue;
                }

                if !hello.protocol_version.starts_with("1.") {
                    send_error(
                        &tx,
                        hello.seq,
                        ErrorCode::ProtocolMismatch,
                        &format!("Protocol version {} not supported", hello.protocol_version),
                    );
                    break;
                }

                // First client to hello becomes controller
                let role = {
                    let mut controller = state.controller.write().await;
                    let mut clients = state.clients.write().await;
                    let became_controller = controller.is_none();
                    if became_controller {
                        *controller = Some(client_id);
                    }
                    if let Some(client) = clients.iter_mut().find(|c| c.id == client_id) {
                        client.handshaken = true;
                        client.last_seq = Some(hello.seq);
                        client.stream_observations = hello.requested.stream_observations;
                        client.is_controller |= became_controller;
                    }
                    if *controller == Some(client_id) {
                        AssignedRole::Controller
                    } else {
                        AssignedRole::Observer
                    }
                };
                info!(client = client_id, name = %hello.client.name, ?role, "handshake complete");

                let welcome = create_welcome(hello.seq, client_id as u64, role);
                let _ = tx.send(ClientOutbound::Welcome(welcome));

                if hello.requested.stream_observations {
                    let _ = command_tx.try_send(InboundCommand {
                        client_id,
                        seq: hello.seq,
                        payload: InboundPayload::SnapshotRequest,
                    });
                }
            }

            Ok(ParsedMessage::Command(cmd)) => {
                if !admit(&state, client_id, cmd.seq, &tx).await {
                    continue;
                }

                if !state.is_controller(client_id).await {
                    send_error(
                        &tx,
                        cmd.seq,
                        ErrorCode::NotController,
                        "Only controller may send commands",
                    );
                    continue;
                }

                let mapped = match map_command(&cmd) {
                    Ok(c) => c,
                    Err((code, message)) => {
                        send_error(&tx, cmd.seq, code, &message);
                        continue;
                    }
                };

                // Ack is sent by the game loop once the command is applied.
                if command_tx
                    .try_send(InboundCommand {
                        client_id,
                        seq: cmd.seq,
                        payload: InboundPayload::Command(mapped),
                    })
                    .is_err()
                {
                    send_error(
                        &tx,
                        cmd.seq,
                        ErrorCode::Backpressure,
                        "Command queue is full",
                    );
                }
            }

            Ok(ParsedMessage::Control(ctrl)) => {
                if !admit(&state, client_id, ctrl.seq, &tx).await {
                    continue;
                }

                let mut controller = state.controller.write().await;
                let mut clients = state.clients.write().await;
                let result = match ctrl.action {
                    ControlAction::Claim if controller.is_none() => {
                        *controller = Some(client_id);
                        Ok(true)
                    }
                    ControlAction::Claim if *controller == Some(client_id) => Ok(true),
                    ControlAction::Claim => Err((
                        ErrorCode::ControllerActive,
                        "Controller already assigned",
                    )),
                    ControlAction::Release if *controller == Some(client_id) => {
                        *controller = None;
                        Ok(false)
                    }
                    ControlAction::Release => {
                        Err((ErrorCode::NotController, "Only controller may release"))
                    }
                };

                match result {
                    Ok(is_controller) => {
                        if let Some(client) = clients.iter_mut().find(|c| c.id == client_id) {
                            client.is_controller = is_controller;
                        }
                        info!(client = client_id, action = ?ctrl.action, "control changed");
                        let _ = tx.send(ClientOutbound::Ack(create_ack(ctrl.seq)));
                    }
                    Err((code, message)) => send_error(&tx, ctrl.seq, code, message),
                }
            }

            Ok(ParsedMessage::Unknown(value)) => {
                let seq = value.get("seq").and_then(|v| v.as_u64()).unwrap_or(0);
                if state.is_handshaken(client_id).await
                    && !state.check_and_update_seq(client_id, seq).await
                {
                    send_error(
                        &tx,
                        seq,
                        ErrorCode::InvalidCommand,
                        "seq must be strictly increasing",
                    );
                    continue;
                }
                send_error(&tx, seq, ErrorCode::InvalidCommand, "Unknown message type");
            }

            Err(e) => {
                let seq = serde_json::from_str::<serde_json::Value>(trimmed)
                    .ok()
                    .and_then(|v| v.get("seq").and_then(|s| s.as_u64()))
                    .unwrap_or(0);
                send_error(
                    &tx,
                    seq,
                    ErrorCode::InvalidCommand,
                    &format!("JSON parse error: {}", e),
                );
            }
        }
    }

    state.remove_client(client_id).await;

    drop(tx);
    let _ = write_task.await;

    Ok(())
}

/// Map a protocol command into a game-loop command.
fn map_command(cmd: &CommandMessage) -> Result<ClientCommand, (ErrorCode, String)> {
    match cmd.action {
        CommandAction::Place => {
            let Some(place) = cmd.place else {
                return Err((ErrorCode::InvalidCommand, "Missing place".to_string()));
            };
            Ok(ClientCommand::Place {
                slot: place.slot,
                row: place.row,
                col: place.col,
            })
        }
        CommandAction::Restart => Ok(ClientCommand::Restart),
    }
}
