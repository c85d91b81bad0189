//! Adapter module - remote play via TCP socket with JSON protocol
//!
//! This module lets external clients (bots, test harnesses, thin UIs) drive a
//! block puzzle session through a TCP socket connection.
//!
//! # Protocol Overview
//!
//! The adapter implements a **line-delimited JSON protocol** over TCP:
//!
//! 1. **Connection**: Client connects to TCP socket (default: 127.0.0.1:7878)
//! 2. **Handshake**: Client sends `hello`, server responds with `welcome`
//! 3. **Controller Assignment**: First client to hello becomes the controller
//! 4. **Observation Streaming**: Every applied command is followed by an observation
//! 5. **Commanding**: Controller places pieces or restarts the game
//!
//! # Message Types
//!
//! ## Client → Server
//!
//! - **hello**: Initial handshake with client info and requested capabilities
//! - **command**: `place` a hand slot at (row, col), or `restart`
//! - **control**: Claim or release controller status
//!
//! ## Server → Client
//!
//! - **welcome**: Assigned role, board size and the shape catalog
//! - **observation**: Board, hand, score, high score and the last placement
//! - **ack**: Command applied
//! - **error**: Error response with code and message
//!
//! # Environment Variables
//!
//! - `BLOCK_PUZZLE_HOST`: Bind address (default: "127.0.0.1")
//! - `BLOCK_PUZZLE_PORT`: Port number (default: 7878)
//! - `BLOCK_PUZZLE_MAX_PENDING`: Command queue depth (default: 16)
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"hello","seq":1,"ts":0,"client":{"name":"bot","version":"0.1.0"},"protocol_version":"1.0.0","requested":{"stream_observations":true}}
//! Server -> Client: {"type":"welcome","seq":1,"ts":0,"protocol_version":"1.0.0","client_id":1,"role":"controller",...}
//! Server -> Client: {"type":"observation","seq":1,"ts":0,"board":{...},"hand":[...],...}
//! Client -> Server: {"type":"command","seq":2,"ts":0,"action":"place","place":{"slot":0,"row":3,"col":2}}
//! Server -> Client: {"type":"ack","seq":2,"ts":0,"status":"ok"}
//! Server -> Client: {"type":"observation","seq":2,...,"last_event":{...}}
//! ```
//!
//! # Testing
//!
//! ```bash
//! nc 127.0.0.1 7878
//! {"type":"hello","seq":1,"ts":0,"client":{"name":"nc","version":"0"},"protocol_version":"1.0.0","requested":{"stream_observations":true}}
//! ```

pub mod host;
pub mod observe;
pub mod protocol;
pub mod runtime;
pub mod server;

pub use block_puzzle_core as core;
pub use block_puzzle_types as types;

pub use host::Host;
pub use observe::build_observation;
pub use protocol::*;
pub use runtime::{Adapter, ClientCommand, InboundCommand, InboundPayload, OutboundMessage};
pub use server::{run_server, ServerConfig};
