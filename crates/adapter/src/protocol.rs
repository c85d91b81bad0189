//! Protocol module - JSON message types for the control adapter
//!
//! Line-delimited JSON. Every message has: type, seq (sequence number), ts
//! (timestamp in ms).

use serde::{Deserialize, Serialize};

use crate::types::{ShapeId, BOARD_SIZE, HAND_SIZE};

/// Protocol version spoken by this adapter
pub const PROTOCOL_VERSION: &str = "1.0.0";

// ============== Client -> Game Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HelloType {
    #[default]
    #[serde(rename = "hello")]
    Hello,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CommandType {
    #[default]
    #[serde(rename = "command")]
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ControlType {
    #[default]
    #[serde(rename = "control")]
    Control,
}

/// Client hello message (first message to establish connection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: HelloType,
    pub seq: u64,
    pub ts: u64,
    pub client: ClientInfo,
    pub protocol_version: String,
    #[serde(default)]
    pub requested: RequestedCapabilities,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestedCapabilities {
    #[serde(default)]
    pub stream_observations: bool,
}

/// Command message (controller only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: CommandType,
    pub seq: u64,
    pub ts: u64,
    pub action: CommandAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<PlaceCommand>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandAction {
    Place,
    Restart,
}

impl<'de> Deserialize<'de> for CommandAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("place") {
            Ok(Self::Place)
        } else if s.eq_ignore_ascii_case("restart") {
            Ok(Self::Restart)
        } else {
            Err(serde::de::Error::custom("invalid command action"))
        }
    }
}

impl Serialize for CommandAction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            CommandAction::Place => serializer.serialize_str("place"),
            CommandAction::Restart => serializer.serialize_str("restart"),
        }
    }
}

/// Drop the piece in `slot` with its top-left cell at (`row`, `col`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceCommand {
    pub slot: usize,
    pub row: i8,
    pub col: i8,
}

/// Control message (claim/release controller status)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: ControlType,
    pub seq: u64,
    pub ts: u64,
    pub action: ControlAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    Claim,
    Release,
}

impl<'de> Deserialize<'de> for ControlAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("claim") {
            Ok(Self::Claim)
        } else if s.eq_ignore_ascii_case("release") {
            Ok(Self::Release)
        } else {
            Err(serde::de::Error::custom("invalid control action"))
        }
    }
}

impl Serialize for ControlAction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            ControlAction::Claim => serializer.serialize_str("claim"),
            ControlAction::Release => serializer.serialize_str("release"),
        }
    }
}

// ============== Game -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WelcomeType {
    #[serde(rename = "welcome")]
    Welcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckType {
    #[serde(rename = "ack")]
    Ack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckStatus {
    #[serde(rename = "ok")]
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    HandshakeRequired,
    ProtocolMismatch,
    NotController,
    ControllerActive,
    InvalidCommand,
    InvalidSlot,
    Rejected,
    GameOver,
    Backpressure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignedRole {
    #[serde(rename = "controller")]
    Controller,
    #[serde(rename = "observer")]
    Observer,
}

/// Shape id serialized by its snake_case name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeName(pub ShapeId);

impl Serialize for ShapeName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ShapeName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        ShapeId::from_str(s)
            .map(ShapeName)
            .ok_or_else(|| serde::de::Error::custom("unknown shape"))
    }
}

/// One catalog entry as advertised in the welcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ShapeName,
    /// `#rrggbb`
    pub color: String,
    pub matrix: Vec<Vec<u8>>,
}

/// Welcome message (response to hello)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: WelcomeType,
    pub seq: u64,
    pub ts: u64,
    pub protocol_version: String,
    pub client_id: u64,
    pub role: AssignedRole,
    pub board_size: u8,
    pub hand_size: usize,
    pub catalog: Vec<CatalogEntry>,
}

/// Acknowledgment for an applied command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: AckType,
    pub seq: u64,
    pub ts: u64,
    pub status: AckStatus,
}

/// Error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: u8,
    /// `1` filled, `0` empty; indexed `[row][col]`
    pub cells: [[u8; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub piece_id: u32,
    pub shape: ShapeName,
    pub color: u32,
    pub placeable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineView {
    /// "row" or "col"
    pub kind: String,
    pub index: u8,
}

/// What the most recent command did, for clients that animate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastEvent {
    pub slot: usize,
    pub piece_id: u32,
    pub row: i8,
    pub col: i8,
    pub cells_placed: usize,
    /// `[row, col]` of every cleared cell
    pub cleared_cells: Vec<[u8; 2]>,
    pub cleared_lines: Vec<LineView>,
    pub points: u32,
    pub refilled: bool,
}

/// Game state observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub ts: u64,
    pub playable: bool,
    pub game_over: bool,
    pub episode_id: u32,
    pub piece_id: u32,
    pub board: BoardSnapshot,
    pub hand: [Option<SlotView>; HAND_SIZE],
    pub score: u32,
    pub high_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_event: Option<LastEvent>,
}

/// Any inbound message, dispatched on its `type` field
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Hello(HelloMessage),
    Command(CommandMessage),
    Control(ControlMessage),
    Unknown(serde_json::Value),
}

/// Parse one protocol line
pub fn parse_message(line: &str) -> Result<ParsedMessage, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(line)?;
    let msg_type = value.get("type").and_then(|t| t.as_str()).unwrap_or("");
    match msg_type {
        "hello" => Ok(ParsedMessage::Hello(serde_json::from_value(value)?)),
        "command" => Ok(ParsedMessage::Command(serde_json::from_value(value)?)),
        "control" => Ok(ParsedMessage::Control(serde_json::from_value(value)?)),
        _ => Ok(ParsedMessage::Unknown(value)),
    }
}

/// Get current timestamp in milliseconds
pub fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

pub fn create_hello(seq: u64, client_name: &str, protocol_version: &str) -> HelloMessage {
    HelloMessage {
        msg_type: HelloType::Hello,
        seq,
        ts: current_timestamp_ms(),
        client: ClientInfo {
            name: client_name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        protocol_version: protocol_version.to_string(),
        requested: RequestedCapabilities {
            stream_observations: true,
        },
    }
}

pub fn create_place_command(seq: u64, slot: usize, row: i8, col: i8) -> CommandMessage {
    CommandMessage {
        msg_type: CommandType::Command,
        seq,
        ts: current_timestamp_ms(),
        action: CommandAction::Place,
        place: Some(PlaceCommand { slot, row, col }),
    }
}

pub fn create_restart_command(seq: u64) -> CommandMessage {
    CommandMessage {
        msg_type: CommandType::Command,
        seq,
        ts: current_timestamp_ms(),
        action: CommandAction::Restart,
        place: None,
    }
}

pub fn create_welcome(seq: u64, client_id: u64, role: AssignedRole) -> WelcomeMessage {
    let catalog = block_puzzle_core::catalog()
        .iter()
        .map(|shape| CatalogEntry {
            id: ShapeName(shape.id()),
            color: shape.color().to_hex(),
            matrix: shape.matrix().iter().map(|row| row.to_vec()).collect(),
        })
        .collect();

    WelcomeMessage {
        msg_type: WelcomeType::Welcome,
        seq,
        ts: current_timestamp_ms(),
        protocol_version: PROTOCOL_VERSION.to_string(),
        client_id,
        role,
        board_size: BOARD_SIZE,
        hand_size: HAND_SIZE,
        catalog,
    }
}

pub fn create_ack(seq: u64) -> AckMessage {
    AckMessage {
        msg_type: AckType::Ack,
        seq,
        ts: current_timestamp_ms(),
        status: AckStatus::Ok,
    }
}

pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_place_command() {
        let line = r#"{"type":"command","seq":3,"ts":0,"action":"PLACE","place":{"slot":2,"row":-1,"col":4}}"#;
        match parse_message(line).unwrap() {
            ParsedMessage::Command(cmd) => {
                assert_eq!(cmd.seq, 3);
                assert_eq!(cmd.action, CommandAction::Place);
                assert_eq!(
                    cmd.place,
                    Some(PlaceCommand {
                        slot: 2,
                        row: -1,
                        col: 4
                    })
                );
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_parse_hello_defaults_requested() {
        let line = r#"{"type":"hello","seq":1,"ts":0,"client":{"name":"t","version":"0"},"protocol_version":"1.0.0"}"#;
        match parse_message(line).unwrap() {
            ParsedMessage::Hello(hello) => assert!(!hello.requested.stream_observations),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_parse_unknown_type() {
        let parsed = parse_message(r#"{"type":"dance","seq":9}"#).unwrap();
        assert!(matches!(parsed, ParsedMessage::Unknown(_)));
    }

    #[test]
    fn test_invalid_action_is_parse_error() {
        let line = r#"{"type":"command","seq":1,"ts":0,"action":"rotate"}"#;
        assert!(parse_message(line).is_err());
    }

    #[test]
    fn test_error_code_wire_names() {
        let err = create_error(4, ErrorCode::InvalidSlot, "empty");
        let v = serde_json::to_value(&err).unwrap();
        assert_eq!(v["type"], "error");
        assert_eq!(v["code"], "invalid_slot");
        assert_eq!(
            serde_json::to_value(ErrorCode::HandshakeRequired).unwrap(),
            "handshake_required"
        );
    }

    #[test]
    fn test_welcome_advertises_catalog() {
        let welcome = create_welcome(1, 7, AssignedRole::Controller);
        let v = serde_json::to_value(&welcome).unwrap();
        assert_eq!(v["board_size"], 8);
        assert_eq!(v["hand_size"], 3);
        assert_eq!(v["role"], "controller");
        assert_eq!(v["catalog"].as_array().unwrap().len(), 9);
        assert_eq!(v["catalog"][8]["id"], "tee");
        assert_eq!(v["catalog"][8]["color"], "#aa00ff");
        assert_eq!(v["catalog"][8]["matrix"][0][1], 1);
    }
}
