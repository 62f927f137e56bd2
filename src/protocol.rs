//! Socket.IO (v5) over Engine.IO (v4) text framing.
//!
//! The remote host runs a Socket.IO event server. Over a plain WebSocket the
//! exchange looks like this:
//!
//! ```text
//! host   → page:  0{"sid":"…","pingInterval":25000,"pingTimeout":20000,…}
//! page   → host:  40                      (join the default namespace)
//! host   → page:  40{"sid":"…"}           (namespace joined: connected)
//! page   → host:  42["mouse_move",{"dx":3.0,"dy":-1.5}]
//! host   → page:  2                       (heartbeat ping)
//! page   → host:  3                       (pong)
//! ```
//!
//! Only the default namespace is used. Inbound events, acks and binary
//! packets carry nothing the page consumes and are decoded only far enough to
//! be ignored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Displacement, MouseButton};

/// Client request to join the default namespace.
pub const NAMESPACE_CONNECT: &str = "40";
/// Client notice that it is leaving the default namespace.
pub const NAMESPACE_DISCONNECT: &str = "41";
/// Engine.IO heartbeat reply.
pub const PONG: &str = "3";

#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    #[error("empty frame")]
    EmptyFrame,

    #[error("unknown packet type: {0:?}")]
    UnknownPacketType(char),

    #[error("malformed open payload: {0}")]
    MalformedOpen(String),

    #[error("failed to encode event: {0}")]
    Encode(String),
}

/// Named command events the page sends to the host.
///
/// Serialises to the bare payload object (`{"dx":…,"dy":…}`); the event name
/// comes from [`Command::event_name`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Command {
    MouseMove { dx: f64, dy: f64 },
    MouseClick { button: MouseButton },
    MouseScroll { dy: f64 },
    KeyPress { key: String },
    KeyboardText { text: String },
}

impl Command {
    pub fn event_name(&self) -> &'static str {
        match self {
            Command::MouseMove { .. } => "mouse_move",
            Command::MouseClick { .. } => "mouse_click",
            Command::MouseScroll { .. } => "mouse_scroll",
            Command::KeyPress { .. } => "key_press",
            Command::KeyboardText { .. } => "keyboard_text",
        }
    }

    pub fn mouse_move(d: Displacement) -> Self {
        Command::MouseMove { dx: d.dx, dy: d.dy }
    }

    /// Encodes the command as a Socket.IO EVENT packet wrapped in an
    /// Engine.IO MESSAGE packet.
    pub fn encode(&self) -> Result<String, ProtocolError> {
        let body = serde_json::to_string(&(self.event_name(), self))
            .map_err(|e| ProtocolError::Encode(e.to_string()))?;
        Ok(format!("42{body}"))
    }
}

/// Payload of the Engine.IO OPEN packet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub ping_interval: u64,
    #[serde(default)]
    pub ping_timeout: u64,
}

impl Handshake {
    /// How long the server may stay silent before the link counts as dead:
    /// one ping interval plus the grace period. `None` when the server
    /// announced neither.
    pub fn heartbeat_deadline_ms(&self) -> Option<u32> {
        match self.ping_interval.saturating_add(self.ping_timeout) {
            0 => None,
            total => Some(u32::try_from(total).unwrap_or(u32::MAX)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    Connect,
    Disconnect,
    Event(String),
    ConnectError(String),
    /// ACK and the binary variants.
    Other(char),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    Open(Handshake),
    Close,
    Ping,
    Pong,
    Upgrade,
    Noop,
    Message(SocketPacket),
}

/// Connection lifecycle transitions reported to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Connected,
    Disconnected,
}

/// Liveness watchdog instruction carried by a [`Reaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heartbeat {
    /// Start watching with a fresh deadline.
    Arm { deadline_ms: u32 },
    /// The server is alive: restart the current deadline.
    Rearm,
}

/// What the channel must do after receiving a packet.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Reaction {
    pub reply: Option<&'static str>,
    pub lifecycle: Option<Lifecycle>,
    pub heartbeat: Option<Heartbeat>,
}

fn split_type(frame: &str) -> Result<(char, &str), ProtocolError> {
    let mut chars = frame.chars();
    let kind = chars.next().ok_or(ProtocolError::EmptyFrame)?;
    Ok((kind, chars.as_str()))
}

impl SocketPacket {
    fn decode(body: &str) -> Result<Self, ProtocolError> {
        let (kind, rest) = split_type(body)?;
        Ok(match kind {
            '0' => SocketPacket::Connect,
            '1' => SocketPacket::Disconnect,
            '2' => SocketPacket::Event(rest.to_string()),
            '4' => SocketPacket::ConnectError(rest.to_string()),
            '3' | '5' | '6' => SocketPacket::Other(kind),
            other => return Err(ProtocolError::UnknownPacketType(other)),
        })
    }
}

impl Packet {
    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        let (kind, rest) = split_type(frame)?;
        Ok(match kind {
            '0' => Packet::Open(
                serde_json::from_str(rest).map_err(|e| ProtocolError::MalformedOpen(e.to_string()))?,
            ),
            '1' => Packet::Close,
            '2' => Packet::Ping,
            '3' => Packet::Pong,
            '4' => Packet::Message(SocketPacket::decode(rest)?),
            '5' => Packet::Upgrade,
            '6' => Packet::Noop,
            other => return Err(ProtocolError::UnknownPacketType(other)),
        })
    }

    pub fn reaction(&self) -> Reaction {
        match self {
            Packet::Open(h) => Reaction {
                reply: Some(NAMESPACE_CONNECT),
                heartbeat: h
                    .heartbeat_deadline_ms()
                    .map(|deadline_ms| Heartbeat::Arm { deadline_ms }),
                ..Reaction::default()
            },
            Packet::Ping => Reaction {
                reply: Some(PONG),
                heartbeat: Some(Heartbeat::Rearm),
                ..Reaction::default()
            },
            Packet::Message(SocketPacket::Connect) => Reaction {
                lifecycle: Some(Lifecycle::Connected),
                ..Reaction::default()
            },
            Packet::Close
            | Packet::Message(SocketPacket::Disconnect)
            | Packet::Message(SocketPacket::ConnectError(_)) => Reaction {
                lifecycle: Some(Lifecycle::Disconnected),
                ..Reaction::default()
            },
            _ => Reaction::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Outbound encoding ────────────────────────────────────────────────────

    #[test]
    fn test_mouse_move_encodes_as_event_packet() {
        // Arrange
        let cmd = Command::MouseMove { dx: 3.0, dy: -1.5 };

        // Act
        let frame = cmd.encode().unwrap();

        // Assert
        assert_eq!(frame, r#"42["mouse_move",{"dx":3.0,"dy":-1.5}]"#);
    }

    #[test]
    fn test_mouse_click_carries_lowercase_button() {
        let frame = Command::MouseClick {
            button: MouseButton::Right,
        }
        .encode()
        .unwrap();
        assert_eq!(frame, r#"42["mouse_click",{"button":"right"}]"#);
    }

    #[test]
    fn test_key_and_text_payload_shapes() {
        let key = Command::KeyPress {
            key: "backspace".into(),
        };
        let text = Command::KeyboardText {
            text: "héllo \"q\"".into(),
        };
        assert_eq!(key.encode().unwrap(), r#"42["key_press",{"key":"backspace"}]"#);
        assert_eq!(
            text.encode().unwrap(),
            r#"42["keyboard_text",{"text":"héllo \"q\""}]"#
        );
    }

    #[test]
    fn test_mouse_scroll_payload_has_only_dy() {
        let frame = Command::MouseScroll { dy: 4.5 }.encode().unwrap();
        assert_eq!(frame, r#"42["mouse_scroll",{"dy":4.5}]"#);
    }

    // ── Inbound decoding ─────────────────────────────────────────────────────

    #[test]
    fn test_open_packet_decodes_handshake() {
        let frame = r#"0{"sid":"abc","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;

        let packet = Packet::decode(frame).unwrap();

        match packet {
            Packet::Open(h) => {
                assert_eq!(h.sid, "abc");
                assert_eq!(h.ping_interval, 25000);
                assert_eq!(h.ping_timeout, 20000);
            }
            other => panic!("expected Open, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_open_is_an_error() {
        let err = Packet::decode("0{not json").unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedOpen(_)));
    }

    #[test]
    fn test_empty_and_unknown_frames_are_errors() {
        assert_eq!(Packet::decode(""), Err(ProtocolError::EmptyFrame));
        assert_eq!(Packet::decode("x"), Err(ProtocolError::UnknownPacketType('x')));
        assert_eq!(Packet::decode("4"), Err(ProtocolError::EmptyFrame));
        assert_eq!(Packet::decode("49"), Err(ProtocolError::UnknownPacketType('9')));
    }

    #[test]
    fn test_namespace_packets_decode() {
        assert_eq!(
            Packet::decode(r#"40{"sid":"xyz"}"#).unwrap(),
            Packet::Message(SocketPacket::Connect)
        );
        assert_eq!(
            Packet::decode("41").unwrap(),
            Packet::Message(SocketPacket::Disconnect)
        );
        assert_eq!(
            Packet::decode(r#"42["status",{}]"#).unwrap(),
            Packet::Message(SocketPacket::Event(r#"["status",{}]"#.into()))
        );
    }

    // ── Reactions ────────────────────────────────────────────────────────────

    #[test]
    fn test_open_triggers_namespace_connect() {
        let packet = Packet::decode(r#"0{"sid":"a"}"#).unwrap();
        assert_eq!(
            packet.reaction(),
            Reaction {
                reply: Some(NAMESPACE_CONNECT),
                lifecycle: None,
                heartbeat: None,
            }
        );
    }

    #[test]
    fn test_open_arms_heartbeat_for_interval_plus_timeout() {
        // Arrange
        let frame = r#"0{"sid":"a","pingInterval":25000,"pingTimeout":20000}"#;

        // Act
        let reaction = Packet::decode(frame).unwrap().reaction();

        // Assert
        assert_eq!(reaction.reply, Some(NAMESPACE_CONNECT));
        assert_eq!(
            reaction.heartbeat,
            Some(Heartbeat::Arm {
                deadline_ms: 45_000
            })
        );
    }

    #[test]
    fn test_heartbeat_deadline_saturates() {
        let h = Handshake {
            sid: "a".into(),
            ping_interval: u64::MAX,
            ping_timeout: 1,
        };
        assert_eq!(h.heartbeat_deadline_ms(), Some(u32::MAX));
    }

    #[test]
    fn test_ping_rearms_heartbeat() {
        assert_eq!(Packet::Ping.reaction().heartbeat, Some(Heartbeat::Rearm));
    }

    #[test]
    fn test_only_open_and_ping_touch_heartbeat() {
        for packet in [
            Packet::Close,
            Packet::Pong,
            Packet::Noop,
            Packet::Upgrade,
            Packet::Message(SocketPacket::Connect),
            Packet::Message(SocketPacket::Disconnect),
            Packet::Message(SocketPacket::Event("[]".into())),
        ] {
            assert_eq!(packet.reaction().heartbeat, None, "{packet:?}");
        }
    }

    #[test]
    fn test_ping_is_answered_with_pong() {
        assert_eq!(Packet::Ping.reaction().reply, Some(PONG));
        assert_eq!(Packet::Ping.reaction().lifecycle, None);
    }

    #[test]
    fn test_lifecycle_transitions() {
        assert_eq!(
            Packet::Message(SocketPacket::Connect).reaction().lifecycle,
            Some(Lifecycle::Connected)
        );
        for packet in [
            Packet::Close,
            Packet::Message(SocketPacket::Disconnect),
            Packet::Message(SocketPacket::ConnectError(r#"{"message":"nope"}"#.into())),
        ] {
            assert_eq!(packet.reaction().lifecycle, Some(Lifecycle::Disconnected));
        }
    }

    #[test]
    fn test_other_packets_need_no_reaction() {
        for packet in [
            Packet::Pong,
            Packet::Noop,
            Packet::Upgrade,
            Packet::Message(SocketPacket::Event("[]".into())),
            Packet::Message(SocketPacket::Other('3')),
        ] {
            assert_eq!(packet.reaction(), Reaction::default());
        }
    }
}
