//! Transport channel abstraction.
//!
//! The gesture translators and the input mapper receive the channel as an
//! injected `Rc<dyn Transport>`; they never reach for a global handle. The
//! browser implementation is [`SocketChannel`].

mod socket;

use std::rc::Rc;

use thiserror::Error;

use crate::protocol::{Command, ProtocolError};

pub use socket::SocketChannel;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no browser window available")]
    NoWindow,

    #[error("failed to open socket: {0}")]
    Open(String),

    #[error("failed to send frame: {0}")]
    Send(String),

    #[error("channel not connected")]
    NotConnected,

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Fire-and-forget sink for named command events.
pub trait Transport {
    /// Sends `command` once. No acknowledgement, no retry.
    fn emit(&self, command: &Command) -> Result<(), TransportError>;
}

/// Shared channel handle. Equality is identity, so a new connection is a new
/// value for Yew's dependency tracking.
#[derive(Clone)]
pub struct ChannelHandle(pub Rc<SocketChannel>);

impl PartialEq for ChannelHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl ChannelHandle {
    pub fn as_transport(&self) -> Rc<dyn Transport> {
        self.0.clone()
    }
}

/// Identity comparison for optional injected transports.
pub fn same_transport(a: &Option<Rc<dyn Transport>>, b: &Option<Rc<dyn Transport>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingTransport;
    use super::*;

    #[test]
    fn test_same_transport_is_identity() {
        let a: Rc<dyn Transport> = RecordingTransport::shared();
        let b: Rc<dyn Transport> = RecordingTransport::shared();
        assert!(same_transport(&Some(a.clone()), &Some(a.clone())));
        assert!(!same_transport(&Some(a.clone()), &Some(b)));
        assert!(!same_transport(&Some(a), &None));
        assert!(same_transport(&None, &None));
    }

    #[test]
    fn test_protocol_error_converts() {
        let err: TransportError = ProtocolError::EmptyFrame.into();
        assert_eq!(err.to_string(), "empty frame");
    }
}
