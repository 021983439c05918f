use thiserror::Error;

/// Errors that can occur while encoding or decoding peer wire frames.
///
/// There are exactly two kinds: the stream failed, or the bytes it delivered
/// are structurally unusable. Unknown message kinds and unexpected payload
/// shapes are not errors at the codec level.
#[derive(Debug, Error)]
pub enum PeerError {
    /// Network I/O error, including a stream that ends before a frame is
    /// complete and a transport timeout.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Protocol violation by the peer.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl PeerError {
    pub(crate) fn protocol(msg: impl Into<String>) -> Self {
        PeerError::Protocol(msg.into())
    }

    /// Returns true if this error came from the underlying stream.
    pub fn is_io(&self) -> bool {
        matches!(self, PeerError::Io(_))
    }

    /// Returns true if the peer sent structurally invalid data.
    pub fn is_protocol(&self) -> bool {
        matches!(self, PeerError::Protocol(_))
    }
}
