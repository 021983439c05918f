//! Peer wire protocol (BEP-3)
//!
//! This module implements the framing of the BitTorrent peer connection: the
//! handshake sent once by each side, and the length-prefixed message frames
//! that follow it.
//!
//! [`Handshake`] and [`Message`] read from any [`std::io::Read`] and encode to
//! plain bytes. [`PeerTransport`] drives the same frames over an async stream
//! with timeouts.

mod error;
mod handshake;
mod message;
mod peer_id;
mod piece;
mod transport;

pub use error::PeerError;
pub use handshake::Handshake;
pub use message::{Message, MessageKind};
pub use peer_id::PeerId;
pub use piece::{copy_piece, parse_have, parse_piece, parse_request, Block, BlockRequest};
pub use transport::{PeerTransport, TransportConfig};
