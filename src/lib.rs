//! peerwire - BitTorrent peer wire codec
//!
//! This library encodes and decodes the framing of a BitTorrent peer
//! connection as specified in [BEP-3]: the handshake each side sends once,
//! and the length-prefixed message frames (including the zero-length
//! keep-alive) exchanged afterward.
//!
//! Discovery, piece selection, storage and connection management are left to
//! the caller, which supplies the byte stream and consumes the parsed values.
//!
//! # Modules
//!
//! - [`peer`] - Handshake and message codecs, payload helpers, async transport
//! - [`constants`] - Protocol literals, field widths and tuning defaults
//!
//! # Example
//!
//! ```
//! use peerwire::{Handshake, Message, PeerId};
//! use std::io::Cursor;
//!
//! let mut wire = Vec::new();
//! Handshake::new([0x11; 20], PeerId::generate().into())
//!     .write_to(&mut wire)
//!     .unwrap();
//! Message::interested().write_to(&mut wire).unwrap();
//! Message::KeepAlive.write_to(&mut wire).unwrap();
//!
//! let mut reader = Cursor::new(wire);
//! let handshake = Handshake::read_from(&mut reader).unwrap();
//! assert_eq!(handshake.info_hash, [0x11; 20]);
//! assert_eq!(Message::read_from(&mut reader).unwrap(), Message::interested());
//! assert!(Message::read_from(&mut reader).unwrap().is_keep_alive());
//! ```
//!
//! [BEP-3]: https://www.bittorrent.org/beps/bep_0003.html

pub mod constants;
pub mod peer;

pub use peer::{
    Block, BlockRequest, Handshake, Message, MessageKind, PeerError, PeerId, PeerTransport,
    TransportConfig,
};
