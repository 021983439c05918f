//! Protocol constants and tuning parameters.
//!
//! This module contains the literals and field widths of the peer wire
//! protocol ([BEP-3]) together with the defaults used by
//! [`PeerTransport`](crate::peer::PeerTransport).
//!
//! [BEP-3]: https://www.bittorrent.org/beps/bep_0003.html

use std::time::Duration;

// ============================================================================
// Client identification
// ============================================================================

/// Client ID prefix for peer ID generation (Azureus-style)
pub const CLIENT_PREFIX: &[u8; 8] = b"-PW0001-";

// ============================================================================
// Handshake layout
// ============================================================================

/// Protocol identifier sent by [`Handshake::new`](crate::peer::Handshake::new)
pub const PROTOCOL: &[u8] = b"BitTorrent protocol";

/// Length of the reserved field following the protocol identifier
pub const RESERVED_LEN: usize = 8;

/// Length of an info hash
pub const INFO_HASH_LEN: usize = 20;

/// Length of a peer ID
pub const PEER_ID_LEN: usize = 20;

/// Bytes that follow the protocol identifier: reserved + info hash + peer ID
pub const HANDSHAKE_TAIL_LEN: usize = RESERVED_LEN + INFO_HASH_LEN + PEER_ID_LEN;

/// Total length of a handshake carrying the standard protocol identifier (68)
pub const HANDSHAKE_LEN: usize = 1 + PROTOCOL.len() + HANDSHAKE_TAIL_LEN;

// ============================================================================
// Message framing
// ============================================================================

/// Width of the big-endian length prefix of every message frame
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Largest frame body accepted when reading (16 MiB).
/// A bitfield for a 2^27-piece torrent still fits with room to spare.
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

/// Standard block size requested from peers (16 KiB)
pub const BLOCK_SIZE: u32 = 16384;

// ============================================================================
// Timeouts
// ============================================================================

/// Time to wait for the next frame from a peer.
/// Peers send keep-alives every two minutes at most.
pub const READ_TIMEOUT: Duration = Duration::from_secs(120);

/// Time allowed for a whole frame to be written
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(30);
