use super::error::PeerError;
use crate::constants::{HANDSHAKE_TAIL_LEN, INFO_HASH_LEN, PEER_ID_LEN, PROTOCOL, RESERVED_LEN};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::io::{Read, Write};

/// The handshake each side sends once, before any message frame.
///
/// On the wire:
///
/// ```text
/// [pstrlen:1][pstr:pstrlen][reserved:8][info_hash:20][peer_id:20]
/// ```
///
/// The reserved field is always sent as zeros and ignored when received.
/// Parsing is purely structural: whether the info hash or peer ID are the
/// ones the caller expected is left to the caller.
///
/// # Examples
///
/// ```
/// use peerwire::peer::Handshake;
///
/// let handshake = Handshake::new([0xaa; 20], [0xbb; 20]);
/// let encoded = handshake.encode();
/// assert_eq!(encoded.len(), 68);
///
/// let decoded = Handshake::read_from(&mut &encoded[..]).unwrap();
/// assert_eq!(decoded, handshake);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handshake {
    pstr: Bytes,
    pub info_hash: [u8; INFO_HASH_LEN],
    pub peer_id: [u8; PEER_ID_LEN],
}

impl Handshake {
    /// Creates a handshake with the standard `"BitTorrent protocol"` identifier.
    pub fn new(info_hash: [u8; INFO_HASH_LEN], peer_id: [u8; PEER_ID_LEN]) -> Self {
        Self {
            pstr: Bytes::from_static(PROTOCOL),
            info_hash,
            peer_id,
        }
    }

    /// Creates a handshake with a caller-chosen protocol identifier.
    ///
    /// The identifier must be between 1 and 255 bytes so that its length fits
    /// the single length byte and the result can be parsed back.
    pub fn with_protocol(
        pstr: impl Into<Bytes>,
        info_hash: [u8; INFO_HASH_LEN],
        peer_id: [u8; PEER_ID_LEN],
    ) -> Result<Self, PeerError> {
        let pstr = pstr.into();
        if pstr.is_empty() {
            return Err(PeerError::protocol("empty protocol identifier"));
        }
        if pstr.len() > u8::MAX as usize {
            return Err(PeerError::protocol(format!(
                "protocol identifier too long: {} bytes",
                pstr.len()
            )));
        }
        Ok(Self {
            pstr,
            info_hash,
            peer_id,
        })
    }

    /// Returns the protocol identifier.
    pub fn protocol(&self) -> &[u8] {
        &self.pstr
    }

    /// Returns the number of bytes [`encode`](Self::encode) produces.
    pub fn encoded_len(&self) -> usize {
        1 + self.pstr.len() + HANDSHAKE_TAIL_LEN
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        buf.put_u8(self.pstr.len() as u8);
        buf.put_slice(&self.pstr);
        buf.put_bytes(0, RESERVED_LEN);
        buf.put_slice(&self.info_hash);
        buf.put_slice(&self.peer_id);
        buf.freeze()
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), PeerError> {
        writer.write_all(&self.encode())?;
        Ok(())
    }

    /// Reads one handshake from a blocking stream.
    ///
    /// Fails with [`PeerError::Protocol`] if the length byte is zero, and with
    /// [`PeerError::Io`] if the stream ends before the declared length has
    /// been read.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, PeerError> {
        let mut pstr_len = [0u8; 1];
        reader.read_exact(&mut pstr_len)?;

        let mut body = vec![0u8; Self::body_len(pstr_len[0])?];
        reader.read_exact(&mut body)?;

        Ok(Self::from_body(Bytes::from(body), pstr_len[0]))
    }

    /// Parses a handshake from the start of `data`.
    ///
    /// Trailing bytes after the handshake are ignored.
    pub fn decode(mut data: &[u8]) -> Result<Self, PeerError> {
        Self::read_from(&mut data)
    }

    /// Number of bytes that follow a length byte of `pstr_len`.
    pub(crate) fn body_len(pstr_len: u8) -> Result<usize, PeerError> {
        if pstr_len == 0 {
            return Err(PeerError::protocol("empty protocol identifier"));
        }
        Ok(pstr_len as usize + HANDSHAKE_TAIL_LEN)
    }

    /// Splits a body of exactly `body_len(pstr_len)` bytes into its fields.
    pub(crate) fn from_body(mut body: Bytes, pstr_len: u8) -> Self {
        let pstr = body.split_to(pstr_len as usize);
        body.advance(RESERVED_LEN);

        let mut info_hash = [0u8; INFO_HASH_LEN];
        body.copy_to_slice(&mut info_hash);

        let mut peer_id = [0u8; PEER_ID_LEN];
        body.copy_to_slice(&mut peer_id);

        Self {
            pstr,
            info_hash,
            peer_id,
        }
    }
}
