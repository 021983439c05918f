use super::error::PeerError;
use crate::constants::{LENGTH_PREFIX_LEN, MAX_MESSAGE_SIZE};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::fmt;
use std::io::{Read, Write};
use tracing::warn;

/// The one-byte discriminant of a typed message.
///
/// Kinds outside the base protocol are kept as [`MessageKind::Unknown`] with
/// their raw byte so that frames from extensions pass through untouched.
/// `Unknown` should only ever carry a byte that is not one of the named kinds;
/// [`From<u8>`] guarantees this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Choke,
    Unchoke,
    Interested,
    NotInterested,
    Have,
    Bitfield,
    Request,
    Piece,
    Cancel,
    Unknown(u8),
}

impl MessageKind {
    /// Returns false for [`MessageKind::Unknown`].
    pub fn is_known(&self) -> bool {
        !matches!(self, MessageKind::Unknown(_))
    }
}

impl From<u8> for MessageKind {
    fn from(value: u8) -> Self {
        match value {
            0 => MessageKind::Choke,
            1 => MessageKind::Unchoke,
            2 => MessageKind::Interested,
            3 => MessageKind::NotInterested,
            4 => MessageKind::Have,
            5 => MessageKind::Bitfield,
            6 => MessageKind::Request,
            7 => MessageKind::Piece,
            8 => MessageKind::Cancel,
            other => MessageKind::Unknown(other),
        }
    }
}

impl From<MessageKind> for u8 {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Choke => 0,
            MessageKind::Unchoke => 1,
            MessageKind::Interested => 2,
            MessageKind::NotInterested => 3,
            MessageKind::Have => 4,
            MessageKind::Bitfield => 5,
            MessageKind::Request => 6,
            MessageKind::Piece => 7,
            MessageKind::Cancel => 8,
            MessageKind::Unknown(code) => code,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageKind::Choke => "Choke",
            MessageKind::Unchoke => "Unchoke",
            MessageKind::Interested => "Interested",
            MessageKind::NotInterested => "NotInterested",
            MessageKind::Have => "Have",
            MessageKind::Bitfield => "Bitfield",
            MessageKind::Request => "Request",
            MessageKind::Piece => "Piece",
            MessageKind::Cancel => "Cancel",
            MessageKind::Unknown(code) => return write!(f, "Unknown#{}", code),
        };
        f.write_str(name)
    }
}

/// A single frame of the peer wire protocol.
///
/// A keep-alive is a frame with length 0. It is distinct from a typed
/// message with an empty payload, which has length 1.
///
/// On the wire:
///
/// ```text
/// keep-alive: [0x00000000]
/// typed:      [length:4 BE][kind:1][payload:length-1]
/// ```
///
/// The payload is opaque to the codec. Helpers for the conventional shapes
/// such as [`parse_request`](super::parse_request) live next to the codec.
///
/// # Examples
///
/// ```
/// use peerwire::peer::{Message, MessageKind};
///
/// use peerwire::constants::BLOCK_SIZE;
///
/// let request = Message::request(7, 0, BLOCK_SIZE);
/// assert_eq!(request.kind(), Some(MessageKind::Request));
/// assert_eq!(request.to_string(), "Request [12]");
///
/// let encoded = request.encode().unwrap();
/// let decoded = Message::read_from(&mut &encoded[..]).unwrap();
/// assert_eq!(decoded, request);
///
/// let keep_alive = Message::read_from(&mut &[0u8; 4][..]).unwrap();
/// assert!(keep_alive.is_keep_alive());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    KeepAlive,
    Typed { kind: MessageKind, payload: Bytes },
}

impl Message {
    pub fn new(kind: MessageKind, payload: impl Into<Bytes>) -> Self {
        Message::Typed {
            kind,
            payload: payload.into(),
        }
    }

    pub fn choke() -> Self {
        Self::new(MessageKind::Choke, Bytes::new())
    }

    pub fn unchoke() -> Self {
        Self::new(MessageKind::Unchoke, Bytes::new())
    }

    pub fn interested() -> Self {
        Self::new(MessageKind::Interested, Bytes::new())
    }

    pub fn not_interested() -> Self {
        Self::new(MessageKind::NotInterested, Bytes::new())
    }

    /// Builds a request for `length` bytes at offset `begin` of piece `index`.
    pub fn request(index: u32, begin: u32, length: u32) -> Self {
        Self::block_message(MessageKind::Request, index, begin, length)
    }

    /// Builds a cancel for a previously sent [`request`](Self::request).
    pub fn cancel(index: u32, begin: u32, length: u32) -> Self {
        Self::block_message(MessageKind::Cancel, index, begin, length)
    }

    fn block_message(kind: MessageKind, index: u32, begin: u32, length: u32) -> Self {
        let mut payload = BytesMut::with_capacity(12);
        payload.put_u32(index);
        payload.put_u32(begin);
        payload.put_u32(length);
        Self::new(kind, payload.freeze())
    }

    /// Returns the kind, or `None` for a keep-alive.
    pub fn kind(&self) -> Option<MessageKind> {
        match self {
            Message::KeepAlive => None,
            Message::Typed { kind, .. } => Some(*kind),
        }
    }

    /// Returns the payload, or `None` for a keep-alive.
    pub fn payload(&self) -> Option<&Bytes> {
        match self {
            Message::KeepAlive => None,
            Message::Typed { payload, .. } => Some(payload),
        }
    }

    pub fn is_keep_alive(&self) -> bool {
        matches!(self, Message::KeepAlive)
    }

    /// Returns the number of bytes [`encode`](Self::encode) produces,
    /// length prefix included.
    pub fn encoded_len(&self) -> usize {
        match self {
            Message::KeepAlive => LENGTH_PREFIX_LEN,
            Message::Typed { payload, .. } => LENGTH_PREFIX_LEN + 1 + payload.len(),
        }
    }

    /// Serializes the frame, length prefix included.
    ///
    /// Fails with [`PeerError::Protocol`] only when the payload is too long
    /// for the 32-bit length prefix. Frames above [`MAX_MESSAGE_SIZE`] still
    /// encode, but a peer reading with the default limit rejects them.
    pub fn encode(&self) -> Result<Bytes, PeerError> {
        let mut buf = BytesMut::with_capacity(self.encoded_len());

        match self {
            Message::KeepAlive => {
                buf.put_u32(0);
            }
            Message::Typed { kind, payload } => {
                buf.put_u32(frame_len(payload.len())?);
                buf.put_u8((*kind).into());
                buf.put_slice(payload);
            }
        }

        Ok(buf.freeze())
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), PeerError> {
        writer.write_all(&self.encode()?)?;
        Ok(())
    }

    /// Reads one frame from a blocking stream.
    ///
    /// A zero length prefix yields [`Message::KeepAlive`]. Frames longer
    /// than [`MAX_MESSAGE_SIZE`] are rejected; use
    /// [`read_from_with_limit`](Self::read_from_with_limit) for another bound.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, PeerError> {
        Self::read_from_with_limit(reader, MAX_MESSAGE_SIZE)
    }

    /// Reads one frame, rejecting a declared length above `max_len` with
    /// [`PeerError::Protocol`] before reading any of its body.
    ///
    /// A stream that ends before the declared length has been read fails
    /// with [`PeerError::Io`].
    pub fn read_from_with_limit<R: Read>(
        reader: &mut R,
        max_len: usize,
    ) -> Result<Self, PeerError> {
        let mut prefix = [0u8; LENGTH_PREFIX_LEN];
        reader.read_exact(&mut prefix)?;

        let length = u32::from_be_bytes(prefix) as usize;
        if length == 0 {
            return Ok(Message::KeepAlive);
        }
        check_frame_len(length, max_len)?;

        let mut body = vec![0u8; length];
        reader.read_exact(&mut body)?;

        Ok(Self::from_body(Bytes::from(body)))
    }

    /// Parses one frame from the start of `data`.
    ///
    /// Trailing bytes after the frame are ignored.
    pub fn decode(mut data: &[u8]) -> Result<Self, PeerError> {
        Self::read_from(&mut data)
    }

    /// Builds a typed message from a non-empty frame body (kind + payload).
    pub(crate) fn from_body(mut body: Bytes) -> Self {
        let kind = MessageKind::from(body.get_u8());
        Message::Typed {
            kind,
            payload: body,
        }
    }
}

/// Value of the length prefix for a typed message with `payload_len` bytes.
pub(crate) fn frame_len(payload_len: usize) -> Result<u32, PeerError> {
    payload_len
        .checked_add(1)
        .and_then(|len| u32::try_from(len).ok())
        .ok_or_else(|| {
            PeerError::protocol(format!(
                "payload of {} bytes does not fit a frame",
                payload_len
            ))
        })
}

pub(crate) fn check_frame_len(length: usize, max_len: usize) -> Result<(), PeerError> {
    if length > max_len {
        warn!(length, max_len, "rejecting oversized frame");
        return Err(PeerError::protocol(format!(
            "message too large: {} > {}",
            length, max_len
        )));
    }
    Ok(())
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::KeepAlive => f.write_str("KeepAlive"),
            Message::Typed { kind, payload } => write!(f, "{} [{}]", kind, payload.len()),
        }
    }
}
