//! Conventional payload shapes for have, request, cancel, piece and bitfield.
//!
//! The codec treats payloads as opaque bytes. These helpers are for callers
//! that want to build or inspect the shapes the base protocol defines, and
//! they are where shape mismatches become errors.

use super::error::PeerError;
use super::message::{Message, MessageKind};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Index, offset and length of a block, as carried by request and cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockRequest {
    pub piece: u32,
    pub offset: u32,
    pub length: u32,
}

impl BlockRequest {
    pub fn new(piece: u32, offset: u32, length: u32) -> Self {
        Self {
            piece,
            offset,
            length,
        }
    }

    pub fn to_request(&self) -> Message {
        Message::request(self.piece, self.offset, self.length)
    }

    pub fn to_cancel(&self) -> Message {
        Message::cancel(self.piece, self.offset, self.length)
    }
}

/// A block of piece data, as carried by a piece message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub piece: u32,
    pub offset: u32,
    pub data: Bytes,
}

impl Block {
    pub fn new(piece: u32, offset: u32, data: Bytes) -> Self {
        Self {
            piece,
            offset,
            data,
        }
    }

    pub fn request(&self) -> BlockRequest {
        BlockRequest {
            piece: self.piece,
            offset: self.offset,
            length: self.data.len() as u32,
        }
    }
}

impl Message {
    /// Builds a have message announcing piece `index`.
    pub fn have(index: u32) -> Self {
        Self::new(MessageKind::Have, Bytes::copy_from_slice(&index.to_be_bytes()))
    }

    /// Builds a bitfield message from raw bits, high bit of the first byte
    /// being piece 0.
    pub fn bitfield(bits: impl Into<Bytes>) -> Self {
        Self::new(MessageKind::Bitfield, bits)
    }

    /// Builds a piece message carrying `data` at offset `begin` of piece `index`.
    pub fn piece(index: u32, begin: u32, data: &[u8]) -> Self {
        let mut payload = BytesMut::with_capacity(8 + data.len());
        payload.put_u32(index);
        payload.put_u32(begin);
        payload.put_slice(data);
        Self::new(MessageKind::Piece, payload.freeze())
    }
}

impl From<Block> for Message {
    fn from(block: Block) -> Self {
        Message::piece(block.piece, block.offset, &block.data)
    }
}

fn payload_of(message: &Message, expected: MessageKind) -> Result<&Bytes, PeerError> {
    match message {
        Message::Typed { kind, payload } if *kind == expected => Ok(payload),
        other => Err(PeerError::protocol(format!(
            "expected {}, got {}",
            expected, other
        ))),
    }
}

/// Returns the piece index announced by a have message.
pub fn parse_have(message: &Message) -> Result<u32, PeerError> {
    let mut payload = payload_of(message, MessageKind::Have)?.as_ref();
    if payload.len() != 4 {
        return Err(PeerError::protocol(format!(
            "have payload must be 4 bytes, got {}",
            payload.len()
        )));
    }
    Ok(payload.get_u32())
}

/// Returns the block named by a request or cancel message.
pub fn parse_request(message: &Message) -> Result<BlockRequest, PeerError> {
    let mut payload = match message {
        Message::Typed {
            kind: MessageKind::Request | MessageKind::Cancel,
            payload,
        } => payload.as_ref(),
        other => {
            return Err(PeerError::protocol(format!(
                "expected Request or Cancel, got {}",
                other
            )))
        }
    };
    if payload.len() != 12 {
        return Err(PeerError::protocol(format!(
            "request payload must be 12 bytes, got {}",
            payload.len()
        )));
    }
    Ok(BlockRequest {
        piece: payload.get_u32(),
        offset: payload.get_u32(),
        length: payload.get_u32(),
    })
}

/// Returns the block carried by a piece message. The block data shares the
/// message's buffer.
pub fn parse_piece(message: &Message) -> Result<Block, PeerError> {
    let payload = payload_of(message, MessageKind::Piece)?;
    if payload.len() < 8 {
        return Err(PeerError::protocol(format!(
            "piece payload too short: {} bytes",
            payload.len()
        )));
    }
    let mut header = &payload[..8];
    Ok(Block {
        piece: header.get_u32(),
        offset: header.get_u32(),
        data: payload.slice(8..),
    })
}

/// Copies the block of a piece message into `buf` at its offset.
///
/// The message must belong to piece `index` and the block must fit inside
/// `buf`. Returns the number of bytes copied.
pub fn copy_piece(message: &Message, index: u32, buf: &mut [u8]) -> Result<usize, PeerError> {
    let block = parse_piece(message)?;
    if block.piece != index {
        return Err(PeerError::protocol(format!(
            "expected piece {}, got {}",
            index, block.piece
        )));
    }

    let begin = block.offset as usize;
    if begin >= buf.len() {
        return Err(PeerError::protocol(format!(
            "block offset {} out of range for {}-byte piece",
            begin,
            buf.len()
        )));
    }

    let end = begin + block.data.len();
    if end > buf.len() {
        return Err(PeerError::protocol(format!(
            "block of {} bytes at offset {} overruns {}-byte piece",
            block.data.len(),
            begin,
            buf.len()
        )));
    }

    buf[begin..end].copy_from_slice(&block.data);
    Ok(block.data.len())
}
