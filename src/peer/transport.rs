use super::error::PeerError;
use super::handshake::Handshake;
use super::message::{check_frame_len, Message};
use super::peer_id::PeerId;
use crate::constants::{LENGTH_PREFIX_LEN, MAX_MESSAGE_SIZE, READ_TIMEOUT, WRITE_TIMEOUT};
use bytes::BytesMut;
use std::io;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::{debug, trace};

/// Timeouts and limits applied by [`PeerTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Time allowed for each bounded read of a frame.
    pub read_timeout: Duration,
    /// Time allowed for writing one frame.
    pub write_timeout: Duration,
    /// Largest frame body accepted.
    pub max_message_size: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            read_timeout: READ_TIMEOUT,
            write_timeout: WRITE_TIMEOUT,
            max_message_size: MAX_MESSAGE_SIZE,
        }
    }
}

/// Drives handshake and message frames over an async byte stream.
///
/// Works with anything that is `AsyncRead + AsyncWrite`, a `TcpStream` or
/// an in-memory duplex alike. Reads only as many bytes as the current frame
/// needs, so the stream can be taken back with [`into_inner`](Self::into_inner)
/// at any frame boundary.
///
/// Expired timeouts surface as [`PeerError::Io`] with
/// [`io::ErrorKind::TimedOut`].
pub struct PeerTransport<S> {
    stream: S,
    config: TransportConfig,
}

impl<S> PeerTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self::with_config(stream, TransportConfig::default())
    }

    pub fn with_config(stream: S, config: TransportConfig) -> Self {
        Self { stream, config }
    }

    pub async fn send_handshake(&mut self, handshake: &Handshake) -> Result<(), PeerError> {
        trace!(info_hash = ?handshake.info_hash, "sending handshake");
        self.write_all(&handshake.encode()).await
    }

    pub async fn receive_handshake(&mut self) -> Result<Handshake, PeerError> {
        let mut pstr_len = [0u8; 1];
        self.read_exact(&mut pstr_len).await?;

        let mut body = BytesMut::zeroed(Handshake::body_len(pstr_len[0])?);
        self.read_exact(&mut body).await?;

        let handshake = Handshake::from_body(body.freeze(), pstr_len[0]);
        debug!(peer_id = %PeerId(handshake.peer_id), "received handshake");
        Ok(handshake)
    }

    pub async fn send_message(&mut self, message: &Message) -> Result<(), PeerError> {
        trace!(%message, "sending message");
        let data = message.encode()?;
        self.write_all(&data).await
    }

    pub async fn receive_message(&mut self) -> Result<Message, PeerError> {
        let mut prefix = [0u8; LENGTH_PREFIX_LEN];
        self.read_exact(&mut prefix).await?;

        let length = u32::from_be_bytes(prefix) as usize;
        let message = if length == 0 {
            Message::KeepAlive
        } else {
            check_frame_len(length, self.config.max_message_size)?;
            let mut body = BytesMut::zeroed(length);
            self.read_exact(&mut body).await?;
            Message::from_body(body.freeze())
        };

        trace!(%message, "received message");
        Ok(message)
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }

    async fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), PeerError> {
        timeout(self.config.read_timeout, self.stream.read_exact(buf))
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "read timed out"))??;
        Ok(())
    }

    async fn write_all(&mut self, data: &[u8]) -> Result<(), PeerError> {
        let stream = &mut self.stream;
        timeout(self.config.write_timeout, async move {
            stream.write_all(data).await?;
            stream.flush().await
        })
        .await
        .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "write timed out"))??;
        Ok(())
    }
}
