use std::fmt;

use rand::Rng as _;

use crate::constants::{CLIENT_PREFIX, PEER_ID_LEN};

/// A 20-byte peer identifier.
///
/// The handshake carries peer IDs as plain `[u8; 20]`; this type adds
/// generation and display on top. Generated IDs follow the Azureus-style
/// format `-PW0001-<12 random bytes>`.
///
/// # Examples
///
/// ```
/// use peerwire::peer::{Handshake, PeerId};
///
/// let peer_id = PeerId::generate();
/// assert_eq!(peer_id.client_id(), Some("PW0001"));
///
/// let handshake = Handshake::new([0u8; 20], peer_id.into());
/// assert_eq!(&handshake.peer_id, peer_id.as_bytes());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeerId(pub [u8; PEER_ID_LEN]);

impl PeerId {
    /// Generates a new random peer ID with the client prefix.
    pub fn generate() -> Self {
        let mut id = [0u8; PEER_ID_LEN];
        id[..CLIENT_PREFIX.len()].copy_from_slice(CLIENT_PREFIX);
        rand::rng().fill(&mut id[CLIENT_PREFIX.len()..]);
        Self(id)
    }

    /// Creates a peer ID from a 20-byte slice.
    ///
    /// Returns `None` if the slice is not exactly 20 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        <[u8; PEER_ID_LEN]>::try_from(bytes).ok().map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; PEER_ID_LEN] {
        &self.0
    }

    /// Returns the client tag between the dashes of an Azureus-style ID,
    /// e.g. `"UT3500"` for `-UT3500-...`.
    pub fn client_id(&self) -> Option<&str> {
        match self.0.split_at(CLIENT_PREFIX.len()).0 {
            [b'-', tag @ .., b'-'] => std::str::from_utf8(tag).ok(),
            _ => None,
        }
    }

    fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
        bytes.iter().try_for_each(|b| write!(f, "{:02x}", b))
    }
}

impl From<[u8; PEER_ID_LEN]> for PeerId {
    fn from(bytes: [u8; PEER_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<PeerId> for [u8; PEER_ID_LEN] {
    fn from(id: PeerId) -> Self {
        id.0
    }
}

/// The full ID as 40 hex digits.
impl fmt::Debug for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PeerId(")?;
        Self::write_hex(f, &self.0)?;
        f.write_str(")")
    }
}

/// `-PW0001-` followed by the hex of the random tail for Azureus-style IDs,
/// plain hex for anything else.
impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.client_id() {
            Some(tag) => {
                write!(f, "-{}-", tag)?;
                Self::write_hex(f, &self.0[CLIENT_PREFIX.len()..])
            }
            None => Self::write_hex(f, &self.0),
        }
    }
}
