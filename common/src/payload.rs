//! What the fetcher hands over to the storage layer.
//!

use std::fmt::{Display, Formatter};

/// A fetched body, either decoded text or opaque bytes.
///
/// The variant decides how the body is persisted, so a spreadsheet can never be written
/// through a text path by accident.
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Payload {
    /// Decoded text body
    Text(String),
    /// Raw bytes, written verbatim
    Binary(Vec<u8>),
}

impl Payload {
    /// Size of the body in bytes.
    ///
    #[inline]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_binary(&self) -> bool {
        matches!(self, Payload::Binary(_))
    }

    /// Borrow the body as it will land on disk.
    ///
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Text(s) => s.as_bytes(),
            Payload::Binary(b) => b,
        }
    }
}

impl Display for Payload {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Text(s) => write!(f, "text({} bytes)", s.len()),
            Payload::Binary(b) => write!(f, "binary({} bytes)", b.len()),
        }
    }
}
