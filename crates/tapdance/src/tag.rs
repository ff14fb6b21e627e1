//! The tag embedded in the cover HTTP request, and the flags byte that
//! precedes it.
//!
//! The tag header layout:
//! ```text
//! byte 0: flags
//!   bit 7 (0x80): upload-only flow (1) or not (0)
//!   bits 6-1:     reserved, zero on encode, ignored on decode
//!   bit 0 (0x01): use the type+length outer framing
//! byte 1: tag kind code
//! ```
//!
//! Where the header sits inside the cover request is decided by the cover
//! traffic generator, not here.

use log::warn;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::slice::Iter;

use self::TagKind::*;
use crate::Error;
use crate::constants::{
    FLAG_RESERVED_MASK, FLAG_UPLOAD_ONLY, FLAG_USE_TYPE_LEN, TAG_HEADER_LEN, TAG_KIND_NUM,
};
use crate::flow::Flow;

/// The shape of cover traffic wrapping the tag. Compares by code.
#[derive(Debug, Eq, Clone, Copy)]
pub enum TagKind {
    HttpGetIncomplete,
    HttpGetComplete,
    HttpPostIncomplete,
    /// A code this version does not know about.
    Unknown(i8),
}

impl TagKind {
    pub fn iter() -> Iter<'static, TagKind> {
        static KINDS: [TagKind; TAG_KIND_NUM] =
            [HttpGetIncomplete, HttpGetComplete, HttpPostIncomplete];
        KINDS.iter()
    }

    pub const fn code(&self) -> i8 {
        match *self {
            HttpGetIncomplete => 0,
            HttpGetComplete => 1,
            HttpPostIncomplete => 2,
            Unknown(code) => code,
        }
    }

    pub const fn from_code(code: i8) -> Self {
        match code {
            0 => HttpGetIncomplete,
            1 => HttpGetComplete,
            2 => HttpPostIncomplete,
            _ => Unknown(code),
        }
    }

    pub const fn is_known(&self) -> bool {
        !matches!(TagKind::from_code(self.code()), Unknown(_))
    }

    /// The code as it is written on the wire.
    pub const fn to_byte(&self) -> u8 {
        self.code() as u8
    }

    pub const fn from_byte(byte: u8) -> Self {
        TagKind::from_code(byte as i8)
    }
}

impl PartialEq for TagKind {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Hash for TagKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl From<i8> for TagKind {
    fn from(code: i8) -> Self {
        TagKind::from_code(code)
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match TagKind::from_code(self.code()) {
            HttpGetIncomplete => write!(f, "HTTP GET Incomplete"),
            HttpGetComplete => write!(f, "HTTP GET Complete"),
            HttpPostIncomplete => write!(f, "HTTP POST Incomplete"),
            Unknown(code) => write!(f, "{code}"),
        }
    }
}

/// Pack the flags byte. All reserved bits are zero.
pub const fn encode_flags(upload_only: bool, use_type_len: bool) -> u8 {
    let mut flags = 0;
    if upload_only {
        flags |= FLAG_UPLOAD_ONLY;
    }
    if use_type_len {
        flags |= FLAG_USE_TYPE_LEN;
    }
    flags
}

/// The result of decoding a flags byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodedFlags {
    pub upload_only: bool,
    pub use_type_len: bool,
    /// Set if any of bits 1-6 was set. Callers decide whether to reject such
    /// peers or ignore the bits.
    pub reserved_bits_set: bool,
}

/// Unpack a flags byte.
pub const fn decode_flags(byte: u8) -> DecodedFlags {
    DecodedFlags {
        upload_only: byte & FLAG_UPLOAD_ONLY != 0,
        use_type_len: byte & FLAG_USE_TYPE_LEN != 0,
        reserved_bits_set: byte & FLAG_RESERVED_MASK != 0,
    }
}

/// The flags of a session, as placed in the first byte of the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProtocolFlags {
    /// The session is send-only.
    pub upload_only: bool,
    /// Subsequent frames use a type+length header.
    pub use_type_len: bool,
}

impl ProtocolFlags {
    pub const fn new(upload_only: bool, use_type_len: bool) -> Self {
        ProtocolFlags {
            upload_only,
            use_type_len,
        }
    }

    /// Flags for a session running `flow`.
    pub const fn for_flow(flow: Flow, use_type_len: bool) -> Self {
        ProtocolFlags::new(flow.is_upload_only(), use_type_len)
    }

    pub const fn to_byte(&self) -> u8 {
        encode_flags(self.upload_only, self.use_type_len)
    }

    /// Decode flags, dropping reserved bits. Use [`decode_flags`] to learn if
    /// any were set.
    pub const fn from_byte(byte: u8) -> Self {
        let decoded = decode_flags(byte);
        ProtocolFlags::new(decoded.upload_only, decoded.use_type_len)
    }
}

impl From<DecodedFlags> for ProtocolFlags {
    fn from(decoded: DecodedFlags) -> Self {
        ProtocolFlags::new(decoded.upload_only, decoded.use_type_len)
    }
}

/// The flags byte followed by the tag kind byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagHeader {
    pub flags: ProtocolFlags,
    pub tag: TagKind,
}

impl TagHeader {
    pub const fn new(flags: ProtocolFlags, tag: TagKind) -> Self {
        TagHeader { flags, tag }
    }

    pub const fn to_bytes(&self) -> [u8; TAG_HEADER_LEN] {
        [self.flags.to_byte(), self.tag.to_byte()]
    }

    /// Parse the header from the start of `bytes`. Trailing bytes are
    /// ignored. Reserved flag bits and unknown tag codes are tolerated; the
    /// raw decoded flags are returned alongside so that callers can still
    /// reject non-conformant peers.
    pub fn parse(bytes: &[u8]) -> Result<(Self, DecodedFlags), Error> {
        let &[flags, tag, ..] = bytes else {
            return Err(Error::ShortHeader {
                min: TAG_HEADER_LEN,
                actual: bytes.len(),
            });
        };

        let decoded = decode_flags(flags);
        if decoded.reserved_bits_set {
            warn!("tag header: reserved flag bits set in {flags:#04x}");
        }
        let tag = TagKind::from_byte(tag);
        if !tag.is_known() {
            warn!("tag header: unknown tag kind {tag}");
        }

        Ok((TagHeader::new(decoded.into(), tag), decoded))
    }

    /// Like [`TagHeader::parse`], without the raw flags.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Ok(TagHeader::parse(bytes)?.0)
    }
}
