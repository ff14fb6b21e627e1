//! Payload encodings of a covert message frame.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::slice::Iter;

use self::MsgType::*;
use crate::constants::{MAX_MSG_SIZE, MSG_TYPE_NUM};

/// What a frame carries. Compares by code.
#[derive(Debug, Eq, Clone, Copy)]
pub enum MsgType {
    /// Raw application bytes.
    RawData,
    /// A serialized protobuf message.
    Protobuf,
    /// A code this version does not know about.
    Unknown(i8),
}

impl MsgType {
    pub fn iter() -> Iter<'static, MsgType> {
        static TYPES: [MsgType; MSG_TYPE_NUM] = [RawData, Protobuf];
        TYPES.iter()
    }

    pub const fn code(&self) -> i8 {
        match *self {
            RawData => 1,
            Protobuf => 2,
            Unknown(code) => code,
        }
    }

    pub const fn from_code(code: i8) -> Self {
        match code {
            1 => RawData,
            2 => Protobuf,
            _ => Unknown(code),
        }
    }

    pub const fn is_known(&self) -> bool {
        !matches!(MsgType::from_code(self.code()), Unknown(_))
    }
}

impl PartialEq for MsgType {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Hash for MsgType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl From<i8> for MsgType {
    fn from(code: i8) -> Self {
        MsgType::from_code(code)
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match MsgType::from_code(self.code()) {
            RawData => write!(f, "msg raw_data"),
            Protobuf => write!(f, "msg protobuf"),
            Unknown(code) => write!(f, "{code}"),
        }
    }
}

/// Check if a message of `len` bytes fits a single frame. Larger messages
/// must be chunked by the framing layer.
pub const fn fits_single_message(len: usize) -> bool {
    len <= MAX_MSG_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        assert_eq!(MsgType::RawData.code(), 1);
        assert_eq!(MsgType::Protobuf.code(), 2);
        for t in MsgType::iter() {
            assert!(t.is_known());
            assert_eq!(MsgType::from_code(t.code()), *t);
        }
    }

    #[test]
    fn labels() {
        assert_eq!(MsgType::RawData.to_string(), "msg raw_data");
        assert_eq!(MsgType::Protobuf.to_string(), "msg protobuf");
        assert_eq!(MsgType::from(0).to_string(), "0");
        assert_eq!(MsgType::from(-7).to_string(), "-7");
        assert!(!MsgType::from(3).is_known());
    }

    #[test]
    fn unknown_with_known_code() {
        let t = MsgType::Unknown(2);
        assert_eq!(t, MsgType::Protobuf);
        assert_eq!(MsgType::from_code(t.code()), t);
        assert!(t.is_known());
        assert_eq!(t.to_string(), "msg protobuf");
        assert_ne!(MsgType::Unknown(3), MsgType::Protobuf);
    }

    #[test]
    fn message_size_limit() {
        assert_eq!(MAX_MSG_SIZE, 32_767);
        assert!(fits_single_message(0));
        assert!(fits_single_message(MAX_MSG_SIZE));
        assert!(!fits_single_message(MAX_MSG_SIZE + 1));
    }
}
