use thiserror::Error;

/// Specific error types for TapDance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The remote side closed the logical message stream. This is not a
    /// transport failure: the session layer decides whether to reconnect or
    /// terminate.
    #[error("MSG CLOSE")]
    MsgClose,

    /// A recognized but unsupported variant or configuration was reached.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// A timing window with `min > max`.
    #[error("invalid window {name}: min {min} > max {max}")]
    InvalidWindow { name: String, min: u64, max: u64 },

    /// The window follows `connect_to_station` and cannot be set on its own.
    #[error("window {name} is derived from connect_to_station")]
    DerivedWindow { name: String },

    /// Not enough bytes for a tag header.
    #[error("tag header too short: need at least {min} bytes, got {actual}")]
    ShortHeader { min: usize, actual: usize },

    /// Invalid configuration. The string describes why in detail.
    #[error("invalid config: {0}")]
    Config(String),
}

impl Error {
    /// Check if this is the message-close signal.
    pub fn is_msg_close(&self) -> bool {
        matches!(self, Error::MsgClose)
    }

    /// Check if this is the not-implemented signal.
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Error::NotImplemented(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_distinct() {
        let close = Error::MsgClose;
        let ni = Error::NotImplemented("protobuf over upload-only flow".to_string());

        assert!(close.is_msg_close());
        assert!(!close.is_not_implemented());
        assert!(ni.is_not_implemented());
        assert!(!ni.is_msg_close());
        assert_ne!(close, ni);

        let other = Error::ShortHeader { min: 2, actual: 1 };
        assert!(!other.is_msg_close());
        assert!(!other.is_not_implemented());
    }

    #[test]
    fn messages() {
        assert_eq!(Error::MsgClose.to_string(), "MSG CLOSE");
        assert_eq!(
            Error::NotImplemented("x".to_string()).to_string(),
            "not implemented: x"
        );
        assert_eq!(
            Error::ShortHeader { min: 2, actual: 0 }.to_string(),
            "tag header too short: need at least 2 bytes, got 0"
        );
    }

    #[test]
    fn propagates_through_question_mark() {
        fn read() -> Result<(), Error> {
            Err(Error::MsgClose)
        }
        fn session() -> Result<(), Error> {
            read()?;
            Ok(())
        }
        assert!(session().unwrap_err().is_msg_close());
    }
}
