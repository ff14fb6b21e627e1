//! Directional modes of a covert session.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::slice::Iter;

use self::Flow::*;
use crate::constants::FLOW_NUM;

/// The direction(s) a covert session carries data in. Exactly one flow is
/// active per session. The codes are bit-flag style but never combined.
///
/// Flows compare by code: `Unknown(0x1)` is [`Flow::Upload`].
#[derive(Debug, Eq, Clone, Copy)]
pub enum Flow {
    /// The client only sends; the station never writes back.
    Upload,
    /// The client only reads.
    ReadOnly,
    /// Data in both directions.
    Bidirectional,
    /// A code this version does not know about.
    Unknown(i8),
}

impl Flow {
    pub fn iter() -> Iter<'static, Flow> {
        static FLOWS: [Flow; FLOW_NUM] = [Upload, ReadOnly, Bidirectional];
        FLOWS.iter()
    }

    /// The stable code of the flow.
    pub const fn code(&self) -> i8 {
        match *self {
            Upload => 0x1,
            ReadOnly => 0x2,
            Bidirectional => 0x4,
            Unknown(code) => code,
        }
    }

    /// Decode a flow. Never fails: unrecognized codes become
    /// [`Flow::Unknown`].
    pub const fn from_code(code: i8) -> Self {
        match code {
            0x1 => Upload,
            0x2 => ReadOnly,
            0x4 => Bidirectional,
            _ => Unknown(code),
        }
    }

    const fn normalized(&self) -> Self {
        Flow::from_code(self.code())
    }

    pub const fn is_known(&self) -> bool {
        !matches!(self.normalized(), Unknown(_))
    }

    /// Only [`Flow::Upload`] sets the upload-only flag.
    pub const fn is_upload_only(&self) -> bool {
        matches!(self.normalized(), Upload)
    }
}

impl PartialEq for Flow {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Hash for Flow {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl From<i8> for Flow {
    fn from(code: i8) -> Self {
        Flow::from_code(code)
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.normalized() {
            Upload => write!(f, "FlowUpload"),
            ReadOnly => write!(f, "FlowReadOnly"),
            Bidirectional => write!(f, "FlowBidirectional"),
            Unknown(code) => write!(f, "{code}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_stable() {
        assert_eq!(Flow::Upload.code(), 0x1);
        assert_eq!(Flow::ReadOnly.code(), 0x2);
        assert_eq!(Flow::Bidirectional.code(), 0x4);
    }

    #[test]
    fn round_trip() {
        for flow in Flow::iter() {
            assert!(flow.is_known());
            assert_eq!(Flow::from_code(flow.code()), *flow);
            assert_eq!(Flow::from(flow.code()), *flow);
        }
    }

    #[test]
    fn labels() {
        assert_eq!(Flow::Upload.to_string(), "FlowUpload");
        assert_eq!(Flow::ReadOnly.to_string(), "FlowReadOnly");
        assert_eq!(Flow::Bidirectional.to_string(), "FlowBidirectional");
    }

    #[test]
    fn unknown_codes() {
        // 0x3 would be Upload|ReadOnly, which is not a flow
        for code in [0, 0x3, 0x8, -1, i8::MIN, i8::MAX] {
            let flow = Flow::from_code(code);
            assert_eq!(flow, Flow::Unknown(code));
            assert!(!flow.is_known());
            assert_eq!(flow.code(), code);
            assert!(flow.to_string().contains(&code.to_string()));
        }
    }

    #[test]
    fn upload_only() {
        assert!(Flow::Upload.is_upload_only());
        assert!(!Flow::ReadOnly.is_upload_only());
        assert!(!Flow::Bidirectional.is_upload_only());
        assert!(!Flow::Unknown(0x3).is_upload_only());
    }

    #[test]
    fn unknown_with_known_code() {
        let flow = Flow::Unknown(0x1);
        assert_eq!(flow, Flow::Upload);
        assert_eq!(Flow::from_code(flow.code()), flow);
        assert!(flow.is_known());
        assert!(flow.is_upload_only());
        assert_eq!(flow.to_string(), "FlowUpload");
        assert_ne!(Flow::Unknown(0x3), Flow::Upload);

        let flows: HashSet<Flow> = [Flow::Upload, Flow::Unknown(0x1), Flow::Unknown(0x4)]
            .into_iter()
            .collect();
        assert_eq!(flows.len(), 2);
        assert!(flows.contains(&Flow::Bidirectional));
    }
}
