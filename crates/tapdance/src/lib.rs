//! Protocol parameters and anti-fingerprinting core for TapDance decoy
//! routing clients.
//!
//! A TapDance client hides a covert session inside what looks like an
//! ordinary TLS connection to a decoy website. A cooperating station on the
//! path picks the session up by a tag embedded in the cover HTTP request. This
//! crate decides how that looks on the wire: the flags and tag bytes, the
//! cipher suites offered in the outer ClientHello, the randomized deadlines
//! and size limits of a session, and the pacing of reconnects to decoys.
//!
//! There is no I/O in here. Connecting to decoys, picking them, generating
//! the cover HTTP traffic and deciding *when* to reconnect is up to the
//! caller.
//!
//! For bottom-up reading, start with [`timing`] and [`constants`], then
//! [`flow`], [`message`] and [`tag`], and finally [`cipher`] and
//! [`backoff`].
//!
//! ## Example usage
//! ```
//! use tapdance::{
//!     Flow, ProtocolFlags, TagHeader, TagKind, TimingPolicy, WindowKind,
//!     force_supported_ciphers_first_u16,
//! };
//!
//! // Built once at startup, shared by all sessions.
//! let policy = TimingPolicy::default();
//!
//! // Each session samples its own deadlines and limits, so that no two
//! // sessions look alike.
//! let mut rng = rand::rng();
//! let connect_deadline = policy.sample_deadline(WindowKind::TcpToDecoy, &mut rng);
//! let send_limit = policy.sample(WindowKind::SendLimit, &mut rng);
//! assert!(policy.send_limit().contains(send_limit));
//! assert!(connect_deadline.as_millis() >= 11_175);
//!
//! // The first bytes of the tag for an upload-only session using the
//! // type+length framing, carried in an incomplete HTTP GET.
//! let header = TagHeader::new(
//!     ProtocolFlags::for_flow(Flow::Upload, true),
//!     TagKind::HttpGetIncomplete,
//! );
//! assert_eq!(header.to_bytes(), [0x81, 0x00]);
//!
//! // The cipher suites of a browser-like ClientHello, with the ones we can
//! // handle moved to the front.
//! let offered = [0x1301, 0x1302, 0xc02b, 0xc02f, 0xc030];
//! let suites = force_supported_ciphers_first_u16(&offered);
//! assert_eq!(suites, vec![0xc02b, 0xc02f, 0x1301, 0x1302, 0xc030]);
//! ```

pub mod backoff;
pub mod cipher;
#[cfg(feature = "config")]
pub mod config;
pub mod constants;
pub mod error;
pub mod flow;
pub mod message;
pub mod tag;
pub mod timing;

pub use crate::backoff::{DelaySignal, backoff_duration, schedule_delay, sleep_before_connect};
pub use crate::cipher::{
    ALWAYS_SUGGESTED, SUPPORTED_CIPHERS, force_supported_ciphers_first,
    force_supported_ciphers_first_u16,
};
pub use crate::error::Error;
pub use crate::flow::Flow;
pub use crate::message::MsgType;
pub use crate::tag::{DecodedFlags, ProtocolFlags, TagHeader, TagKind, decode_flags, encode_flags};
pub use crate::timing::{TimingPolicy, TimingWindow, WindowKind, uniform_random_within};

// re-export so that callers do not need a direct dependency to name suites
pub use rustls::CipherSuite;
