//! Global constants for the TapDance protocol core.

use crate::timing::TimingWindow;

/// The overall deadline, in milliseconds, for sending a TapDance request and
/// getting a response.
pub const TIMEOUT: TimingWindow = TimingWindow::new(20_000, 30_000);

/// The number of bytes that may be sent over a single decoy connection before
/// the session has to move on to a new one.
pub const SEND_LIMIT: TimingWindow = TimingWindow::new(14_400, 15_614);

/// The deadline, in milliseconds, for sending the TapDance request to a
/// station and getting a response.
pub const CONNECT_TO_STATION: TimingWindow = TimingWindow::new(11_175, 14_231);

/// The deadline, in milliseconds, to establish a TCP connection to a decoy.
/// Same bounds as [`CONNECT_TO_STATION`].
pub const TCP_TO_DECOY: TimingWindow = CONNECT_TO_STATION;

/// During reconnects we send a FIN to the station and wait until we get a FIN
/// back. Twice the bounds of [`CONNECT_TO_STATION`], in milliseconds.
pub const WAIT_FOR_FIN_DIE: TimingWindow = CONNECT_TO_STATION.doubled();

/// The largest message, in bytes, that fits a single frame. Larger messages
/// have to be chunked.
pub const MAX_MSG_SIZE: usize = i16::MAX as usize;

/// Flag bit 7: the flow is upload-only.
pub const FLAG_UPLOAD_ONLY: u8 = 1 << 7;

/// Flag bit 0: subsequent frames use the type+length outer framing.
pub const FLAG_USE_TYPE_LEN: u8 = 1 << 0;

/// Mask of the flag bits that are currently unassigned (bits 1-6).
pub const FLAG_RESERVED_MASK: u8 = !(FLAG_UPLOAD_ONLY | FLAG_USE_TYPE_LEN);

/// The size of the tag header (flags byte and tag type byte).
pub const TAG_HEADER_LEN: usize = 2;

/// The number of connection attempts made without any delay.
pub const BACKOFF_FREE_ATTEMPTS: u32 = 2;

/// The growth factor of the delay between connection attempts.
pub const BACKOFF_BASE: u64 = 3;

/// The number of [`Flow`](crate::Flow) variants with a defined code.
pub const FLOW_NUM: usize = 3;

/// The number of [`MsgType`](crate::MsgType) variants with a defined code.
pub const MSG_TYPE_NUM: usize = 2;

/// The number of [`TagKind`](crate::TagKind) variants with a defined code.
pub const TAG_KIND_NUM: usize = 3;

/// The number of named windows in a [`TimingPolicy`](crate::TimingPolicy).
pub const WINDOW_NUM: usize = 5;
