//! Timing windows bounding the time-sensitive parts of a TapDance session.
//!
//! Every deadline and size limit is a closed interval rather than a single
//! value: callers sample a fresh value from the window for each session so that
//! no two sessions present identical timing signatures on the wire.

use enum_map::{Enum, EnumMap};
use rand::Rng;
use rand_core::RngCore;
use std::fmt;
use std::slice::Iter;
use std::time::Duration;

use self::WindowKind::*;
use crate::Error;
use crate::constants::{
    CONNECT_TO_STATION, SEND_LIMIT, TCP_TO_DECOY, TIMEOUT, WAIT_FOR_FIN_DIE, WINDOW_NUM,
};

/// A closed interval `[min, max]`, with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimingWindow {
    min: u64,
    max: u64,
}

impl TimingWindow {
    /// Create a new window. Panics if `min > max`, which in a `const` context
    /// is a compile-time error.
    pub const fn new(min: u64, max: u64) -> Self {
        assert!(min <= max, "timing window with min > max");
        TimingWindow { min, max }
    }

    /// Create a new window from runtime input, such as a configuration file.
    pub fn try_new(name: &str, min: u64, max: u64) -> Result<Self, Error> {
        if min > max {
            return Err(Error::InvalidWindow {
                name: name.to_string(),
                min,
                max,
            });
        }
        Ok(TimingWindow { min, max })
    }

    /// The lower bound of the window (inclusive).
    pub const fn min(&self) -> u64 {
        self.min
    }

    /// The upper bound of the window (inclusive).
    pub const fn max(&self) -> u64 {
        self.max
    }

    /// Check if a value lies within the window.
    pub const fn contains(&self, value: u64) -> bool {
        self.min <= value && value <= self.max
    }

    /// The window with both bounds doubled, saturating at `u64::MAX`.
    pub const fn doubled(&self) -> Self {
        TimingWindow {
            min: self.min.saturating_mul(2),
            max: self.max.saturating_mul(2),
        }
    }

    /// Sample a value uniformly from `[min, max]`.
    pub fn sample<R: RngCore>(&self, rng: &mut R) -> u64 {
        if self.min == self.max {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }

    /// Sample a value and interpret it as milliseconds.
    pub fn sample_duration<R: RngCore>(&self, rng: &mut R) -> Duration {
        Duration::from_millis(self.sample(rng))
    }
}

impl fmt::Display for TimingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Sample a value uniformly from `[window.min(), window.max()]` using the
/// thread-local RNG.
pub fn uniform_random_within(window: TimingWindow) -> u64 {
    window.sample(&mut rand::rng())
}

/// The named windows of a [`TimingPolicy`].
#[derive(Debug, Enum, Eq, Hash, PartialEq, Clone, Copy)]
pub enum WindowKind {
    /// Deadline for sending a request and getting a response (ms).
    Timeout,
    /// Bytes that may be sent over a single decoy connection.
    SendLimit,
    /// Deadline for the request/response exchange with the station (ms).
    ConnectToStation,
    /// Deadline for establishing the TCP connection to a decoy (ms). Same as
    /// [`WindowKind::ConnectToStation`].
    TcpToDecoy,
    /// Wait for the station's FIN after sending ours on reconnect (ms). Twice
    /// [`WindowKind::ConnectToStation`].
    WaitForFinDie,
}

impl WindowKind {
    pub fn iter() -> Iter<'static, WindowKind> {
        static KINDS: [WindowKind; WINDOW_NUM] = [
            Timeout,
            SendLimit,
            ConnectToStation,
            TcpToDecoy,
            WaitForFinDie,
        ];
        KINDS.iter()
    }

    /// The name used for the window in configuration files.
    pub const fn name(&self) -> &'static str {
        match self {
            Timeout => "timeout",
            SendLimit => "send_limit",
            ConnectToStation => "connect_to_station",
            TcpToDecoy => "tcp_to_decoy",
            WaitForFinDie => "wait_for_fin_die",
        }
    }

    /// Check if the window follows [`WindowKind::ConnectToStation`] instead of
    /// being set on its own.
    pub const fn is_derived(&self) -> bool {
        matches!(self, TcpToDecoy | WaitForFinDie)
    }

    /// The window compiled into the crate.
    pub const fn default_window(&self) -> TimingWindow {
        match self {
            Timeout => TIMEOUT,
            SendLimit => SEND_LIMIT,
            ConnectToStation => CONNECT_TO_STATION,
            TcpToDecoy => TCP_TO_DECOY,
            WaitForFinDie => WAIT_FOR_FIN_DIE,
        }
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The complete set of timing windows used by a client. Built once at
/// startup and read-only afterwards; share it by reference (or `Arc`) across
/// sessions.
///
/// `tcp_to_decoy` always equals `connect_to_station`, and `wait_for_fin_die`
/// is always twice its bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingPolicy {
    windows: EnumMap<WindowKind, TimingWindow>,
}

impl Default for TimingPolicy {
    fn default() -> Self {
        TimingPolicy {
            windows: EnumMap::from_fn(|kind: WindowKind| kind.default_window()),
        }
    }
}

impl TimingPolicy {
    /// Replace a single window, consuming and returning the policy. Replacing
    /// [`WindowKind::ConnectToStation`] also moves the windows derived from
    /// it. Derived windows cannot be replaced on their own.
    pub fn with_window(mut self, kind: WindowKind, window: TimingWindow) -> Result<Self, Error> {
        if kind.is_derived() {
            return Err(Error::DerivedWindow {
                name: kind.name().to_string(),
            });
        }
        self.windows[kind] = window;
        if kind == ConnectToStation {
            self.windows[TcpToDecoy] = window;
            self.windows[WaitForFinDie] = window.doubled();
        }
        Ok(self)
    }

    /// Get the window for `kind`.
    pub fn window(&self, kind: WindowKind) -> TimingWindow {
        self.windows[kind]
    }

    pub fn timeout(&self) -> TimingWindow {
        self.windows[Timeout]
    }

    pub fn send_limit(&self) -> TimingWindow {
        self.windows[SendLimit]
    }

    pub fn connect_to_station(&self) -> TimingWindow {
        self.windows[ConnectToStation]
    }

    pub fn tcp_to_decoy(&self) -> TimingWindow {
        self.windows[TcpToDecoy]
    }

    pub fn wait_for_fin_die(&self) -> TimingWindow {
        self.windows[WaitForFinDie]
    }

    /// Sample a value from the window for `kind`.
    pub fn sample<R: RngCore>(&self, kind: WindowKind, rng: &mut R) -> u64 {
        self.windows[kind].sample(rng)
    }

    /// Sample a deadline from the window for `kind`. Not meaningful for
    /// [`WindowKind::SendLimit`], which is in bytes.
    pub fn sample_deadline<R: RngCore>(&self, kind: WindowKind, rng: &mut R) -> Duration {
        self.windows[kind].sample_duration(rng)
    }
}
