//! Loading a [`TimingPolicy`] from TOML.
//!
//! ```toml
//! [timing]
//! timeout = [20000, 30000]
//! send_limit = { start = 14400, end = 15614 }
//! connect_to_station = [11175, 14231]
//! ```
//!
//! All entries are optional. `tcp_to_decoy` and `wait_for_fin_die` always
//! follow `connect_to_station` and have no entries of their own.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::Error;
use crate::timing::{TimingPolicy, TimingWindow, WindowKind};

/// Complete configuration. Parsed to/from TOML.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub timing: Option<TimingConfig>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(&path).map_err(|e| {
            Error::Config(format!("failed to read {}: {e}", path.as_ref().display()))
        })?;
        contents.parse()
    }

    pub fn to_toml_string(&self) -> Result<String, Error> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// The timing policy described by this config, on top of the defaults.
    pub fn timing_policy(&self) -> Result<TimingPolicy, Error> {
        match &self.timing {
            Some(timing) => timing.to_policy(),
            None => Ok(TimingPolicy::default()),
        }
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(|e| Error::Config(e.to_string()))
    }
}

/// Overrides for the windows of a [`TimingPolicy`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TimingConfig {
    pub timeout: Option<RangeFormat>,
    pub send_limit: Option<RangeFormat>,
    pub connect_to_station: Option<RangeFormat>,
}

impl TimingConfig {
    pub fn to_policy(&self) -> Result<TimingPolicy, Error> {
        let window = |kind: WindowKind, range: &Option<RangeFormat>| match range {
            Some(range) => range.to_window(kind),
            None => Ok(kind.default_window()),
        };

        TimingPolicy::default()
            .with_window(
                WindowKind::Timeout,
                window(WindowKind::Timeout, &self.timeout)?,
            )?
            .with_window(
                WindowKind::SendLimit,
                window(WindowKind::SendLimit, &self.send_limit)?,
            )?
            .with_window(
                WindowKind::ConnectToStation,
                window(WindowKind::ConnectToStation, &self.connect_to_station)?,
            )
    }
}

/// A window that can be either a `[min, max]` array or a `{ start, end }`
/// object. This results in a more readable configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RangeFormat {
    Array([u64; 2]),
    Object { start: u64, end: u64 },
}

impl RangeFormat {
    fn to_window(self, kind: WindowKind) -> Result<TimingWindow, Error> {
        let (min, max) = match self {
            RangeFormat::Array([start, end]) => (start, end),
            RangeFormat::Object { start, end } => (start, end),
        };
        TimingWindow::try_new(kind.name(), min, max)
    }
}

impl From<TimingWindow> for RangeFormat {
    fn from(window: TimingWindow) -> Self {
        RangeFormat::Array([window.min(), window.max()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CONNECT_TO_STATION, SEND_LIMIT, TIMEOUT};

    #[test]
    fn empty_config_is_default() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.timing_policy().unwrap(), TimingPolicy::default());

        let config: Config = "[timing]".parse().unwrap();
        assert_eq!(config.timing_policy().unwrap(), TimingPolicy::default());
    }

    #[test]
    fn range_formats() {
        let config: Config = r#"
[timing]
timeout = [1000, 2000]
send_limit = { start = 10, end = 20 }
"#
        .parse()
        .unwrap();
        let policy = config.timing_policy().unwrap();
        assert_eq!(policy.timeout(), TimingWindow::new(1000, 2000));
        assert_eq!(policy.send_limit(), TimingWindow::new(10, 20));
        assert_eq!(policy.connect_to_station(), CONNECT_TO_STATION);
    }

    #[test]
    fn derived_windows_follow_station() {
        let config: Config = r#"
[timing]
connect_to_station = [100, 200]
"#
        .parse()
        .unwrap();
        let policy = config.timing_policy().unwrap();
        assert_eq!(policy.connect_to_station(), TimingWindow::new(100, 200));
        assert_eq!(policy.tcp_to_decoy(), TimingWindow::new(100, 200));
        assert_eq!(policy.wait_for_fin_die(), TimingWindow::new(200, 400));
        assert_eq!(policy.timeout(), TIMEOUT);
        assert_eq!(policy.send_limit(), SEND_LIMIT);
    }

    #[test]
    fn derived_windows_have_no_entries() {
        for entry in ["tcp_to_decoy = [5, 6]", "wait_for_fin_die = [7, 8]"] {
            let r: Result<Config, _> =
                format!("[timing]\nconnect_to_station = [100, 200]\n{entry}").parse();
            assert!(matches!(r, Err(Error::Config(_))), "{entry}");
        }
    }

    #[test]
    fn invalid_window() {
        let config: Config = r#"
[timing]
send_limit = [20, 10]
"#
        .parse()
        .unwrap();
        assert_eq!(
            config.timing_policy(),
            Err(Error::InvalidWindow {
                name: "send_limit".to_string(),
                min: 20,
                max: 10
            })
        );
    }

    #[test]
    fn malformed() {
        let r: Result<Config, _> = "[timing]\ntimeout = [1, 2, 3]".parse();
        assert!(matches!(r, Err(Error::Config(_))));

        let r: Result<Config, _> = "[timing]\ntimeout = \"long\"".parse();
        assert!(matches!(r, Err(Error::Config(_))));

        assert!(matches!(
            Config::from_file("/nonexistent/tapdance.toml"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn toml_round_trip() {
        let config = Config {
            timing: Some(TimingConfig {
                timeout: Some(TIMEOUT.into()),
                send_limit: Some(RangeFormat::Object { start: 1, end: 2 }),
                ..Default::default()
            }),
        };
        let s = config.to_toml_string().unwrap();
        let parsed: Config = s.parse().unwrap();
        assert_eq!(parsed, config);
    }
}
