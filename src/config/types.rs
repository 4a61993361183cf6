use std::fmt;
use std::str::FromStr;

use tracing::level_filters::LevelFilter;

/// Logging detail requested with `-logLevel`, ordered from least to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Trace,
    Debug,
    Spam,
    All,
}

impl LogLevel {
    /// All levels in ascending verbosity.
    pub fn all() -> &'static [LogLevel] {
        &[
            Self::Error,
            Self::Warn,
            Self::Info,
            Self::Trace,
            Self::Debug,
            Self::Spam,
            Self::All,
        ]
    }

    /// Surface spelling accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Spam => "SPAM",
            Self::All => "ALL",
        }
    }

    /// Closest `tracing` filter for this level.
    ///
    /// `TRACE` sits between INFO and DEBUG here, so it maps to `debug`.
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::ERROR,
            Self::Warn => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Trace | Self::Debug => LevelFilter::DEBUG,
            Self::Spam | Self::All => LevelFilter::TRACE,
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Java source compatibility level requested with `-sourceLevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceLevel {
    Java8,
    Java9,
    Java10,
    Java11,
    Java17,
}

impl SourceLevel {
    /// Level used when none is given, or when `auto` is requested.
    pub const DEFAULT: SourceLevel = SourceLevel::Java11;

    pub fn all() -> &'static [SourceLevel] {
        &[
            Self::Java8,
            Self::Java9,
            Self::Java10,
            Self::Java11,
            Self::Java17,
        ]
    }

    /// Canonical spelling, as shown in help and in the resolved configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Java8 => "1.8",
            Self::Java9 => "9",
            Self::Java10 => "10",
            Self::Java11 => "11",
            Self::Java17 => "17",
        }
    }

    /// Alternate spelling accepted on the command line.
    pub fn alt_str(&self) -> &'static str {
        match self {
            Self::Java8 => "8",
            Self::Java9 => "1.9",
            Self::Java10 => "1.10",
            Self::Java11 => "1.11",
            Self::Java17 => "1.17",
        }
    }
}

impl Default for SourceLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for SourceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Self::DEFAULT);
        }
        Self::all()
            .iter()
            .copied()
            .find(|level| level.as_str() == s || level.alt_str() == s)
            .ok_or(())
    }
}
