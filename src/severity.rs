use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::record::Attr;
use crate::value::Value;

/// Importance of a trace event as reported by the database driver.
///
/// Driver codes are ordered so that a larger code means a more verbose
/// event: `Trace` (6) is the chattiest, `None` (1) disables logging on the
/// driver side. Codes the crate does not know are kept in `Other`.
///
/// Equality, hashing and ordering all go through [`Severity::code`], so
/// `Other(4)` and `Info` are the same severity.
#[derive(Debug, Clone, Copy)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    None,
    Other(i32),
}

impl Severity {
    /// Build a severity from the driver's numeric code.
    pub fn from_code(code: i32) -> Self {
        match code {
            6 => Severity::Trace,
            5 => Severity::Debug,
            4 => Severity::Info,
            3 => Severity::Warn,
            2 => Severity::Error,
            1 => Severity::None,
            other => Severity::Other(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Severity::Trace => 6,
            Severity::Debug => 5,
            Severity::Info => 4,
            Severity::Warn => 3,
            Severity::Error => 2,
            Severity::None => 1,
            Severity::Other(code) => code,
        }
    }
}

impl PartialEq for Severity {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for Severity {}

impl Hash for Severity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code().cmp(&other.code())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Severity::from_code(self.code()) {
            Severity::Trace => f.write_str("trace"),
            Severity::Debug => f.write_str("debug"),
            Severity::Info => f.write_str("info"),
            Severity::Warn => f.write_str("warn"),
            Severity::Error => f.write_str("error"),
            Severity::None => f.write_str("none"),
            Severity::Other(code) => write!(f, "invalid level {}", code),
        }
    }
}

/// Level of an emitted log record.
///
/// Levels are plain integers so that values between (or beyond) the named
/// points keep their relative order. The named points leave room for
/// custom levels in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(i32);

impl Level {
    pub const DEBUG: Level = Level(-4);
    pub const INFO: Level = Level(0);
    pub const WARN: Level = Level(4);
    pub const ERROR: Level = Level(8);

    pub const fn new(value: i32) -> Self {
        Level(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    /// Project onto the five `tracing` levels. Anything below `DEBUG` is
    /// treated as `TRACE`.
    pub fn as_tracing(self) -> tracing::Level {
        if self < Level::DEBUG {
            tracing::Level::TRACE
        } else if self < Level::INFO {
            tracing::Level::DEBUG
        } else if self < Level::WARN {
            tracing::Level::INFO
        } else if self < Level::ERROR {
            tracing::Level::WARN
        } else {
            tracing::Level::ERROR
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, base) = if *self < Level::INFO {
            ("DEBUG", Level::DEBUG)
        } else if *self < Level::WARN {
            ("INFO", Level::INFO)
        } else if *self < Level::ERROR {
            ("WARN", Level::WARN)
        } else {
            ("ERROR", Level::ERROR)
        };

        let offset = i64::from(self.0) - i64::from(base.0);
        if offset == 0 {
            f.write_str(name)
        } else {
            write!(f, "{}{:+}", name, offset)
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Map a driver severity onto a record level.
///
/// Known severities map one to one. Everything else is placed at
/// `DEBUG - code`, which keeps verbose driver levels below `DEBUG`, and the
/// raw code is returned as an extra attribute under `severity_key` so that
/// nothing is lost.
pub fn map_severity(severity: Severity, severity_key: &str) -> (Level, Option<Attr>) {
    match Severity::from_code(severity.code()) {
        Severity::Debug => (Level::DEBUG, None),
        Severity::Info => (Level::INFO, None),
        Severity::Warn => (Level::WARN, None),
        Severity::Error => (Level::ERROR, None),
        other => {
            let level = Level(Level::DEBUG.0.saturating_sub(other.code()));
            let extra = Attr::new(severity_key, Value::Int(i64::from(other.code())));
            (level, Some(extra))
        }
    }
}
