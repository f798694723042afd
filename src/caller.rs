use regex::Regex;
use serde::Serialize;
use std::backtrace::Backtrace;
use std::panic::Location;
use std::sync::OnceLock;

use crate::config::{CallerConfig, CallerMode};

/// Source location attributed to a log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caller {
    pub file: String,
    pub line: u32,
    pub function: Option<String>,
}

impl Caller {
    pub fn from_location(location: &Location<'_>) -> Self {
        Caller {
            file: location.file().to_string(),
            line: location.line(),
            function: None,
        }
    }
}

/// Work out the caller for an event of kind `event`.
///
/// `location` is the call site of the inbound hook and is used directly in
/// `Location` mode, and as the fallback when a backtrace has no usable frame.
pub(crate) fn capture(
    config: &CallerConfig,
    event: &str,
    location: &'static Location<'static>,
) -> Option<Caller> {
    match config.mode {
        CallerMode::Off => None,
        CallerMode::Location => Some(Caller::from_location(location)),
        CallerMode::Backtrace => {
            let trace = Backtrace::force_capture().to_string();
            let frames = parse_frames(&trace);
            select_frame(frames, config.depth_for(event))
                .or_else(|| Some(Caller::from_location(location)))
        }
    }
}

struct FramePatterns {
    symbol: Regex,
    location: Regex,
}

static FRAME_PATTERNS: OnceLock<Option<FramePatterns>> = OnceLock::new();

fn frame_patterns() -> Option<&'static FramePatterns> {
    FRAME_PATTERNS
        .get_or_init(|| {
            Some(FramePatterns {
                symbol: Regex::new(r"^\s*\d+:\s+(.+?)\s*$").ok()?,
                location: Regex::new(r"^\s*at\s+(.+):(\d+):\d+\s*$").ok()?,
            })
        })
        .as_ref()
}

/// Parse the `Display` output of a [`Backtrace`] into frames that have a
/// resolved source location.
pub(crate) fn parse_frames(trace: &str) -> Vec<Caller> {
    let Some(patterns) = frame_patterns() else {
        return Vec::new();
    };

    let mut frames = Vec::new();
    let mut symbol: Option<String> = None;

    for line in trace.lines() {
        if let Some(caps) = patterns.location.captures(line) {
            let line_no = caps[2].parse::<u32>().unwrap_or(0);
            frames.push(Caller {
                file: caps[1].to_string(),
                line: line_no,
                function: symbol.clone(),
            });
        } else if let Some(caps) = patterns.symbol.captures(line) {
            symbol = Some(caps[1].to_string());
        }
    }

    frames
}

/// Skip frames owned by the runtime and by this crate, then take the frame
/// `depth` levels above the hook's caller.
pub(crate) fn select_frame(frames: Vec<Caller>, depth: usize) -> Option<Caller> {
    frames
        .into_iter()
        .filter(|frame| !is_internal(frame.function.as_deref().unwrap_or("")))
        .nth(depth)
}

// Runtime entry points show up without a crate path: `fn()` shims, the
// `__rust_*` trampolines, panic entry and the libc start frames.
const INTERNAL_PREFIXES: &[&str] = &[
    "std::",
    "core::",
    "alloc::",
    concat!(env!("CARGO_CRATE_NAME"), "::"),
    "fn(",
    "__rust",
    "rust_begin_unwind",
    "rust_panic",
    "__libc_start",
];

fn is_internal(symbol: &str) -> bool {
    let symbol = symbol.trim_start_matches('<');
    INTERNAL_PREFIXES
        .iter()
        .any(|prefix| symbol.starts_with(prefix))
}
