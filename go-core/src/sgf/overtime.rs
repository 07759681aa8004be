//! Free-text `OT` values written by common Go programs.

use std::sync::LazyLock;

use regex::Regex;

/// A recognised overtime: `moves` moves per `byoyomi_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Overtime {
    pub moves: i64,
    pub byoyomi_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum OvertimeParse {
    Recognized(Overtime),
    /// Matched a known shape but the numbers do not fit.
    InvalidValues,
    Unknown,
}

/// (pattern, milliseconds per unit of the second number)
static PATTERNS: LazyLock<Vec<(Regex, f64)>> = LazyLock::new(|| {
    [
        // Our own writer
        (r"(?i)^\s*(\d+)\s*moves\s*/\s*(\d+)\s*sec\s*$", 1000.0),
        // Smart Go
        (r"(?i)^\s*(\d+)\s*moves\s*/\s*(\d+)\s*min\s*$", 60_000.0),
        // Kiseido Game Server, CGoban 2
        (r"(?i)^\s*(\d+)x(\d+)\s*byo-yomi\s*$", 1000.0),
        // Quarry, CGoban 2
        (r"(?i)^\s*(\d+)/(\d+)\s*canadian\s*$", 1000.0),
    ]
    .into_iter()
    .map(|(pattern, factor)| (Regex::new(pattern).expect("valid overtime pattern"), factor))
    .collect()
});

pub(crate) fn parse_overtime(value: &str) -> OvertimeParse {
    for (regex, factor) in PATTERNS.iter() {
        let Some(caps) = regex.captures(value) else {
            continue;
        };
        let moves = caps[1].parse::<i64>();
        let time = caps[2].parse::<f64>();
        return match (moves, time) {
            (Ok(moves), Ok(time)) => OvertimeParse::Recognized(Overtime {
                moves,
                byoyomi_ms: time * factor,
            }),
            _ => OvertimeParse::InvalidValues,
        };
    }
    OvertimeParse::Unknown
}
