use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidTime;

const MS_PER_MINUTE: u64 = 60_000;

/// Overtime periods: `moves` moves must be played within `time_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Byoyomi {
    pub time_ms: u64,
    pub moves: u32,
}

/// Time control of a game. All values are milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSettings {
    pre_byoyomi_ms: u64,
    byoyomi: Option<Byoyomi>,
}

impl TimeSettings {
    /// Main time only.
    pub fn new(total_ms: u64) -> Self {
        assert!(total_ms > 0, "main time must be positive");
        TimeSettings {
            pre_byoyomi_ms: total_ms,
            byoyomi: None,
        }
    }

    pub fn with_byoyomi(pre_byoyomi_ms: u64, byoyomi_ms: u64, moves: u32) -> Self {
        assert!(pre_byoyomi_ms > 0, "main time must be positive");
        assert!(byoyomi_ms > 0, "byoyomi time must be positive");
        assert!(moves > 0, "byoyomi moves must be positive");
        TimeSettings {
            pre_byoyomi_ms,
            byoyomi: Some(Byoyomi {
                time_ms: byoyomi_ms,
                moves,
            }),
        }
    }

    pub fn pre_byoyomi_ms(&self) -> u64 {
        self.pre_byoyomi_ms
    }

    pub fn byoyomi(&self) -> Option<Byoyomi> {
        self.byoyomi
    }

    pub fn use_byoyomi(&self) -> bool {
        self.byoyomi.is_some()
    }

    /// Parse `"<minutes>"` or `"<minutes>+<minutes>/<moves>"`.
    pub fn parse(s: &str) -> Result<Self, InvalidTime> {
        let malformed = || InvalidTime::Malformed(s.to_string());
        let minutes = |part: &str| -> Result<u64, InvalidTime> {
            let value: i64 = part.trim().parse().map_err(|_| malformed())?;
            if value <= 0 {
                return Ok(0);
            }
            // Must fit in i64 for the clock.
            value
                .checked_mul(MS_PER_MINUTE as i64)
                .map(|ms| ms as u64)
                .ok_or_else(malformed)
        };

        let Some((main, overtime)) = s.split_once('+') else {
            let pre = minutes(s)?;
            if pre == 0 {
                return Err(InvalidTime::PreByoyomiNotPositive);
            }
            return Ok(TimeSettings::new(pre));
        };
        let (byoyomi, moves) = overtime.split_once('/').ok_or_else(malformed)?;
        let pre = minutes(main)?;
        let byoyomi = minutes(byoyomi)?;
        let moves: i64 = moves.trim().parse().map_err(|_| malformed())?;
        if pre == 0 {
            return Err(InvalidTime::PreByoyomiNotPositive);
        }
        if byoyomi == 0 {
            return Err(InvalidTime::ByoyomiNotPositive);
        }
        if moves <= 0 {
            return Err(InvalidTime::MovesNotPositive);
        }
        let moves = u32::try_from(moves).map_err(|_| malformed())?;
        Ok(TimeSettings::with_byoyomi(pre, byoyomi, moves))
    }
}

/// Inverse of [`TimeSettings::parse`] when all times are whole minutes.
impl fmt::Display for TimeSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pre_byoyomi_ms / MS_PER_MINUTE)?;
        if let Some(byo) = self.byoyomi {
            write!(f, "+{}/{}", byo.time_ms / MS_PER_MINUTE, byo.moves)?;
        }
        Ok(())
    }
}
