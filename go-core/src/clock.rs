//! Game clock with main time and byo-yomi / Canadian overtime.
//!
//! The clock is event driven. Callers report the start and end of each
//! move; elapsed time is computed from a [`WallClock`] on demand, so no
//! ticker thread is needed. All durations are milliseconds.

use std::fmt::{self, Debug};
use std::sync::Arc;

#[cfg(any(test, feature = "testing"))]
use std::sync::{Mutex, PoisonError};

use crate::stone::Stone;
use crate::time_settings::TimeSettings;

/// Source of the current time.
pub trait WallClock: Send + Sync + Debug {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Real time, through chrono.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemWallClock;

impl WallClock for SystemWallClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A wall clock that only moves when told to.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default)]
pub struct ManualWallClock {
    millis: Mutex<i64>,
}

#[cfg(any(test, feature = "testing"))]
impl ManualWallClock {
    pub fn new(millis: i64) -> Self {
        ManualWallClock {
            millis: Mutex::new(millis),
        }
    }

    pub fn advance(&self, ms: i64) {
        *self.millis.lock().unwrap_or_else(PoisonError::into_inner) += ms;
    }

    pub fn set(&self, ms: i64) {
        *self.millis.lock().unwrap_or_else(PoisonError::into_inner) = ms;
    }
}

#[cfg(any(test, feature = "testing"))]
impl WallClock for ManualWallClock {
    fn now_millis(&self) -> i64 {
        *self.millis.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct TimeRecord {
    /// Time used in the current phase (main time or current period).
    time: i64,
    in_byoyomi: bool,
    moves_left: u32,
    byoyomi_exceeded: bool,
    /// Latched once the side has been seen out of time.
    lost: bool,
}

pub struct Clock {
    to_move: Option<Stone>,
    start_move_time: i64,
    records: [TimeRecord; 2],
    settings: Option<TimeSettings>,
    wall: Arc<dyn WallClock>,
}

impl Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clock")
            .field("to_move", &self.to_move)
            .field("start_move_time", &self.start_move_time)
            .field("records", &self.records)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        Clock::with_wall_clock(Arc::new(SystemWallClock))
    }

    pub fn with_wall_clock(wall: Arc<dyn WallClock>) -> Self {
        Clock {
            to_move: None,
            start_move_time: 0,
            records: [TimeRecord::default(); 2],
            settings: None,
            wall,
        }
    }

    pub fn time_settings(&self) -> Option<TimeSettings> {
        self.settings
    }

    pub fn set_time_settings(&mut self, settings: Option<TimeSettings>) {
        self.settings = settings;
    }

    pub fn is_initialized(&self) -> bool {
        self.settings.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.to_move.is_some()
    }

    /// The side whose clock is running.
    pub fn to_move(&self) -> Option<Stone> {
        self.to_move
    }

    pub fn is_in_byoyomi(&self, stone: Stone) -> bool {
        self.use_byoyomi() && self.record(stone).in_byoyomi
    }

    /// Start the clock of `stone`, completing the running side's move first.
    pub fn start_move(&mut self, stone: Stone) {
        if self.to_move.is_some() {
            self.stop_move();
        }
        self.to_move = Some(stone);
        self.start_move_time = self.wall.now_millis();
    }

    /// Complete the running side's move and apply overtime rules.
    pub fn stop_move(&mut self) {
        let Some(stone) = self.to_move.take() else {
            return;
        };
        let elapsed = self.wall.now_millis() - self.start_move_time;
        let settings = self.settings;
        let record = self.record_mut(stone);
        record.time += elapsed;

        if let Some(settings) = settings {
            match settings.byoyomi() {
                Some(byoyomi) => {
                    let pre = settings.pre_byoyomi_ms() as i64;
                    if !record.in_byoyomi && record.time > pre {
                        record.in_byoyomi = true;
                        record.time -= pre;
                        record.moves_left = byoyomi.moves;
                        tracing::debug!(%stone, "entered byoyomi");
                    }
                    if record.in_byoyomi {
                        if record.time > byoyomi.time_ms as i64 {
                            record.byoyomi_exceeded = true;
                            record.lost = true;
                            tracing::debug!(%stone, time = record.time, "byoyomi period exceeded");
                        }
                        record.moves_left = record.moves_left.saturating_sub(1);
                        if record.moves_left == 0 {
                            record.time = 0;
                            record.moves_left = byoyomi.moves;
                            tracing::debug!(%stone, "byoyomi period completed");
                        }
                    }
                }
                None => {
                    if record.time > settings.pre_byoyomi_ms() as i64 {
                        record.lost = true;
                    }
                }
            }
        }
    }

    /// Stop the running clock without completing a move.
    pub fn halt(&mut self) {
        let Some(stone) = self.to_move.take() else {
            return;
        };
        let elapsed = self.wall.now_millis() - self.start_move_time;
        let settings = self.settings;
        let record = self.record_mut(stone);
        record.time += elapsed;
        if let Some(settings) = settings
            && !settings.use_byoyomi()
            && record.time > settings.pre_byoyomi_ms() as i64
        {
            record.lost = true;
        }
    }

    /// Stop the clock and clear both sides' time.
    pub fn reset(&mut self) {
        self.reset_stone(Stone::Black);
        self.reset_stone(Stone::White);
        self.to_move = None;
    }

    pub fn reset_stone(&mut self, stone: Stone) {
        *self.record_mut(stone) = TimeRecord::default();
    }

    /// Set the remaining time of `stone`, e.g. from a time-left annotation.
    ///
    /// `moves_left` is `Some` if the side is in byo-yomi. A running clock
    /// keeps running for the same side.
    pub fn set_time_left(&mut self, stone: Stone, time_left_ms: i64, moves_left: Option<u32>) {
        let running = self.to_move;
        self.halt();
        let Some(settings) = self.settings else {
            tracing::warn!(%stone, "time left set on a clock without time settings");
            if let Some(running) = running {
                self.start_move(running);
            }
            return;
        };
        let was_lost = self.lost_on_time(stone);
        let record = self.record_mut(stone);
        match (moves_left, settings.byoyomi()) {
            (Some(moves), Some(byoyomi)) => {
                record.in_byoyomi = true;
                record.time = byoyomi.time_ms as i64 - time_left_ms;
                record.moves_left = moves;
                record.byoyomi_exceeded = time_left_ms < 0;
            }
            _ => {
                record.in_byoyomi = false;
                record.time = settings.pre_byoyomi_ms() as i64 - time_left_ms;
                record.moves_left = 0;
                record.byoyomi_exceeded = false;
            }
        }
        record.lost |= was_lost;
        if let Some(running) = running {
            self.start_move(running);
        }
    }

    /// Remaining time in the current phase, including the running move.
    /// `None` without time settings.
    pub fn time_left(&self, stone: Stone) -> Option<i64> {
        let settings = self.settings?;
        let record = self.record(stone);
        let budget = match settings.byoyomi() {
            Some(byoyomi) if record.in_byoyomi => byoyomi.time_ms,
            _ => settings.pre_byoyomi_ms(),
        };
        Some(budget as i64 - self.time_used(stone))
    }

    /// Moves still to play in the current byo-yomi period.
    pub fn moves_left(&self, stone: Stone) -> Option<u32> {
        if self.is_in_byoyomi(stone) {
            Some(self.record(stone).moves_left)
        } else {
            None
        }
    }

    pub fn lost_on_time(&self, stone: Stone) -> bool {
        let Some(settings) = self.settings else {
            return false;
        };
        let record = self.record(stone);
        if record.lost {
            return true;
        }
        if settings.use_byoyomi() {
            record.byoyomi_exceeded
        } else {
            record.time > settings.pre_byoyomi_ms() as i64
        }
    }

    /// Remaining time of `stone` for display, or the time used if the clock
    /// has no settings.
    pub fn time_string(&self, stone: Stone) -> String {
        let used = self.time_used(stone);
        let record = self.record(stone);
        let (time, moves_left) = match self.settings {
            Some(settings) => match settings.byoyomi() {
                Some(byoyomi) if record.in_byoyomi => {
                    (byoyomi.time_ms as i64 - used, Some(record.moves_left))
                }
                _ => (settings.pre_byoyomi_ms() as i64 - used, None),
            },
            None => (used, None),
        };
        format_time(time / 1000, moves_left)
    }

    fn time_used(&self, stone: Stone) -> i64 {
        let mut time = self.record(stone).time;
        if self.to_move == Some(stone) {
            time += self.wall.now_millis() - self.start_move_time;
        }
        time
    }

    fn use_byoyomi(&self) -> bool {
        self.settings.is_some_and(|s| s.use_byoyomi())
    }

    fn record(&self, stone: Stone) -> &TimeRecord {
        &self.records[stone.index()]
    }

    fn record_mut(&mut self, stone: Stone) -> &mut TimeRecord {
        &mut self.records[stone.index()]
    }
}

/// Format seconds as `H:MM:SS` (`MM:SS` below one hour), with a leading
/// `-` for negative values and `/<moves>` when in byo-yomi.
pub fn format_time(seconds: i64, moves_left: Option<u32>) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let total = seconds.unsigned_abs();
    let (hours, minutes, secs) = (total / 3600, total % 3600 / 60, total % 60);
    let mut s = if hours > 0 {
        format!("{sign}{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{sign}{minutes:02}:{secs:02}")
    };
    if let Some(moves) = moves_left {
        s.push_str(&format!("/{moves}"));
    }
    s
}
