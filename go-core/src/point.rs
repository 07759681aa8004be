//! Board intersections.
//!
//! Coordinates are 0-based from the lower-left corner, so `(0, 0)` is "A1".
//! `MAX_SIZE` is chosen so every point prints as one letter and a number;
//! the largest point is "Z25".

use std::fmt;
use std::sync::LazyLock;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::error::InvalidPoint;

pub const MAX_SIZE: u8 = 25;

/// Column letters, skipping I.
const COLUMNS: &[u8; MAX_SIZE as usize] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

static POINTS: LazyLock<Vec<Point>> = LazyLock::new(|| {
    (0..MAX_SIZE)
        .flat_map(|x| (0..MAX_SIZE).map(move |y| Point { x, y }))
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    x: u8,
    y: u8,
}

impl Point {
    /// Interned point for `(x, y)`. Equal coordinates always yield the same
    /// reference for the lifetime of the process.
    ///
    /// Panics if either coordinate is not below `MAX_SIZE`.
    pub fn create(x: u8, y: u8) -> &'static Point {
        assert!(
            x < MAX_SIZE && y < MAX_SIZE,
            "point ({x}, {y}) outside maximum board size"
        );
        &POINTS[x as usize * MAX_SIZE as usize + y as usize]
    }

    /// Point by value; see [`Point::create`].
    pub fn new(x: u8, y: u8) -> Point {
        *Point::create(x, y)
    }

    pub fn x(self) -> u8 {
        self.x
    }

    pub fn y(self) -> u8 {
        self.y
    }

    /// Point above, or `self` on the top edge of a board with `max` rows.
    pub fn up(self, max: u8) -> Point {
        if self.y + 1 < max {
            Point::new(self.x, self.y + 1)
        } else {
            self
        }
    }

    pub fn down(self) -> Point {
        if self.y > 0 {
            Point::new(self.x, self.y - 1)
        } else {
            self
        }
    }

    pub fn left(self) -> Point {
        if self.x > 0 {
            Point::new(self.x - 1, self.y)
        } else {
            self
        }
    }

    /// Point to the right, or `self` on the right edge of a board with
    /// `max` columns.
    pub fn right(self, max: u8) -> Point {
        if self.x + 1 < max {
            Point::new(self.x + 1, self.y)
        } else {
            self
        }
    }

    /// The 4-connected neighbours that are on a board of the given size.
    pub fn adjacent(self, board_size: u8) -> ArrayVec<Point, 4> {
        let mut result = ArrayVec::new();
        if self.x > 0 {
            result.push(Point::new(self.x - 1, self.y));
        }
        if self.x + 1 < board_size {
            result.push(Point::new(self.x + 1, self.y));
        }
        if self.y > 0 {
            result.push(Point::new(self.x, self.y - 1));
        }
        if self.y + 1 < board_size {
            result.push(Point::new(self.x, self.y + 1));
        }
        result
    }

    /// Parse a point in "A1" notation; `Ok(None)` is a pass.
    ///
    /// Parsing is case-insensitive and ignores surrounding whitespace.
    pub fn parse(s: &str, board_size: u8) -> Result<Option<Point>, InvalidPoint> {
        let s = s.trim().to_ascii_uppercase();
        if s == "PASS" {
            return Ok(None);
        }
        let invalid = || InvalidPoint(s.clone());
        let mut chars = s.chars();
        let column = chars.next().ok_or_else(invalid)?;
        let row = chars.as_str();
        if row.is_empty() {
            return Err(invalid());
        }
        let x = COLUMNS
            .iter()
            .position(|&c| c as char == column)
            .ok_or_else(invalid)?;
        let y = row
            .parse::<usize>()
            .ok()
            .and_then(|r| r.checked_sub(1))
            .ok_or_else(invalid)?;
        let size = board_size.min(MAX_SIZE) as usize;
        if x >= size || y >= size {
            return Err(invalid());
        }
        Ok(Some(Point::new(x as u8, y as u8)))
    }

    /// Parse a whitespace separated list of points, failing on the first
    /// invalid one.
    pub fn parse_list(s: &str, board_size: u8) -> Result<Vec<Option<Point>>, InvalidPoint> {
        s.split_whitespace()
            .map(|token| Point::parse(token, board_size))
            .collect()
    }

    /// `"PASS"` for `None`.
    pub fn fmt_optional(point: Option<Point>) -> String {
        match point {
            Some(p) => p.to_string(),
            None => "PASS".to_string(),
        }
    }

    /// Points separated by a single space.
    pub fn fmt_list(points: &[Point]) -> String {
        points
            .iter()
            .map(Point::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", COLUMNS[self.x as usize] as char, self.y as u32 + 1)
    }
}
