use serde::{Deserialize, Serialize};
use std::fmt;

use crate::point::Point;
use crate::stone::{Colour, Stone};

/// A move: a point (`None` for pass) and a colour.
///
/// The colour is normally black or white; `Colour::Empty` is used for
/// removing a stone in setup contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub point: Option<Point>,
    pub colour: Colour,
}

impl Move {
    pub fn new(point: Option<Point>, colour: Colour) -> Self {
        Move { point, colour }
    }

    pub fn play(stone: Stone, point: Point) -> Self {
        Move {
            point: Some(point),
            colour: stone.into(),
        }
    }

    pub fn pass(stone: Stone) -> Self {
        Move {
            point: None,
            colour: stone.into(),
        }
    }

    pub fn is_pass(&self) -> bool {
        self.point.is_none()
    }

    pub fn stone(&self) -> Option<Stone> {
        self.colour.stone()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.point {
            Some(p) => write!(f, "{} {p}", self.colour),
            None => write!(f, "{} pass", self.colour),
        }
    }
}

/// Insert passes so that the result starts with a move of `to_move` and
/// never has two consecutive moves of the same colour.
pub fn fill_passes(moves: &[Move], mut to_move: Stone) -> Vec<Move> {
    let mut result = Vec::with_capacity(moves.len() * 2);
    for mv in moves {
        if mv.colour != Colour::from(to_move) {
            result.push(Move::pass(to_move));
        }
        result.push(*mv);
        to_move = mv.stone().map_or(to_move.opp(), Stone::opp);
    }
    result
}
