use crate::point::{MAX_SIZE, Point};
use crate::stone::{Colour, Stone};

/// A snapshot of a position: board size, the colour of every point and the
/// side to move. No rules are applied when stones are set.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    board: Vec<Colour>,
    size: u8,
    to_move: Stone,
}

impl Board {
    /// Create an empty board with Black to move.
    pub fn new(size: u8) -> Self {
        assert!(
            (1..=MAX_SIZE).contains(&size),
            "board size {size} out of range"
        );
        Board {
            board: vec![Colour::Empty; size as usize * size as usize],
            size,
            to_move: Stone::Black,
        }
    }

    /// Build a board from an ASCII layout, top row first.
    /// 'B' = Black, 'W' = White, anything else is empty.
    pub fn from_layout(layout: &[&str]) -> Self {
        let size = layout.len() as u8;
        assert!(
            layout.iter().all(|row| row.chars().count() == size as usize),
            "malformed board layout"
        );
        let mut board = Board::new(size);
        for (row, line) in layout.iter().enumerate() {
            let y = size - 1 - row as u8;
            for (x, c) in line.chars().enumerate() {
                let colour = match c {
                    'B' => Colour::Black,
                    'W' => Colour::White,
                    _ => Colour::Empty,
                };
                board.set(Point::new(x as u8, y), colour);
            }
        }
        board
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn to_move(&self) -> Stone {
        self.to_move
    }

    pub fn set_to_move(&mut self, stone: Stone) {
        self.to_move = stone;
    }

    pub fn on_board(&self, point: Point) -> bool {
        point.x() < self.size && point.y() < self.size
    }

    pub fn colour(&self, point: Point) -> Colour {
        self.board[self.idx(point)]
    }

    pub fn set(&mut self, point: Point, colour: Colour) {
        let idx = self.idx(point);
        self.board[idx] = colour;
    }

    pub fn is_empty(&self) -> bool {
        self.board.iter().all(|c| c.is_empty())
    }

    /// All points of the board, column by column.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.size).flat_map(move |x| (0..self.size).map(move |y| Point::new(x, y)))
    }

    /// Occupied points with their stone colour.
    pub fn stones(&self) -> impl Iterator<Item = (Point, Stone)> + '_ {
        self.points()
            .filter_map(|p| self.colour(p).stone().map(|stone| (p, stone)))
    }

    fn idx(&self, point: Point) -> usize {
        assert!(self.on_board(point), "{point} not on board");
        point.y() as usize * self.size as usize + point.x() as usize
    }
}
