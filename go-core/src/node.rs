use serde::{Deserialize, Serialize};

use crate::moves::Move;
use crate::point::Point;
use crate::stone::Stone;

/// Index of a node inside its [`NodeArena`](crate::game_tree::NodeArena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// An SGF property the reader does not interpret, kept for round-tripping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SgfProperty {
    pub name: String,
    pub values: Vec<String>,
}

/// One step of a game record.
///
/// Structure links (`father`, `children`) are maintained by the arena; the
/// rest is annotation owned by the node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "move")]
    mv: Option<Move>,
    add_black: Vec<Point>,
    add_white: Vec<Point>,
    player: Option<Stone>,
    comment: Option<String>,
    /// Seconds, indexed by stone.
    time_left: [Option<f64>; 2],
    moves_left: [Option<u32>; 2],
    sgf_properties: Vec<SgfProperty>,
    pub(crate) father: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_move(mv: Move) -> Self {
        Node {
            mv: Some(mv),
            ..Node::default()
        }
    }

    pub fn get_move(&self) -> Option<Move> {
        self.mv
    }

    pub fn set_move(&mut self, mv: Option<Move>) {
        self.mv = mv;
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }

    /// Explicit side to move; `None` means it is inferred from the moves.
    pub fn player(&self) -> Option<Stone> {
        self.player
    }

    pub fn set_player(&mut self, player: Option<Stone>) {
        self.player = player;
    }

    pub fn add_black(&mut self, point: Point) {
        self.add_black.push(point);
    }

    pub fn add_white(&mut self, point: Point) {
        self.add_white.push(point);
    }

    pub fn add_stone(&mut self, stone: Stone, point: Point) {
        match stone {
            Stone::Black => self.add_black(point),
            Stone::White => self.add_white(point),
        }
    }

    /// Setup stones of one colour, in insertion order.
    pub fn setup(&self, stone: Stone) -> &[Point] {
        match stone {
            Stone::Black => &self.add_black,
            Stone::White => &self.add_white,
        }
    }

    pub fn has_setup(&self) -> bool {
        !self.add_black.is_empty() || !self.add_white.is_empty()
    }

    pub fn time_left(&self, stone: Stone) -> Option<f64> {
        self.time_left[stone.index()]
    }

    pub fn set_time_left(&mut self, stone: Stone, seconds: f64) {
        self.time_left[stone.index()] = Some(seconds);
    }

    pub fn moves_left(&self, stone: Stone) -> Option<u32> {
        self.moves_left[stone.index()]
    }

    pub fn set_moves_left(&mut self, stone: Stone, moves: u32) {
        self.moves_left[stone.index()] = Some(moves);
    }

    pub fn sgf_properties(&self) -> &[SgfProperty] {
        &self.sgf_properties
    }

    pub fn sgf_property(&self, name: &str) -> Option<&SgfProperty> {
        self.sgf_properties.iter().find(|p| p.name == name)
    }

    /// Store a foreign property, replacing an earlier one of the same name.
    pub fn add_sgf_property(&mut self, name: impl Into<String>, values: Vec<String>) {
        let name = name.into();
        match self.sgf_properties.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.values = values,
            None => self.sgf_properties.push(SgfProperty { name, values }),
        }
    }

    pub fn father(&self) -> Option<NodeId> {
        self.father
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// First child, the main variation.
    pub fn child(&self) -> Option<NodeId> {
        self.children.first().copied()
    }

    /// Panics if `i >= child_count()`.
    pub fn child_at(&self, i: usize) -> NodeId {
        assert!(
            i < self.children.len(),
            "child index {i} out of range ({} children)",
            self.children.len()
        );
        self.children[i]
    }
}
