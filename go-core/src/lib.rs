//! Go game records: an arena-backed game tree, an SGF reader and writer,
//! and a byo-yomi game clock.

pub mod board;
pub mod clock;
pub mod error;
pub mod game_info;
pub mod game_tree;
pub mod handicap;
pub mod moves;
pub mod node;
pub mod node_ops;
pub mod point;
pub mod sgf;
pub mod stone;
pub mod time_settings;

pub use board::Board;
pub use clock::{Clock, SystemWallClock, WallClock};
pub use error::{InvalidPoint, InvalidTime};
pub use game_info::GameInformation;
pub use game_tree::{GameTree, NodeArena};
pub use moves::Move;
pub use node::{Node, NodeId, SgfProperty};
pub use point::Point;
pub use stone::{Colour, Stone};
pub use time_settings::{Byoyomi, TimeSettings};
