use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;

/// A stone colour. Only Black and White can occupy an intersection or be
/// to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(i8)]
pub enum Stone {
    Black = 1,
    White = -1,
}

impl Stone {
    pub fn opp(self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    /// SGF property letter.
    pub fn letter(self) -> &'static str {
        match self {
            Stone::Black => "B",
            Stone::White => "W",
        }
    }

    /// Slot for per-colour arrays.
    pub(crate) fn index(self) -> usize {
        match self {
            Stone::Black => 0,
            Stone::White => 1,
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stone::Black => write!(f, "Black"),
            Stone::White => write!(f, "White"),
        }
    }
}

/// Tri-state colour of an intersection or of a move.
///
/// `Empty` is a vacant point; as the colour of a setup move it marks the
/// removal of a stone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    Black,
    White,
    #[default]
    Empty,
}

impl Colour {
    pub fn stone(self) -> Option<Stone> {
        match self {
            Colour::Black => Some(Stone::Black),
            Colour::White => Some(Stone::White),
            Colour::Empty => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Colour::Empty
    }
}

impl From<Stone> for Colour {
    fn from(stone: Stone) -> Self {
        match stone {
            Stone::Black => Colour::Black,
            Stone::White => Colour::White,
        }
    }
}

impl From<Option<Stone>> for Colour {
    fn from(stone: Option<Stone>) -> Self {
        stone.map_or(Colour::Empty, Colour::from)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colour::Black => write!(f, "Black"),
            Colour::White => write!(f, "White"),
            Colour::Empty => write!(f, "Empty"),
        }
    }
}
