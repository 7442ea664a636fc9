use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Type of a tetromino.
///
/// The discriminant doubles as the cell tag written into the field, so `0` is
/// reserved for empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 1,
    /// O-piece.
    O = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
    /// T-piece.
    T = 7,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece types in tag order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Returns the nonzero cell tag of this kind.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Looks up the kind stored under a cell tag.
    ///
    /// Returns `None` for `0` (empty) and for tags outside `1..=7`.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::S),
            4 => Some(PieceKind::Z),
            5 => Some(PieceKind::J),
            6 => Some(PieceKind::L),
            7 => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// ```
    /// use genetris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::T => 'T',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }
}

/// Tag that is not `0` and not the tag of any [`PieceKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid cell tag: {tag}")]
pub struct InvalidCellTag {
    tag: u8,
}

impl InvalidCellTag {
    #[must_use]
    pub fn tag(&self) -> u8 {
        self.tag
    }
}

/// A single field or piece cell.
///
/// Stored as its integer tag (`0` = empty, otherwise [`PieceKind::tag`]) so a
/// field row is a plain byte slice. The constructor set keeps the tag valid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Self = Self(0);

    #[must_use]
    pub const fn tag(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the kind of the piece occupying this cell.
    #[must_use]
    pub const fn kind(self) -> Option<PieceKind> {
        PieceKind::from_tag(self.0)
    }

    /// Diagram character: `.` for empty, the kind letter otherwise.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self.kind() {
            Some(kind) => kind.as_char(),
            None => '.',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        if c == '.' {
            return Some(Self::EMPTY);
        }
        match PieceKind::from_char(c) {
            Some(kind) => Some(Self(kind.tag())),
            None => None,
        }
    }
}

impl From<PieceKind> for Cell {
    fn from(kind: PieceKind) -> Self {
        Self(kind.tag())
    }
}

impl TryFrom<u8> for Cell {
    type Error = InvalidCellTag;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        if tag == 0 || PieceKind::from_tag(tag).is_some() {
            Ok(Self(tag))
        } else {
            Err(InvalidCellTag { tag })
        }
    }
}
