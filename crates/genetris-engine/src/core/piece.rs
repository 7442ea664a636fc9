use std::fmt;

use super::cell::{Cell, PieceKind};

/// Capacity of the row-major cell buffer (a 4×4 box).
const PIECE_CAPACITY: usize = 16;

/// A tetromino shape in a tight bounding box.
///
/// Shapes are immutable values: [`Piece::rotated_right`], [`Piece::rotated_left`]
/// and [`Piece::flipped`] return new pieces. Cells are addressed as
/// `(row, column)` with row 0 at the top of the box.
///
/// # Example
///
/// ```
/// use genetris_engine::{Piece, PieceKind};
///
/// let t = Piece::new(PieceKind::T);
/// assert_eq!((t.width(), t.height()), (3, 2));
///
/// let upright = t.rotated_right();
/// assert_eq!((upright.width(), upright.height()), (2, 3));
/// assert_eq!(upright.rotated_left(), t);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    width: usize,
    height: usize,
    cells: [Cell; PIECE_CAPACITY],
}

impl Piece {
    /// Creates a piece in its spawn orientation.
    ///
    /// ```text
    /// I: IIII   O: OO   S: .SS   Z: ZZ.   J: J..   L: ..L   T: .T.
    ///            OO      SS.      .ZZ      JJJ      LLL      TTT
    /// ```
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        #[rustfmt::skip]
        let (width, mask): (usize, &[u8]) = match kind {
            PieceKind::I => (4, &[1, 1, 1, 1]),
            PieceKind::O => (2, &[1, 1,
                                  1, 1]),
            PieceKind::S => (3, &[0, 1, 1,
                                  1, 1, 0]),
            PieceKind::Z => (3, &[1, 1, 0,
                                  0, 1, 1]),
            PieceKind::J => (3, &[1, 0, 0,
                                  1, 1, 1]),
            PieceKind::L => (3, &[0, 0, 1,
                                  1, 1, 1]),
            PieceKind::T => (3, &[0, 1, 0,
                                  1, 1, 1]),
        };
        let mut cells = [Cell::EMPTY; PIECE_CAPACITY];
        for (cell, bit) in cells.iter_mut().zip(mask) {
            if *bit != 0 {
                *cell = Cell::from(kind);
            }
        }
        Self {
            kind,
            width,
            height: mask.len() / width,
            cells,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major occupancy of the bounding box (`width * height` cells).
    #[must_use]
    pub fn flat(&self) -> &[Cell] {
        &self.cells[..self.width * self.height]
    }

    /// Returns the cell at `(row, col)` of the bounding box.
    ///
    /// # Panics
    ///
    /// Panics if the position lies outside the bounding box.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        assert!(
            row < self.height && col < self.width,
            "({row}, {col}) is outside the {}x{} piece box",
            self.width,
            self.height
        );
        self.cells[row * self.width + col]
    }

    /// Iterates over the `(row, col)` positions of occupied cells.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.flat()
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(i, _)| (i / self.width, i % self.width))
    }

    /// Rotates the shape 90° clockwise.
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        let h = self.height;
        self.remap(self.height, self.width, |row, col| (h - 1 - col, row))
    }

    /// Rotates the shape 90° counterclockwise.
    #[must_use]
    pub fn rotated_left(&self) -> Self {
        let w = self.width;
        self.remap(self.height, self.width, |row, col| (col, w - 1 - row))
    }

    /// Rotates the shape 180°.
    #[must_use]
    pub fn flipped(&self) -> Self {
        let (w, h) = (self.width, self.height);
        self.remap(w, h, |row, col| (h - 1 - row, w - 1 - col))
    }

    /// Builds a `width`×`height` piece whose cell `(row, col)` is taken from
    /// `self` at `source(row, col)`.
    fn remap<F>(&self, width: usize, height: usize, source: F) -> Self
    where
        F: Fn(usize, usize) -> (usize, usize),
    {
        let mut cells = [Cell::EMPTY; PIECE_CAPACITY];
        for row in 0..height {
            for col in 0..width {
                let (src_row, src_col) = source(row, col);
                cells[row * width + col] = self.cell(src_row, src_col);
            }
        }
        Self {
            kind: self.kind,
            width,
            height,
            cells,
        }
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Piece")
            .field("kind", &self.kind)
            .field("shape", &format_args!("{self}"))
            .finish()
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.flat().chunks_exact(self.width).enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            for cell in row {
                write!(f, "{}", cell.as_char())?;
            }
        }
        Ok(())
    }
}

/// Orientation of a candidate placement, relative to the spawn shape.
///
/// [`Rotation::ALL`] is the enumeration order used by move search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    Identity,
    Right,
    Flip,
    Left,
}

impl Rotation {
    pub const ALL: [Self; 4] = [
        Rotation::Identity,
        Rotation::Right,
        Rotation::Flip,
        Rotation::Left,
    ];

    #[must_use]
    pub fn apply(self, piece: &Piece) -> Piece {
        match self {
            Rotation::Identity => *piece,
            Rotation::Right => piece.rotated_right(),
            Rotation::Flip => piece.flipped(),
            Rotation::Left => piece.rotated_left(),
        }
    }
}
