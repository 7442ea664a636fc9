use std::{fmt, str::FromStr};

use crate::PlacementError;

use super::{cell::Cell, piece::Piece};

/// Where a dropped piece came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    /// Field row of the bottom edge of the piece's bounding box.
    pub row: usize,
    /// Number of rows removed by the line clear that followed the drop.
    pub cleared_lines: usize,
}

/// Error parsing a field diagram.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseFieldError {
    #[display("field diagram has no rows")]
    Empty,
    #[display("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("invalid cell character {ch:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, ch: char },
    #[display("diagram of {found} rows does not fit a field of height {height}")]
    TooManyRows { found: usize, height: usize },
}

/// The Tetris playing field.
///
/// A fixed `width`×`height` matrix of [`Cell`]s with row 0 at the top.
/// Dimensions never change after construction; placements are the only way
/// to occupy cells and line clears the only way to empty them again.
///
/// Pieces are positioned by the bottom-left corner of their bounding box:
/// a piece placed at `(bottom_row, left_column)` covers rows
/// `bottom_row + 1 - piece.height() ..= bottom_row` and columns
/// `left_column .. left_column + piece.width()`.
///
/// [`Clone`] produces an independent deep copy, which is how move search
/// simulates candidates without touching the live field.
#[derive(Clone, PartialEq, Eq)]
pub struct Field {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

impl Field {
    pub const DEFAULT_WIDTH: usize = 10;
    pub const DEFAULT_HEIGHT: usize = 22;

    /// Creates an empty field of the standard 10×22 size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_size(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }

    /// Creates an empty field of the given size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn with_size(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "field must not be empty");
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width * height],
        }
    }

    /// Parses `diagram` and aligns its rows with the bottom of an empty
    /// `width`×`height` field.
    ///
    /// The diagram uses the same notation as the [`FromStr`] implementation:
    /// one line per row, `.` for empty cells and piece letters for occupied
    /// ones. Surrounding whitespace and blank lines are ignored.
    ///
    /// ```
    /// use genetris_engine::Field;
    ///
    /// let field = Field::with_bottom_rows(4, 6, "
    ///     I...
    ///     IOO.
    /// ").unwrap();
    /// assert_eq!(field.heights(), [1, 0, 0, 0]);
    /// assert_eq!(field.count_gaps(), 0);
    /// ```
    pub fn with_bottom_rows(
        width: usize,
        height: usize,
        diagram: &str,
    ) -> Result<Self, ParseFieldError> {
        let rows = parse_rows(diagram)?;
        if rows.len() > height {
            return Err(ParseFieldError::TooManyRows {
                found: rows.len(),
                height,
            });
        }
        let mut field = Self::with_size(width, height);
        let offset = height - rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ParseFieldError::RaggedRow {
                    row: i,
                    expected: width,
                    found: row.len(),
                });
            }
            field.row_mut(offset + i).copy_from_slice(row);
        }
        Ok(field)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the field.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        assert!(row < self.height && col < self.width);
        self.cells[row * self.width + col]
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Iterates over one column from top to bottom.
    fn column(&self, col: usize) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().skip(col).step_by(self.width).copied()
    }

    fn row_mut(&mut self, row: usize) -> &mut [Cell] {
        &mut self.cells[row * self.width..][..self.width]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    /// Checks whether the piece's bounding box fits inside the field when
    /// anchored at `(bottom_row, left_column)`.
    fn contains_box(&self, piece: &Piece, bottom_row: usize, left_column: usize) -> bool {
        bottom_row < self.height
            && piece.height() <= bottom_row + 1
            && self.contains_columns(piece, left_column)
    }

    fn contains_columns(&self, piece: &Piece, left_column: usize) -> bool {
        left_column
            .checked_add(piece.width())
            .is_some_and(|right| right <= self.width)
    }

    /// Tests whether the piece can occupy the given position.
    ///
    /// True iff the bounding box lies inside the field and no occupied piece
    /// cell overlaps an occupied field cell.
    #[must_use]
    pub fn can_place(&self, piece: &Piece, bottom_row: usize, left_column: usize) -> bool {
        if !self.contains_box(piece, bottom_row, left_column) {
            return false;
        }
        let top_row = bottom_row + 1 - piece.height();
        piece
            .occupied_cells()
            .all(|(r, c)| self.cell(top_row + r, left_column + c).is_empty())
    }

    /// Writes the piece's occupied cells at the given position.
    ///
    /// Collisions are not checked: occupied field cells under the piece are
    /// overwritten. Validate with [`Field::can_place`] first.
    pub fn place(
        &mut self,
        piece: &Piece,
        bottom_row: usize,
        left_column: usize,
    ) -> Result<(), PlacementError> {
        if !self.contains_box(piece, bottom_row, left_column) {
            return Err(PlacementError::OutOfBounds);
        }
        let top_row = bottom_row + 1 - piece.height();
        let cell = Cell::from(piece.kind());
        for (r, c) in piece.occupied_cells() {
            self.cells[(top_row + r) * self.width + left_column + c] = cell;
        }
        Ok(())
    }

    /// Computes the row a piece would settle at if dropped into `column`.
    ///
    /// The piece enters with its top at row 0 and falls while it fits,
    /// stopping above the first obstruction. Returns `None` if the columns
    /// are out of range or the piece does not fit even at the top.
    #[must_use]
    pub fn drop_row(&self, piece: &Piece, column: usize) -> Option<usize> {
        if !self.contains_columns(piece, column) || piece.height() > self.height {
            return None;
        }
        let mut landing = None;
        for row in piece.height() - 1..self.height {
            if !self.can_place(piece, row, column) {
                break;
            }
            landing = Some(row);
        }
        landing
    }

    /// Drops the piece into `column`, then clears filled lines.
    ///
    /// The field is left untouched on error.
    pub fn try_drop(&mut self, piece: &Piece, column: usize) -> Result<Landing, PlacementError> {
        if !self.contains_columns(piece, column) {
            return Err(PlacementError::OutOfBounds);
        }
        let row = self
            .drop_row(piece, column)
            .ok_or(PlacementError::Blocked)?;
        self.place(piece, row, column)?;
        let cleared_lines = self.clear_lines();
        Ok(Landing { row, cleared_lines })
    }

    /// Like [`Field::try_drop`], for callers that already know the column is
    /// legal.
    ///
    /// # Panics
    ///
    /// Panics if the piece cannot be dropped into `column`. The field is not
    /// modified in that case.
    pub fn drop(&mut self, piece: &Piece, column: usize) -> Landing {
        match self.try_drop(piece, column) {
            Ok(landing) => landing,
            Err(e) => panic!("cannot drop {piece} at column {column}: {e}"),
        }
    }

    /// Removes every filled row and returns how many were removed.
    ///
    /// Remaining rows keep their order and settle at the bottom of the field;
    /// the vacated rows at the top are emptied. Rows with any empty cell,
    /// including completely empty rows, stay where they are relative to each
    /// other.
    pub fn clear_lines(&mut self) -> usize {
        let width = self.width;
        let mut count = 0;
        for row in (0..self.height).rev() {
            let cells = &self.cells[row * width..][..width];
            if cells.iter().all(|c| !c.is_empty()) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.cells
                    .copy_within(row * width..(row + 1) * width, (row + count) * width);
            }
        }
        self.cells[..count * width].fill(Cell::EMPTY);
        count
    }

    /// Counts empty cells lying below the topmost occupied cell of their
    /// column.
    #[must_use]
    pub fn count_gaps(&self) -> usize {
        (0..self.width)
            .map(|col| {
                self.column(col)
                    .skip_while(|c| c.is_empty())
                    .filter(|c| c.is_empty())
                    .count()
            })
            .sum()
    }

    /// Per-column heights, `(height - 1) - top_row`, where `top_row` is the
    /// row of the topmost occupied cell.
    ///
    /// A column whose only block sits on the bottom row has height 0, and so
    /// does an empty column.
    #[must_use]
    pub fn heights(&self) -> Vec<usize> {
        (0..self.width)
            .map(|col| {
                self.column(col)
                    .position(|c| !c.is_empty())
                    .map_or(0, |top_row| self.height - 1 - top_row)
            })
            .collect()
    }
}

fn parse_rows(diagram: &str) -> Result<Vec<Vec<Cell>>, ParseFieldError> {
    let rows = diagram
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(row, line)| {
            line.chars()
                .enumerate()
                .map(|(col, ch)| {
                    Cell::from_char(ch).ok_or(ParseFieldError::InvalidCell { row, col, ch })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;
    if rows.is_empty() {
        return Err(ParseFieldError::Empty);
    }
    Ok(rows)
}

/// Parses a diagram whose rows define the whole field.
///
/// ```
/// use genetris_engine::{Field, PieceKind};
///
/// let field: Field = "
///     ...
///     .T.
///     TTT
/// ".parse().unwrap();
/// assert_eq!((field.width(), field.height()), (3, 3));
/// assert_eq!(field.cell(1, 1).kind(), Some(PieceKind::T));
/// ```
impl FromStr for Field {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = parse_rows(s)?;
        let width = rows[0].len();
        Self::with_bottom_rows(width, rows.len(), s)
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Field {}x{}", self.width, self.height)?;
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Diagnostic rendering with a column ruler and row numbers.
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ruler = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
            f.write_str("   |")?;
            for col in 0..self.width {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", col % 10)?;
            }
            writeln!(f, "|")
        };
        ruler(f)?;
        for (i, row) in self.rows().enumerate() {
            write!(f, "{i:2} |")?;
            for (col, cell) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f, "|")?;
        }
        ruler(f)
    }
}

#[cfg(test)]
mod tests {
    use crate::{PieceKind, Rotation};

    use super::*;

    fn piece(kind: PieceKind) -> Piece {
        Piece::new(kind)
    }

    #[test]
    fn test_new_field_is_empty() {
        let field = Field::new();
        assert_eq!(field.width(), 10);
        assert_eq!(field.height(), 22);
        assert!(field.is_empty());
        assert_eq!(field.count_gaps(), 0);
        assert_eq!(field.heights(), vec![0; 10]);
    }

    #[test]
    fn test_horizontal_i_drop_on_empty_field() {
        let mut field = Field::new();
        let landing = field.drop(&piece(PieceKind::I), 3);
        assert_eq!(
            landing,
            Landing {
                row: 21,
                cleared_lines: 0
            }
        );
        for row in 0..field.height() {
            for col in 0..field.width() {
                let expected = row == 21 && (3..=6).contains(&col);
                assert_eq!(!field.cell(row, col).is_empty(), expected, "({row}, {col})");
            }
        }
    }

    #[test]
    fn test_drop_settles_on_bottom_row_for_every_shape() {
        for kind in PieceKind::ALL {
            for rotation in Rotation::ALL {
                let p = rotation.apply(&piece(kind));
                for col in 0..=Field::DEFAULT_WIDTH - p.width() {
                    assert_eq!(Field::new().drop_row(&p, col), Some(21), "{p} at {col}");
                }
            }
        }
    }

    #[test]
    fn test_drop_row_rejects_out_of_range_columns() {
        let field = Field::new();
        let i = piece(PieceKind::I);
        assert_eq!(field.drop_row(&i, 6), Some(21));
        assert_eq!(field.drop_row(&i, 7), None);
        assert_eq!(field.drop_row(&i, usize::MAX), None);
    }

    #[test]
    fn test_drop_row_stops_at_first_obstruction() {
        // An overhang at row 2 hides an empty pocket below it.
        let field = Field::with_bottom_rows(
            4,
            5,
            "
            IIII
            ....
            ....
            ",
        )
        .unwrap();
        let o = piece(PieceKind::O);
        assert_eq!(field.drop_row(&o, 0), Some(1));
    }

    #[test]
    fn test_drop_row_none_when_top_is_blocked() {
        let field: Field = "
            O.
            O.
        "
        .parse()
        .unwrap();
        assert_eq!(field.drop_row(&piece(PieceKind::O), 0), None);
    }

    #[test]
    fn test_drop_on_stack() {
        let mut field = Field::new();
        field.drop(&piece(PieceKind::O), 0);
        let landing = field.drop(&piece(PieceKind::O), 1);
        assert_eq!(landing.row, 19);
        assert_eq!(field.heights()[..3], [1, 3, 3]);
    }

    #[test]
    fn test_try_drop_errors_leave_field_untouched() {
        let mut field: Field = "
            ..
            O.
            O.
        "
        .parse()
        .unwrap();
        let before = field.clone();
        assert_eq!(
            field.try_drop(&piece(PieceKind::I), 0),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(
            field.try_drop(&piece(PieceKind::O), 0),
            Err(PlacementError::Blocked)
        );
        assert_eq!(field, before);
    }

    #[test]
    #[should_panic(expected = "cannot drop")]
    fn test_drop_panics_on_illegal_column() {
        Field::new().drop(&piece(PieceKind::I), 8);
    }

    #[test]
    fn test_can_place_bounds() {
        let field = Field::new();
        let t = piece(PieceKind::T);
        assert!(field.can_place(&t, 1, 0));
        assert!(!field.can_place(&t, 0, 0));
        assert!(field.can_place(&t, 21, 7));
        assert!(!field.can_place(&t, 21, 8));
        assert!(!field.can_place(&t, 22, 0));
    }

    #[test]
    fn test_can_place_ignores_empty_piece_cells() {
        let field = Field::with_bottom_rows(
            3,
            4,
            "
            T.T
            ",
        )
        .unwrap();
        // The T's stem fits into the gap, its empty corners overlap the blocks.
        assert!(field.can_place(&piece(PieceKind::T).flipped(), 3, 0));
        assert!(!field.can_place(&piece(PieceKind::T), 3, 0));
    }

    #[test]
    fn test_legal_placement_never_overwrites() {
        let mut field = Field::new();
        let pieces = [
            (PieceKind::I, 0),
            (PieceKind::O, 4),
            (PieceKind::T, 6),
            (PieceKind::S, 1),
            (PieceKind::J, 0),
        ];
        for (kind, col) in pieces {
            let p = piece(kind);
            let row = field.drop_row(&p, col).unwrap();
            assert!(field.can_place(&p, row, col));
            let before = field.clone();
            field.place(&p, row, col).unwrap();
            let top = row + 1 - p.height();
            for (r, c) in p.occupied_cells() {
                assert!(before.cell(top + r, col + c).is_empty());
            }
        }
    }

    #[test]
    fn test_place_out_of_bounds_is_noop() {
        let mut field = Field::new();
        let before = field.clone();
        assert_eq!(
            field.place(&piece(PieceKind::I), 21, 7),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(field, before);
    }

    #[test]
    fn test_place_overwrites_without_collision_check() {
        let mut field = Field::with_bottom_rows(2, 4, "OO\nOO").unwrap();
        field.place(&piece(PieceKind::I).rotated_right(), 3, 0).unwrap();
        assert_eq!(field.cell(0, 0).kind(), Some(PieceKind::I));
        assert_eq!(field.cell(3, 0).kind(), Some(PieceKind::I));
        assert_eq!(field.cell(3, 1).kind(), Some(PieceKind::O));
    }

    #[test]
    fn test_clear_lines_removes_full_rows_and_shifts() {
        let mut field = Field::with_bottom_rows(
            4,
            6,
            "
            .T..
            IIII
            TT.T
            OOOO
            ",
        )
        .unwrap();
        let cleared = field.clear_lines();
        assert_eq!(cleared, 2);
        let expected = Field::with_bottom_rows(
            4,
            6,
            "
            .T..
            TT.T
            ",
        )
        .unwrap();
        assert_eq!(field, expected);
        assert_eq!(field.rows().count(), 6);
    }

    #[test]
    fn test_clear_lines_keeps_empty_rows() {
        let mut field = Field::with_bottom_rows(
            3,
            5,
            "
            J..
            ...
            JJJ
            L.L
            ",
        )
        .unwrap();
        assert_eq!(field.clear_lines(), 1);
        let expected = Field::with_bottom_rows(
            3,
            5,
            "
            J..
            ...
            L.L
            ",
        )
        .unwrap();
        assert_eq!(field, expected);
    }

    #[test]
    fn test_clear_lines_is_idempotent() {
        let mut field = Field::with_bottom_rows(
            3,
            4,
            "
            SS.
            SSS
            .ZZ
            ZZZ
            ",
        )
        .unwrap();
        assert_eq!(field.clear_lines(), 2);
        let once = field.clone();
        assert_eq!(field.clear_lines(), 0);
        assert_eq!(field, once);
    }

    #[test]
    fn test_clear_lines_all_filled() {
        let mut field = Field::with_bottom_rows(2, 3, "OO\nOO\nOO").unwrap();
        assert_eq!(field.clear_lines(), 3);
        assert!(field.is_empty());
    }

    #[test]
    fn test_drop_clears_completed_line() {
        let mut field = Field::with_bottom_rows(4, 4, "L...\nLLL.").unwrap();
        let landing = field.drop(&piece(PieceKind::I).rotated_right(), 3);
        assert_eq!(
            landing,
            Landing {
                row: 3,
                cleared_lines: 1
            }
        );
        let expected = Field::with_bottom_rows(4, 4, "...I\n...I\nL..I").unwrap();
        assert_eq!(field, expected);
    }

    #[test]
    fn test_count_gaps() {
        let field = Field::with_bottom_rows(
            4,
            5,
            "
            .T..
            TT..
            .J.L
            .J..
            JJ.L
            ",
        )
        .unwrap();
        // column 0: rows 2 and 3 below the T; column 3: row 3 between the Ls.
        assert_eq!(field.count_gaps(), 3);
    }

    #[test]
    fn test_count_gaps_single_block_column() {
        let mut field = Field::new();
        field.place(&Piece::new(PieceKind::O), 5, 2).unwrap();
        // Each O column has its top at row 4, leaving rows 6..=21 empty.
        assert_eq!(field.count_gaps(), 2 * (22 - 1 - 5));
    }

    #[test]
    fn test_count_gaps_single_cell() {
        let diagram = format!("..T.......\n{}", "..........\n".repeat(9));
        let field = Field::with_bottom_rows(10, 22, &diagram).unwrap();
        assert_eq!(field.cell(12, 2).kind(), Some(PieceKind::T));
        assert_eq!(field.count_gaps(), 22 - 1 - 12);
    }

    #[test]
    fn test_heights() {
        let field = Field::with_bottom_rows(
            4,
            6,
            "
            I...
            I..T
            I.TT
            I..T
            ",
        )
        .unwrap();
        assert_eq!(field.heights(), [3, 0, 1, 2]);
    }

    #[test]
    fn test_clone_is_independent() {
        let field = Field::new();
        let mut copy = field.clone();
        copy.drop(&piece(PieceKind::O), 0);
        assert!(field.is_empty());
        assert!(!copy.is_empty());
    }

    #[test]
    fn test_custom_size() {
        let mut field = Field::with_size(4, 6);
        assert_eq!(field.heights().len(), 4);
        assert_eq!(field.drop(&piece(PieceKind::I), 0).cleared_lines, 1);
        assert!(field.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Field>(), Err(ParseFieldError::Empty));
        assert_eq!(
            "..\n...".parse::<Field>(),
            Err(ParseFieldError::RaggedRow {
                row: 1,
                expected: 2,
                found: 3
            })
        );
        assert_eq!(
            "..\n.x".parse::<Field>(),
            Err(ParseFieldError::InvalidCell {
                row: 1,
                col: 1,
                ch: 'x'
            })
        );
        assert_eq!(
            Field::with_bottom_rows(2, 1, "..\n.."),
            Err(ParseFieldError::TooManyRows {
                found: 2,
                height: 1
            })
        );
    }

    #[test]
    fn test_display() {
        let field = Field::with_bottom_rows(3, 2, "Z..").unwrap();
        assert_eq!(
            field.to_string(),
            "   |0 1 2|\n 0 |. . .|\n 1 |Z . .|\n   |0 1 2|\n"
        );
    }
}
