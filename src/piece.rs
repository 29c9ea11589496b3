//! Pieces and board positions.
//!
//! A [`Piece`] is an immutable rectangular boolean mask describing which
//! cells of its bounding box are occupied. Equality is structural: two
//! pieces compare equal exactly when their dimensions and fill patterns
//! match. Pieces are never mutated after construction; the engine only
//! clones and compares them.

use std::fmt;

use thiserror::Error;

/// A (row, col) location on the board, zero-indexed from the top-left.
///
/// When describing the position of a piece, the position always denotes
/// the top-left corner of the piece's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Raised when a piece mask is malformed.
///
/// Construction fails atomically; no partial piece is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PieceError {
    #[error("invalid piece mask, must have height greater than 0")]
    ZeroRows,
    #[error("invalid piece mask, every row must have width greater than 0")]
    ZeroWidthRow,
    #[error("invalid piece mask, all rows must be the same width")]
    RaggedRows,
}

/// An immutable piece shape: a rectangular boolean mask with cached
/// dimensions and fill count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    rows: usize,
    cols: usize,
    /// Row-major mask, `rows * cols` entries.
    mask: Vec<bool>,
}

impl Piece {
    /// Build a piece from a 2-D mask, validating its shape.
    ///
    /// # Errors
    /// - [`PieceError::ZeroRows`] if the mask has no rows
    /// - [`PieceError::ZeroWidthRow`] if any row is empty
    /// - [`PieceError::RaggedRows`] if rows have unequal widths
    pub fn new(mask: &[Vec<bool>]) -> Result<Self, PieceError> {
        if mask.is_empty() {
            return Err(PieceError::ZeroRows);
        }
        if mask.iter().any(|row| row.is_empty()) {
            return Err(PieceError::ZeroWidthRow);
        }
        let cols = mask[0].len();
        if mask.iter().any(|row| row.len() != cols) {
            return Err(PieceError::RaggedRows);
        }

        Ok(Self {
            rows: mask.len(),
            cols,
            mask: mask.iter().flatten().copied().collect(),
        })
    }

    /// Bounding-box dimensions as (rows, cols). Both are at least 1.
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Whether the mask is occupied at (row, col) within the bounding box.
    pub fn is_filled_at(&self, row: usize, col: usize) -> bool {
        self.mask[row * self.cols + col]
    }

    /// Number of occupied cells; the base placement reward for this piece.
    pub fn fill_count(&self) -> u32 {
        self.mask.iter().filter(|&&c| c).count() as u32
    }

    /// Iterate over the (row, col) offsets of every occupied cell,
    /// in row-major order.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(|(i, _)| (i / self.cols, i % self.cols))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let ch = if self.is_filled_at(row, col) { '■' } else { '□' };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
