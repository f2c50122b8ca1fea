//! Mask module - rectangular occupancy matrices for pieces
//!
//! A mask describes which cells of a piece's bounding box are filled.
//! Storage is a fixed-capacity flat buffer in row-major order
//! (`row * cols + col`), so masks are `Copy` and never allocate.

use arrayvec::ArrayVec;
use serde::Serialize;

/// Largest supported bounding box (rows * cols).
pub const MAX_MASK_CELLS: usize = 16;

/// Rectangular boolean occupancy matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mask {
    rows: usize,
    cols: usize,
    cells: [bool; MAX_MASK_CELLS],
}

impl Mask {
    /// Build a mask from a const nested array.
    ///
    /// Panics (at compile time when used in a const) if the box is empty or
    /// larger than [`MAX_MASK_CELLS`].
    pub const fn from_array<const R: usize, const C: usize>(rows: [[bool; C]; R]) -> Self {
        assert!(R > 0 && C > 0 && R * C <= MAX_MASK_CELLS);
        let mut cells = [false; MAX_MASK_CELLS];
        let mut r = 0;
        while r < R {
            let mut c = 0;
            while c < C {
                cells[r * C + c] = rows[r][c];
                c += 1;
            }
            r += 1;
        }
        Self {
            rows: R,
            cols: C,
            cells,
        }
    }

    /// Build a mask from runtime rows.
    ///
    /// Returns None for ragged or empty input, or a box larger than
    /// [`MAX_MASK_CELLS`].
    pub fn from_rows(rows: &[Vec<bool>]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if width == 0 || height * width > MAX_MASK_CELLS {
            return None;
        }
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }

        let mut cells = [false; MAX_MASK_CELLS];
        for (r, row) in rows.iter().enumerate() {
            cells[r * width..(r + 1) * width].copy_from_slice(row);
        }
        Some(Self {
            rows: height,
            cols: width,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Occupancy at local (row, col); out-of-box reads are empty.
    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    /// Rotate 90 degrees clockwise.
    ///
    /// An R x C mask becomes C x R with `out[c][R-1-r] = in[r][c]`.
    /// No grid validity is implied.
    pub fn rotate(&self) -> Self {
        let mut cells = [false; MAX_MASK_CELLS];
        let out_cols = self.rows;
        for r in 0..self.rows {
            for c in 0..self.cols {
                cells[c * out_cols + (self.rows - 1 - r)] = self.get(r, c);
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Local (row, col) of every occupied cell, row-major.
    pub fn occupied(&self) -> ArrayVec<(usize, usize), MAX_MASK_CELLS> {
        let mut out = ArrayVec::new();
        for r in 0..self.rows {
            for c in 0..self.cols {
                if self.get(r, c) {
                    out.push((r, c));
                }
            }
        }
        out
    }

    /// Convert to nested rows for display and serialization.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.rows)
            .map(|r| (0..self.cols).map(|c| self.get(r, c)).collect())
            .collect()
    }
}

impl Serialize for Mask {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(lines: &[&str]) -> Vec<Vec<bool>> {
        lines
            .iter()
            .map(|line| line.chars().map(|ch| ch == '#').collect())
            .collect()
    }

    #[test]
    fn rotate_swaps_dimensions() {
        let mask = Mask::from_rows(&rows(&["##", "#.", "#."])).unwrap();
        let rotated = mask.rotate();
        assert_eq!((rotated.rows(), rotated.cols()), (2, 3));
        assert_eq!(rotated.to_rows(), rows(&["###", "..#"]));
    }

    #[test]
    fn rotate_vertical_bar_lies_flat() {
        let mask = Mask::from_array([[true], [true], [true], [true]]);
        let rotated = mask.rotate();
        assert_eq!((rotated.rows(), rotated.cols()), (1, 4));
        assert_eq!(rotated.occupied().len(), 4);
    }

    #[test]
    fn four_rotations_are_identity_for_asymmetric_box() {
        let mask = Mask::from_rows(&rows(&["#..#", ".##.", "...#"])).unwrap();
        let back = mask.rotate().rotate().rotate().rotate();
        assert_eq!(back, mask);
        assert_ne!(mask.rotate(), mask);
    }

    #[test]
    fn from_rows_rejects_bad_input() {
        assert!(Mask::from_rows(&[]).is_none());
        assert!(Mask::from_rows(&[vec![]]).is_none());
        assert!(Mask::from_rows(&[vec![true, true], vec![true]]).is_none());
        assert!(Mask::from_rows(&vec![vec![true; 5]; 4]).is_none());
    }

    #[test]
    fn const_and_runtime_builders_agree() {
        let a = Mask::from_array([[false, true], [true, true], [true, false]]);
        let b = Mask::from_rows(&rows(&[".#", "##", "#."])).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn occupied_lists_cells_row_major() {
        let mask = Mask::from_rows(&rows(&["#.", "##"])).unwrap();
        let cells: Vec<_> = mask.occupied().into_iter().collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (1, 1)]);
    }

    #[test]
    fn serializes_as_nested_rows() {
        let mask = Mask::from_rows(&rows(&["#", "#"])).unwrap();
        let json = serde_json::to_string(&mask).unwrap();
        assert_eq!(json, "[[true],[true]]");
    }
}
