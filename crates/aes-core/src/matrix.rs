//! Rectangular matrices over GF(2^8).

use core::fmt;

use crate::error::{AesError, Result};
use crate::field::Byte;

/// Row and column count of a matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl Shape {
    /// Creates a shape from its row and column count.
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// m×n matrix of field elements, stored row-major.
///
/// Every fallible method checks shapes and indices before writing, so an `Err` leaves the
/// matrix exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ByteMatrix {
    shape: Shape,
    data: Vec<Byte>,
}

impl ByteMatrix {
    /// Returns the zero matrix of the given shape.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize`.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        let len = rows.checked_mul(cols).expect("matrix size overflows usize");
        Self {
            shape: Shape::new(rows, cols),
            data: vec![Byte::ZERO; len],
        }
    }

    /// Returns the n×n identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut out = Self::zeros(n, n);
        for i in 0..n {
            out.data[i * n + i] = Byte::ONE;
        }
        out
    }

    /// Builds a matrix from bytes listed row by row.
    pub fn from_rows(rows: usize, cols: usize, bytes: &[u8]) -> Result<Self> {
        let len = element_count("ByteMatrix::from_rows", rows, cols)?;
        if bytes.len() != len {
            return Err(AesError::Length {
                context: "ByteMatrix::from_rows",
                expected: len,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            shape: Shape::new(rows, cols),
            data: bytes.iter().copied().map(Byte).collect(),
        })
    }

    /// Builds a matrix from a fixed-size array of rows.
    pub fn from_array<const R: usize, const C: usize>(rows: [[u8; C]; R]) -> Self {
        Self {
            shape: Shape::new(R, C),
            data: rows.iter().flatten().copied().map(Byte).collect(),
        }
    }

    /// Shape of the matrix.
    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    /// Fails with [`AesError::Dimension`] unless the matrix has the `expected` shape.
    pub fn ensure_shape(&self, context: &'static str, expected: Shape) -> Result<()> {
        if self.shape != expected {
            return Err(AesError::Dimension {
                context,
                expected,
                actual: self.shape,
            });
        }
        Ok(())
    }

    fn check_row(&self, context: &'static str, row: usize) -> Result<()> {
        if row >= self.shape.rows {
            return Err(AesError::OutOfRange {
                context,
                index: row,
                len: self.shape.rows,
            });
        }
        Ok(())
    }

    fn check_col(&self, context: &'static str, col: usize) -> Result<()> {
        if col >= self.shape.cols {
            return Err(AesError::OutOfRange {
                context,
                index: col,
                len: self.shape.cols,
            });
        }
        Ok(())
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.shape.cols + col
    }

    /// Reads the element at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<Byte> {
        self.check_row("ByteMatrix::get", row)?;
        self.check_col("ByteMatrix::get", col)?;
        Ok(self.data[self.idx(row, col)])
    }

    /// Writes the element at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: Byte) -> Result<()> {
        self.check_row("ByteMatrix::set", row)?;
        self.check_col("ByteMatrix::set", col)?;
        let idx = self.idx(row, col);
        self.data[idx] = value;
        Ok(())
    }

    /// Copies row `row` out as a 1×n matrix.
    pub fn row(&self, row: usize) -> Result<ByteMatrix> {
        self.check_row("ByteMatrix::row", row)?;
        let start = row * self.shape.cols;
        Ok(Self {
            shape: Shape::new(1, self.shape.cols),
            data: self.data[start..start + self.shape.cols].to_vec(),
        })
    }

    /// Overwrites row `row` with a 1×n matrix.
    pub fn set_row(&mut self, row: usize, value: &ByteMatrix) -> Result<()> {
        self.check_row("ByteMatrix::set_row", row)?;
        value.ensure_shape("ByteMatrix::set_row", Shape::new(1, self.shape.cols))?;
        let start = row * self.shape.cols;
        self.data[start..start + self.shape.cols].copy_from_slice(&value.data);
        Ok(())
    }

    /// Copies column `col` out as an m×1 matrix.
    pub fn column(&self, col: usize) -> Result<ByteMatrix> {
        self.check_col("ByteMatrix::column", col)?;
        Ok(Self {
            shape: Shape::new(self.shape.rows, 1),
            data: (0..self.shape.rows)
                .map(|row| self.data[self.idx(row, col)])
                .collect(),
        })
    }

    /// Overwrites column `col` with an m×1 matrix.
    pub fn set_column(&mut self, col: usize, value: &ByteMatrix) -> Result<()> {
        self.check_col("ByteMatrix::set_column", col)?;
        value.ensure_shape("ByteMatrix::set_column", Shape::new(self.shape.rows, 1))?;
        for row in 0..self.shape.rows {
            let idx = self.idx(row, col);
            self.data[idx] = value.data[row];
        }
        Ok(())
    }

    /// Copies `count` consecutive columns starting at `start` into a new m×count matrix.
    pub fn columns(&self, start: usize, count: usize) -> Result<ByteMatrix> {
        let end = start.checked_add(count).unwrap_or(usize::MAX);
        if end > self.shape.cols {
            return Err(AesError::OutOfRange {
                context: "ByteMatrix::columns",
                index: end.saturating_sub(1),
                len: self.shape.cols,
            });
        }
        let mut out = Self::zeros(self.shape.rows, count);
        for row in 0..self.shape.rows {
            let src = self.idx(row, start);
            out.data[row * count..(row + 1) * count].copy_from_slice(&self.data[src..src + count]);
        }
        Ok(out)
    }

    /// Places matrices with equal row counts side by side.
    pub fn hconcat(parts: &[ByteMatrix]) -> Result<ByteMatrix> {
        let Some(first) = parts.first() else {
            return Ok(Self::zeros(0, 0));
        };
        let rows = first.shape.rows;
        let mut cols: usize = 0;
        for part in parts {
            if part.shape.rows != rows {
                return Err(AesError::Dimension {
                    context: "ByteMatrix::hconcat",
                    expected: Shape::new(rows, part.shape.cols),
                    actual: part.shape,
                });
            }
            cols = cols
                .checked_add(part.shape.cols)
                .ok_or(AesError::TooLarge {
                    context: "ByteMatrix::hconcat",
                    shape: Shape::new(rows, usize::MAX),
                })?;
        }
        element_count("ByteMatrix::hconcat", rows, cols)?;
        let mut out = Self::zeros(rows, cols);
        let mut offset = 0;
        for part in parts {
            for row in 0..rows {
                let dst = row * cols + offset;
                let src = row * part.shape.cols;
                out.data[dst..dst + part.shape.cols]
                    .copy_from_slice(&part.data[src..src + part.shape.cols]);
            }
            offset += part.shape.cols;
        }
        Ok(out)
    }

    /// Elementwise field addition, returning a new matrix.
    pub fn add(&self, rhs: &ByteMatrix) -> Result<ByteMatrix> {
        let mut out = self.clone();
        out.add_assign(rhs)?;
        Ok(out)
    }

    /// Elementwise field addition into `self`.
    pub fn add_assign(&mut self, rhs: &ByteMatrix) -> Result<()> {
        rhs.ensure_shape("ByteMatrix::add", self.shape)?;
        for (dst, src) in self.data.iter_mut().zip(rhs.data.iter()) {
            *dst = dst.add(*src);
        }
        Ok(())
    }

    /// Matrix product `self * rhs` over GF(2^8).
    pub fn multiply(&self, rhs: &ByteMatrix) -> Result<ByteMatrix> {
        if self.shape.cols != rhs.shape.rows {
            return Err(AesError::Dimension {
                context: "ByteMatrix::multiply",
                expected: Shape::new(self.shape.cols, rhs.shape.cols),
                actual: rhs.shape,
            });
        }
        let mut out = Self::zeros(self.shape.rows, rhs.shape.cols);
        for i in 0..self.shape.rows {
            for j in 0..rhs.shape.cols {
                let mut acc = Byte::ZERO;
                for k in 0..self.shape.cols {
                    acc = acc.add(self.data[self.idx(i, k)].multiply(rhs.data[rhs.idx(k, j)]));
                }
                out.data[i * rhs.shape.cols + j] = acc;
            }
        }
        Ok(out)
    }

    /// Circularly shifts row `row` left by `step` positions.
    pub fn rotate_row_left(&mut self, row: usize, step: usize) -> Result<()> {
        self.check_row("ByteMatrix::rotate_row_left", row)?;
        let cols = self.shape.cols;
        if cols > 0 {
            let start = row * cols;
            self.data[start..start + cols].rotate_left(step % cols);
        }
        Ok(())
    }

    /// Circularly shifts row `row` right by `step` positions.
    pub fn rotate_row_right(&mut self, row: usize, step: usize) -> Result<()> {
        self.check_row("ByteMatrix::rotate_row_right", row)?;
        let cols = self.shape.cols;
        if cols > 0 {
            let start = row * cols;
            self.data[start..start + cols].rotate_right(step % cols);
        }
        Ok(())
    }

    /// Replaces every element with `f(element)`.
    pub fn map_in_place<F: FnMut(Byte) -> Byte>(&mut self, mut f: F) {
        for byte in self.data.iter_mut() {
            *byte = f(*byte);
        }
    }
}

fn element_count(context: &'static str, rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or(AesError::TooLarge {
        context,
        shape: Shape::new(rows, cols),
    })
}

impl fmt::Display for ByteMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.shape.cols.max(1)) {
            write!(f, "[")?;
            for byte in row {
                write!(f, " {byte}")?;
            }
            writeln!(f, " ]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(rows: usize, cols: usize) -> ByteMatrix {
        let bytes: Vec<u8> = (0..rows * cols).map(|i| (i as u8).wrapping_mul(37)).collect();
        ByteMatrix::from_rows(rows, cols, &bytes).unwrap()
    }

    #[test]
    fn from_rows_rejects_wrong_length() {
        let err = ByteMatrix::from_rows(2, 3, &[1, 2, 3]).unwrap_err();
        assert!(matches!(err, AesError::Length { expected: 6, actual: 3, .. }));
    }

    #[test]
    fn oversized_shapes_are_rejected() {
        let err = ByteMatrix::from_rows(1 << (usize::BITS - 1), 2, &[]).unwrap_err();
        assert!(matches!(err, AesError::TooLarge { context: "ByteMatrix::from_rows", .. }));

        // Zero rows keep the element count at zero while the column count overflows.
        let wide = ByteMatrix::from_rows(0, usize::MAX, &[]).unwrap();
        assert!(matches!(
            ByteMatrix::hconcat(&[wide.clone(), wide]),
            Err(AesError::TooLarge { context: "ByteMatrix::hconcat", .. })
        ));
    }

    #[test]
    #[should_panic(expected = "matrix size overflows usize")]
    fn zeros_panics_on_overflow() {
        let _ = ByteMatrix::zeros(usize::MAX, 2);
    }

    #[test]
    fn get_set_and_bounds() {
        let mut m = ByteMatrix::zeros(2, 3);
        m.set(1, 2, Byte(0xab)).unwrap();
        assert_eq!(m.get(1, 2).unwrap(), Byte(0xab));
        assert!(matches!(
            m.get(2, 0),
            Err(AesError::OutOfRange { index: 2, len: 2, .. })
        ));
        let before = m.clone();
        assert!(m.set(0, 3, Byte(1)).is_err());
        assert_eq!(m, before);
    }

    #[test]
    fn row_and_column_access() {
        let mut m = sample(4, 4);
        let col = m.column(2).unwrap();
        assert_eq!(col.shape(), Shape::new(4, 1));
        for r in 0..4 {
            assert_eq!(col.get(r, 0).unwrap(), m.get(r, 2).unwrap());
        }

        let row = ByteMatrix::from_rows(1, 4, &[9, 8, 7, 6]).unwrap();
        m.set_row(3, &row).unwrap();
        assert_eq!(m.row(3).unwrap(), row);

        let before = m.clone();
        assert!(matches!(
            m.set_column(0, &row),
            Err(AesError::Dimension { .. })
        ));
        assert_eq!(m, before);
    }

    #[test]
    fn columns_and_hconcat_are_inverse() {
        let m = sample(4, 12);
        let parts: Vec<ByteMatrix> = (0..3).map(|i| m.columns(4 * i, 4).unwrap()).collect();
        assert_eq!(ByteMatrix::hconcat(&parts).unwrap(), m);
        assert!(m.columns(10, 4).is_err());
    }

    #[test]
    fn add_is_xor_and_checks_shape() {
        let a = sample(4, 4);
        let b = ByteMatrix::identity(4);
        let sum = a.add(&b).unwrap();
        assert_eq!(sum.get(0, 0).unwrap(), Byte(a.get(0, 0).unwrap().value() ^ 1));
        assert_eq!(sum.get(0, 1).unwrap(), a.get(0, 1).unwrap());
        assert_eq!(sum.add(&b).unwrap(), a);

        let mut c = a.clone();
        assert!(matches!(
            c.add_assign(&sample(4, 1)),
            Err(AesError::Dimension { .. })
        ));
        assert_eq!(c, a);
    }

    #[test]
    fn multiply_by_identity_and_shape_checks() {
        let a = sample(4, 4);
        assert_eq!(ByteMatrix::identity(4).multiply(&a).unwrap(), a);
        assert_eq!(a.multiply(&ByteMatrix::identity(4)).unwrap(), a);

        let word = sample(4, 1);
        assert_eq!(a.multiply(&word).unwrap().shape(), Shape::new(4, 1));
        assert!(word.multiply(&a).is_err());
    }

    #[test]
    fn multiply_uses_field_arithmetic() {
        let a = ByteMatrix::from_rows(1, 2, &[0x57, 0x57]).unwrap();
        let b = ByteMatrix::from_rows(2, 1, &[0x83, 0x13]).unwrap();
        // {c1} + {fe}
        assert_eq!(a.multiply(&b).unwrap().get(0, 0).unwrap(), Byte(0x3f));
    }

    #[test]
    fn row_rotation() {
        let mut m = ByteMatrix::from_rows(2, 4, &[0, 1, 2, 3, 4, 5, 6, 7]).unwrap();
        m.rotate_row_left(1, 1).unwrap();
        assert_eq!(m.row(1).unwrap(), ByteMatrix::from_rows(1, 4, &[5, 6, 7, 4]).unwrap());
        m.rotate_row_right(1, 5).unwrap();
        assert_eq!(m.row(1).unwrap(), ByteMatrix::from_rows(1, 4, &[4, 5, 6, 7]).unwrap());
        assert_eq!(m.row(0).unwrap(), ByteMatrix::from_rows(1, 4, &[0, 1, 2, 3]).unwrap());
        assert!(m.rotate_row_left(2, 1).is_err());
    }

    #[test]
    fn display_lists_rows() {
        let m = ByteMatrix::from_rows(2, 2, &[0x00, 0x0f, 0xa0, 0xff]).unwrap();
        assert_eq!(m.to_string(), "[ 00 0f ]\n[ a0 ff ]\n");
    }
}
