//! Linear layout of a symmetric square matrix.
//!
//! An undirected adjacency matrix is symmetric, so only the lower triangle
//! (including the diagonal) is stored. Cells `[i][j]` and `[j][i]` map to the
//! same linear position. The layout of existing rows does not depend on the
//! order of the matrix, so growing the matrix only appends cells at the end.

#[allow(clippy::len_without_is_empty)]
pub trait MatrixLinearStorage<E>: Default {
    fn with_capacity(capacity: usize) -> Self;
    fn resize_with_none(&mut self, new_len: usize);
    fn len(&self) -> usize;
}

/// Number of cells needed for a matrix of given order.
pub fn linear_len(order: usize) -> usize {
    order * (order + 1) / 2
}

pub fn grow<E, M: MatrixLinearStorage<E>>(prev: &mut M, order: usize) {
    let len = linear_len(order);

    if len <= prev.len() {
        // This routine is only for growing.
        return;
    }

    // Just continue the lower triangle.
    prev.resize_with_none(len);
}

pub fn index(row: usize, col: usize) -> usize {
    // Make sure that the coordinates are in the lower triangle.
    let (row, col) = if row >= col { (row, col) } else { (col, row) };
    // The rows are 1 + 2 + 3 + ... + n = n (n + 1) / 2.
    row * (row + 1) / 2 + col
}

pub fn coords(index: usize) -> (usize, usize) {
    // index = row * (row + 1) / 2 + col => 2 * (index - col) = row^2 + row
    //
    // Quadratic equation for row. We don't know col so we use just index =>
    // discriminant is generally not an integer, we need to round down. The
    // difference between index and start of the row is the column.
    let d = (1. + 8. * index as f64).sqrt().floor() as usize;
    let row = (d - 1) / 2;
    let col = index - row * (row + 1) / 2;
    (row, col)
}

mod imp {
    use super::MatrixLinearStorage;

    impl<E> MatrixLinearStorage<E> for Vec<Option<E>> {
        fn with_capacity(capacity: usize) -> Self {
            Self::with_capacity(capacity)
        }

        fn resize_with_none(&mut self, new_len: usize) {
            self.resize_with(new_len, || None);
        }

        fn len(&self) -> usize {
            self.len()
        }
    }
}
