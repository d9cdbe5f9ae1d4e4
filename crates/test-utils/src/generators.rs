//! Test data generators for synthetic forecast grids.

use ndarray::Array2;

/// Creates a test grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`, which makes it
/// easy to verify that data survived a write/read cycle by spot-checking
/// `grid[[row, col]] == col * 1000 + row`.
pub fn create_test_grid(rows: usize, cols: usize) -> Array2<f32> {
    Array2::from_shape_fn((rows, cols), |(row, col)| (col * 1000 + row) as f32)
}

/// Creates a test grid filled with a single value.
///
/// Useful for telling two payloads apart after a conflict: fill each
/// candidate record with a distinct marker value.
pub fn constant_grid(rows: usize, cols: usize, value: f32) -> Array2<f32> {
    Array2::from_elem((rows, cols), value)
}
