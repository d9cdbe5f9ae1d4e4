//! NumPy `.npy` codec for payload artifacts.
//!
//! Archived payloads are serialized in the NumPy format so the artifact is
//! self-describing: shape and dtype are recoverable from the header without
//! any external schema, and the files stay readable from Python tooling.

use bytes::Bytes;
use ndarray::{Array2, ShapeBuilder};
use npyz::WriterBuilder;

use ndfd_common::{ArchiveError, ArchiveResult};

/// Serialize a 2-D grid as an `.npy` byte buffer (C order, f32).
pub fn encode_array(array: &Array2<f32>) -> ArchiveResult<Bytes> {
    let mut buf = Vec::new();

    let mut writer = npyz::WriteOptions::new()
        .default_dtype()
        .shape(&[array.nrows() as u64, array.ncols() as u64])
        .writer(&mut buf)
        .begin_nd()
        .map_err(|e| ArchiveError::PayloadError(format!("npy header: {}", e)))?;

    // Logical iteration order is row-major regardless of memory layout,
    // which matches the C-order header written above.
    writer
        .extend(array.iter().copied())
        .map_err(|e| ArchiveError::PayloadError(format!("npy body: {}", e)))?;
    writer
        .finish()
        .map_err(|e| ArchiveError::PayloadError(format!("npy finish: {}", e)))?;

    Ok(Bytes::from(buf))
}

/// Deserialize an `.npy` byte buffer into a 2-D f32 grid.
pub fn decode_array(bytes: &[u8]) -> ArchiveResult<Array2<f32>> {
    let reader = npyz::NpyFile::new(bytes)
        .map_err(|e| ArchiveError::PayloadError(format!("npy header: {}", e)))?;

    let shape = reader.shape().to_vec();
    if shape.len() != 2 {
        return Err(ArchiveError::PayloadError(format!(
            "expected a 2-D array, got {} dimension(s)",
            shape.len()
        )));
    }
    let (rows, cols) = (shape[0] as usize, shape[1] as usize);

    let order = reader.order();
    let data = reader
        .into_vec::<f32>()
        .map_err(|e| ArchiveError::PayloadError(format!("npy body: {}", e)))?;

    let shape = (rows, cols).set_f(order == npyz::Order::Fortran);
    Array2::from_shape_vec(shape, data)
        .map_err(|e| ArchiveError::PayloadError(format!("npy shape: {}", e)))
}
