use crate::{error::{Error, Result}, Point, Primitive};

/// Split a flat centroid stream into consecutive, non-overlapping iterations of `k` centroids.
///
/// Iterations are returned in stream order. When the stream length is not a multiple of `k`, the
/// trailing partial window is not part of the result; use a [`crate::RemainderStrategy`] to decide
/// how that case is reported.
///
/// ## Errors
/// [`Error::InvalidParameter`] when `k == 0`.
pub fn segment<T: Primitive>(stream: &[Point<T>], k: usize) -> Result<Vec<&[Point<T>]>> {
    if k == 0 {
        return Err(Error::invalid("k", "cluster count must be > 0"));
    }
    Ok(stream.chunks_exact(k).collect())
}
