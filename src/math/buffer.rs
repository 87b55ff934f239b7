//! Splice helpers over flat `f64` buffers.
//!
//! Each helper allocates a fresh buffer. Indices are the caller's
//! responsibility; the helpers panic on out-of-range positions the same way
//! slice indexing does.

/// Concatenate `a` and `b`.
pub fn join(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut res = Vec::with_capacity(a.len() + b.len());
    res.extend_from_slice(a);
    res.extend_from_slice(b);
    res
}

/// Copy of `src` with the element at `index` removed.
pub fn remove(src: &[f64], index: usize) -> Vec<f64> {
    assert!(index < src.len(), "remove index out of bounds");
    let mut res = Vec::with_capacity(src.len() - 1);
    res.extend_from_slice(&src[..index]);
    res.extend_from_slice(&src[index + 1..]);
    res
}

/// Copy of `src` with the half-open range `start..end` removed.
pub fn remove_range(src: &[f64], start: usize, end: usize) -> Vec<f64> {
    assert!(start <= end && end <= src.len(), "remove range out of bounds");
    let mut res = Vec::with_capacity(src.len() - (end - start));
    res.extend_from_slice(&src[..start]);
    res.extend_from_slice(&src[end..]);
    res
}

/// Copy of `src` with `values` spliced in before `index`.
pub fn insert(src: &[f64], index: usize, values: &[f64]) -> Vec<f64> {
    assert!(index <= src.len(), "insert index out of bounds");
    let mut res = Vec::with_capacity(src.len() + values.len());
    res.extend_from_slice(&src[..index]);
    res.extend_from_slice(values);
    res.extend_from_slice(&src[index..]);
    res
}
