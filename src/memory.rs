use num::{NumCast, Zero, Float};
use std::{
    fmt::{Debug, Display, LowerExp}, iter::Sum, ops::{Add, AddAssign, Sub, SubAssign}
};
use rand::distributions::uniform::SampleUniform;

/// Floating point type the engine can compute with.
pub trait Primitive: Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast + SampleUniform
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static
                + for<'a> AddAssign<&'a Self> + for<'a> Sub<&'a Self> {}
impl Primitive for f32 {}
impl Primitive for f64 {}

/// Convert a sample count. Float primitives hold every count (possibly rounded).
#[inline(always)]
pub(crate) fn from_count<T: Primitive>(cnt: usize) -> T {
    T::from(cnt).unwrap_or_else(T::infinity)
}

/// Copy a slice of rows into one row-major buffer.
/// Returns the column count, or the index of the first row whose length differs from row 0.
pub(crate) fn flatten_rows<T: Primitive>(rows: &[Vec<T>]) -> Result<(Vec<T>, usize), (usize, usize, usize)> {
    let dims = rows.first().map(|r| r.len()).unwrap_or(0);
    let mut flat = Vec::with_capacity(rows.len() * dims);
    for (idx, row) in rows.iter().enumerate() {
        if row.len() != dims {
            return Err((idx, dims, row.len()));
        }
        flat.extend_from_slice(row);
    }
    Ok((flat, dims))
}

/// Split a row-major buffer back into owned rows.
pub(crate) fn split_rows<T: Primitive>(flat: &[T], dims: usize) -> Vec<Vec<T>> {
    if dims == 0 {
        return Vec::new();
    }
    flat.chunks_exact(dims).map(|c| c.to_vec()).collect()
}
