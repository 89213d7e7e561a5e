use crate::memory::Primitive;

/// Squared Euclidean distance. Every nearest-centroid comparison in the engine uses this.
#[inline(always)]
pub fn squared_euclidean<T: Primitive>(a: &[T], b: &[T]) -> T {
    a.iter().cloned()
        .zip(b.iter().cloned())
        .map(|(sp, cp)| sp - cp)    // <sample> - <centroid>
        .map(|v| v * v)             // <vec_components> ^2
        .sum()
}

/// Euclidean distance, used to measure how far a centroid moved.
#[inline(always)]
pub fn euclidean<T: Primitive>(a: &[T], b: &[T]) -> T {
    squared_euclidean(a, b).sqrt()
}

/// Index and squared distance of the nearest of the first `k` centroids.
/// Ties resolve to the lowest centroid index.
#[inline(always)]
pub(crate) fn nearest_centroid<T: Primitive>(sample: &[T], centroids: &[T], sample_dims: usize, k: usize) -> (usize, T) {
    let mut best = (0, T::infinity());
    for (idx, c) in centroids.chunks_exact(sample_dims).take(k).enumerate() {
        let d = squared_euclidean(sample, c);
        if d < best.1 {
            best = (idx, d);
        }
    }
    best
}
