use crate::{distance, memory::*};

/// Largest Euclidean distance any centroid moved between two centroid sets.
pub fn max_centroid_shift<T: Primitive>(old: &[T], new: &[T], sample_dims: usize) -> T {
	old.chunks_exact(sample_dims)
		.zip(new.chunks_exact(sample_dims))
		.map(|(o, n)| distance::euclidean(o, n))
		.fold(T::zero(), |acc, d| if d > acc { d } else { acc })
}

/// Stopping rule of the refinement loop: stop as soon as no centroid moved by `threshold` or more.
pub(crate) struct CentroidShiftLogic<T: Primitive> {
	threshold: T,
	pub(crate) last_delta: T,
}
impl<T: Primitive> CentroidShiftLogic<T> {
	pub(crate) fn new(threshold: T) -> Self {
		Self { threshold, last_delta: T::infinity() }
	}

	/// Has to be called once per iteration with the centroids before and after the update step.
	/// ## Returns
	/// - **true** if the calculation should continue
	/// - **false** if it converged
	pub(crate) fn next(&mut self, old: &[T], new: &[T], sample_dims: usize) -> bool {
		self.last_delta = max_centroid_shift(old, new, sample_dims);
		!(self.last_delta < self.threshold)
	}
}
