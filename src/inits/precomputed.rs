use crate::error::KMeansError;
use crate::memory::*;
use crate::{KMeans, KMeansConfig, KMeansState};

#[inline(always)]
pub fn calculate<T: Primitive>(
    kmean: &KMeans<T>, state: &mut KMeansState<T>, _config: &KMeansConfig<'_, T>, computed: Vec<T>,
) -> Result<(), KMeansError> {
    if computed.len() != state.k * kmean.sample_dims {
        return Err(KMeansError::CentroidCountMismatch {
            expected: state.k,
            found: computed.len() / kmean.sample_dims,
        });
    }
    if let Some(pos) = computed.iter().position(|v| !v.is_finite()) {
        return Err(KMeansError::NonFiniteValue { sample: pos / kmean.sample_dims, dim: pos % kmean.sample_dims });
    }
    state.seed_indices.clear();
    computed.chunks_exact(kmean.sample_dims).enumerate().for_each(|(ci, c)| {
        state.set_centroid_from_iter(ci, c.iter().cloned());
    });
    Ok(())
}
