use crate::api::NumericDegeneracy;
use crate::convergence::CentroidShiftLogic;
use crate::error::KMeansError;
use crate::{KMeans, KMeansState, KMeansConfig, memory::*};

pub(crate) struct Lloyd<T> where T: Primitive {
	_p: std::marker::PhantomData<T>
}
impl<T> Lloyd<T> where T: Primitive {
    /// Compute the centroids for the current assignments into a fresh buffer.
    /// Centroids without samples keep their previous position.
    fn update_centroids(data: &KMeans<T>, state: &mut KMeansState<T>, iteration: usize) -> Vec<T> {
        let sample_dims = data.sample_dims;
        // Sum all samples in a cluster together into new_centroids
        // Count non-empty clusters
        let mut used_centroids_cnt = 0;
        let mut new_centroids = vec![T::zero(); state.centroids.len()];

        let (centroid_frequency, assignments) = (&mut state.centroid_frequency, &state.assignments);
        rayon::join(
            || {
                used_centroids_cnt = data.update_cluster_frequencies(assignments, centroid_frequency);
            },
            || {
                data.samples.chunks_exact(sample_dims)
                    .zip(assignments.iter().cloned())
                    .for_each(|(s, centroid_id)| {
                        new_centroids[centroid_id * sample_dims..(centroid_id + 1) * sample_dims].iter_mut()
                            .zip(s.iter())
                            .for_each(|(c, sv)| *c += sv);
                    });
            },
        );

        for (ci, nc) in new_centroids.chunks_exact_mut(sample_dims).enumerate() {
            let cfreq = state.centroid_frequency[ci];
            if cfreq == 0 {
                nc.copy_from_slice(&state.centroids[ci * sample_dims..(ci + 1) * sample_dims]);
            } else {
                let cfreq: T = from_count(cfreq);
                nc.iter_mut().for_each(|c| *c = *c / cfreq);
            }
        }

        if used_centroids_cnt != state.k {
            for (ci, _) in state.centroid_frequency.iter().enumerate().filter(|(_, &f)| f == 0) {
                log::warn!("iteration {}: centroid {} has no samples assigned, keeping its position", iteration, ci);
                state.degeneracies.push(NumericDegeneracy { iteration, centroid: ci });
            }
        }
        new_centroids
    }

    #[inline(always)] pub fn calculate<'a, F>(data: &KMeans<T>, k: usize, max_iter: usize, eps: T, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>, KMeansError>
                where for<'c> F: FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<(), KMeansError> {
        data.check_cluster_count(k)?;
        if eps.is_nan() || eps < T::zero() {
            return Err(KMeansError::InvalidEpsilon(eps.to_f64().unwrap_or(f64::NAN)));
        }

        let mut state = KMeansState::new(data.sample_cnt, data.sample_dims, k);
        state.distsum = T::infinity();

        // Initialize clusters and notify subscriber
        init(data, &mut state, config)?;
        (config.init_done)(&state);
        let mut convergence = CentroidShiftLogic::new(eps);

        for i in 1..=max_iter {
            data.update_cluster_assignments(&mut state, None);
            let new_centroids = Self::update_centroids(data, &mut state, i);
            let keep_going = convergence.next(&state.centroids, &new_centroids, data.sample_dims);

            // Swap in the new centroids as a whole, then measure the samples against them
            state.centroids = new_centroids;
            data.update_centroid_distances(&mut state);
            state.distsum = state.centroid_distances.iter().cloned().sum();
            state.iterations = i;
            state.last_delta = convergence.last_delta;
            log::trace!("iteration {}: delta {:e}, distsum {:e}", i, state.last_delta, state.distsum);

            // Notify subscriber about finished iteration
            (config.iteration_done)(&state, i, state.last_delta);
            if !keep_going {
                state.converged = true;
                break;
            }
        }

        if state.iterations == 0 {
            data.update_cluster_assignments(&mut state, None);
            data.update_cluster_frequencies(&state.assignments, &mut state.centroid_frequency);
            state.distsum = state.centroid_distances.iter().cloned().sum();
        }
        if state.converged {
            log::debug!("converged after {} iterations (delta {:e} < {:e})", state.iterations, state.last_delta, eps);
        } else {
            log::debug!("stopped after {} iterations without converging (delta {:e})", state.iterations, state.last_delta);
        }
        Ok(state)
    }
}
