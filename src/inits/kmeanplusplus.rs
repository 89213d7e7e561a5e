use crate::api::{SamplingMethod, SeedingFallback};
use crate::distance;
use crate::error::KMeansError;
use crate::memory::*;
use crate::{KMeans, KMeansConfig, KMeansState};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rayon::prelude::*;
use std::ops::DerefMut;

/// Index of the first bucket whose cumulative probability exceeds `u`.
/// Buckets with a probability of zero are never returned. If rounding leaves the total below `u`,
/// the last bucket with a non-zero probability is used.
pub(crate) fn cumulative_walk<T: Primitive>(probabilities: &[T], u: T) -> Option<usize> {
    let mut cumulative = T::zero();
    let mut last_positive = None;
    for (idx, p) in probabilities.iter().cloned().enumerate() {
        if p > T::zero() {
            cumulative += p;
            if cumulative > u {
                return Some(idx);
            }
            last_positive = Some(idx);
        }
    }
    last_positive
}

fn draw_weighted<T: Primitive>(probabilities: &[T], method: SamplingMethod, rnd: &mut dyn RngCore) -> Option<usize> {
    match method {
        SamplingMethod::WeightedIndex => {
            // Use rand's WeightedIndex to randomly draw a centroid, while respecting their probabilities
            let centroid_index = WeightedIndex::<T>::new(probabilities.iter().cloned()).ok()?;
            Some(centroid_index.sample(rnd))
        }
        SamplingMethod::CumulativeWalk => {
            let u = rnd.gen_range(T::zero()..T::one());
            cumulative_walk(probabilities, u)
        }
    }
}

fn draw_uniform_unselected(selected: &[bool], rnd: &mut dyn RngCore) -> Option<usize> {
    let remaining: Vec<usize> = selected.iter().enumerate()
        .filter(|(_, &sel)| !sel)
        .map(|(idx, _)| idx)
        .collect();
    if remaining.is_empty() {
        return None;
    }
    Some(remaining[rnd.gen_range(0..remaining.len())])
}

/// Squared distance of every sample to its nearest of the first `k` centroids, with all coordinates
/// divided by the largest absolute sample value. Keeps the relative weights when the plain squares overflow.
fn scaled_nearest_distances<T: Primitive>(kmean: &KMeans<T>, centroids: &[T], k: usize) -> Vec<T> {
    let scale = kmean.samples.iter().fold(T::zero(), |acc, v| acc.max(v.abs()));
    if scale == T::zero() {
        return vec![T::zero(); kmean.sample_cnt];
    }
    let scaled_centroids: Vec<T> = centroids[..k * kmean.sample_dims].iter().map(|&c| c / scale).collect();
    kmean.samples.par_chunks_exact(kmean.sample_dims)
        .map(|s| {
            let scaled: Vec<T> = s.iter().map(|&v| v / scale).collect();
            distance::nearest_centroid(&scaled, &scaled_centroids, kmean.sample_dims, k).1
        })
        .collect()
}

pub(crate) fn calculate<T: Primitive>(kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>) -> Result<(), KMeansError> {
    kmean.check_cluster_count(state.k)?;
    let mut selected = vec![false; kmean.sample_cnt];
    state.seed_indices.clear();
    {
        // Randomly select first centroid
        let first_idx = config.rnd.borrow_mut().gen_range(0..kmean.sample_cnt);
        selected[first_idx] = true;
        state.seed_indices.push(first_idx);
        state.set_centroid_from_iter(0, kmean.row(first_idx).iter().cloned());
    }
    for k in 1..state.k {
        // For each following centroid...
        // Distance of every sample to its nearest already selected centroid
        kmean.update_cluster_assignments(state, Some(k));
        let distsum: T = state.centroid_distances.iter().cloned().sum();

        let scaled;
        let (distances, total): (&[T], T) = if distsum.is_finite() {
            (state.centroid_distances.as_slice(), distsum)
        } else {
            // Squared distances overflowed: weigh by distances on rescaled samples instead
            scaled = scaled_nearest_distances(kmean, &state.centroids, k);
            (scaled.as_slice(), scaled.iter().cloned().sum())
        };

        let mut rnd = config.rnd.borrow_mut();
        let weighted = if total > T::zero() && total.is_finite() {
            // Selected samples get exactly zero, even though their distance already is (close to) zero
            let centroid_probabilities: Vec<T> = distances.iter().cloned()
                .zip(selected.iter())
                .map(|(d, &sel)| if sel { T::zero() } else { d / total })
                .collect();
            draw_weighted(&centroid_probabilities, config.sampling, rnd.deref_mut())
        } else {
            None
        };
        let sampled_centroid_id = match (weighted, config.seeding_fallback) {
            (Some(idx), _) => idx,
            (None, SeedingFallback::Uniform) => {
                log::debug!("k-means++: no distance left for centroid {}, drawing uniformly among unselected samples", k);
                draw_uniform_unselected(&selected, rnd.deref_mut())
                    .ok_or(KMeansError::DegenerateSeeding { centroid: k })?
            }
            (None, SeedingFallback::Fail) => return Err(KMeansError::DegenerateSeeding { centroid: k }),
        };
        drop(rnd);

        selected[sampled_centroid_id] = true;
        state.seed_indices.push(sampled_centroid_id);
        state.set_centroid_from_iter(k, kmean.row(sampled_centroid_id).iter().cloned());
    }
    log::debug!("k-means++ selected samples {:?}", state.seed_indices);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::*;

    fn config<'a>(seed: u64) -> KMeansConfig<'a, f64> {
        KMeansConfig::build().random_generator(rand::rngs::StdRng::seed_from_u64(seed)).build()
    }

    #[test]
    fn selects_k_distinct_indices_in_range() {
        let samples = blobs(&[[0.0, 0.0], [5.0, 5.0], [-5.0, 5.0]], 20, 1.0, 7);
        let kmean = KMeans::new(samples, 60, 2).unwrap();
        for k in 2..60 {
            for seed in 0..3 {
                let seeding = kmean.seed(k, &config(seed)).unwrap();
                assert_eq!(seeding.indices.len(), k);
                let mut sorted = seeding.indices.clone();
                sorted.sort_unstable();
                sorted.dedup();
                assert_eq!(sorted.len(), k);
                assert!(seeding.indices.iter().all(|&i| i < 60));
                for (ci, &si) in seeding.indices.iter().enumerate() {
                    assert_eq!(&seeding.centroids[ci * 2..ci * 2 + 2], kmean.row(si));
                }
            }
        }
    }

    #[test]
    fn deterministic_for_equal_seeds() {
        let samples = blobs(&[[0.0, 0.0], [8.0, 1.0]], 50, 2.0, 3);
        let kmean = KMeans::new(samples, 100, 2).unwrap();
        for method in [SamplingMethod::WeightedIndex, SamplingMethod::CumulativeWalk] {
            let conf_a = KMeansConfig::build().random_generator(rand::rngs::StdRng::seed_from_u64(99)).sampling(method).build();
            let conf_b = KMeansConfig::build().random_generator(rand::rngs::StdRng::seed_from_u64(99)).sampling(method).build();
            assert_eq!(kmean.seed(6, &conf_a).unwrap(), kmean.seed(6, &conf_b).unwrap());
        }
        assert_eq!(kmean.seed(6, &KMeansConfig::default()).unwrap(), kmean.seed(6, &KMeansConfig::default()).unwrap());
    }

    #[test]
    fn first_selection_is_uniform() {
        let kmean = KMeans::new(vec![0.0f64, 1.0, 2.0, 3.0, 4.0], 5, 1).unwrap();
        let runs = 5000;
        let mut counts = [0usize; 5];
        for seed in 0..runs {
            let seeding = kmean.seed(2, &config(seed)).unwrap();
            counts[seeding.indices[0]] += 1;
        }
        // expected 1000 per bucket, sd ~28
        for c in counts.iter() {
            assert!(*c > 850 && *c < 1150, "counts: {:?}", counts);
        }
    }

    #[test]
    fn second_selection_follows_squared_distance() {
        // Once 0 was selected, 1 and 3 have weights 1 : 9
        let kmean = KMeans::new(vec![0.0f64, 1.0, 3.0], 3, 1).unwrap();
        let mut counts = [0usize; 3];
        let mut runs = 0;
        for seed in 0..20000 {
            let seeding = kmean.seed(2, &config(seed)).unwrap();
            if seeding.indices[0] == 0 {
                runs += 1;
                counts[seeding.indices[1]] += 1;
            }
        }
        assert_eq!(counts[0], 0);
        let share = counts[2] as f64 / runs as f64;
        assert!((share - 0.9).abs() < 0.03, "share: {}", share);
    }

    #[test]
    fn walk_and_weighted_index_draw_the_same_distribution() {
        let probabilities = [0.1f64, 0.0, 0.2, 0.3, 0.0, 0.4];
        let runs = 20000;
        let mut walk = [0usize; 6];
        let mut weighted = [0usize; 6];
        let mut rnd = rand::rngs::StdRng::seed_from_u64(5);
        for _ in 0..runs {
            walk[draw_weighted(&probabilities, SamplingMethod::CumulativeWalk, &mut rnd).unwrap()] += 1;
            weighted[draw_weighted(&probabilities, SamplingMethod::WeightedIndex, &mut rnd).unwrap()] += 1;
        }
        assert_eq!(walk[1] + walk[4], 0);
        assert_eq!(weighted[1] + weighted[4], 0);
        for i in 0..6 {
            let (w, x) = (walk[i] as f64 / runs as f64, weighted[i] as f64 / runs as f64);
            assert!((w - probabilities[i]).abs() < 0.02, "walk: {:?}", walk);
            assert!((x - probabilities[i]).abs() < 0.02, "weighted: {:?}", weighted);
        }
    }

    #[test]
    fn cumulative_walk_buckets() {
        let p = [0.0f64, 0.25, 0.0, 0.75];
        assert_eq!(cumulative_walk(&p, 0.0), Some(1));
        assert_eq!(cumulative_walk(&p, 0.2499), Some(1));
        assert_eq!(cumulative_walk(&p, 0.25), Some(3));
        assert_eq!(cumulative_walk(&p, 0.9999), Some(3));
        // rounding left the total below u
        assert_eq!(cumulative_walk(&[0.3f64, 0.3, 0.0], 0.99), Some(1));
        assert_eq!(cumulative_walk(&[0.0f64, 0.0], 0.5), None);
    }

    #[test]
    fn identical_samples_fall_back_to_uniform() {
        let kmean = KMeans::new(vec![2.5f64, -1.0].repeat(6), 6, 2).unwrap();
        for seed in 0..20 {
            let seeding = kmean.seed(4, &config(seed)).unwrap();
            let mut sorted = seeding.indices.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 4);
            assert!(seeding.centroid_rows().iter().all(|c| c == &vec![2.5, -1.0]));
        }
    }

    #[test]
    fn identical_samples_fail_when_requested() {
        let kmean = KMeans::new(vec![1.0f64; 5], 5, 1).unwrap();
        let conf = KMeansConfig::build().seeding_fallback(SeedingFallback::Fail).build();
        assert_eq!(kmean.seed(2, &conf).unwrap_err(), KMeansError::DegenerateSeeding { centroid: 1 });
    }

    #[test]
    fn duplicates_exhausting_diversity() {
        // Two distinct values: the third centroid can only come from the fallback
        let kmean = KMeans::new(vec![0.0f64, 0.0, 7.0, 7.0], 4, 1).unwrap();
        for seed in 0..20 {
            let seeding = kmean.seed(3, &config(seed)).unwrap();
            let mut values: Vec<f64> = seeding.centroids[..2].to_vec();
            values.sort_by(|a, b| a.partial_cmp(b).unwrap());
            assert_eq!(values, vec![0.0, 7.0]);
            let mut sorted = seeding.indices.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 3);
        }
        let conf = KMeansConfig::build().seeding_fallback(SeedingFallback::Fail).build();
        assert_eq!(kmean.seed(3, &conf).unwrap_err(), KMeansError::DegenerateSeeding { centroid: 2 });
    }

    #[test]
    fn overflowing_distances_keep_their_weighting() {
        // squared distances of 1e200 overflow f64, the points are still distinct
        let kmean = KMeans::new(vec![0.0f64, 1e200, 2e200], 3, 1).unwrap();
        let (mut first_zero, mut far_pick) = (0, 0);
        for seed in 0..600 {
            let conf = KMeansConfig::build()
                .random_generator(rand::rngs::StdRng::seed_from_u64(seed))
                .seeding_fallback(SeedingFallback::Fail)
                .build();
            let seeding = kmean.seed(2, &conf).unwrap();
            assert_ne!(seeding.indices[0], seeding.indices[1]);
            if seeding.indices[0] == 0 {
                first_zero += 1;
                if seeding.indices[1] == 2 {
                    far_pick += 1;
                }
            }
        }
        // weights 1 : 4 from sample 0, uniform drawing would give one half
        let share = far_pick as f64 / first_zero as f64;
        assert!(share > 0.65 && share < 0.95, "share of the far sample: {}", share);

        let kmean = KMeans::new(vec![0.0f32, 1e20, 2e20, 3e20], 4, 1).unwrap();
        let conf = KMeansConfig::build().seeding_fallback(SeedingFallback::Fail).build();
        let seeding = kmean.seed(3, &conf).unwrap();
        let mut sorted = seeding.indices.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 3);
    }

    #[test]
    fn cluster_count_boundaries() {
        let kmean = KMeans::new(vec![0.0f64, 1.0, 2.0], 3, 1).unwrap();
        assert!(kmean.seed(2, &KMeansConfig::default()).is_ok());
        assert_eq!(kmean.seed(3, &KMeansConfig::default()).unwrap_err(), KMeansError::InvalidClusterCount { k: 3, sample_cnt: 3 });
        assert_eq!(kmean.seed(1, &KMeansConfig::default()).unwrap_err(), KMeansError::InvalidClusterCount { k: 1, sample_cnt: 3 });
    }
}
