use crate::{distance, error::KMeansError, memory::*};
use std::cell::RefCell;
use rayon::prelude::*;
use rand::prelude::*;

/// Seed of the random stream used when no generator is configured explicitly.
pub const DEFAULT_RANDOM_SEED: u64 = 1234;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>, usize, T);

/// How the k-means++ initialization draws the next centroid from the weighted distribution.
/// Both methods draw from the same distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SamplingMethod {
    /// rand's [`WeightedIndex`](rand::distributions::WeightedIndex) (binary search over the cumulative weights)
    WeightedIndex,
    /// Draw `u` from `[0, 1)` and walk the cumulative probabilities until the first one exceeding `u`
    CumulativeWalk,
}

/// What the k-means++ initialization does, when all remaining samples have a distance of zero
/// to the already selected centroids (e.g. the data consists of duplicates only).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedingFallback {
    /// Draw uniformly among the samples that were not selected yet
    Uniform,
    /// Abort with [`KMeansError::DegenerateSeeding`]
    Fail,
}

/// This is a structure holding various configuration options for the a k-means calculations, such as
/// the random number generator to use, or a couple of callbacks, that can be set to get status information from
/// a running k-means calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the iteration
    /// - **iteration_id**: Number of the current iteration
    /// - **delta**: Largest distance a centroid moved during this iteration
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    pub(crate) sampling: SamplingMethod,
    pub(crate) seeding_fallback: SeedingFallback,
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_,_,_| {},
            rnd: Box::new(RefCell::new(rand::rngs::StdRng::seed_from_u64(DEFAULT_RANDOM_SEED))),
            sampling: SamplingMethod::WeightedIndex,
            seeding_fallback: SeedingFallback::Uniform,
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("sampling", &self.sampling)
            .field("seeding_fallback", &self.seeding_fallback)
            .finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration during a running k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used in the k-means calculation.
    /// ## Default
    /// `StdRng` seeded with [`DEFAULT_RANDOM_SEED`]
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Set the method used to draw from the weighted distribution during k-means++ initialization.
    /// ## Default
    /// [`SamplingMethod::WeightedIndex`]
    pub fn sampling(mut self, sampling: SamplingMethod) -> Self {
        self.config.sampling = sampling; self
    }
    /// Set the behaviour of the k-means++ initialization on an all-zero distance distribution.
    /// ## Default
    /// [`SeedingFallback::Uniform`]
    pub fn seeding_fallback(mut self, fallback: SeedingFallback) -> Self {
        self.config.seeding_fallback = fallback; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// Record of a centroid that had no samples assigned during an update step.
/// The centroid kept its previous position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumericDegeneracy {
    pub iteration: usize,
    pub centroid: usize,
}

/// This is the internally used data-structure, storing the current state during calculation, as
/// well as the final result, as returned by the API.
/// All mutations are done in this structure, making [`KMeans`] immutable, and therefore allowing
/// it to be used in parallel, without having to duplicate the input-data.
///
/// ## Fields
/// - **k**: The amount of clusters that were requested when calculating this k-means result
/// - **distsum**: The total sum of squared distances from all samples to their respective centroids
/// - **centroids**: Calculated cluster centers [row-major] = [<centroid0>,<centroid1>,<centroid2>,...]
/// - **centroid_frequency**: Amount of samples in each centroid
/// - **assignments**: Vector mapping each sample to its respective cluster
/// - **centroid_distances**: Vector containing each sample's squared distance to its centroid
/// - **seed_indices**: Sample indices the initial centroids were taken from, in selection order
///   (empty for precomputed initial centroids)
/// - **iterations**: Amount of completed refinement iterations
/// - **converged**: Whether the refinement stopped because no centroid moved by `eps` or more
/// - **last_delta**: Largest centroid movement of the last iteration
/// - **degeneracies**: Every empty cluster encountered during the update steps
#[derive(Clone, Debug)]
pub struct KMeansState<T: Primitive> {
    pub k: usize,
    pub distsum: T,
    pub centroids: Vec<T>,
    pub centroid_frequency: Vec<usize>,
    pub assignments: Vec<usize>,
    pub centroid_distances: Vec<T>,
    pub seed_indices: Vec<usize>,
    pub iterations: usize,
    pub converged: bool,
    pub last_delta: T,
    pub degeneracies: Vec<NumericDegeneracy>,

    pub(crate) sample_dims: usize
}
impl<T: Primitive> KMeansState<T> {
    pub(crate) fn new(sample_cnt: usize, sample_dims: usize, k: usize) -> Self {
        Self {
            k,
            distsum: T::zero(),
            centroids: vec![T::zero();sample_dims * k],
            centroid_frequency: vec![0usize;k],
            assignments: vec![0usize;sample_cnt],
            centroid_distances: vec![T::infinity();sample_cnt],
            seed_indices: Vec::with_capacity(k),
            iterations: 0,
            converged: false,
            last_delta: T::infinity(),
            degeneracies: Vec::new(),
            sample_dims
        }
    }
    pub(crate) fn set_centroid_from_iter(&mut self, idx: usize, src: impl Iterator<Item = T>) {
        self.centroids.iter_mut().skip(self.sample_dims * idx).take(self.sample_dims)
                .zip(src)
                .for_each(|(c,s)| *c = s);
    }

    /// Dimension of each centroid.
    pub fn sample_dims(&self) -> usize { self.sample_dims }

    /// The centroids as one vector per cluster.
    pub fn centroid_rows(&self) -> Vec<Vec<T>> {
        split_rows(&self.centroids, self.sample_dims)
    }
}

/// Outcome of the k-means++ initialization: chosen sample indices and their vectors, in selection order.
#[derive(Clone, Debug, PartialEq)]
pub struct Seeding<T: Primitive> {
    pub indices: Vec<usize>,
    /// [row-major] = [<centroid0>,<centroid1>,...]
    pub centroids: Vec<T>,
    pub sample_dims: usize,
}
impl<T: Primitive> Seeding<T> {
    pub fn centroid_rows(&self) -> Vec<Vec<T>> {
        split_rows(&self.centroids, self.sample_dims)
    }
}




/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the samples you want to operate on. The primitive type
/// of the passed samples array will be the type used internaly for all calculations, as well as the result
/// as stored in the returned [`KMeansState`] structure.
///
/// ## Supported operations
/// - k-Means++ seeding [`KMeans::seed`]
/// - k-Means refinement (Lloyd) [`KMeans::kmeans_lloyd`]
///
/// ## Supported initialization methods
/// - K-Mean++ [`KMeans::init_kmeanplusplus`]
/// - Precomputed centroids [`KMeans::init_precomputed`]
#[derive(Clone, Debug)]
pub struct KMeans<T: Primitive> {
    pub(crate) sample_cnt: usize,
    pub(crate) sample_dims: usize,
    pub(crate) samples: Vec<T>
}
impl<T: Primitive> KMeans<T> {
    /// Create a new instance of the [`KMeans`] structure.
    ///
    /// ## Arguments
    /// - **samples**: Vector of samples [row-major] = [<sample0>,<sample1>,<sample2>,...]
    /// - **sample_cnt**: Amount of samples, contained in the passed **samples** vector
    /// - **sample_dims**: Amount of dimensions each sample from the **sample** vector has
    ///
    /// ## Errors
    /// Fails if the buffer does not hold `sample_cnt * sample_dims` values, if `sample_dims` is zero,
    /// or if a value is not finite.
    pub fn new(samples: Vec<T>, sample_cnt: usize, sample_dims: usize) -> Result<Self, KMeansError> {
        if sample_dims == 0 {
            return Err(KMeansError::ZeroDimensions);
        }
        if samples.len() != sample_cnt * sample_dims {
            return Err(KMeansError::SampleCountMismatch { len: samples.len(), sample_cnt, sample_dims });
        }
        if let Some(pos) = samples.iter().position(|v| !v.is_finite()) {
            return Err(KMeansError::NonFiniteValue { sample: pos / sample_dims, dim: pos % sample_dims });
        }
        Ok(Self { sample_cnt, sample_dims, samples })
    }

    /// Create a new instance from one vector per sample. All rows need the same length.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, KMeansError> {
        let (samples, sample_dims) = flatten_rows(rows)
            .map_err(|(row, expected, found)| KMeansError::ShapeMismatch { row, expected, found })?;
        Self::new(samples, rows.len(), sample_dims)
    }

    pub fn sample_cnt(&self) -> usize { self.sample_cnt }
    pub fn sample_dims(&self) -> usize { self.sample_dims }

    /// The sample with the given index, `None` if it is out of range.
    pub fn sample(&self, idx: usize) -> Option<&[T]> {
        self.samples.chunks_exact(self.sample_dims).nth(idx)
    }

    pub(crate) fn row(&self, idx: usize) -> &[T] {
        &self.samples[idx * self.sample_dims..(idx + 1) * self.sample_dims]
    }

    pub(crate) fn check_cluster_count(&self, k: usize) -> Result<(), KMeansError> {
        if k <= 1 || k >= self.sample_cnt {
            return Err(KMeansError::InvalidClusterCount { k, sample_cnt: self.sample_cnt });
        }
        Ok(())
    }

    pub(crate) fn update_centroid_distances(&self, state: &mut KMeansState<T>) {
        let centroids = &state.centroids;
        let work_packet_size = (self.sample_cnt / rayon::current_num_threads()).max(1);
        self.samples.par_chunks_exact(self.sample_dims)
            .with_min_len(work_packet_size)
            .zip(state.assignments.par_iter().cloned())
            .zip(state.centroid_distances.par_iter_mut())
            .for_each(|((s, assignment), centroid_dist)| {
                let centroid = &centroids[assignment * self.sample_dims..(assignment + 1) * self.sample_dims];
                *centroid_dist = distance::squared_euclidean(s, centroid);
            });
    }

    /// Assign every sample to its nearest centroid among the first **limit_k** (default: all) centroids.
    pub(crate) fn update_cluster_assignments(&self, state: &mut KMeansState<T>, limit_k: Option<usize>) {
        let centroids = &state.centroids;
        let k = limit_k.unwrap_or(state.k);

        // manually calculate work-packet size, because rayon does not do static scheduling (which is more apropriate here)
        let work_packet_size = (self.sample_cnt / rayon::current_num_threads()).max(1);
        self.samples.par_chunks_exact(self.sample_dims)
            .with_min_len(work_packet_size)
            .zip(state.assignments.par_iter_mut())
            .zip(state.centroid_distances.par_iter_mut())
            .for_each(|((s, assignment), centroid_dist)| {
                let (best_idx, best_dist) = distance::nearest_centroid(s, centroids, self.sample_dims, k);
                *assignment = best_idx;
                *centroid_dist = best_dist;
            });
    }

    pub(crate) fn update_cluster_frequencies(&self, assignments: &[usize], centroid_frequency: &mut[usize]) -> usize {
        centroid_frequency.iter_mut().for_each(|v| *v = 0);
        let mut used_centroids_cnt = 0;
        assignments.iter().cloned()
            .for_each(|centroid_id| {
                if centroid_frequency[centroid_id] == 0 {
                    used_centroids_cnt += 1; // Count the amount of centroids with more than 0 samples
                }
                centroid_frequency[centroid_id] += 1;
            });
        used_centroids_cnt
    }


    /// K-Means++ seeding.
    ///
    /// Selects **k** samples as initial centroids. The first one is drawn uniformly, every following one
    /// with a probability proportional to its squared distance to the nearest already selected centroid.
    ///
    /// ## Arguments
    /// - **k**: Amount of centroids to select (`1 < k < sample_cnt`)
    /// - **config**: [`KMeansConfig`] providing the random generator, sampling method and fallback policy
    ///
    /// ## Returns
    /// The selected sample indices and their vectors, in selection order.
    pub fn seed<'a>(&self, k: usize, config: &KMeansConfig<'a, T>) -> Result<Seeding<T>, KMeansError> {
        self.check_cluster_count(k)?;
        let mut state = KMeansState::new(self.sample_cnt, self.sample_dims, k);
        Self::init_kmeanplusplus(self, &mut state, config)?;
        Ok(Seeding { indices: state.seed_indices, centroids: state.centroids, sample_dims: self.sample_dims })
    }

    /// Normal K-Means algorithm implementation (Lloyd).
    ///
    /// Repeats assignment and update step until no centroid moves by **eps** or more within one
    /// iteration, or until **max_iter** iterations were done. Both are regular terminations.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters (`1 < k < sample_cnt`)
    /// - **max_iter**: Limit the maximum amount of iterations
    /// - **eps**: Convergence threshold on the largest centroid movement (`>= 0`)
    /// - **init**: Initialization-Method to use for the initialization of the **k** centroids
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Returns
    /// Instance of [`KMeansState`], containing the final state (result).
    ///
    /// ## Example
    /// ```rust
    /// use kmeanspp::*;
    ///
    /// let samples = vec![0.0f64, 0.0, 0.0, 1.0, 10.0, 0.0, 10.0, 1.0];
    /// let kmean = KMeans::new(samples, 4, 2).unwrap();
    /// let result = kmean.kmeans_lloyd(2, 300, 0.0001, KMeans::init_precomputed(vec![0.0, 0.0, 10.0, 0.0]), &KMeansConfig::default()).unwrap();
    /// assert_eq!(result.centroids, vec![0.0, 0.5, 10.0, 0.5]);
    /// ```
    pub fn kmeans_lloyd<'a, F>(&self, k: usize, max_iter: usize, eps: T, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>, KMeansError>
                where for<'c> F: FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<(), KMeansError> {
        crate::variants::Lloyd::calculate(self, k, max_iter, eps, init, config)
    }

    /// K-Means++ initialization method
    ///
    /// ## Description
    /// This initialization method starts by selecting one sample as first centroid.
    /// Proceeding from there, the method iteratively selects one new centroid (per iteration) by calculating
    /// each sample's probability of "being a centroid". This probability is proportional to the squared
    /// distance of the sample to its nearest already selected centroid. Samples that were already selected have
    /// a probability of zero.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_kmeanplusplus<'a>(kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'a, T>) -> Result<(), KMeansError> {
        crate::inits::kmeanplusplus::calculate(kmean, state, config)
    }

    /// Precomputed initialization method
    ///
    /// ## Description
    /// Uses the passed centroids [row-major] as initial centroids. There have to be exactly `k` of them.
    pub fn init_precomputed(centroids: Vec<T>) -> impl for<'c> FnOnce(&KMeans<T>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<(), KMeansError> {
        move |kmean: &KMeans<T>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>| {
            crate::inits::precomputed::calculate(kmean, state, config, centroids)
        }
    }
}


/// Select **k** initial centroids from **observations** with k-means++.
///
/// The random stream is a `StdRng` seeded with **random_seed**, so equal inputs give equal outputs.
/// Returns the chosen indices and the chosen observations, in selection order.
pub fn seed<T: Primitive>(observations: &[Vec<T>], k: usize, random_seed: u64) -> Result<(Vec<usize>, Vec<Vec<T>>), KMeansError> {
    let kmean = KMeans::from_rows(observations)?;
    let conf = KMeansConfig::build()
        .random_generator(rand::rngs::StdRng::seed_from_u64(random_seed))
        .build();
    let seeding = kmean.seed(k, &conf)?;
    let rows = seeding.centroid_rows();
    Ok((seeding.indices, rows))
}

/// Refine **initial_centroids** on **observations** with Lloyd's algorithm and return the final centroids.
pub fn fit<T: Primitive>(initial_centroids: &[Vec<T>], observations: &[Vec<T>], k: usize, max_iter: usize, eps: T) -> Result<Vec<Vec<T>>, KMeansError> {
    let kmean = KMeans::from_rows(observations)?;
    kmean.check_cluster_count(k)?;
    if initial_centroids.len() != k {
        return Err(KMeansError::CentroidCountMismatch { expected: k, found: initial_centroids.len() });
    }
    let (initial, dims) = flatten_rows(initial_centroids)
        .map_err(|(row, expected, found)| KMeansError::ShapeMismatch { row, expected, found })?;
    if dims != kmean.sample_dims {
        return Err(KMeansError::ShapeMismatch { row: 0, expected: kmean.sample_dims, found: dims });
    }
    let state = kmean.kmeans_lloyd(k, max_iter, eps, KMeans::init_precomputed(initial), &KMeansConfig::default())?;
    Ok(state.centroid_rows())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_is_validated() {
        assert_eq!(KMeans::new(vec![1.0f64; 5], 3, 2).unwrap_err(),
            KMeansError::SampleCountMismatch { len: 5, sample_cnt: 3, sample_dims: 2 });
        assert_eq!(KMeans::<f64>::new(vec![], 3, 0).unwrap_err(), KMeansError::ZeroDimensions);
        assert_eq!(KMeans::new(vec![1.0f64, 2.0, f64::NAN, 4.0], 2, 2).unwrap_err(),
            KMeansError::NonFiniteValue { sample: 1, dim: 0 });
        assert_eq!(KMeans::from_rows(&[vec![1.0f32, 2.0], vec![3.0]]).unwrap_err(),
            KMeansError::ShapeMismatch { row: 1, expected: 2, found: 1 });

        let kmean = KMeans::from_rows(&[vec![1.0f64, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(kmean.sample_cnt(), 2);
        assert_eq!(kmean.sample(1), Some(&[3.0, 4.0][..]));
        assert_eq!(kmean.sample(2), None);
    }

    #[test]
    fn cluster_count_bounds() {
        let kmean = KMeans::new(vec![0.0f64, 1.0, 2.0], 3, 1).unwrap();
        assert!(kmean.check_cluster_count(2).is_ok());
        for k in [0, 1, 3, 4] {
            assert_eq!(kmean.check_cluster_count(k), Err(KMeansError::InvalidClusterCount { k, sample_cnt: 3 }));
        }
    }

    #[test]
    fn cluster_assignments() {
        let sample_cnt = 1000;
        let sample_dims = 3;
        let k = 5;

        let mut rnd = rand::rngs::StdRng::seed_from_u64(1337);
        let mut samples = vec![0.0f64;sample_cnt * sample_dims];
        samples.iter_mut().for_each(|v| *v = rnd.gen_range(0.0..1.0));
        let kmean = KMeans::new(samples, sample_cnt, sample_dims).unwrap();

        let mut state = KMeansState::new(sample_cnt, sample_dims, k);
        state.centroids.copy_from_slice(&kmean.samples[..k * sample_dims]);

        // calculate distances using method that (hopefully) works.
        let mut should_assignments = state.assignments.clone();
        let mut should_centroid_distances = state.centroid_distances.clone();
        kmean.samples.chunks_exact(sample_dims)
            .zip(should_assignments.iter_mut())
            .zip(should_centroid_distances.iter_mut())
            .for_each(|((s, assignment), centroid_dist)| {
                let (best_idx, best_dist) = state.centroids
                    .chunks_exact(sample_dims)
                    .map(|c| {
                        s.iter().cloned().zip(c.iter().cloned())
                            .map(|(sv,cv)| sv - cv)
                            .map(|v| v * v)
                            .sum::<f64>()
                    })
                    .enumerate()
                    .min_by(|(_,d0), (_,d1)| d0.partial_cmp(d1).unwrap())
                    .unwrap();
                *assignment = best_idx;
                *centroid_dist = best_dist;
            });

        kmean.update_cluster_assignments(&mut state, None);

        for i in 0..should_assignments.len() {
            assert_approx_eq!(state.centroid_distances[i], should_centroid_distances[i], 1e-12);
        }
        assert_eq!(state.assignments, should_assignments);

        // the first k samples are their own centroids
        assert_eq!(&state.assignments[..k], &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn cluster_assignments_with_limit() {
        let kmean = KMeans::new(vec![0.0f64, 1.0, 9.0, 10.0], 4, 1).unwrap();
        let mut state = KMeansState::new(4, 1, 2);
        state.centroids.copy_from_slice(&[0.0, 10.0]);
        kmean.update_cluster_assignments(&mut state, Some(1));
        assert_eq!(state.assignments, vec![0, 0, 0, 0]);
        assert_eq!(state.centroid_distances, vec![0.0, 1.0, 81.0, 100.0]);
    }

    #[test]
    fn cluster_frequencies() {
        let kmean = KMeans::new(vec![0.0f64; 4], 4, 1).unwrap();
        let mut freq = vec![7usize; 3];
        assert_eq!(kmean.update_cluster_frequencies(&[0, 2, 2, 0], &mut freq), 2);
        assert_eq!(freq, vec![2, 0, 2]);
    }

    #[test]
    fn fit_validates_initial_centroids() {
        let observations = vec![vec![0.0f64, 0.0], vec![0.0, 1.0], vec![10.0, 0.0]];
        assert_eq!(fit(&[vec![0.0, 0.0]], &observations, 2, 10, 0.0).unwrap_err(),
            KMeansError::CentroidCountMismatch { expected: 2, found: 1 });
        assert_eq!(fit(&[vec![0.0], vec![1.0]], &observations, 2, 10, 0.0).unwrap_err(),
            KMeansError::ShapeMismatch { row: 0, expected: 2, found: 1 });
        assert_eq!(fit(&[vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]], &observations, 3, 10, 0.0).unwrap_err(),
            KMeansError::InvalidClusterCount { k: 3, sample_cnt: 3 });
    }

    #[test]
    fn seed_then_fit() {
        let observations = vec![vec![0.0f64, 0.0], vec![0.0, 1.0], vec![10.0, 0.0], vec![10.0, 1.0]];
        let (indices, initial) = seed(&observations, 2, DEFAULT_RANDOM_SEED).unwrap();
        assert_eq!(indices.len(), 2);
        assert_eq!(initial[0], observations[indices[0]]);
        assert_eq!(initial[1], observations[indices[1]]);
        assert_eq!(seed(&observations, 2, DEFAULT_RANDOM_SEED).unwrap(), (indices.clone(), initial.clone()));

        let centroids = fit(&initial, &observations, 2, 300, 0.0001).unwrap();
        assert_eq!(centroids.len(), 2);
        assert!(centroids.iter().all(|c| c.len() == 2));
    }

    #[test]
    fn centroid_rows() {
        let mut state = KMeansState::<f32>::new(3, 2, 2);
        state.set_centroid_from_iter(1, [5.0, 6.0].iter().cloned());
        assert_eq!(state.centroid_rows(), vec![vec![0.0, 0.0], vec![5.0, 6.0]]);
        assert_eq!(state.sample_dims(), 2);
    }
}
