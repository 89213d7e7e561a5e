//! # kmeanspp - API documentation
//!
//! kmeanspp is a small rust library clustering dense, real-valued observations into `k` groups.
//! It selects the initial centroids with k-means++ and refines them with Lloyd's algorithm.
//!
//! ## Design target
//! Every run is a pure function of its inputs and of the random number generator handed in through
//! [`KMeansConfig`]. There is no process-wide state, so multiple independent runs never interfere with
//! each other. Samples are given as a plain row-major vector, instead of any high-level matrix crate.
//! The assignment step is parallelized with rayon; the result does not depend on the thread count.
//!
//! ## Algorithm
//! - **Seeding** ([`KMeans::seed`] / [`KMeans::init_kmeanplusplus`]): The first centroid is drawn uniformly,
//!   each following one with probability proportional to its squared distance to the nearest centroid
//!   selected so far.
//! - **Refinement** ([`KMeans::kmeans_lloyd`]): Samples are assigned to their nearest centroid (ties go to the
//!   lowest index), centroids move to the mean of their samples. This repeats until no centroid moves by `eps`
//!   or more, or until `max_iter` iterations were done. Centroids without samples keep their position.
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use kmeanspp::*;
//!
//! let observations = vec![vec![0.0f64, 0.0], vec![0.0, 1.0], vec![10.0, 0.0], vec![10.0, 1.0]];
//!
//! let (indices, initial) = seed(&observations, 2, DEFAULT_RANDOM_SEED).unwrap();
//! let centroids = fit(&initial, &observations, 2, 300, 0.0001).unwrap();
//!
//! println!("Seeds: {:?}", indices);
//! println!("Centroids: {:?}", centroids);
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use kmeanspp::*;
//! use rand::SeedableRng;
//!
//! let (sample_cnt, sample_dims, k, max_iter) = (2000, 4, 4, 100);
//!
//! // Generate some random data
//! let mut samples = vec![0.0f64;sample_cnt * sample_dims];
//! samples.iter_mut().for_each(|v| *v = rand::random());
//!
//! let conf = KMeansConfig::build()
//!     .random_generator(rand::rngs::StdRng::seed_from_u64(42))
//!     .init_done(&|_| println!("Initialization completed."))
//!     .iteration_done(&|s, nr, delta|
//!         println!("Iteration {} - Error: {:.2} | Largest shift: {:.4}", nr, s.distsum, delta))
//!     .build();
//!
//! let kmean = KMeans::new(samples, sample_cnt, sample_dims).unwrap();
//! let result = kmean.kmeans_lloyd(k, max_iter, 0.0001, KMeans::init_kmeanplusplus, &conf).unwrap();
//!
//! println!("Seeds: {:?}", result.seed_indices);
//! println!("Centroids: {:?}", result.centroids);
//! println!("Error: {}", result.distsum);
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct, generic over the underlying primitive type. It takes
//! over the sample data into its ownership and validates its shape. Calling [`KMeans::seed`] or
//! [`KMeans::kmeans_lloyd`] does not mutate it; every run stores its state (and finally its result) in a new
//! [`KMeansState`].
//!
//! The free functions [`seed`] and [`fit`] cover the common case of one vector per observation.
//! The [`pipeline`] module holds the glue used by the command line demo: argument validation,
//! joining two tables on a key column and formatting of the output.

#[macro_use] mod helpers;
mod memory;
mod error;
mod distance;
mod convergence;
mod api;
mod variants;
mod inits;
pub mod pipeline;

pub use api::{
    fit, seed, KMeans, KMeansConfig, KMeansConfigBuilder, KMeansState, NumericDegeneracy, SamplingMethod,
    Seeding, SeedingFallback, DEFAULT_RANDOM_SEED,
};
pub use convergence::max_centroid_shift;
pub use distance::{euclidean, squared_euclidean};
pub use error::{InputError, KMeansError};
pub use memory::Primitive;
