use kmeanspp::*;

fn main() {
    let (sample_cnt, sample_dims, k, max_iter) = (20000, 200, 4, 2500);

    // Generate some random data
    let mut samples = vec![0.0f64;sample_cnt * sample_dims];
    samples.iter_mut().for_each(|v| *v = rand::random());

	let conf = KMeansConfig::build()
		.sampling(SamplingMethod::CumulativeWalk)
		.init_done(&|s| println!("Initialization completed. Seeds: {:?}", s.seed_indices))
		.iteration_done(&|s, nr, delta|
			println!("Iteration {} - Error: {:.2} | Largest centroid shift: {:.6}", nr, s.distsum, delta))
		.build();

    // Calculate kmeans, using kmean++ as initialization-method
    let kmean = KMeans::new(samples, sample_cnt, sample_dims).expect("valid sample matrix");
    let result = kmean.kmeans_lloyd(k, max_iter, 0.0001, KMeans::init_kmeanplusplus, &conf)
        .expect("k-means failed");

    println!("Converged: {} after {} iterations", result.converged, result.iterations);
    println!("Empty clusters: {:?}", result.degeneracies);
    println!("Error: {}", result.distsum);
}
