//! Glue between raw input and the engine: argument validation, joining two tables on their
//! key column and formatting of the result.
//!
//! Nothing in here touches the file system; callers hand in the table contents as text.

use crate::error::InputError;
use crate::{KMeans, KMeansConfig, DEFAULT_RANDOM_SEED};
use clap::Parser;
use rand::SeedableRng;
use std::ffi::OsString;

/// Iteration cap used when no explicit value is given.
pub const DEFAULT_MAX_ITER: usize = 300;

/// Positional command line: `K [max_iter] eps file_1 file_2`.
///
/// clap only collects the values; their meaning depends on how many were given,
/// so they are validated by [`RunParams::from_args`].
#[derive(Parser, Debug)]
#[command(name = "kmeans_pp")]
#[command(about = "Join two tables on their first column and cluster the rows with k-means++ and Lloyd")]
pub struct Cli {
    /// K [max_iter] eps file_1 file_2
    #[arg(num_args = 4..=5, required = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Validated parameters of a clustering run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunParams {
    pub k: usize,
    pub max_iter: usize,
    pub eps: f64,
    pub left_path: String,
    pub right_path: String,
}

fn parse_integral(arg: &str, err: InputError) -> Result<i64, InputError> {
    let value: f64 = arg.trim().parse().map_err(|_| err.clone())?;
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(err);
    }
    Ok(value as i64)
}

impl RunParams {
    /// Parse a full command line (including the program name) and validate it.
    /// Anything clap rejects, like a wrong number of values, is reported as [`InputError::Malformed`].
    pub fn from_cli<I, A>(argv: I) -> Result<Self, InputError>
    where I: IntoIterator<Item = A>, A: Into<OsString> + Clone {
        let cli = Cli::try_parse_from(argv).map_err(|e| {
            log::debug!("rejected command line: {:?}", e.kind());
            InputError::Malformed
        })?;
        Self::from_args(&cli.args)
    }

    /// Validate positional arguments (without the program name):
    /// `k [max_iter] eps left_file right_file`.
    ///
    /// `k` and `max_iter` may be written as floats, but have to be integral.
    /// `max_iter` defaults to [`DEFAULT_MAX_ITER`] and has to lie within `(1, 1000)`.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, InputError> {
        let args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
        let (k, max_iter, eps, left, right) = match args.as_slice() {
            [k, eps, left, right] => (*k, None, *eps, *left, *right),
            [k, max_iter, eps, left, right] => (*k, Some(*max_iter), *eps, *left, *right),
            _ => return Err(InputError::Malformed),
        };

        let k = parse_integral(k, InputError::InvalidClusterCount)?;
        if k <= 1 {
            return Err(InputError::InvalidClusterCount);
        }
        let max_iter = match max_iter {
            Some(arg) => {
                let max_iter = parse_integral(arg, InputError::InvalidMaxIter)?;
                if !(1 < max_iter && max_iter < 1000) {
                    return Err(InputError::InvalidMaxIter);
                }
                max_iter as usize
            }
            None => DEFAULT_MAX_ITER,
        };
        let eps: f64 = eps.trim().parse().map_err(|_| InputError::Malformed)?;
        if eps.is_nan() || eps < 0.0 {
            return Err(InputError::InvalidEpsilon);
        }

        Ok(Self { k: k as usize, max_iter, eps, left_path: left.to_string(), right_path: right.to_string() })
    }
}

/// Rectangular table of numbers. Column 0 is the join key.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    pub rows: Vec<Vec<f64>>,
}

impl Table {
    /// Parse header-less, comma separated numbers. Empty lines are skipped, `nan` and `inf` are rejected.
    pub fn parse_csv(text: &str) -> Result<Self, InputError> {
        let mut rows: Vec<Vec<f64>> = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = line.split(',')
                .enumerate()
                .map(|(column, cell)| cell.trim().parse::<f64>().ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| InputError::Parse {
                        line: lineno + 1,
                        column: column + 1,
                        value: cell.to_string(),
                    }))
                .collect::<Result<Vec<f64>, InputError>>()?;
            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(InputError::Ragged { line: lineno + 1, expected: first.len(), found: row.len() });
                }
            }
            rows.push(row);
        }
        Ok(Self { rows })
    }

    /// Inner join of two tables on column 0, sorted ascending by key (stable), with the key
    /// column removed. Every pair of rows with equal keys produces one observation:
    /// the left row's values followed by the right row's values.
    pub fn merge_on_key(left: &Table, right: &Table) -> Vec<Vec<f64>> {
        let mut merged: Vec<(f64, Vec<f64>)> = Vec::new();
        for l in left.rows.iter().filter(|r| !r.is_empty()) {
            for r in right.rows.iter().filter(|r| !r.is_empty() && r[0] == l[0]) {
                let mut values = l[1..].to_vec();
                values.extend_from_slice(&r[1..]);
                merged.push((l[0], values));
            }
        }
        merged.sort_by(|(a, _), (b, _)| a.total_cmp(b));
        merged.into_iter().map(|(_, values)| values).collect()
    }
}

/// Comma-joined seed indices.
pub fn format_indices(indices: &[usize]) -> String {
    indices.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(",")
}

/// One comma-joined line per centroid, every coordinate with 4 decimal digits.
pub fn format_centroids(centroids: &[Vec<f64>]) -> Vec<String> {
    centroids.iter()
        .map(|c| c.iter().map(|v| format!("{:.4}", v)).collect::<Vec<_>>().join(","))
        .collect()
}

/// Join both tables, seed with [`DEFAULT_RANDOM_SEED`], refine, and render the output:
/// the seed indices on the first line, followed by one line per final centroid.
pub fn run(params: &RunParams, left: &Table, right: &Table) -> Result<String, InputError> {
    let observations = Table::merge_on_key(left, right);
    if !(params.k < observations.len()) {
        return Err(InputError::InvalidClusterCount);
    }
    let kmean = KMeans::from_rows(&observations)?;
    log::info!("clustering {} observations of dimension {} into {} clusters", kmean.sample_cnt(), kmean.sample_dims(), params.k);

    let conf = KMeansConfig::build()
        .random_generator(rand::rngs::StdRng::seed_from_u64(DEFAULT_RANDOM_SEED))
        .build();
    let seeding = kmean.seed(params.k, &conf)?;
    let result = kmean.kmeans_lloyd(params.k, params.max_iter, params.eps,
        KMeans::init_precomputed(seeding.centroids.clone()), &conf)?;
    log::info!("finished after {} iterations (converged: {})", result.iterations, result.converged);

    let mut lines = vec![format_indices(&seeding.indices)];
    lines.extend(format_centroids(&result.centroid_rows()));
    Ok(lines.join("\n"))
}
