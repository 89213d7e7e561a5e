//! Command line front-end: `kmeans_pp K [max_iter] eps file_1 file_2`
//!
//! Joins both files on their first column, clusters the remaining columns and prints the
//! seed indices followed by the final centroids.

use kmeanspp::pipeline::{self, RunParams, Table};
use kmeanspp::InputError;
use std::fs;
use std::process::ExitCode;

fn load(path: &str) -> Result<Table, InputError> {
    let text = fs::read_to_string(path).map_err(|_| InputError::Malformed)?;
    Table::parse_csv(&text)
}

fn execute() -> Result<String, InputError> {
    let params = RunParams::from_cli(std::env::args_os())?;
    let left = load(&params.left_path)?;
    let right = load(&params.right_path)?;
    pipeline::run(&params, &left, &right)
}

fn main() -> ExitCode {
    match execute() {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
