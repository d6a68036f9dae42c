use super::build_processing_config;
use crate::cli::args::RunOptions;
use crate::kernels::fasta;
use anyhow::{Context, Result};
use std::io::Write;

/// Execute fasta and write the three sequences
///
/// Generation is sequential; `--threads` only affects validation.
pub fn execute_fasta<W: Write>(options: &RunOptions, n: usize, mut output: W) -> Result<W> {
    build_processing_config(options, "fasta")?;

    fasta::write_fasta(&mut output, n).context("Failed to write fasta output")?;
    Ok(output)
}
