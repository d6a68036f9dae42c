use super::build_ordered_map;
use crate::cli::args::RunOptions;
use crate::kernels::spectral_norm;
use anyhow::{Context, Result};
use std::io::Write;

/// Execute spectral-norm and write the result with 9 decimals
pub async fn execute_spectral_norm<W: Write>(
    options: &RunOptions,
    n: usize,
    mut output: W,
) -> Result<W> {
    let map = build_ordered_map(options, "spectral-norm")?;

    let norm = spectral_norm::spectral_norm(&map, n)
        .await
        .context("spectral-norm failed")?;
    writeln!(output, "{}", spectral_norm::format_norm(norm))
        .context("Failed to write spectral-norm output")?;
    Ok(output)
}
