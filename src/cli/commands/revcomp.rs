use super::build_ordered_map;
use crate::cli::args::RunOptions;
use crate::kernels::revcomp;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Execute revcomp on FASTA records read from `input`
pub async fn execute_revcomp<R, W>(options: &RunOptions, input: R, output: W) -> Result<W>
where
    R: BufRead,
    W: Write + Send + 'static,
{
    let map = build_ordered_map(options, "revcomp")?;

    let output = revcomp::run(&map, input, output)
        .await
        .context("revcomp failed")?;
    Ok(output)
}
