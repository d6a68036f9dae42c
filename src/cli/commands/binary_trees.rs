use super::build_ordered_map;
use crate::cli::args::RunOptions;
use crate::kernels::binary_trees;
use anyhow::{Context, Result};
use std::io::Write;

/// Execute binary-trees and write the report lines
pub async fn execute_binary_trees<W: Write>(
    options: &RunOptions,
    depth: u32,
    mut output: W,
) -> Result<W> {
    let map = build_ordered_map(options, "binary-trees")?;

    let report = binary_trees::run(&map, depth)
        .await
        .context("binary-trees failed")?;
    report
        .write_to(&mut output)
        .context("Failed to write binary-trees output")?;
    Ok(output)
}
