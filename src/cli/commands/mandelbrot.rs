use super::build_ordered_map;
use crate::cli::args::RunOptions;
use crate::kernels::mandelbrot;
use anyhow::{Context, Result};
use std::io::Write;

/// Execute mandelbrot and write a binary PBM image
pub async fn execute_mandelbrot<W>(options: &RunOptions, size: usize, output: W) -> Result<W>
where
    W: Write + Send + 'static,
{
    let map = build_ordered_map(options, "mandelbrot")?;

    let output = mandelbrot::render(&map, size, output)
        .await
        .context("mandelbrot failed")?;
    Ok(output)
}
