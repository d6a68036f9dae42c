//! Benchmarks Game programs built on an order-preserving parallel map.
//!
//! - [`engine`]: the ordered parallel map (producer, worker pool, ordered collector)
//! - [`kernels`]: binary-trees, fasta, mandelbrot, revcomp, spectral-norm
//! - [`services`]: configuration and progress reporting
//! - [`cli`]: command-line arguments and subcommand execution

pub mod cli;
pub mod core;
pub mod engine;
pub mod kernels;
pub mod services;
