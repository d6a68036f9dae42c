use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "benchgame")]
#[command(about = "Benchmarks Game programs on an order-preserving parallel map")]
#[command(version)]
pub struct Cli {
    /// Number of worker tasks (defaults to the number of CPUs)
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Allocate and walk perfect binary trees
    BinaryTrees {
        /// Maximum tree depth (at least 6 is used)
        depth: u32,
    },

    /// Generate DNA sequences in FASTA format
    Fasta {
        /// Length factor for the three sequences
        n: usize,
    },

    /// Render the Mandelbrot set as a binary PBM bitmap
    Mandelbrot {
        /// Width and height in pixels
        size: usize,
    },

    /// Reverse-complement FASTA records read from stdin
    Revcomp,

    /// Approximate the spectral norm of an infinite matrix
    SpectralNorm {
        /// Matrix size
        n: usize,
    },
}

/// サブコマンド共通の実行オプション
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub threads: Option<usize>,
    pub verbose: bool,
}

impl From<&Cli> for RunOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            threads: cli.threads,
            verbose: cli.verbose,
        }
    }
}
