pub mod binary_trees;
pub mod fasta;
pub mod mandelbrot;
pub mod revcomp;
pub mod spectral_norm;

pub use binary_trees::*;
pub use fasta::*;
pub use mandelbrot::*;
pub use revcomp::*;
pub use spectral_norm::*;

use super::args::{Cli, Commands, RunOptions};
use crate::core::{ProcessingConfig, ProcessingError, ProgressReporter};
use crate::engine::OrderedParallelMap;
use crate::services::{ConsoleProgressReporter, DefaultProcessingConfig, NoOpProgressReporter};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// CLIから使う並列マップの型
pub type CliOrderedMap = OrderedParallelMap<DefaultProcessingConfig, Box<dyn ProgressReporter>>;

/// オプションから並列処理の設定を作って検証する
///
/// `--threads`未指定ならCPU数。
pub fn build_processing_config(
    options: &RunOptions,
    label: &str,
) -> Result<DefaultProcessingConfig> {
    let config = match options.threads {
        Some(threads) => DefaultProcessingConfig::new(threads).with_max_concurrent(threads),
        None => DefaultProcessingConfig::default(),
    }
    .with_progress_reporting(options.verbose);
    config
        .validate()
        .with_context(|| format!("Invalid worker configuration for {label}"))?;
    Ok(config)
}

/// オプションから並列マップを組み立てる
///
/// `--verbose`なら進捗をログへ出力する。
pub fn build_ordered_map(options: &RunOptions, label: &str) -> Result<CliOrderedMap> {
    let config = build_processing_config(options, label)?;

    let reporter: Box<dyn ProgressReporter> = if options.verbose {
        Box::new(ConsoleProgressReporter::new().with_label(label))
    } else {
        Box::new(NoOpProgressReporter::new())
    };

    log::info!("{label}: {} workers", config.max_concurrent_tasks());
    Ok(OrderedParallelMap::new(config, reporter))
}

/// 終了時に標準エラーへ出すメッセージ
///
/// エラーチェーンに`ProcessingError`があれば重要度と回復可能性を添える。
pub fn describe_failure(error: &anyhow::Error) -> String {
    let cause = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ProcessingError>());
    match cause {
        Some(cause) if cause.is_recoverable() => {
            format!("Error [{}, recoverable]: {error:#}", cause.severity().as_str())
        }
        Some(cause) => format!("Error [{}]: {error:#}", cause.severity().as_str()),
        None => format!("Error: {error:#}"),
    }
}

/// サブコマンドを実行し、出力し終えたwriterを返す
///
/// `input`はrevcompのみが読む。
pub async fn run_command<R, W>(cli: &Cli, input: R, output: W) -> Result<W>
where
    R: BufRead,
    W: Write + Send + 'static,
{
    let options = RunOptions::from(cli);
    match cli.command {
        Commands::BinaryTrees { depth } => execute_binary_trees(&options, depth, output).await,
        Commands::Fasta { n } => execute_fasta(&options, n, output),
        Commands::Mandelbrot { size } => execute_mandelbrot(&options, size, output).await,
        Commands::Revcomp => execute_revcomp(&options, input, output).await,
        Commands::SpectralNorm { n } => execute_spectral_norm(&options, n, output).await,
    }
}
