use anyhow::Result;
use benchgame::cli::{describe_failure, run_command, Cli};
use clap::Parser;
use std::io::{self, BufWriter, Write};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(error) = run(&cli).await {
        eprintln!("{}", describe_failure(&error));
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let stdin = io::stdin().lock();
    // 標準出力はベンチマーク出力専用
    let stdout = BufWriter::new(io::stdout());

    let mut stdout = run_command(cli, stdin, stdout).await?;
    stdout.flush()?;
    Ok(())
}

// RUST_LOGが指定されていればそちらを優先する
fn init_logger(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();
}
