// エンドツーエンド統合テスト
use benchgame::{
    cli::{run_command, Cli, RunOptions},
    cli::commands::{execute_fasta, execute_revcomp},
    engine::create_ordered_map_with_workers,
    kernels::{binary_trees, mandelbrot, revcomp, spectral_norm},
};
use clap::Parser;
use std::fs;
use std::io::{BufReader, Cursor};
use tempfile::TempDir;

fn options(threads: usize) -> RunOptions {
    RunOptions {
        threads: Some(threads),
        verbose: false,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_binary_trees_report_lines() {
    let map = create_ordered_map_with_workers(4);
    let report = binary_trees::run(&map, 6).await.unwrap();

    assert_eq!(report.stretch_depth, 7);
    assert_eq!(report.depths.len(), 2);
    assert_eq!(
        report.to_string().lines().last(),
        Some("long lived tree of depth 6\t check: 127")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_mandelbrot_pbm_layout() {
    let size = 37;
    let map = create_ordered_map_with_workers(3);

    let image = mandelbrot::render(&map, size, Vec::new()).await.unwrap();

    let header = b"P4\n37 37\n";
    assert!(image.starts_with(header));
    let pixels = &image[header.len()..];
    assert_eq!(pixels.len(), size * 5);
    // 各行末尾の未使用3ビットは0
    for row in pixels.chunks(5) {
        assert_eq!(row[4] & 0b0000_0111, 0);
    }
}

#[tokio::test]
async fn test_spectral_norm_cli_output() {
    let cli = Cli::parse_from(["benchgame", "spectral-norm", "10"]);

    let output = run_command(&cli, Cursor::new(Vec::new()), Vec::new())
        .await
        .unwrap();

    assert_eq!(output, b"1.271844019\n".to_vec());
}

#[test]
fn test_fasta_round_trip_through_revcomp_file() {
    let temp_dir = TempDir::new().unwrap();
    let fasta_path = temp_dir.path().join("input.fasta");

    let fasta = execute_fasta(&options(2), 1000, Vec::new()).unwrap();
    fs::write(&fasta_path, &fasta).unwrap();

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let records = revcomp::read_records(BufReader::new(fs::File::open(&fasta_path).unwrap())).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].header, b">ONE Homo sapiens alu\n".to_vec());

    let reversed = runtime
        .block_on(execute_revcomp(
            &options(2),
            BufReader::new(fs::File::open(&fasta_path).unwrap()),
            Vec::new(),
        ))
        .unwrap();

    // 1本目はACGTのみなので2回適用すると元に戻る
    let twice = runtime
        .block_on(execute_revcomp(&options(2), Cursor::new(reversed.clone()), Vec::new()))
        .unwrap();
    let first_record = |bytes: &[u8]| {
        revcomp::read_records(Cursor::new(bytes.to_vec())).unwrap()[0]
            .sequence
            .clone()
    };
    assert_eq!(first_record(&twice[..]), first_record(&fasta[..]));
    assert_eq!(reversed.len(), fasta.len());
}

#[tokio::test]
async fn test_spectral_norm_single_entry() {
    let map = create_ordered_map_with_workers(2);

    let value = spectral_norm::spectral_norm(&map, 1).await.unwrap();

    assert_eq!(spectral_norm::format_norm(value), "1.000000000");
}
