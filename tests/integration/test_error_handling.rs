// エラーハンドリングの統合テスト
use benchgame::{
    cli::{build_ordered_map, RunOptions},
    core::{ErrorSeverity, OrderedSink, ProcessingError, ProcessingResult},
    engine::{create_ordered_map_with_workers, OrderedParallelMap, WriterSink},
    kernels::mandelbrot,
    services::{DefaultProcessingConfig, NoOpProgressReporter},
};
use std::io::{self, Write};

/// 常に書き込みに失敗するwriter
#[derive(Debug)]
struct BrokenWriter;

impl Write for BrokenWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// 指定インデックスで失敗するSink
struct FailingSink {
    fail_at: usize,
}

impl OrderedSink<u32> for FailingSink {
    fn emit(&mut self, index: usize, _value: u32) -> ProcessingResult<()> {
        if index == self.fail_at {
            return Err(ProcessingError::io(io::Error::new(
                io::ErrorKind::Other,
                "sink rejected item",
            )));
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_zero_workers_is_configuration_error() {
    let map = OrderedParallelMap::new(
        DefaultProcessingConfig::new(4).with_max_concurrent(0),
        NoOpProgressReporter::new(),
    );

    let error = map.map(vec![1u32, 2], |x: u32| x).await.unwrap_err();

    assert!(matches!(error, ProcessingError::ConfigurationError { .. }));
    assert!(error.is_recoverable());
}

#[tokio::test]
async fn test_zero_chunk_size_is_configuration_error() {
    let map = OrderedParallelMap::new(
        DefaultProcessingConfig::new(2).with_chunk_size(0),
        NoOpProgressReporter::new(),
    );

    let result = map
        .map_chunked(vec![1u32, 2, 3], std::sync::Arc::new(|x: u32| x))
        .await;

    assert!(result.is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_kernel_panic_surfaces_as_task_error() {
    let map = create_ordered_map_with_workers(2);

    let error = map
        .map((0..10u32).collect::<Vec<_>>(), |x: u32| {
            if x == 7 {
                panic!("kernel failure");
            }
            x
        })
        .await
        .unwrap_err();

    assert!(matches!(error, ProcessingError::TaskError { .. }));
    assert_eq!(error.severity(), ErrorSeverity::High);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_writer_failure_is_io_error() {
    let map = create_ordered_map_with_workers(2);

    let error = mandelbrot::render(&map, 16, BrokenWriter).await.unwrap_err();

    assert!(matches!(error, ProcessingError::IoError { .. }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_sink_failure_propagates_from_parallel_run() {
    let map = create_ordered_map_with_workers(2);

    let result = map
        .map_into((0..50u32).collect::<Vec<_>>(), |x: u32| x, FailingSink { fail_at: 20 })
        .await;

    // 停止したCollectorへの送信失敗ではなく、Sinkのエラーが返る
    match result {
        Ok(_) => panic!("sink failure should fail the run"),
        Err(error) => assert!(matches!(error, ProcessingError::IoError { .. })),
    }
}

#[tokio::test]
async fn test_writer_sink_reports_broken_pipe() {
    let map = create_ordered_map_with_workers(1);

    let result = map
        .map_into(vec![0usize], |_: usize| vec![1u8], WriterSink::new(BrokenWriter))
        .await;

    assert!(result.is_err());
}

#[test]
fn test_cli_rejects_zero_threads() {
    let options = RunOptions {
        threads: Some(0),
        verbose: false,
    };

    let error = build_ordered_map(&options, "test").err().unwrap();

    assert!(format!("{error:#}").contains("test"));
}
