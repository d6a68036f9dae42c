// ワーカー数・完了順に依存しない順序保証のテスト
use benchgame::{
    core::{Kernel, OrderedSink, ProcessingResult},
    engine::{create_ordered_map_with_workers, OrderedParallelMap, VecSink},
    services::{DefaultProcessingConfig, NoOpProgressReporter},
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// インデックスの大きい要素ほど早く終わるカーネル
struct ReverseSleepKernel {
    total: u64,
}

impl Kernel<u64> for ReverseSleepKernel {
    type Output = String;

    fn apply(&self, x: u64) -> String {
        std::thread::sleep(Duration::from_millis((self.total - x) % 5));
        format!("item-{x}")
    }
}

/// emitの呼び出し順を記録するSink
#[derive(Clone, Default)]
struct RecordingSink {
    indices: Arc<Mutex<Vec<usize>>>,
}

impl OrderedSink<String> for RecordingSink {
    fn emit(&mut self, index: usize, _value: String) -> ProcessingResult<()> {
        self.indices.lock().unwrap().push(index);
        Ok(())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_output_identical_for_any_worker_count() {
    let items: Vec<u64> = (0..120).collect();
    let expected: Vec<String> = items.iter().map(|x| format!("item-{x}")).collect();

    for workers in [1, 2, 4, 7, 200] {
        let map = create_ordered_map_with_workers(workers);
        let output = map
            .map(items.clone(), ReverseSleepKernel { total: 120 })
            .await
            .unwrap();
        assert_eq!(output, expected, "workers = {workers}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sink_sees_strictly_increasing_indices() {
    let map = create_ordered_map_with_workers(4);
    let sink = RecordingSink::default();
    let indices = Arc::clone(&sink.indices);

    let (summary, _sink) = map
        .map_into((0..64u64).collect::<Vec<_>>(), ReverseSleepKernel { total: 64 }, sink)
        .await
        .unwrap();

    assert!(!summary.sequential);
    assert_eq!(*indices.lock().unwrap(), (0..64).collect::<Vec<usize>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_more_workers_than_items_completes() {
    let map = create_ordered_map_with_workers(32);

    let output = map.map(vec![3u64, 1, 2], |x: u64| x * 10).await.unwrap();

    assert_eq!(output, vec![30, 10, 20]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_chunked_and_dynamic_strategies_agree() {
    let map = OrderedParallelMap::new(
        DefaultProcessingConfig::new(3).with_chunk_size(10),
        NoOpProgressReporter::new(),
    );
    let items: Vec<u64> = (0..95).collect();

    let dynamic = map.map(items.clone(), |x: u64| x.pow(2)).await.unwrap();
    let chunked = map
        .map_chunked(items, Arc::new(|x: u64| x.pow(2)))
        .await
        .unwrap();

    assert_eq!(dynamic, chunked);
}

#[tokio::test]
async fn test_vec_sink_through_map_into() {
    let map = create_ordered_map_with_workers(1);

    let (summary, sink) = map
        .map_into(vec![1u8, 2, 3], |x: u8| x + 1, VecSink::new())
        .await
        .unwrap();

    assert!(summary.sequential);
    assert_eq!(sink.into_inner(), vec![2, 3, 4]);
}
