// Pipeline - Producer-Consumer-Collector パイプライン
// 逐次フォールバックと並列実行のオーケストレーション

use super::{collector::spawn_ordered_collector, consumer::spawn_consumers, producer::spawn_producer};
use crate::{
    core::{
        Kernel, OrderedSink, ProcessingConfig, ProcessingError, ProcessingResult,
        ProcessingSummary, ProgressReporter, WorkItem,
    },
    services::validate_config,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// 1つのカーネルを順序保証付きで実行するパイプライン
pub struct OrderedPipeline<K> {
    kernel: Arc<K>,
}

impl<K> OrderedPipeline<K> {
    /// 新しいパイプラインを作成
    pub fn new(kernel: Arc<K>) -> Self {
        Self { kernel }
    }

    /// 作業単位のリストを処理し、結果を元の順序でSinkへ流す
    ///
    /// ワーカー数が1以下、または件数が逐次閾値未満なら
    /// タスクもチャンネルも使わずにその場で順に処理する。
    pub async fn execute<T, C, P, S>(
        &self,
        items: Vec<T>,
        config: &C,
        reporter: Arc<P>,
        sink: S,
    ) -> ProcessingResult<(ProcessingSummary, S)>
    where
        K: Kernel<T>,
        T: Send + 'static,
        C: ProcessingConfig + ?Sized,
        P: ProgressReporter + 'static,
        S: OrderedSink<K::Output>,
    {
        validate_config(config)?;

        let start_time = Instant::now();
        let total_items = items.len();
        let worker_count = config.max_concurrent_tasks().min(total_items).max(1);
        let sequential = worker_count <= 1 || total_items < config.sequential_threshold();

        if config.enable_progress_reporting() {
            reporter.report_started(total_items).await;
        }

        let sink = if sequential {
            log::debug!("running {total_items} items sequentially");
            self.execute_sequential(items, config, reporter.as_ref(), sink)
                .await?
        } else {
            log::debug!("running {total_items} items on {worker_count} workers");
            self.execute_parallel(items, config, worker_count, Arc::clone(&reporter), sink)
                .await?
        };

        let total_processing_time_ms = start_time.elapsed().as_millis() as u64;
        if config.enable_progress_reporting() {
            reporter
                .report_completed(total_items, total_processing_time_ms)
                .await;
        }

        let summary = ProcessingSummary {
            total_items,
            emitted_items: total_items,
            worker_count: if sequential { 1 } else { worker_count },
            sequential,
            total_processing_time_ms,
        };
        log::debug!(
            "emitted {total_items} items in {total_processing_time_ms}ms ({:.3}ms/item)",
            summary.average_time_per_item_ms()
        );
        Ok((summary, sink))
    }

    async fn execute_sequential<T, C, P, S>(
        &self,
        items: Vec<T>,
        config: &C,
        reporter: &P,
        mut sink: S,
    ) -> ProcessingResult<S>
    where
        K: Kernel<T>,
        C: ProcessingConfig + ?Sized,
        P: ProgressReporter,
        S: OrderedSink<K::Output>,
    {
        let total = items.len();
        for (index, payload) in items.into_iter().enumerate() {
            sink.emit(index, self.kernel.apply(payload))?;
            if config.enable_progress_reporting() {
                reporter.report_progress(index + 1, total).await;
            }
        }
        sink.finish()?;
        Ok(sink)
    }

    async fn execute_parallel<T, C, P, S>(
        &self,
        items: Vec<T>,
        config: &C,
        worker_count: usize,
        reporter: Arc<P>,
        sink: S,
    ) -> ProcessingResult<S>
    where
        K: Kernel<T>,
        T: Send + 'static,
        C: ProcessingConfig + ?Sized,
        P: ProgressReporter + 'static,
        S: OrderedSink<K::Output>,
    {
        let total_items = items.len();

        // Producer-Consumerチャンネル構築
        let (work_tx, work_rx) = mpsc::channel::<WorkItem<T>>(config.channel_buffer_size());
        let (result_tx, result_rx) = mpsc::channel(config.channel_buffer_size());

        // Producer起動
        let producer_handle = spawn_producer(items, work_tx);

        // Consumer Pool起動
        let consumer_handles =
            spawn_consumers(Arc::clone(&self.kernel), work_rx, result_tx, worker_count);

        // Collector起動（result_txのクローンは全てワーカーが保持している）
        let collector_handle = spawn_ordered_collector(
            result_rx,
            total_items,
            sink,
            reporter,
            config.enable_progress_reporting(),
        );

        // Consumer完了を待機
        let mut task_errors = Vec::new();
        for handle in consumer_handles {
            if let Err(error) = handle.await? {
                task_errors.push(error);
            }
        }

        // Producer完了を待機
        if let Err(error) = producer_handle.await? {
            task_errors.push(error);
        }

        // Collector完了を待機
        let collected = collector_handle.await?;
        resolve_outcome(task_errors, collected)
    }
}

/// 各タスクの結果から実行全体の結果を決める
///
/// チャンネルエラーは相手側が先に終了した結果なので、
/// それ以外のタスクエラー、Collectorのエラーの順に優先する。
fn resolve_outcome<S>(
    task_errors: Vec<ProcessingError>,
    collected: ProcessingResult<S>,
) -> ProcessingResult<S> {
    let mut channel_error = None;
    for error in task_errors {
        match error {
            ProcessingError::ChannelError { .. } => {
                if channel_error.is_none() {
                    channel_error = Some(error);
                }
            }
            error => return Err(error),
        }
    }

    let sink = collected?;
    match channel_error {
        Some(error) => Err(error),
        None => Ok(sink),
    }
}
