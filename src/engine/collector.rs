// Collector - 結果の並べ替えと順序通りの出力

use super::order_buffer::OrderBuffer;
use crate::core::{IndexedResult, OrderedSink, ProcessingError, ProcessingResult, ProgressReporter};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Collector: OrderBufferを単独で所有し、先頭から順にSinkへ流す
///
/// 全ワーカーの送信側がドロップされた時点で終了する。
/// `total`件すべてが出力されていなければ`IncompleteResultsError`。
pub fn spawn_ordered_collector<R, S, P>(
    mut result_rx: mpsc::Receiver<IndexedResult<R>>,
    total: usize,
    mut sink: S,
    reporter: Arc<P>,
    report_progress: bool,
) -> tokio::task::JoinHandle<ProcessingResult<S>>
where
    R: Send + 'static,
    S: OrderedSink<R>,
    P: ProgressReporter + 'static,
{
    tokio::spawn(async move {
        let mut buffer = OrderBuffer::new(total);
        let mut received = 0;

        while let Some(result) = result_rx.recv().await {
            received += 1;
            buffer.insert(result.index, result.value)?;

            let before = buffer.cursor();
            for (index, value) in buffer.drain_ready() {
                sink.emit(index, value)?;
            }

            // 進捗報告
            if report_progress && buffer.cursor() > before {
                reporter.report_progress(buffer.cursor(), total).await;
            }
        }

        if !buffer.is_complete() {
            return Err(ProcessingError::incomplete_results(total, received));
        }

        sink.finish()?;
        log::debug!("collector emitted {total} results in order");
        Ok(sink)
    })
}
