// Consumer - 並列ワーカー機能

use crate::core::{IndexedResult, Kernel, ProcessingError, ProcessingResult, WorkItem};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// 複数ワーカーで共有する作業キューの受信側
pub type SharedWorkReceiver<T> = Arc<Mutex<mpsc::Receiver<WorkItem<T>>>>;

/// 単一Consumerワーカー
///
/// カーネルはCPUバウンドなのでブロッキングプール上で実行する。
/// 戻り値は処理した件数。
pub fn spawn_single_consumer<T, K>(
    worker_id: usize,
    kernel: Arc<K>,
    work_rx: SharedWorkReceiver<T>,
    result_tx: mpsc::Sender<IndexedResult<K::Output>>,
) -> tokio::task::JoinHandle<ProcessingResult<usize>>
where
    T: Send + 'static,
    K: Kernel<T>,
{
    tokio::spawn(async move {
        log::trace!("worker {worker_id} started");
        let mut processed = 0;

        loop {
            // 次の作業を取得
            let item = {
                let mut rx = work_rx.lock().await;
                match rx.recv().await {
                    Some(item) => item,
                    None => break, // チャンネル終了
                }
            };

            let WorkItem { index, payload } = item;
            let kernel = Arc::clone(&kernel);
            // ワーカーのパニックはJoinErrorとして伝播し、実行全体を失敗させる
            let value = tokio::task::spawn_blocking(move || kernel.apply(payload)).await?;
            processed += 1;

            // 結果送信
            if (result_tx.send(IndexedResult::new(index, value)).await).is_err() {
                // Collectorが先に終了した
                return Err(ProcessingError::channel(format!(
                    "worker {worker_id}: result channel closed before index {index} was delivered"
                )));
            }
        }

        log::trace!("worker {worker_id} finished after {processed} items");
        Ok(processed)
    })
}

/// Consumers: 並列ワーカープール
pub fn spawn_consumers<T, K>(
    kernel: Arc<K>,
    work_rx: mpsc::Receiver<WorkItem<T>>,
    result_tx: mpsc::Sender<IndexedResult<K::Output>>,
    worker_count: usize,
) -> Vec<tokio::task::JoinHandle<ProcessingResult<usize>>>
where
    T: Send + 'static,
    K: Kernel<T>,
{
    let work_rx = Arc::new(Mutex::new(work_rx));
    let mut handles = Vec::with_capacity(worker_count);

    for worker_id in 0..worker_count {
        let handle = spawn_single_consumer(
            worker_id,
            Arc::clone(&kernel),
            Arc::clone(&work_rx),
            result_tx.clone(),
        );
        handles.push(handle);
    }

    handles
}
