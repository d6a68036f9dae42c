// Producer - 作業単位の配信機能

use crate::core::{ProcessingError, ProcessingResult, WorkItem};
use tokio::sync::mpsc;

/// Producer: 元の順序でインデックス付きの作業単位を配信
pub fn spawn_producer<T>(
    items: Vec<T>,
    work_tx: mpsc::Sender<WorkItem<T>>,
) -> tokio::task::JoinHandle<ProcessingResult<usize>>
where
    T: Send + 'static,
{
    tokio::spawn(async move {
        let mut sent = 0;
        for (index, payload) in items.into_iter().enumerate() {
            if (work_tx.send(WorkItem::new(index, payload)).await).is_err() {
                // 全ワーカーが先に終了した
                log::debug!("producer stopped early after {sent} items");
                return Err(ProcessingError::channel(format!(
                    "work channel closed after {sent} items"
                )));
            }
            sent += 1;
        }
        // work_txをドロップしてチャンネル終了シグナル
        Ok(sent)
    })
}
