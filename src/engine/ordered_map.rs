// OrderedParallelMap - 設定と進捗報告を注入した順序保証付き並列マップ
// 全ての依存関係がコンストラクタで注入される

use super::{
    chunked::{balanced_chunk_size, split_into_chunks, ChunkKernel},
    pipeline::OrderedPipeline,
    sink::VecSink,
};
use crate::core::{
    Kernel, OrderedSink, ProcessingConfig, ProcessingResult, ProcessingSummary, ProgressReporter,
};
use std::sync::Arc;

/// 順序保証付き並列マップ
///
/// `[f(item_0), f(item_1), ..., f(item_{N-1})]`を、ワーカー数や完了順に
/// 関係なく常に同じ順序で生成する。
///
/// - [`map`](Self::map) / [`map_into`](Self::map_into): 1要素ずつ動的に配信
/// - [`map_chunked`](Self::map_chunked): 連続チャンク単位で配信し、チャンク順に連結
/// - [`map_balanced`](Self::map_balanced): チャンクサイズを件数とワーカー数から決める
pub struct OrderedParallelMap<C, P> {
    config: Arc<C>,
    reporter: Arc<P>,
}

impl<C, P> OrderedParallelMap<C, P>
where
    C: ProcessingConfig,
    P: ProgressReporter + 'static,
{
    /// 新しい並列マップを作成
    pub fn new(config: C, reporter: P) -> Self {
        Self {
            config: Arc::new(config),
            reporter: Arc::new(reporter),
        }
    }

    /// 結果をVecに集めて返す
    pub async fn map<T, K>(&self, items: Vec<T>, kernel: K) -> ProcessingResult<Vec<K::Output>>
    where
        T: Send + 'static,
        K: Kernel<T>,
    {
        self.map_arc(items, Arc::new(kernel)).await
    }

    /// 共有済みのカーネルで`map`する
    pub async fn map_arc<T, K>(
        &self,
        items: Vec<T>,
        kernel: Arc<K>,
    ) -> ProcessingResult<Vec<K::Output>>
    where
        T: Send + 'static,
        K: Kernel<T>,
    {
        let capacity = items.len();
        let (_summary, sink) = self
            .execute(items, kernel, VecSink::with_capacity(capacity))
            .await?;
        Ok(sink.into_inner())
    }

    /// 結果を順にSinkへ流す
    pub async fn map_into<T, K, S>(
        &self,
        items: Vec<T>,
        kernel: K,
        sink: S,
    ) -> ProcessingResult<(ProcessingSummary, S)>
    where
        T: Send + 'static,
        K: Kernel<T>,
        S: OrderedSink<K::Output>,
    {
        self.execute(items, Arc::new(kernel), sink).await
    }

    /// 静的チャンク分割で処理し、チャンク結果を投入順に連結
    ///
    /// チャンクサイズは設定の`chunk_size`。
    pub async fn map_chunked<T, K>(
        &self,
        items: Vec<T>,
        kernel: Arc<K>,
    ) -> ProcessingResult<Vec<K::Output>>
    where
        T: Send + 'static,
        K: Kernel<T>,
    {
        self.map_chunks_of(items, kernel, self.config.chunk_size()).await
    }

    /// ワーカー1つあたり約4チャンクになるように分割して処理
    pub async fn map_balanced<T, K>(
        &self,
        items: Vec<T>,
        kernel: Arc<K>,
    ) -> ProcessingResult<Vec<K::Output>>
    where
        T: Send + 'static,
        K: Kernel<T>,
    {
        let chunk_size = balanced_chunk_size(items.len(), self.worker_count());
        self.map_chunks_of(items, kernel, chunk_size).await
    }

    /// `chunk_size`件ずつのチャンクで処理し、チャンク結果を投入順に連結
    pub async fn map_chunks_of<T, K>(
        &self,
        items: Vec<T>,
        kernel: Arc<K>,
        chunk_size: usize,
    ) -> ProcessingResult<Vec<K::Output>>
    where
        T: Send + 'static,
        K: Kernel<T>,
    {
        let total = items.len();
        let chunks = split_into_chunks(items, chunk_size);
        log::debug!(
            "dispatching {total} items as {} chunks of {chunk_size}",
            chunks.len()
        );
        let chunk_results = self.map(chunks, ChunkKernel::new(kernel)).await?;

        let mut results = Vec::with_capacity(total);
        for chunk in chunk_results {
            results.extend(chunk);
        }
        Ok(results)
    }

    async fn execute<T, K, S>(
        &self,
        items: Vec<T>,
        kernel: Arc<K>,
        sink: S,
    ) -> ProcessingResult<(ProcessingSummary, S)>
    where
        T: Send + 'static,
        K: Kernel<T>,
        S: OrderedSink<K::Output>,
    {
        OrderedPipeline::new(kernel)
            .execute(items, self.config.as_ref(), Arc::clone(&self.reporter), sink)
            .await
    }

    /// 実際に使われるワーカー数
    pub fn worker_count(&self) -> usize {
        self.config.max_concurrent_tasks().max(1)
    }
}
