// 静的チャンク分割 - 連続した範囲をまとめて1作業単位として配信

use crate::core::Kernel;
use std::marker::PhantomData;
use std::sync::Arc;

/// ワーカー1つあたりのチャンク数
pub const CHUNKS_PER_WORKER: usize = 4;

/// 件数とワーカー数から均等分割のチャンクサイズを求める
///
/// `ceil(total / (CHUNKS_PER_WORKER * workers))`、最小1。
pub fn balanced_chunk_size(total: usize, workers: usize) -> usize {
    total.div_ceil(CHUNKS_PER_WORKER * workers.max(1)).max(1)
}

/// インデックス範囲を固定サイズの連続チャンクに分割
///
/// 最後のチャンクだけが短くなりうる。`chunk_size`は1以上であること。
pub fn split_into_chunks<T>(items: Vec<T>, chunk_size: usize) -> Vec<Vec<T>> {
    let chunk_size = chunk_size.max(1);
    let mut chunks = Vec::with_capacity(items.len().div_ceil(chunk_size));
    let mut current = Vec::with_capacity(chunk_size.min(items.len()));

    for item in items {
        current.push(item);
        if current.len() == chunk_size {
            chunks.push(std::mem::replace(&mut current, Vec::with_capacity(chunk_size)));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// チャンク内の要素を順に処理し、チャンク単位の結果リストを返すカーネル
pub struct ChunkKernel<K, T> {
    inner: Arc<K>,
    _payload: PhantomData<fn(T)>,
}

impl<K, T> ChunkKernel<K, T> {
    pub fn new(inner: Arc<K>) -> Self {
        Self {
            inner,
            _payload: PhantomData,
        }
    }
}

impl<K, T> Kernel<Vec<T>> for ChunkKernel<K, T>
where
    K: Kernel<T>,
    T: 'static,
{
    type Output = Vec<K::Output>;

    fn apply(&self, chunk: Vec<T>) -> Self::Output {
        chunk
            .into_iter()
            .map(|payload| self.inner.apply(payload))
            .collect()
    }
}
