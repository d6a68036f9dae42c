// 並列マップで受け渡されるデータ型定義

/// ワーカーへ配信される作業単位
///
/// `index`は元の並び順での位置。配信後は変更されない。
#[derive(Debug, Clone, PartialEq)]
pub struct WorkItem<T> {
    pub index: usize,
    pub payload: T,
}

impl<T> WorkItem<T> {
    pub fn new(index: usize, payload: T) -> Self {
        Self { index, payload }
    }
}

/// 元の位置でタグ付けされたカーネル出力
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedResult<R> {
    pub index: usize,
    pub value: R,
}

impl<R> IndexedResult<R> {
    pub fn new(index: usize, value: R) -> Self {
        Self { index, value }
    }
}

/// 処理全体のサマリー
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingSummary {
    pub total_items: usize,
    pub emitted_items: usize,
    pub worker_count: usize,
    pub sequential: bool,
    pub total_processing_time_ms: u64,
}

impl ProcessingSummary {
    /// 1アイテムあたりの平均処理時間
    pub fn average_time_per_item_ms(&self) -> f64 {
        if self.total_items > 0 {
            self.total_processing_time_ms as f64 / self.total_items as f64
        } else {
            0.0
        }
    }
}
