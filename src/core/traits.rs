// 並列マップのトレイト定義
// カーネル、設定、進捗報告、出力先の抽象化インターフェース

use super::error::ProcessingResult;
use async_trait::async_trait;
use mockall::automock;

/// 1つの作業単位に適用される純粋関数
///
/// 実装は副作用を持たず、引数以外の可変状態を参照してはならない。
/// ワーカー間で`Arc`共有されるため`Send + Sync`が必要。
pub trait Kernel<T>: Send + Sync + 'static {
    type Output: Send + 'static;

    fn apply(&self, payload: T) -> Self::Output;
}

// クロージャもそのままカーネルとして使える
impl<T, R, F> Kernel<T> for F
where
    F: Fn(T) -> R + Send + Sync + 'static,
    R: Send + 'static,
{
    type Output = R;

    fn apply(&self, payload: T) -> R {
        self(payload)
    }
}

/// 並列処理の設定を抽象化するトレイト
#[automock]
pub trait ProcessingConfig: Send + Sync {
    /// 最大ワーカー数を取得
    fn max_concurrent_tasks(&self) -> usize;

    /// チャンネルバッファサイズを取得
    fn channel_buffer_size(&self) -> usize;

    /// 静的チャンク分割時のチャンクサイズを取得
    fn chunk_size(&self) -> usize;

    /// この件数未満なら逐次実行にフォールバックする
    fn sequential_threshold(&self) -> usize;

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;
}

/// 進捗報告の抽象化トレイト
#[automock]
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// 処理開始時の報告
    async fn report_started(&self, total_items: usize);

    /// 進捗更新の報告（順序通りに出力された件数）
    async fn report_progress(&self, emitted: usize, total: usize);

    /// 処理完了時の報告
    async fn report_completed(&self, total_items: usize, elapsed_ms: u64);
}

// ProgressReporter for Box<dyn ProgressReporter>
#[async_trait]
impl ProgressReporter for Box<dyn ProgressReporter> {
    async fn report_started(&self, total_items: usize) {
        self.as_ref().report_started(total_items).await
    }

    async fn report_progress(&self, emitted: usize, total: usize) {
        self.as_ref().report_progress(emitted, total).await
    }

    async fn report_completed(&self, total_items: usize, elapsed_ms: u64) {
        self.as_ref().report_completed(total_items, elapsed_ms).await
    }
}

/// 元の順序に並べ直された結果の受け取り先
///
/// `emit`は必ずインデックス昇順で、各インデックスにつき1回だけ呼ばれる。
pub trait OrderedSink<R>: Send + 'static {
    fn emit(&mut self, index: usize, value: R) -> ProcessingResult<()>;

    /// 全件出力後に1回だけ呼ばれる
    fn finish(&mut self) -> ProcessingResult<()> {
        Ok(())
    }
}
