// 進捗監視の具象実装
// 標準出力はベンチマーク出力専用なので、報告はすべてlogファサード経由（標準エラー）

use crate::core::ProgressReporter;
use async_trait::async_trait;

/// logクレート経由で進捗を報告する実装
#[derive(Debug, Clone)]
pub struct ConsoleProgressReporter {
    label: String,
    report_every: usize,
}

impl Default for ConsoleProgressReporter {
    fn default() -> Self {
        Self {
            label: "ordered-map".to_string(),
            report_every: 100,
        }
    }
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// ログに付けるベンチマーク名
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_report_every(mut self, every: usize) -> Self {
        self.report_every = every.max(1);
        self
    }

    fn should_report(&self, emitted: usize, total: usize) -> bool {
        emitted % self.report_every == 0 || emitted == total
    }
}

#[async_trait]
impl ProgressReporter for ConsoleProgressReporter {
    async fn report_started(&self, total_items: usize) {
        log::info!("[{}] starting {total_items} work items", self.label);
    }

    async fn report_progress(&self, emitted: usize, total: usize) {
        if self.should_report(emitted, total) {
            let percentage = if total > 0 {
                (emitted as f64 / total as f64) * 100.0
            } else {
                100.0
            };
            log::debug!("[{}] emitted {emitted}/{total} ({percentage:.1}%)", self.label);
        }
    }

    async fn report_completed(&self, total_items: usize, elapsed_ms: u64) {
        log::info!(
            "[{}] completed {total_items} items in {elapsed_ms}ms",
            self.label
        );
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _total_items: usize) {
        // 何もしない
    }

    async fn report_progress(&self, _emitted: usize, _total: usize) {
        // 何もしない
    }

    async fn report_completed(&self, _total_items: usize, _elapsed_ms: u64) {
        // 何もしない
    }
}
