// 高レベル公開API
// OrderedParallelMapを簡単に作成するための便利な関数

use super::OrderedParallelMap;
use crate::services::{DefaultProcessingConfig, NoOpProgressReporter};

/// ワーカー数を指定した静音版の並列マップ
pub fn create_ordered_map_with_workers(
    workers: usize,
) -> OrderedParallelMap<DefaultProcessingConfig, NoOpProgressReporter> {
    OrderedParallelMap::new(
        DefaultProcessingConfig::new(workers).with_progress_reporting(false),
        NoOpProgressReporter::new(),
    )
}
