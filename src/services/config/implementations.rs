// 設定管理の具象実装

use crate::core::{ProcessingConfig, ProcessingError, ProcessingResult};

/// 静的チャンク分割のデフォルトサイズ
pub const DEFAULT_CHUNK_SIZE: usize = 5000;

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultProcessingConfig {
    max_concurrent: usize,
    buffer_size: usize,
    chunk_size: usize,
    sequential_threshold: usize,
    enable_progress: bool,
}

impl DefaultProcessingConfig {
    pub fn new(cpu_count: usize) -> Self {
        let workers = cpu_count.max(1);
        Self {
            max_concurrent: workers,
            buffer_size: workers * 2,
            chunk_size: DEFAULT_CHUNK_SIZE,
            sequential_threshold: 2,
            enable_progress: true,
        }
    }

    /// 常に逐次実行する設定（比較・テスト用）
    pub fn sequential() -> Self {
        Self::new(1)
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_sequential_threshold(mut self, threshold: usize) -> Self {
        self.sequential_threshold = threshold;
        self
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress = enable;
        self
    }

    /// 設定値の検証
    pub fn validate(&self) -> ProcessingResult<()> {
        validate_config(self)
    }
}

impl Default for DefaultProcessingConfig {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

impl ProcessingConfig for DefaultProcessingConfig {
    fn max_concurrent_tasks(&self) -> usize {
        self.max_concurrent
    }

    fn channel_buffer_size(&self) -> usize {
        self.buffer_size
    }

    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn sequential_threshold(&self) -> usize {
        self.sequential_threshold
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}

/// 任意のProcessingConfig実装を検証
pub fn validate_config<C: ProcessingConfig + ?Sized>(config: &C) -> ProcessingResult<()> {
    if config.max_concurrent_tasks() == 0 {
        return Err(ProcessingError::configuration(
            "ワーカー数は1以上である必要があります",
        ));
    }

    if config.channel_buffer_size() == 0 {
        return Err(ProcessingError::configuration(
            "チャンネルバッファサイズは1以上である必要があります",
        ));
    }

    if config.chunk_size() == 0 {
        return Err(ProcessingError::configuration(
            "チャンクサイズは1以上である必要があります",
        ));
    }

    Ok(())
}
