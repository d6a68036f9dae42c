// 設定管理機能
// ワーカー数、チャンネルバッファ、チャンクサイズ、逐次フォールバック閾値

pub mod implementations;

// 公開API
pub use implementations::{validate_config, DefaultProcessingConfig, DEFAULT_CHUNK_SIZE};
