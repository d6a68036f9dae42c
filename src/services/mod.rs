// サービス層 - 設定と進捗監視の具象実装
// 各サービスは特定の責任を持ち、エンジンからはトレイト経由で利用される

pub mod config;
pub mod monitoring;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::{validate_config, DefaultProcessingConfig, DEFAULT_CHUNK_SIZE};
pub use monitoring::{ConsoleProgressReporter, NoOpProgressReporter};
