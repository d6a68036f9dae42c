// 進捗監視機能
// 処理開始、順序通りの出力進捗、完了の通知

pub mod implementations;

// 公開API
pub use implementations::{ConsoleProgressReporter, NoOpProgressReporter};
