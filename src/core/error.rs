// Custom error types for the ordered parallel map
// 並列マップ専用のカスタムエラー型定義

use thiserror::Error;

/// 並列処理固有のエラー型
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("設定エラー: {message}")]
    ConfigurationError { message: String },

    #[error("順序違反エラー: index {index} - {reason}")]
    OrderViolationError { index: usize, reason: String },

    #[error("結果欠落エラー: {received}/{expected} 件のみ受信")]
    IncompleteResultsError { expected: usize, received: usize },

    #[error("チャンネルエラー: {message}")]
    ChannelError { message: String },

    #[error("タスクエラー: {source}")]
    TaskError {
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("入出力エラー: {source}")]
    IoError {
        #[source]
        source: std::io::Error,
    },
}

impl ProcessingError {
    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// 順序違反エラーの作成
    pub fn order_violation(index: usize, reason: impl Into<String>) -> Self {
        Self::OrderViolationError {
            index,
            reason: reason.into(),
        }
    }

    /// 結果欠落エラーの作成
    pub fn incomplete_results(expected: usize, received: usize) -> Self {
        Self::IncompleteResultsError { expected, received }
    }

    /// チャンネルエラーの作成
    pub fn channel(message: impl Into<String>) -> Self {
        Self::ChannelError {
            message: message.into(),
        }
    }

    /// タスクエラーの作成
    pub fn task(source: tokio::task::JoinError) -> Self {
        Self::TaskError { source }
    }

    /// 入出力エラーの作成
    pub fn io(source: std::io::Error) -> Self {
        Self::IoError { source }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConfigurationError { .. } => ErrorSeverity::High,
            Self::OrderViolationError { .. } | Self::IncompleteResultsError { .. } => {
                ErrorSeverity::Critical
            }
            Self::ChannelError { .. } | Self::TaskError { .. } => ErrorSeverity::High,
            Self::IoError { .. } => ErrorSeverity::Medium,
        }
    }

    /// エラーが回復可能かどうかを判定
    ///
    /// カーネルは決定的なので、再実行しても結果は変わらない。
    /// 設定を直せば通るものだけを回復可能とみなす。
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ConfigurationError { .. })
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 低重要度 - ログ出力程度
    Low,
    /// 中重要度 - 警告レベル
    Medium,
    /// 高重要度 - 要対応
    High,
    /// 致命的 - 出力の正しさが保証できない
    Critical,
}

impl ErrorSeverity {
    /// 重要度の文字列表現を取得
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// 並列処理の結果型
pub type ProcessingResult<T> = std::result::Result<T, ProcessingError>;

// From実装を個別に追加
impl From<tokio::task::JoinError> for ProcessingError {
    fn from(error: tokio::task::JoinError) -> Self {
        ProcessingError::TaskError { source: error }
    }
}

impl From<std::io::Error> for ProcessingError {
    fn from(error: std::io::Error) -> Self {
        ProcessingError::IoError { source: error }
    }
}
