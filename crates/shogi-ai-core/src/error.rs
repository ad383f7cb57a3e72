//! エラー型

use crate::position::SfenError;

/// 外部盤面から局面を構築できなかった
#[derive(thiserror::Error, Debug)]
pub enum MalformedPosition {
    /// 盤面記述が想定する JSON の形をしていない
    #[error("Invalid board description: {0}")]
    Description(#[from] serde_json::Error),

    /// エンコード結果をルールエンジンが受け付けなかった
    #[error("Rejected encoded position '{sfen}': {source}")]
    Sfen {
        sfen: String,
        #[source]
        source: SfenError,
    },
}

/// 指し手推薦の失敗
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// 合法手がない（詰み・ステイルメイトを区別しない）
    #[error("No legal move found")]
    NoLegalMove,

    /// 初期局面へのフォールバックを無効にしているときの入力エラー
    #[error(transparent)]
    Malformed(#[from] MalformedPosition),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
