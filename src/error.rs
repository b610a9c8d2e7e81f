//! Gate 错误类型
//!
//! 所有错误最终都在 `hooks::gate` 中收敛为 Allow（fail-open）

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    /// stdin 不是合法 JSON
    #[error("malformed hook payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("hook payload has no tool_name")]
    MissingToolName,

    #[error("failed to read workflow state {path}: {source}")]
    StateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse workflow state {path}: {source}")]
    StateParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid gate config {path}: {message}")]
    Config { path: PathBuf, message: String },
}

pub type GateResult<T> = std::result::Result<T, GateError>;
