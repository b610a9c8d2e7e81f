//! 工作流状态读取
//!
//! gate 只读不写；状态文件缺失或损坏都视为“工作流尚未开始”

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::models::WorkflowState;
use crate::error::{GateError, GateResult};

/// 工作流状态来源
pub trait WorkflowStateStore {
    /// 读取当前状态，永不失败
    fn load(&self) -> WorkflowState;
}

/// 读取状态文件
///
/// 文件不存在返回 `Ok(None)`，读取或解析失败返回错误
pub fn read_workflow_state(path: &Path) -> GateResult<Option<WorkflowState>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(GateError::StateRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| GateError::StateParse {
            path: path.to_path_buf(),
            source,
        })
}

/// 基于 JSON 文件的状态存储
#[derive(Debug, Clone)]
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WorkflowStateStore for JsonStateStore {
    fn load(&self) -> WorkflowState {
        match read_workflow_state(&self.path) {
            Ok(Some(state)) => state,
            Ok(None) => {
                debug!(path = %self.path.display(), "no workflow state, assuming idle");
                WorkflowState::default()
            }
            Err(e) => {
                warn!("{}; assuming idle", e);
                WorkflowState::default()
            }
        }
    }
}
