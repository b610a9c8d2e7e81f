//! 工作流状态数据模型
//!
//! 对应 `.claude/workflow_state.json`，由外部 orchestrator 写入

use serde::{Deserialize, Serialize};
use std::fmt;

/// 工作流阶段
///
/// 已知阶段按 `idle → spec_approved → implemented → validated` 推进，
/// orchestrator 自定义的其他阶段保存在 `Other` 中
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Phase {
    #[default]
    Idle,
    SpecApproved,
    Implemented,
    Validated,
    Other(String),
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Idle => "idle",
            Phase::SpecApproved => "spec_approved",
            Phase::Implemented => "implemented",
            Phase::Validated => "validated",
            Phase::Other(name) => name,
        }
    }

    /// 显示图标
    pub fn icon(&self) -> &'static str {
        match self {
            Phase::Idle => "⏸️",
            Phase::SpecApproved => "📝",
            Phase::Implemented => "💻",
            Phase::Validated => "✅",
            Phase::Other(_) => "❔",
        }
    }
}

impl From<String> for Phase {
    fn from(s: String) -> Self {
        match s.as_str() {
            "idle" => Phase::Idle,
            "spec_approved" => Phase::SpecApproved,
            "implemented" => Phase::Implemented,
            "validated" => Phase::Validated,
            _ => Phase::Other(s),
        }
    }
}

impl From<&str> for Phase {
    fn from(s: &str) -> Self {
        Phase::from(s.to_string())
    }
}

impl From<Phase> for String {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 工作流状态
///
/// 缺少的字段取默认值：`current_phase = idle`，`test_written = false`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkflowState {
    #[serde(default)]
    pub current_phase: Phase,

    #[serde(default)]
    pub test_written: bool,
}
