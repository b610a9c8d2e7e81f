// Test-First Gate - Library Root
//
// Claude Code PreToolUse hook：没有测试时拒绝修改受保护源码

pub mod config;
pub mod error;
pub mod hooks;
pub mod logging;
pub mod policy;
pub mod project;
pub mod state;
pub mod utils;

// 重新导出常用类型
pub use config::GateConfig;
pub use error::{GateError, GateResult};
pub use policy::{FileCategory, PathClassifier, PolicyEngine, Verdict};
pub use project::resolve_project_root;
pub use state::{Phase, WorkflowState, WorkflowStateStore};
