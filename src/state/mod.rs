//! 工作流状态模块
//!
//! 读取 orchestrator 维护的阶段状态

pub mod models;
pub mod store;

// 重导出
pub use models::*;
pub use store::*;
