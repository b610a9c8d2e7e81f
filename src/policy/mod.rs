//! 测试优先策略
//!
//! 路径分类、测试存在性检查和最终判定

pub mod classifier;
pub mod engine;
pub mod probe;

// 重导出
pub use classifier::*;
pub use engine::*;
pub use probe::*;
