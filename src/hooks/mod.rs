//! Hook 模块
//!
//! 实现 hooks：test_first_gate

pub mod gate;
pub mod runner;

// 重导出
pub use gate::*;
pub use runner::*;
