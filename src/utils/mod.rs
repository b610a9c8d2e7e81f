//! 工具模块
//!
//! 提供 Git、JSON、文件系统等常用工具函数

pub mod fs;
pub mod git;
#[cfg(test)]
pub mod json;

// 重导出
pub use fs::*;
pub use git::*;
#[cfg(test)]
pub use json::*;
