//! Gate 配置
//!
//! 从 `.claude/test_gate.toml` 读取，所有字段可选，缺省值即默认的 iOS 项目布局

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{GateError, GateResult};

/// 配置文件（相对项目根目录）
pub const CONFIG_FILE: &str = ".claude/test_gate.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// 受 gate 约束的工具名（精确匹配）
    pub mutating_tools: Vec<String>,

    /// 受保护语言的扩展名（不含点）
    pub source_extension: String,

    /// 测试文件名后缀
    pub test_suffixes: Vec<String>,

    /// 路径中出现即视为测试文件的子串
    pub test_markers: Vec<String>,

    pub doc_extensions: Vec<String>,

    /// 文档 / agent 工具 / openspec 根目录段
    pub doc_segments: Vec<String>,

    /// 受保护源码必须同时位于这两个目录段之下
    pub source_root: String,
    pub module_root: String,

    /// 测试目录（相对项目根目录）
    pub test_dir: PathBuf,

    /// 工作流状态文件（相对项目根目录）
    pub state_file: PathBuf,

    /// 视为“测试已写”的阶段
    pub satisfied_phases: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            mutating_tools: strings(&["Write", "Edit"]),
            source_extension: "swift".to_string(),
            test_suffixes: strings(&["tests.swift", "test.swift"]),
            test_markers: strings(&["test", "tests", "spec"]),
            doc_extensions: strings(&["md"]),
            doc_segments: strings(&["docs", ".agent-os", ".claude", "openspec"]),
            source_root: "ios".to_string(),
            module_root: "HomeAssistentFahrtenbuch".to_string(),
            test_dir: PathBuf::from("ios/HomeAssistentFahrtenbuchTests"),
            state_file: PathBuf::from(".claude/workflow_state.json"),
            satisfied_phases: strings(&["implemented", "validated", "spec_approved"]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// 配置来源，`status` 命令展示用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    File(PathBuf),
    /// 配置文件存在但无法使用，已退回默认值
    Fallback(PathBuf),
}

impl GateConfig {
    /// 读取配置文件，不存在时返回 `Ok(None)`
    pub fn read(project_root: &Path) -> GateResult<Option<Self>> {
        let path = project_root.join(CONFIG_FILE);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(GateError::Config {
                    path,
                    message: e.to_string(),
                })
            }
        };

        toml::from_str(&content)
            .map(Some)
            .map_err(|e| GateError::Config {
                path,
                message: e.to_string(),
            })
    }

    /// 加载配置，任何错误都退回默认值
    pub fn load(project_root: &Path) -> (Self, ConfigSource) {
        match Self::read(project_root) {
            Ok(Some(config)) => {
                debug!(path = %project_root.join(CONFIG_FILE).display(), "loaded gate config");
                (config, ConfigSource::File(project_root.join(CONFIG_FILE)))
            }
            Ok(None) => (Self::default(), ConfigSource::Defaults),
            Err(e) => {
                warn!("{}; using default gate config", e);
                (Self::default(), ConfigSource::Fallback(project_root.join(CONFIG_FILE)))
            }
        }
    }

    pub fn is_mutating_tool(&self, tool_name: &str) -> bool {
        self.mutating_tools.iter().any(|t| t == tool_name)
    }

    pub fn is_satisfied_phase(&self, phase: &str) -> bool {
        self.satisfied_phases.iter().any(|p| p == phase)
    }
}
