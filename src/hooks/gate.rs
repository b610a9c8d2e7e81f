//! Test-First Gate Hook
//!
//! PreToolUse 时检查 Write / Edit：受保护源码在没有测试时拒绝修改
//!
//! 退出码：0 放行，2 拒绝（stderr 内容展示给 Claude）

use serde::Deserialize;
use std::io::{self, Read};
use std::path::Path;
use tracing::warn;

use crate::config::GateConfig;
use crate::error::{GateError, GateResult};
use crate::policy::{PolicyEngine, TestExistencePredicate, Verdict};
use crate::state::WorkflowStateStore;

/// hook 输入，多余字段忽略
#[derive(Debug, Deserialize)]
struct HookPayload {
    tool_name: Option<String>,
    #[serde(default)]
    tool_input: ToolInput,
}

#[derive(Debug, Default, Deserialize)]
struct ToolInput {
    file_path: Option<String>,
}

/// 一次调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tool_name: String,
    /// 缺失时为空字符串
    pub file_path: String,
}

/// 解析 hook 输入
pub fn parse_invocation(input: &str) -> GateResult<Invocation> {
    let payload: HookPayload = serde_json::from_str(input)?;

    let tool_name = payload.tool_name.ok_or(GateError::MissingToolName)?;

    Ok(Invocation {
        tool_name,
        file_path: payload.tool_input.file_path.unwrap_or_default(),
    })
}

/// 对原始输入做出判定
///
/// 输入无法解析时放行
pub fn evaluate<S, P>(engine: &PolicyEngine<S, P>, input: &str) -> Verdict
where
    S: WorkflowStateStore,
    P: TestExistencePredicate,
{
    match parse_invocation(input) {
        Ok(invocation) => engine.decide(&invocation.tool_name, &invocation.file_path),
        Err(e) => {
            warn!("{}; allowing", e);
            Verdict::Allow
        }
    }
}

/// 运行 gate hook
pub fn run_gate_hook(project_root: &Path, config: GateConfig, input: &str) -> Verdict {
    let engine = PolicyEngine::for_project(project_root, config);
    evaluate(&engine, input)
}

/// 从 stdin 读取输入并运行 gate
///
/// stdin 读取失败同样放行
pub fn run_gate_from_stdin(project_root: &Path, config: GateConfig) -> Verdict {
    let mut stdin_data = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut stdin_data) {
        warn!("failed to read hook input: {}; allowing", e);
        return Verdict::Allow;
    }

    run_gate_hook(project_root, config, &stdin_data)
}

/// 输出判定并返回退出码
pub fn emit_verdict(verdict: &Verdict) -> i32 {
    if let Verdict::Block(message) = verdict {
        eprintln!("{}", message);
    }
    verdict.exit_code()
}
