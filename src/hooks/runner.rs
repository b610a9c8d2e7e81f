//! Hook 统一执行器

use std::path::Path;
use tracing::warn;

use super::{run_gate_from_stdin, run_gate_hook};
use crate::config::GateConfig;
use crate::policy::Verdict;

/// 默认 hook 名
pub const DEFAULT_HOOK: &str = "test_first_gate";

fn is_gate_hook(hook_name: &str) -> bool {
    matches!(hook_name, "test_first_gate" | "test_first_enforcement" | "pre_write_check")
}

/// 运行指定的 hook
///
/// 这是所有 hook 的统一入口点，未知 hook 一律放行
pub fn run_hook(hook_name: &str, project_root: &Path, input: &str) -> Verdict {
    if !is_gate_hook(hook_name) {
        warn!("unknown hook: {}; allowing", hook_name);
        return Verdict::Allow;
    }

    let (config, _) = GateConfig::load(project_root);
    run_gate_hook(project_root, config, input)
}

/// 运行 hook（从 stdin 读取输入）
///
/// 这是命令行调用的入口
pub fn run_hook_from_stdin(hook_name: &str, project_root: &Path) -> Verdict {
    if !is_gate_hook(hook_name) {
        warn!("unknown hook: {}; allowing", hook_name);
        return Verdict::Allow;
    }

    let (config, _) = GateConfig::load(project_root);
    run_gate_from_stdin(project_root, config)
}
