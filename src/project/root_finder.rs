//! 项目根目录查找
//!
//! 支持多种场景：
//! - 命令行显式指定
//! - `CLAUDE_PROJECT_DIR`（Claude Code 调用 hook 时设置）
//! - Git superproject（submodule 的父项目）
//! - 当前目录 / Git 仓库根目录 / 向上遍历父目录

use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::utils::{dir_exists, git_superproject, git_toplevel};

/// Claude Code 传给 hook 的项目目录环境变量
pub const PROJECT_DIR_ENV: &str = "CLAUDE_PROJECT_DIR";

/// 向上遍历的最大层数
const MAX_ASCEND: usize = 10;

fn has_claude_dir(path: &Path) -> bool {
    dir_exists(&path.join(".claude"))
}

/// 从 `start` 开始查找包含 .claude 目录的项目根目录
///
/// 搜索顺序：
/// 1. Git superproject
/// 2. `start` 本身
/// 3. Git 仓库根目录
/// 4. 向上遍历父目录（最多 10 层）
pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
    if let Some(root) = git_superproject(Some(start)) {
        if has_claude_dir(&root) {
            return Some(root);
        }
    }

    if has_claude_dir(start) {
        return Some(start.to_path_buf());
    }

    if let Some(root) = git_toplevel(Some(start)) {
        if has_claude_dir(&root) {
            return Some(root);
        }
    }

    start
        .ancestors()
        .skip(1)
        .take(MAX_ASCEND)
        .find(|dir| has_claude_dir(dir))
        .map(Path::to_path_buf)
}

/// 解析项目根目录，总能得到一个路径
///
/// 显式参数 > 环境变量 > .claude 搜索 > 当前目录
pub fn resolve_project_root(explicit: Option<&Path>) -> PathBuf {
    let from_env = env::var_os(PROJECT_DIR_ENV).map(PathBuf::from);
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_with(explicit, from_env, &cwd)
}

fn resolve_with(explicit: Option<&Path>, from_env: Option<PathBuf>, cwd: &Path) -> PathBuf {
    if let Some(path) = explicit {
        debug!(root = %path.display(), "project root from command line");
        return path.to_path_buf();
    }

    if let Some(path) = from_env.filter(|p| dir_exists(p)) {
        debug!(root = %path.display(), "project root from {}", PROJECT_DIR_ENV);
        return path;
    }

    find_project_root_from(cwd).unwrap_or_else(|| cwd.to_path_buf())
}
