//! Git 查询工具
//!
//! 只读查询，git 不可用或不在仓库中时返回 None

use std::path::{Path, PathBuf};
use std::process::Command;

/// `git rev-parse <flag>`，输出为空或命令失败时为 None
fn rev_parse_path(flag: &str, cwd: Option<&Path>) -> Option<PathBuf> {
    let mut cmd = Command::new("git");
    cmd.args(["rev-parse", flag]);

    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().ok()?;
    if !output.status.success() {
        return None;
    }

    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!path.is_empty()).then(|| PathBuf::from(path))
}

/// git 仓库根目录，不在仓库中时为 None
pub fn git_toplevel(cwd: Option<&Path>) -> Option<PathBuf> {
    rev_parse_path("--show-toplevel", cwd)
}

/// submodule 的父项目根目录
pub fn git_superproject(cwd: Option<&Path>) -> Option<PathBuf> {
    rev_parse_path("--show-superproject-working-tree", cwd)
}
