//! 文件系统工具

use std::path::Path;

/// 检查目录是否存在
pub fn dir_exists(path: &Path) -> bool {
    path.exists() && path.is_dir()
}

/// 写入文件，自动创建父目录（测试夹具用）
#[cfg(test)]
pub fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    use std::fs;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}
