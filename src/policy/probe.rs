//! 测试存在性检查
//!
//! 只检查测试目录里是否有任意一个测试源文件，不判断它与本次修改是否相关

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// 项目中是否已有测试
pub trait TestExistencePredicate {
    fn any_test_exists(&self) -> bool;
}

/// 扫描测试目录（不递归）
#[derive(Debug, Clone)]
pub struct TestDirProbe {
    test_dir: PathBuf,
    extension: String,
}

impl TestDirProbe {
    pub fn new(test_dir: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            test_dir: test_dir.into(),
            extension: extension.trim_start_matches('.').to_lowercase(),
        }
    }

    pub fn test_dir(&self) -> &Path {
        &self.test_dir
    }

    /// 测试目录下的测试文件（不递归），跟随符号链接判断是否为文件
    ///
    /// 目录不存在时为空，无法读取的条目跳过
    fn test_files(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.test_dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.into_path()),
                Err(e) => {
                    debug!("skipping unreadable test entry: {}", e);
                    None
                }
            })
            .filter(|path| path.is_file() && self.matches_extension(path))
    }

    /// 统计测试文件数量，目录不存在时为 0
    pub fn count_tests(&self) -> usize {
        self.test_files().count()
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(&self.extension))
            .unwrap_or(false)
    }
}

impl TestExistencePredicate for TestDirProbe {
    /// 找到第一个测试文件即返回
    fn any_test_exists(&self) -> bool {
        let found = self.test_files().next();
        debug!(
            dir = %self.test_dir.display(),
            found = ?found,
            "scanned test directory"
        );
        found.is_some()
    }
}
