//! 文件路径分类
//!
//! 按固定优先级匹配，第一个命中的类别生效：
//! Documentation > TestFile > ProtectedSource > Unrestricted

use std::fmt;

use crate::config::GateConfig;

/// 文件类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    /// 文档，任何阶段都可编辑
    Documentation,
    /// 测试文件，任何阶段都可编辑
    TestFile,
    /// 受保护源码，需要先有测试
    ProtectedSource,
    Unrestricted,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Documentation => "documentation",
            FileCategory::TestFile => "test",
            FileCategory::ProtectedSource => "protected-source",
            FileCategory::Unrestricted => "unrestricted",
        }
    }

    /// 该类别是否总是放行
    pub fn is_always_editable(&self) -> bool {
        matches!(self, FileCategory::Documentation | FileCategory::TestFile)
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 路径分类器
///
/// 所有匹配都在小写化后的路径上进行
#[derive(Debug, Clone)]
pub struct PathClassifier {
    doc_extensions: Vec<String>,
    doc_segments: Vec<String>,
    test_markers: Vec<String>,
    test_suffixes: Vec<String>,
    source_extension: String,
    source_root: String,
    module_root: String,
}

impl PathClassifier {
    pub fn new(config: &GateConfig) -> Self {
        Self {
            doc_extensions: config.doc_extensions.iter().map(|e| dotted(e)).collect(),
            doc_segments: config.doc_segments.iter().map(|s| segment(s)).collect(),
            test_markers: lowercase_all(&config.test_markers),
            test_suffixes: lowercase_all(&config.test_suffixes),
            source_extension: dotted(&config.source_extension),
            source_root: segment(&config.source_root),
            module_root: segment(&config.module_root),
        }
    }

    pub fn classify(&self, path: &str) -> FileCategory {
        let path = normalize(path);

        if self.is_documentation(&path) {
            FileCategory::Documentation
        } else if self.is_test(&path) {
            FileCategory::TestFile
        } else if self.is_protected_source(&path) {
            FileCategory::ProtectedSource
        } else {
            FileCategory::Unrestricted
        }
    }

    fn is_documentation(&self, path: &str) -> bool {
        self.doc_extensions.iter().any(|ext| path.ends_with(ext.as_str()))
            || self.doc_segments.iter().any(|seg| path.contains(seg.as_str()))
    }

    fn is_test(&self, path: &str) -> bool {
        self.test_markers.iter().any(|m| path.contains(m.as_str()))
            || self.test_suffixes.iter().any(|s| path.ends_with(s.as_str()))
    }

    // 只由 classify 在排除文档和测试之后调用
    fn is_protected_source(&self, path: &str) -> bool {
        path.ends_with(self.source_extension.as_str())
            && path.contains(self.source_root.as_str())
            && path.contains(self.module_root.as_str())
    }
}

fn normalize(path: &str) -> String {
    path.replace('\\', "/").to_lowercase()
}

fn lowercase_all(items: &[String]) -> Vec<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}

fn dotted(ext: &str) -> String {
    format!(".{}", ext.trim_start_matches('.').to_lowercase())
}

fn segment(name: &str) -> String {
    format!("/{}/", name.trim_matches('/').to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> PathClassifier {
        PathClassifier::new(&GateConfig::default())
    }

    #[test]
    fn test_documentation_paths() {
        let c = classifier();
        assert_eq!(c.classify("/repo/README.md"), FileCategory::Documentation);
        assert_eq!(c.classify("/repo/CHANGELOG.MD"), FileCategory::Documentation);
        assert_eq!(c.classify("/repo/docs/diagram.png"), FileCategory::Documentation);
        assert_eq!(
            c.classify("/repo/.claude/hooks/gate.py"),
            FileCategory::Documentation
        );
        assert_eq!(
            c.classify("/repo/.agent-os/product/roadmap.yml"),
            FileCategory::Documentation
        );
        assert_eq!(
            c.classify("/repo/OpenSpec/changes/fix.yaml"),
            FileCategory::Documentation
        );
    }

    #[test]
    fn test_documentation_beats_test() {
        let c = classifier();
        assert_eq!(
            c.classify("/repo/ios/HomeAssistentFahrtenbuchTests/NOTES.md"),
            FileCategory::Documentation
        );
    }

    #[test]
    fn test_test_paths() {
        let c = classifier();
        assert_eq!(
            c.classify("/repo/ios/HomeAssistentFahrtenbuchTests/TripTests.swift"),
            FileCategory::TestFile
        );
        assert_eq!(
            c.classify("/repo/ios/HomeAssistentFahrtenbuch/Specs/Trip.swift"),
            FileCategory::TestFile
        );
        assert_eq!(c.classify("/tmp/LATEST.json"), FileCategory::TestFile);
    }

    #[test]
    fn test_protected_source_needs_both_roots() {
        let c = classifier();
        assert_eq!(
            c.classify("/repo/ios/HomeAssistentFahrtenbuch/Models/Trip.swift"),
            FileCategory::ProtectedSource
        );
        assert_eq!(
            c.classify("/Repo/IOS/homeassistentfahrtenbuch/Models/Trip.SWIFT"),
            FileCategory::ProtectedSource
        );
        assert_eq!(
            c.classify("/repo/ios/FahrtenbuchWidget/FahrtenbuchWidget.swift"),
            FileCategory::Unrestricted
        );
        assert_eq!(
            c.classify("/repo/HomeAssistentFahrtenbuch/Models/Trip.swift"),
            FileCategory::Unrestricted
        );
    }

    #[test]
    fn test_non_source_files_are_unrestricted() {
        let c = classifier();
        assert_eq!(
            c.classify("/repo/ios/HomeAssistentFahrtenbuch/Info.plist"),
            FileCategory::Unrestricted
        );
        assert_eq!(c.classify("/repo/prototype/ha_api.py"), FileCategory::Unrestricted);
        assert_eq!(c.classify(""), FileCategory::Unrestricted);
    }

    #[test]
    fn test_always_editable_categories() {
        assert!(FileCategory::Documentation.is_always_editable());
        assert!(FileCategory::TestFile.is_always_editable());
        assert!(!FileCategory::ProtectedSource.is_always_editable());
        assert!(!FileCategory::Unrestricted.is_always_editable());
    }

    #[test]
    fn test_windows_separators() {
        let c = classifier();
        assert_eq!(
            c.classify(r"C:\repo\ios\HomeAssistentFahrtenbuch\App.swift"),
            FileCategory::ProtectedSource
        );
    }

    #[test]
    fn test_custom_roots() {
        let config = GateConfig {
            module_root: "App".to_string(),
            ..GateConfig::default()
        };
        let c = PathClassifier::new(&config);
        assert_eq!(
            c.classify("/repo/ios/App/Engine.swift"),
            FileCategory::ProtectedSource
        );
    }
}
