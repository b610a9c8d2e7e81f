//! 策略引擎
//!
//! 组合路径分类、工作流状态和测试存在性，对一次编辑给出 Allow / Block

use std::path::Path;
use tracing::debug;

use super::classifier::{FileCategory, PathClassifier};
use super::probe::{TestDirProbe, TestExistencePredicate};
use crate::config::GateConfig;
use crate::state::{JsonStateStore, WorkflowStateStore};

/// 判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    /// 附带给调用方看的诊断信息
    Block(String),
}

impl Verdict {
    pub fn is_allow(&self) -> bool {
        matches!(self, Verdict::Allow)
    }

    /// 对应的进程退出码
    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Allow => 0,
            Verdict::Block(_) => 2,
        }
    }
}

pub struct PolicyEngine<S, P> {
    config: GateConfig,
    classifier: PathClassifier,
    store: S,
    probe: P,
}

impl PolicyEngine<JsonStateStore, TestDirProbe> {
    /// 用项目根目录下的状态文件和测试目录构建引擎
    pub fn for_project(project_root: &Path, config: GateConfig) -> Self {
        let store = JsonStateStore::new(project_root.join(&config.state_file));
        let probe = TestDirProbe::new(project_root.join(&config.test_dir), &config.source_extension);
        Self::new(config, store, probe)
    }
}

impl<S, P> PolicyEngine<S, P>
where
    S: WorkflowStateStore,
    P: TestExistencePredicate,
{
    pub fn new(config: GateConfig, store: S, probe: P) -> Self {
        let classifier = PathClassifier::new(&config);
        Self {
            config,
            classifier,
            store,
            probe,
        }
    }

    pub fn classifier(&self) -> &PathClassifier {
        &self.classifier
    }

    pub fn decide(&self, tool_name: &str, file_path: &str) -> Verdict {
        if !self.config.is_mutating_tool(tool_name) {
            debug!(tool = tool_name, "not a mutating tool, allowing");
            return Verdict::Allow;
        }

        let category = self.classifier.classify(file_path);
        debug!(path = file_path, %category, "classified edit target");

        if category.is_always_editable() {
            return Verdict::Allow;
        }

        if category != FileCategory::ProtectedSource {
            return Verdict::Allow;
        }

        let state = self.store.load();
        if self.config.is_satisfied_phase(state.current_phase.as_str()) {
            debug!(phase = %state.current_phase, "phase already past test-first, allowing");
            return Verdict::Allow;
        }

        if self.probe.any_test_exists() {
            debug!(phase = %state.current_phase, "tests exist, allowing");
            return Verdict::Allow;
        }

        Verdict::Block(block_message(&self.config.test_dir))
    }
}

/// Block 时的诊断信息
pub fn block_message(test_dir: &Path) -> String {
    let test_dir = test_dir.display().to_string();
    let width = 66;
    let rule = "═".repeat(width);
    let line = |text: &str| format!("║  {:<w$}║\n", text, w = width - 2);

    let mut msg = String::new();
    msg.push_str(&format!("╔{}╗\n", rule));
    msg.push_str(&line("TEST-FIRST ENFORCEMENT: Blocked!"));
    msg.push_str(&format!("╠{}╣\n", rule));
    msg.push_str(&line(""));
    msg.push_str(&line("You are changing protected source code, but the project"));
    msg.push_str(&line("has no tests yet!"));
    msg.push_str(&line(""));
    msg.push_str(&line("WORKFLOW (Test-First):"));
    msg.push_str(&line("1. First: write a test that reproduces the bug"));
    msg.push_str(&line("2. The test must FAIL (bug is reproduced)"));
    msg.push_str(&line("3. Then: implement the fix"));
    msg.push_str(&line("4. The test must PASS (bug is fixed)"));
    msg.push_str(&line(""));
    msg.push_str(&line("ACTION REQUIRED:"));
    msg.push_str(&line(&format!("→ Create a test in {}/", test_dir)));
    msg.push_str(&line("→ Or say \"skip test\" if no test is possible"));
    msg.push_str(&line(""));
    msg.push_str(&format!("╚{}╝", rule));
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Phase, WorkflowState};
    use std::cell::Cell;

    struct FixedState(Phase);

    impl WorkflowStateStore for FixedState {
        fn load(&self) -> WorkflowState {
            WorkflowState {
                current_phase: self.0.clone(),
                test_written: false,
            }
        }
    }

    /// 记录调用次数，用来确认短路
    struct FakeProbe {
        exists: bool,
        calls: Cell<usize>,
    }

    impl FakeProbe {
        fn new(exists: bool) -> Self {
            Self {
                exists,
                calls: Cell::new(0),
            }
        }
    }

    impl TestExistencePredicate for FakeProbe {
        fn any_test_exists(&self) -> bool {
            self.calls.set(self.calls.get() + 1);
            self.exists
        }
    }

    const SOURCE: &str = "/repo/ios/HomeAssistentFahrtenbuch/Services/KeychainService.swift";

    fn engine(phase: Phase, tests_exist: bool) -> PolicyEngine<FixedState, FakeProbe> {
        PolicyEngine::new(
            GateConfig::default(),
            FixedState(phase),
            FakeProbe::new(tests_exist),
        )
    }

    #[test]
    fn test_non_mutating_tools_always_allowed() {
        let e = engine(Phase::Idle, false);
        for tool in ["Read", "Bash", "Grep", "MultiEdit", "edit", ""] {
            assert_eq!(e.decide(tool, SOURCE), Verdict::Allow, "tool {}", tool);
        }
        assert_eq!(e.probe.calls.get(), 0);
    }

    #[test]
    fn test_docs_and_tests_allowed_in_any_phase() {
        let paths = [
            "/repo/docs/README.md",
            "/repo/ios/HomeAssistentFahrtenbuch/NOTES.md",
            "/repo/ios/HomeAssistentFahrtenbuchTests/TripTests.swift",
            "/repo/ios/HomeAssistentFahrtenbuch/TripSpec.swift",
        ];
        for phase in [Phase::Idle, Phase::Other("planning".into()), Phase::Validated] {
            let e = engine(phase, false);
            for path in paths {
                assert_eq!(e.decide("Edit", path), Verdict::Allow, "path {}", path);
                assert_eq!(e.decide("Write", path), Verdict::Allow, "path {}", path);
            }
            assert_eq!(e.probe.calls.get(), 0);
        }
    }

    #[test]
    fn test_unrestricted_paths_allowed() {
        let e = engine(Phase::Idle, false);
        assert_eq!(e.decide("Edit", "/repo/prototype/ha_api.py"), Verdict::Allow);
        assert_eq!(e.decide("Write", ""), Verdict::Allow);
        assert_eq!(e.probe.calls.get(), 0);
    }

    #[test]
    fn test_satisfied_phases_skip_probe() {
        for phase in [Phase::SpecApproved, Phase::Implemented, Phase::Validated] {
            let e = engine(phase, false);
            assert_eq!(e.decide("Edit", SOURCE), Verdict::Allow);
            assert_eq!(e.probe.calls.get(), 0);
        }
    }

    #[test]
    fn test_idle_without_tests_blocks() {
        let e = engine(Phase::Idle, false);
        let verdict = e.decide("Edit", SOURCE);

        match &verdict {
            Verdict::Block(msg) => {
                assert!(msg.contains("TEST-FIRST ENFORCEMENT"));
                assert!(msg.contains("ios/HomeAssistentFahrtenbuchTests/"));
                assert!(msg.contains("skip test"));
            }
            Verdict::Allow => panic!("expected block"),
        }
        assert_eq!(verdict.exit_code(), 2);
    }

    #[test]
    fn test_custom_phase_requires_tests() {
        let e = engine(Phase::Other("bug_reported".into()), false);
        assert!(!e.decide("Write", SOURCE).is_allow());

        let e = engine(Phase::Other("bug_reported".into()), true);
        assert!(e.decide("Write", SOURCE).is_allow());
    }

    #[test]
    fn test_idle_with_tests_allows() {
        let e = engine(Phase::Idle, true);
        assert_eq!(e.decide("Edit", SOURCE), Verdict::Allow);
        assert_eq!(e.probe.calls.get(), 1);
    }

    #[test]
    fn test_decide_is_idempotent() {
        let e = engine(Phase::Idle, false);
        assert_eq!(e.decide("Edit", SOURCE), e.decide("Edit", SOURCE));

        let e = engine(Phase::Idle, true);
        assert_eq!(e.decide("Edit", SOURCE), e.decide("Edit", SOURCE));
    }

    #[test]
    fn test_block_message_lines_are_aligned() {
        let msg = block_message(Path::new("ios/AppTests"));
        let widths: Vec<usize> = msg.lines().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
    }
}
