use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::process;

use test_first_gate::{
    config::{ConfigSource, GateConfig},
    hooks::{emit_verdict, run_hook_from_stdin, DEFAULT_HOOK},
    logging::{init_logging, LogMode},
    policy::{FileCategory, PathClassifier, PolicyEngine, TestDirProbe, Verdict},
    resolve_project_root,
    state::{read_workflow_state, JsonStateStore},
    WorkflowStateStore,
};

/// Test-First Gate
///
/// Claude Code PreToolUse hook：没有测试时拒绝修改受保护源码
#[derive(Parser)]
#[command(name = "test-first-gate")]
#[command(author, version = env!("APP_VERSION"), about)]
struct Cli {
    /// 项目根目录（默认：CLAUDE_PROJECT_DIR 或向上查找 .claude）
    #[arg(long, global = true)]
    project_root: Option<PathBuf>,

    /// 输出 debug 日志到 stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行 hook（由 Claude Code 调用，从 stdin 读取输入）
    Hook {
        /// Hook 名称
        #[arg(default_value = DEFAULT_HOOK)]
        name: String,
    },

    /// 不读 stdin，直接判定一次编辑
    Check {
        /// 目标文件路径
        path: String,

        /// 工具名
        #[arg(short, long, default_value = "Edit")]
        tool: String,
    },

    /// 显示路径的分类
    Classify {
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// 显示项目根目录
    Root,

    /// 显示配置、工作流状态和测试目录
    Status,
}

// ═══════════════════════════════════════════════════════════════════
// 判定
// ═══════════════════════════════════════════════════════════════════

fn category_label(category: FileCategory) -> ColoredString {
    match category {
        FileCategory::Documentation => category.as_str().blue(),
        FileCategory::TestFile => category.as_str().green(),
        FileCategory::ProtectedSource => category.as_str().yellow(),
        FileCategory::Unrestricted => category.as_str().normal(),
    }
}

fn check(project_root: &Path, path: &str, tool: &str) -> i32 {
    let (config, _) = GateConfig::load(project_root);
    let engine = PolicyEngine::for_project(project_root, config);

    let category = engine.classifier().classify(path);
    let verdict = engine.decide(tool, path);

    println!("📄 {} ({})", path.cyan(), category_label(category));
    match &verdict {
        Verdict::Allow => println!("{} {} allowed", "✓".green(), tool),
        Verdict::Block(_) => println!("{} {} blocked", "✗".red(), tool),
    }

    emit_verdict(&verdict)
}

fn classify(project_root: &Path, paths: &[String]) {
    let (config, _) = GateConfig::load(project_root);
    let classifier = PathClassifier::new(&config);

    for path in paths {
        println!("{}\t{}", category_label(classifier.classify(path)), path);
    }
}

// ═══════════════════════════════════════════════════════════════════
// 状态显示
// ═══════════════════════════════════════════════════════════════════

fn show_status(project_root: &Path) -> Result<()> {
    let (config, source) = GateConfig::load(project_root);

    println!(
        "📁 Project Root: {}",
        project_root.display().to_string().green()
    );

    match source {
        ConfigSource::Defaults => println!("⚙️  Config: {}", "defaults".yellow()),
        ConfigSource::File(path) => println!("⚙️  Config: {}", path.display().to_string().cyan()),
        ConfigSource::Fallback(path) => println!(
            "⚙️  Config: {} {}",
            path.display().to_string().cyan(),
            "(invalid, using defaults)".red()
        ),
    }
    println!(
        "   Protected: */{}/*/{}/*.{}",
        config.source_root, config.module_root, config.source_extension
    );

    let state_path = project_root.join(&config.state_file);
    println!();
    println!("🧠 Workflow State: {}", state_path.display().to_string().cyan());
    match read_workflow_state(&state_path) {
        Ok(Some(state)) => {
            let phase = state.current_phase.to_string();
            let phase = if config.is_satisfied_phase(&phase) {
                phase.green()
            } else {
                phase.yellow()
            };
            println!("   Phase: {} {}", state.current_phase.icon(), phase);
            println!("   Test written: {}", state.test_written);
        }
        Ok(None) => println!("   {}", "(missing, treated as idle)".yellow()),
        Err(e) => println!("   {} {}", "(unreadable, treated as idle)".red(), e),
    }

    let probe = TestDirProbe::new(project_root.join(&config.test_dir), &config.source_extension);
    println!();
    println!("🧪 Test Directory: {}", probe.test_dir().display().to_string().cyan());
    let count = probe.count_tests();
    if count > 0 {
        println!("   {} {} test file(s)", "✓".green(), count);
    } else {
        println!("   {} no tests found", "✗".red());
    }

    let state = JsonStateStore::new(&state_path).load();
    let allowed = count > 0 || config.is_satisfied_phase(state.current_phase.as_str());
    println!();
    println!(
        "🚦 Protected edits right now: {}",
        if allowed { "allowed".green() } else { "blocked".red() }
    );

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════
// Main
// ═══════════════════════════════════════════════════════════════════

fn main() -> Result<()> {
    // 参数错误也不能让 hook 以非 0/2 的方式退出
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            process::exit(0);
        }
    };
    let mode = match cli.command {
        None | Some(Commands::Hook { .. }) => LogMode::Hook,
        Some(_) => LogMode::Interactive,
    };
    init_logging(mode, cli.verbose);

    let project_root = resolve_project_root(cli.project_root.as_deref());

    match cli.command {
        None => process::exit(emit_verdict(&run_hook_from_stdin(DEFAULT_HOOK, &project_root))),
        Some(Commands::Hook { name }) => {
            process::exit(emit_verdict(&run_hook_from_stdin(&name, &project_root)))
        }
        Some(Commands::Check { path, tool }) => process::exit(check(&project_root, &path, &tool)),
        Some(Commands::Classify { paths }) => {
            classify(&project_root, &paths);
            Ok(())
        }
        Some(Commands::Root) => {
            println!("{}", project_root.display());
            Ok(())
        }
        Some(Commands::Status) => show_status(&project_root),
    }
}
