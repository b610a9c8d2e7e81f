//! 日志初始化
//!
//! 只写 stderr；stdout 留给命令输出。hook 放行时 stderr 必须为空，
//! Block 时 stderr 只能是诊断信息，所以 hook 默认不输出日志

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// 日志级别环境变量
pub const LOG_ENV: &str = "TEST_GATE_LOG";

/// 日志输出档位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// hook 调用：默认关闭
    Hook,
    /// 交互命令：默认 warn
    Interactive,
}

impl LogMode {
    fn default_directive(self, verbose: bool) -> &'static str {
        match (verbose, self) {
            (true, _) => "debug",
            (false, LogMode::Hook) => "off",
            (false, LogMode::Interactive) => "warn",
        }
    }
}

pub fn init_logging(mode: LogMode, verbose: bool) {
    let default = mode.default_directive(verbose);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    // 重复初始化（例如测试中）直接忽略
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}
