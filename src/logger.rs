//! # 日志模块
//!
//! 一个极简的 `log::Log` 实现：把日志记录逐行写到 stderr，级别用 `colored` 着色。
//! 库代码只通过 `log` 宏输出，从不直接打印。

use colored::Colorize;
use log::{Level, LevelFilter, Log, Metadata, Record};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = match record.level() {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN".yellow().bold(),
            Level::Info => "INFO".green(),
            Level::Debug => "DEBUG".blue(),
            Level::Trace => "TRACE".dimmed(),
        };

        eprintln!("[{}] {}: {}", level, record.target(), record.args());
    }

    fn flush(&self) {}
}

/// 安装全局日志器。
///
/// `verbose` 为真时输出 `Debug` 及以上级别，否则只输出 `Info` 及以上。
/// 重复调用是无害的：已安装的日志器保持不变，只更新级别。
pub fn init(verbose: bool) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
}
