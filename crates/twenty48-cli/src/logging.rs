use std::path::Path;

use anyhow::Context as _;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};

const MAX_LOG_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy)]
pub(crate) enum LogTarget<'a> {
    Stderr,
    Directory(&'a Path),
}

/// Starts the global logger.
///
/// The returned handle must be kept alive until the program exits.
pub(crate) fn init(level: &str, target: LogTarget<'_>) -> anyhow::Result<LoggerHandle> {
    let logger = Logger::try_with_env_or_str(level)
        .with_context(|| format!("Invalid log specification: {level}"))?;
    let logger = match target {
        LogTarget::Stderr => logger
            .log_to_stderr()
            .format(flexi_logger::colored_default_format),
        LogTarget::Directory(dir) => logger
            .log_to_file(FileSpec::default().directory(dir).basename("twenty48"))
            .format(flexi_logger::detailed_format)
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE),
                Naming::Numbers,
                Cleanup::KeepLogFiles(3),
            ),
    };
    logger.start().context("Failed to start logger")
}
