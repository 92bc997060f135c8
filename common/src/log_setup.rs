use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

/// Installs the global logger: rotating files under `logs/` plus console duplication.
///
/// `base_level` is a `flexi_logger` spec string such as `"info"` or
/// `"azint=debug,warn"`; `RUST_LOG` takes precedence when set.
/// The returned handle must be kept alive for as long as logging is needed.
pub fn setup_logging(app_name: &str, base_level: &str) -> LoggerHandle {
    Logger::try_with_env_or_str(base_level)
        .unwrap_or_else(|e| panic!("Invalid log spec '{}': {}", base_level, e))
        .log_to_file(
            FileSpec::default()
                .directory("logs")
                .basename(app_name),
        )
        .duplicate_to_stderr(Duplicate::Warn)
        .duplicate_to_stdout(Duplicate::Info)
        .rotate(
            Criterion::Size(1024 * 1024), //1MB
            Naming::Timestamps,
            Cleanup::KeepLogFiles(5),
        )
        .start()
        .unwrap_or_else(|e| panic!("Logger initialization failed with {}", e))
}
