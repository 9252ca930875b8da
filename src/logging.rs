//! Tracing subscriber setup.
//!
//! The terminal belongs to the UI, so logs only go to a file.

use std::path::Path;
use tracing_subscriber::EnvFilter;

use crate::error::{Context, Result, simple_error};

/// Install a file-backed subscriber honouring `RUST_LOG` (default `info`).
pub fn init(log_path: &Path) -> Result<()> {
    let directory = match log_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(directory)
        .with_ctx(|| format!("create log directory {}", directory.display()))?;
    let file_name = log_path
        .file_name()
        .ok_or_else(|| simple_error(format!("invalid log file path {}", log_path.display())))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|e| simple_error(format!("tracing subscriber already set: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_path_without_file_name() {
        assert!(init(Path::new("/")).is_err());
    }
}
