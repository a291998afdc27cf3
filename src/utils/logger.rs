use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::utils::error::{Result, TranslateError};

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("resume_translator=debug,info")
        } else {
            EnvFilter::new("resume_translator=info")
        }
    })
}

/// 初始化終端機日誌（已初始化時回傳錯誤而非 panic）
pub fn init_logger(verbose: bool) -> Result<()> {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| TranslateError::LoggerError {
            message: e.to_string(),
        })
}

/// JSON 格式日誌，方便交給外部收集器
pub fn init_json_logger() -> Result<()> {
    tracing_subscriber::registry()
        .with(default_filter(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .try_init()
        .map_err(|e| TranslateError::LoggerError {
            message: e.to_string(),
        })
}
