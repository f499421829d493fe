//! Logging infrastructure
//!
//! - Console logging to stderr (stdout carries the model's answer)
//! - Optional JSON file logging (for analysis)

use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the file writer alive for the lifetime of the process
pub struct Telemetry {
    log_dir: Option<PathBuf>,
    installed: bool,
    _file_guard: Option<WorkerGuard>,
}

impl Telemetry {
    /// Install the global subscriber.
    ///
    /// `RUST_LOG` takes precedence; otherwise `verbose` selects debug or info.
    pub fn init(log_dir: Option<PathBuf>, verbose: bool) -> anyhow::Result<Self> {
        let filter = env_filter(verbose);
        let console = fmt::layer()
            .with_target(false)
            .compact()
            .with_writer(std::io::stderr);

        let (installed, file_guard) = if let Some(ref dir) = log_dir {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::daily(dir, "modelcall.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let installed = tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(fmt::layer().json().with_writer(non_blocking))
                .try_init();
            (installed, Some(guard))
        } else {
            let installed = tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .try_init();
            (installed, None)
        };

        // A subscriber set earlier stays in place
        if let Err(ref e) = installed {
            tracing::debug!(error = %e, "Global subscriber already set");
        }
        tracing::debug!(log_dir = ?log_dir, "Telemetry initialized");

        Ok(Self {
            log_dir,
            installed: installed.is_ok(),
            _file_guard: file_guard,
        })
    }

    /// Whether this call installed the global subscriber
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// Directory receiving JSON logs, if file logging is on
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug,hyper=info,reqwest=info,h2=info,rustls=info")
        } else {
            EnvFilter::new("warn,modelcall=info,llm=info")
        }
    })
}
