use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where the process runs decides how log lines look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines on stderr; stdout carries the resolved JSON.
    Compact,
    /// One JSON object per line, without timestamps (CloudWatch adds them).
    Json,
}

/// Filter used when `RUST_LOG` is not set. Verbose mode also shows the
/// per-field debug lines (empty body, age sentinel).
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "profile_intake=debug,info"
    } else {
        "profile_intake=info"
    }
}

pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let compact = (format == LogFormat::Compact).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });
    let json = (format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .without_time()
            .json()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(compact)
        .with(json)
        .init();
}
