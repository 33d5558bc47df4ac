use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` takes precedence; otherwise
/// `level` applies to this crate and everything else stays at `warn`.
pub fn set(level: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("set log: {}", e))
}

fn directives(level: &str) -> String {
    format!("warn,livemirror={}", level)
}
