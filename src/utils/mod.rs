pub mod build_info;
pub mod system_clock;

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

pub use system_clock::SystemClock;

const DEFAULT_DIRECTIVE: &str = "stockbook=info";

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `directive` is used, falling back to
/// `stockbook=info` when it is missing or does not parse. Callers go through
/// [`crate::init_with_filter`], which runs this once per process.
pub(crate) fn init_tracing(directive: Option<&str>) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::default().add_directive(default_directive(directive)),
    };

    let _ = fmt().with_env_filter(filter).try_init();
}

fn default_directive(directive: Option<&str>) -> Directive {
    directive
        .and_then(|raw| raw.trim().parse::<Directive>().ok())
        .or_else(|| DEFAULT_DIRECTIVE.parse().ok())
        .unwrap_or_else(|| Directive::from(tracing::Level::INFO))
}
