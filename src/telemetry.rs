use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Filter used when `RUST_LOG` is unset. HTTP client internals only show warnings.
pub const DEFAULT_FILTER: &str = "info,reqwest=warn,hyper_util=warn";

static INIT: OnceLock<()> = OnceLock::new();

/// Installs the global subscriber for the `pramanik` binary and the integration
/// tests. Later calls are no-ops.
///
/// Targets are printed so user-facing notifications (target `notify`) stand
/// apart from the form's own diagnostics.
pub fn init_tracing() {
    INIT.get_or_init(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().compact().with_target(true))
            .with(env_filter)
            .try_init();
    });
}
