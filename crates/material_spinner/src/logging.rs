use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_LOG_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,vello=warn,bevy_app=warn";

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize a process-wide tracing subscriber for spinner hosts and demos.
///
/// If `RUST_LOG` is set, it takes precedence. Otherwise a default filter is
/// applied to keep renderer output quiet.
///
/// This function is idempotent and safe to call multiple times.
pub fn init_logging() {
    LOGGING_INITIALIZED.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let _ = fmt().with_env_filter(env_filter).try_init();
    });
}
