use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "LISTKEEP_LOG";

/// Installs a formatted subscriber filtered by `LISTKEEP_LOG`, then
/// `RUST_LOG`, defaulting to `info`. Returns `false` when a global
/// subscriber was already set.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
