use crate::config::constants::{CI_MAX_WORKERS, DEFAULT_MAX_WORKERS, MAX_WORKERS_LIMIT};
use crate::declarations::ValidatedConfig;

/// Size the worker pool: `requested` is the user's `maxConcurrentWorkers`.
pub fn validate_workers(config: &mut ValidatedConfig, requested: Option<i64>) {
    let mut workers = requested.unwrap_or(DEFAULT_MAX_WORKERS);
    if let Some(max_workers) = config.flags.max_workers {
        workers = max_workers;
    } else if config.flags.ci == Some(true) {
        workers = CI_MAX_WORKERS;
    }

    // clamped, so the cast cannot truncate
    config.max_concurrent_workers = workers.clamp(0, MAX_WORKERS_LIMIT) as u32;
    config.dev_server.worker = config.max_concurrent_workers > 0;
}
