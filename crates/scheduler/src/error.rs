//! Scheduler construction errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("tick interval must be positive")]
    ZeroInterval,

    #[error("failed to build tick runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
