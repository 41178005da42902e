//! Error taxonomy for resolution attempts.
//!
//! Every variant is terminal for the attempt it belongs to: failures are
//! surfaced to the caller's callback and never retried or silently dropped.
//! Absence of identity is not an error (the sentinel strategy succeeds with
//! the unnamed outcome instead).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors delivered through the resolution callback.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ResolveError {
    /// A prior `resolve_player_info` call has not yet delivered its outcome.
    /// Only the rejected caller observes this; the in-flight resolution is
    /// unaffected.
    #[error("last resolution has not yet been completed")]
    AlreadyResolving,

    /// The selected strategy's asynchronous platform call rejected.
    #[error("platform call failed: {message}")]
    PlatformCallFailed { message: String },

    /// The selected strategy failed synchronously while starting.
    #[error("strategy {strategy} failed to start: {message}")]
    StrategyFailed { strategy: String, message: String },
}

impl ResolveError {
    /// Stable error code for structured events.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyResolving => "resolve_already_resolving",
            Self::PlatformCallFailed { .. } => "resolve_platform_call_failed",
            Self::StrategyFailed { .. } => "resolve_strategy_failed",
        }
    }
}
