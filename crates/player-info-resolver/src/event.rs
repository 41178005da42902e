//! Structured events describing resolver activity.
//!
//! The arbitrator accumulates one [`ResolverEvent`] per observable milestone
//! (selection, race outcome, delivery, broadcast). The host drains the
//! buffer and forwards it to whatever logging sink it runs; the records are
//! plain serializable data so replaying a resolution yields an identical
//! sequence.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverEventKind {
    /// A resolution attempt acquired the single-flight guard.
    ResolutionStarted,
    /// A resolution attempt was rejected because one is already in flight.
    ResolutionRejected,
    /// A strategy was selected by the priority scan.
    StrategySelected,
    /// The delegated session missed its deadline; the default outcome won.
    DeadlineExpired,
    /// A stimulus reached the in-flight run but did not apply to it: a
    /// message of the wrong type for the strategy, or one that lost a race
    /// already settled.
    LateMessageIgnored,
    /// The outcome (or error) reached the caller's callback.
    OutcomeDelivered,
    /// The resolved identity was broadcast to other observers.
    PlayerInfoRaised,
    /// The fallback dialog could not be built and stayed inert.
    ModalInert,
    /// The fallback dialog finished its teardown.
    ModalEnded,
}

impl fmt::Display for ResolverEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResolutionStarted => f.write_str("resolution_started"),
            Self::ResolutionRejected => f.write_str("resolution_rejected"),
            Self::StrategySelected => f.write_str("strategy_selected"),
            Self::DeadlineExpired => f.write_str("deadline_expired"),
            Self::LateMessageIgnored => f.write_str("late_message_ignored"),
            Self::OutcomeDelivered => f.write_str("outcome_delivered"),
            Self::PlayerInfoRaised => f.write_str("player_info_raised"),
            Self::ModalInert => f.write_str("modal_inert"),
            Self::ModalEnded => f.write_str("modal_ended"),
        }
    }
}

/// One structured event record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverEvent {
    pub kind: ResolverEventKind,
    /// Diagnostic name of the strategy involved, when one was selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    /// Free-form detail (error code, outcome summary).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ResolverEvent {
    pub fn new(kind: ResolverEventKind) -> Self {
        Self {
            kind,
            strategy: None,
            detail: None,
        }
    }

    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
