//! Strategy abstraction and the prioritized strategy set.
//!
//! A [`Strategy`] pairs a synchronous capability probe with the ability to
//! start one asynchronous resolution attempt. Starting yields either an
//! immediate outcome or an [`ActiveResolution`]: a state machine the
//! arbitrator drives with frame time and injected platform completions until
//! it settles exactly once.
//!
//! The set is scanned in declared order and the first supported strategy
//! wins. The terminal entry must be unconditionally supported (the sentinel
//! that yields the unnamed outcome), so selection never comes up empty. A
//! failed strategy is never retried and never falls through to the next one.

use crate::error::ResolveError;
use crate::modal::ModalInput;
use crate::platform::{HostContext, PlatformMessage};
use crate::player_info::PlayerInfo;
use crate::stage::SceneId;

// ---------------------------------------------------------------------------
// ResolutionRequest
// ---------------------------------------------------------------------------

/// Per-attempt parameters handed to the selected strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// Seconds the strategy may spend waiting for consent.
    pub limit_seconds: u32,
    /// Pre-generated guest name, used when the attempt can only produce a
    /// dummy identity.
    pub guest_name: String,
}

// ---------------------------------------------------------------------------
// Settle provenance
// ---------------------------------------------------------------------------

/// Which completion source produced a settled outcome. Diagnostic only;
/// delivery semantics are identical for every cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleCause {
    /// The strategy settled synchronously while starting.
    Immediate,
    /// The direct platform query returned.
    PlatformResult,
    /// The delegated session's result message arrived in time.
    SessionMessage,
    /// The delegated session missed its deadline.
    DeadlineExpired,
    /// The fallback dialog finished its teardown.
    ModalEnded,
    /// The fallback dialog could not be built despite probing as supported.
    ModalUnavailable,
}

// ---------------------------------------------------------------------------
// BeginOutcome / RunStep
// ---------------------------------------------------------------------------

/// Result of starting a strategy.
pub enum BeginOutcome {
    /// The strategy settled without any asynchronous work.
    Settled { cause: SettleCause, info: PlayerInfo },
    /// Asynchronous work is in flight; drive the returned machine.
    Running(Box<dyn ActiveResolution>),
}

/// One observation step of an in-flight resolution.
pub enum RunStep {
    /// Still waiting.
    Pending,
    /// The stimulus lost a race that is already decided; guaranteed no-op.
    Ignored,
    /// The resolution settled. Terminal: the machine must not be driven
    /// further.
    Settled {
        cause: SettleCause,
        result: Result<PlayerInfo, ResolveError>,
    },
}

// ---------------------------------------------------------------------------
// Strategy / ActiveResolution
// ---------------------------------------------------------------------------

/// One named way of resolving identity.
pub trait Strategy {
    /// Diagnostic name, stable across releases.
    fn name(&self) -> &'static str;

    /// Synchronous capability probe.
    fn is_supported(&self, cx: &HostContext<'_>) -> bool;

    /// Start one resolution attempt. A synchronous error here is terminal
    /// for the attempt.
    fn begin(
        &self,
        request: &ResolutionRequest,
        cx: &mut HostContext<'_>,
    ) -> Result<BeginOutcome, ResolveError>;
}

/// An in-flight resolution attempt. The arbitrator feeds it frame time and
/// host stimuli; it settles at most once.
pub trait ActiveResolution {
    /// Advance by one frame of `delta_ms`.
    fn advance(&mut self, delta_ms: u64, cx: &mut HostContext<'_>) -> RunStep;

    /// An asynchronous platform completion arrived.
    fn on_platform_message(
        &mut self,
        message: &PlatformMessage,
        cx: &mut HostContext<'_>,
    ) -> RunStep {
        let _ = (message, cx);
        RunStep::Pending
    }

    /// Pointer/hover input for strategies that own a dialog.
    fn on_modal_input(&mut self, input: ModalInput, cx: &mut HostContext<'_>) -> RunStep {
        let _ = (input, cx);
        RunStep::Pending
    }

    /// The host's active scene changed.
    fn on_active_scene_changed(&mut self, scene: SceneId, cx: &mut HostContext<'_>) {
        let _ = (scene, cx);
    }
}

// ---------------------------------------------------------------------------
// StrategySet
// ---------------------------------------------------------------------------

/// Ordered, process-lifetime collection of strategies.
pub struct StrategySet {
    strategies: Vec<Box<dyn Strategy>>,
}

impl StrategySet {
    pub fn new(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self { strategies }
    }

    /// The production priority order: direct query, delegated session,
    /// fallback dialog, unnamed sentinel.
    pub fn default_set() -> Self {
        Self::new(vec![
            Box::new(crate::direct_strategy::DirectUserInfoStrategy),
            Box::new(crate::session_strategy::DelegatedSessionStrategy),
            Box::new(crate::fallback_strategy::FallbackDialogStrategy),
            Box::new(crate::unnamed_strategy::UnnamedStrategy),
        ])
    }

    /// First supported strategy in declared order.
    pub fn select(&self, cx: &HostContext<'_>) -> Option<&dyn Strategy> {
        self.strategies
            .iter()
            .map(AsRef::as_ref)
            .find(|strategy| strategy.is_supported(cx))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
