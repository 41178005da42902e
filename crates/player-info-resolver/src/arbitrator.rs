//! Resolution arbitration: single-flight guarding, strategy selection, and
//! exactly-once outcome delivery.
//!
//! One [`Arbitrator`] owns the strategy set and at most one in-flight
//! resolution. A resolution attempt acquires the single-flight guard,
//! selects the first supported strategy, and then routes every host stimulus
//! (frame time, platform completions, dialog input) into the active run
//! until it settles. Settling releases the guard, invokes the caller's
//! callback exactly once, and optionally broadcasts the identity.
//!
//! The guard is explicit instance state rather than a process-wide flag, so
//! tests can construct independent arbitrators; a host that wants the
//! process-wide behavior keeps a single instance.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ResolveError;
use crate::event::{ResolverEvent, ResolverEventKind};
use crate::modal::ModalInput;
use crate::platform::{HostContext, PlatformMessage, PlayerInfoRaised};
use crate::player_info::{PlayerInfo, ResolveOptions, ResolverConfig};
use crate::stage::SceneId;
use crate::strategy::{
    ActiveResolution, BeginOutcome, ResolutionRequest, RunStep, SettleCause, StrategySet,
};

/// Caller-facing delivery callback. Invoked exactly once per
/// `resolve_player_info` call: either with the outcome or with an error,
/// never both, never neither.
pub type ResolveCallback = Box<dyn FnOnce(Result<PlayerInfo, ResolveError>)>;

/// One in-flight resolution. Exists exactly while the single-flight guard
/// is held.
struct InFlightResolution {
    strategy: &'static str,
    run: Box<dyn ActiveResolution>,
    callback: Option<ResolveCallback>,
    raises: bool,
}

/// The resolution arbitrator.
pub struct Arbitrator {
    strategies: StrategySet,
    in_flight: Option<InFlightResolution>,
    events: Vec<ResolverEvent>,
    guest_rng: StdRng,
}

impl Arbitrator {
    pub fn new(strategies: StrategySet, config: ResolverConfig) -> Self {
        Self {
            strategies,
            in_flight: None,
            events: Vec::new(),
            guest_rng: StdRng::seed_from_u64(config.guest_name_seed),
        }
    }

    /// An arbitrator over the production strategy order.
    pub fn with_default_strategies(config: ResolverConfig) -> Self {
        Self::new(StrategySet::default_set(), config)
    }

    /// Whether the single-flight guard is currently held.
    pub fn is_resolving(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Drain accumulated structured events.
    pub fn drain_events(&mut self) -> Vec<ResolverEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Resolve the viewer's identity.
    ///
    /// Rejects immediately with [`ResolveError::AlreadyResolving`] while a
    /// prior call is pending. Otherwise selects the first supported strategy
    /// and either settles synchronously or holds the guard until a later
    /// stimulus settles the run.
    pub fn resolve_player_info(
        &mut self,
        options: Option<ResolveOptions>,
        callback: Option<ResolveCallback>,
        cx: &mut HostContext<'_>,
    ) {
        if self.in_flight.is_some() {
            self.events.push(
                ResolverEvent::new(ResolverEventKind::ResolutionRejected)
                    .with_detail(ResolveError::AlreadyResolving.error_code()),
            );
            if let Some(callback) = callback {
                callback(Err(ResolveError::AlreadyResolving));
            }
            return;
        }

        let options = options.unwrap_or_default();
        self.events
            .push(ResolverEvent::new(ResolverEventKind::ResolutionStarted));

        let request = ResolutionRequest {
            limit_seconds: options.limit_seconds,
            guest_name: self.next_guest_name(),
        };

        // The terminal sentinel keeps selection from ever coming up empty;
        // a caller-assembled set without one still resolves, to the unnamed
        // outcome, because absence of identity is a success.
        let Some(strategy) = self.strategies.select(&*cx) else {
            self.deliver(
                None,
                options.raises,
                callback,
                SettleCause::Immediate,
                Ok(PlayerInfo::unnamed()),
                cx,
            );
            return;
        };
        let name = strategy.name();
        self.events.push(
            ResolverEvent::new(ResolverEventKind::StrategySelected).with_strategy(name),
        );

        match strategy.begin(&request, cx) {
            Err(err) => {
                self.deliver(
                    Some(name),
                    options.raises,
                    callback,
                    SettleCause::Immediate,
                    Err(err),
                    cx,
                );
            }
            Ok(BeginOutcome::Settled { cause, info }) => {
                self.deliver(Some(name), options.raises, callback, cause, Ok(info), cx);
            }
            Ok(BeginOutcome::Running(run)) => {
                self.in_flight = Some(InFlightResolution {
                    strategy: name,
                    run,
                    callback,
                    raises: options.raises,
                });
            }
        }
    }

    /// Advance the in-flight resolution by one frame of `delta_ms`.
    pub fn advance(&mut self, delta_ms: u64, cx: &mut HostContext<'_>) {
        self.dispatch(cx, |run, cx| run.advance(delta_ms, cx));
    }

    /// Inject an asynchronous platform completion.
    pub fn on_platform_message(&mut self, message: PlatformMessage, cx: &mut HostContext<'_>) {
        self.dispatch(cx, move |run, cx| run.on_platform_message(&message, cx));
    }

    /// Forward dialog pointer/hover input.
    pub fn on_modal_input(&mut self, input: ModalInput, cx: &mut HostContext<'_>) {
        self.dispatch(cx, move |run, cx| run.on_modal_input(input, cx));
    }

    /// The host's active scene changed.
    pub fn on_active_scene_changed(&mut self, scene: SceneId, cx: &mut HostContext<'_>) {
        if let Some(flight) = self.in_flight.as_mut() {
            flight.run.on_active_scene_changed(scene, cx);
        }
    }

    fn next_guest_name(&mut self) -> String {
        format!("ゲスト{}", self.guest_rng.gen_range(0..1000))
    }

    fn dispatch<F>(&mut self, cx: &mut HostContext<'_>, stimulus: F)
    where
        F: FnOnce(&mut dyn ActiveResolution, &mut HostContext<'_>) -> RunStep,
    {
        let Some(flight) = self.in_flight.as_mut() else {
            return;
        };
        match stimulus(flight.run.as_mut(), cx) {
            RunStep::Pending => {}
            RunStep::Ignored => {
                let strategy = flight.strategy;
                self.events.push(
                    ResolverEvent::new(ResolverEventKind::LateMessageIgnored)
                        .with_strategy(strategy),
                );
            }
            RunStep::Settled { cause, result } => {
                if let Some(flight) = self.in_flight.take() {
                    self.deliver(
                        Some(flight.strategy),
                        flight.raises,
                        flight.callback,
                        cause,
                        result,
                        cx,
                    );
                }
            }
        }
    }

    /// Hand a settled outcome to the caller. The guard is already released
    /// at this point, so the callback may start a new resolution.
    fn deliver(
        &mut self,
        strategy: Option<&'static str>,
        raises: bool,
        callback: Option<ResolveCallback>,
        cause: SettleCause,
        result: Result<PlayerInfo, ResolveError>,
        cx: &mut HostContext<'_>,
    ) {
        let cause_event = match cause {
            SettleCause::DeadlineExpired => Some(ResolverEventKind::DeadlineExpired),
            SettleCause::ModalEnded => Some(ResolverEventKind::ModalEnded),
            SettleCause::ModalUnavailable => Some(ResolverEventKind::ModalInert),
            SettleCause::Immediate
            | SettleCause::PlatformResult
            | SettleCause::SessionMessage => None,
        };
        if let Some(kind) = cause_event {
            let mut event = ResolverEvent::new(kind);
            if let Some(name) = strategy {
                event = event.with_strategy(name);
            }
            self.events.push(event);
        }

        let mut event = ResolverEvent::new(ResolverEventKind::OutcomeDelivered);
        if let Some(name) = strategy {
            event = event.with_strategy(name);
        }
        event = match &result {
            Ok(info) => event.with_detail(format!(
                "accepted={} unnamed={}",
                info.user_data.accepted, info.user_data.unnamed
            )),
            Err(err) => event.with_detail(err.error_code()),
        };
        self.events.push(event);

        let broadcast = match &result {
            Ok(info) if raises && !info.user_data.unnamed => Some(PlayerInfoRaised {
                player_id: cx.platform.self_player_id(),
                name: info.name.clone(),
                user_data: info.user_data.clone(),
            }),
            _ => None,
        };

        if let Some(callback) = callback {
            callback(result);
        }

        // Broadcast after the callback returns, matching the caller-first
        // delivery order.
        if let Some(raised) = broadcast {
            cx.platform.raise_player_info(raised);
            let mut event = ResolverEvent::new(ResolverEventKind::PlayerInfoRaised);
            if let Some(name) = strategy {
                event = event.with_strategy(name);
            }
            self.events.push(event);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
