//! Delegated-session strategy with deadline racing.
//!
//! Starting launches a cooperative platform session (which shows its own
//! consent UI out of process) and simultaneously arms a deadline one second
//! longer than the consent limit, covering session load time. Two completion
//! sources then race:
//!
//! - the session's one-shot result message, which may arrive at any later
//!   frame or never;
//! - the deadline, after which a default "not accepted" outcome is delivered
//!   and the session is told to exit so a late start is suppressed during
//!   skip/fast-forward playback.
//!
//! First to fire wins. The race is an explicit tagged state with a single
//! mutation point; the losing path is a guaranteed no-op reported as
//! [`RunStep::Ignored`], never a best-effort flag check.

use crate::error::ResolveError;
use crate::platform::{HostContext, LocalSessionRequest, PlatformMessage};
use crate::player_info::PlayerInfo;
use crate::strategy::{
    ActiveResolution, BeginOutcome, ResolutionRequest, RunStep, SettleCause, Strategy,
};

/// Extra time granted beyond the consent limit for session load.
const DEADLINE_BUFFER_MS: u64 = 1000;

// ---------------------------------------------------------------------------
// DeadlineRace
// ---------------------------------------------------------------------------

/// Who fired first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceWinner {
    Deadline,
    Message,
}

/// Tagged race state. `try_win` is the only transition out of `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceState {
    Pending,
    Won(RaceWinner),
    Settled,
}

#[derive(Debug)]
pub struct DeadlineRace {
    state: RaceState,
}

impl DeadlineRace {
    pub fn new() -> Self {
        Self {
            state: RaceState::Pending,
        }
    }

    pub fn state(&self) -> RaceState {
        self.state
    }

    /// Claim the race for `winner`. Returns false when the race was already
    /// decided, in which case the caller must do nothing.
    pub fn try_win(&mut self, winner: RaceWinner) -> bool {
        match self.state {
            RaceState::Pending => {
                self.state = RaceState::Won(winner);
                true
            }
            RaceState::Won(_) | RaceState::Settled => false,
        }
    }

    /// Mark the winning outcome as handed off.
    pub fn settle(&mut self) {
        self.state = RaceState::Settled;
    }
}

impl Default for DeadlineRace {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

pub struct DelegatedSessionStrategy;

impl Strategy for DelegatedSessionStrategy {
    fn name(&self) -> &'static str {
        "delegated-session"
    }

    fn is_supported(&self, cx: &HostContext<'_>) -> bool {
        cx.platform.has_local_session_api()
    }

    fn begin(
        &self,
        request: &ResolutionRequest,
        cx: &mut HostContext<'_>,
    ) -> Result<BeginOutcome, ResolveError> {
        let session_request =
            LocalSessionRequest::new(&cx.platform.play_id(), request.limit_seconds);
        let session_id = session_request.session_id.clone();
        cx.platform.start_local_session(session_request);
        Ok(BeginOutcome::Running(Box::new(DelegatedSessionRun {
            session_id,
            deadline_remaining_ms: u64::from(request.limit_seconds) * 1000 + DEADLINE_BUFFER_MS,
            race: DeadlineRace::new(),
        })))
    }
}

struct DelegatedSessionRun {
    session_id: String,
    deadline_remaining_ms: u64,
    race: DeadlineRace,
}

impl ActiveResolution for DelegatedSessionRun {
    fn advance(&mut self, delta_ms: u64, cx: &mut HostContext<'_>) -> RunStep {
        self.deadline_remaining_ms = self.deadline_remaining_ms.saturating_sub(delta_ms);
        if self.deadline_remaining_ms > 0 {
            return RunStep::Pending;
        }
        if !self.race.try_win(RaceWinner::Deadline) {
            return RunStep::Pending;
        }
        // During skip playback the session never starts and its message
        // never comes; the explicit exit also tells the platform to keep a
        // late session start suppressed.
        cx.platform.exit_local_session(&self.session_id, true);
        self.race.settle();
        RunStep::Settled {
            cause: SettleCause::DeadlineExpired,
            // The session would have supplied its own default name; it is
            // unavailable here, so the content must pick one.
            result: Ok(PlayerInfo::deadline_default()),
        }
    }

    fn on_platform_message(
        &mut self,
        message: &PlatformMessage,
        _cx: &mut HostContext<'_>,
    ) -> RunStep {
        let PlatformMessage::SessionResult(info) = message else {
            return RunStep::Ignored;
        };
        if !self.race.try_win(RaceWinner::Message) {
            return RunStep::Ignored;
        }
        self.race.settle();
        RunStep::Settled {
            cause: SettleCause::SessionMessage,
            result: Ok(info.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
