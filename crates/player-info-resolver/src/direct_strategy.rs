//! Direct user-info query strategy.
//!
//! Supported purely by the presence of the platform's self-information API.
//! Starting issues one asynchronous query and trusts the platform to settle
//! it eventually; there is no deadline of its own. Success and failure map
//! one-to-one onto the outcome.

use crate::error::ResolveError;
use crate::platform::{HostContext, PlatformMessage};
use crate::player_info::PlayerInfo;
use crate::strategy::{
    ActiveResolution, BeginOutcome, ResolutionRequest, RunStep, SettleCause, Strategy,
};

pub struct DirectUserInfoStrategy;

impl Strategy for DirectUserInfoStrategy {
    fn name(&self) -> &'static str {
        "direct-user-info"
    }

    fn is_supported(&self, cx: &HostContext<'_>) -> bool {
        cx.platform.has_user_info_api()
    }

    fn begin(
        &self,
        _request: &ResolutionRequest,
        cx: &mut HostContext<'_>,
    ) -> Result<BeginOutcome, ResolveError> {
        cx.platform.request_self_information();
        Ok(BeginOutcome::Running(Box::new(DirectUserInfoRun)))
    }
}

struct DirectUserInfoRun;

impl ActiveResolution for DirectUserInfoRun {
    fn advance(&mut self, _delta_ms: u64, _cx: &mut HostContext<'_>) -> RunStep {
        RunStep::Pending
    }

    fn on_platform_message(
        &mut self,
        message: &PlatformMessage,
        _cx: &mut HostContext<'_>,
    ) -> RunStep {
        match message {
            PlatformMessage::SelfInformation(Ok(info)) => RunStep::Settled {
                cause: SettleCause::PlatformResult,
                result: Ok(PlayerInfo::accepted(info.name.clone(), info.is_premium)),
            },
            PlatformMessage::SelfInformation(Err(message)) => RunStep::Settled {
                cause: SettleCause::PlatformResult,
                result: Err(ResolveError::PlatformCallFailed {
                    message: message.clone(),
                }),
            },
            PlatformMessage::SessionResult(_) => RunStep::Ignored,
        }
    }
}
