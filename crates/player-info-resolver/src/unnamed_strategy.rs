//! Terminal sentinel strategy.
//!
//! Always supported, always last in priority order. Guarantees selection
//! never comes up empty: when no capability and no dialog are available,
//! resolution still succeeds, with the unnamed outcome.

use crate::error::ResolveError;
use crate::platform::HostContext;
use crate::player_info::PlayerInfo;
use crate::strategy::{BeginOutcome, ResolutionRequest, SettleCause, Strategy};

pub struct UnnamedStrategy;

impl Strategy for UnnamedStrategy {
    fn name(&self) -> &'static str {
        "unnamed"
    }

    fn is_supported(&self, _cx: &HostContext<'_>) -> bool {
        true
    }

    fn begin(
        &self,
        _request: &ResolutionRequest,
        _cx: &mut HostContext<'_>,
    ) -> Result<BeginOutcome, ResolveError> {
        Ok(BeginOutcome::Settled {
            cause: SettleCause::Immediate,
            info: PlayerInfo::unnamed(),
        })
    }
}
