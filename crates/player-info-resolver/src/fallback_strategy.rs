//! Fallback dialog strategy.
//!
//! Last resort before the unnamed sentinel: no platform capability can
//! supply a name, but the stage can host the upgrade dialog. The strategy
//! shows the dialog under a generated guest name and, once the dialog's
//! teardown completes, delivers that guest name as a non-consented identity.

use crate::error::ResolveError;
use crate::modal::{ModalInput, ModalSession, ModalSignal};
use crate::platform::HostContext;
use crate::player_info::PlayerInfo;
use crate::stage::SceneId;
use crate::strategy::{
    ActiveResolution, BeginOutcome, ResolutionRequest, RunStep, SettleCause, Strategy,
};

pub struct FallbackDialogStrategy;

impl Strategy for FallbackDialogStrategy {
    fn name(&self) -> &'static str {
        "upgrade-dialog"
    }

    fn is_supported(&self, cx: &HostContext<'_>) -> bool {
        ModalSession::is_supported(&*cx.stage)
    }

    fn begin(
        &self,
        request: &ResolutionRequest,
        cx: &mut HostContext<'_>,
    ) -> Result<BeginOutcome, ResolveError> {
        let mut modal = ModalSession::new(&request.guest_name, cx.stage);
        if modal.is_inert() {
            // The surface shrank between probe and construction. Absence of
            // identity is a valid terminal state, not a failure.
            return Ok(BeginOutcome::Settled {
                cause: SettleCause::ModalUnavailable,
                info: PlayerInfo::unnamed(),
            });
        }
        modal.start(request.limit_seconds, cx.stage);
        Ok(BeginOutcome::Running(Box::new(FallbackDialogRun {
            modal,
            guest_name: request.guest_name.clone(),
        })))
    }
}

struct FallbackDialogRun {
    modal: ModalSession,
    guest_name: String,
}

impl ActiveResolution for FallbackDialogRun {
    fn advance(&mut self, delta_ms: u64, cx: &mut HostContext<'_>) -> RunStep {
        match self.modal.advance(delta_ms, cx.stage) {
            Some(ModalSignal::Ended) => RunStep::Settled {
                cause: SettleCause::ModalEnded,
                result: Ok(PlayerInfo::guest(self.guest_name.clone())),
            },
            None => RunStep::Pending,
        }
    }

    fn on_modal_input(&mut self, input: ModalInput, cx: &mut HostContext<'_>) -> RunStep {
        // Pointer-up only begins teardown; the outcome is delivered when the
        // exit animation finishes, via advance.
        self.modal.on_input(input, cx.stage);
        RunStep::Pending
    }

    fn on_active_scene_changed(&mut self, scene: SceneId, cx: &mut HostContext<'_>) {
        self.modal.on_active_scene_changed(scene, cx.stage);
    }
}
