//! Recording fakes for the two host ports, shared by unit tests.

use crate::platform::{LocalSessionRequest, PlatformPort, PlayerInfoRaised};
use crate::stage::{SceneId, StagePort};

/// Calls observed by [`RecordingPlatform`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformCall {
    RequestSelfInformation,
    StartLocalSession(LocalSessionRequest),
    ExitLocalSession { session_id: String, needs_result: bool },
    RaisePlayerInfo(PlayerInfoRaised),
}

/// In-memory platform with per-capability knobs.
pub struct RecordingPlatform {
    pub user_info_api: bool,
    pub local_session_api: bool,
    pub play_id: String,
    pub self_player_id: Option<String>,
    pub calls: Vec<PlatformCall>,
}

impl Default for RecordingPlatform {
    fn default() -> Self {
        Self {
            user_info_api: false,
            local_session_api: false,
            play_id: "play-1".to_string(),
            self_player_id: Some("player-1".to_string()),
            calls: Vec::new(),
        }
    }
}

impl RecordingPlatform {
    pub fn raised(&self) -> Vec<&PlayerInfoRaised> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PlatformCall::RaisePlayerInfo(event) => Some(event),
                _ => None,
            })
            .collect()
    }
}

impl PlatformPort for RecordingPlatform {
    fn has_user_info_api(&self) -> bool {
        self.user_info_api
    }

    fn has_local_session_api(&self) -> bool {
        self.local_session_api
    }

    fn play_id(&self) -> String {
        self.play_id.clone()
    }

    fn self_player_id(&self) -> Option<String> {
        self.self_player_id.clone()
    }

    fn request_self_information(&mut self) {
        self.calls.push(PlatformCall::RequestSelfInformation);
    }

    fn start_local_session(&mut self, request: LocalSessionRequest) {
        self.calls.push(PlatformCall::StartLocalSession(request));
    }

    fn exit_local_session(&mut self, session_id: &str, needs_result: bool) {
        self.calls.push(PlatformCall::ExitLocalSession {
            session_id: session_id.to_string(),
            needs_result,
        });
    }

    fn raise_player_info(&mut self, event: PlayerInfoRaised) {
        self.calls.push(PlatformCall::RaisePlayerInfo(event));
    }
}

/// Calls observed by [`RecordingStage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageCall {
    RegisterHover(i32),
    StartHover(i32),
    StopHover(i32),
    AppendRoot,
    RemoveRoot,
    BringToFront,
}

/// In-memory stage with a controllable surface and scene.
pub struct RecordingStage {
    pub size: (u32, u32),
    pub hover_supported: bool,
    pub active_scene: SceneId,
    pub hover_registered: bool,
    pub root_frontmost: bool,
    pub calls: Vec<StageCall>,
}

impl Default for RecordingStage {
    fn default() -> Self {
        Self {
            size: (1280, 720),
            hover_supported: true,
            active_scene: SceneId(1),
            hover_registered: false,
            root_frontmost: true,
            calls: Vec::new(),
        }
    }
}

impl RecordingStage {
    /// A stage on which the fallback dialog is unsupported.
    pub fn without_hover() -> Self {
        Self {
            hover_supported: false,
            ..Self::default()
        }
    }
}

impl StagePort for RecordingStage {
    fn surface_size(&self) -> (u32, u32) {
        self.size
    }

    fn supports_hover_input(&self) -> bool {
        self.hover_supported
    }

    fn active_scene(&self) -> SceneId {
        self.active_scene
    }

    fn is_hover_plugin_registered(&self, _opcode: i32) -> bool {
        self.hover_registered
    }

    fn register_hover_plugin(&mut self, opcode: i32) {
        self.hover_registered = true;
        self.calls.push(StageCall::RegisterHover(opcode));
    }

    fn start_hover_plugin(&mut self, opcode: i32) {
        self.calls.push(StageCall::StartHover(opcode));
    }

    fn stop_hover_plugin(&mut self, opcode: i32) {
        self.calls.push(StageCall::StopHover(opcode));
    }

    fn append_modal_root(&mut self) {
        self.root_frontmost = true;
        self.calls.push(StageCall::AppendRoot);
    }

    fn remove_modal_root(&mut self) {
        self.calls.push(StageCall::RemoveRoot);
    }

    fn is_modal_root_frontmost(&self) -> bool {
        self.root_frontmost
    }

    fn bring_modal_root_to_front(&mut self) {
        self.root_frontmost = true;
        self.calls.push(StageCall::BringToFront);
    }
}
