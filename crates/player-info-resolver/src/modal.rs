//! Fallback dialog lifecycle.
//!
//! When no platform capability can resolve a name, an on-screen modal asks
//! the viewer to upgrade their client. The dialog is a small state machine:
//!
//! ```text
//! constructed → started → ending → ended
//! ```
//!
//! Each state is entered at most once. Construction on an unsupported
//! surface (too shallow, or no hover input) yields an inert session whose
//! `start`/`end` are tolerated no-ops. Once `ended`, all owned visual state
//! and timers are released and the session must not be reused.
//!
//! Visual property mutation happens only here; the host stage is touched
//! exclusively through the display-tree and input-plugin operations of
//! [`StagePort`].

use serde::{Deserialize, Serialize};

use crate::animation::{Animation, AnimationFrame, MotionPhase};
use crate::layout::{fits_surface, DialogLayout};
use crate::stage::{SceneId, StagePort, HOVER_PLUGIN_OPCODE};

const TITLE_LINE_1: &str = "このコンテンツは名前を利用します。";
const BODY_LINE_1: &str = "ユーザ名で参加するには、";
const BODY_LINE_2: &str = "最新のニコニコ生放送アプリに更新してください。";

fn title_line_2(name: &str) -> String {
    format!("あなたは「{name}」です。")
}

fn button_label(remaining_seconds: u32) -> String {
    format!("OK ({remaining_seconds})")
}

// ---------------------------------------------------------------------------
// Phases and signals
// ---------------------------------------------------------------------------

/// Lifecycle phase of a modal session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalPhase {
    /// Construction was a no-op; the session owns nothing.
    Inert,
    Constructed,
    Started,
    Ending,
    Ended,
}

/// One-shot signal emitted by [`ModalSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalSignal {
    /// Teardown finished; the owning strategy may deliver its outcome.
    Ended,
}

/// Pointer/hover input forwarded by the host while the dialog is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalInput {
    Hover,
    Unhover,
    PointerDown,
    PointerUp,
}

// ---------------------------------------------------------------------------
// Visual state
// ---------------------------------------------------------------------------

/// Animatable properties of one visual node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualNode {
    pub scale: f64,
    pub opacity: f64,
}

impl Default for VisualNode {
    fn default() -> Self {
        Self {
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

impl VisualNode {
    fn apply(&mut self, frame: AnimationFrame) {
        if let Some(scale) = frame.scale {
            self.scale = scale;
        }
        if let Some(opacity) = frame.opacity {
            self.opacity = opacity;
        }
    }
}

/// All visual nodes owned by a live dialog. Dropped wholesale at teardown.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalVisuals {
    pub layout: DialogLayout,
    /// Full-screen dimmer.
    pub backdrop: VisualNode,
    /// Whether the backdrop intercepts pointer events aimed behind the
    /// dialog. Always set for a live dialog; exposed so the host's renderer
    /// can mark the node touchable.
    pub backdrop_blocks_input: bool,
    pub panel: VisualNode,
    pub button: VisualNode,
    pub button_highlighted: bool,
    pub button_label: String,
    pub title_lines: [String; 2],
    pub body_lines: [&'static str; 2],
}

// ---------------------------------------------------------------------------
// Countdown
// ---------------------------------------------------------------------------

/// 1-second-interval countdown driving the button label and auto-dismiss.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Countdown {
    remaining_seconds: u32,
    accumulated_ms: u64,
}

// ---------------------------------------------------------------------------
// ModalSession
// ---------------------------------------------------------------------------

/// A single fallback-dialog lifecycle.
#[derive(Debug)]
pub struct ModalSession {
    phase: ModalPhase,
    /// Scene the dialog was constructed on. `None` for inert sessions.
    scene: Option<SceneId>,
    visuals: Option<ModalVisuals>,
    /// `None` doubles as the cancelled-timer guard.
    countdown: Option<Countdown>,
    enter_animation: Option<Animation>,
    exit_panel_animation: Option<Animation>,
    exit_backdrop_animation: Option<Animation>,
    bounce_animation: Option<Animation>,
    hover_plugin_started: bool,
    /// Whether the root node was ever appended to the display tree. Teardown
    /// must not remove a root that was never added.
    root_appended: bool,
    keep_frontmost: bool,
}

impl ModalSession {
    /// Whether the dialog can be shown on this stage at all.
    pub fn is_supported(stage: &dyn StagePort) -> bool {
        let (width, height) = stage.surface_size();
        fits_surface(width, height) && stage.supports_hover_input()
    }

    /// Build the dialog for `guest_name`. On an unsupported stage the
    /// session is inert and every later call is a tolerated no-op.
    pub fn new(guest_name: &str, stage: &mut dyn StagePort) -> Self {
        if !Self::is_supported(stage) {
            return Self::inert();
        }
        let (width, height) = stage.surface_size();
        let Some(layout) = DialogLayout::compute(width, height) else {
            return Self::inert();
        };

        if !stage.is_hover_plugin_registered(HOVER_PLUGIN_OPCODE) {
            stage.register_hover_plugin(HOVER_PLUGIN_OPCODE);
        }

        let visuals = ModalVisuals {
            layout,
            backdrop: VisualNode::default(),
            backdrop_blocks_input: true,
            panel: VisualNode::default(),
            button: VisualNode::default(),
            button_highlighted: false,
            button_label: button_label(crate::player_info::DEFAULT_LIMIT_SECONDS),
            title_lines: [TITLE_LINE_1.to_string(), title_line_2(guest_name)],
            body_lines: [BODY_LINE_1, BODY_LINE_2],
        };

        Self {
            phase: ModalPhase::Constructed,
            scene: Some(stage.active_scene()),
            visuals: Some(visuals),
            countdown: None,
            enter_animation: None,
            exit_panel_animation: None,
            exit_backdrop_animation: None,
            bounce_animation: None,
            hover_plugin_started: false,
            root_appended: false,
            keep_frontmost: false,
        }
    }

    fn inert() -> Self {
        Self {
            phase: ModalPhase::Inert,
            scene: None,
            visuals: None,
            countdown: None,
            enter_animation: None,
            exit_panel_animation: None,
            exit_backdrop_animation: None,
            bounce_animation: None,
            hover_plugin_started: false,
            root_appended: false,
            keep_frontmost: false,
        }
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn is_inert(&self) -> bool {
        self.phase == ModalPhase::Inert
    }

    /// Visual state, for the host's renderer. `None` once torn down (or
    /// inert).
    pub fn visuals(&self) -> Option<&ModalVisuals> {
        self.visuals.as_ref()
    }

    /// Show the dialog and start the consent countdown.
    pub fn start(&mut self, remaining_seconds: u32, stage: &mut dyn StagePort) {
        if self.phase != ModalPhase::Constructed {
            return;
        }
        // A detached display context would leave the dialog invisible and
        // the input plugin scanning for nothing.
        if self.scene != Some(stage.active_scene()) {
            return;
        }

        stage.start_hover_plugin(HOVER_PLUGIN_OPCODE);
        self.hover_plugin_started = true;

        let enter = Animation::new(vec![
            MotionPhase::scale_opacity(100, (0.5, 1.1), (0.5, 1.0)),
            MotionPhase::scale_opacity(100, (1.1, 1.0), (1.0, 1.0)),
        ]);
        if let Some(visuals) = self.visuals.as_mut() {
            visuals.panel.apply(enter.sample());
            visuals.button_label = button_label(remaining_seconds);
        }
        self.enter_animation = Some(enter);

        stage.append_modal_root();
        self.root_appended = true;
        self.keep_frontmost = true;

        self.countdown = Some(Countdown {
            remaining_seconds,
            accumulated_ms: 0,
        });
        self.phase = ModalPhase::Started;
    }

    /// Dismiss the dialog. Idempotent: a second call while teardown is in
    /// progress (or after it finished) is a no-op, so a countdown expiry and
    /// a pointer-up in the same frame cannot double-release.
    pub fn end(&mut self, stage: &mut dyn StagePort) {
        match self.phase {
            ModalPhase::Constructed | ModalPhase::Started => {}
            ModalPhase::Inert | ModalPhase::Ending | ModalPhase::Ended => return,
        }

        // Nulled-handle guard: the countdown may already have been consumed.
        self.countdown = None;

        // Stop front-most enforcement and the hover scan now rather than
        // after the exit animation; the owning scene may be torn down while
        // the fade is still running.
        self.keep_frontmost = false;
        if self.hover_plugin_started {
            stage.stop_hover_plugin(HOVER_PLUGIN_OPCODE);
            self.hover_plugin_started = false;
        }

        let panel_exit = Animation::new(vec![MotionPhase::scale_opacity(
            100,
            (1.0, 0.8),
            (1.0, 0.0),
        )]);
        let backdrop_exit = Animation::new(vec![MotionPhase::opacity(100, 1.0, 0.0)]);
        if let Some(visuals) = self.visuals.as_mut() {
            visuals.panel.apply(panel_exit.sample());
            visuals.backdrop.apply(backdrop_exit.sample());
        }
        self.exit_panel_animation = Some(panel_exit);
        self.exit_backdrop_animation = Some(backdrop_exit);
        self.phase = ModalPhase::Ending;
    }

    /// Force-stop the hover scan the moment the dialog's owning scene stops
    /// being active.
    pub fn on_active_scene_changed(&mut self, scene: SceneId, stage: &mut dyn StagePort) {
        if self.scene == Some(scene) {
            return;
        }
        if self.hover_plugin_started {
            stage.stop_hover_plugin(HOVER_PLUGIN_OPCODE);
            self.hover_plugin_started = false;
        }
    }

    /// Pointer and hover input while the dialog is shown.
    pub fn on_input(&mut self, input: ModalInput, stage: &mut dyn StagePort) {
        if self.phase != ModalPhase::Started {
            return;
        }
        let Some(visuals) = self.visuals.as_mut() else {
            return;
        };
        match input {
            ModalInput::Hover => {
                visuals.button_highlighted = true;
                let bounce_running = self
                    .bounce_animation
                    .as_ref()
                    .is_some_and(|anim| !anim.is_completed());
                if !bounce_running {
                    self.bounce_animation = Some(Animation::new(vec![
                        MotionPhase::scale(16, 1.0, 0.9),
                        MotionPhase::scale(16, 0.9, 1.1),
                        MotionPhase::scale(33, 1.1, 1.0),
                    ]));
                }
            }
            ModalInput::Unhover => {
                visuals.button_highlighted = false;
            }
            ModalInput::PointerDown => {
                visuals.button_highlighted = true;
            }
            ModalInput::PointerUp => {
                self.end(stage);
            }
        }
    }

    /// Advance animations, the countdown, and front-most enforcement by one
    /// frame of `delta_ms`. Returns [`ModalSignal::Ended`] exactly once,
    /// when teardown completes.
    pub fn advance(&mut self, delta_ms: u64, stage: &mut dyn StagePort) -> Option<ModalSignal> {
        match self.phase {
            ModalPhase::Inert | ModalPhase::Constructed | ModalPhase::Ended => None,
            ModalPhase::Started => {
                self.advance_started(delta_ms, stage);
                // The countdown may have transitioned us into teardown; the
                // exit animation starts rendering on the next frame.
                None
            }
            ModalPhase::Ending => self.advance_ending(delta_ms, stage),
        }
    }

    fn advance_started(&mut self, delta_ms: u64, stage: &mut dyn StagePort) {
        if let Some(anim) = self.enter_animation.as_mut() {
            let frame = anim.advance(delta_ms);
            if let Some(visuals) = self.visuals.as_mut() {
                visuals.panel.apply(frame);
            }
            if anim.is_completed() {
                self.enter_animation = None;
            }
        }
        if let Some(anim) = self.bounce_animation.as_mut() {
            let frame = anim.advance(delta_ms);
            if let Some(visuals) = self.visuals.as_mut() {
                visuals.button.apply(frame);
            }
        }

        // Deferred to the end of the frame so a re-append does not flicker
        // mid-update.
        let needs_front_fix = self.keep_frontmost && !stage.is_modal_root_frontmost();

        if let Some(countdown) = self.countdown.as_mut() {
            countdown.accumulated_ms += delta_ms;
            let mut expired = false;
            while countdown.accumulated_ms >= 1000 {
                countdown.accumulated_ms -= 1000;
                countdown.remaining_seconds = countdown.remaining_seconds.saturating_sub(1);
                let remaining = countdown.remaining_seconds;
                if let Some(visuals) = self.visuals.as_mut() {
                    visuals.button_label = button_label(remaining);
                }
                if remaining == 0 {
                    expired = true;
                    break;
                }
            }
            if expired {
                self.end(stage);
                return;
            }
        }

        if needs_front_fix && self.scene == Some(stage.active_scene()) {
            stage.bring_modal_root_to_front();
        }
    }

    fn advance_ending(&mut self, delta_ms: u64, stage: &mut dyn StagePort) -> Option<ModalSignal> {
        if let Some(anim) = self.exit_panel_animation.as_mut() {
            let frame = anim.advance(delta_ms);
            if let Some(visuals) = self.visuals.as_mut() {
                visuals.panel.apply(frame);
            }
        }
        let backdrop_done = if let Some(anim) = self.exit_backdrop_animation.as_mut() {
            let frame = anim.advance(delta_ms);
            if let Some(visuals) = self.visuals.as_mut() {
                visuals.backdrop.apply(frame);
            }
            frame.completed
        } else {
            false
        };

        if backdrop_done {
            if self.root_appended {
                stage.remove_modal_root();
                self.root_appended = false;
            }
            self.visuals = None;
            self.enter_animation = None;
            self.exit_panel_animation = None;
            self.exit_backdrop_animation = None;
            self.bounce_animation = None;
            self.phase = ModalPhase::Ended;
            return Some(ModalSignal::Ended);
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum StageCall {
        RegisterHover(i32),
        StartHover(i32),
        StopHover(i32),
        AppendRoot,
        RemoveRoot,
        BringToFront,
    }

    struct FakeStage {
        size: (u32, u32),
        hover_supported: bool,
        active_scene: SceneId,
        hover_registered: bool,
        root_frontmost: bool,
        calls: Vec<StageCall>,
    }

    impl FakeStage {
        fn new() -> Self {
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

    impl StagePort for FakeStage {
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

    fn started_session(stage: &mut FakeStage) -> ModalSession {
        let mut session = ModalSession::new("ゲスト42", stage);
        session.start(3, stage);
        assert_eq!(session.phase(), ModalPhase::Started);
        session
    }

    /// Drive teardown to completion: 100ms of fade plus the next-frame
    /// completion tick.
    fn run_teardown(session: &mut ModalSession, stage: &mut FakeStage) -> bool {
        for _ in 0..16 {
            if session.advance(16, stage) == Some(ModalSignal::Ended) {
                return true;
            }
        }
        false
    }

    // -- Construction --

    #[test]
    fn construction_builds_visuals_and_registers_hover_plugin() {
        let mut stage = FakeStage::new();
        let session = ModalSession::new("ゲスト7", &mut stage);
        assert_eq!(session.phase(), ModalPhase::Constructed);
        let visuals = session.visuals().expect("visuals");
        assert_eq!(visuals.title_lines[1], "あなたは「ゲスト7」です。");
        assert_eq!(visuals.button_label, "OK (15)");
        assert!(visuals.backdrop_blocks_input);
        assert_eq!(
            stage.calls,
            vec![StageCall::RegisterHover(HOVER_PLUGIN_OPCODE)]
        );
    }

    #[test]
    fn hover_plugin_registration_is_idempotent() {
        let mut stage = FakeStage::new();
        stage.hover_registered = true;
        let session = ModalSession::new("ゲスト7", &mut stage);
        assert_eq!(session.phase(), ModalPhase::Constructed);
        assert!(stage.calls.is_empty());
    }

    #[test]
    fn shallow_surface_yields_inert_session() {
        let mut stage = FakeStage::new();
        stage.size = (1280, 400);
        let mut session = ModalSession::new("ゲスト7", &mut stage);
        assert!(session.is_inert());
        assert!(session.visuals().is_none());

        // start/end tolerate the inert session without touching the stage.
        session.start(5, &mut stage);
        session.end(&mut stage);
        assert_eq!(session.phase(), ModalPhase::Inert);
        assert!(stage.calls.is_empty());
    }

    #[test]
    fn missing_hover_input_yields_inert_session() {
        let mut stage = FakeStage::new();
        stage.hover_supported = false;
        assert!(!ModalSession::is_supported(&stage));
        assert!(ModalSession::new("ゲスト7", &mut stage).is_inert());
    }

    // -- Start --

    #[test]
    fn start_appends_root_and_arms_countdown() {
        let mut stage = FakeStage::new();
        let session = started_session(&mut stage);
        assert!(stage
            .calls
            .contains(&StageCall::StartHover(HOVER_PLUGIN_OPCODE)));
        assert!(stage.calls.contains(&StageCall::AppendRoot));
        let visuals = session.visuals().expect("visuals");
        assert_eq!(visuals.button_label, "OK (3)");
        // Entrance animation applied its first-phase start values.
        assert_eq!(visuals.panel.scale, 0.5);
        assert_eq!(visuals.panel.opacity, 0.5);
    }

    #[test]
    fn start_on_stale_scene_is_a_no_op() {
        let mut stage = FakeStage::new();
        let mut session = ModalSession::new("ゲスト7", &mut stage);
        stage.active_scene = SceneId(2);
        session.start(3, &mut stage);
        assert_eq!(session.phase(), ModalPhase::Constructed);
        assert!(!stage.calls.contains(&StageCall::AppendRoot));
    }

    #[test]
    fn start_twice_is_a_no_op() {
        let mut stage = FakeStage::new();
        let mut session = started_session(&mut stage);
        let calls_before = stage.calls.len();
        session.start(3, &mut stage);
        assert_eq!(stage.calls.len(), calls_before);
    }

    // -- Entrance animation --

    #[test]
    fn entrance_animation_overshoots_then_settles() {
        let mut stage = FakeStage::new();
        let mut session = started_session(&mut stage);

        session.advance(100, &mut stage);
        let visuals = session.visuals().expect("visuals");
        assert!((visuals.panel.scale - 1.1).abs() < 1e-9);
        assert!((visuals.panel.opacity - 1.0).abs() < 1e-9);

        session.advance(100, &mut stage);
        let visuals = session.visuals().expect("visuals");
        assert!((visuals.panel.scale - 1.0).abs() < 1e-9);
    }

    // -- Countdown --

    #[test]
    fn countdown_updates_label_each_second() {
        let mut stage = FakeStage::new();
        let mut session = started_session(&mut stage);

        session.advance(1000, &mut stage);
        assert_eq!(session.visuals().unwrap().button_label, "OK (2)");
        session.advance(1000, &mut stage);
        assert_eq!(session.visuals().unwrap().button_label, "OK (1)");
    }

    #[test]
    fn countdown_expiry_transitions_to_ended() {
        let mut stage = FakeStage::new();
        let mut session = started_session(&mut stage);

        for _ in 0..3 {
            session.advance(1000, &mut stage);
        }
        assert_eq!(session.phase(), ModalPhase::Ending);
        assert!(run_teardown(&mut session, &mut stage));
        assert_eq!(session.phase(), ModalPhase::Ended);
        assert!(session.visuals().is_none());
        assert!(stage.calls.contains(&StageCall::RemoveRoot));
    }

    #[test]
    fn sub_second_frames_accumulate() {
        let mut stage = FakeStage::new();
        let mut session = started_session(&mut stage);
        for _ in 0..62 {
            session.advance(16, &mut stage);
        }
        // 62 * 16ms = 992ms: not yet a full second.
        assert_eq!(session.visuals().unwrap().button_label, "OK (3)");
        session.advance(16, &mut stage);
        assert_eq!(session.visuals().unwrap().button_label, "OK (2)");
    }

    // -- Frontmost enforcement --

    #[test]
    fn buried_root_is_brought_back_to_front() {
        let mut stage = FakeStage::new();
        let mut session = started_session(&mut stage);
        stage.root_frontmost = false;
        session.advance(16, &mut stage);
        assert!(stage.calls.contains(&StageCall::BringToFront));
    }

    #[test]
    fn frontmost_enforcement_stops_after_end() {
        let mut stage = FakeStage::new();
        let mut session = started_session(&mut stage);
        session.end(&mut stage);
        stage.root_frontmost = false;
        let fixes_before = stage
            .calls
            .iter()
            .filter(|c| **c == StageCall::BringToFront)
            .count();
        session.advance(16, &mut stage);
        let fixes_after = stage
            .calls
            .iter()
            .filter(|c| **c == StageCall::BringToFront)
            .count();
        assert_eq!(fixes_before, fixes_after);
    }

    // -- End --

    #[test]
    fn end_stops_hover_plugin_and_fades_out() {
        let mut stage = FakeStage::new();
        let mut session = started_session(&mut stage);
        session.end(&mut stage);
        assert_eq!(session.phase(), ModalPhase::Ending);
        assert!(stage
            .calls
            .contains(&StageCall::StopHover(HOVER_PLUGIN_OPCODE)));

        session.advance(50, &mut stage);
        let visuals = session.visuals().expect("visuals");
        assert!((visuals.backdrop.opacity - 0.5).abs() < 1e-9);
        assert!((visuals.panel.scale - 0.9).abs() < 1e-9);
    }

    #[test]
    fn end_twice_releases_once() {
        let mut stage = FakeStage::new();
        let mut session = started_session(&mut stage);
        session.end(&mut stage);
        session.end(&mut stage);
        let stop_count = stage
            .calls
            .iter()
            .filter(|c| **c == StageCall::StopHover(HOVER_PLUGIN_OPCODE))
            .count();
        assert_eq!(stop_count, 1);

        assert!(run_teardown(&mut session, &mut stage));
        // Ended signal fired; a further end and advance produce nothing.
        session.end(&mut stage);
        assert_eq!(session.advance(16, &mut stage), None);
        let removes = stage
            .calls
            .iter()
            .filter(|c| **c == StageCall::RemoveRoot)
            .count();
        assert_eq!(removes, 1);
    }

    #[test]
    fn end_before_start_never_removes_an_unappended_root() {
        let mut stage = FakeStage::new();
        let mut session = ModalSession::new("ゲスト7", &mut stage);
        session.end(&mut stage);
        assert_eq!(session.phase(), ModalPhase::Ending);

        assert!(run_teardown(&mut session, &mut stage));
        assert_eq!(session.phase(), ModalPhase::Ended);
        // The root was never appended, so teardown must not remove it (nor
        // stop a hover scan that never started).
        assert!(!stage.calls.contains(&StageCall::AppendRoot));
        assert!(!stage.calls.contains(&StageCall::RemoveRoot));
        assert!(!stage
            .calls
            .contains(&StageCall::StopHover(HOVER_PLUGIN_OPCODE)));
    }

    #[test]
    fn ended_signal_is_one_shot() {
        let mut stage = FakeStage::new();
        let mut session = started_session(&mut stage);
        session.end(&mut stage);
        assert!(run_teardown(&mut session, &mut stage));
        for _ in 0..4 {
            assert_eq!(session.advance(16, &mut stage), None);
        }
    }

    // -- Scene change --

    #[test]
    fn scene_change_force_stops_hover_plugin() {
        let mut stage = FakeStage::new();
        let mut session = started_session(&mut stage);
        session.on_active_scene_changed(SceneId(9), &mut stage);
        assert!(stage
            .calls
            .contains(&StageCall::StopHover(HOVER_PLUGIN_OPCODE)));

        // end() afterwards does not stop it a second time.
        session.end(&mut stage);
        let stop_count = stage
            .calls
            .iter()
            .filter(|c| **c == StageCall::StopHover(HOVER_PLUGIN_OPCODE))
            .count();
        assert_eq!(stop_count, 1);
    }

    #[test]
    fn same_scene_notification_is_ignored() {
        let mut stage = FakeStage::new();
        let mut session = started_session(&mut stage);
        session.on_active_scene_changed(SceneId(1), &mut stage);
        assert!(!stage
            .calls
            .contains(&StageCall::StopHover(HOVER_PLUGIN_OPCODE)));
    }

    // -- Interaction --

    #[test]
    fn hover_highlights_and_bounces() {
        let mut stage = FakeStage::new();
        let mut session = started_session(&mut stage);
        session.on_input(ModalInput::Hover, &mut stage);
        assert!(session.visuals().unwrap().button_highlighted);

        // 16ms into the bounce the button has shrunk to 0.9.
        session.advance(16, &mut stage);
        let scale = session.visuals().unwrap().button.scale;
        assert!((scale - 0.9).abs() < 1e-9);

        session.on_input(ModalInput::Unhover, &mut stage);
        assert!(!session.visuals().unwrap().button_highlighted);
    }

    #[test]
    fn hover_while_bouncing_does_not_restart_bounce() {
        let mut stage = FakeStage::new();
        let mut session = started_session(&mut stage);
        session.on_input(ModalInput::Hover, &mut stage);
        session.advance(16, &mut stage);
        session.on_input(ModalInput::Hover, &mut stage);
        // Still mid-bounce: the next frame continues from phase 2, not from
        // a fresh 1.0 → 0.9 shrink.
        session.advance(16, &mut stage);
        let scale = session.visuals().unwrap().button.scale;
        assert!((scale - 1.1).abs() < 1e-9);
    }

    #[test]
    fn pointer_up_dismisses() {
        let mut stage = FakeStage::new();
        let mut session = started_session(&mut stage);
        session.on_input(ModalInput::PointerDown, &mut stage);
        assert!(session.visuals().unwrap().button_highlighted);
        session.on_input(ModalInput::PointerUp, &mut stage);
        assert_eq!(session.phase(), ModalPhase::Ending);
    }

    #[test]
    fn input_ignored_outside_started_phase() {
        let mut stage = FakeStage::new();
        let mut session = ModalSession::new("ゲスト7", &mut stage);
        session.on_input(ModalInput::PointerUp, &mut stage);
        assert_eq!(session.phase(), ModalPhase::Constructed);

        session.start(3, &mut stage);
        session.end(&mut stage);
        session.on_input(ModalInput::Hover, &mut stage);
        assert!(!session.visuals().unwrap().button_highlighted);
    }
}
