//! Host platform capability port.
//!
//! The arbitrator never touches ambient platform globals; every capability is
//! probed and invoked through [`PlatformPort`], supplied by the host. The
//! port models three collaborator contracts: a direct self-information query,
//! a delegated local session that reports its result through a one-shot
//! asynchronous message, and an event broadcast channel.
//!
//! Asynchronous completions are pushed back into the arbitrator by the host
//! as [`PlatformMessage`] values; the port itself only records that the calls
//! were issued.

use serde::{Deserialize, Serialize};

use crate::player_info::{PlayerInfo, PlayerInfoUserData, SelfInformation};
use crate::stage::StagePort;

/// Application name the delegated session is started under.
pub const SESSION_APPLICATION_NAME: &str = "player-info-resolver";

/// Suffix appended to the play id to form the delegated session id.
pub const SESSION_ID_SUFFIX: &str = "__player-info-resolver";

// ---------------------------------------------------------------------------
// Session wire types
// ---------------------------------------------------------------------------

/// Start parameters delivered to the delegated session, matching the session
/// application's expected wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStartParameters {
    #[serde(rename = "type")]
    pub kind: String,
    pub parameters: SessionLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLimit {
    #[serde(rename = "limitSeconds")]
    pub limit_seconds: u32,
}

impl SessionStartParameters {
    pub fn start(limit_seconds: u32) -> Self {
        Self {
            kind: "start".to_string(),
            parameters: SessionLimit { limit_seconds },
        }
    }
}

/// Request to start the delegated local session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSessionRequest {
    pub session_id: String,
    pub application_name: String,
    pub parameters: SessionStartParameters,
}

impl LocalSessionRequest {
    pub fn new(play_id: &str, limit_seconds: u32) -> Self {
        Self {
            session_id: format!("{play_id}{SESSION_ID_SUFFIX}"),
            application_name: SESSION_APPLICATION_NAME.to_string(),
            parameters: SessionStartParameters::start(limit_seconds),
        }
    }
}

// ---------------------------------------------------------------------------
// Completion messages
// ---------------------------------------------------------------------------

/// Asynchronous platform completion, injected by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformMessage {
    /// The direct self-information query settled.
    SelfInformation(Result<SelfInformation, String>),
    /// The delegated session reported its result.
    SessionResult(PlayerInfo),
}

// ---------------------------------------------------------------------------
// Broadcast
// ---------------------------------------------------------------------------

/// Identity broadcast raised after a successful non-unnamed resolution when
/// the caller opted in via `ResolveOptions::raises`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfoRaised {
    /// The resolving player's own id, when the host exposes one.
    pub player_id: Option<String>,
    pub name: Option<String>,
    pub user_data: PlayerInfoUserData,
}

// ---------------------------------------------------------------------------
// PlatformPort
// ---------------------------------------------------------------------------

/// Host platform surface. Probe methods are synchronous capability checks;
/// effect methods issue asynchronous calls whose completions come back as
/// [`PlatformMessage`] values (or never).
pub trait PlatformPort {
    /// Whether the direct self-information API surface exists.
    fn has_user_info_api(&self) -> bool;

    /// Whether the delegated local-session API surface exists.
    fn has_local_session_api(&self) -> bool;

    /// The current play id, used to derive the delegated session id.
    fn play_id(&self) -> String;

    /// The resolving player's own id, if any (attached to broadcasts).
    fn self_player_id(&self) -> Option<String> {
        None
    }

    /// Issue the direct self-information query.
    fn request_self_information(&mut self);

    /// Start the delegated local session.
    fn start_local_session(&mut self, request: LocalSessionRequest);

    /// Tell the delegated session to exit. `needs_result` asks the platform
    /// to suppress a late session start during skip playback.
    fn exit_local_session(&mut self, session_id: &str, needs_result: bool);

    /// Broadcast a resolved identity to other observers.
    fn raise_player_info(&mut self, event: PlayerInfoRaised);
}

// ---------------------------------------------------------------------------
// HostContext
// ---------------------------------------------------------------------------

/// The two injected host ports, threaded through every arbitrator call.
pub struct HostContext<'a> {
    pub platform: &'a mut dyn PlatformPort,
    pub stage: &'a mut dyn StagePort,
}

impl<'a> HostContext<'a> {
    pub fn new(platform: &'a mut dyn PlatformPort, stage: &'a mut dyn StagePort) -> Self {
        Self { platform, stage }
    }
}
