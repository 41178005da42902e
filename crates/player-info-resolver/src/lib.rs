#![forbid(unsafe_code)]

//! Viewer-identity resolution for interactive broadcast content.
//!
//! Content running inside a live-broadcast player asks "who is watching?"
//! through one entry point, [`Arbitrator::resolve_player_info`]. The answer
//! depends on what the hosting client can do: a modern client answers a
//! direct query, an older one can delegate to a cooperative consent session,
//! an even older one gets an on-screen upgrade dialog, and when nothing at
//! all is available the resolution still succeeds with an explicit unnamed
//! outcome.
//!
//! The crate is deterministic and host-agnostic: no timers, no display tree,
//! no network. The host supplies those through two ports ([`PlatformPort`],
//! [`StagePort`]) and drives the arbitrator with frame time and injected
//! completions, so every race in here is reproducible in a test.

pub mod animation;
pub mod arbitrator;
pub mod direct_strategy;
pub mod error;
pub mod event;
pub mod fallback_strategy;
pub mod layout;
pub mod modal;
pub mod platform;
pub mod player_info;
pub mod session_strategy;
pub mod stage;
pub mod strategy;
pub mod unnamed_strategy;

#[cfg(test)]
pub mod test_support;

pub use arbitrator::{Arbitrator, ResolveCallback};
pub use error::ResolveError;
pub use event::{ResolverEvent, ResolverEventKind};
pub use modal::{ModalInput, ModalPhase, ModalSession, ModalSignal};
pub use platform::{
    HostContext, LocalSessionRequest, PlatformMessage, PlatformPort, PlayerInfoRaised,
};
pub use player_info::{
    PlayerInfo, PlayerInfoUserData, ResolveOptions, ResolverConfig, SelfInformation,
    DEFAULT_LIMIT_SECONDS,
};
pub use stage::{SceneId, StagePort};
pub use strategy::{Strategy, StrategySet};
