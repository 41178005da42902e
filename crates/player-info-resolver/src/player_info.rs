//! Resolved-identity data model and resolution options.
//!
//! A resolution produces exactly one [`PlayerInfo`]. `name == None` means the
//! content must supply its own default name. `user_data.unnamed` marks the
//! terminal "no identity could be established at all" outcome, which is
//! distinct from `accepted == false` (an identity exists, but it is a dummy
//! string the viewer never consented to, e.g. a generated guest name).

use serde::{Deserialize, Serialize};

/// Countdown limit applied when the caller does not specify one.
pub const DEFAULT_LIMIT_SECONDS: u32 = 15;

// ---------------------------------------------------------------------------
// PlayerInfoUserData
// ---------------------------------------------------------------------------

/// Consent and account metadata attached to a resolved name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfoUserData {
    /// Whether name usage was consented to. When false, `PlayerInfo::name`
    /// holds a dummy string rather than the viewer's real name.
    pub accepted: bool,
    /// Whether the viewer holds a premium account on the host service.
    pub premium: bool,
    /// Whether this is a nameless instance (no identity at all).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unnamed: bool,
}

impl PlayerInfoUserData {
    /// Metadata for a consented real name.
    pub fn accepted(premium: bool) -> Self {
        Self {
            accepted: true,
            premium,
            unnamed: false,
        }
    }

    /// Metadata for a non-consented dummy name (guest, deadline default).
    pub fn guest() -> Self {
        Self {
            accepted: false,
            premium: false,
            unnamed: false,
        }
    }

    /// Metadata for the nameless sentinel outcome.
    ///
    /// `unnamed` always implies `accepted == false`; this constructor is the
    /// only way the crate produces an unnamed value, so the invariant holds
    /// by construction.
    pub fn unnamed() -> Self {
        Self {
            accepted: false,
            premium: false,
            unnamed: true,
        }
    }
}

// ---------------------------------------------------------------------------
// PlayerInfo
// ---------------------------------------------------------------------------

/// The single outcome of a resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// Resolved player name. `None` when no name could be obtained and the
    /// content should substitute its own default.
    pub name: Option<String>,
    /// Metadata describing how trustworthy `name` is.
    #[serde(rename = "userData")]
    pub user_data: PlayerInfoUserData,
}

impl PlayerInfo {
    /// A consented identity obtained from a platform capability.
    pub fn accepted(name: impl Into<String>, premium: bool) -> Self {
        Self {
            name: Some(name.into()),
            user_data: PlayerInfoUserData::accepted(premium),
        }
    }

    /// A dummy identity carrying a generated guest name.
    pub fn guest(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            user_data: PlayerInfoUserData::guest(),
        }
    }

    /// The default identity delivered when a delegated session misses its
    /// deadline: no name is available, consent is absent.
    pub fn deadline_default() -> Self {
        Self {
            name: None,
            user_data: PlayerInfoUserData::guest(),
        }
    }

    /// The terminal sentinel identity: no capability produced anything.
    pub fn unnamed() -> Self {
        Self {
            name: Some(String::new()),
            user_data: PlayerInfoUserData::unnamed(),
        }
    }
}

// ---------------------------------------------------------------------------
// SelfInformation
// ---------------------------------------------------------------------------

/// Payload returned by the platform's direct self-information query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfInformation {
    pub id: u64,
    pub name: String,
    #[serde(rename = "isPremium")]
    pub is_premium: bool,
    #[serde(default)]
    pub profile: String,
    #[serde(rename = "twitterId", default)]
    pub twitter_id: String,
    #[serde(default)]
    pub url: String,
}

// ---------------------------------------------------------------------------
// ResolveOptions / ResolverConfig
// ---------------------------------------------------------------------------

/// Per-call options for `resolve_player_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// When true, a successful non-unnamed outcome is broadcast to other
    /// observers after the caller's callback returns.
    #[serde(default)]
    pub raises: bool,
    /// Seconds granted for consent before a strategy gives up.
    #[serde(rename = "limitSeconds", default = "default_limit_seconds")]
    pub limit_seconds: u32,
}

fn default_limit_seconds() -> u32 {
    DEFAULT_LIMIT_SECONDS
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            raises: false,
            limit_seconds: DEFAULT_LIMIT_SECONDS,
        }
    }
}

/// Construction-time configuration for an arbitrator instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Seed for the guest-name generator. Fixed seeds make fallback names
    /// reproducible under test.
    pub guest_name_seed: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { guest_name_seed: 0 }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
