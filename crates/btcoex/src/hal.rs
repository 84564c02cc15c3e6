//! Collaborator seams consumed by the coexistence notifier.
//!
//! Each trait wraps state owned elsewhere in the driver: the power-mode
//! controller owns radio power state and the power-save flag, the peer
//! session registry owns per-peer aggregation sessions, and the strategy
//! engine is the opaque hardware-specific coexistence algorithm. The
//! notifier holds no state of its own beyond its configuration, so a fake
//! implementation of these traits is enough to test it in isolation.

use std::time::Duration;

use crate::link::{LinkContext, MacAddr, MediaStatus};

/// Requester tag passed with coexistence-originated power-mode requests,
/// for diagnostics and ownership tracking of the active power-save owner.
pub const COEX_REQUESTER: &str = "btcoex";

/// Radio power mode as far as this module is concerned.
///
/// The controller may implement finer-grained states; the notifier only
/// ever requests these two and only distinguishes "fully active" from
/// everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerMode {
    /// RF fully powered, no power saving.
    Active,
    /// Minimum-power operation under coexistence control.
    Minimum,
}

/// Power-mode controller owned by the power-management subsystem.
pub trait PowerControl {
    /// Request a transition to `mode`. `power_param` is the opaque
    /// low-power parameter from [`CoexStrategy::recommended_power_param`]
    /// (0 when leaving power save). Must be idempotent for same-mode
    /// requests. Does not block for the transition to complete.
    fn request_mode(&self, link: &LinkContext, mode: PowerMode, power_param: u8, requester: &'static str);

    /// Block until RF is confirmed powered, or until `timeout` elapses.
    /// Returns whether readiness was observed.
    fn wait_rf_on(&self, link: &LinkContext, timeout: Duration) -> bool;

    fn current_mode(&self, link: &LinkContext) -> PowerMode;

    /// Record or clear coexistence-driven power saving. Only the notifier
    /// calls this, and only after the paired [`request_mode`] was issued.
    ///
    /// [`request_mode`]: PowerControl::request_mode
    fn set_power_saving(&self, link: &LinkContext, saving: bool);
}

/// View of a registered peer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerHandle {
    /// Hardware address teardown signals are directed to. May differ from
    /// the lookup key if the registry normalizes addresses.
    pub addr: MacAddr,
}

/// Registry of associated peers and their aggregation sessions.
pub trait PeerSessions {
    fn lookup_peer(&self, link: &LinkContext, addr: MacAddr) -> Option<PeerHandle>;

    /// Send a directed teardown for any in-progress or established
    /// block-ack session with `peer` on traffic class `tid`.
    fn teardown_aggregation(&self, link: &LinkContext, tid: u8, peer: MacAddr);
}

/// Opaque hardware-specific coexistence algorithm.
pub trait CoexStrategy {
    fn on_media_status(&self, link: &LinkContext, status: MediaStatus);

    /// The adapter is about to be torn down; release coexistence-held
    /// hardware resources.
    fn on_halt(&self, link: &LinkContext);

    /// Current recommended low-power parameter, forwarded verbatim to
    /// [`PowerControl::request_mode`].
    fn recommended_power_param(&self, link: &LinkContext) -> u8;
}

/// Firmware-resource operations needed around coexistence transitions.
pub trait FirmwareControl {
    /// Deliver the reserved firmware pages an access point needs before it
    /// can operate under coexistence. Cheap and idempotent at the hardware
    /// layer.
    fn push_reserved_pages(&self, link: &LinkContext);
}
