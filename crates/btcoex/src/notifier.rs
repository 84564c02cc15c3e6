//! Coexistence notifier - translates driver lifecycle events into strategy
//! engine notifications and safety-ordered power/aggregation calls.
//!
//! All entry points run synchronously on the caller's thread, under
//! whatever serialization the connection-management subsystem already
//! holds per adapter. The notifier owns no background task, timer, or
//! state machine; the only blocking operation is the bounded RF-ready
//! wait in [`CoexNotifier::power_save_leave`].
//!
//! Ordering invariants enforced here rather than left to statement order:
//! - reserved firmware pages are pushed before the strategy engine learns
//!   of an AP-side connect;
//! - the aggregation policy flag flips to "reject" before the peer lookup,
//!   so a setup request racing the lookup is already refused;
//! - the power-save flag changes only after the paired mode request was
//!   issued.

use std::time::Duration;

use crate::hal::{COEX_REQUESTER, CoexStrategy, FirmwareControl, PeerSessions, PowerControl, PowerMode};
use crate::link::{LinkContext, LinkRole, MediaStatus};

/// Default bound for the RF-ready wait when leaving power save.
///
/// The reference hardware uses a raw literal of 100 with no documented
/// unit; treat the bound as configuration rather than a constant of the
/// protocol.
pub const DEFAULT_RF_ON_TIMEOUT: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct CoexConfig {
    /// Upper bound on the blocking RF-ready wait in
    /// [`CoexNotifier::power_save_leave`].
    pub rf_on_timeout: Duration,
}

impl Default for CoexConfig {
    fn default() -> Self {
        Self {
            rf_on_timeout: DEFAULT_RF_ON_TIMEOUT,
        }
    }
}

/// Entry points the connection-management subsystem calls on behalf of
/// coexistence logic.
///
/// Generic over the collaborator seams so tests can substitute recording
/// fakes. None of the entry points returns an error: guard conditions
/// (adapter not up, peer not found, mode already active) are legitimate
/// no-op branches, and the one fallible step - the RF-ready wait - degrades
/// to a logged timeout.
pub struct CoexNotifier<P, R, S, F> {
    power: P,
    peers: R,
    strategy: S,
    firmware: F,
    config: CoexConfig,
}

impl<P, R, S, F> CoexNotifier<P, R, S, F>
where
    P: PowerControl,
    R: PeerSessions,
    S: CoexStrategy,
    F: FirmwareControl,
{
    pub fn new(power: P, peers: R, strategy: S, firmware: F) -> Self {
        Self::with_config(power, peers, strategy, firmware, CoexConfig::default())
    }

    pub fn with_config(power: P, peers: R, strategy: S, firmware: F, config: CoexConfig) -> Self {
        Self {
            power,
            peers,
            strategy,
            firmware,
            config,
        }
    }

    /// Notify coexistence logic of a connectivity change.
    ///
    /// An access point that just connected gets its reserved firmware pages
    /// pushed before the strategy engine hears about the status change; the
    /// engine may adjust firmware-dependent behavior in response, so the
    /// push must already have happened.
    pub fn media_status(&self, link: &LinkContext, status: MediaStatus) {
        if status == MediaStatus::Connected && link.role() == LinkRole::AccessPoint {
            tracing::debug!(link = %link.name(), "Pushing reserved firmware pages for AP coexistence");
            self.firmware.push_reserved_pages(link);
        }

        tracing::debug!(link = %link.name(), ?status, "Notifying coex strategy of media status");
        self.strategy.on_media_status(link, status);
    }

    /// Notify coexistence logic that the adapter is about to halt.
    ///
    /// Safe to call repeatedly and during teardown races: an adapter that
    /// never finished bring-up, or whose hardware was surprise-removed, is
    /// skipped without touching the strategy engine.
    pub fn halt(&self, link: &LinkContext) {
        if !link.is_up() || link.is_surprise_removed() {
            tracing::trace!(link = %link.name(), "Skipping coex halt notify for torn-down adapter");
            return;
        }

        tracing::debug!(link = %link.name(), "Notifying coex strategy of halt");
        self.strategy.on_halt(link);
    }

    /// Start or stop rejecting incoming aggregation setup requests.
    ///
    /// When rejection starts, any block-ack session already negotiated with
    /// the associated peer is torn down as well.
    pub fn set_reject_aggregation(&self, link: &LinkContext, enable: bool) {
        if !enable {
            link.set_accept_aggregation(true);
            return;
        }

        // Flag first: a setup request arriving between the flag store and
        // the peer lookup must already be refused.
        link.set_accept_aggregation(false);

        let Some(peer_addr) = link.associated_peer() else {
            tracing::trace!(link = %link.name(), "No associated peer, skipping block-ack teardown");
            return;
        };

        if let Some(session) = self.peers.lookup_peer(link, peer_addr) {
            tracing::debug!(link = %link.name(), peer = %session.addr, "Tearing down block-ack session");
            self.peers.teardown_aggregation(link, 0, session.addr);
        }
    }

    /// Enter coexistence-driven power saving.
    ///
    /// Issues the minimum-power request and records intent; does not wait
    /// for the transition. Re-entry just re-queries the parameter and
    /// re-issues the request, which the controller treats as idempotent.
    pub fn power_save_enter(&self, link: &LinkContext) {
        let param = self.strategy.recommended_power_param(link);
        tracing::debug!(link = %link.name(), param, "Entering coex power save");
        self.power.request_mode(link, PowerMode::Minimum, param, COEX_REQUESTER);

        // Flag only after the request is in flight, so an observer never
        // sees power saving recorded before the hardware was asked.
        self.power.set_power_saving(link, true);
    }

    /// Leave coexistence-driven power saving.
    ///
    /// Requests the active transition only when one is needed, and waits -
    /// bounded by [`CoexConfig::rf_on_timeout`] - for RF to come on. A
    /// timeout is logged and otherwise ignored: the power-save flag is
    /// cleared in every branch, and persistent hardware failure is the
    /// power controller's to escalate.
    pub fn power_save_leave(&self, link: &LinkContext) {
        if self.power.current_mode(link) != PowerMode::Active {
            tracing::debug!(link = %link.name(), "Leaving coex power save");
            self.power.request_mode(link, PowerMode::Active, 0, COEX_REQUESTER);

            if !self.power.wait_rf_on(link, self.config.rf_on_timeout) {
                tracing::warn!(
                    link = %link.name(),
                    timeout = ?self.config.rf_on_timeout,
                    "RF-on confirmation timed out after leaving power save"
                );
            }
        }

        self.power.set_power_saving(link, false);
    }
}
