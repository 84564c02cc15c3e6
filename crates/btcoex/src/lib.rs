//! btcoex: WLAN/Bluetooth coexistence notifier.
//!
//! Coordinates radio power state and link-layer aggregation between a WLAN
//! adapter and a co-located short-range radio sharing the same antenna.
//! The connection-management subsystem calls one [`CoexNotifier`] entry
//! point per lifecycle event; the notifier enforces the safety ordering
//! around power transitions and aggregation toggles and delegates the
//! actual coexistence policy to an opaque [`CoexStrategy`] engine.

mod hal;
mod link;
mod notifier;

pub use hal::{
    COEX_REQUESTER, CoexStrategy, FirmwareControl, PeerHandle, PeerSessions, PowerControl,
    PowerMode,
};
pub use link::{LinkContext, LinkRole, MacAddr, MediaStatus};
pub use notifier::{CoexConfig, CoexNotifier, DEFAULT_RF_ON_TIMEOUT};
