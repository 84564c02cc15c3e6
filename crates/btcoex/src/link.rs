//! Adapter-scoped link state observed by the coexistence notifier.
//!
//! The connection-management subsystem owns one [`LinkContext`] per adapter
//! and serializes notifier calls per adapter. Fields that a concurrent
//! observer may read while the owner mutates them (lifecycle flags, the
//! aggregation policy flag) use interior mutability, so the context can be
//! shared behind an `Arc` without extra locking.

use std::fmt;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// IEEE 802 hardware address of a link peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// Connectivity state reported by the connection-management subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaStatus {
    Connected,
    Disconnected,
}

/// Operating role of the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRole {
    Station,
    AccessPoint,
}

const ROLE_STATION: u8 = 0;
const ROLE_ACCESS_POINT: u8 = 1;

impl LinkRole {
    fn encode(self) -> u8 {
        match self {
            LinkRole::Station => ROLE_STATION,
            LinkRole::AccessPoint => ROLE_ACCESS_POINT,
        }
    }

    fn decode(raw: u8) -> Self {
        match raw {
            ROLE_ACCESS_POINT => LinkRole::AccessPoint,
            _ => LinkRole::Station,
        }
    }
}

/// Per-adapter link state.
///
/// The notifier reads role, lifecycle flags, and the associated peer; the
/// only field it writes is the aggregation policy flag, and only from
/// [`CoexNotifier::set_reject_aggregation`](crate::CoexNotifier::set_reject_aggregation).
pub struct LinkContext {
    name: String,
    role: AtomicU8,
    /// Hardware address of the currently associated peer (the BSS peer for
    /// a station, the single coex-relevant client for an AP). `None` while
    /// unassociated.
    peer: Mutex<Option<MacAddr>>,
    up: AtomicBool,
    surprise_removed: AtomicBool,
    accept_aggregation: AtomicBool,
}

impl LinkContext {
    /// Create a context for an adapter that has not completed bring-up.
    ///
    /// Incoming aggregation setup requests are accepted by default.
    pub fn new(name: impl Into<String>, role: LinkRole) -> Self {
        Self {
            name: name.into(),
            role: AtomicU8::new(role.encode()),
            peer: Mutex::new(None),
            up: AtomicBool::new(false),
            surprise_removed: AtomicBool::new(false),
            accept_aggregation: AtomicBool::new(true),
        }
    }

    /// Adapter name used in log fields.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> LinkRole {
        LinkRole::decode(self.role.load(Ordering::Acquire))
    }

    pub fn set_role(&self, role: LinkRole) {
        self.role.store(role.encode(), Ordering::Release);
    }

    pub fn associated_peer(&self) -> Option<MacAddr> {
        *self.peer.lock().expect("link peer lock poisoned")
    }

    pub fn set_associated_peer(&self, peer: Option<MacAddr>) {
        *self.peer.lock().expect("link peer lock poisoned") = peer;
    }

    pub fn is_up(&self) -> bool {
        self.up.load(Ordering::Acquire)
    }

    pub fn set_up(&self, up: bool) {
        self.up.store(up, Ordering::Release);
    }

    /// Whether the hardware disappeared without an orderly teardown.
    pub fn is_surprise_removed(&self) -> bool {
        self.surprise_removed.load(Ordering::Acquire)
    }

    pub fn set_surprise_removed(&self) {
        self.surprise_removed.store(true, Ordering::Release);
    }

    /// Whether incoming aggregation setup requests are currently accepted.
    pub fn accepts_aggregation(&self) -> bool {
        self.accept_aggregation.load(Ordering::Acquire)
    }

    // Release-store so an observer that sees "reject" also sees everything
    // the notifier did before flipping the flag.
    pub(crate) fn set_accept_aggregation(&self, accept: bool) {
        self.accept_aggregation.store(accept, Ordering::Release);
    }
}

impl fmt::Debug for LinkContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkContext")
            .field("name", &self.name)
            .field("role", &self.role())
            .field("peer", &self.associated_peer())
            .field("up", &self.is_up())
            .field("surprise_removed", &self.is_surprise_removed())
            .field("accept_aggregation", &self.accepts_aggregation())
            .finish()
    }
}
