//! Session state
//!
//! One mutable record per run. Fields are private; the [`crate::Navigator`]
//! is the only writer and everything else reads through the getters.

use oxygen_domain::{ClusterId, Identity, Screen, TrustScore};

/// Everything threaded between screens
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub(crate) screen: Screen,
    pub(crate) identity: Option<Identity>,
    pub(crate) selected_cluster_id: ClusterId,
    pub(crate) cluster_opened_from: Option<Screen>,
    pub(crate) logo_tap_count: u32,
    pub(crate) last_tap_ms: Option<u64>,
    pub(crate) trust_score: TrustScore,
}

impl Session {
    /// A fresh session on the landing screen
    pub fn new(trust_score: TrustScore) -> Self {
        Self {
            screen: Screen::Landing,
            identity: None,
            selected_cluster_id: ClusterId::default(),
            cluster_opened_from: None,
            logo_tap_count: 0,
            last_tap_ms: None,
            trust_score,
        }
    }

    /// Current screen
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Registered identity, once registration completes
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Last cluster viewed or joined; empty until one is chosen
    pub fn selected_cluster_id(&self) -> &ClusterId {
        &self.selected_cluster_id
    }

    /// Screen the cluster detail was opened from
    pub fn cluster_opened_from(&self) -> Option<Screen> {
        self.cluster_opened_from
    }

    /// Logo taps counted in the current gesture
    pub fn logo_tap_count(&self) -> u32 {
        self.logo_tap_count
    }

    /// Time of the last logo tap, if any
    pub fn last_tap_ms(&self) -> Option<u64> {
        self.last_tap_ms
    }

    /// Trust score every eligibility rule reads
    pub fn trust_score(&self) -> TrustScore {
        self.trust_score
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(TrustScore::SEED)
    }
}
