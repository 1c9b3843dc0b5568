//! Access Resolution
//!
//! Pure derivation of read-only mode from a [`BillingProfile`] and an
//! explicit point in time.

use jiff::Timestamp;

use crate::billing::BillingProfile;

/// Derived access state for an account at a point in time.
///
/// Current product rule: `read_only` requires the trial to have lapsed, so a
/// `past_due` or `cancelled` account keeps full access until its trial end
/// date passes. If that rule ever changes, this derivation is the one place
/// to change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessResolution {
    /// The trial window has lapsed
    pub trial_expired: bool,

    /// The subscription grants access regardless of the trial
    pub active_subscription: bool,

    /// Creates, updates and deletes are blocked
    pub read_only: bool,
}

impl AccessResolution {
    /// Whether the account may create, update or delete records.
    #[must_use]
    pub fn allows_writes(&self) -> bool {
        !self.read_only
    }
}

/// Resolves the access state for a profile at `now`.
///
/// An `active` or `lifetime` subscription is never read-only, regardless of
/// the trial end date.
#[must_use]
pub fn resolve_access(profile: &BillingProfile, now: Timestamp) -> AccessResolution {
    let trial_expired = now > profile.trial_ends_at;
    let active_subscription = profile.status.grants_access();

    AccessResolution {
        trial_expired,
        active_subscription,
        read_only: trial_expired && !active_subscription,
    }
}
