//! Billing
//!
//! Subscription state for a baker's account. The trial window and
//! subscription status live on [`BillingProfile`]; everything derived from
//! them (read-only mode, trial countdown) is computed on demand against an
//! injected clock, never a global one.

use std::fmt;

use humanize_duration::{Truncate, prelude::DurationExt};
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

pub mod access;

/// Where an account stands with billing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// In the free trial window
    Trial,

    /// Paying subscriber
    Active,

    /// Payment failed; awaiting retry
    PastDue,

    /// Subscription ended by the customer
    Cancelled,

    /// One-off lifetime purchase
    Lifetime,
}

impl SubscriptionStatus {
    /// Whether this status grants full access on its own, independent of the
    /// trial window.
    #[must_use]
    pub fn grants_access(self) -> bool {
        matches!(self, SubscriptionStatus::Active | SubscriptionStatus::Lifetime)
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubscriptionStatus::Trial => "trial",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::Lifetime => "lifetime",
        };

        f.write_str(label)
    }
}

/// The subscription-relevant slice of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingProfile {
    /// Current subscription status
    pub status: SubscriptionStatus,

    /// When the free trial ends (or ended)
    pub trial_ends_at: Timestamp,
}

impl BillingProfile {
    /// Time left on the trial at `now`, or `None` once it has lapsed.
    #[must_use]
    pub fn trial_remaining(&self, now: Timestamp) -> Option<SignedDuration> {
        if now > self.trial_ends_at {
            return None;
        }

        Some(self.trial_ends_at.duration_since(now))
    }

    /// Human-readable trial countdown for dashboard banners, e.g. `"6d 3h 10m"`.
    #[must_use]
    pub fn trial_remaining_human(&self, now: Timestamp) -> Option<String> {
        self.trial_remaining(now)
            .map(|remaining| remaining.unsigned_abs().human(Truncate::Minute).to_string())
    }
}
