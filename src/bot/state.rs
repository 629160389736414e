//! Shared in-memory bot state.
//!
//! Holds the last stored rate and the set of administrators the bot is
//! currently expecting a new rate from. The state lives for the lifetime
//! of the process and is injected into handlers as an `Arc` through
//! `dptree::deps` instead of being kept in globals.

use std::collections::HashSet;
use tokio::sync::RwLock;

/// Process-wide mutable state of the bot.
///
/// The two fields are independent: there is no invariant spanning both,
/// so they are guarded by separate locks and concurrent writers simply
/// follow last-write-wins semantics.
#[derive(Debug, Default)]
pub struct RateState {
    /// Last stored rate. Always finite when present.
    rate: RwLock<Option<f64>>,
    /// Administrators whose next text message is read as a new rate.
    /// An entry survives until that administrator sends a parseable
    /// number; there is no expiry.
    awaiting_rate: RwLock<HashSet<i64>>,
}

impl RateState {
    /// Creates an empty state: no rate stored, nobody awaited.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last stored rate, if any.
    pub async fn current_rate(&self) -> Option<f64> {
        *self.rate.read().await
    }

    /// Stores a new rate value.
    pub async fn set_rate(&self, value: f64) {
        *self.rate.write().await = Some(value);
    }

    /// Marks an administrator as expected to supply a new rate with
    /// their next text message (in any chat).
    pub async fn expect_rate_from(&self, user_id: i64) {
        self.awaiting_rate.write().await.insert(user_id);
    }

    /// Whether the administrator's next message should be read as a rate.
    pub async fn is_awaiting_rate(&self, user_id: i64) -> bool {
        self.awaiting_rate.read().await.contains(&user_id)
    }

    /// Removes the administrator from the awaiting set.
    pub async fn clear_awaiting(&self, user_id: i64) {
        self.awaiting_rate.write().await.remove(&user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rate_initially_unset() {
        let state = RateState::new();
        assert_eq!(state.current_rate().await, None);
    }

    #[tokio::test]
    async fn test_set_rate_overwrites() {
        let state = RateState::new();
        state.set_rate(94.5).await;
        assert_eq!(state.current_rate().await, Some(94.5));

        state.set_rate(100.0).await;
        assert_eq!(state.current_rate().await, Some(100.0));
    }

    #[tokio::test]
    async fn test_awaiting_lifecycle() {
        let state = RateState::new();
        assert!(!state.is_awaiting_rate(123).await);

        state.expect_rate_from(123).await;
        assert!(state.is_awaiting_rate(123).await);

        state.clear_awaiting(123).await;
        assert!(!state.is_awaiting_rate(123).await);
    }

    #[tokio::test]
    async fn test_awaiting_users_independent() {
        let state = RateState::new();
        state.expect_rate_from(111).await;

        assert!(state.is_awaiting_rate(111).await);
        assert!(!state.is_awaiting_rate(222).await);

        // Clearing a user who was never awaited is a no-op
        state.clear_awaiting(222).await;
        assert!(state.is_awaiting_rate(111).await);
    }
}
