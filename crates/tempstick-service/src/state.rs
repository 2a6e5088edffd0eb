//! Shared application state.

use std::sync::Arc;

use tempstick_core::{Gateway, ThresholdPolicy};

/// State shared by all request handlers.
///
/// There is no mutable state across requests: the gateway client is a cheap
/// clone around a connection pool, and the policy is process-wide immutable
/// configuration. Every request evaluates fresh data.
#[derive(Debug, Clone)]
pub struct AppState {
    pub gateway: Gateway,
    pub policy: ThresholdPolicy,
}

impl AppState {
    /// Wrap a gateway client with the canonical threshold policy.
    pub fn new(gateway: Gateway) -> Arc<Self> {
        Arc::new(Self {
            gateway,
            policy: ThresholdPolicy::default(),
        })
    }
}
