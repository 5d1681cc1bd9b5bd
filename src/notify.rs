// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Board Club

//! Best-effort outbound chat notifications.
//!
//! Successful point grants post a short message to a chat webhook so the
//! community channel sees grants as they land. The post is fire-and-forget:
//! it runs on a spawned task the request path never awaits, and any failure
//! is logged and swallowed. A grant must never fail because the chat
//! webhook is down.

use serde_json::json;
use tracing::{debug, warn};

use crate::models::WalletAddress;

#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl Notifier {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url,
        }
    }

    /// Notifier that never posts anywhere. Used when no webhook URL is
    /// configured, and in tests.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Announce a point grant. Returns immediately; the HTTP post runs on
    /// its own task and its outcome never reaches the caller.
    pub fn notify_points_grant(&self, address: &WalletAddress, delta: f64, reason: Option<&str>) {
        let Some(url) = self.webhook_url.clone() else {
            return;
        };

        let text = match reason {
            Some(reason) => format!("{address} received {delta} points ({reason})"),
            None => format!("{address} received {delta} points"),
        };

        let client = self.client.clone();
        tokio::spawn(async move {
            let result = client.post(&url).json(&json!({ "content": text })).send().await;
            match result {
                Ok(response) if response.status().is_success() => {
                    debug!("points grant notification delivered");
                }
                Ok(response) => {
                    warn!(status = %response.status(), "points grant notification rejected");
                }
                Err(e) => {
                    warn!(error = %e, "points grant notification failed");
                }
            }
        });
    }
}
