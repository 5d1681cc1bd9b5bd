// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Board Club

//! Webhook ingress gate.
//!
//! Every externally triggered mutation (point grants, wallet linking)
//! carries a shared secret in its body. The gate compares it against the
//! configured value before any store access; a mismatch is terminal for
//! the request and nothing is mutated. Plain equality is sufficient here,
//! the secret is a coarse deployment-level guard, not a user credential.

use crate::error::WebhookError;

/// Shared-secret check in front of all webhook mutations.
///
/// Fails closed: if no secret is configured, every webhook request is
/// rejected rather than let an unset environment open the gate.
#[derive(Debug, Clone)]
pub struct IngressGate {
    secret: Option<String>,
}

impl IngressGate {
    pub fn new(secret: Option<String>) -> Self {
        Self { secret }
    }

    /// Verify the secret presented in a webhook body.
    pub fn verify(&self, provided: Option<&str>) -> Result<(), WebhookError> {
        let Some(expected) = self.secret.as_deref() else {
            return Err(WebhookError::unauthorized("webhook ingress is not configured"));
        };

        match provided {
            Some(secret) if secret == expected => Ok(()),
            Some(_) => Err(WebhookError::unauthorized("invalid secret")),
            None => Err(WebhookError::unauthorized("missing secret")),
        }
    }
}
