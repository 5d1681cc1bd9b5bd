// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Board Club

//! # API Data Models
//!
//! This module defines the request and response data structures used by
//! the REST API. All types derive `Serialize`, `Deserialize`, and `ToSchema`
//! for automatic JSON handling and OpenAPI documentation.
//!
//! ## Wallet Address Type
//!
//! The [`WalletAddress`] newtype wraps chain addresses and normalizes them
//! to lowercase on construction, so the same wallet always resolves to the
//! same store key regardless of how the caller cased it.
//!
//! ## Model Categories
//!
//! - **User aggregate**: per-wallet points total, staked-NFT count, link
//! - **Stake records**: active stakes keyed by collection + token id
//! - **Webhook payloads**: externally triggered point grants and links

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Wallet Address Type
// =============================================================================

/// Chain-level wallet address wrapper.
///
/// Addresses are lowercased on construction. Wallets arrive from webhooks,
/// frontend calls, and admin tooling with inconsistent casing, and the
/// store keys on the address, so normalization happens here and nowhere
/// else.
///
/// # Example
///
/// ```rust,ignore
/// let addr = WalletAddress::from("0x742d35Cc6634C0532925a3b844Bc9e7595f4aB12");
/// assert_eq!(addr.as_str(), "0x742d35cc6634c0532925a3b844bc9e7595f4ab12");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WalletAddress {
    fn from(value: String) -> Self {
        WalletAddress(value.to_lowercase())
    }
}

impl From<&str> for WalletAddress {
    fn from(value: &str) -> Self {
        WalletAddress(value.to_lowercase())
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}

// =============================================================================
// User Aggregate
// =============================================================================

/// Per-wallet bookkeeping record: points total, staked-NFT count, and the
/// optional link to an external account.
///
/// Created implicitly the first time a wallet earns points, stakes, or
/// links; never deleted. `total_points` is a float because grant deltas
/// are validated only to be finite nonzero numbers, not integers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserAggregate {
    /// The wallet this record belongs to (lowercased).
    pub wallet_address: WalletAddress,
    /// Linked external account id, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Running points total. No floor is enforced; a negative grant can
    /// drive this below zero.
    pub total_points: f64,
    /// Number of currently active stakes held by this wallet.
    pub staked_nfts: u32,
    /// When this record was first created.
    pub created_at: DateTime<Utc>,
    /// When the external link was last written, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_at: Option<DateTime<Utc>>,
}

impl UserAggregate {
    /// Zero-valued record for a wallet with no prior activity.
    pub fn empty(wallet_address: WalletAddress, created_at: DateTime<Utc>) -> Self {
        Self {
            wallet_address,
            external_id: None,
            total_points: 0.0,
            staked_nfts: 0,
            created_at,
            linked_at: None,
        }
    }
}

// =============================================================================
// Stake Records
// =============================================================================

/// An active stake: one NFT held by one wallet since `staked_at`.
///
/// A given NFT (collection + token id) can be staked by at most one wallet
/// at a time, globally. Rewards are computed from `staked_at` at unstake
/// time; nothing accrues incrementally.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StakeRecord {
    /// The wallet that staked this NFT.
    pub wallet_address: WalletAddress,
    /// Token id within the collection.
    pub token_id: String,
    /// Collection identifier.
    pub collection: String,
    /// When the stake began.
    pub staked_at: DateTime<Utc>,
}

// =============================================================================
// Identity Link
// =============================================================================

/// Reverse-index record mapping an external account id back to a wallet.
///
/// Last write wins in both directions; no history is kept.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletLink {
    /// External account id (e.g. a messaging-platform user id).
    pub external_id: String,
    /// The linked wallet address (lowercased).
    pub address: WalletAddress,
    /// When this link was last written.
    pub linked_at: DateTime<Utc>,
}

// =============================================================================
// Webhook Payloads
// =============================================================================

/// Body of `POST /webhook/points`.
///
/// All fields are optional at the serde level so the gate and validation
/// layers can return the right status codes (401 for a bad secret, 400 for
/// a missing business field) instead of a generic deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PointsWebhookRequest {
    /// Shared secret; checked before anything else.
    pub secret: Option<String>,
    /// Wallet to credit.
    pub address: Option<String>,
    /// Point delta; accepted as a JSON number or a numeric string, must
    /// parse to a finite nonzero value.
    #[schema(value_type = Object)]
    pub delta: Option<serde_json::Value>,
    /// Free-text audit tag.
    pub reason: Option<String>,
}

/// Body of `POST /webhook/link`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LinkWebhookRequest {
    /// Shared secret; checked before anything else.
    pub secret: Option<String>,
    /// External account id to link.
    #[serde(rename = "externalId")]
    pub external_id: Option<String>,
    /// Wallet address to link.
    pub address: Option<String>,
}

/// Success envelope for webhook endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WebhookAck {
    pub ok: bool,
}

// =============================================================================
// Staking Endpoint Payloads
// =============================================================================

/// Action selector for `POST /staking`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StakeAction {
    Stake,
    Unstake,
}

/// Body of `POST /staking`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StakingRequest {
    pub action: StakeAction,
    pub wallet_address: String,
    pub token_id: String,
    pub collection: String,
}

/// Response of `POST /staking`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StakingResponse {
    pub success: bool,
    pub message: String,
    /// Present only on unstake: points credited for this stake.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_earned: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_address_lowercases_on_construction() {
        let from_str: WalletAddress = "0xABCdef".into();
        assert_eq!(from_str.as_str(), "0xabcdef");

        let from_string: WalletAddress = String::from("0xDEADbeef").into();
        assert_eq!(from_string.as_str(), "0xdeadbeef");

        let to_string: String = WalletAddress::from("0xFF00").into();
        assert_eq!(to_string, "0xff00");
    }

    #[test]
    fn user_aggregate_empty_is_zero_valued() {
        let now = Utc::now();
        let agg = UserAggregate::empty("0xAAA".into(), now);
        assert_eq!(agg.total_points, 0.0);
        assert_eq!(agg.staked_nfts, 0);
        assert!(agg.external_id.is_none());
        assert_eq!(agg.wallet_address.as_str(), "0xaaa");
    }

    #[test]
    fn staking_request_uses_camel_case_wire_names() {
        let body = r#"{
            "action": "unstake",
            "walletAddress": "0xAbC",
            "tokenId": "42",
            "collection": "pmbc"
        }"#;
        let request: StakingRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.action, StakeAction::Unstake);
        assert_eq!(request.wallet_address, "0xAbC");
        assert_eq!(request.token_id, "42");
    }

    #[test]
    fn staking_response_omits_points_when_absent() {
        let stake = StakingResponse {
            success: true,
            message: "staked".into(),
            points_earned: None,
        };
        let json = serde_json::to_string(&stake).unwrap();
        assert!(!json.contains("pointsEarned"));

        let unstake = StakingResponse {
            success: true,
            message: "unstaked".into(),
            points_earned: Some(30),
        };
        let json = serde_json::to_string(&unstake).unwrap();
        assert!(json.contains(r#""pointsEarned":30"#));
    }
}
