// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Board Club

//! In-memory club store: points ledger, staking register, identity links.
//!
//! All three collections live behind one handle so that every mutating
//! operation runs as a single critical section under the `AppState` write
//! lock. That is what makes point grants behave like an atomic increment
//! and stake creation behave like a conditional create-if-absent, even
//! with concurrent webhook deliveries for the same wallet in flight.
//!
//! ## Collections
//!
//! - `users` — one [`UserAggregate`] per wallet, keyed by lowercased
//!   address, created implicitly on first activity
//! - `stakes` — one [`StakeRecord`] per `(collection, token_id)`; absence
//!   means unstaked
//! - `links` — reverse index from external account id to wallet; the
//!   forward direction lives on the user aggregate

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{StakeRecord, UserAggregate, WalletAddress, WalletLink};

/// Reward rate: points credited per whole hour staked.
pub const POINTS_PER_HOUR: i64 = 10;

/// Failures surfaced by store operations, mapped to HTTP statuses at the
/// handler boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("NFT {token_id} in {collection} is already staked")]
    AlreadyStaked {
        collection: String,
        token_id: String,
    },
    #[error("NFT {token_id} in {collection} is not currently staked")]
    NotStaked {
        collection: String,
        token_id: String,
    },
    #[error("no link found for wallet {0}")]
    LinkNotFoundForAddress(String),
    #[error("no wallet linked to external id {0}")]
    LinkNotFoundForExternalId(String),
}

/// Key for the staking register: one active stake per NFT, globally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StakeKey {
    collection: String,
    token_id: String,
}

#[derive(Default)]
pub struct ClubStore {
    users: HashMap<WalletAddress, UserAggregate>,
    stakes: HashMap<StakeKey, StakeRecord>,
    links: HashMap<String, WalletLink>,
}

impl ClubStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn user_mut(&mut self, address: &WalletAddress, now: DateTime<Utc>) -> &mut UserAggregate {
        self.users
            .entry(address.clone())
            .or_insert_with(|| UserAggregate::empty(address.clone(), now))
    }

    // -------------------------------------------------------------------------
    // Points ledger
    // -------------------------------------------------------------------------

    /// Apply a point delta to a wallet, creating the account if absent.
    ///
    /// The caller has already validated `delta` to be finite and nonzero.
    /// No floor is enforced on the resulting total.
    pub fn grant_points(&mut self, address: &WalletAddress, delta: f64) {
        let now = Utc::now();
        let user = self.user_mut(address, now);
        user.total_points += delta;
    }

    /// Current points total for a wallet, `0` if it has no record.
    pub fn get_points(&self, address: &WalletAddress) -> f64 {
        self.users
            .get(address)
            .map(|user| user.total_points)
            .unwrap_or(0.0)
    }

    // -------------------------------------------------------------------------
    // Staking register
    // -------------------------------------------------------------------------

    /// Stake an NFT for a wallet.
    ///
    /// The entry API makes this a conditional create-if-absent: the
    /// existence check and the insert are one operation, so two racing
    /// stake calls for the same NFT cannot both succeed.
    pub fn stake(
        &mut self,
        address: &WalletAddress,
        token_id: &str,
        collection: &str,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let key = StakeKey {
            collection: collection.to_string(),
            token_id: token_id.to_string(),
        };

        match self.stakes.entry(key) {
            Entry::Occupied(_) => Err(StoreError::AlreadyStaked {
                collection: collection.to_string(),
                token_id: token_id.to_string(),
            }),
            Entry::Vacant(vacant) => {
                vacant.insert(StakeRecord {
                    wallet_address: address.clone(),
                    token_id: token_id.to_string(),
                    collection: collection.to_string(),
                    staked_at: now,
                });
                let user = self.user_mut(address, now);
                user.staked_nfts += 1;
                Ok(())
            }
        }
    }

    /// Unstake an NFT, credit the accrued reward, and return it.
    ///
    /// The reward goes to the wallet recorded on the stake, which is the
    /// wallet that staked it. Partial hours earn nothing.
    pub fn unstake(
        &mut self,
        token_id: &str,
        collection: &str,
        now: DateTime<Utc>,
    ) -> Result<i64, StoreError> {
        let key = StakeKey {
            collection: collection.to_string(),
            token_id: token_id.to_string(),
        };

        let record = self.stakes.remove(&key).ok_or_else(|| StoreError::NotStaked {
            collection: collection.to_string(),
            token_id: token_id.to_string(),
        })?;

        let points_earned = points_for_stake(record.staked_at, now);
        let user = self.user_mut(&record.wallet_address, now);
        user.total_points += points_earned as f64;
        user.staked_nfts = user.staked_nfts.saturating_sub(1);

        Ok(points_earned)
    }

    /// Aggregate record for a wallet, or a zero-valued default if it has
    /// no prior activity. Never errors.
    pub fn get_stake_status(&self, address: &WalletAddress) -> UserAggregate {
        self.users
            .get(address)
            .cloned()
            .unwrap_or_else(|| UserAggregate::empty(address.clone(), Utc::now()))
    }

    /// Record for an active stake, if any.
    pub fn get_stake(&self, token_id: &str, collection: &str) -> Option<StakeRecord> {
        let key = StakeKey {
            collection: collection.to_string(),
            token_id: token_id.to_string(),
        };
        self.stakes.get(&key).cloned()
    }

    // -------------------------------------------------------------------------
    // Identity links
    // -------------------------------------------------------------------------

    /// Link a wallet to an external account id, last write wins.
    ///
    /// Writes both directions: `external_id` onto the user aggregate and a
    /// reverse-index entry keyed by `external_id`. A re-link drops the
    /// stale reverse entry so the two directions stay consistent.
    pub fn link(&mut self, address: &WalletAddress, external_id: &str) {
        let now = Utc::now();

        let user = self.user_mut(address, now);
        let previous = user.external_id.replace(external_id.to_string());
        user.linked_at = Some(now);

        if let Some(old_id) = previous {
            if old_id != external_id {
                self.links.remove(&old_id);
            }
        }

        self.links.insert(
            external_id.to_string(),
            WalletLink {
                external_id: external_id.to_string(),
                address: address.clone(),
                linked_at: now,
            },
        );
    }

    pub fn lookup_by_address(&self, address: &WalletAddress) -> Result<WalletLink, StoreError> {
        let user = self
            .users
            .get(address)
            .ok_or_else(|| StoreError::LinkNotFoundForAddress(address.to_string()))?;
        let external_id = user
            .external_id
            .as_ref()
            .ok_or_else(|| StoreError::LinkNotFoundForAddress(address.to_string()))?;
        self.links
            .get(external_id)
            .cloned()
            .ok_or_else(|| StoreError::LinkNotFoundForAddress(address.to_string()))
    }

    pub fn lookup_by_external_id(&self, external_id: &str) -> Result<WalletLink, StoreError> {
        self.links
            .get(external_id)
            .cloned()
            .ok_or_else(|| StoreError::LinkNotFoundForExternalId(external_id.to_string()))
    }
}

/// Reward for a stake held from `staked_at` to `now`: 10 points per whole
/// hour, partial hours truncated. Reproducible from the two timestamps
/// alone.
pub fn points_for_stake(staked_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let hours_staked = (now - staked_at).num_hours().max(0);
    hours_staked * POINTS_PER_HOUR
}
