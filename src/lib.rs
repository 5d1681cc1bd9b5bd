// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Board Club

//! Board Club - Staking & Points Service
//!
//! Bookkeeping backend for the board club community: a wallet-keyed
//! points ledger, an NFT staking register with time-based reward accrual,
//! and wallet-to-external-account identity linking, all behind a
//! shared-secret webhook gate.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `gate` - Webhook ingress shared-secret gate
//! - `store` - Points ledger, staking register, identity links
//! - `notify` - Best-effort outbound chat notifications

pub mod api;
pub mod config;
pub mod error;
pub mod gate;
pub mod models;
pub mod notify;
pub mod state;
pub mod store;
