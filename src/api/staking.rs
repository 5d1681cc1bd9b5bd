// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Board Club

//! Staking endpoints: stake, unstake, and per-wallet status.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::ApiError,
    models::{StakeAction, StakingRequest, StakingResponse, UserAggregate, WalletAddress},
    state::AppState,
    store::StoreError,
};

#[utoipa::path(
    post,
    path = "/staking",
    request_body = StakingRequest,
    tag = "Staking",
    responses(
        (status = 200, description = "Action applied", body = StakingResponse),
        (status = 400, description = "Missing or malformed field"),
        (status = 404, description = "Unstake of an NFT that is not staked"),
        (status = 409, description = "Stake of an NFT that is already staked"),
    )
)]
pub async fn stake_action(
    State(state): State<AppState>,
    Json(request): Json<StakingRequest>,
) -> Result<Json<StakingResponse>, ApiError> {
    if request.wallet_address.trim().is_empty() {
        return Err(ApiError::bad_request("walletAddress is required"));
    }
    if request.token_id.trim().is_empty() {
        return Err(ApiError::bad_request("tokenId is required"));
    }
    if request.collection.trim().is_empty() {
        return Err(ApiError::bad_request("collection is required"));
    }

    let wallet = WalletAddress::from(request.wallet_address.as_str());
    let now = Utc::now();
    let mut store = state.store.write().await;

    match request.action {
        StakeAction::Stake => {
            store
                .stake(&wallet, &request.token_id, &request.collection, now)
                .map_err(|e| match e {
                    StoreError::AlreadyStaked { .. } => ApiError::conflict(e.to_string()),
                    _ => ApiError::internal(e.to_string()),
                })?;

            tracing::info!(
                wallet = %wallet,
                token_id = %request.token_id,
                collection = %request.collection,
                "NFT staked"
            );
            Ok(Json(StakingResponse {
                success: true,
                message: "NFT staked successfully".into(),
                points_earned: None,
            }))
        }
        StakeAction::Unstake => {
            let points_earned = store
                .unstake(&request.token_id, &request.collection, now)
                .map_err(|e| match e {
                    StoreError::NotStaked { .. } => ApiError::not_found(e.to_string()),
                    _ => ApiError::internal(e.to_string()),
                })?;

            tracing::info!(
                wallet = %wallet,
                token_id = %request.token_id,
                collection = %request.collection,
                points_earned,
                "NFT unstaked"
            );
            Ok(Json(StakingResponse {
                success: true,
                message: format!("NFT unstaked, {points_earned} points earned"),
                points_earned: Some(points_earned),
            }))
        }
    }
}

#[derive(Deserialize, IntoParams)]
pub struct StakeStatusQuery {
    /// Wallet address to look up.
    pub wallet: String,
}

#[utoipa::path(
    get,
    path = "/staking",
    params(StakeStatusQuery),
    tag = "Staking",
    responses((status = 200, description = "Aggregate for the wallet, zero-valued if unknown", body = UserAggregate))
)]
pub async fn stake_status(
    State(state): State<AppState>,
    Query(params): Query<StakeStatusQuery>,
) -> Result<Json<UserAggregate>, ApiError> {
    if params.wallet.trim().is_empty() {
        return Err(ApiError::bad_request("wallet is required"));
    }

    let wallet = WalletAddress::from(params.wallet.as_str());
    let store = state.store.read().await;
    Ok(Json(store.get_stake_status(&wallet)))
}
