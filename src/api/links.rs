// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Board Club

//! Identity link lookups.
//!
//! Links are written through `POST /webhook/link`; this endpoint resolves
//! them in either direction for bot and frontend callers.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::ApiError,
    models::{WalletAddress, WalletLink},
    state::AppState,
    store::StoreError,
};

#[derive(Deserialize, IntoParams)]
pub struct LinkQuery {
    /// Wallet address to resolve to an external id.
    pub address: Option<String>,
    /// External account id to resolve to a wallet.
    #[serde(rename = "externalId")]
    pub external_id: Option<String>,
}

#[utoipa::path(
    get,
    path = "/link",
    params(LinkQuery),
    tag = "Links",
    responses(
        (status = 200, description = "The link record", body = WalletLink),
        (status = 400, description = "Neither or both query parameters given"),
        (status = 404, description = "No link exists"),
    )
)]
pub async fn lookup_link(
    State(state): State<AppState>,
    Query(params): Query<LinkQuery>,
) -> Result<Json<WalletLink>, ApiError> {
    let store = state.store.read().await;

    let result = match (params.address.as_deref(), params.external_id.as_deref()) {
        (Some(address), None) => store.lookup_by_address(&WalletAddress::from(address)),
        (None, Some(external_id)) => store.lookup_by_external_id(external_id),
        _ => {
            return Err(ApiError::bad_request(
                "exactly one of address or externalId is required",
            ))
        }
    };

    result.map(Json).map_err(|e| match e {
        StoreError::LinkNotFoundForAddress(_) | StoreError::LinkNotFoundForExternalId(_) => {
            ApiError::not_found(e.to_string())
        }
        _ => ApiError::internal(e.to_string()),
    })
}
