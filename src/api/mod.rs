// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Board Club

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        LinkWebhookRequest, PointsWebhookRequest, StakeAction, StakeRecord, StakingRequest,
        StakingResponse, UserAggregate, WalletAddress, WalletLink, WebhookAck,
    },
    state::AppState,
};

pub mod health;
pub mod links;
pub mod staking;
pub mod webhooks;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/webhook/points", post(webhooks::grant_points))
        .route("/webhook/link", post(webhooks::link_wallet))
        .route(
            "/staking",
            post(staking::stake_action).get(staking::stake_status),
        )
        .route("/link", get(links::lookup_link))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state);

    routes
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        webhooks::grant_points,
        webhooks::link_wallet,
        staking::stake_action,
        staking::stake_status,
        links::lookup_link,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            WalletAddress,
            UserAggregate,
            StakeRecord,
            WalletLink,
            StakeAction,
            StakingRequest,
            StakingResponse,
            PointsWebhookRequest,
            LinkWebhookRequest,
            WebhookAck
        )
    ),
    tags(
        (name = "Webhooks", description = "Externally triggered point grants and wallet links"),
        (name = "Staking", description = "NFT staking register and reward accrual"),
        (name = "Links", description = "Wallet to external account resolution"),
        (name = "Health", description = "Liveness probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(AppState::default());
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }
}
