// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Board Club

//! Webhook endpoints: externally triggered point grants and wallet links.
//!
//! Both handlers run the ingress gate before touching the store, so a bad
//! secret can never mutate anything. Business-field validation comes
//! second (400), store writes last.

use axum::{extract::State, Json};

use crate::{
    error::WebhookError,
    models::{LinkWebhookRequest, PointsWebhookRequest, WalletAddress, WebhookAck},
    state::AppState,
};

/// Parse a grant delta from its wire form.
///
/// The original callers send the delta either as a JSON number or as a
/// numeric string; both are accepted. Anything that does not parse to a
/// finite nonzero value is rejected before the ledger is touched.
fn parse_delta(value: &serde_json::Value) -> Result<f64, WebhookError> {
    let delta = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match delta {
        Some(d) if d.is_finite() && d != 0.0 => Ok(d),
        _ => Err(WebhookError::bad_request(
            "delta must be a finite nonzero number",
        )),
    }
}

#[utoipa::path(
    post,
    path = "/webhook/points",
    request_body = PointsWebhookRequest,
    tag = "Webhooks",
    responses(
        (status = 200, description = "Points granted", body = WebhookAck),
        (status = 400, description = "Missing or malformed field"),
        (status = 401, description = "Missing or invalid secret"),
    )
)]
pub async fn grant_points(
    State(state): State<AppState>,
    Json(request): Json<PointsWebhookRequest>,
) -> Result<Json<WebhookAck>, WebhookError> {
    state.gate.verify(request.secret.as_deref())?;

    let address = match request.address.as_deref() {
        Some(addr) if !addr.trim().is_empty() => WalletAddress::from(addr),
        _ => return Err(WebhookError::bad_request("address is required")),
    };

    let delta = match &request.delta {
        Some(value) => parse_delta(value)?,
        None => return Err(WebhookError::bad_request("delta is required")),
    };

    state.store.write().await.grant_points(&address, delta);

    tracing::info!(
        wallet = %address,
        delta,
        reason = request.reason.as_deref().unwrap_or(""),
        "points granted"
    );
    state
        .notifier
        .notify_points_grant(&address, delta, request.reason.as_deref());

    Ok(Json(WebhookAck { ok: true }))
}

#[utoipa::path(
    post,
    path = "/webhook/link",
    request_body = LinkWebhookRequest,
    tag = "Webhooks",
    responses(
        (status = 200, description = "Wallet linked", body = WebhookAck),
        (status = 400, description = "Missing or malformed field"),
        (status = 401, description = "Missing or invalid secret"),
    )
)]
pub async fn link_wallet(
    State(state): State<AppState>,
    Json(request): Json<LinkWebhookRequest>,
) -> Result<Json<WebhookAck>, WebhookError> {
    state.gate.verify(request.secret.as_deref())?;

    let address = match request.address.as_deref() {
        Some(addr) if !addr.trim().is_empty() => WalletAddress::from(addr),
        _ => return Err(WebhookError::bad_request("address is required")),
    };

    let external_id = match request.external_id.as_deref() {
        Some(id) if !id.trim().is_empty() => id,
        _ => return Err(WebhookError::bad_request("externalId is required")),
    };

    state.store.write().await.link(&address, external_id);

    tracing::info!(wallet = %address, external_id, "wallet linked");
    Ok(Json(WebhookAck { ok: true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::IngressGate;
    use crate::notify::Notifier;
    use crate::store::ClubStore;
    use axum::http::StatusCode;
    use serde_json::json;

    fn gated_state() -> AppState {
        AppState::new(
            ClubStore::new(),
            IngressGate::new(Some("s3cret".into())),
            Notifier::disabled(),
        )
    }

    fn points_request(secret: &str, address: &str, delta: serde_json::Value) -> PointsWebhookRequest {
        PointsWebhookRequest {
            secret: Some(secret.into()),
            address: Some(address.into()),
            delta: Some(delta),
            reason: None,
        }
    }

    #[tokio::test]
    async fn grant_points_accumulates_total() {
        let state = gated_state();

        for delta in [json!(5), json!(10)] {
            let Json(ack) = grant_points(
                State(state.clone()),
                Json(points_request("s3cret", "0xAAA", delta)),
            )
            .await
            .expect("grant succeeds");
            assert!(ack.ok);
        }

        let store = state.store.read().await;
        assert_eq!(store.get_points(&"0xaaa".into()), 15.0);
    }

    #[tokio::test]
    async fn concurrent_grants_are_not_lost() {
        let state = gated_state();

        let handles: Vec<_> = [5, 10]
            .into_iter()
            .map(|delta| {
                let state = state.clone();
                tokio::spawn(async move {
                    grant_points(
                        State(state),
                        Json(points_request("s3cret", "0xaaa", json!(delta))),
                    )
                    .await
                    .expect("grant succeeds")
                })
            })
            .collect();
        for handle in handles {
            handle.await.expect("task completes");
        }

        let store = state.store.read().await;
        assert_eq!(store.get_points(&"0xaaa".into()), 15.0);
    }

    #[tokio::test]
    async fn grant_points_accepts_numeric_string_delta() {
        let state = gated_state();

        grant_points(
            State(state.clone()),
            Json(points_request("s3cret", "0xaaa", json!("7.5"))),
        )
        .await
        .expect("string delta accepted");

        let store = state.store.read().await;
        assert_eq!(store.get_points(&"0xaaa".into()), 7.5);
    }

    #[tokio::test]
    async fn grant_points_rejects_bad_secret_without_mutation() {
        let state = gated_state();

        let err = grant_points(
            State(state.clone()),
            Json(points_request("wrong", "0xaaa", json!(5))),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);

        let store = state.store.read().await;
        assert_eq!(store.get_points(&"0xaaa".into()), 0.0);
    }

    #[tokio::test]
    async fn grant_points_rejects_zero_and_non_numeric_delta() {
        let state = gated_state();

        for delta in [json!(0), json!("abc"), json!(null), json!([1])] {
            let err = grant_points(
                State(state.clone()),
                Json(points_request("s3cret", "0xaaa", delta)),
            )
            .await
            .unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
        }

        let store = state.store.read().await;
        assert_eq!(store.get_points(&"0xaaa".into()), 0.0);
    }

    #[tokio::test]
    async fn grant_points_requires_address() {
        let state = gated_state();

        let err = grant_points(
            State(state.clone()),
            Json(PointsWebhookRequest {
                secret: Some("s3cret".into()),
                address: None,
                delta: Some(json!(5)),
                reason: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn grant_points_accepts_negative_delta() {
        // No floor is enforced on the total; policy question left open.
        let state = gated_state();

        grant_points(
            State(state.clone()),
            Json(points_request("s3cret", "0xaaa", json!(-25))),
        )
        .await
        .expect("negative delta accepted");

        let store = state.store.read().await;
        assert_eq!(store.get_points(&"0xaaa".into()), -25.0);
    }

    #[tokio::test]
    async fn link_wallet_round_trips() {
        let state = gated_state();

        link_wallet(
            State(state.clone()),
            Json(LinkWebhookRequest {
                secret: Some("s3cret".into()),
                external_id: Some("discord:123".into()),
                address: Some("0xAbCd".into()),
            }),
        )
        .await
        .expect("link succeeds");

        let store = state.store.read().await;
        let link = store.lookup_by_external_id("discord:123").unwrap();
        assert_eq!(link.address.as_str(), "0xabcd");
        assert_eq!(
            store.lookup_by_address(&"0xabcd".into()).unwrap().external_id,
            "discord:123"
        );
    }

    #[tokio::test]
    async fn link_wallet_rejects_bad_secret_without_mutation() {
        let state = gated_state();

        let err = link_wallet(
            State(state.clone()),
            Json(LinkWebhookRequest {
                secret: Some("wrong".into()),
                external_id: Some("discord:123".into()),
                address: Some("0xaaa".into()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);

        let store = state.store.read().await;
        assert!(store.lookup_by_external_id("discord:123").is_err());
    }

    #[tokio::test]
    async fn link_wallet_requires_both_fields() {
        let state = gated_state();

        let err = link_wallet(
            State(state.clone()),
            Json(LinkWebhookRequest {
                secret: Some("s3cret".into()),
                external_id: None,
                address: Some("0xaaa".into()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = link_wallet(
            State(state.clone()),
            Json(LinkWebhookRequest {
                secret: Some("s3cret".into()),
                external_id: Some("discord:1".into()),
                address: Some("  ".into()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn parse_delta_edge_cases() {
        assert_eq!(parse_delta(&json!(5)).unwrap(), 5.0);
        assert_eq!(parse_delta(&json!(-3.5)).unwrap(), -3.5);
        assert_eq!(parse_delta(&json!(" 12 ")).unwrap(), 12.0);
        assert!(parse_delta(&json!(0)).is_err());
        assert!(parse_delta(&json!("0")).is_err());
        assert!(parse_delta(&json!("NaN")).is_err());
        assert!(parse_delta(&json!("inf")).is_err());
        assert!(parse_delta(&json!(true)).is_err());
        assert!(parse_delta(&json!({})).is_err());
    }
}
