// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Board Club

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `WEBHOOK_SECRET` | Shared secret for the webhook ingress gate | Required for webhooks |
//! | `NOTIFY_WEBHOOK_URL` | Outbound chat webhook for grant announcements | Disabled if unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

/// Environment variable name for the webhook ingress shared secret.
///
/// Every `POST /webhook/*` body must carry this value in its `secret`
/// field. If unset, the gate fails closed and all webhook requests are
/// rejected with 401.
pub const WEBHOOK_SECRET_ENV: &str = "WEBHOOK_SECRET";

/// Environment variable name for the outbound chat webhook URL.
///
/// Successful point grants post a best-effort announcement here. If
/// unset, notifications are disabled entirely.
pub const NOTIFY_WEBHOOK_URL_ENV: &str = "NOTIFY_WEBHOOK_URL";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
