// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Board Club

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::gate::IngressGate;
use crate::notify::Notifier;
use crate::store::ClubStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<ClubStore>>,
    pub gate: IngressGate,
    pub notifier: Notifier,
}

impl AppState {
    pub fn new(store: ClubStore, gate: IngressGate, notifier: Notifier) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            gate,
            notifier,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ClubStore::new(), IngressGate::new(None), Notifier::disabled())
    }
}
