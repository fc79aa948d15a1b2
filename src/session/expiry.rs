// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;
use log::warn;
use reqwest::StatusCode;

use crate::{api::Interceptor, navigation::Destination};

use super::State;

/// Signs the user out and sends them to the login page whenever an
/// authorized request comes back 401, whichever feature area issued it.
pub struct ExpireOnUnauthorized {
    state: Arc<State>,
}

impl ExpireOnUnauthorized {
    pub fn new(state: Arc<State>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Interceptor for ExpireOnUnauthorized {
    async fn on_response(&self, status: StatusCode, authorized: bool) {
        if status != StatusCode::UNAUTHORIZED || !authorized {
            return;
        }

        warn!("The server rejected our credentials, so we are signing out");
        self.state.discard().await;
        self.state.navigate(Destination::Login);
    }
}
