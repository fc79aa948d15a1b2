// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use hireflow::{
    api::{auth, Executor as _},
    error::Result,
};
use log::info;

/// Sign out and forget the stored token.
#[derive(Debug, Parser)]
pub(crate) struct Command {}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: &super::Context) -> Result<()> {
        if ctx.store.is_authenticated().await {
            if let Err(e) = auth::Logout.execute(ctx.store.gateway()).await {
                info!("The server did not acknowledge the logout: {}", e);
            }
        }

        ctx.store.logout().await;
        Ok(())
    }
}
