// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use hireflow::error::{Error, Result};
use log::error;

/// Show the signed-in user.
#[derive(Debug, Parser)]
pub(crate) struct Command {}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: &super::Context) -> Result<()> {
        match ctx.store.user().await {
            Some(user) => {
                super::print_table([user]);
                Ok(())
            }
            None => {
                error!("Nobody is signed in");
                Err(Error::Command)
            }
        }
    }
}
