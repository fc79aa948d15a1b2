// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use futures_util::StreamExt as _;
use hireflow::{
    error::{Error, Result},
    realtime::{self, Connection},
};
use log::error;

/// Follow live updates for a company until the session ends.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The company whose updates to follow.
    #[clap()]
    company_id: String,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: &super::Context) -> Result<()> {
        let connection = realtime::connect(
            ctx.store.gateway().origin(),
            ctx.store.state().subscribe(),
        )
        .await?;

        let Some(Connection {
            worker,
            channel,
            mut events,
        }) = connection
        else {
            error!("You need to sign in to follow live updates");
            return Err(Error::Command);
        };

        let worker_task = tokio::spawn(worker);
        channel.join(&self.company_id).await?;

        while let Some(event) = events.next().await {
            println!("{}\t{}", event.event, event.data);
        }

        worker_task.await?
    }
}
