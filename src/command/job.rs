// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use hireflow::{
    api::{
        jobs::{GetJob, GetPublicJob},
        Executor as _,
    },
    error::Result,
};

/// Show a single job posting with its description.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// Look the posting up among your company's postings, including drafts.
    #[arg(long)]
    own: bool,

    #[clap()]
    id: String,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: &super::Context) -> Result<()> {
        let gateway = ctx.store.gateway();
        let job = if self.own {
            GetJob { id: self.id }.execute(gateway).await?
        } else {
            GetPublicJob { id: self.id }.execute(gateway).await?
        };

        let description = job.description.clone();
        super::print_table([job]);
        if !description.is_empty() {
            println!("\n{description}");
        }
        Ok(())
    }
}
