// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use core::num;

use async_trait::async_trait;
use clap::Parser;
use hireflow::{
    api::{
        jobs::{JobStatus, ListJobs, ListPublicJobs},
        Executor as _,
    },
    error::Result,
};

/// List job postings.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// Browse the public job board instead of your company's postings.
    #[arg(long)]
    public: bool,

    /// Only postings in this state. Ignored for the public board.
    #[arg(long, value_enum)]
    status: Option<JobStatus>,

    #[arg(long)]
    location: Option<String>,

    /// Only postings by this company. Public board only.
    #[arg(long)]
    company: Option<String>,

    /// The number of postings to show.
    #[arg(short, long)]
    count: Option<num::NonZeroUsize>,

    /// Free-text search.
    #[clap()]
    search: Option<String>,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: &super::Context) -> Result<()> {
        let gateway = ctx.store.gateway();
        let list = if self.public {
            ListPublicJobs {
                search: self.search,
                location: self.location,
                company: self.company,
            }
            .execute(gateway)
            .await?
        } else {
            ListJobs {
                status: self.status,
                search: self.search,
            }
            .execute(gateway)
            .await?
        };

        if !list.jobs.is_empty() {
            super::print_table(
                list.jobs
                    .into_iter()
                    .take(self.count.map_or(usize::MAX, num::NonZeroUsize::get)),
            );
        }
        Ok(())
    }
}
