// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use hireflow::{
    api::{
        crm::{LeadStatus, ListLeads},
        Executor as _,
    },
    error::Result,
};

/// List sales leads.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    #[arg(long, value_enum)]
    status: Option<LeadStatus>,

    /// Free-text search.
    #[clap()]
    search: Option<String>,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: &super::Context) -> Result<()> {
        let list = ListLeads {
            status: self.status,
            search: self.search,
        }
        .execute(ctx.store.gateway())
        .await?;

        if !list.leads.is_empty() {
            super::print_table(list.leads);
        }
        Ok(())
    }
}
