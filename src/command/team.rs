// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use hireflow::{
    api::{
        auth::Role,
        users::{InviteUser, ListInvitations, ListUsers, RevokeInvitation},
        Executor as _,
    },
    error::Result,
};

#[derive(Debug, Subcommand)]
enum Action {
    /// List the members of your company.
    List,
    /// List outstanding invitations.
    Invitations,
    /// Invite someone to join your company.
    Invite {
        /// The role the new member gets, for example `recruiter`.
        #[arg(long, default_value = "recruiter", value_parser = super::parse_role)]
        role: Role,

        #[clap()]
        email: String,
    },
    /// Withdraw an invitation.
    Revoke {
        #[clap()]
        id: String,
    },
}

/// Manage your company's team.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    #[clap(subcommand)]
    action: Option<Action>,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: &super::Context) -> Result<()> {
        let gateway = ctx.store.gateway();
        match self.action.unwrap_or(Action::List) {
            Action::List => {
                let list = ListUsers.execute(gateway).await?;
                if !list.users.is_empty() {
                    super::print_table(list.users);
                }
            }
            Action::Invitations => {
                let list = ListInvitations.execute(gateway).await?;
                if !list.invitations.is_empty() {
                    super::print_table(list.invitations);
                }
            }
            Action::Invite { role, email } => {
                let invitation = InviteUser { email, role }.execute(gateway).await?;
                super::print_table([invitation]);
            }
            Action::Revoke { id } => {
                _ = RevokeInvitation { id }.execute(gateway).await?;
            }
        }
        Ok(())
    }
}
