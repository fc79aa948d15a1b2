// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use hireflow::{api::auth::Role, error::Result, password::Prompt, SessionStore};
use tabled::{settings::Style, Table, Tabled};

pub(crate) mod apply;
pub(crate) mod events;
pub(crate) mod job;
pub(crate) mod jobs;
pub(crate) mod leads;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod register;
pub(crate) mod team;
pub(crate) mod whoami;

/// Everything a command may need: the session and a way to ask for secrets.
pub(crate) struct Context {
    pub(crate) store: SessionStore,
    pub(crate) prompt: Box<dyn Prompt>,
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: &Context) -> Result<()>;
}

pub(crate) fn print_table<T: Tabled>(rows: impl IntoIterator<Item = T>) {
    println!("{}", Table::new(rows).with(Style::rounded()));
}

/// Parses a role given on the command line. Unlike the wire format, unknown
/// roles are refused.
pub(crate) fn parse_role(value: &str) -> Result<Role, String> {
    let role = Role::from(value.replace('-', "_"));
    match role {
        Role::Other(other) => Err(format!(
            "unknown role `{other}`; expected one of admin, employer, recruiter, hiring-manager, candidate"
        )),
        Role::Admin | Role::Employer | Role::Recruiter | Role::HiringManager | Role::Candidate => {
            Ok(role)
        }
    }
}
