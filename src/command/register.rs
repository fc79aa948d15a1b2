// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use hireflow::{
    api::auth::{Register, Role},
    error::{self, Result},
    password::RequestBuilder,
};
use secrecy::SecretString;

/// Create an account and sign in to it.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    /// The account role, for example `candidate` or `employer`.
    #[arg(long, default_value = "candidate", value_parser = super::parse_role)]
    role: Role,

    /// The company to create. Employers only.
    #[arg(long)]
    company_name: Option<String>,

    /// Use this password instead of prompting for one.
    #[arg(long, env = "HIREFLOW_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// The email address of the new account.
    #[clap()]
    email: String,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: &super::Context) -> Result<()> {
        let password = match self.password {
            Some(password) => SecretString::new(password),
            None => ctx
                .prompt
                .prompt(RequestBuilder::new().with_account(&self.email).into_request())
                .await?
                .ok_or(error::Password::NoPrompt)?,
        };

        let user = ctx
            .store
            .register(Register {
                email: self.email,
                password,
                first_name: self.first_name,
                last_name: self.last_name,
                role: self.role,
                company_name: self.company_name,
            })
            .await?;
        println!("Registered and signed in as {} ({})", user.full_name(), user.role);
        Ok(())
    }
}
