// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]

mod command;

use std::{path::PathBuf, process, sync::Arc, time::Duration};

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use hireflow::{
    api,
    error::Result,
    metadata,
    navigation::Announce,
    password,
    session::Data,
    storage::{self, IsPersistent as _},
    SessionStore,
};
use log::{error, warn};
use url::Url;

#[derive(Debug, Subcommand)]
enum Command {
    Login(command::login::Command),
    Register(command::register::Command),
    Logout(command::logout::Command),
    Whoami(command::whoami::Command),
    Jobs(command::jobs::Command),
    Job(command::job::Command),
    Apply(command::apply::Command),
    Leads(command::leads::Command),
    Team(command::team::Command),
    Events(command::events::Command),
}

#[async_trait]
impl command::Command for Command {
    async fn execute(self, ctx: &command::Context) -> Result<()> {
        match self {
            Self::Login(cmd) => cmd.execute(ctx).await,
            Self::Register(cmd) => cmd.execute(ctx).await,
            Self::Logout(cmd) => cmd.execute(ctx).await,
            Self::Whoami(cmd) => cmd.execute(ctx).await,
            Self::Jobs(cmd) => cmd.execute(ctx).await,
            Self::Job(cmd) => cmd.execute(ctx).await,
            Self::Apply(cmd) => cmd.execute(ctx).await,
            Self::Leads(cmd) => cmd.execute(ctx).await,
            Self::Team(cmd) => cmd.execute(ctx).await,
            Self::Events(cmd) => cmd.execute(ctx).await,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The address of the HireFlow server. API requests go to its `/api`
    /// path.
    #[arg(long, env = "HIREFLOW_API_URL", default_value = metadata::DEFAULT_API_URL, value_parser = Url::parse)]
    url: Url,

    /// The address of the web front end, used when telling you where to
    /// continue after signing in or out. Defaults to the server address.
    #[arg(long, env = "HIREFLOW_APP_URL", value_parser = Url::parse)]
    app_url: Option<Url>,

    /// Give up on API requests that take longer than this many seconds.
    #[arg(long, env = "HIREFLOW_TIMEOUT")]
    timeout: Option<u64>,

    /// Keep the session token in memory only. You will need to sign in again
    /// on every run.
    #[arg(long)]
    no_persist_token: bool,

    /// The path to the Pinentry program to use when asking for your password.
    #[arg(long, value_hint = clap::ValueHint::ExecutablePath)]
    pinentry_program: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

async fn get_token_storage(args: &Args) -> Box<dyn storage::Storage<Data>> {
    if !args.no_persist_token {
        #[cfg(feature = "secret-service")]
        match storage::SecretService::new(&args.url, metadata::TOKEN_STORAGE_KEY).await {
            Ok(secret_service_storage) => return Box::new(secret_service_storage),
            Err(e) => {
                warn!("We need to fall back to unencrypted file storage because we can't connect to the secret service: {}", e);
            }
        }

        #[cfg(feature = "keychain")]
        match storage::Keychain::new(&args.url, metadata::TOKEN_STORAGE_KEY) {
            Ok(keychain_storage) => return Box::new(keychain_storage),
            Err(e) => {
                warn!("We need to fall back to unencrypted file storage because we can't connect to Keychain: {}", e);
            }
        }

        if let Some(file_storage) = storage::File::new(&args.url, metadata::TOKEN_STORAGE_KEY) {
            return Box::new(file_storage);
        }
    }

    Box::new(storage::Memory::<Data>::new())
}

async fn run(args: Args) -> Result<()> {
    let prompt: Vec<Box<dyn password::Prompt>> = vec![
        Box::new(args.pinentry_program.clone().map_or_else(
            password::PinentryPrompt::new,
            password::PinentryPrompt::new_with_executable,
        )),
        Box::new(password::RpasswordPrompt),
    ];

    let token_storage = get_token_storage(&args).await;
    if !args.no_persist_token && !token_storage.is_persistent() {
        warn!("Your session will not be remembered because there is nowhere to store it");
    }

    let navigator = Arc::new(Announce::new(
        args.app_url.clone().unwrap_or_else(|| args.url.clone()),
    ));
    let store = SessionStore::compose(
        api::Config {
            url: args.url,
            timeout: args.timeout.map(Duration::from_secs),
        },
        token_storage,
        navigator,
    )?;
    store.initialize().await;

    let ctx = command::Context {
        store,
        prompt: Box::new(prompt),
    };
    command::Command::execute(args.command, &ctx).await
}

#[tokio::main]
async fn main() {
    let logger_env = env_logger::Env::new()
        .filter_or("HIREFLOW_LOG", "warn")
        .write_style("HIREFLOW_LOG_STYLE");
    env_logger::Builder::from_env(logger_env).init();

    if let Err(e) = run(Args::parse()).await {
        error!("We encountered an error: {}", e);
        process::exit(1);
    };
}
