// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use hireflow::{
    error::{self, Error, Result},
    password::RequestBuilder,
};
use secrecy::SecretString;

const MAX_ATTEMPTS: u32 = 3;

/// Sign in with an email address and password.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// Use this password instead of prompting for one.
    #[arg(long, env = "HIREFLOW_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// The email address of the account.
    #[clap()]
    email: String,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: &super::Context) -> Result<()> {
        if let Some(password) = self.password {
            let user = ctx
                .store
                .login(&self.email, SecretString::new(password))
                .await?;
            println!("Signed in as {} ({})", user.full_name(), user.role);
            return Ok(());
        }

        let mut req = RequestBuilder::new().with_account(&self.email);
        let mut attempt = 1;
        loop {
            let password = ctx
                .prompt
                .prompt(req.into_request())
                .await?
                .ok_or(error::Password::NoPrompt)?;

            match ctx.store.login(&self.email, password).await {
                Ok(user) => {
                    println!("Signed in as {} ({})", user.full_name(), user.role);
                    return Ok(());
                }
                Err(Error::Authentication(message)) if attempt < MAX_ATTEMPTS => {
                    attempt += 1;
                    req = RequestBuilder::new()
                        .with_account(&self.email)
                        .with_error(&message);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use hireflow::{
        api,
        navigation::{Navigator, Recorder},
        password::{Prompt, Request},
        storage::Memory,
        SessionStore,
    };
    use serde_json::json;
    use url::Url;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::command::{Command as _, Context};

    /// Answers every prompt with the same password and counts the prompts.
    #[derive(Clone, Default)]
    struct Counting(Arc<Mutex<u32>>);

    impl Counting {
        fn count(&self) -> u32 {
            self.0.lock().map(|n| *n).unwrap_or_default()
        }
    }

    #[async_trait]
    impl Prompt for Counting {
        async fn prompt(&self, _: Request) -> Result<Option<SecretString>> {
            if let Ok(mut n) = self.0.lock() {
                *n += 1;
            }
            Ok(Some(SecretString::new("wrong".to_owned())))
        }
    }

    #[tokio::test]
    async fn stops_prompting_after_the_last_attempt() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid credentials"})),
            )
            .expect(u64::from(MAX_ATTEMPTS))
            .mount(&server)
            .await;

        let store = SessionStore::compose(
            api::Config {
                url: Url::parse(&server.uri())?,
                timeout: None,
            },
            Memory::new(),
            Arc::new(Recorder::new()) as Arc<dyn Navigator>,
        )?;
        let prompt = Counting::default();
        let ctx = Context {
            store,
            prompt: Box::new(prompt.clone()),
        };

        let result = Command {
            password: None,
            email: "a@b.com".to_owned(),
        }
        .execute(&ctx)
        .await;

        assert!(matches!(result, Err(Error::Authentication(ref m)) if m == "Invalid credentials"));
        assert_eq!(prompt.count(), MAX_ATTEMPTS);
        Ok(())
    }
}
