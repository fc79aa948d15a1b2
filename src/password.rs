// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Asking the person at the terminal for their account password.

use std::{ffi::OsString, path::Path};

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::task;

use crate::{error::Result, metadata};

#[derive(Debug, Default, Clone)]
pub struct Request {
    account: Option<String>,
    error: Option<String>,
}

pub struct RequestBuilder {
    account: Option<String>,
    error: Option<String>,
}

impl RequestBuilder {
    pub const fn new() -> Self {
        Self {
            account: None,
            error: None,
        }
    }

    /// The email address the password belongs to.
    pub fn with_account(mut self, account: &str) -> Self {
        self.account = Some(account.to_owned());
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_owned());
        self
    }

    pub fn into_request(self) -> Request {
        Request {
            account: self.account,
            error: self.error,
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    fn label(&self) -> String {
        self.account.as_ref().map_or_else(
            || "Password".to_owned(),
            |account| format!("Password for {account}"),
        )
    }
}

#[async_trait]
pub trait Prompt: Send + Sync {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>>;
}

#[async_trait]
impl<T: Prompt + ?Sized> Prompt for Box<T> {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        (**self).prompt(req).await
    }
}

/// Tries each prompt in turn until one produces a password or fails.
#[async_trait]
impl<T: Prompt> Prompt for Vec<T> {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        for candidate in self {
            if let r @ (Ok(Some(_)) | Err(_)) = candidate.prompt(req.clone()).await {
                return r;
            }
        }

        Ok(None)
    }
}

pub struct PinentryPrompt {
    executable: Option<OsString>,
}

impl PinentryPrompt {
    pub const fn new() -> Self {
        Self { executable: None }
    }

    pub fn new_with_executable<P: AsRef<Path>>(executable: P) -> Self {
        Self {
            executable: Some(executable.as_ref().as_os_str().into()),
        }
    }
}

#[async_trait]
impl Prompt for PinentryPrompt {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        fn interact<'input>(
            mut input: pinentry::PassphraseInput<'input>,
            title: &'input str,
            label: &'input str,
            error: Option<&'input String>,
        ) -> Result<SecretString> {
            _ = input.required("You must enter your account password to sign in.");
            _ = input.with_title(title);
            _ = input.with_description(label);
            _ = input.with_prompt("Password");
            if let Some(e) = error {
                _ = input.with_error(e);
            }

            Ok(input.interact()?)
        }

        let title = format!("Sign in - {}", *metadata::CLIENT_DISPLAY_NAME);
        let label = req.label();

        let input = self
            .executable
            .as_ref()
            .and_then(pinentry::PassphraseInput::with_binary)
            .or_else(pinentry::PassphraseInput::with_default_binary)
            .map(|input| {
                task::spawn_blocking(move || interact(input, &title, &label, req.error.as_ref()))
            });

        Ok(match input {
            Some(fut) => Some(fut.await??),
            None => None,
        })
    }
}

pub struct RpasswordPrompt;

#[async_trait]
impl Prompt for RpasswordPrompt {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        if let Some(error) = &req.error {
            eprintln!("Error: {error}");
        }

        let label = format!("{}: ", req.label());
        Ok(Some(
            task::spawn_blocking(move || {
                rpassword::prompt_password(label).map(SecretString::new)
            })
            .await??,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<&'static str>);

    #[async_trait]
    impl Prompt for Fixed {
        async fn prompt(&self, _: Request) -> Result<Option<SecretString>> {
            Ok(self.0.map(|s| SecretString::new(s.to_owned())))
        }
    }

    #[tokio::test]
    async fn first_answer_wins() -> Result<()> {
        use secrecy::ExposeSecret as _;

        let prompts = vec![Fixed(None), Fixed(Some("hunter2")), Fixed(Some("other"))];
        let password = prompts.prompt(RequestBuilder::new().into_request()).await?;
        assert_eq!(
            password.as_ref().map(|p| p.expose_secret().as_str()),
            Some("hunter2")
        );
        Ok(())
    }

    #[test]
    fn label_names_the_account() {
        assert_eq!(RequestBuilder::new().into_request().label(), "Password");
        assert_eq!(
            RequestBuilder::new()
                .with_account("ada@acme.test")
                .into_request()
                .label(),
            "Password for ada@acme.test"
        );
    }
}
