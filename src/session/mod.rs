// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Who is signed in.
//!
//! A [`State`] is shared by the [`SessionStore`], the gateway (as its
//! credential source) and the [`ExpireOnUnauthorized`] interceptor. Only the
//! store's `initialize`, `login`, `register` and `logout`, plus the
//! interceptor, ever change it.
//!
//! The profile is held only while a token is held. `is_loading` starts true
//! and drops to false once the persisted token has been checked; it never goes
//! back.

mod data;
mod expiry;

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::lock::Mutex;
use log::{debug, warn};
use secrecy::SecretString;
use tokio::sync::{watch, OnceCell, RwLock};

pub use data::Data;
pub use expiry::ExpireOnUnauthorized;

use crate::{
    api::{
        self,
        auth::{self, AuthResponse, Register, User},
        Credentials, Endpoint, Gateway,
    },
    error::{Error, Result},
    navigation::{Destination, Navigator},
    storage::Storage,
};

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";

#[derive(Clone, Debug)]
pub struct Session {
    token: Option<SecretString>,
    user: Option<User>,
    loading: bool,
}

impl Session {
    const fn new() -> Self {
        Self {
            token: None,
            user: None,
            loading: true,
        }
    }

    pub const fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

pub struct State {
    session: RwLock<Session>,
    storage: Mutex<Box<dyn Storage<Data>>>,
    navigator: Arc<dyn Navigator>,
    token_tx: watch::Sender<Option<SecretString>>,
}

impl State {
    pub fn new<S: Storage<Data> + 'static>(storage: S, navigator: Arc<dyn Navigator>) -> Arc<Self> {
        let (token_tx, _) = watch::channel(None);
        Arc::new(Self {
            session: RwLock::new(Session::new()),
            storage: Mutex::new(Box::new(storage)),
            navigator,
            token_tx,
        })
    }

    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Follows the current token. Yields `None` once the session ends.
    pub fn subscribe(&self) -> watch::Receiver<Option<SecretString>> {
        self.token_tx.subscribe()
    }

    fn publish(&self, token: Option<SecretString>) {
        _ = self.token_tx.send_replace(token);
    }

    async fn persisted(&self) -> Result<Option<Data>> {
        self.storage.lock().await.get().await
    }

    /// Persists the token first so that a storage failure leaves the session
    /// untouched.
    async fn establish(&self, token: SecretString, user: User) -> Result<()> {
        self.storage
            .lock()
            .await
            .update(&Data::new(token.clone()))
            .await?;

        {
            let mut session = self.session.write().await;
            session.token = Some(token.clone());
            session.user = Some(user);
        }
        self.publish(Some(token));
        Ok(())
    }

    async fn discard(&self) {
        if let Err(e) = self.storage.lock().await.clear().await {
            warn!("We could not remove the stored session token: {}", e);
        }

        {
            let mut session = self.session.write().await;
            session.token = None;
            session.user = None;
        }
        self.publish(None);
    }

    fn navigate(&self, to: Destination) {
        debug!("Navigating to {}", to);
        self.navigator.navigate(to);
    }
}

#[async_trait]
impl Credentials for State {
    async fn bearer(&self) -> Option<SecretString> {
        self.session.read().await.token.clone()
    }
}

pub struct SessionStore {
    state: Arc<State>,
    gateway: Arc<Gateway>,
    initialized: OnceCell<()>,
}

impl SessionStore {
    pub fn new(state: Arc<State>, gateway: Arc<Gateway>) -> Self {
        Self {
            state,
            gateway,
            initialized: OnceCell::new(),
        }
    }

    /// Wires a store, its gateway and the expiry interceptor together.
    pub fn compose<S: Storage<Data> + 'static>(
        config: api::Config,
        storage: S,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let state = State::new(storage, navigator);
        let gateway = Gateway::builder(config)
            .interceptor(Arc::new(ExpireOnUnauthorized::new(Arc::clone(&state))))
            .build(Arc::clone(&state) as Arc<dyn Credentials>)?;
        Ok(Self::new(state, Arc::new(gateway)))
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub const fn state(&self) -> &Arc<State> {
        &self.state
    }

    pub async fn snapshot(&self) -> Session {
        self.state.snapshot().await
    }

    pub async fn is_loading(&self) -> bool {
        self.state.session.read().await.is_loading()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.session.read().await.is_authenticated()
    }

    pub async fn user(&self) -> Option<User> {
        self.state.session.read().await.user.clone()
    }

    pub async fn token(&self) -> Option<SecretString> {
        self.state.bearer().await
    }

    /// Restores the persisted session, if any. Only the first call does
    /// anything. Failures are logged and leave the session anonymous.
    pub async fn initialize(&self) {
        _ = self.initialized.get_or_init(|| self.restore()).await;
    }

    async fn restore(&self) {
        match self.state.persisted().await {
            Ok(Some(data)) => {
                let token = data.into_token();
                self.state.session.write().await.token = Some(token.clone());
                self.state.publish(Some(token));

                match self.gateway.call(auth::Me).await {
                    Ok(envelope) => {
                        let mut session = self.state.session.write().await;
                        if session.token.is_some() {
                            session.user = Some(envelope.into());
                        } else {
                            debug!("The session ended while we were validating it");
                        }
                    }
                    Err(e) => {
                        warn!("We could not validate the stored session, so we are continuing anonymously: {}", e);
                        self.state.discard().await;
                    }
                }
            }
            Ok(None) => debug!("No stored session token"),
            Err(e) => {
                warn!("We could not read the stored session, so we are continuing anonymously: {}", e);
                self.state.discard().await;
            }
        }

        self.state.session.write().await.loading = false;
    }

    pub async fn login(&self, email: &str, password: SecretString) -> Result<User> {
        self.authenticate(
            auth::Login {
                email: email.to_owned(),
                password,
            },
            LOGIN_FAILED,
        )
        .await
    }

    pub async fn register(&self, data: Register) -> Result<User> {
        self.authenticate(data, REGISTRATION_FAILED).await
    }

    async fn authenticate<E: Endpoint<Response = AuthResponse>>(
        &self,
        endpoint: E,
        fallback: &str,
    ) -> Result<User> {
        let AuthResponse { token, user } =
            self.gateway.call(endpoint).await.map_err(|err| match err {
                Error::Api(api) => {
                    Error::Authentication(api.message().unwrap_or(fallback).to_owned())
                }
                other => other,
            })?;

        self.state.establish(token, user.clone()).await?;
        self.state.navigate(Destination::for_role(&user.role));
        Ok(user)
    }

    /// Ends the session locally. Never fails; calling it again changes
    /// nothing.
    pub async fn logout(&self) {
        self.state.discard().await;
        self.state.navigate(Destination::Landing);
    }
}
