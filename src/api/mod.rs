// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! The single HTTP client every feature area talks through.
//!
//! Endpoints are plain request-shape declarations implementing [`Endpoint`].
//! The [`Gateway`] attaches the bearer credential, hands each response to the
//! registered [`Interceptor`]s and turns failed statuses into
//! [`error::Api::Status`].

pub mod assessments;
pub mod auth;
pub mod crm;
pub mod jobs;
pub mod onboarding;
pub mod pipelines;
pub mod question_banks;
pub mod users;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use log::debug;
use reqwest::{multipart, Method, StatusCode};
use secrecy::{ExposeSecret as _, SecretString};
use serde::{de::DeserializeOwned, Serialize, Serializer};
use url::Url;

use crate::{
    error::{self, Result},
    metadata,
};

/// Response type for endpoints whose body carries nothing we use.
pub type Ignored = serde::de::IgnoredAny;

#[derive(Clone, Debug)]
pub struct Config {
    pub url: Url,
    pub timeout: Option<Duration>,
}

#[derive(Debug)]
pub enum Payload {
    Empty,
    Json(serde_json::Value),
    Multipart(multipart::Form),
}

#[derive(Debug)]
pub struct Request {
    method: Method,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    payload: Payload,
}

impl Request {
    pub fn new(method: Method, segments: &[&str]) -> Self {
        Self {
            method,
            segments: segments.iter().map(|s| (*s).to_owned()).collect(),
            query: vec![],
            payload: Payload::Empty,
        }
    }

    pub fn get(segments: &[&str]) -> Self {
        Self::new(Method::GET, segments)
    }

    pub fn post(segments: &[&str]) -> Self {
        Self::new(Method::POST, segments)
    }

    pub fn put(segments: &[&str]) -> Self {
        Self::new(Method::PUT, segments)
    }

    pub fn delete(segments: &[&str]) -> Self {
        Self::new(Method::DELETE, segments)
    }

    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.payload = Payload::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_multipart(mut self, form: multipart::Form) -> Self {
        self.payload = Payload::Multipart(form);
        self
    }

    /// Adds a query parameter when a value is present.
    pub fn with_query<V: ToString>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.query.push((key.to_owned(), value.to_string()));
        }
        self
    }

    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// The path relative to the API prefix, e.g. `jobs/public/42`.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    pub const fn json(&self) -> Option<&serde_json::Value> {
        match &self.payload {
            Payload::Json(value) => Some(value),
            Payload::Empty | Payload::Multipart(_) => None,
        }
    }
}

pub trait Endpoint {
    type Response: DeserializeOwned;

    fn into_request(self) -> Result<Request>;
}

#[async_trait]
pub trait Executor: Endpoint + Sized + Send {
    async fn execute(self, gateway: &Gateway) -> Result<Self::Response> {
        gateway.call(self).await
    }
}

impl<T: Endpoint + Send> Executor for T {}

/// Supplies the bearer credential for outgoing requests.
#[async_trait]
pub trait Credentials: Send + Sync {
    async fn bearer(&self) -> Option<SecretString>;
}

/// Never authorizes anything.
pub struct Anonymous;

#[async_trait]
impl Credentials for Anonymous {
    async fn bearer(&self) -> Option<SecretString> {
        None
    }
}

/// Observes every response before it is returned to the caller.
#[async_trait]
pub trait Interceptor: Send + Sync {
    /// `authorized` is true when the request carried a bearer credential.
    async fn on_response(&self, status: StatusCode, authorized: bool);
}

pub struct Builder {
    config: Config,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl Builder {
    #[must_use]
    pub fn interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn build(self, credentials: Arc<dyn Credentials>) -> Result<Gateway> {
        let mut http = reqwest::Client::builder().user_agent(metadata::USER_AGENT.as_str());
        if let Some(timeout) = self.config.timeout {
            http = http.timeout(timeout);
        }

        let mut base = self.config.url.clone();
        {
            let mut segments = base
                .path_segments_mut()
                .map_err(|()| error::Api::CannotBeABase(self.config.url.clone()))?;
            _ = segments.pop_if_empty().push("api");
        }

        Ok(Gateway {
            http: http.build()?,
            origin: self.config.url,
            base,
            credentials,
            interceptors: self.interceptors,
        })
    }
}

pub struct Gateway {
    http: reqwest::Client,
    origin: Url,
    base: Url,
    credentials: Arc<dyn Credentials>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl Gateway {
    pub fn builder(config: Config) -> Builder {
        Builder {
            config,
            interceptors: vec![],
        }
    }

    /// The configured server address, without the API prefix.
    pub const fn origin(&self) -> &Url {
        &self.origin
    }

    fn url_for(&self, segments: &[String]) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| error::Api::CannotBeABase(self.base.clone()))?;
            _ = path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    pub async fn call<E: Endpoint>(&self, endpoint: E) -> Result<E::Response> {
        let req = endpoint.into_request()?;
        let url = self.url_for(&req.segments)?;
        debug!("{} {}", req.method, url);

        let mut builder = self.http.request(req.method, url);
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        builder = match req.payload {
            Payload::Empty => builder,
            Payload::Json(body) => builder.json(&body),
            Payload::Multipart(form) => builder.multipart(form),
        };

        let token = self.credentials.bearer().await;
        let authorized = token.is_some();
        if let Some(token) = token {
            builder = builder.bearer_auth(token.expose_secret());
        }

        let resp = builder.send().await?;
        let status = resp.status();
        for interceptor in &self.interceptors {
            interceptor.on_response(status, authorized).await;
        }

        let body = resp.text().await?;
        if !status.is_success() {
            debug!("Request failed with {}: {}", status, body);
            return Err(error::Api::Status {
                status,
                message: error_message(&body),
            }
            .into());
        }

        decode(&body)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    if body.trim().is_empty() {
        Ok(serde_json::from_value(serde_json::Value::Null)?)
    } else {
        Ok(serde_json::from_str(body)?)
    }
}

/// Pulls the backend's explanation out of an error body, preferring `error`
/// over `message`.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(str::to_owned)
}

pub(crate) fn expose_secret<S: Serializer>(
    secret: &SecretString,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Hands out whatever token it currently holds.
    #[derive(Default)]
    pub(crate) struct StaticToken(Mutex<Option<String>>);

    impl StaticToken {
        pub(crate) fn new(token: &str) -> Self {
            Self(Mutex::new(Some(token.to_owned())))
        }
    }

    #[async_trait]
    impl Credentials for StaticToken {
        async fn bearer(&self) -> Option<SecretString> {
            self.0
                .lock()
                .ok()
                .and_then(|token| token.clone())
                .map(SecretString::new)
        }
    }

    /// Remembers every status it saw.
    #[derive(Default)]
    pub(crate) struct Seen(pub(crate) Mutex<Vec<(StatusCode, bool)>>);

    #[async_trait]
    impl Interceptor for Seen {
        async fn on_response(&self, status: StatusCode, authorized: bool) {
            if let Ok(mut seen) = self.0.lock() {
                seen.push((status, authorized));
            }
        }
    }

    pub(crate) fn gateway(
        uri: &str,
        credentials: Arc<dyn Credentials>,
        interceptors: Vec<Arc<dyn Interceptor>>,
    ) -> Gateway {
        let mut builder = Gateway::builder(Config {
            url: Url::parse(uri).expect("mock server URI parses"),
            timeout: Some(Duration::from_secs(5)),
        });
        for interceptor in interceptors {
            builder = builder.interceptor(interceptor);
        }
        builder.build(credentials).expect("gateway builds")
    }
}
