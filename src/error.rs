// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{convert::Infallible, io, result};

use reqwest::StatusCode;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

pub type Result<T, E = Error> = result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO operation failed: {0}")]
    Io(#[from] io::Error),
    #[error("HTTP transport error: {0}")]
    Http(reqwest::Error),
    #[error("WebSocket error: {0}")]
    Websocket(tokio_tungstenite::tungstenite::Error),
    #[error("JSON format error: {0}")]
    Json(serde_json::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("API error: {0}")]
    Api(#[from] Api),
    /// A login or registration attempt was refused. The message is shown to
    /// the user verbatim.
    #[error("{0}")]
    Authentication(String),
    #[error("storage error: {0}")]
    Storage(#[from] Storage),
    #[error("password retrieval error: {0}")]
    Password(#[from] Password),
    #[error("internal communication error: {0}")]
    Internal(#[from] Internal),
    #[error("command execution failed")]
    Command,
    #[error("operation cancelled")]
    Cancelled,
}

impl Error {
    /// The HTTP status the backend answered with, if this error came from a
    /// response rather than from the transport.
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api(Api::Status { status, .. }) => Some(*status),
            Self::Io(_)
            | Self::Http(_)
            | Self::Websocket(_)
            | Self::Json(_)
            | Self::Url(_)
            | Self::Api(_)
            | Self::Authentication(_)
            | Self::Storage(_)
            | Self::Password(_)
            | Self::Internal(_)
            | Self::Command
            | Self::Cancelled => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

impl From<pinentry::Error> for Error {
    fn from(value: pinentry::Error) -> Self {
        // LINT: Deliberate fall-through that should catch future cases added to
        // the enum.
        #[allow(
            clippy::wildcard_enum_match_arm,
            clippy::match_wildcard_for_single_variants
        )]
        match value {
            pinentry::Error::Cancelled | pinentry::Error::Timeout => Self::Cancelled,
            pinentry::Error::Io(e) => Self::Io(e),
            _ => Self::Password(Password::Pinentry(value)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        // LINT: Deliberate fall-through that should catch future cases added to
        // the enum.
        #[allow(clippy::wildcard_enum_match_arm)]
        match value.classify() {
            serde_json::error::Category::Io => Self::Io(value.into()),
            _ => Self::Json(value),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Io(value.into())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for Error {
    fn from(value: tokio_tungstenite::tungstenite::Error) -> Self {
        // LINT: Deliberate fall-through that should catch future cases added to
        // the enum.
        #[allow(clippy::wildcard_enum_match_arm)]
        match value {
            tokio_tungstenite::tungstenite::Error::Io(e) => Self::Io(e),
            _ => Self::Websocket(value),
        }
    }
}

impl From<Infallible> for Error {
    fn from(_: Infallible) -> Self {
        unreachable!()
    }
}

#[derive(Error, Debug)]
pub enum Api {
    #[error("server responded with {status}: {}", .message.as_deref().unwrap_or("no details given"))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("URL {0} cannot be used as a base address")]
    CannotBeABase(url::Url),
}

impl Api {
    /// The human-readable message the backend attached to a failed response.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            Self::CannotBeABase(_) => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum Storage {
    #[error("no platform data directory is available")]
    NoProjectDirs,
    #[cfg(feature = "secret-service")]
    #[error("secret service error: {0}")]
    SecretService(#[from] oo7::Error),
    #[cfg(feature = "keychain")]
    #[error("keychain error: {0}")]
    Keychain(#[from] security_framework::base::Error),
}

#[derive(Error, Debug)]
pub enum Password {
    #[error("no password prompt available")]
    NoPrompt,
    #[error("Pinentry implementation error: {0}")]
    Pinentry(pinentry::Error),
}

#[derive(Error, Debug)]
pub enum Internal {
    #[error("channel is closed")]
    ChannelClosed,
}

impl<T> From<mpsc::error::SendError<T>> for Internal {
    fn from(_: mpsc::error::SendError<T>) -> Self {
        Self::ChannelClosed
    }
}

impl From<oneshot::error::RecvError> for Internal {
    fn from(_: oneshot::error::RecvError) -> Self {
        Self::ChannelClosed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_displays_message_verbatim() {
        let err = Error::Authentication("Invalid credentials".to_owned());
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn status_is_exposed_for_api_errors_only() {
        let err = Error::from(Api::Status {
            status: StatusCode::UNAUTHORIZED,
            message: None,
        });
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));

        assert!(!Error::Command.is_unauthorized());
        assert_eq!(Error::Cancelled.status(), None);
    }

    #[test]
    fn api_status_display_falls_back_without_message() {
        let err = Api::Status {
            status: StatusCode::BAD_GATEWAY,
            message: None,
        };
        assert_eq!(
            err.to_string(),
            "server responded with 502 Bad Gateway: no details given"
        );
        assert_eq!(err.message(), None);
    }
}
