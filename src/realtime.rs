// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Live updates over a WebSocket, authenticated with the session token.
//!
//! The connection only exists while there is a token. The worker closes the
//! socket as soon as the session ends.

use futures_util::{future::BoxFuture, SinkExt as _, StreamExt as _};
use log::{debug, info, warn};
use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};
use tokio::{
    net::TcpStream,
    sync::{
        mpsc::{self, error::TrySendError},
        watch,
    },
};
use tokio_stream::wrappers::ReceiverStream;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{
        self,
        client::IntoClientRequest as _,
        http::{header, HeaderValue},
        Message,
    },
    MaybeTlsStream, WebSocketStream,
};
use url::Url;

use crate::error::{self, Result};

const JOIN_COMPANY: &str = "join-company";
const LEAVE_COMPANY: &str = "leave-company";

/// Events delivered but not yet read. Further events are dropped.
const EVENT_BACKLOG: usize = 64;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Event {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Debug)]
enum Command {
    Join(String),
    Leave(String),
}

impl Command {
    fn frame(&self) -> Result<String> {
        #[derive(Serialize)]
        struct Frame<'a> {
            event: &'a str,
            data: &'a str,
        }

        let frame = match self {
            Self::Join(company_id) => Frame {
                event: JOIN_COMPANY,
                data: company_id,
            },
            Self::Leave(company_id) => Frame {
                event: LEAVE_COMPANY,
                data: company_id,
            },
        };
        Ok(serde_json::to_string(&frame)?)
    }
}

/// Subscribes to or leaves company rooms on an open connection.
#[derive(Clone)]
pub struct Channel {
    tx: mpsc::Sender<Command>,
}

impl Channel {
    pub async fn join(&self, company_id: &str) -> Result<()> {
        self.tx
            .send(Command::Join(company_id.to_owned()))
            .await
            .map_err(error::Internal::from)?;
        Ok(())
    }

    pub async fn leave(&self, company_id: &str) -> Result<()> {
        self.tx
            .send(Command::Leave(company_id.to_owned()))
            .await
            .map_err(error::Internal::from)?;
        Ok(())
    }
}

pub struct Connection {
    /// Drives the socket. Must be polled (usually spawned) for anything to
    /// happen.
    pub worker: BoxFuture<'static, Result<()>>,
    pub channel: Channel,
    pub events: ReceiverStream<Event>,
}

/// The socket address for an API server: same host, `ws`/`wss` scheme, `/ws`
/// path.
pub fn endpoint(origin: &Url) -> Result<Url> {
    let mut url = origin.clone();
    let scheme = match origin.scheme() {
        "https" | "wss" => "wss",
        _ => "ws",
    };
    url.set_scheme(scheme)
        .map_err(|()| error::Api::CannotBeABase(origin.clone()))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| error::Api::CannotBeABase(origin.clone()))?;
        _ = segments.pop_if_empty().push("ws");
    }
    Ok(url)
}

/// Opens the event stream if a token is currently held.
pub async fn connect(
    origin: &Url,
    tokens: watch::Receiver<Option<SecretString>>,
) -> Result<Option<Connection>> {
    let current = tokens.borrow().clone();
    let Some(token) = current else {
        debug!("Not opening the event stream without a session");
        return Ok(None);
    };

    let url = endpoint(origin)?;
    let mut req = url.as_str().into_client_request()?;
    let bearer = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
        .map_err(|e| tungstenite::Error::HttpFormat(e.into()))?;
    _ = req.headers_mut().append(header::AUTHORIZATION, bearer);

    let (stream, _) = connect_async(req).await?;
    info!("Connected to event stream at {}", url);

    let (command_tx, command_rx) = mpsc::channel(16);
    let (event_tx, event_rx) = mpsc::channel(EVENT_BACKLOG);

    Ok(Some(Connection {
        worker: Box::pin(run(stream, command_rx, event_tx, tokens)),
        channel: Channel { tx: command_tx },
        events: ReceiverStream::new(event_rx),
    }))
}

async fn close(stream: &mut WebSocketStream<MaybeTlsStream<TcpStream>>) {
    if let Err(e) = stream.close(None).await {
        debug!("Event stream did not close cleanly: {}", e);
    }
}

async fn run(
    mut stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    mut commands: mpsc::Receiver<Command>,
    events: mpsc::Sender<Event>,
    mut tokens: watch::Receiver<Option<SecretString>>,
) -> Result<()> {
    loop {
        tokio::select! {
            changed = tokens.changed() => {
                if changed.is_err() || tokens.borrow().is_none() {
                    info!("The session ended, so we are closing the event stream");
                    close(&mut stream).await;
                    return Ok(());
                }
            }
            command = commands.recv() => match command {
                Some(command) => stream.send(Message::Text(command.frame()?)).await?,
                None => {
                    close(&mut stream).await;
                    return Ok(());
                }
            },
            message = stream.next() => match message {
                Some(Ok(Message::Text(text))) => match serde_json::from_str::<Event>(&text) {
                    Ok(event) => match events.try_send(event) {
                        Ok(()) => {}
                        Err(TrySendError::Full(event)) => {
                            warn!("Dropping event {} because nobody is reading them", event.event);
                        }
                        Err(TrySendError::Closed(_)) => {
                            debug!("Nobody is listening for events any more");
                        }
                    },
                    Err(e) => warn!("Ignoring malformed event: {}", e),
                },
                Some(Ok(Message::Close(_))) | None => return Ok(()),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
            },
        }
    }
}
