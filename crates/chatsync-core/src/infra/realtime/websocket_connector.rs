// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error};
use url::Url;

use crate::domain::realtime::models::ConnectionError;
use crate::domain::realtime::services::{
    Connection, ConnectionEvent, ConnectionEventHandler, Connector,
};
use crate::domain::shared::models::UserId;

/// Connects to `{url}/{user_id}` using a WebSocket.
pub struct WebSocketConnector {
    url: Url,
}

impl WebSocketConnector {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    fn endpoint(&self, user_id: &UserId) -> String {
        format!("{}/{}", self.url.as_str().trim_end_matches('/'), user_id)
    }
}

#[async_trait]
impl Connector for WebSocketConnector {
    async fn connect(
        &self,
        user_id: &UserId,
        event_handler: ConnectionEventHandler,
    ) -> Result<Box<dyn Connection>, ConnectionError> {
        let endpoint = self.endpoint(user_id);
        debug!("Opening WebSocket to {endpoint}…");

        let (stream, _) =
            connect_async(endpoint)
                .await
                .map_err(|err| ConnectionError::HandshakeFailed {
                    msg: err.to_string(),
                })?;

        Ok(Box::new(WebSocketConnection::new(stream, event_handler)))
    }
}

#[derive(Debug)]
enum Outgoing {
    Frame(String),
    Close,
}

struct WebSocketConnection {
    sender: UnboundedSender<Outgoing>,
    read_handle: JoinHandle<()>,
    write_handle: JoinHandle<()>,
}

impl WebSocketConnection {
    fn new<S>(stream: S, event_handler: ConnectionEventHandler) -> Self
    where
        S: futures::Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>>
            + futures::Sink<Message, Error = tokio_tungstenite::tungstenite::Error>
            + Send
            + Unpin
            + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (mut writer, mut reader) = stream.split();

        let read_handle = task::spawn(async move {
            let mut error = None;

            while let Some(message) = reader.next().await {
                match message {
                    // Frames are awaited one by one so that the receiver sees them in order.
                    Ok(Message::Text(text)) => (event_handler)(ConnectionEvent::Frame(text)).await,
                    Ok(Message::Close(_)) => break,
                    Ok(_) => (),
                    Err(err) => {
                        error = Some(ConnectionError::Generic {
                            msg: err.to_string(),
                        });
                        break;
                    }
                }
            }

            (event_handler)(ConnectionEvent::Disconnected { error }).await
        });

        let write_handle = task::spawn(async move {
            while let Some(outgoing) = rx.recv().await {
                let message = match outgoing {
                    Outgoing::Frame(frame) => Message::Text(frame),
                    Outgoing::Close => Message::Close(None),
                };
                let is_close = message.is_close();

                if let Err(err) = writer.send(message).await {
                    error!("Cannot send frame to WebSocket: {}", err);
                    break;
                }
                if is_close {
                    break;
                }
            }
        });

        Self {
            sender: tx,
            read_handle,
            write_handle,
        }
    }
}

impl Connection for WebSocketConnection {
    fn send_frame(&self, frame: String) -> Result<()> {
        self.sender.send(Outgoing::Frame(frame))?;
        Ok(())
    }

    fn disconnect(&self) {
        if self.sender.send(Outgoing::Close).is_err() {
            self.write_handle.abort();
        }
        self.read_handle.abort();
    }
}

impl Drop for WebSocketConnection {
    fn drop(&mut self) {
        self.read_handle.abort();
    }
}
