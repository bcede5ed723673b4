// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ConnectionError {
    #[error("Handshake failed: {msg}")]
    HandshakeFailed { msg: String },
    #[error("Not connected")]
    NotConnected,
    #[error("A connection attempt is already in progress")]
    InProgress,
    #[error("Connection attempt was cancelled by a disconnect")]
    Aborted,
    #[error("{msg}")]
    Generic { msg: String },
}
