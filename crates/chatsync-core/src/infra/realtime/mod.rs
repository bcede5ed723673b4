// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use frame::{decode_frame, encode_outbound_event};
pub use socket_realtime_channel::SocketRealtimeChannel;
#[cfg(not(target_arch = "wasm32"))]
pub use websocket_connector::WebSocketConnector;

mod frame;
mod socket_realtime_channel;
#[cfg(not(target_arch = "wasm32"))]
mod websocket_connector;
