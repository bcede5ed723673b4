// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::realtime::models::{OutboundEvent, RealtimeEvent};
use crate::domain::shared::models::{ConversationId, UserId};

const BROADCAST: &str = "broadcast";
const SEND_MESSAGE: &str = "send_message";
const SEND_ACK: &str = "send_ack";

#[derive(Deserialize)]
struct InboundFrame {
    #[serde(alias = "operationType", alias = "type")]
    operation_type: String,
    #[serde(default, alias = "payload", alias = "body")]
    data: Value,
}

#[derive(Deserialize)]
struct BroadcastPayload {
    #[serde(alias = "sender_id", alias = "senderId")]
    user_id: UserId,
    #[serde(alias = "conversation_id", alias = "conversationId")]
    chat_id: ConversationId,
    content: String,
}

#[derive(Serialize)]
struct OutboundFrame<'a> {
    id: u64,
    operation: &'a str,
    body: OutboundBody<'a>,
}

#[derive(Serialize)]
struct OutboundBody<'a> {
    user_id: &'a UserId,
    chat_id: &'a ConversationId,
    content: &'a str,
}

/// Decodes a raw frame into one of the known event kinds. Never fails, frames that cannot be
/// understood become `RealtimeEvent::Unknown`.
pub fn decode_frame(raw: &str) -> RealtimeEvent {
    let unknown = || RealtimeEvent::Unknown {
        raw: raw.to_string(),
    };

    let Ok(frame) = serde_json::from_str::<InboundFrame>(raw) else {
        return unknown();
    };

    match frame.operation_type.as_str() {
        BROADCAST => match serde_json::from_value::<BroadcastPayload>(frame.data) {
            Ok(payload) => RealtimeEvent::Broadcast {
                sender_id: payload.user_id,
                conversation_id: payload.chat_id,
                content: payload.content,
            },
            Err(_) => unknown(),
        },
        SEND_MESSAGE | SEND_ACK => RealtimeEvent::SendAck,
        _ => unknown(),
    }
}

pub fn encode_outbound_event(id: u64, event: &OutboundEvent) -> serde_json::Result<String> {
    match event {
        OutboundEvent::SendMessage {
            sender_id,
            conversation_id,
            content,
        } => serde_json::to_string(&OutboundFrame {
            id,
            operation: SEND_MESSAGE,
            body: OutboundBody {
                user_id: sender_id,
                chat_id: conversation_id,
                content,
            },
        }),
    }
}
