// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::shared::models::{ConversationId, UserId};

/// Decoded inbound frame of the realtime channel.
#[derive(Debug, Clone, PartialEq)]
pub enum RealtimeEvent {
    /// A new message was posted to a conversation.
    Broadcast {
        sender_id: UserId,
        conversation_id: ConversationId,
        content: String,
    },
    /// The server acknowledged a frame we sent.
    SendAck,
    /// Anything we could not make sense of. Carries the raw frame for logging.
    Unknown { raw: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutboundEvent {
    SendMessage {
        sender_id: UserId,
        conversation_id: ConversationId,
        content: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);
