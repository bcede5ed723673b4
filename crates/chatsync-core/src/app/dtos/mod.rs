// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use chrono::{DateTime, Utc};
pub use url::Url;

pub use crate::domain::{
    conversations::models::{Conversation, LastMessage, Participant},
    general::models::EngineState,
    messaging::models::{DeliveryState, Message, MessageItem},
    realtime::models::{
        ConnectionError, ConnectionState, OutboundEvent, RealtimeEvent, SubscriptionId,
    },
    selection::SelectionState,
    shared::models::{ConversationId, UserId, UserIdentity},
};
