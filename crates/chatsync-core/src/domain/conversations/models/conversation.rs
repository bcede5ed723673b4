// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};
use url::Url;

use crate::domain::shared::models::{ConversationId, UserId};

/// Summary record of a conversation as shown in the conversation list.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub id: ConversationId,
    pub name: String,
    pub last_message: Option<LastMessage>,
    pub unread_count: u32,
    pub participants: Vec<Participant>,
    pub avatar: Option<Url>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LastMessage {
    pub sender_id: UserId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: UserId,
    pub name: String,
}

impl Conversation {
    /// Creates a conversation without any history.
    pub fn new(id: impl Into<ConversationId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            last_message: None,
            unread_count: 0,
            participants: vec![],
            avatar: None,
        }
    }

    /// The instant used to order conversations. Conversations without any message sort as if
    /// their last activity happened at the Unix epoch.
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_message
            .as_ref()
            .map(|message| message.timestamp)
            .unwrap_or_default()
    }

    pub fn with_last_message(
        mut self,
        sender_id: impl Into<UserId>,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        self.last_message = Some(LastMessage {
            sender_id: sender_id.into(),
            content: content.into(),
            timestamp,
        });
        self
    }

    pub fn with_participants(mut self, participants: Vec<Participant>) -> Self {
        self.participants = participants;
        self
    }
}

impl Participant {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
