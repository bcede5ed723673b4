// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::conversations::models::{Conversation, LastMessage, Participant};
use crate::domain::messaging::models::Message;
use crate::domain::shared::models::{ConversationId, UserId};

#[derive(Deserialize, Debug)]
pub(super) struct ChatPreviewsResponse {
    #[serde(default)]
    pub chat_previews: Vec<ChatPreviewDto>,
}

#[derive(Deserialize, Debug)]
pub(super) struct ChatPreviewDto {
    pub chat_id: ConversationId,
    pub name: String,
    #[serde(default)]
    pub last_message: Option<MessageDto>,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub participants: Vec<ParticipantDto>,
}

#[derive(Deserialize, Debug)]
pub(super) struct ParticipantDto {
    pub user_id: UserId,
    pub username: String,
}

#[derive(Deserialize, Debug)]
pub(super) struct MessageDto {
    #[serde(alias = "sender_id")]
    pub user_id: UserId,
    #[serde(default)]
    pub chat_id: Option<ConversationId>,
    #[serde(alias = "text")]
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Serialize, Debug)]
pub(super) struct SendMessageRequest<'a> {
    pub user_id: &'a UserId,
    pub chat_id: &'a ConversationId,
    pub content: &'a str,
}

#[derive(Serialize, Debug)]
pub(super) struct CreateChatRequest<'a> {
    pub name: &'a str,
    pub member_ids: &'a [UserId],
}

#[derive(Deserialize, Debug)]
pub(super) struct CreateChatResponse {
    pub id: ConversationId,
}

#[derive(Deserialize, Debug, Default)]
pub(super) struct ErrorResponse {
    pub message: Option<String>,
    pub error: Option<String>,
}

/// Missing or malformed timestamps are treated as the Unix epoch.
fn parse_timestamp(timestamp: Option<&str>) -> DateTime<Utc> {
    timestamp
        .and_then(|timestamp| DateTime::parse_from_rfc3339(timestamp).ok())
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .unwrap_or_default()
}

impl From<ChatPreviewDto> for Conversation {
    fn from(value: ChatPreviewDto) -> Self {
        Conversation {
            id: value.chat_id,
            name: value.name,
            last_message: value.last_message.map(|message| LastMessage {
                timestamp: parse_timestamp(message.timestamp.as_deref()),
                sender_id: message.user_id,
                content: message.content,
            }),
            unread_count: value.unread_count,
            participants: value
                .participants
                .into_iter()
                .map(|participant| Participant::new(participant.user_id, participant.username))
                .collect(),
            avatar: value
                .avatar_url
                .and_then(|avatar_url| Url::parse(&avatar_url).ok()),
        }
    }
}

impl MessageDto {
    pub fn into_message(self, conversation_id: &ConversationId) -> Message {
        Message::new(
            self.user_id,
            Some(self.chat_id.unwrap_or_else(|| conversation_id.clone())),
            self.content,
            parse_timestamp(self.timestamp.as_deref()),
        )
    }
}

impl ErrorResponse {
    pub fn into_message(self, status: u16) -> String {
        self.message
            .or(self.error)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP {status}"))
    }
}
