// chatsync/chatsync-cli
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Display, Formatter};
use std::iter::once;

use chatsync_core::app::dtos::{Conversation, DeliveryState, MessageItem};

pub struct ConversationEnvelope(pub Conversation);

impl Display for ConversationEnvelope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let conversation = &self.0;
        let last_message = conversation
            .last_message
            .as_ref()
            .map(|message| format!("{}: {}", message.sender_id, message.content))
            .unwrap_or("<no messages>".to_string());

        write!(
            f,
            "{:<24} | {:>3} | {}",
            conversation.name.truncate_to(24),
            conversation.unread_count,
            last_message.truncate_to(50)
        )
    }
}

pub struct MessageEnvelope(pub MessageItem);

impl Display for MessageEnvelope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let item = &self.0;
        let sender = if item.is_mine {
            "You".to_string()
        } else {
            item.message.sender_id.to_string()
        };
        let pending = match item.delivery {
            DeliveryState::Pending => " (sending…)",
            DeliveryState::Confirmed => "",
        };

        write!(
            f,
            "{} | {:<12} | {}{}",
            item.message.timestamp.format("%Y-%m-%d %H:%M"),
            sender.truncate_to(12),
            item.message.content,
            pending
        )
    }
}

pub trait StringExt {
    fn truncate_to(&self, new_len: usize) -> String;
}

impl StringExt for String {
    fn truncate_to(&self, new_len: usize) -> String {
        let count = self.chars().count();

        if count <= new_len {
            return self.clone();
        }

        self.chars().take(new_len - 1).chain(once('…')).collect()
    }
}
