// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use tracing::{debug, info};

use chatsync_proc_macros::InjectDependencies;

use crate::app::deps::{
    DynAppContext, DynClientEventDispatcher, DynConversationStore, DynMessageStream,
    DynSelectionController, DynTimeProvider,
};
use crate::client_event::MessagesEventType;
use crate::domain::conversations::repos::InboundActivity;
use crate::domain::messaging::models::Message;
use crate::domain::messaging::repos::RemoteAppend;
use crate::domain::realtime::models::RealtimeEvent;
use crate::domain::shared::models::{ConversationId, UserId};
use crate::ClientEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEventOutcome {
    Handled,
    /// The event referenced a conversation we don't know about. The previews should be
    /// refreshed.
    UnknownConversation(ConversationId),
    Ignored,
}

/// Applies decoded realtime events to the conversation store and the message stream.
#[derive(InjectDependencies)]
pub struct RealtimeEventHandler {
    #[inject]
    client_event_dispatcher: DynClientEventDispatcher,
    #[inject]
    conversation_store: DynConversationStore,
    #[inject]
    ctx: DynAppContext,
    #[inject]
    message_stream: DynMessageStream,
    #[inject]
    selection: DynSelectionController,
    #[inject]
    time_provider: DynTimeProvider,
}

impl RealtimeEventHandler {
    pub fn handle_event(&self, event: RealtimeEvent) -> InboundEventOutcome {
        match event {
            RealtimeEvent::Broadcast {
                sender_id,
                conversation_id,
                content,
            } => self.handle_broadcast(sender_id, conversation_id, content),
            RealtimeEvent::SendAck => {
                debug!("Server acknowledged a frame.");
                InboundEventOutcome::Handled
            }
            RealtimeEvent::Unknown { .. } => InboundEventOutcome::Ignored,
        }
    }

    fn handle_broadcast(
        &self,
        sender_id: UserId,
        conversation_id: ConversationId,
        content: String,
    ) -> InboundEventOutcome {
        let Ok(current_user_id) = self.ctx.current_user_id() else {
            debug!("Ignoring broadcast since no user is signed in.");
            return InboundEventOutcome::Ignored;
        };

        // Broadcasts don't carry a timestamp, so they're stamped on receipt.
        let timestamp = self.time_provider.now();

        let activity = self.conversation_store.apply_inbound_activity(
            &conversation_id,
            &sender_id,
            &content,
            timestamp,
        );

        if activity == InboundActivity::UnknownConversation {
            info!("Received message for unknown conversation {conversation_id}.");
            return InboundEventOutcome::UnknownConversation(conversation_id);
        }

        let is_active = self.selection.active().as_ref() == Some(&conversation_id);

        if sender_id == current_user_id {
            debug!("Received echo of our own message in {conversation_id}.");
        } else if is_active {
            let message = Message::new(
                sender_id,
                Some(conversation_id.clone()),
                content,
                timestamp,
            );

            match self.message_stream.append_remote(message, &current_user_id) {
                RemoteAppend::Appended => self.client_event_dispatcher.dispatch_event(
                    ClientEvent::MessagesChanged {
                        conversation_id: conversation_id.clone(),
                        r#type: MessagesEventType::Appended,
                    },
                ),
                RemoteAppend::Duplicate | RemoteAppend::Rejected => (),
            }
        } else {
            self.conversation_store.increment_unread(&conversation_id);
        }

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::ConversationsChanged);

        InboundEventOutcome::Handled
    }
}
