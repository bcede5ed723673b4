// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::domain::conversations::models::Conversation;
use crate::domain::messaging::models::Message;
use crate::domain::messaging::services::{ChatService, ChatServiceError};
use crate::domain::shared::models::{ConversationId, UserId};
use crate::infra::rest::dtos::{
    ChatPreviewsResponse, CreateChatRequest, CreateChatResponse, ErrorResponse, MessageDto,
    SendMessageRequest,
};

pub struct RestConfig {
    pub base_url: Url,
    /// Sent as a bearer token with every request.
    pub auth_token: Option<Secret<String>>,
}

impl RestConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            auth_token: None,
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(Secret::new(token.into()));
        self
    }
}

pub struct RestChatService {
    config: RestConfig,
    client: Client,
}

impl RestChatService {
    pub fn new(config: RestConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Uses `client` for all requests. Timeouts and proxies are configured there.
    pub fn with_client(config: RestConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ChatServiceError> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ChatServiceError::InvalidResponse {
                msg: format!("{} cannot be used as a base URL", self.config.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.auth_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    async fn perform(&self, request: RequestBuilder) -> Result<Response, ChatServiceError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|err| ChatServiceError::Network {
                msg: err.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error = response
            .json::<ErrorResponse>()
            .await
            .unwrap_or_default();

        Err(ChatServiceError::Rejected {
            status: status.as_u16(),
            msg: error.into_message(status.as_u16()),
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ChatServiceError> {
        response
            .json::<T>()
            .await
            .map_err(|err| ChatServiceError::InvalidResponse {
                msg: err.to_string(),
            })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ChatService for RestChatService {
    async fn get_user_chat_previews(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Conversation>, ChatServiceError> {
        let url = self.endpoint(&["chat", user_id.as_str()])?;
        debug!("Loading chat previews from {url}…");

        let response = self.perform(self.client.get(url)).await?;
        let previews = Self::decode::<ChatPreviewsResponse>(response).await?;

        Ok(previews
            .chat_previews
            .into_iter()
            .map(Conversation::from)
            .collect())
    }

    async fn get_chat_all_messages(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, ChatServiceError> {
        let url = self.endpoint(&["chat", "messages", conversation_id.as_str()])?;
        debug!("Loading messages from {url}…");

        let response = self.perform(self.client.get(url)).await?;
        let messages = Self::decode::<Vec<MessageDto>>(response).await?;

        Ok(messages
            .into_iter()
            .map(|message| message.into_message(conversation_id))
            .collect())
    }

    async fn send_sync(
        &self,
        message: &Message,
        conversation_id: &ConversationId,
    ) -> Result<(), ChatServiceError> {
        let url = self.endpoint(&["message", "send-sync"])?;

        self.perform(self.client.post(url).json(&SendMessageRequest {
            user_id: &message.sender_id,
            chat_id: conversation_id,
            content: &message.content,
        }))
        .await?;

        Ok(())
    }

    async fn create_chat(
        &self,
        name: &str,
        member_ids: &[UserId],
    ) -> Result<ConversationId, ChatServiceError> {
        let url = self.endpoint(&["chat"])?;

        let response = self
            .perform(
                self.client
                    .post(url)
                    .json(&CreateChatRequest { name, member_ids }),
            )
            .await?;

        Ok(Self::decode::<CreateChatResponse>(response).await?.id)
    }
}
