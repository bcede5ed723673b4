// chatsync/chatsync-cli
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::env;

use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing_subscriber::EnvFilter;
use url::Url;

use chatsync_core::app::dtos::{ConversationId, UserId, UserIdentity};
use chatsync_core::transports::{RestChatService, RestConfig, WebSocketConnector};
use chatsync_core::{ClientDelegate, ClientEvent, ConnectionEvent, MessagesEventType, SyncEngine};

use crate::type_display::{ConversationEnvelope, MessageEnvelope};

mod type_display;

struct CliConfig {
    api_url: Url,
    ws_url: Url,
    identity: UserIdentity,
    token: Option<String>,
}

fn env_var(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("Missing '{name}' in the environment or .env"))
}

fn load_config() -> Result<CliConfig> {
    // A .env file is optional, the variables might be set already.
    _ = dotenvy::dotenv();

    let user_id = env_var("CHATSYNC_USER_ID")?;
    let username = env::var("CHATSYNC_USERNAME").unwrap_or(user_id.clone());

    Ok(CliConfig {
        api_url: Url::parse(&env_var("CHATSYNC_API_URL")?).context("Invalid CHATSYNC_API_URL")?,
        ws_url: Url::parse(&env_var("CHATSYNC_WS_URL")?).context("Invalid CHATSYNC_WS_URL")?,
        identity: UserIdentity::new(user_id, username),
        token: env::var("CHATSYNC_TOKEN").ok(),
    })
}

fn enable_logging() {
    let appender = tracing_appender::rolling::never("logs", "chatsync-cli.log");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(appender)
        .with_ansi(false)
        .init();
}

async fn configure_engine() -> Result<SyncEngine> {
    let config = load_config()?;

    let mut rest_config = RestConfig::new(config.api_url);
    if let Some(token) = config.token {
        rest_config = rest_config.with_auth_token(token);
    }

    let engine = SyncEngine::builder()
        .set_chat_service(RestChatService::new(rest_config))
        .set_connector(WebSocketConnector::new(config.ws_url))
        .set_delegate(Some(Box::new(Delegate {})))
        .build();

    println!("Signing in as {}…", config.identity.username);
    match engine.initialize(config.identity).await {
        Ok(()) => println!("Done."),
        Err(err) => println!("Signed in with limitations. {err}"),
    }

    Ok(engine)
}

struct Delegate {}

impl ClientDelegate for Delegate {
    fn handle_event(&self, engine: SyncEngine, event: ClientEvent) {
        match event {
            ClientEvent::MessagesChanged {
                r#type: MessagesEventType::Appended,
                ..
            } => {
                let Some(item) = engine.messages().pop() else {
                    return;
                };
                if !item.is_mine {
                    println!("\nReceived message:\n{}", MessageEnvelope(item));
                }
            }
            ClientEvent::ConnectionStatusChanged {
                event: ConnectionEvent::Disconnect { error: Some(error) },
            } => {
                println!("\nRealtime connection lost. {error}");
            }
            _ => (),
        }
    }
}

fn select_command() -> Selection {
    let options: Vec<Selection> = Selection::iter().collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("What do you want to do?")
        .default(0)
        .items(&options[..])
        .interact()
        .ok();

    let Some(selection) = selection else {
        return Selection::Noop;
    };

    println!();
    options[selection].clone()
}

fn prompt_string(prompt: impl Into<String>) -> Result<String> {
    let input = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty(false)
        .interact_text()?;
    Ok(input)
}

fn select_conversation_id(engine: &SyncEngine) -> Result<Option<ConversationId>> {
    let conversations = engine.conversations();
    if conversations.is_empty() {
        println!("No conversations yet.");
        return Ok(None);
    }

    let display_list = conversations
        .iter()
        .map(|conversation| ConversationEnvelope(conversation.clone()).to_string())
        .collect::<Vec<_>>();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a conversation")
        .default(0)
        .items(display_list.as_slice())
        .interact()?;
    println!();

    Ok(conversations
        .into_iter()
        .nth(selection)
        .map(|conversation| conversation.id))
}

fn list_conversations(engine: &SyncEngine) {
    let active = engine.active_conversation();

    let conversations = engine
        .conversations()
        .into_iter()
        .map(|conversation| {
            let marker = if Some(&conversation.id) == active.as_ref() {
                "*"
            } else {
                " "
            };
            format!("{marker} {}", ConversationEnvelope(conversation))
        })
        .collect::<Vec<_>>();

    println!("Conversations:\n{}", conversations.join("\n"));
}

fn show_messages(engine: &SyncEngine) {
    let Some(conversation_id) = engine.active_conversation() else {
        println!("No conversation selected.");
        return;
    };

    let messages = engine
        .messages()
        .into_iter()
        .map(|item| MessageEnvelope(item).to_string())
        .collect::<Vec<_>>();

    println!(
        "Messages in {conversation_id} ({:?}):\n{}",
        engine.selection_state(),
        messages.join("\n")
    );
}

fn show_status(engine: &SyncEngine) {
    println!(
        "User:       {}\nEngine:     {:?}\nConnection: {:?}\nSelection:  {:?}",
        engine
            .identity()
            .map(|identity| identity.username)
            .unwrap_or("<signed out>".to_string()),
        engine.state(),
        engine.connection_state(),
        engine.selection_state()
    );
}

#[derive(EnumIter, Display, Clone)]
enum Selection {
    #[strum(serialize = "List conversations")]
    ListConversations,
    #[strum(serialize = "Select conversation")]
    SelectConversation,
    #[strum(serialize = "Show messages")]
    ShowMessages,
    #[strum(serialize = "Send message")]
    SendMessage,
    #[strum(serialize = "Create conversation")]
    CreateConversation,
    #[strum(serialize = "Refresh conversations")]
    RefreshConversations,
    Reconnect,
    Status,
    Logout,
    Noop,
    Exit,
}

#[tokio::main]
async fn main() -> Result<()> {
    enable_logging();

    let engine = configure_engine().await?;

    loop {
        println!();

        let result = match select_command() {
            Selection::ListConversations => {
                list_conversations(&engine);
                Ok(())
            }
            Selection::SelectConversation => match select_conversation_id(&engine)? {
                Some(conversation_id) => engine
                    .select_conversation(&conversation_id)
                    .await
                    .map(|outcome| println!("{outcome:?}")),
                None => Ok(()),
            },
            Selection::ShowMessages => {
                show_messages(&engine);
                Ok(())
            }
            Selection::SendMessage => {
                let text = prompt_string("Message")?;
                engine.send_message(&text).await
            }
            Selection::CreateConversation => {
                let name = prompt_string("Name of the conversation")?;
                let member_ids = prompt_string("Member ids (comma separated)")?
                    .split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(UserId::from)
                    .collect::<Vec<_>>();
                engine
                    .create_conversation(&name, member_ids)
                    .await
                    .map(|conversation_id| println!("Created {conversation_id}."))
            }
            Selection::RefreshConversations => engine.refresh_previews().await,
            Selection::Reconnect => engine.reconnect().await,
            Selection::Status => {
                show_status(&engine);
                Ok(())
            }
            Selection::Logout => {
                engine.logout().await;
                println!("Signed out.");
                break;
            }
            Selection::Noop => Ok(()),
            Selection::Exit => break,
        };

        if let Err(err) = result {
            println!("{err}");
        }
    }

    Ok(())
}
