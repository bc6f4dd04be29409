//! Telegram bot handlers.

use crate::access::ACCESS_DENIED;
use crate::dispatch::{CommandDispatcher, Inbound, Reply, Sender};
use crate::menu::Menu;
use crate::sink::{ChatSink, DeliveryError};
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{KeyboardButton, KeyboardMarkup, ParseMode};
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};

/// Bot commands.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot and show the menu")]
    Start,
    #[command(description = "Show the menu")]
    Menu,
    #[command(description = "Show help")]
    Help,
}

/// Build the reply keyboard for a menu.
pub fn keyboard(menu: &Menu) -> KeyboardMarkup {
    KeyboardMarkup::new(menu.rows().iter().map(|row| {
        row.iter()
            .map(|item| KeyboardButton::new(item.label.clone()))
            .collect::<Vec<_>>()
    }))
    .resize_keyboard()
}

/// Telegram bot wrapper.
pub struct TelegramBot {
    bot: Bot,
    chat_id: ChatId,
    dispatcher: CommandDispatcher,
}

impl TelegramBot {
    /// Create a new bot with the given token. Notifications go to `chat_id`.
    pub fn new(token: &str, chat_id: i64, dispatcher: CommandDispatcher) -> Self {
        Self {
            bot: Bot::new(token),
            chat_id: ChatId(chat_id),
            dispatcher,
        }
    }

    /// Run the bot update handler until Ctrl+C.
    pub async fn run(self: Arc<Self>) {
        if let Err(e) = self.bot.set_my_commands(Command::bot_commands()).await {
            warn!(error = %e, "Failed to register bot commands");
        }

        let commands = {
            let this = Arc::clone(&self);
            Update::filter_message().filter_command::<Command>().endpoint(
                move |bot: Bot, msg: Message, cmd: Command| {
                    let this = Arc::clone(&this);
                    async move { this.handle(bot, msg, Inbound::Command(cmd)).await }
                },
            )
        };

        let texts = {
            let this = Arc::clone(&self);
            Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
                let this = Arc::clone(&this);
                async move {
                    let Some(text) = msg.text().map(str::to_owned) else {
                        return Ok(());
                    };
                    this.handle(bot, msg, Inbound::Text(text)).await
                }
            })
        };

        let handler = dptree::entry().branch(commands).branch(texts);

        info!("Telegram bot listening for commands");
        Dispatcher::builder(self.bot.clone(), handler)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }

    async fn handle(&self, bot: Bot, msg: Message, inbound: Inbound) -> Result<(), DeliveryError> {
        let sender = msg.from.as_ref().map(|user| Sender {
            id: user.id.0,
            first_name: user.first_name.clone(),
        });

        let Some(reply) = self.dispatcher.dispatch(sender.as_ref(), inbound).await else {
            return Ok(());
        };

        // A failed reply is dropped; the next command is unaffected.
        if let Err(e) = self.send_reply(&bot, msg.chat.id, reply).await {
            error!(chat_id = msg.chat.id.0, error = %e, "Failed to send reply");
        }
        Ok(())
    }

    async fn send_reply(&self, bot: &Bot, chat_id: ChatId, reply: Reply) -> Result<(), DeliveryError> {
        match reply {
            Reply::Denied => {
                bot.send_message(chat_id, ACCESS_DENIED).await?;
            }
            Reply::Menu { greeting } => {
                bot.send_message(chat_id, greeting)
                    .parse_mode(ParseMode::Html)
                    .reply_markup(keyboard(self.dispatcher.menu()))
                    .await?;
            }
            Reply::Messages(messages) => {
                for text in messages {
                    bot.send_message(chat_id, text)
                        .parse_mode(ParseMode::Html)
                        .await?;
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ChatSink for TelegramBot {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
        self.bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/start", "monowatch_bot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/menu", "monowatch_bot").unwrap(), Command::Menu);
        assert_eq!(Command::parse("/help@monowatch_bot", "monowatch_bot").unwrap(), Command::Help);
        assert!(Command::parse("/balance", "monowatch_bot").is_err());
    }

    #[test]
    fn test_keyboard_mirrors_menu() {
        let menu = Menu::default();
        let markup = keyboard(&menu);
        assert_eq!(markup.keyboard.len(), menu.rows().len());
        let labels: Vec<&str> = markup.keyboard.iter().flatten().map(|b| b.text.as_str()).collect();
        let expected: Vec<&str> = menu.items().map(|item| item.label.as_str()).collect();
        assert_eq!(labels, expected);
    }
}
