//! Command, message and callback handlers.

use crate::bot::rate::{extract_rate, mentions_rate};
use crate::bot::state::RateState;
use crate::bot::views::{self, AdminAction};
use crate::config::Settings;
use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ReplyParameters};
use teloxide::utils::command::BotCommands;
use tracing::{debug, info};

/// Supported bot commands
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Поддерживаемые команды:")]
pub enum Command {
    /// Greeting and short help
    #[command(description = "Начать работу.")]
    Start,
    /// Open the admin panel
    #[command(description = "Открыть админ-панель.")]
    Admin,
    /// Liveness probe
    #[command(description = "Проверка работоспособности.")]
    Healthcheck,
}

/// Sender id of a message, or 0 when the sender is absent
/// (channel posts, service messages). 0 never matches the allow-list.
#[must_use]
pub fn sender_id(msg: &Message) -> i64 {
    msg.from.as_ref().map_or(0, |u| u.id.0.cast_signed())
}

/// Handle /start: static greeting, any chat.
///
/// # Errors
///
/// Returns an error if the Telegram send call fails.
pub async fn start(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, views::start_message()).await?;
    Ok(())
}

/// Handle /healthcheck.
///
/// # Errors
///
/// Returns an error if the Telegram send call fails.
pub async fn healthcheck(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, "OK").await?;
    Ok(())
}

/// Handle /admin: send the panel to an administrator.
///
/// Admitted only from the target group or a private chat, and only for
/// allow-listed senders. Everything else is dropped without a reply so
/// the admin surface is not leaked.
///
/// # Errors
///
/// Returns an error if the Telegram send call fails.
pub async fn admin_panel(bot: Bot, msg: Message, settings: Arc<Settings>) -> Result<()> {
    let user_id = sender_id(&msg);

    if !panel_admitted(&settings, msg.chat.id.0, msg.chat.is_private(), user_id) {
        debug!("Ignoring /admin from user {user_id} in chat {}", msg.chat.id);
        return Ok(());
    }

    bot.send_message(msg.chat.id, views::admin_panel_title())
        .reply_markup(views::admin_keyboard())
        .await?;
    Ok(())
}

/// Handle a press on one of the admin panel buttons.
///
/// Non-admins get a transient «Нет прав» alert. Unknown callback codes
/// are acknowledged and dropped.
///
/// # Errors
///
/// Returns an error if a Telegram edit or answer call fails.
pub async fn admin_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<RateState>,
    settings: Arc<Settings>,
) -> Result<()> {
    let user_id = q.from.id.0.cast_signed();

    if !settings.admins().contains(&user_id) {
        debug!("Denied panel callback from non-admin {user_id}");
        bot.answer_callback_query(q.id.clone())
            .text(views::no_permission())
            .show_alert(true)
            .await?;
        return Ok(());
    }

    let action = q.data.as_deref().and_then(AdminAction::parse);
    let message = q.message.as_ref();
    let (Some(action), Some(message)) = (action, message) else {
        // Unknown code or inaccessible source message: just dismiss the spinner.
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };
    let chat_id = message.chat().id;
    let message_id = message.id();

    match action {
        AdminAction::ShowRate => {
            let text = views::current_rate_text(state.current_rate().await);
            bot.edit_message_text(chat_id, message_id, text)
                .reply_markup(views::admin_keyboard())
                .await?;
        }
        AdminAction::SetRate => {
            state.expect_rate_from(user_id).await;
            bot.edit_message_text(chat_id, message_id, views::rate_prompt())
                .await?;
        }
        AdminAction::Close => {
            bot.edit_message_text(chat_id, message_id, views::panel_closed())
                .await?;
        }
    }

    bot.answer_callback_query(q.id.clone()).await?;
    Ok(())
}

/// Handle the next text message of an administrator in the awaiting set.
///
/// Works in any chat. A message without a parseable number leaves the
/// awaiting set and the rate untouched and asks to retry. The admin
/// keyboard is reattached to the confirmation only in the target group.
///
/// # Errors
///
/// Returns an error if the Telegram send call fails.
pub async fn pending_rate(
    bot: Bot,
    msg: Message,
    state: Arc<RateState>,
    settings: Arc<Settings>,
) -> Result<()> {
    let user_id = sender_id(&msg);
    let text = msg.text().unwrap_or_default();

    let Some(value) = extract_rate(text) else {
        bot.send_message(msg.chat.id, views::retry_prompt()).await?;
        return Ok(());
    };

    state.set_rate(value).await;
    state.clear_awaiting(user_id).await;
    info!("Rate set to {value} by admin {user_id} via panel");

    let confirmation = bot.send_message(msg.chat.id, views::rate_updated(value));
    if msg.chat.id.0 == settings.group_id {
        confirmation.reply_markup(views::admin_keyboard()).await?;
    } else {
        confirmation.await?;
    }
    Ok(())
}

/// Whether /admin is admitted: the chat is the target group or a private
/// one, and the sender is on the allow-list.
#[must_use]
pub fn panel_admitted(settings: &Settings, chat_id: i64, is_private: bool, user_id: i64) -> bool {
    (chat_id == settings.group_id || is_private) && settings.admins().contains(&user_id)
}

/// What to do with a group message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroupReply {
    /// Admin one-shot: store the number and confirm
    UpdateRate(f64),
    /// Quote the current rate
    QuoteRate,
    /// Not addressed to the bot
    Ignore,
}

/// Decides how to react to a group message.
///
/// An administrator mentioning the trigger word together with a number
/// updates the rate in one shot; any other message with the trigger word
/// gets the current rate quoted back.
#[must_use]
pub fn classify_group_message(text: &str, is_admin: bool) -> GroupReply {
    if !mentions_rate(text) {
        return GroupReply::Ignore;
    }
    if is_admin {
        if let Some(value) = extract_rate(text) {
            return GroupReply::UpdateRate(value);
        }
    }
    GroupReply::QuoteRate
}

/// Handle a text message in the target group.
///
/// # Errors
///
/// Returns an error if the Telegram send call fails.
pub async fn group_message(
    bot: Bot,
    msg: Message,
    state: Arc<RateState>,
    settings: Arc<Settings>,
) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let user_id = sender_id(&msg);
    let is_admin = settings.admins().contains(&user_id);

    match classify_group_message(text, is_admin) {
        GroupReply::UpdateRate(value) => {
            state.set_rate(value).await;
            info!("Rate set to {value} by admin {user_id} in group");
            reply_in_thread(&bot, &msg, views::rate_updated(value)).await?;
        }
        GroupReply::QuoteRate => {
            let reply = views::group_rate_reply(state.current_rate().await);
            reply_in_thread(&bot, &msg, reply).await?;
        }
        GroupReply::Ignore => {}
    }
    Ok(())
}

async fn reply_in_thread(bot: &Bot, msg: &Message, text: String) -> Result<()> {
    bot.send_message(msg.chat.id, text)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> Settings {
        Settings {
            telegram_token: "dummy".to_string(),
            group_id: -1_001_234_567_890,
            admin_ids_str: Some("123456789,987654321".to_string()),
        }
    }

    #[test]
    fn test_panel_admitted_for_admin_in_group_or_private() {
        let settings = test_settings();
        assert!(panel_admitted(&settings, -1_001_234_567_890, false, 123_456_789));
        assert!(panel_admitted(&settings, 123_456_789, true, 123_456_789));
    }

    #[test]
    fn test_panel_silent_for_non_admin() {
        let settings = test_settings();
        assert!(!panel_admitted(&settings, -1_001_234_567_890, false, 555));
        assert!(!panel_admitted(&settings, 555, true, 555));
    }

    #[test]
    fn test_panel_silent_in_foreign_group() {
        let settings = test_settings();
        // Admin, but some other (non-private) chat
        assert!(!panel_admitted(&settings, -1_009_999_999_999, false, 123_456_789));
    }

    #[test]
    fn test_admin_one_shot_update() {
        assert_eq!(
            classify_group_message("курс 100", true),
            GroupReply::UpdateRate(100.0)
        );
        assert_eq!(
            classify_group_message("новый курс: 94,5", true),
            GroupReply::UpdateRate(94.5)
        );
    }

    #[test]
    fn test_admin_without_number_quotes() {
        assert_eq!(classify_group_message("какой курс?", true), GroupReply::QuoteRate);
    }

    #[test]
    fn test_non_admin_number_does_not_update() {
        // A regular user writing the trigger word with a number must not
        // change anything, only get the rate quoted.
        assert_eq!(
            classify_group_message("курс 100", false),
            GroupReply::QuoteRate
        );
    }

    #[test]
    fn test_no_trigger_word_ignored() {
        assert_eq!(classify_group_message("привет всем", false), GroupReply::Ignore);
        assert_eq!(classify_group_message("сегодня 25 градусов", true), GroupReply::Ignore);
    }

    #[test]
    fn test_trigger_word_case_insensitive() {
        assert_eq!(classify_group_message("КУРС?", false), GroupReply::QuoteRate);
    }
}
