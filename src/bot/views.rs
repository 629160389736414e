//! Admin panel UI components
//!
//! Contains the inline keyboard, callback actions and all user-facing
//! texts of the bot.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

// ─────────────────────────────────────────────────────────────────────────────
// Callback constants
// ─────────────────────────────────────────────────────────────────────────────

/// Callback data for showing the current rate
pub const CALLBACK_SHOW_RATE: &str = "admin:show_rate";
/// Callback data for starting the change-rate flow
pub const CALLBACK_SET_RATE: &str = "admin:set_rate";
/// Callback data for closing the panel
pub const CALLBACK_CLOSE: &str = "admin:close";

// ─────────────────────────────────────────────────────────────────────────────
// Callback actions
// ─────────────────────────────────────────────────────────────────────────────

/// Action selected in the admin panel.
///
/// Decoded once at the callback boundary; anything that is not one of
/// the three known codes is rejected there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    /// Re-render the panel with the current rate
    ShowRate,
    /// Start waiting for a new rate from the administrator
    SetRate,
    /// Close the panel
    Close,
}

impl AdminAction {
    /// Decodes callback data into an action. Unknown codes yield `None`.
    #[must_use]
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            CALLBACK_SHOW_RATE => Some(Self::ShowRate),
            CALLBACK_SET_RATE => Some(Self::SetRate),
            CALLBACK_CLOSE => Some(Self::Close),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Keyboards
// ─────────────────────────────────────────────────────────────────────────────

/// The three-button admin panel keyboard
#[must_use]
pub fn admin_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            "📈 Показать курс",
            CALLBACK_SHOW_RATE,
        )],
        vec![InlineKeyboardButton::callback(
            "✏️ Изменить курс",
            CALLBACK_SET_RATE,
        )],
        vec![InlineKeyboardButton::callback("❌ Закрыть", CALLBACK_CLOSE)],
    ])
}

// ─────────────────────────────────────────────────────────────────────────────
// Texts
// ─────────────────────────────────────────────────────────────────────────────

/// Greeting for /start
#[must_use]
pub fn start_message() -> &'static str {
    "Привет! В группе я отвечаю на сообщения со словом «курс».\n\
     Админы могут открыть /admin для управления курсом."
}

/// Title of the admin panel message
#[must_use]
pub fn admin_panel_title() -> &'static str {
    "Админ-панель:"
}

/// Panel text for the show-rate action
#[must_use]
pub fn current_rate_text(rate: Option<f64>) -> String {
    rate.map_or_else(
        || "Курс ещё не задан.".to_string(),
        |value| format!("Текущий курс: {}", format_rate(value)),
    )
}

/// Group reply to the trigger word
#[must_use]
pub fn group_rate_reply(rate: Option<f64>) -> String {
    rate.map_or_else(
        || "Курс ещё не задан админом.".to_string(),
        |value| format!("Текущий курс: {}", format_rate(value)),
    )
}

/// Prompt shown when the change-rate flow starts
#[must_use]
pub fn rate_prompt() -> &'static str {
    "Введи новый курс числом (например: 94.5)."
}

/// Reply when no number was found in an awaited message
#[must_use]
pub fn retry_prompt() -> &'static str {
    "Не нашёл число. Введи ещё раз, пример: 94.5"
}

/// Confirmation after the rate was updated
#[must_use]
pub fn rate_updated(value: f64) -> String {
    format!("Курс обновлён: {}", format_rate(value))
}

/// Text of the closed panel
#[must_use]
pub fn panel_closed() -> &'static str {
    "Админ-панель закрыта."
}

/// Alert shown to non-administrators pressing panel buttons
#[must_use]
pub fn no_permission() -> &'static str {
    "Нет прав"
}

/// Formats a rate value. Integral values keep one decimal place
/// («100.0»), fractional ones print naturally («94.5»).
#[must_use]
pub fn format_rate(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
