//! Kurs bot
//!
//! A Telegram bot for one group chat: answers messages containing the word
//! «курс» with the last stored rate and gives administrators an inline
//! admin panel (and a one-shot group shortcut) to update it.

/// Telegram bot implementation
pub mod bot;
/// Configuration management
pub mod config;
