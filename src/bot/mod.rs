/// Command, message and callback handlers
pub mod handlers;
/// Rate extraction and trigger-word matching
pub mod rate;
/// Shared in-memory bot state
pub mod state;
/// Keyboards, texts and callback actions
pub mod views;

pub use state::RateState;
