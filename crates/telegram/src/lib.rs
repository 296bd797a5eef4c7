//! Telegram front-end for jobgram.
//!
//! Receives inbound events through a manual long-polling loop, routes them
//! through the per-user session state machine, and replies via the Telegram
//! Bot API. Also hosts the operator's fan-out broadcast dispatcher.

pub mod bot;
pub mod broadcast;
pub mod config;
pub mod error;
pub mod event;
pub mod handlers;
pub mod keyboard;
pub mod outbound;
pub mod router;
pub mod state;

pub use {config::BotConfig, state::BotState};
