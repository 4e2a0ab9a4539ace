//! tagseek Discord - guild API client
//!
//! Creates and deletes throwaway guilds over the Discord REST API.

pub mod client;

pub use client::DiscordClient;
