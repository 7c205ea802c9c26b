//! Client for the hosted multimodal image-generation gateway.
//!
//! Builds the chat-completion style payload (one text part followed by one
//! part per input image), sends it, and unwraps the generated image URL.

pub mod client;
pub mod config;
pub mod error;
pub mod payload;

pub use client::GatewayClient;
pub use config::GatewayConfig;
pub use error::GatewayError;
