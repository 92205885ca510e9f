//! Celestia liveness endpoint
//!
//! A minimal HTTP responder that lets a hosting platform confirm the bot
//! process is running. Unrelated to command handling.

pub mod liveness;
pub mod server;

pub use server::{router, start_server};
