//! LSP module: client lifecycle and the command channel
//!
//! Spawns the external Atmo server process, speaks the protocol over its
//! stdio, and exposes the server's custom inspection commands as typed
//! calls.

mod channel;
mod client;
pub mod commands;
mod state;
pub mod types;
pub mod watch;

pub use channel::{CommandChannel, LspChannel};
pub use client::{LspClient, ServerLaunch};

#[cfg(test)]
mod tests;
