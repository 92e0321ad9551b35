//! Core logic for the homework review bot.
//!
//! The review API and the chat messenger live behind ports (traits) that the
//! adapter crates implement. Everything here is testable without a network.

pub mod api;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatter;
pub mod logging;
pub mod messaging;
pub mod notifier;
pub mod poller;
pub mod validator;

#[cfg(test)]
mod test_support;

pub use errors::{Error, Result};
