//! Outbound messenger abstraction (Telegram today).

pub mod port;
