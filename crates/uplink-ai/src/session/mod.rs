//! Conversation session management.
//!
//! A `ChatSession` is the one conversational context the console holds.
//! It carries the exchange history sent with every follow-up request and
//! is only ever appended to.

mod manager;

pub use manager::ChatSession;
