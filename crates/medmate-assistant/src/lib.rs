//! Scripted assistant for medication questions.
//!
//! This crate answers chat messages with canned replies chosen by keyword.
//! Chat history lives in an explicit [`ChatSession`].

pub mod replies;
pub mod session;

pub use replies::*;
pub use session::*;
