//! Completion-service client and response parsing.

pub mod client;
pub mod json;
pub mod retry;

pub use client::{ChatClient, CompletionClient, CompletionRequest};
pub use json::{MessageResponse, ParseFailure, parse_message};
