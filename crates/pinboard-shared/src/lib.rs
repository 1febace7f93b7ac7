//! # Pinboard Shared
//!
//! Wire types of the board JSON API, shared with any Rust client of it.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, MessageResponse};
