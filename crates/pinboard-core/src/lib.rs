//! # Pinboard Core
//!
//! The domain layer of the pinboard service: bulletin-board posts and
//! address-book contacts.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
