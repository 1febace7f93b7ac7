//! In-memory repositories - used when no database is configured, and in tests.
//! Data is lost on process restart.

mod contacts;
mod posts;

pub use contacts::InMemoryContactRepository;
pub use posts::InMemoryPostRepository;
