//! Domain entities - the core business objects.

mod contact;
mod post;

pub use contact::{
    Contact, ContactDraft, ContactFields, EMAIL_MAX_CHARS, FieldErrors, NAME_MAX_CHARS,
    PHONE_MAX_CHARS,
};
pub use post::{AUTHOR_MAX_CHARS, Post, PostDraft, PostFields, PostPatch, PostSummary, TITLE_MAX_CHARS};
