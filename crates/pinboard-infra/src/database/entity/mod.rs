//! SeaORM entities, one per table.

pub mod contact;
pub mod post;
