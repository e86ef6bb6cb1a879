//! Domain model for grouped notes.
//!
//! # Responsibility
//! - Define the records held by the note engine and written to storage.
//! - Own id allocation and input validation rules shared by mutations.
//!
//! # Invariants
//! - Group ids are unique within a collection and never reused.
//! - Note ids are unique within their owning group.
//! - Groups and notes are append-only: no rename, edit, move or delete.

pub mod group;
pub mod id;
pub mod note;
pub mod validation;
