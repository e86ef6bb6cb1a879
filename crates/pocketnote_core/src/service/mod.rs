//! Core use-case services.
//!
//! # Responsibility
//! - Own in-memory state and expose the mutation/query surface to UI layers.
//! - Keep callers decoupled from storage details.

pub mod note_engine;
