//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces. One use case:
//! the calculator session, which owns the position, applies typed
//! field edits and runs the synchronous recompute pass.

pub mod session;

pub use session::{FieldEdit, PassOutput, RoiMode, Session};
