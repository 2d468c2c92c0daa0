//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires from
//! the outside world. The view layer implements these.
//!
//! Port categories:
//! - `FocusSource`: which field the user is actively editing

pub mod focus;
