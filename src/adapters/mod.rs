//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Concrete front ends over the use-case layer. The calculator core is
//! I/O-free; everything that touches a terminal lives here.
//!
//! Adapter categories:
//! - `console`: plain-text table rendering of a recompute pass

pub mod console;
