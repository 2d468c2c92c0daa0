//! Domain layer - Core calculation logic and models.
//!
//! Pure row-model math for surebet positions: the position state itself,
//! collection metrics, the two-mode stake solver, and full-feedback
//! validation. No I/O and no external services here (hexagonal
//! architecture inner ring); everything is synchronous and deterministic.

pub mod metrics;
pub mod position;
pub mod solver;
pub mod validate;

// Re-export core types for convenience
pub use position::{NumericEntry, OutcomeRow, Position};
pub use validate::{RowErrors, ValidationError, ValidationReport};
