//! Component Health
//!
//! Two health models serve different call paths and are kept separate:
//!
//! - [`ComponentHealthScorer`]: ML-blended 0-100 score per component with a
//!   trend against the previous cycle (scoring cycle, `/health/components`).
//! - [`penalty::score_penalties`]: fixed deductions per threshold breach,
//!   averaged into an overall figure (point assessment, `/predict/failure`).
//!
//! [`outlook::component_outlook`] produces the per-target Normal / Warning /
//! Critical cards.

pub mod outlook;
pub mod penalty;
mod scorer;

pub use outlook::component_outlook;
pub use penalty::score_penalties;
pub use scorer::{normalize_factor, ComponentFactors, ComponentHealthScorer};
