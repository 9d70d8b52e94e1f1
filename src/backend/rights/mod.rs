//! Rights Module
//!
//! Authorization checks for viewing and editing collections.

pub mod evaluator;

pub use evaluator::{BannedUsernames, RightsEvaluator, RightsSource};
