//! Fee Estimation Module
//!
//! Approximate network fee shown on the final confirmation screen.

mod estimator;

pub use estimator::*;
