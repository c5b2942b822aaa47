//! Deterministic construction of RIR-diverse perspective cohorts.
//!
//! Cohort membership is fully determined by `(hash_secret, target)`: the
//! same pair always produces the same sequence of cohorts, so that repeated
//! MPIC attempts for the same target are reproducible and auditable.

mod cohort;
mod error;

pub use cohort::{build_cohorts, derive_seed};
pub use error::{CohortError, Result};
