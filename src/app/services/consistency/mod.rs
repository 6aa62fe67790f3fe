//! Duplicate and consistency checks against maintained spacer data
//!
//! Both checks compare the 8 core parameters of an incoming submission with the
//! stored row for the same device side:
//!
//! - [`duplicate`] - rejects writes whose core parameters are identical to the
//!   current row (exact, case-sensitive, trimmed)
//! - [`verification`] - reports every core parameter that drifted from the
//!   maintained values so operators can see exactly which measurement differs
//!
//! Neither check touches storage; callers fetch the row and pass it in.

pub mod duplicate;
pub mod verification;

#[cfg(test)]
pub mod tests;

pub use duplicate::{check_not_duplicate, core_parameters_identical, describe_core_parameters};
pub use verification::{Comparison, find_mismatches, verify_against_maintained};
