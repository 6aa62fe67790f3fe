//! Orchestration of spacer validation data reads, writes and verification
//!
//! [`SpacerService`] ties the validation engine, the consistency checks and the
//! history query engine to a [`SpacerStore`]. It holds no mutable state of its
//! own; every call works against the store alone, so one instance is shared by
//! all requests.
//!
//! # Write Workflows
//!
//! - **Insert**: validate, reject an existing row for the device side with
//!   `Conflict`, then write the row and its history entry in one transaction
//! - **Update**: validate, reject values identical to the maintained row with
//!   `Conflict`, reject a missing row with `NotFound`, then overwrite in place
//!   and append history in one transaction
//!
//! [`SpacerStore`]: crate::app::adapters::store::SpacerStore

pub mod service;

#[cfg(test)]
pub mod tests;

pub use service::SpacerService;
