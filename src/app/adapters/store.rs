//! Persistence gateway contract
//!
//! The service layer owns correctness of the data it hands over; implementations
//! own durability. Both write operations must commit the current-state write and
//! the history append together or not at all.

use crate::Result;
use crate::app::models::{AbSite, SpacerHistoryEntry, SpacerParameters, SpacerValidationRecord};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Storage for current-state rows and their append-only history
pub trait SpacerStore: Send + Sync {
    /// Current-state row by id
    fn find_by_id(&self, id: Uuid) -> Result<Option<SpacerValidationRecord>>;

    /// Current-state row for one device side
    fn find_by_device(
        &self,
        resource_id: &str,
        ab_site: AbSite,
    ) -> Result<Option<SpacerValidationRecord>>;

    /// Most recently written current-state row for a device, across both sides
    fn find_latest_by_resource(&self, resource_id: &str) -> Result<Option<SpacerValidationRecord>>;

    /// Insert the current-state row and append its history entry atomically
    ///
    /// Fails with `Conflict` when a row already exists for the device side,
    /// including when a concurrent insert wins the race.
    fn insert(
        &self,
        params: &SpacerParameters,
        actor: Option<Uuid>,
    ) -> Result<SpacerValidationRecord>;

    /// Overwrite the current-state row in place and append a history entry atomically
    ///
    /// Fails with `NotFound` when no row exists for the device side.
    fn update(
        &self,
        params: &SpacerParameters,
        actor: Option<Uuid>,
    ) -> Result<SpacerValidationRecord>;

    /// History entry by id
    fn find_history_by_id(&self, id: Uuid) -> Result<Option<SpacerHistoryEntry>>;

    /// History entries for a device created within `[start, end]`, newest first
    fn find_history_in_window(
        &self,
        resource_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<SpacerHistoryEntry>>;
}
