//! Service facade over the spacer store

use crate::Result;
use crate::app::adapters::store::SpacerStore;
use crate::app::models::{
    AbSite, SpacerHistoryEntry, SpacerValidationData, SpacerValidationRecord,
};
use crate::app::services::consistency::{Comparison, check_not_duplicate, verify_against_maintained};
use crate::app::services::record_query::{PagedRecords, RecordsQuery, query_records};
use crate::app::services::validation::validate;
use crate::config::ServiceConfig;
use crate::error::SpacerError;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Entry point for every spacer validation operation
#[derive(Clone)]
pub struct SpacerService {
    store: Arc<dyn SpacerStore>,
    config: ServiceConfig,
}

impl SpacerService {
    pub fn new(store: Arc<dyn SpacerStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Current-state row by id
    pub fn get(&self, id: Uuid) -> Result<SpacerValidationRecord> {
        self.store.find_by_id(id)?.ok_or_else(|| {
            SpacerError::not_found(format!("Spacer validation data {} not found", id))
        })
    }

    /// Current-state row for one device side
    ///
    /// # Errors
    ///
    /// * `BadRequest` when `resource_id` is blank or `ab_site` is not A/B
    /// * `NotFound` when nothing is maintained for the side
    pub fn get_by_device(&self, resource_id: &str, ab_site: &str) -> Result<SpacerValidationRecord> {
        let resource_id = require_resource_id(resource_id)?;
        let side: AbSite = ab_site.parse()?;

        self.store.find_by_device(resource_id, side)?.ok_or_else(|| {
            SpacerError::not_found(format!(
                "No spacer data found for device {} side {}",
                resource_id, side
            ))
        })
    }

    /// Most recently written row for a device across both sides
    pub fn get_latest(&self, resource_id: &str) -> Result<SpacerValidationRecord> {
        let resource_id = require_resource_id(resource_id)?;

        self.store
            .find_latest_by_resource(resource_id)?
            .ok_or_else(|| {
                SpacerError::not_found(format!("No spacer data found for device {}", resource_id))
            })
    }

    /// Create the first maintained row for a device side
    pub fn insert(
        &self,
        data: &SpacerValidationData,
        actor: Option<Uuid>,
    ) -> Result<SpacerValidationRecord> {
        let params = validate(data)?;

        if self
            .store
            .find_by_device(&params.resource_id, params.ab_site)?
            .is_some()
        {
            warn!(
                "Rejected insert for device {} side {}: record already exists",
                params.resource_id, params.ab_site
            );
            return Err(SpacerError::conflict_with(
                format!(
                    "Spacer data already exists for device {} side {}",
                    params.resource_id, params.ab_site
                ),
                "Use update to change the maintained values",
            ));
        }

        let record = self.store.insert(&params, actor)?;
        info!(
            "Created spacer data {} for device {} side {}",
            record.id, record.parameters.resource_id, record.parameters.ab_site
        );
        Ok(record)
    }

    /// Overwrite the maintained row for a device side
    pub fn update(
        &self,
        data: &SpacerValidationData,
        actor: Option<Uuid>,
    ) -> Result<SpacerValidationRecord> {
        let params = validate(data)?;

        let current = self
            .store
            .find_by_device(&params.resource_id, params.ab_site)?;

        if let Err(e) = check_not_duplicate(&params, current.as_ref()) {
            warn!(
                "Rejected update for device {} side {}: values unchanged",
                params.resource_id, params.ab_site
            );
            return Err(e);
        }

        if current.is_none() {
            return Err(SpacerError::not_found(format!(
                "No spacer data found for device {} side {}",
                params.resource_id, params.ab_site
            )));
        }

        let record = self.store.update(&params, actor)?;
        info!(
            "Updated spacer data {} for device {} side {}",
            record.id, record.parameters.resource_id, record.parameters.ab_site
        );
        Ok(record)
    }

    /// Compare submitted values with the maintained row
    ///
    /// With an ABSite the row for that side is used; without one, the latest row
    /// for the device across both sides.
    pub fn verify(&self, data: &SpacerValidationData) -> Result<()> {
        let resource_id = require_resource_id(data.resource_id.as_deref().unwrap_or_default())?;

        let comparison = Comparison::from(&self.config.verification);

        match data.ab_site.as_deref().map(str::trim) {
            Some(side) if !side.is_empty() => {
                let side: AbSite = side.parse()?;
                let maintained = self.store.find_by_device(resource_id, side)?;
                verify_against_maintained(data, maintained.as_ref(), resource_id, comparison)
            }
            _ => {
                let maintained = self.store.find_latest_by_resource(resource_id)?;
                // a side-less probe is checked against whichever side was written last
                let mut probe = data.clone();
                probe.ab_site = maintained
                    .as_ref()
                    .map(|record| record.parameters.ab_site.to_string());
                verify_against_maintained(&probe, maintained.as_ref(), resource_id, comparison)
            }
        }
    }

    /// History entry by id
    pub fn get_record(&self, id: Uuid) -> Result<SpacerHistoryEntry> {
        self.store.find_history_by_id(id)?.ok_or_else(|| {
            SpacerError::not_found(format!("Spacer validation record {} not found", id))
        })
    }

    /// Paged, sorted history for a device within a time window
    pub fn get_paged_records(&self, query: &RecordsQuery) -> Result<PagedRecords<SpacerHistoryEntry>> {
        debug!(
            "Paged history query for {} sorting {:?}",
            query.resource_id, query.sorting
        );
        query_records(self.store.as_ref(), query)
    }
}

fn require_resource_id(resource_id: &str) -> Result<&str> {
    let trimmed = resource_id.trim();
    if trimmed.is_empty() {
        return Err(SpacerError::bad_request("ResourceId must not be empty"));
    }
    Ok(trimmed)
}
