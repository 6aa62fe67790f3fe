//! SQLite implementation of the persistence gateway
//!
//! Two tables back the store: `spacer_validation_data` holds the current-state
//! row per device side (unique on `resource_id, ab_site`) and
//! `spacer_validation_data_records` holds the append-only history. Every write
//! runs in one transaction covering both tables. Timestamps are stored as
//! microseconds since the Unix epoch so range filters compare integers.

use crate::Result;
use crate::app::adapters::store::SpacerStore;
use crate::app::models::{AbSite, SpacerHistoryEntry, SpacerParameters, SpacerValidationRecord};
use crate::config::DatabaseConfig;
use crate::error::SpacerError;
use chrono::{DateTime, SubsecRound, Utc};
use parking_lot::Mutex;
use rusqlite::types::Type;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, Transaction, params};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS spacer_validation_data (
    id                     TEXT PRIMARY KEY NOT NULL,
    site                   TEXT NOT NULL,
    resource_id            TEXT NOT NULL,
    operator               TEXT NOT NULL,
    model_pn               TEXT NOT NULL,
    date                   TEXT NOT NULL,
    big_coating_width      TEXT NOT NULL,
    small_coating_width    TEXT NOT NULL,
    white_space_width      TEXT NOT NULL,
    at11_width             TEXT NOT NULL,
    thickness              TEXT NOT NULL,
    ab_site                TEXT NOT NULL,
    creation_time          INTEGER NOT NULL,
    creator_id             TEXT,
    last_modification_time INTEGER,
    last_modifier_id       TEXT
);
CREATE UNIQUE INDEX IF NOT EXISTS ix_spacer_validation_data_resource_id_ab_site
    ON spacer_validation_data (resource_id, ab_site);
CREATE TABLE IF NOT EXISTS spacer_validation_data_records (
    id                  TEXT PRIMARY KEY NOT NULL,
    site                TEXT NOT NULL,
    resource_id         TEXT NOT NULL,
    operator            TEXT NOT NULL,
    model_pn            TEXT NOT NULL,
    date                TEXT NOT NULL,
    big_coating_width   TEXT NOT NULL,
    small_coating_width TEXT NOT NULL,
    white_space_width   TEXT NOT NULL,
    at11_width          TEXT NOT NULL,
    thickness           TEXT NOT NULL,
    ab_site             TEXT NOT NULL,
    creation_time       INTEGER NOT NULL,
    creator_id          TEXT
);
CREATE INDEX IF NOT EXISTS ix_spacer_validation_data_records_resource_id_time
    ON spacer_validation_data_records (resource_id, creation_time);
";

const CURRENT_COLUMNS: &str = "id, site, resource_id, operator, model_pn, date, \
    big_coating_width, small_coating_width, white_space_width, at11_width, thickness, ab_site, \
    creation_time, creator_id, last_modification_time, last_modifier_id";

const HISTORY_COLUMNS: &str = "id, site, resource_id, operator, model_pn, date, \
    big_coating_width, small_coating_width, white_space_width, at11_width, thickness, ab_site, \
    creation_time, creator_id";

/// SQLite-backed [`SpacerStore`]
pub struct SqliteSpacerStore {
    conn: Mutex<Connection>,
}

impl SqliteSpacerStore {
    /// Open (or create) the database file and ensure the schema exists
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let conn = Connection::open(&config.path).map_err(|e| {
            SpacerError::storage(
                format!("Failed to open database {}", config.path.display()),
                e,
            )
        })?;
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))
            .map_err(|e| SpacerError::storage("Failed to set busy timeout", e))?;

        let store = Self::from_connection(conn)?;
        info!("Opened spacer database at {}", config.path.display());
        Ok(store)
    }

    /// Private in-memory database, used by tests and dry runs
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| SpacerError::storage("Failed to open in-memory database", e))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| SpacerError::storage("Failed to initialize schema", e))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn query_current<P: rusqlite::Params>(
        &self,
        filter: &str,
        args: P,
    ) -> Result<Option<SpacerValidationRecord>> {
        let sql = format!(
            "SELECT {} FROM spacer_validation_data WHERE {} LIMIT 1",
            CURRENT_COLUMNS, filter
        );
        let conn = self.conn.lock();
        conn.query_row(&sql, args, record_from_row)
            .optional()
            .map_err(|e| SpacerError::storage("Failed to read current spacer data", e))
    }
}

impl SpacerStore for SqliteSpacerStore {
    fn find_by_id(&self, id: Uuid) -> Result<Option<SpacerValidationRecord>> {
        self.query_current("id = ?1", params![id.to_string()])
    }

    fn find_by_device(
        &self,
        resource_id: &str,
        ab_site: AbSite,
    ) -> Result<Option<SpacerValidationRecord>> {
        self.query_current(
            "resource_id = ?1 AND ab_site = ?2",
            params![resource_id, ab_site.as_str()],
        )
    }

    fn find_latest_by_resource(&self, resource_id: &str) -> Result<Option<SpacerValidationRecord>> {
        self.query_current(
            "resource_id = ?1 ORDER BY COALESCE(last_modification_time, creation_time) DESC",
            params![resource_id],
        )
    }

    fn insert(
        &self,
        values: &SpacerParameters,
        actor: Option<Uuid>,
    ) -> Result<SpacerValidationRecord> {
        let mut conn = self.conn.lock();
        let tx = conn
            .transaction()
            .map_err(|e| SpacerError::storage("Failed to begin transaction", e))?;

        let written_at = next_history_time(&tx, values)?;
        let record = SpacerValidationRecord {
            id: Uuid::new_v4(),
            parameters: values.clone(),
            creation_time: written_at,
            creator_id: actor,
            last_modification_time: None,
            last_modifier_id: None,
        };

        let inserted = tx.execute(
            &format!(
                "INSERT INTO spacer_validation_data ({}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
                CURRENT_COLUMNS
            ),
            params![
                record.id.to_string(),
                values.site,
                values.resource_id,
                values.operator,
                values.model_pn,
                values.date,
                values.big_coating_width,
                values.small_coating_width,
                values.white_space_width,
                values.at11_width,
                values.thickness,
                values.ab_site.as_str(),
                to_micros(record.creation_time),
                actor.map(|id| id.to_string()),
                Option::<i64>::None,
                Option::<String>::None,
            ],
        );
        if let Err(e) = inserted {
            return Err(if is_constraint_violation(&e) {
                SpacerError::conflict(format!(
                    "Spacer data already exists for device {} side {}",
                    values.resource_id, values.ab_site
                ))
            } else {
                SpacerError::storage("Failed to insert current spacer data", e)
            });
        }

        append_history(&tx, values, written_at, actor)?;
        tx.commit()
            .map_err(|e| SpacerError::storage("Failed to commit insert", e))?;

        debug!(
            "Inserted spacer data {} for device {} side {}",
            record.id, values.resource_id, values.ab_site
        );
        Ok(record)
    }

    fn update(
        &self,
        values: &SpacerParameters,
        actor: Option<Uuid>,
    ) -> Result<SpacerValidationRecord> {
        let mut conn = self.conn.lock();
        let tx = conn
            .transaction()
            .map_err(|e| SpacerError::storage("Failed to begin transaction", e))?;

        let written_at = next_history_time(&tx, values)?;
        let changed = tx
            .execute(
                "UPDATE spacer_validation_data SET \
                 site = ?1, operator = ?2, model_pn = ?3, date = ?4, big_coating_width = ?5, \
                 small_coating_width = ?6, white_space_width = ?7, at11_width = ?8, thickness = ?9, \
                 last_modification_time = ?10, last_modifier_id = ?11 \
                 WHERE resource_id = ?12 AND ab_site = ?13",
                params![
                    values.site,
                    values.operator,
                    values.model_pn,
                    values.date,
                    values.big_coating_width,
                    values.small_coating_width,
                    values.white_space_width,
                    values.at11_width,
                    values.thickness,
                    to_micros(written_at),
                    actor.map(|id| id.to_string()),
                    values.resource_id,
                    values.ab_site.as_str(),
                ],
            )
            .map_err(|e| SpacerError::storage("Failed to update current spacer data", e))?;

        if changed == 0 {
            return Err(SpacerError::not_found(format!(
                "No spacer data maintained for device {} side {}",
                values.resource_id, values.ab_site
            )));
        }

        let record = tx
            .query_row(
                &format!(
                    "SELECT {} FROM spacer_validation_data WHERE resource_id = ?1 AND ab_site = ?2",
                    CURRENT_COLUMNS
                ),
                params![values.resource_id, values.ab_site.as_str()],
                record_from_row,
            )
            .map_err(|e| SpacerError::storage("Failed to read updated spacer data", e))?;

        append_history(&tx, values, written_at, actor)?;
        tx.commit()
            .map_err(|e| SpacerError::storage("Failed to commit update", e))?;

        debug!(
            "Updated spacer data {} for device {} side {}",
            record.id, values.resource_id, values.ab_site
        );
        Ok(record)
    }

    fn find_history_by_id(&self, id: Uuid) -> Result<Option<SpacerHistoryEntry>> {
        let conn = self.conn.lock();
        conn.query_row(
            &format!(
                "SELECT {} FROM spacer_validation_data_records WHERE id = ?1",
                HISTORY_COLUMNS
            ),
            params![id.to_string()],
            history_from_row,
        )
        .optional()
        .map_err(|e| SpacerError::storage("Failed to read spacer history", e))
    }

    fn find_history_in_window(
        &self,
        resource_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<SpacerHistoryEntry>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM spacer_validation_data_records \
                 WHERE resource_id = ?1 AND creation_time >= ?2 AND creation_time <= ?3 \
                 ORDER BY creation_time DESC, rowid DESC",
                HISTORY_COLUMNS
            ))
            .map_err(|e| SpacerError::storage("Failed to prepare history query", e))?;

        let rows = stmt
            .query_map(
                params![resource_id, to_micros_ceil(start), to_micros(end)],
                history_from_row,
            )
            .map_err(|e| SpacerError::storage("Failed to query spacer history", e))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| SpacerError::storage("Failed to read spacer history", e))
    }
}

// =============================================================================
// Write Helpers
// =============================================================================

/// Current time, strictly later than the latest history entry for the device
fn next_history_time(tx: &Transaction<'_>, values: &SpacerParameters) -> Result<DateTime<Utc>> {
    let latest: Option<i64> = tx
        .query_row(
            "SELECT MAX(creation_time) FROM spacer_validation_data_records \
             WHERE resource_id = ?1",
            params![values.resource_id],
            |row| row.get(0),
        )
        .map_err(|e| SpacerError::storage("Failed to read latest history time", e))?;

    let now = Utc::now().trunc_subsecs(6);
    Ok(match latest.and_then(DateTime::<Utc>::from_timestamp_micros) {
        Some(previous) if previous >= now => previous + chrono::Duration::microseconds(1),
        _ => now,
    })
}

fn append_history(
    tx: &Transaction<'_>,
    values: &SpacerParameters,
    written_at: DateTime<Utc>,
    actor: Option<Uuid>,
) -> Result<()> {
    tx.execute(
        &format!(
            "INSERT INTO spacer_validation_data_records ({}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            HISTORY_COLUMNS
        ),
        params![
            Uuid::new_v4().to_string(),
            values.site,
            values.resource_id,
            values.operator,
            values.model_pn,
            values.date,
            values.big_coating_width,
            values.small_coating_width,
            values.white_space_width,
            values.at11_width,
            values.thickness,
            values.ab_site.as_str(),
            to_micros(written_at),
            actor.map(|id| id.to_string()),
        ],
    )
    .map_err(|e| SpacerError::storage("Failed to append spacer history", e))?;
    Ok(())
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

// =============================================================================
// Row Mapping
// =============================================================================

fn parameters_from_row(row: &Row<'_>) -> rusqlite::Result<SpacerParameters> {
    let ab_site: String = row.get(11)?;
    let ab_site = ab_site
        .parse::<AbSite>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(11, Type::Text, Box::new(e)))?;

    Ok(SpacerParameters {
        site: row.get(1)?,
        resource_id: row.get(2)?,
        operator: row.get(3)?,
        model_pn: row.get(4)?,
        date: row.get(5)?,
        big_coating_width: row.get(6)?,
        small_coating_width: row.get(7)?,
        white_space_width: row.get(8)?,
        at11_width: row.get(9)?,
        thickness: row.get(10)?,
        ab_site,
    })
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<SpacerValidationRecord> {
    Ok(SpacerValidationRecord {
        id: uuid_column(row, 0)?,
        parameters: parameters_from_row(row)?,
        creation_time: time_column(row, 12)?,
        creator_id: optional_uuid_column(row, 13)?,
        last_modification_time: optional_time_column(row, 14)?,
        last_modifier_id: optional_uuid_column(row, 15)?,
    })
}

fn history_from_row(row: &Row<'_>) -> rusqlite::Result<SpacerHistoryEntry> {
    Ok(SpacerHistoryEntry {
        id: uuid_column(row, 0)?,
        parameters: parameters_from_row(row)?,
        creation_time: time_column(row, 12)?,
        creator_id: optional_uuid_column(row, 13)?,
    })
}

fn uuid_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let text: String = row.get(idx)?;
    Uuid::parse_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn optional_uuid_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Uuid>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|t| {
        Uuid::parse_str(&t)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

fn time_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let micros: i64 = row.get(idx)?;
    from_micros(idx, micros)
}

fn optional_time_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let micros: Option<i64> = row.get(idx)?;
    micros.map(|m| from_micros(idx, m)).transpose()
}

fn from_micros(idx: usize, micros: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_micros(micros).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("timestamp {} out of range", micros).into(),
        )
    })
}

fn to_micros(time: DateTime<Utc>) -> i64 {
    time.timestamp_micros()
}

/// Microseconds, rounded up when `time` falls between two ticks
fn to_micros_ceil(time: DateTime<Utc>) -> i64 {
    let micros = time.timestamp_micros();
    if time.timestamp_subsec_nanos() % 1_000 == 0 {
        micros
    } else {
        micros + 1
    }
}
