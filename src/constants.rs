//! Application constants for the spacer validation service
//!
//! Limits, defaults and names shared by the services, the store and the API.

// =============================================================================
// Field Limits
// =============================================================================

/// Maximum trimmed length of the Site field
pub const MAX_SITE_LENGTH: usize = 10;

/// Maximum trimmed length of the ResourceId field
pub const MAX_RESOURCE_ID_LENGTH: usize = 50;

// =============================================================================
// Paging
// =============================================================================

/// Upper bound for `maxResultCount` on paged queries
pub const MAX_PAGE_SIZE: i64 = 1000;

/// Upper bound for `skipCount`, keeping page arithmetic in range
pub const MAX_SKIP_COUNT: i64 = i64::MAX - MAX_PAGE_SIZE;

/// Page size used when the caller does not supply one
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Sort clause applied when `sorting` is blank
pub const DEFAULT_SORTING: &str = "CreationTime DESC";

// =============================================================================
// Server and Storage Defaults
// =============================================================================

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

pub const DEFAULT_DATABASE_PATH: &str = "spacer.db";

pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Route prefix for the versioned API
pub const API_PREFIX: &str = "/api/v1";

/// Optional request header carrying the acting user's id
pub const ACTOR_HEADER: &str = "x-user-id";
