//! Application-wide constants

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 3;
pub const SIMILAR_ITEMS_LIMIT: usize = 3;
pub const ENV_PREFIX: &str = "MENU";
