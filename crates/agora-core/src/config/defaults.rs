// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "agora.db";
pub const DEFAULT_WAL_MODE: bool = true;
pub const DEFAULT_MMAP_SIZE: u64 = 268_435_456; // 256 MB
pub const DEFAULT_CACHE_SIZE: i64 = -64_000; // 64 MB (negative = KB)
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Analytics ---
pub const DEFAULT_SHORT_TITLE_WEIGHT: f64 = 2.0;
pub const DEFAULT_LONG_TITLE_WEIGHT: f64 = 1.0;
pub const DEFAULT_DEFINITION_WEIGHT: f64 = 1.0;
pub const DEFAULT_POST_SUBJECT_WEIGHT: f64 = 1.0;
pub const DEFAULT_POST_BODY_WEIGHT: f64 = 0.5;
pub const DEFAULT_WORD_COUNT: usize = 8;
pub const DEFAULT_MIN_WORD_LENGTH: usize = 3;
pub const DEFAULT_LOCALE: &str = "en";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
