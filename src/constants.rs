//! Application constants for the file ripper
//!
//! Default values and names shared by the library and the CLI.

// =============================================================================
// Logging
// =============================================================================

/// Target used when building the default tracing filter
pub const LOG_TARGET: &str = "file_ripper";

/// Log level used when neither -v nor -q is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// =============================================================================
// Processing Defaults
// =============================================================================

/// Success rate (percent) above which a file counts as successfully ripped
pub const SUCCESS_RATE_THRESHOLD: f64 = 90.0;

/// Maximum number of error messages kept per file in parse statistics
pub const MAX_RECORDED_ERRORS: usize = 100;

/// Upper bound on parallel file workers
pub const MAX_WORKERS: usize = 64;

// =============================================================================
// Schema Documents
// =============================================================================

/// Accepted spellings of each file type, compared case-insensitively
pub mod file_type_names {
    pub const DELIMITED: &str = "DELIMITED";
    pub const FIXED: &str = "FIXED";
    pub const XML: &str = "XML";

    /// All recognised names, for error messages
    pub const ALL: &[&str] = &[DELIMITED, FIXED, XML];
}
