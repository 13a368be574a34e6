/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
#[allow(dead_code)]
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// LOCALIZATION CONSTANTS
// =============================================================================

/// Locale tried when the requested one has no translation
pub const DEFAULT_LOCALE: &str = "zh-TW";

/// Title surfaced for events without any translation
pub const NO_TRANSLATION_TITLE: &str = "No Translation";

/// Category display name when no localized name exists
pub const NO_CATEGORY_NAME: &str = "No Category";
