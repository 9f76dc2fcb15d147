//! Well-known DataWedge actions, categories and extra keys

/// Action every DataWedge API request is broadcast with
pub const API_ACTION: &str = "com.symbol.datawedge.api.ACTION";

/// Extra carrying a soft trigger command (`START_SCANNING` / `STOP_SCANNING`)
pub const EXTRA_SOFT_SCAN_TRIGGER: &str = "com.symbol.datawedge.api.SOFT_SCAN_TRIGGER";

/// Extra carrying a profile configuration bundle
pub const EXTRA_SET_CONFIG: &str = "com.symbol.datawedge.api.SET_CONFIG";

/// Asks DataWedge to broadcast a result for the request
pub const EXTRA_SEND_RESULT: &str = "SEND_RESULT";

/// Scan source (`scanner`, `rfid`, `msr`, ...)
pub const EXTRA_SOURCE: &str = "com.symbol.datawedge.source";

/// Decoded scan payload
pub const EXTRA_DATA_STRING: &str = "com.symbol.datawedge.data_string";

/// Symbology of the decoded label
pub const EXTRA_LABEL_TYPE: &str = "com.symbol.datawedge.label_type";

/// Category attached to scan broadcasts
pub const CATEGORY_DEFAULT: &str = "android.intent.category.DEFAULT";

/// Action DataWedge uses for scan broadcasts once our profile is applied
pub const DEFAULT_SCAN_ACTION: &str = "com.tagify.tagify_app.SCAN";

/// Package the profile binds to when none is configured
pub const DEFAULT_PACKAGE_NAME: &str = "com.tagify.tagify_app";

/// Name of the profile pushed to DataWedge
pub const DEFAULT_PROFILE_NAME: &str = "Tagify_Profile";
