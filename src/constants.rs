// src/constants.rs
//
// Application-wide constants. Each constant is documented with its purpose
// and usage context.

/// Directory name under the platform config/data dirs.
///
/// Used in: `infrastructure/config.rs`
pub const APP_DIR_NAME: &str = "notesview";

/// File name of the TOML configuration inside the config dir.
///
/// Used in: `infrastructure/config.rs`
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// File name of the cached session document inside the data dir.
///
/// Used in: `infrastructure/config.rs`
pub const SESSION_FILE_NAME: &str = "session.json";

/// Access-level prefix prepended to object keys by the hosted storage.
///
/// Objects uploaded with guest access land under `public/`, so a note named
/// `cat` is stored as `public/cat`.
///
/// Used in: `infrastructure/config.rs`, `infrastructure/object_store.rs`
pub const DEFAULT_STORAGE_PREFIX: &str = "public/";

/// Page size requested from `listTodos`.
///
/// Used in: `infrastructure/graphql.rs`
pub const LIST_PAGE_LIMIT: u32 = 100;

/// Delay in milliseconds after writing the HTML page before returning from
/// `open_in_browser`, so the browser can read the file before the temp dir
/// is dropped.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;
