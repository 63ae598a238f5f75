//! # File I/O Module
//!
//! Handles preferences file operations with safety features:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::file_io::{load_or_default, save_preferences};
//! use calc_core::registry::CalculatorId;
//! use std::path::Path;
//!
//! let path = Path::new("preferences.json");
//! let mut prefs = load_or_default(path)?;
//! prefs.last_calculator = Some(CalculatorId::Drywall);
//! save_preferences(&prefs, path)?;
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::Path;

use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::preferences::{Preferences, SCHEMA_VERSION};

/// Default preferences file name
pub const DEFAULT_PREFERENCES_FILE: &str = "preferences.json";

/// Save preferences with atomic write semantics.
///
/// The save process:
/// 1. Serialize to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp over the target (atomic on most filesystems)
///
/// Missing parent directories are created.
pub fn save_preferences(prefs: &Preferences, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(prefs).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| CalcError::file_error("create directory", parent.display().to_string(), e.to_string()))?;
    }

    let tmp_path = path.with_extension("json.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), "Saved preferences");
    Ok(())
}

/// Load preferences from a file.
///
/// # Returns
///
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error, including a missing file
pub fn load_preferences(path: &Path) -> CalcResult<Preferences> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    parse_preferences(&contents, path)
}

/// Load preferences, falling back to defaults when the file does not exist.
///
/// A file that exists but cannot be read or parsed is still an error, so a
/// corrupt file is never silently overwritten.
pub fn load_or_default(path: &Path) -> CalcResult<Preferences> {
    match fs::read_to_string(path) {
        Ok(contents) => parse_preferences(&contents, path),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No preferences file, using defaults");
            Ok(Preferences::new())
        }
        Err(e) => Err(CalcError::file_error("read", path.display().to_string(), e.to_string())),
    }
}

fn parse_preferences(contents: &str, path: &Path) -> CalcResult<Preferences> {
    let prefs: Preferences = serde_json::from_str(contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;
    validate_version(&prefs.version)?;
    Ok(prefs)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    let (Some(&file_major), Some(&current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };

    // Major version must match
    if file_major != current_major {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor may carry breaking changes
    if current_major == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}
