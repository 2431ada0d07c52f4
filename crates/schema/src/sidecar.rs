//! Sidecar I/O: locating, parsing and persisting `<hty_path>.json`.
//!
//! Writes go through a `.tmp` file that is fsynced and renamed over the
//! target, so a reader never observes a half-written sidecar.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{Schema, SchemaError};

/// Extension appended to the HTY file name to form the sidecar path.
pub const SIDECAR_EXTENSION: &str = "json";

/// Returns the sidecar path for an HTY file: the full file name with
/// `.json` appended (`data.hty` -> `data.hty.json`).
pub fn sidecar_path<P: AsRef<Path>>(hty_path: P) -> PathBuf {
    let mut s: OsString = hty_path.as_ref().as_os_str().to_owned();
    s.push(".");
    s.push(SIDECAR_EXTENSION);
    PathBuf::from(s)
}

/// Loads the schema describing `hty_path` from its sidecar.
///
/// Equivalent to [`Schema::load`].
pub fn extract_metadata<P: AsRef<Path>>(hty_path: P) -> Result<Schema, SchemaError> {
    Schema::load(hty_path)
}

impl Schema {
    /// Loads the schema for `hty_path` from `<hty_path>.json`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MetadataUnavailable`] if the sidecar cannot be
    /// read, is not valid JSON, has no `columns` array, or declares zero
    /// columns (a zero-width row has no stride to scan with).
    pub fn load<P: AsRef<Path>>(hty_path: P) -> Result<Self, SchemaError> {
        let path = sidecar_path(hty_path);
        let unavailable = |reason: String| SchemaError::MetadataUnavailable {
            path: path.clone(),
            reason,
        };

        let text = fs::read_to_string(&path).map_err(|e| unavailable(e.to_string()))?;
        let schema: Schema =
            serde_json::from_str(&text).map_err(|e| unavailable(e.to_string()))?;

        if schema.is_empty() {
            return Err(unavailable("schema declares no columns".to_string()));
        }

        let dups = schema.duplicate_names();
        if !dups.is_empty() {
            log::warn!(
                "{}: duplicate column names {:?}; only the first of each is addressable",
                path.display(),
                dups
            );
        }

        log::debug!("loaded schema from {} ({} columns)", path.display(), schema.len());
        Ok(schema)
    }

    /// Writes this schema as the sidecar of `hty_path`, replacing any
    /// existing sidecar.
    ///
    /// Returns the sidecar path that was written.
    pub fn save<P: AsRef<Path>>(&self, hty_path: P) -> Result<PathBuf, SchemaError> {
        let path = sidecar_path(hty_path);
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp_path = PathBuf::from(tmp);

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SchemaError::Io(std::io::Error::other(e)))?;

        {
            let mut f = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&tmp_path)?;
            f.write_all(json.as_bytes())?;
            f.write_all(b"\n")?;
            f.flush()?;
            f.sync_all()?;
        }

        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(SchemaError::Io(e));
        }

        log::debug!("wrote schema sidecar {}", path.display());
        Ok(path)
    }
}
