//! Whole-file JSON read and atomic replace.

use super::{StoreError, StoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Reads a JSON array of records. Returns `None` when the file does not exist.
pub(crate) fn read_records<R: DeserializeOwned>(path: &Path) -> StoreResult<Option<Vec<R>>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(io_error(path, err)),
    };

    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Replaces `path` with the pretty-printed records.
///
/// Writes a sibling temp file, syncs it, then renames it over the target so
/// readers never observe a half-written file.
pub(crate) fn write_records<R: Serialize>(path: &Path, records: &[R]) -> StoreResult<()> {
    let json = serde_json::to_string_pretty(records).map_err(StoreError::Serialize)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| io_error(parent, err))?;
    }

    let temp_path = temp_path_for(path);
    let written = write_and_sync(&temp_path, json.as_bytes())
        .and_then(|()| fs::rename(&temp_path, path));

    if let Err(err) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(io_error(path, err));
    }
    Ok(())
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.write_all(b"\n")?;
    file.sync_all()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "records.json".to_string());
    path.with_file_name(format!(".{file_name}.tmp.{}", std::process::id()))
}

fn io_error(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::{read_records, temp_path_for, write_records};
    use crate::store::StoreError;
    use std::path::Path;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = read_records::<serde_json::Value>(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn write_uses_two_space_indent_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("items.json");
        write_records(&path, &[serde_json::json!({ "id": 1 })]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  {\n    \"id\": 1\n  }"), "{text}");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn non_array_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        std::fs::write(&path, r#"{"id": 1}"#).unwrap();

        let err = read_records::<serde_json::Value>(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn temp_path_is_a_hidden_sibling() {
        let temp = temp_path_for(Path::new("data/todo.json"));
        assert_eq!(temp.parent(), Some(Path::new("data")));
        let name = temp.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".todo.json.tmp."));
    }
}
