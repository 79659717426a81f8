//! package.json reads and the version-field rewrite.

use std::io::Write;
use std::path::Path;

use semver::Version;
use serde_json::Value;

use crate::error::ManifestError;

/// Name and version read from a package manifest.
#[derive(Debug, Clone)]
pub struct ManifestInfo {
    pub name: String,
    pub version: String,
}

fn load(path: &Path) -> Result<Value, ManifestError> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| ManifestError::ReadFailed {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ManifestError::ParseFailed {
        path: display,
        source,
    })
}

/// Read the `name` and `version` fields from a manifest.
pub fn read_manifest(path: &Path) -> Result<ManifestInfo, ManifestError> {
    let doc = load(path)?;
    let display = path.display().to_string();

    let name = doc
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| ManifestError::MissingField(display.clone(), "name"))?
        .to_string();
    let version = doc
        .get("version")
        .and_then(Value::as_str)
        .ok_or_else(|| ManifestError::MissingField(display, "version"))?
        .to_string();

    Ok(ManifestInfo { name, version })
}

/// Rewrite the manifest's `version` field in place.
///
/// All other fields and their order are preserved; output uses two-space
/// indentation and a trailing newline. The write goes through a temp file
/// in the same directory so a crash never leaves a truncated manifest.
pub fn persist_version(path: &Path, version: &Version) -> Result<(), ManifestError> {
    let display = path.display().to_string();
    let mut doc = load(path)?;

    let object = doc
        .as_object_mut()
        .ok_or_else(|| ManifestError::NotAnObject(display.clone()))?;
    object.insert("version".to_string(), Value::String(version.to_string()));

    let mut rendered =
        serde_json::to_string_pretty(&doc).map_err(|source| ManifestError::ParseFailed {
            path: display.clone(),
            source,
        })?;
    rendered.push('\n');

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp =
        tempfile::NamedTempFile::new_in(dir).map_err(|source| ManifestError::WriteFailed {
            path: display.clone(),
            source,
        })?;
    tmp.write_all(rendered.as_bytes())
        .map_err(|source| ManifestError::WriteFailed {
            path: display.clone(),
            source,
        })?;
    tmp.persist(path).map_err(|e| ManifestError::WriteFailed {
        path: display,
        source: e.error,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
  "name": "@scope/plugin",
  "version": "1.0.0",
  "main": "dist/index.js",
  "scripts": {
    "build": "backstage-cli package build"
  }
}
"#;

    fn write_manifest(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("package.json");
        std::fs::write(&path, MANIFEST).expect("failed to write manifest");
        path
    }

    #[test]
    fn test_read_manifest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_manifest(dir.path());

        let info = read_manifest(&path).expect("read manifest");
        assert_eq!(info.name, "@scope/plugin");
        assert_eq!(info.version, "1.0.0");
    }

    #[test]
    fn test_persist_version_rewrites_only_version() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_manifest(dir.path());

        persist_version(&path, &Version::new(1, 1, 0)).expect("persist");

        let rewritten = std::fs::read_to_string(&path).expect("read back");
        assert!(rewritten.contains("\"version\": \"1.1.0\""));
        assert!(rewritten.contains("\"main\": \"dist/index.js\""));
        assert!(rewritten.ends_with('\n'));

        // Field order preserved: name still before version
        let name_pos = rewritten.find("\"name\"").unwrap();
        let version_pos = rewritten.find("\"version\"").unwrap();
        assert!(name_pos < version_pos);
    }

    #[test]
    fn test_persist_version_uses_two_space_indent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_manifest(dir.path());

        persist_version(&path, &Version::new(2, 0, 0)).expect("persist");

        let rewritten = std::fs::read_to_string(&path).expect("read back");
        assert!(rewritten.contains("\n  \"name\""));
    }

    #[test]
    fn test_read_missing_manifest_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = read_manifest(&dir.path().join("package.json"));
        assert!(matches!(result, Err(ManifestError::ReadFailed { .. })));
    }
}
