use loanscope_core::{Error, Result};
use loanscope_scoring::LogisticModel;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::info;

/// A classifier artifact read from disk
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    pub path: PathBuf,
    /// Lowercase hex SHA-256 of the artifact bytes
    pub sha256: String,
    pub model: LogisticModel,
}

/// Lowercase hex SHA-256 digest
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Load a logistic-regression artifact.
///
/// When `expected_sha256` is given the artifact must match it exactly
/// (case-insensitive hex).
pub fn load_model<P: AsRef<Path>>(path: P, expected_sha256: Option<&str>) -> Result<ModelArtifact> {
    let path = path.as_ref();
    let name = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|e| Error::load(&name, e.to_string()))?;

    let sha256 = sha256_hex(&bytes);
    if let Some(expected) = expected_sha256 {
        if !expected.trim().eq_ignore_ascii_case(&sha256) {
            return Err(Error::load(
                &name,
                format!("checksum mismatch: expected {}, got {}", expected.trim(), sha256),
            ));
        }
    }

    let text = std::str::from_utf8(&bytes).map_err(|e| Error::load(&name, e.to_string()))?;
    let model = LogisticModel::from_json(text).map_err(|e| Error::load(&name, e.to_string()))?;

    info!(
        "Loaded classifier '{}' ({} features) from {} sha256={}",
        model.model_name,
        model.features.len(),
        name,
        sha256
    );

    Ok(ModelArtifact {
        path: path.to_path_buf(),
        sha256,
        model,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTIFACT: &str = r#"{
        "model_name": "m",
        "intercept": 0.1,
        "features": [{"kind": "numeric", "name": "credit_amount", "coefficient": 0.2}]
    }"#;

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_load_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logreg_classifier.json");
        std::fs::write(&path, ARTIFACT).unwrap();

        let artifact = load_model(&path, None).unwrap();
        assert_eq!(artifact.model.model_name, "m");
        assert_eq!(artifact.sha256, sha256_hex(ARTIFACT.as_bytes()));
    }

    #[test]
    fn test_load_model_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, ARTIFACT).unwrap();

        let digest = sha256_hex(ARTIFACT.as_bytes()).to_uppercase();
        assert!(load_model(&path, Some(&digest)).is_ok());
        assert!(matches!(
            load_model(&path, Some("deadbeef")),
            Err(Error::Load { .. })
        ));
    }

    #[test]
    fn test_load_model_missing_or_malformed() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_model(dir.path().join("absent.json"), None).is_err());

        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"model_name\": \"m\"").unwrap();
        assert!(matches!(load_model(&path, None), Err(Error::Load { .. })));
    }
}
