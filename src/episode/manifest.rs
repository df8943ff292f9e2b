//! Episode manifest loading.
//!
//! The content pipeline exports the article list once per build:
//!
//! ```toml
//! [[episode]]
//! title = "<b>Ep 1</b>"
//! url = "ep1"
//! date = "2024-06-15 14:30"
//! podcast = "https://cdn.example.com/ep1.mp3"
//! length = 31337
//! ```
//!
//! JSON manifests use `{"episode": [...]}` or `{"episodes": [...]}`.

use super::Episode;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Manifest loading errors, all carrying the offending path.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid TOML in episode manifest `{0}`")]
    Toml(PathBuf, #[source] toml::de::Error),

    #[error("invalid JSON in episode manifest `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("unsupported episode manifest `{0}`, expected a .toml or .json file")]
    Format(PathBuf),
}

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default, alias = "episodes")]
    episode: Vec<Episode>,
}

/// Load the ordered episode list; the format follows the file extension.
pub fn load_manifest(path: &Path) -> Result<Vec<Episode>, ManifestError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let is_json = match extension.as_deref() {
        Some("toml") => false,
        Some("json") => true,
        _ => return Err(ManifestError::Format(path.to_path_buf())),
    };

    let content =
        fs::read_to_string(path).map_err(|e| ManifestError::Io(path.to_path_buf(), e))?;
    let manifest: Manifest = if is_json {
        serde_json::from_str(&content).map_err(|e| ManifestError::Json(path.to_path_buf(), e))?
    } else {
        toml::from_str(&content).map_err(|e| ManifestError::Toml(path.to_path_buf(), e))?
    };

    Ok(manifest.episode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::EpisodeDate;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_toml() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "episodes.toml",
            r#"
[[episode]]
title = "<b>Ep 1</b>"
url = "ep1"
date = "2024-06-15 14:30"
podcast = "ep1.mp3"
length = 31337

[[episode]]
title = "Notes"
url = "notes"
date = "2024-06-16"
status = "draft"
"#,
        );

        let episodes = load_manifest(&path).unwrap();
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].title, "<b>Ep 1</b>");
        assert_eq!(episodes[0].status, "published");
        assert_eq!(
            episodes[0].podcast.as_ref().unwrap().to_text().unwrap(),
            "ep1.mp3"
        );
        assert_eq!(
            episodes[0].length.as_ref().unwrap().to_text().unwrap(),
            "31337"
        );
        assert_eq!(episodes[1].status, "draft");
        assert_eq!(episodes[1].date, EpisodeDate::parse("2024-06-16").unwrap());
    }

    #[test]
    fn test_load_json_with_either_key() {
        let dir = TempDir::new().unwrap();
        for key in ["episode", "episodes"] {
            let path = write(
                &dir,
                "episodes.json",
                &format!(
                    r#"{{"{key}": [{{"title": "Ep", "url": "ep", "date": "2024-06-15T14:30:00Z", "podcast": "ep.mp3"}}]}}"#
                ),
            );
            let episodes = load_manifest(&path).unwrap();
            assert_eq!(episodes.len(), 1, "{key}");
            assert!(matches!(episodes[0].date, EpisodeDate::Aware(_)));
        }
    }

    #[test]
    fn test_empty_manifest() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "episodes.toml", "");
        assert!(load_manifest(&path).unwrap().is_empty());
    }

    #[test]
    fn test_errors_carry_path() {
        let dir = TempDir::new().unwrap();

        let missing = dir.path().join("missing.toml");
        let err = load_manifest(&missing).unwrap_err();
        assert!(matches!(err, ManifestError::Io(..)));
        assert!(err.to_string().contains("missing.toml"));

        let bad = write(&dir, "bad.toml", "[[episode]]\ntitle = \"Ep\"\n");
        let err = load_manifest(&bad).unwrap_err();
        assert!(matches!(err, ManifestError::Toml(..)));
        assert!(err.to_string().contains("bad.toml"));

        let bad_date = write(
            &dir,
            "date.json",
            r#"{"episode": [{"title": "Ep", "url": "ep", "date": "yesterday"}]}"#,
        );
        assert!(matches!(
            load_manifest(&bad_date).unwrap_err(),
            ManifestError::Json(..)
        ));

        let yaml = write(&dir, "episodes.yaml", "");
        assert!(matches!(
            load_manifest(&yaml).unwrap_err(),
            ManifestError::Format(_)
        ));
    }
}
