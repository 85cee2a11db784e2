use std::path::{Path, PathBuf};

use anyhow::Context;
use mime_guess::from_path;

use common::model::file::SelectedFile;

/// Reads the metadata of a local file into a `SelectedFile`.
///
/// The media type is guessed from the extension and left empty when unknown, the same
/// way a browser reports files it cannot classify.
pub async fn open(path: &Path) -> anyhow::Result<SelectedFile<PathBuf>> {
    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("cannot read {}", path.display()))?;
    anyhow::ensure!(metadata.is_file(), "{} is not a file", path.display());

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let media_type = from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_default();

    Ok(SelectedFile::new(name, media_type, metadata.len(), path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn guesses_media_type_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.xlsx");
        std::fs::write(&path, b"PK\x03\x04").unwrap();

        let file = open(&path).await.unwrap();
        assert_eq!(file.name, "data.xlsx");
        assert_eq!(
            file.media_type,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(file.size, 4);
        assert_eq!(file.handle, path);
    }

    #[tokio::test]
    async fn unknown_extension_has_empty_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readings.zzq");
        std::fs::write(&path, b"x").unwrap();

        assert_eq!(open(&path).await.unwrap().media_type, "");
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open(&dir.path().join("absent.xlsx")).await.is_err());
    }
}
