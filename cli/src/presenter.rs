use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use common::error::PresentError;
use common::session::{DownloadPresenter, FALLBACK_FILENAME};

/// Saves fetched documents into a directory.
///
/// Each document is written to a temporary file in the target directory and then
/// renamed over the final name, so an interrupted save never leaves a truncated report.
#[derive(Debug, Clone)]
pub struct DirectoryPresenter {
    dir: PathBuf,
}

impl DirectoryPresenter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Where a document presented as `filename` ends up. Directory parts are dropped.
    pub fn target_path(&self, filename: &str) -> PathBuf {
        let name = Path::new(filename)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| FALLBACK_FILENAME.into());
        self.dir.join(name)
    }
}

impl DownloadPresenter for DirectoryPresenter {
    fn present(&self, bytes: &[u8], filename: &str) -> Result<(), PresentError> {
        let failed = |err: std::io::Error| PresentError::new(filename, err.to_string());
        let target = self.target_path(filename);

        std::fs::create_dir_all(&self.dir).map_err(failed)?;
        let mut temp = NamedTempFile::new_in(&self.dir).map_err(failed)?;
        temp.write_all(bytes).map_err(failed)?;
        temp.persist(&target).map_err(|e| failed(e.error))?;

        log::info!("wrote {} ({} bytes)", target.display(), bytes.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_document_under_given_name() {
        let dir = tempfile::tempdir().unwrap();
        let presenter = DirectoryPresenter::new(dir.path().join("out"));

        presenter.present(b"docx bytes", "report123.docx").unwrap();

        let written = std::fs::read(dir.path().join("out/report123.docx")).unwrap();
        assert_eq!(written, b"docx bytes");
    }

    #[test]
    fn existing_report_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let presenter = DirectoryPresenter::new(dir.path());
        presenter.present(b"old", "r.docx").unwrap();
        presenter.present(b"new", "r.docx").unwrap();

        assert_eq!(std::fs::read(dir.path().join("r.docx")).unwrap(), b"new");
    }

    #[test]
    fn directory_parts_are_stripped() {
        let presenter = DirectoryPresenter::new("/srv/out");
        assert_eq!(
            presenter.target_path("../../etc/passwd"),
            PathBuf::from("/srv/out/passwd")
        );
        assert_eq!(
            presenter.target_path(".."),
            PathBuf::from("/srv/out").join(FALLBACK_FILENAME)
        );
    }
}
