use std::fs;
use std::path::{Path, PathBuf};

use super::{Document, render};
use crate::error::ReportError;

/// Destination for a finished report.
pub trait ReportSink {
    fn write(&self, document: &Document) -> Result<(), ReportError>;
}

/// Writes `report.md` into a directory.
///
/// The markdown goes to a temporary sibling first and is renamed into
/// place, so a failed write never leaves a partial report behind.
#[derive(Debug, Clone)]
pub struct MarkdownFile {
    dir: PathBuf,
}

impl MarkdownFile {
    pub const FILE_NAME: &'static str = "report.md";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(Self::FILE_NAME)
    }

    fn staging_path(&self) -> PathBuf {
        self.dir.join(format!(".{}.partial", Self::FILE_NAME))
    }
}

impl ReportSink for MarkdownFile {
    fn write(&self, document: &Document) -> Result<(), ReportError> {
        let markdown = render(document);
        let staging = self.staging_path();
        let target = self.path();

        fs::write(&staging, markdown.as_bytes()).map_err(|source| write_error(&staging, source))?;
        if let Err(source) = fs::rename(&staging, &target) {
            let _ = fs::remove_file(&staging);
            return Err(write_error(&target, source));
        }

        tracing::info!(path = %target.display(), bytes = markdown.len(), "report written");
        Ok(())
    }
}

fn write_error(path: &Path, source: std::io::Error) -> ReportError {
    ReportError::Write {
        path: path.to_path_buf(),
        source,
    }
}
