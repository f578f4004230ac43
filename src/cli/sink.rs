//! Download sink that writes exports to disk.

use std::path::{Path, PathBuf};

use asciify::export::{DownloadSink, ExportError, ExportFile};

/// Writes each export to a file.
///
/// If the target is an existing directory the export's own file name is
/// used inside it.
#[derive(Debug, Clone)]
pub struct FileSink {
    target: PathBuf,
    written: Option<PathBuf>,
}

impl FileSink {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            written: None,
        }
    }

    /// Path of the last file written.
    pub fn written(&self) -> Option<&Path> {
        self.written.as_deref()
    }

    fn resolve(&self, file_name: &str) -> PathBuf {
        if self.target.is_dir() {
            self.target.join(file_name)
        } else {
            self.target.clone()
        }
    }
}

impl DownloadSink for FileSink {
    fn deliver(&mut self, file: ExportFile) -> Result<(), ExportError> {
        let path = self.resolve(&file.file_name);
        std::fs::write(&path, &file.bytes)
            .map_err(|e| ExportError::Delivery(format!("{}: {}", path.display(), e)))?;
        log::debug!(
            "wrote {} bytes of {} to {}",
            file.bytes.len(),
            file.mime_type,
            path.display()
        );
        self.written = Some(path);
        Ok(())
    }
}
