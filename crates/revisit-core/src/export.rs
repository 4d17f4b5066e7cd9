//! Wrong-answer export artifact.
//!
//! At session end the raw records of every question answered wrong are
//! written as a JSON array, in the same format the bank was loaded from,
//! so the file can be loaded again as a focused bank.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::ExportError;
use crate::model::QuestionRecord;

/// The payload written at session end.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub created_at: DateTime<Local>,
    pub records: Vec<QuestionRecord>,
}

impl ExportArtifact {
    pub fn new(records: Vec<QuestionRecord>, created_at: DateTime<Local>) -> Self {
        Self {
            created_at,
            records,
        }
    }

    /// File name of the form `wA<MM><DD><HH><mm>.json`.
    pub fn file_name(&self) -> String {
        format!("wA{}.json", self.created_at.format("%m%d%H%M"))
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Destination for export artifacts.
pub trait Exporter: Send {
    /// Write the artifact, returning where it went.
    fn export(&self, artifact: &ExportArtifact) -> Result<PathBuf, ExportError>;
}

/// Writes artifacts into a directory, creating it if needed.
#[derive(Debug, Clone)]
pub struct DirectoryExporter {
    dir: PathBuf,
}

impl DirectoryExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Exporter for DirectoryExporter {
    fn export(&self, artifact: &ExportArtifact) -> Result<PathBuf, ExportError> {
        let json = artifact.to_json()?;
        let path = self.dir.join(artifact.file_name());
        let io_err = |source| ExportError::Io {
            path: path.display().to_string(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(io_err)?;
        std::fs::write(&path, json).map_err(io_err)?;
        Ok(path)
    }
}

/// What happened to the export of the most recent session end.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExportStatus {
    /// The session has not ended, or no exporter is attached.
    #[default]
    NotAttempted,
    /// No question was answered wrong, so nothing was written.
    NothingToExport,
    Written(PathBuf),
    /// The write failed. Session state is unaffected.
    Failed(String),
}
