//! Generated report files: naming, persistence and read-back for download.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Local};
use serde::Serialize;

use crate::{log_info, log_warn};

use super::{ContentHash, ReportError, ReportResult};

const ENABLE_LOGS: bool = true;

pub const FILE_PREFIX: &str = "Artificial_Lift_DPR_";
pub const DOCX_EXTENSION: &str = "docx";
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Same-second collisions advance the timestamp; give up after this many tries.
const MAX_NAME_ATTEMPTS: i64 = 60;

/// `Artificial_Lift_DPR_<YYYYMMDDHHMMSS>.docx`
pub fn report_file_name(created_at: &DateTime<Local>) -> String {
    format!(
        "{FILE_PREFIX}{}.{DOCX_EXTENSION}",
        created_at.format("%Y%m%d%H%M%S")
    )
}

/// A report written to disk. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportArtifact {
    pub file_name: String,
    pub path: PathBuf,
    pub created_at: DateTime<Local>,
    pub content_hash: ContentHash,
    pub size_bytes: u64,
}

/// Writes report files under one directory, never replacing an existing file.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn write(
        &self,
        bytes: &[u8],
        content_hash: ContentHash,
        created_at: DateTime<Local>,
    ) -> ReportResult<ReportArtifact> {
        fs::create_dir_all(&self.root).map_err(|err| ReportError::write(&self.root, err))?;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let stamp = created_at + Duration::seconds(attempt);
            let file_name = report_file_name(&stamp);
            let path = self.root.join(&file_name);

            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                    log_warn!("{} already exists, advancing timestamp", path.display());
                    continue;
                }
                Err(err) => return Err(ReportError::write(path, err)),
            };

            let written = file.write_all(bytes).and_then(|()| file.sync_all());
            drop(file);
            if let Err(err) = written {
                let _ = fs::remove_file(&path);
                return Err(ReportError::write(path, err));
            }

            log_info!("Report written to {} ({} bytes)", path.display(), bytes.len());

            return Ok(ReportArtifact {
                file_name,
                path,
                created_at: stamp,
                content_hash,
                size_bytes: bytes.len() as u64,
            });
        }

        Err(ReportError::write(
            &self.root,
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                "no free report file name within the collision window",
            ),
        ))
    }
}

/// Bytes and metadata the page needs to offer the report as a download.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDownload {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ReportDownload {
    pub async fn load(artifact: &ReportArtifact) -> ReportResult<Self> {
        let bytes = tokio::fs::read(&artifact.path)
            .await
            .map_err(|err| ReportError::read(&artifact.path, err))?;
        Ok(Self {
            file_name: artifact.file_name.clone(),
            mime_type: DOCX_MIME_TYPE,
            bytes,
        })
    }
}
