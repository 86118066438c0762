//! Content-keyed memoisation of the last rendered report.

use std::fmt::{self, Display, Formatter};

use serde::{Serialize, Serializer};

use crate::form::FieldRecord;

use super::{ReportArtifact, ReportError, ReportResult};

/// BLAKE3 hash of a record's canonical JSON encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    pub fn compute(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    pub fn of_record(record: &FieldRecord) -> ReportResult<Self> {
        let json =
            serde_json::to_vec(record).map_err(|err| ReportError::Encode(err.to_string()))?;
        Ok(Self::compute(&json))
    }

    /// First 16 hex characters, for log lines.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for ContentHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl Serialize for ContentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Artifact for the most recently rendered record content.
#[derive(Debug, Default)]
pub struct RenderCache {
    entry: Option<ReportArtifact>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached artifact for `key`, provided its file is still on disk.
    pub fn get(&self, key: &ContentHash) -> Option<&ReportArtifact> {
        self.entry
            .as_ref()
            .filter(|artifact| artifact.content_hash == *key && artifact.path.is_file())
    }

    pub fn insert(&mut self, artifact: ReportArtifact) {
        self.entry = Some(artifact);
    }

    pub fn invalidate(&mut self) -> bool {
        self.entry.take().is_some()
    }
}
