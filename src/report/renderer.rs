use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::form::FieldRecord;
use crate::{log_debug, log_info};

use super::{ArtifactStore, ContentHash, RenderCache, ReportArtifact, ReportDocument, ReportResult};

const ENABLE_LOGS: bool = true;

/// Turns a field record into a persisted `.docx` report.
///
/// Re-rendering unchanged content returns the artifact already on disk
/// instead of writing a new time-stamped file.
#[derive(Debug)]
pub struct ReportRenderer {
    store: ArtifactStore,
    cache: RenderCache,
}

impl ReportRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: ArtifactStore::new(output_dir),
            cache: RenderCache::new(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        self.store.root()
    }

    pub fn render(&mut self, record: &FieldRecord) -> ReportResult<ReportArtifact> {
        self.render_at(record, Local::now())
    }

    pub fn render_at(
        &mut self,
        record: &FieldRecord,
        now: DateTime<Local>,
    ) -> ReportResult<ReportArtifact> {
        let key = ContentHash::of_record(record)?;
        if let Some(cached) = self.cache.get(&key) {
            log_debug!("Render cache hit for {}", key.short());
            return Ok(cached.clone());
        }

        log_debug!("Render cache miss for {}", key.short());
        let bytes = ReportDocument::from_record(record).to_docx()?;
        let artifact = self.store.write(&bytes, key, now)?;
        self.cache.insert(artifact.clone());

        Ok(artifact)
    }

    /// Drops the memoised artifact; the next render writes a new file.
    pub fn invalidate(&mut self) {
        if self.cache.invalidate() {
            log_info!("Render cache invalidated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldKey;
    use crate::report::ReportError;
    use chrono::TimeZone;
    use std::fs;

    fn at(second: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 1, 6, 0, second).unwrap()
    }

    #[test]
    fn unchanged_record_reuses_the_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let mut renderer = ReportRenderer::new(dir.path());
        let record = FieldRecord::default();

        let first = renderer.render_at(&record, at(0)).unwrap();
        let second = renderer.render_at(&record, at(30)).unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn changed_record_writes_a_new_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let mut renderer = ReportRenderer::new(dir.path());
        let mut record = FieldRecord::default();

        let first = renderer.render_at(&record, at(0)).unwrap();
        record.set(FieldKey::OpenTime, "45 min");
        let second = renderer.render_at(&record, at(1)).unwrap();

        assert_ne!(first.file_name, second.file_name);
        assert_ne!(first.content_hash, second.content_hash);
        assert!(first.path.is_file());
    }

    #[test]
    fn invalidate_forces_a_fresh_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut renderer = ReportRenderer::new(dir.path());
        let record = FieldRecord::default();

        let first = renderer.render_at(&record, at(0)).unwrap();
        renderer.invalidate();
        let second = renderer.render_at(&record, at(5)).unwrap();

        assert_ne!(first.path, second.path);
        assert_eq!(fs::read(&first.path).unwrap(), fs::read(&second.path).unwrap());
    }

    #[test]
    fn externally_removed_file_is_regenerated() {
        let dir = tempfile::tempdir().unwrap();
        let mut renderer = ReportRenderer::new(dir.path());
        let record = FieldRecord::default();

        let first = renderer.render_at(&record, at(0)).unwrap();
        fs::remove_file(&first.path).unwrap();
        let second = renderer.render_at(&record, at(0)).unwrap();

        assert_eq!(second.file_name, first.file_name);
        assert!(second.path.is_file());
    }

    #[test]
    fn write_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"").unwrap();
        let mut renderer = ReportRenderer::new(blocker.join("reports"));

        let err = renderer.render(&FieldRecord::default()).unwrap_err();

        assert!(matches!(err, ReportError::Write { .. }));
    }
}
