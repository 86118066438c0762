use std::{path::PathBuf, sync::Arc};

use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    form::{FieldRecord, FormSession, FormState},
    log_error, log_info,
    report::{ReportArtifact, ReportDownload, ReportError, ReportRenderer, ReportResult},
};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub session_id: Uuid,
    pub state: FormState,
    pub record: FieldRecord,
    pub report: Option<ReportArtifact>,
}

struct ControllerState {
    session: FormSession,
    renderer: ReportRenderer,
    report: Option<ReportArtifact>,
}

/// One form session together with its renderer and latest report.
///
/// Every call takes the lock for its full duration, so an edit and a render
/// never interleave. Reports land in `<output_root>/<session id>/`, which keeps
/// concurrent sessions from writing to the same file.
#[derive(Clone)]
pub struct ReportController {
    state: Arc<Mutex<ControllerState>>,
}

impl ReportController {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        let mut session = FormSession::new();
        session.initialize();
        let renderer = ReportRenderer::new(output_root.into().join(session.id().to_string()));

        log_info!(
            "Form session {} ready, reports go to {}",
            session.id(),
            renderer.output_dir().display()
        );

        Self {
            state: Arc::new(Mutex::new(ControllerState {
                session,
                renderer,
                report: None,
            })),
        }
    }

    pub async fn session_id(&self) -> Uuid {
        self.state.lock().await.session.id()
    }

    pub async fn snapshot(&self) -> FormSnapshot {
        let mut guard = self.state.lock().await;
        FormSnapshot {
            session_id: guard.session.id(),
            state: guard.session.state(),
            record: guard.session.get_record().clone(),
            report: guard.report.clone(),
        }
    }

    pub async fn get_record(&self) -> FieldRecord {
        self.state.lock().await.session.get_record().clone()
    }

    /// Stores one field edit; a changed value invalidates the render cache.
    pub async fn set_field(&self, name: &str, value: String) -> ReportResult<FieldRecord> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        if state.session.set_field(name, value)? {
            state.renderer.invalidate();
        }

        Ok(state.session.get_record().clone())
    }

    /// Renders the current record and remembers the result for download.
    ///
    /// The previous report is forgotten before rendering, so a failed render
    /// leaves nothing to download rather than a report of older values.
    pub async fn generate_report(&self) -> ReportResult<ReportArtifact> {
        let mut guard = Arc::clone(&self.state).lock_owned().await;
        guard.report = None;

        // The lock travels with the blocking write, so edits still wait for it.
        let rendered = tokio::task::spawn_blocking(move || -> ReportResult<ReportArtifact> {
            let state = &mut *guard;
            let record = state.session.get_record().clone();
            let artifact = state.renderer.render(&record)?;
            state.report = Some(artifact.clone());
            Ok(artifact)
        })
        .await
        .map_err(|err| ReportError::Interrupted(err.to_string()))
        .and_then(|result| result);

        if let Err(err) = &rendered {
            log_error!("Report generation failed: {err}");
        }
        rendered
    }

    pub async fn current_report(&self) -> Option<ReportArtifact> {
        self.state.lock().await.report.clone()
    }

    /// `None` until a report has been generated in this session, or after the
    /// latest generation failed.
    pub async fn download_report(&self) -> ReportResult<Option<ReportDownload>> {
        let report = self.current_report().await;
        match report {
            Some(artifact) => ReportDownload::load(&artifact).await.map(Some),
            None => Ok(None),
        }
    }

    /// Points future reports at a new root. Existing reports stay where they are.
    pub async fn relocate(&self, output_root: impl Into<PathBuf>) {
        let mut guard = self.state.lock().await;
        let dir = output_root.into().join(guard.session.id().to_string());
        log_info!("Report output moved to {}", dir.display());
        guard.renderer = ReportRenderer::new(dir);
    }
}
