pub mod artifact;
pub mod cache;
pub mod document;
pub mod error;
pub mod renderer;

pub use artifact::{report_file_name, ArtifactStore, ReportArtifact, ReportDownload, DOCX_MIME_TYPE};
pub use cache::{ContentHash, RenderCache};
pub use document::{ReportBlock, ReportDocument};
pub use error::{ReportError, ReportResult};
pub use renderer::ReportRenderer;
