//! Field-to-document mapping and `.docx` encoding.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Style, StyleType};
use serde::Serialize;

use crate::form::{FieldKey, FieldRecord};

use super::{ReportError, ReportResult};

pub const REPORT_TITLE: &str = "Artificial Lift DPR";
pub const DATE_HEADING: &str = "Dated:";
pub const ATTENDED_WELLS_HEADING: &str = "Attended wells on plunger lift system:";
pub const PRESSURE_HEADING: &str = "Pressure Parameters";
pub const OPERATIONAL_HEADING: &str = "Operational / Plunger Parameters";

const TITLE_LEVEL: u8 = 1;
const SECTION_LEVEL: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ReportBlock {
    Heading { level: u8, text: String },
    Paragraph { text: String },
}

impl ReportBlock {
    fn heading(level: u8, text: &str) -> Self {
        ReportBlock::Heading {
            level,
            text: text.to_string(),
        }
    }

    fn paragraph(text: impl Into<String>) -> Self {
        ReportBlock::Paragraph { text: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            ReportBlock::Heading { text, .. } | ReportBlock::Paragraph { text } => text,
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, ReportBlock::Heading { .. })
    }
}

/// The ordered heading/paragraph content of one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDocument {
    blocks: Vec<ReportBlock>,
}

impl ReportDocument {
    /// Lays out the fixed template. Empty values still produce their paragraph.
    pub fn from_record(record: &FieldRecord) -> Self {
        let mut blocks = vec![
            ReportBlock::heading(TITLE_LEVEL, REPORT_TITLE),
            ReportBlock::heading(SECTION_LEVEL, DATE_HEADING),
            ReportBlock::paragraph(record.value(FieldKey::Date)),
            ReportBlock::heading(SECTION_LEVEL, ATTENDED_WELLS_HEADING),
            ReportBlock::paragraph(record.value(FieldKey::AttendedWells)),
            ReportBlock::heading(SECTION_LEVEL, PRESSURE_HEADING),
            ReportBlock::paragraph(format!(
                "FCHP: {}, FTHP: {}",
                record.value(FieldKey::Fchp),
                record.value(FieldKey::Fthp)
            )),
            ReportBlock::paragraph(format!(
                "SCHP: {}, Regulator pressure: {}",
                record.value(FieldKey::Schp),
                record.value(FieldKey::RegulatorPressure)
            )),
            ReportBlock::heading(SECTION_LEVEL, OPERATIONAL_HEADING),
        ];

        blocks.extend(FieldKey::OPERATIONAL.iter().map(|key| {
            ReportBlock::paragraph(format!("{}: {}", key.report_label(), record.value(*key)))
        }));

        Self { blocks }
    }

    pub fn blocks(&self) -> &[ReportBlock] {
        &self.blocks
    }

    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.blocks
            .iter()
            .filter(|block| block.is_heading())
            .map(ReportBlock::text)
    }

    /// Encodes the blocks as an Office Open XML word-processing package.
    pub fn to_docx(&self) -> ReportResult<Vec<u8>> {
        let docx = self.blocks.iter().fold(with_heading_styles(Docx::new()), |docx, block| {
            let paragraph = match block {
                ReportBlock::Heading { level, text } => Paragraph::new()
                    .add_run(Run::new().add_text(text))
                    .style(&heading_style_id(*level)),
                ReportBlock::Paragraph { text } => {
                    Paragraph::new().add_run(Run::new().add_text(text))
                }
            };
            docx.add_paragraph(paragraph)
        });

        let mut buffer = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buffer)
            .map_err(|err| ReportError::Encode(err.to_string()))?;
        Ok(buffer.into_inner())
    }
}

fn heading_style_id(level: u8) -> String {
    format!("Heading{level}")
}

fn with_heading_styles(docx: Docx) -> Docx {
    docx.add_style(
        Style::new(heading_style_id(TITLE_LEVEL), StyleType::Paragraph)
            .name("Heading 1")
            .bold()
            .size(32),
    )
    .add_style(
        Style::new(heading_style_id(SECTION_LEVEL), StyleType::Paragraph)
            .name("Heading 3")
            .bold()
            .size(24),
    )
}
