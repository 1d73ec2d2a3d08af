mod compose;
mod markdown;
mod sink;

pub use compose::{compose, headings, placeholders};
pub use markdown::{anchor, render};
pub use sink::{MarkdownFile, ReportSink};

use chrono::{DateTime, Utc};

use crate::aggregate::Summaries;
use crate::config::{JobInfo, MappingPaths};
use crate::error::ReportError;
use crate::mappings::Mappings;

/// The assembled report, ready to hand to a [`ReportSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub sections: Vec<Section>,
}

impl Document {
    /// Level-1 headings listed in the table of contents, in document order.
    pub fn contents(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter(|section| section.level == 1)
            .map(|section| section.title.as_str())
            .collect()
    }

    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.title == title)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub level: u8,
    pub body: Vec<Block>,
}

impl Section {
    pub fn new(title: impl Into<String>, level: u8) -> Self {
        Self {
            title: title.into(),
            level,
            body: Vec::new(),
        }
    }

    pub fn with(mut self, block: Block) -> Self {
        self.body.push(block);
        self
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.body.iter().find_map(|block| match block {
            Block::Placeholder(text) => Some(text.as_str()),
            Block::Paragraph(_) | Block::Table(_) => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            Block::Paragraph(_) | Block::Placeholder(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(String),
    /// Stands in for a table when the feature produced nothing.
    Placeholder(String),
    Table(Table),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<H: Into<String>>(headers: impl IntoIterator<Item = H>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

/// Loads the mappings, aggregates them and writes one report through `sink`.
///
/// Nothing reaches the sink unless every earlier stage succeeded.
pub fn generate_report(
    job: &JobInfo,
    paths: &MappingPaths,
    sink: &dyn ReportSink,
) -> Result<Document, ReportError> {
    generate_report_at(job, paths, sink, Utc::now())
}

pub fn generate_report_at(
    job: &JobInfo,
    paths: &MappingPaths,
    sink: &dyn ReportSink,
    generated_at: DateTime<Utc>,
) -> Result<Document, ReportError> {
    let _span = tracing::info_span!("report", job = %job.name, job_id = %job.unique_id).entered();

    let mappings = Mappings::load(paths)?;
    let summaries = Summaries::from_mappings(&mappings);
    let document = compose(job, &summaries, generated_at);

    tracing::info!(sections = document.sections.len(), "report composed");
    sink.write(&document)?;

    Ok(document)
}
