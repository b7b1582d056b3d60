use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;

/// One markdown source as read from disk, in configured order.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: String,
    pub markdown: String,
}

/// Names the output of a run: `<prefix>-<YYYY-MM>.pdf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStamp {
    pub prefix: String,
    pub date: String,
}

impl BuildStamp {
    pub fn new(prefix: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            date: date.into(),
        }
    }

    pub fn at(prefix: impl Into<String>, now: DateTime<Local>) -> Self {
        Self::new(prefix, now.format("%Y-%m").to_string())
    }

    pub fn now(prefix: impl Into<String>) -> Self {
        Self::at(prefix, Local::now())
    }

    /// Document title; identical to the PDF file name.
    pub fn title(&self) -> String {
        format!("{}-{}.pdf", self.prefix, self.date)
    }

    pub fn pdf_file_name(&self) -> String {
        self.title()
    }

    pub fn html_file_name(&self) -> String {
        format!("{}-{}.html", self.prefix, self.date)
    }
}

/// Variables handed to the page template.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    pub title: String,
    pub date: String,
    pub pages: Vec<String>,
}

/// The filled template together with the values that produced it.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub stamp: BuildStamp,
    pub pages: Vec<String>,
    pub html: String,
}

/// Everything the PDF engine needs for one document.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub html: String,
    pub base_url: String,
    pub stylesheets: Vec<PathBuf>,
    pub target: PathBuf,
}
