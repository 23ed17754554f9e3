//! Display instructions handed to whatever renders a submission.
//!
//! The core never prints. It produces a [`Report`]: a title followed by
//! ordered [`Block`]s that a front end lays out however it likes.

use serde::Serialize;

/// A labelled value, e.g. `Humidity 💧` → `40%`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: value.into() }
    }
}

/// A column of metrics shown together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum Block {
    Panels(Vec<Panel>),
    Heading(String),
    Table(Table),
    Error(String),
    Warning(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), blocks: Vec::new() }
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn has_errors(&self) -> bool {
        self.blocks.iter().any(|b| matches!(b, Block::Error(_)))
    }
}
