use std::collections::HashSet;

use shared::sections::SECTIONS;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequenceError {
    #[error("section sequence must contain at least one path")]
    Empty,
    #[error("section path '{0}' appears more than once")]
    Duplicate(String),
}

/// Ordered, immutable list of section paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSequence {
    paths: Vec<String>,
}

impl SectionSequence {
    pub fn new<I, S>(paths: I) -> Result<Self, SequenceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths: Vec<String> = paths.into_iter().map(Into::into).collect();
        if paths.is_empty() {
            return Err(SequenceError::Empty);
        }

        let mut seen = HashSet::with_capacity(paths.len());
        for path in &paths {
            if !seen.insert(path.as_str()) {
                return Err(SequenceError::Duplicate(path.clone()));
            }
        }

        Ok(Self { paths })
    }

    /// The portfolio's public sections, in scroll order.
    pub fn portfolio() -> Self {
        Self {
            paths: SECTIONS
                .iter()
                .map(|section| section.path.to_string())
                .collect(),
        }
    }

    /// Position of `active_path`, or `None` when it is not a sequenced section.
    pub fn index_of(&self, active_path: &str) -> Option<usize> {
        self.paths.iter().position(|path| path == active_path)
    }

    pub fn path_at(&self, index: usize) -> Option<&str> {
        self.paths.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

impl Default for SectionSequence {
    fn default() -> Self {
        Self::portfolio()
    }
}
