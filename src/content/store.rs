//! Section Store - the immutable ordered document.

use std::collections::HashMap;

use super::section::Section;
use crate::error::{Error, Result};

/// Ordered, read-only sequence of sections.
///
/// Populated once at startup. No mutation is exposed.
#[derive(Debug, Clone, Default)]
pub struct SectionStore {
    sections: Vec<Section>,
    by_id: HashMap<String, usize>,
}

impl SectionStore {
    /// Build a store, rejecting duplicate ids.
    pub fn new(sections: Vec<Section>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(sections.len());
        for (index, section) in sections.iter().enumerate() {
            if by_id.insert(section.id.clone(), index).is_some() {
                return Err(Error::DuplicateSection(section.id.clone()));
            }
        }
        Ok(Self { sections, by_id })
    }

    pub fn count(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Indexed lookup. Fails outside `[0, count - 1]`.
    pub fn at(&self, index: usize) -> Result<&Section> {
        self.sections.get(index).ok_or(Error::IndexOutOfRange {
            index,
            count: self.sections.len(),
        })
    }

    /// Position of the section with `id`, if any.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Last valid index, `None` for an empty store.
    pub fn last_index(&self) -> Option<usize> {
        self.sections.len().checked_sub(1)
    }
}
