//! Read-only arena of validated requirements.
//!
//! Every analysis takes `&Snapshot`. Records are addressed by position
//! (input order) or by id, and nothing hands out a mutable reference.

use crate::error::{ReadinessError, Result};
use crate::model::{RawRequirement, Requirement};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    title: Option<String>,
    requirements: Vec<Requirement>,
    by_id: HashMap<String, usize>,
}

impl Snapshot {
    /// Build from already-typed requirements, rejecting duplicate ids.
    pub fn new(requirements: Vec<Requirement>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(requirements.len());
        for (i, r) in requirements.iter().enumerate() {
            if by_id.insert(r.id.clone(), i).is_some() {
                return Err(ReadinessError::schema(&r.id, "id", "duplicate id"));
            }
        }
        Ok(Self {
            title: None,
            requirements,
            by_id,
        })
    }

    /// Validate raw records in input order; the first violation wins.
    pub fn from_raw(raw: Vec<RawRequirement>) -> Result<Self> {
        let requirements = raw
            .into_iter()
            .enumerate()
            .map(|(i, r)| Requirement::from_raw(i, r))
            .collect::<Result<Vec<_>>>()?;
        Self::new(requirements)
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Requirement> {
        self.by_id.get(id).map(|&i| &self.requirements[i])
    }

    pub fn at(&self, position: usize) -> Option<&Requirement> {
        self.requirements.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Requirement> {
        self.requirements.iter()
    }

    pub fn applicable(&self) -> impl Iterator<Item = &Requirement> + '_ {
        self.requirements.iter().filter(|r| r.applicable)
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Requirement;
    type IntoIter = std::slice::Iter<'a, Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
