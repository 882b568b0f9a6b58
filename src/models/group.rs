//! Student group and subject models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{GroupId, SubjectId, Teacher};

/// A student group and the subjects it must be taught.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Index of this group.
    pub id: GroupId,
    /// Human-readable name.
    pub name: String,
    /// Subjects this group must be taught.
    pub curriculum: BTreeSet<SubjectId>,
}

/// A subject. Only its identity matters to the search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Index of this subject.
    pub id: SubjectId,
    /// Human-readable name.
    pub name: String,
}

impl Group {
    /// Creates a group with an empty curriculum.
    pub fn new(id: impl Into<GroupId>) -> Self {
        let id = id.into();
        Self {
            id,
            name: id.to_string(),
            curriculum: BTreeSet::new(),
        }
    }

    /// Sets the group name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a subject to the curriculum.
    pub fn with_subject(mut self, subject: impl Into<SubjectId>) -> Self {
        self.curriculum.insert(subject.into());
        self
    }

    /// Adds several subjects to the curriculum.
    pub fn with_subjects<I>(mut self, subjects: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<SubjectId>,
    {
        self.curriculum.extend(subjects.into_iter().map(Into::into));
        self
    }

    /// Whether `subject` is part of this group's curriculum.
    #[inline]
    pub fn studies(&self, subject: SubjectId) -> bool {
        self.curriculum.contains(&subject)
    }

    /// Subjects `teacher` can teach to this group, in ascending order.
    pub fn teachable_by(&self, teacher: &Teacher) -> Vec<SubjectId> {
        self.curriculum
            .intersection(&teacher.qualifications)
            .copied()
            .collect()
    }
}

impl Subject {
    /// Creates a subject.
    pub fn new(id: impl Into<SubjectId>) -> Self {
        let id = id.into();
        Self {
            id,
            name: id.to_string(),
        }
    }

    /// Sets the subject name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
