//! Teacher model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{SubjectId, TeacherId};

/// A teacher and the subjects they are qualified to teach.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    /// Index of this teacher.
    pub id: TeacherId,
    /// Human-readable name.
    pub name: String,
    /// Subjects this teacher may teach.
    pub qualifications: BTreeSet<SubjectId>,
}

impl Teacher {
    /// Creates a teacher with no qualifications.
    pub fn new(id: impl Into<TeacherId>) -> Self {
        let id = id.into();
        Self {
            id,
            name: id.to_string(),
            qualifications: BTreeSet::new(),
        }
    }

    /// Sets the teacher name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a qualification.
    pub fn with_qualification(mut self, subject: impl Into<SubjectId>) -> Self {
        self.qualifications.insert(subject.into());
        self
    }

    /// Adds several qualifications.
    pub fn with_qualifications<I>(mut self, subjects: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<SubjectId>,
    {
        self.qualifications
            .extend(subjects.into_iter().map(Into::into));
        self
    }

    /// Whether this teacher may teach `subject`.
    #[inline]
    pub fn can_teach(&self, subject: SubjectId) -> bool {
        self.qualifications.contains(&subject)
    }
}
