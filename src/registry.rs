//! The static teacher registry: which subjects each teacher is eligible to
//! take. The mapping is configuration data fixed at process start; the store
//! itself never re-validates subject eligibility, so this registry is the only
//! place the restriction lives.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Immutable teacher→subjects mapping. A `BTreeMap` keeps the teacher list in
/// a stable sorted order so selector widgets render deterministically.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct TeacherRegistry {
    subjects: BTreeMap<String, Vec<String>>,
}

impl Default for TeacherRegistry {
    /// The built-in roster used when no registry file is supplied.
    fn default() -> Self {
        let mut subjects = BTreeMap::new();
        subjects.insert(
            "John".to_string(),
            vec!["Physics".to_string(), "Chemistry".to_string()],
        );
        subjects.insert(
            "Mary".to_string(),
            vec!["Maths".to_string(), "English".to_string()],
        );
        subjects.insert(
            "Harshada".to_string(),
            vec!["Biology".to_string(), "Computer Science".to_string()],
        );
        Self { subjects }
    }
}

impl TeacherRegistry {
    /// Load a registry from a JSON file shaped as
    /// `{"Teacher": ["Subject", ...], ...}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read registry file {}", path.display()))?;
        let registry = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse registry file {}", path.display()))?;
        Ok(registry)
    }

    /// Teacher names in stable sorted order.
    pub fn teachers(&self) -> impl Iterator<Item = &str> {
        self.subjects.keys().map(String::as_str)
    }

    /// Number of registered teachers.
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// True when no teachers are registered at all.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Subjects the given teacher may take. Unknown teachers yield an empty
    /// slice rather than an error.
    pub fn subjects_for(&self, teacher: &str) -> &[String] {
        self.subjects
            .get(teacher)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster() {
        let registry = TeacherRegistry::default();
        let teachers: Vec<&str> = registry.teachers().collect();
        assert_eq!(teachers, vec!["Harshada", "John", "Mary"]);
    }

    #[test]
    fn test_subjects_for_john() {
        let registry = TeacherRegistry::default();
        assert_eq!(registry.subjects_for("John"), ["Physics", "Chemistry"]);
    }

    #[test]
    fn test_unknown_teacher_yields_empty() {
        let registry = TeacherRegistry::default();
        assert!(registry.subjects_for("Unknown").is_empty());
    }

    #[test]
    fn test_registry_from_json() {
        let registry: TeacherRegistry =
            serde_json::from_str(r#"{"Ada": ["Maths"], "Grace": ["Computer Science"]}"#)
                .expect("valid registry JSON");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.subjects_for("Ada"), ["Maths"]);
        assert_eq!(registry.subjects_for("Grace"), ["Computer Science"]);
    }
}
