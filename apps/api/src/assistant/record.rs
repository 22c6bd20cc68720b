use std::collections::BTreeMap;
use std::fmt;

use crate::assistant::task::TaskKind;

/// A single resolved template argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Only the empty string counts; whitespace is a value.
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{n}"),
        }
    }
}

/// Fully resolved arguments for one task. Every field named by the task's descriptor is present.
///
/// Built once per request and never edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRecord {
    pub kind: TaskKind,
    fields: BTreeMap<&'static str, FieldValue>,
}

impl ExtractedRecord {
    pub(crate) fn new(kind: TaskKind, fields: BTreeMap<&'static str, FieldValue>) -> Self {
        Self { kind, fields }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }
}

/// Final answer of a task: model output returned verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    pub kind: TaskKind,
    pub text: String,
}
