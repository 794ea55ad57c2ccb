use indexmap::IndexMap;
use serde::Deserialize;

use crate::{answers::Answers, project::ProjectName};

/// A single settings entry: a scalar, or a record of scalars one level deep.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    String(String),
    Record(IndexMap<String, Value>),
}
impl Value {
    /// `true`, or one of `yes` / `y` / `true` in any case.
    pub fn is_affirmative(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::String(s) => ["yes", "y", "true"]
                .iter()
                .any(|word| s.eq_ignore_ascii_case(word)),
            Value::Int(_) | Value::Record(_) => false,
        }
    }

    /// String form used for substitution. Records have none.
    pub fn as_scalar(&self) -> Option<String> {
        match self {
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(i) => Some(i.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::Record(_) => None,
        }
    }
}
impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}
impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}
impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

/// Placeholder values for one scaffold run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings(IndexMap<String, Value>);
impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn with_record<K, V>(mut self, key: &str, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let record = fields
            .into_iter()
            .map(|(field, value)| (field.into(), value.into()))
            .collect();

        self.0.insert(key.to_string(), Value::Record(record));
        self
    }

    /// Resolves `name` or `record.field`. Deeper paths resolve to `None`.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        match path.split_once('.') {
            None => self.0.get(path),
            Some((record, field)) => match self.0.get(record)? {
                Value::Record(fields) if !field.contains('.') => fields.get(field),
                _ => None,
            },
        }
    }

    pub fn is_affirmative(&self, key: &str) -> bool {
        self.lookup(key).is_some_and(Value::is_affirmative)
    }

    /// Builds the settings every bundled template is written against.
    pub fn from_answers(name: &ProjectName, answers: &Answers) -> Self {
        let settings = Settings::new()
            .with("projectName", name.as_str())
            .with("projectChoice", answers.project.slug())
            .with("localWordpressURL", answers.local_wordpress_url.as_str())
            .with("installWordpress", answers.install_wordpress);

        let mut settings = match (&answers.install_wordpress, &answers.database) {
            (true, Some(db)) => settings.with_record(
                "localWordpressDB",
                [
                    ("name", db.name.as_str()),
                    ("host", db.host.as_str()),
                    ("user", db.user.as_str()),
                    ("password", db.password.as_str()),
                ],
            ),
            _ => settings,
        };

        // extras never shadow the standard keys
        for (key, value) in &answers.extra {
            settings.0.entry(key.clone()).or_insert_with(|| value.clone());
        }

        settings
    }
}
